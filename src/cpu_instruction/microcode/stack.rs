use super::*;
use crate::cpu_instruction::format_stack_mask;

/*
 * PSHS/PULS/PSHU/PULU move the registers named by the mask byte
 * through the S or the U stack. Push order is PC first down to CC,
 * pull is the reverse. Bit 6 always names the other stack pointer.
 */
pub fn pshs(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;
    let mask = resolution.operands[0];

    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    if mask & 0x80 != 0 {
        registers.stack_push_s16(memory, registers.pc);
    }
    if mask & 0x40 != 0 {
        registers.stack_push_s16(memory, registers.u);
    }
    if mask & 0x20 != 0 {
        registers.stack_push_s16(memory, registers.y);
    }
    if mask & 0x10 != 0 {
        registers.stack_push_s16(memory, registers.x);
    }
    if mask & 0x08 != 0 {
        registers.stack_push_s(memory, registers.dp);
    }
    if mask & 0x04 != 0 {
        registers.stack_push_s(memory, registers.b);
    }
    if mask & 0x02 != 0 {
        registers.stack_push_s(memory, registers.a);
    }
    if mask & 0x01 != 0 {
        registers.stack_push_s(memory, registers.ccr);
    }

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!(
            "[{}][S=0x{:04x}]",
            format_stack_mask(mask, false),
            registers.s
        ),
    ))
}

pub fn puls(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;
    let mask = resolution.operands[0];

    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    if mask & 0x01 != 0 {
        registers.ccr = registers.stack_pull_s(memory);
    }
    if mask & 0x02 != 0 {
        registers.a = registers.stack_pull_s(memory);
    }
    if mask & 0x04 != 0 {
        registers.b = registers.stack_pull_s(memory);
    }
    if mask & 0x08 != 0 {
        registers.dp = registers.stack_pull_s(memory);
    }
    if mask & 0x10 != 0 {
        registers.x = registers.stack_pull_s16(memory);
    }
    if mask & 0x20 != 0 {
        registers.y = registers.stack_pull_s16(memory);
    }
    if mask & 0x40 != 0 {
        registers.u = registers.stack_pull_s16(memory);
    }
    if mask & 0x80 != 0 {
        registers.pc = registers.stack_pull_s16(memory);
    }

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!(
            "[{}][S=0x{:04x}]",
            format_stack_mask(mask, false),
            registers.s
        ),
    ))
}

pub fn pshu(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;
    let mask = resolution.operands[0];

    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    if mask & 0x80 != 0 {
        registers.stack_push_u16(memory, registers.pc);
    }
    if mask & 0x40 != 0 {
        registers.stack_push_u16(memory, registers.s);
    }
    if mask & 0x20 != 0 {
        registers.stack_push_u16(memory, registers.y);
    }
    if mask & 0x10 != 0 {
        registers.stack_push_u16(memory, registers.x);
    }
    if mask & 0x08 != 0 {
        registers.stack_push_u(memory, registers.dp);
    }
    if mask & 0x04 != 0 {
        registers.stack_push_u(memory, registers.b);
    }
    if mask & 0x02 != 0 {
        registers.stack_push_u(memory, registers.a);
    }
    if mask & 0x01 != 0 {
        registers.stack_push_u(memory, registers.ccr);
    }

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!(
            "[{}][U=0x{:04x}]",
            format_stack_mask(mask, true),
            registers.u
        ),
    ))
}

pub fn pulu(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;
    let mask = resolution.operands[0];

    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    if mask & 0x01 != 0 {
        registers.ccr = registers.stack_pull_u(memory);
    }
    if mask & 0x02 != 0 {
        registers.a = registers.stack_pull_u(memory);
    }
    if mask & 0x04 != 0 {
        registers.b = registers.stack_pull_u(memory);
    }
    if mask & 0x08 != 0 {
        registers.dp = registers.stack_pull_u(memory);
    }
    if mask & 0x10 != 0 {
        registers.x = registers.stack_pull_u16(memory);
    }
    if mask & 0x20 != 0 {
        registers.y = registers.stack_pull_u16(memory);
    }
    if mask & 0x40 != 0 {
        registers.s = registers.stack_pull_u16(memory);
    }
    if mask & 0x80 != 0 {
        registers.pc = registers.stack_pull_u16(memory);
    }

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!(
            "[{}][U=0x{:04x}]",
            format_stack_mask(mask, true),
            registers.u
        ),
    ))
}

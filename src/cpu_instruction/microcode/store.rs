use super::*;

pub fn sta(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;
    let target_address = resolution
        .target_address
        .expect("STA instruction must have operands, crashing the application");

    memory.write_byte(target_address, registers.a);
    registers.update_nz8(registers.a);
    registers.set_v_flag(false);
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!(
            "[0x{:04X}=0x{:02x}][CC={}]",
            target_address,
            registers.a,
            registers.format_ccr()
        ),
    ))
}

pub fn stb(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;
    let target_address = resolution
        .target_address
        .expect("STB instruction must have operands, crashing the application");

    memory.write_byte(target_address, registers.b);
    registers.update_nz8(registers.b);
    registers.set_v_flag(false);
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!(
            "[0x{:04X}=0x{:02x}][CC={}]",
            target_address,
            registers.b,
            registers.format_ccr()
        ),
    ))
}

pub fn stx(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;
    let target_address = resolution
        .target_address
        .expect("STX instruction must have operands, crashing the application");

    memory.write_word(target_address, registers.x);
    registers.update_nz16(registers.x);
    registers.set_v_flag(false);
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!(
            "[0x{:04X}=0x{:04x}][CC={}]",
            target_address,
            registers.x,
            registers.format_ccr()
        ),
    ))
}

pub fn stu(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;
    let target_address = resolution
        .target_address
        .expect("STU instruction must have operands, crashing the application");

    memory.write_word(target_address, registers.u);
    registers.update_nz16(registers.u);
    registers.set_v_flag(false);
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!(
            "[0x{:04X}=0x{:04x}][CC={}]",
            target_address,
            registers.u,
            registers.format_ccr()
        ),
    ))
}

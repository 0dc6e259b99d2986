use super::*;

pub fn jmp(
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
        .expect("JMP instruction must have operands, crashing the application");

    registers.pc = (target_address & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[PC=0x{:04x}]", registers.pc),
    ))
}

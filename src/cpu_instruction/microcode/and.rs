use super::*;

pub fn anda(
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
        .expect("ANDA instruction must have operands, crashing the application");

    registers.a &= memory.read_byte(target_address);
    registers.update_flags_logic(registers.a);
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[A=0x{:02x}][CC={}]", registers.a, registers.format_ccr()),
    ))
}

pub fn andb(
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
        .expect("ANDB instruction must have operands, crashing the application");

    registers.b &= memory.read_byte(target_address);
    registers.update_flags_logic(registers.b);
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[B=0x{:02x}][CC={}]", registers.b, registers.format_ccr()),
    ))
}

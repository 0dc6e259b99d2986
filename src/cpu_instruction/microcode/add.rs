use super::*;

pub fn adda(
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
        .expect("ADDA instruction must have operands, crashing the application");

    let byte = memory.read_byte(target_address);
    let sum = registers.a as u16 + byte as u16;
    registers.update_flags_add8(registers.a, byte, sum);
    registers.a = (sum & 0xff) as u8;
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[A=0x{:02x}][CC={}]", registers.a, registers.format_ccr()),
    ))
}

pub fn addb(
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
        .expect("ADDB instruction must have operands, crashing the application");

    let byte = memory.read_byte(target_address);
    let sum = registers.b as u16 + byte as u16;
    registers.update_flags_add8(registers.b, byte, sum);
    registers.b = (sum & 0xff) as u8;
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[B=0x{:02x}][CC={}]", registers.b, registers.format_ccr()),
    ))
}

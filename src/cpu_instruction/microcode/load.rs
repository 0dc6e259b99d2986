use super::*;

pub fn lda(
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
        .expect("LDA instruction must have operands, crashing the application");

    registers.a = memory.read_byte(target_address);
    registers.update_nz8(registers.a);
    registers.set_v_flag(false);
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[A=0x{:02x}][CC={}]", registers.a, registers.format_ccr()),
    ))
}

pub fn ldb(
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
        .expect("LDB instruction must have operands, crashing the application");

    registers.b = memory.read_byte(target_address);
    registers.update_nz8(registers.b);
    registers.set_v_flag(false);
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[B=0x{:02x}][CC={}]", registers.b, registers.format_ccr()),
    ))
}

pub fn ldx(
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
        .expect("LDX instruction must have operands, crashing the application");

    registers.x = memory.read_word(target_address);
    registers.update_nz16(registers.x);
    registers.set_v_flag(false);
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[X=0x{:04x}][CC={}]", registers.x, registers.format_ccr()),
    ))
}

pub fn ldu(
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
        .expect("LDU instruction must have operands, crashing the application");

    registers.u = memory.read_word(target_address);
    registers.update_nz16(registers.u);
    registers.set_v_flag(false);
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[U=0x{:04x}][CC={}]", registers.u, registers.format_ccr()),
    ))
}

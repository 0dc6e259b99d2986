use super::*;

pub fn neg(
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
        .expect("NEG instruction must have operands, crashing the application");

    let value = memory.read_byte(target_address);
    let byte = (value as i8).wrapping_neg() as u8;
    memory.write_byte(target_address, byte);
    registers.update_flags_neg(value, byte);
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!(
            "[0x{:04X}=0x{:02x}][CC={}]",
            target_address,
            byte,
            registers.format_ccr()
        ),
    ))
}

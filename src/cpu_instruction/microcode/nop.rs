use super::*;

pub fn nop(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;

    registers.pc = ((cpu_instruction.address + 1) & 0xffff) as u16;

    Ok(LogLine::new(cpu_instruction, resolution, String::new()))
}

use super::*;

pub fn rts(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;

    registers.pc = registers.stack_pull_s16(memory);

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[PC=0x{:04x}][S=0x{:04x}]", registers.pc, registers.s),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_rts() {
        let cpu_instruction =
            CPUInstruction::new(0xfc20, 0x39, "RTS", AddressingMode::Inherent, 5, rts);
        let (mut memory, mut registers) = get_stuff(0xfc20, vec![0x39]);
        registers.s = 0x8000;
        registers.stack_push_s16(&mut memory, 0xfc03);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0xfc03, registers.pc);
        assert_eq!(0x8000, registers.s);
    }
}

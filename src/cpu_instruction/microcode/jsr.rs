use super::*;

pub fn jsr(
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
        .expect("JSR instruction must have operands, crashing the application");

    let return_address =
        ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;
    registers.stack_push_s16(memory, return_address);
    registers.pc = (target_address & 0xffff) as u16;

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
    fn test_jsr_pushes_return_address() {
        let cpu_instruction = CPUInstruction::new(
            0xfc00,
            0xbd,
            "JSR",
            AddressingMode::Extended([0xfc, 0x20]),
            7,
            jsr,
        );
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0xbd, 0xfc, 0x20]);
        registers.s = 0x8000;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0xfc20, registers.pc);
        assert_eq!(0x7ffe, registers.s);
        assert_eq!(0xfc03, memory.read_word(0x7ffe));
    }

    #[test]
    fn test_jsr_direct() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x9d, "JSR", AddressingMode::Direct([0x20]), 7, jsr);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x9d, 0x20]);
        registers.dp = 0xfc;
        registers.s = 0x8000;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0xfc20, registers.pc);
        assert_eq!(0xfc02, memory.read_word(0x7ffe));
    }
}

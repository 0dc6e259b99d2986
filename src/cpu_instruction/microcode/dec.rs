use super::*;

pub fn dec(
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
        .expect("DEC instruction must have operands, crashing the application");

    let byte = memory.read_byte(target_address).wrapping_sub(1);
    memory.write_byte(target_address, byte);
    registers.update_flags_dec(byte);
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

pub fn deca(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;

    registers.a = registers.a.wrapping_sub(1);
    registers.update_flags_dec(registers.a);
    registers.pc = ((cpu_instruction.address + 1) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[A=0x{:02x}][CC={}]", registers.a, registers.format_ccr()),
    ))
}

pub fn decb(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;

    registers.b = registers.b.wrapping_sub(1);
    registers.update_flags_dec(registers.b);
    registers.pc = ((cpu_instruction.address + 1) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[B=0x{:02x}][CC={}]", registers.b, registers.format_ccr()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_dec_direct() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x0a, "DEC", AddressingMode::Direct([0x10]), 6, dec);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x0a, 0x10]);
        memory.write_byte(0x0010, 0x43);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x42, memory.read_byte(0x0010));
        assert!(!registers.v_flag_is_set());
        assert_eq!(0xfc02, registers.pc);
    }

    #[test]
    fn test_dec_overflow_at_0x7f() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x0a, "DEC", AddressingMode::Direct([0x10]), 6, dec);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x0a, 0x10]);
        memory.write_byte(0x0010, 0x80);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x7f, memory.read_byte(0x0010));
        assert!(registers.v_flag_is_set());
        assert!(!registers.n_flag_is_set());
    }

    #[test]
    fn test_dec_wraps_to_0xff() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x0a, "DEC", AddressingMode::Direct([0x10]), 6, dec);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x0a, 0x10]);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0xff, memory.read_byte(0x0010));
        assert!(registers.n_flag_is_set());
        assert!(!registers.z_flag_is_set());
        assert!(!registers.v_flag_is_set());
    }

    #[test]
    fn test_deca_to_zero() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x4a, "DECA", AddressingMode::Inherent, 2, deca);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x4a]);
        registers.a = 0x01;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x00, registers.a);
        assert!(registers.z_flag_is_set());
        assert_eq!(0xfc01, registers.pc);
    }

    #[test]
    fn test_decb() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x5a, "DECB", AddressingMode::Inherent, 2, decb);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x5a]);
        registers.b = 0x80;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x7f, registers.b);
        assert!(registers.v_flag_is_set());
    }
}

use super::*;

pub fn inc(
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
        .expect("INC instruction must have operands, crashing the application");

    let byte = memory.read_byte(target_address).wrapping_add(1);
    memory.write_byte(target_address, byte);
    registers.update_flags_inc(byte);
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

pub fn inca(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;

    registers.a = registers.a.wrapping_add(1);
    registers.update_flags_inc(registers.a);
    registers.pc = ((cpu_instruction.address + 1) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[A=0x{:02x}][CC={}]", registers.a, registers.format_ccr()),
    ))
}

pub fn incb(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;

    registers.b = registers.b.wrapping_add(1);
    registers.update_flags_inc(registers.b);
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
    fn test_inc_direct() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x0c, "INC", AddressingMode::Direct([0x10]), 6, inc);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x0c, 0x10]);
        memory.write_byte(0x0010, 0x41);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x42, memory.read_byte(0x0010));
        assert!(!registers.v_flag_is_set());
        assert_eq!(0xfc02, registers.pc);
    }

    #[test]
    fn test_inc_overflow_at_0x80() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x0c, "INC", AddressingMode::Direct([0x10]), 6, inc);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x0c, 0x10]);
        memory.write_byte(0x0010, 0x7f);
        registers.set_c_flag(true);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x80, memory.read_byte(0x0010));
        assert!(registers.v_flag_is_set());
        assert!(registers.n_flag_is_set());
        // carry untouched
        assert!(registers.c_flag_is_set());
    }

    #[test]
    fn test_inc_wraps_to_zero() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x0c, "INC", AddressingMode::Direct([0x10]), 6, inc);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x0c, 0x10]);
        memory.write_byte(0x0010, 0xff);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x00, memory.read_byte(0x0010));
        assert!(registers.z_flag_is_set());
        assert!(!registers.v_flag_is_set());
    }

    #[test]
    fn test_inca() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x4c, "INCA", AddressingMode::Inherent, 2, inca);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x4c]);
        registers.a = 0x10;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x11, registers.a);
        assert_eq!(0xfc01, registers.pc);
    }

    #[test]
    fn test_incb() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x5c, "INCB", AddressingMode::Inherent, 2, incb);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x5c]);
        registers.b = 0x7f;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x80, registers.b);
        assert!(registers.v_flag_is_set());
    }
}

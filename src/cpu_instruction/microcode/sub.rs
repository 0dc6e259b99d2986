use super::*;

pub fn suba(
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
        .expect("SUBA instruction must have operands, crashing the application");

    let byte = memory.read_byte(target_address);
    let diff = (registers.a as u16).wrapping_sub(byte as u16);
    registers.update_flags_sub8(registers.a, byte, diff);
    registers.a = (diff & 0xff) as u8;
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[A=0x{:02x}][CC={}]", registers.a, registers.format_ccr()),
    ))
}

pub fn subb(
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
        .expect("SUBB instruction must have operands, crashing the application");

    let byte = memory.read_byte(target_address);
    let diff = (registers.b as u16).wrapping_sub(byte as u16);
    registers.update_flags_sub8(registers.b, byte, diff);
    registers.b = (diff & 0xff) as u8;
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

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
    fn test_suba() {
        let cpu_instruction = CPUInstruction::new(
            0xfc00,
            0x80,
            "SUBA",
            AddressingMode::Immediate8([0x03]),
            2,
            suba,
        );
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x80, 0x03]);
        registers.a = 0x08;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x05, registers.a);
        assert!(!registers.c_flag_is_set());
        assert!(!registers.z_flag_is_set());
        assert_eq!(0xfc02, registers.pc);
    }

    #[test]
    fn test_suba_borrow() {
        let cpu_instruction = CPUInstruction::new(
            0xfc00,
            0x80,
            "SUBA",
            AddressingMode::Immediate8([0x01]),
            2,
            suba,
        );
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x80, 0x01]);
        registers.a = 0x00;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0xff, registers.a);
        assert!(registers.c_flag_is_set());
        assert!(registers.n_flag_is_set());
        assert!(!registers.v_flag_is_set());
    }

    #[test]
    fn test_suba_zero() {
        let cpu_instruction = CPUInstruction::new(
            0xfc00,
            0x80,
            "SUBA",
            AddressingMode::Immediate8([0x42]),
            2,
            suba,
        );
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x80, 0x42]);
        registers.a = 0x42;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x00, registers.a);
        assert!(registers.z_flag_is_set());
        assert!(!registers.c_flag_is_set());
    }

    #[test]
    fn test_suba_signed_overflow() {
        let cpu_instruction = CPUInstruction::new(
            0xfc00,
            0x80,
            "SUBA",
            AddressingMode::Immediate8([0x01]),
            2,
            suba,
        );
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x80, 0x01]);
        registers.a = 0x80;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x7f, registers.a);
        assert!(registers.v_flag_is_set());
        assert!(!registers.n_flag_is_set());
    }

    #[test]
    fn test_subb_direct() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0xd0, "SUBB", AddressingMode::Direct([0x10]), 4, subb);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0xd0, 0x10]);
        memory.write_byte(0x0010, 0x05);
        registers.b = 0x15;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x10, registers.b);
    }
}

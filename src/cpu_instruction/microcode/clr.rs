use super::*;

pub fn clr(
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
        .expect("CLR instruction must have operands, crashing the application");

    memory.write_byte(target_address, 0x00);
    registers.update_flags_clr();
    registers.pc = ((cpu_instruction.address + 1 + resolution.operands.len()) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[0x{:04X}=0x00][CC={}]", target_address, registers.format_ccr()),
    ))
}

pub fn clra(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;

    registers.a = 0x00;
    registers.update_flags_clr();
    registers.pc = ((cpu_instruction.address + 1) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[A=0x00][CC={}]", registers.format_ccr()),
    ))
}

pub fn clrb(
    memory: &mut Memory,
    registers: &mut Registers,
    cpu_instruction: &CPUInstruction,
) -> Result<LogLine> {
    let resolution =
        cpu_instruction
            .addressing_mode
            .solve(cpu_instruction.address, memory, registers)?;

    registers.b = 0x00;
    registers.update_flags_clr();
    registers.pc = ((cpu_instruction.address + 1) & 0xffff) as u16;

    Ok(LogLine::new(
        cpu_instruction,
        resolution,
        format!("[B=0x00][CC={}]", registers.format_ccr()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_instruction::cpu_instruction::tests::get_stuff;

    #[test]
    fn test_clr_extended() {
        let cpu_instruction = CPUInstruction::new(
            0xfc00,
            0x7f,
            "CLR",
            AddressingMode::Extended([0x40, 0x00]),
            7,
            clr,
        );
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x7f, 0x40, 0x00]);
        memory.write_byte(0x4000, 0xff);
        registers.set_c_flag(true);
        registers.set_n_flag(true);
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x00, memory.read_byte(0x4000));
        assert!(registers.z_flag_is_set());
        assert!(!registers.n_flag_is_set());
        assert!(!registers.v_flag_is_set());
        assert!(!registers.c_flag_is_set());
        assert_eq!(0xfc03, registers.pc);
    }

    #[test]
    fn test_clra() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x4f, "CLRA", AddressingMode::Inherent, 2, clra);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x4f]);
        registers.a = 0x42;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x00, registers.a);
        assert!(registers.z_flag_is_set());
        assert_eq!(0xfc01, registers.pc);
    }

    #[test]
    fn test_clrb() {
        let cpu_instruction =
            CPUInstruction::new(0xfc00, 0x5f, "CLRB", AddressingMode::Inherent, 2, clrb);
        let (mut memory, mut registers) = get_stuff(0xfc00, vec![0x5f]);
        registers.b = 0x42;
        cpu_instruction
            .execute(&mut memory, &mut registers)
            .unwrap();
        assert_eq!(0x00, registers.b);
        assert!(registers.z_flag_is_set());
    }
}

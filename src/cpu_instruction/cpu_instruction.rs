use super::microcode::Result as MicrocodeResult;
use crate::addressing_mode::*;
use crate::memory::Memory;
use crate::registers::Registers;
use std::fmt;

pub type BoxedMicrocode =
    Box<dyn Fn(&mut Memory, &mut Registers, &CPUInstruction) -> MicrocodeResult<LogLine>>;

/*
 * Decoded instruction.
 * Pairs the addressing mode (operands already captured) with the
 * microcode function and the declared cycle cost from the opcode table.
 */
pub struct CPUInstruction {
    pub address: usize,
    pub opcode: u8,
    pub mnemonic: String,
    pub addressing_mode: AddressingMode,
    pub microcode: BoxedMicrocode,
    pub cycles: u8,
}

impl CPUInstruction {
    pub fn new(
        address: usize,
        opcode: u8,
        mnemonic: &str,
        addressing_mode: AddressingMode,
        cycles: u8,
        microcode: impl Fn(&mut Memory, &mut Registers, &CPUInstruction) -> MicrocodeResult<LogLine>
            + 'static,
    ) -> CPUInstruction {
        CPUInstruction {
            address,
            opcode,
            mnemonic: mnemonic.to_owned(),
            addressing_mode,
            microcode: Box::new(microcode),
            cycles,
        }
    }

    pub fn execute(
        &self,
        memory: &mut Memory,
        registers: &mut Registers,
    ) -> MicrocodeResult<LogLine> {
        (self.microcode)(memory, registers, self)
    }

    // PSHS/PULS/PSHU/PULU show their mask as a register list, every
    // other instruction shows its addressing mode.
    pub fn operand_text(&self) -> String {
        match (self.mnemonic.as_str(), self.addressing_mode) {
            ("PSHS", AddressingMode::Immediate8(v))
            | ("PULS", AddressingMode::Immediate8(v)) => format_stack_mask(v[0], false),
            ("PSHU", AddressingMode::Immediate8(v))
            | ("PULU", AddressingMode::Immediate8(v)) => format_stack_mask(v[0], true),
            _ => format!("{}", self.addressing_mode),
        }
    }
}

impl fmt::Display for CPUInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = vec![self.opcode];

        for i in self.addressing_mode.get_operands() {
            bytes.push(i);
        }
        let byte_sequence = format!(
            "({})",
            bytes
                .iter()
                .fold(String::new(), |acc, s| format!("{} {:02x}", acc, s))
                .trim()
        );

        write!(
            f,
            "#0x{:04X}: {: <14}{: <5} {: <15}",
            self.address,
            byte_sequence,
            self.mnemonic,
            self.operand_text()
        )
    }
}

/*
 * Render a PSH/PUL mask byte as the canonical register list, most
 * significant bit first. Bit 6 names the stack pointer not used by the
 * instruction itself, so it reads S for the user stack operations and
 * U for the system stack ones.
 */
pub fn format_stack_mask(mask: u8, user_stack: bool) -> String {
    let names = [
        "PC",
        if user_stack { "S" } else { "U" },
        "Y",
        "X",
        "DP",
        "B",
        "A",
        "CC",
    ];
    let mut registers: Vec<&str> = Vec::new();

    for (i, name) in names.iter().enumerate() {
        if mask & (0x80 >> i) != 0 {
            registers.push(name);
        }
    }

    registers.join(",")
}

#[derive(Debug)]
pub struct LogLine {
    pub address: usize,
    pub opcode: u8,
    pub mnemonic: String,
    pub resolution: AddressingModeResolution,
    pub outcome: String,
    pub cycles: u8,
}

impl LogLine {
    pub fn new(
        cpu_instruction: &CPUInstruction,
        resolution: AddressingModeResolution,
        outcome: String,
    ) -> LogLine {
        LogLine {
            address: cpu_instruction.address,
            opcode: cpu_instruction.opcode,
            mnemonic: cpu_instruction.mnemonic.clone(),
            resolution,
            outcome,
            cycles: cpu_instruction.cycles,
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = vec![self.opcode];
        for i in self.resolution.operands.clone() {
            bytes.push(i);
        }
        let byte_sequence = format!(
            "({})",
            bytes
                .iter()
                .fold(String::new(), |acc, s| format!("{} {:02x}", acc, s))
                .trim()
        );

        write!(
            f,
            "#0x{:04X}: {: <14}{: <5} {: <15}  {}[{}]",
            self.address, byte_sequence, self.mnemonic, self.resolution, self.outcome, self.cycles
        )
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub fn get_stuff(addr: usize, program: Vec<u8>) -> (Memory, Registers) {
        let mut memory = Memory::new();
        memory.load(&program, addr).unwrap();
        let registers = Registers::new(addr as u16);

        (memory, registers)
    }

    #[test]
    fn test_display() {
        let instruction = CPUInstruction::new(
            0xfc00,
            0x86,
            "LDA",
            AddressingMode::Immediate8([0x05]),
            2,
            crate::cpu_instruction::microcode::lda,
        );
        assert_eq!(
            "#0xFC00: (86 05)       LDA   #$05           ",
            format!("{}", instruction)
        );
    }

    #[test]
    fn test_format_stack_mask() {
        assert_eq!("PC,U,Y,X,DP,B,A,CC", format_stack_mask(0xff, false));
        assert_eq!("PC,S,Y,X,DP,B,A,CC", format_stack_mask(0xff, true));
        assert_eq!("A,CC", format_stack_mask(0x03, false));
        assert_eq!("X", format_stack_mask(0x10, false));
        assert_eq!("", format_stack_mask(0x00, false));
    }
}

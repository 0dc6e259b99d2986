use super::addressing_mode::{AddressingMode, ResolutionError};
use super::cpu_instruction::microcode;
use super::cpu_instruction::{CPUInstruction, LogLine};
use super::memory::Memory;
use super::registers::Registers;
use std::collections::HashSet;
use std::error;
use std::fmt;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Debug)]
pub enum ProcessingError {
    UnimplementedOpcode(u8, usize),
    Microcode(microcode::MicrocodeError),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::UnimplementedOpcode(opcode, address) => write!(
                f,
                "unimplemented opcode 0x{:02X} at address #0x{:04X}",
                opcode, address
            ),
            ProcessingError::Microcode(e) => write!(f, "{}", e),
        }
    }
}

impl error::Error for ProcessingError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

impl std::convert::From<microcode::MicrocodeError> for ProcessingError {
    fn from(err: microcode::MicrocodeError) -> ProcessingError {
        ProcessingError::Microcode(err)
    }
}

impl std::convert::From<ResolutionError> for ProcessingError {
    fn from(err: ResolutionError) -> ProcessingError {
        ProcessingError::Microcode(microcode::MicrocodeError::Resolution(err))
    }
}

/*
 * resolve_opcode
 * Decode the byte at `address` into a CPUInstruction, reading the
 * operand bytes the addressing mode calls for. Registers are not
 * touched; a decode fault leaves the machine exactly as it was.
 */
pub fn resolve_opcode(address: usize, opcode: u8, memory: &Memory) -> Result<CPUInstruction> {
    let im8 = || AddressingMode::Immediate8([memory.read_byte(address + 1)]);
    let im16 = || {
        AddressingMode::Immediate16([
            memory.read_byte(address + 1),
            memory.read_byte(address + 2),
        ])
    };
    let direct = || AddressingMode::Direct([memory.read_byte(address + 1)]);
    let extended = || {
        AddressingMode::Extended([memory.read_byte(address + 1), memory.read_byte(address + 2)])
    };

    let instruction = match opcode {
        0x00 => CPUInstruction::new(address, opcode, "NEG", direct(), 6, microcode::neg),
        0x0a => CPUInstruction::new(address, opcode, "DEC", direct(), 6, microcode::dec),
        0x0c => CPUInstruction::new(address, opcode, "INC", direct(), 6, microcode::inc),
        0x0e => CPUInstruction::new(address, opcode, "JMP", direct(), 3, microcode::jmp),
        0x0f => CPUInstruction::new(address, opcode, "CLR", direct(), 6, microcode::clr),
        0x12 => CPUInstruction::new(address, opcode, "NOP", AddressingMode::Inherent, 2, microcode::nop),
        0x34 => CPUInstruction::new(address, opcode, "PSHS", im8(), 5, microcode::pshs),
        0x35 => CPUInstruction::new(address, opcode, "PULS", im8(), 5, microcode::puls),
        0x36 => CPUInstruction::new(address, opcode, "PSHU", im8(), 5, microcode::pshu),
        0x37 => CPUInstruction::new(address, opcode, "PULU", im8(), 5, microcode::pulu),
        0x39 => CPUInstruction::new(address, opcode, "RTS", AddressingMode::Inherent, 5, microcode::rts),
        0x4a => CPUInstruction::new(address, opcode, "DECA", AddressingMode::Inherent, 2, microcode::deca),
        0x4c => CPUInstruction::new(address, opcode, "INCA", AddressingMode::Inherent, 2, microcode::inca),
        0x4f => CPUInstruction::new(address, opcode, "CLRA", AddressingMode::Inherent, 2, microcode::clra),
        0x5a => CPUInstruction::new(address, opcode, "DECB", AddressingMode::Inherent, 2, microcode::decb),
        0x5c => CPUInstruction::new(address, opcode, "INCB", AddressingMode::Inherent, 2, microcode::incb),
        0x5f => CPUInstruction::new(address, opcode, "CLRB", AddressingMode::Inherent, 2, microcode::clrb),
        0x60 => CPUInstruction::new(address, opcode, "NEG", AddressingMode::new_indexed(address, memory)?, 6, microcode::neg),
        0x6a => CPUInstruction::new(address, opcode, "DEC", AddressingMode::new_indexed(address, memory)?, 6, microcode::dec),
        0x6c => CPUInstruction::new(address, opcode, "INC", AddressingMode::new_indexed(address, memory)?, 6, microcode::inc),
        0x6e => CPUInstruction::new(address, opcode, "JMP", AddressingMode::new_indexed(address, memory)?, 3, microcode::jmp),
        0x6f => CPUInstruction::new(address, opcode, "CLR", AddressingMode::new_indexed(address, memory)?, 6, microcode::clr),
        0x70 => CPUInstruction::new(address, opcode, "NEG", extended(), 7, microcode::neg),
        0x7a => CPUInstruction::new(address, opcode, "DEC", extended(), 7, microcode::dec),
        0x7c => CPUInstruction::new(address, opcode, "INC", extended(), 7, microcode::inc),
        0x7e => CPUInstruction::new(address, opcode, "JMP", extended(), 3, microcode::jmp),
        0x7f => CPUInstruction::new(address, opcode, "CLR", extended(), 7, microcode::clr),
        0x80 => CPUInstruction::new(address, opcode, "SUBA", im8(), 2, microcode::suba),
        0x84 => CPUInstruction::new(address, opcode, "ANDA", im8(), 2, microcode::anda),
        0x86 => CPUInstruction::new(address, opcode, "LDA", im8(), 2, microcode::lda),
        0x88 => CPUInstruction::new(address, opcode, "EORA", im8(), 2, microcode::eora),
        0x8a => CPUInstruction::new(address, opcode, "ORA", im8(), 2, microcode::ora),
        0x8b => CPUInstruction::new(address, opcode, "ADDA", im8(), 2, microcode::adda),
        0x8e => CPUInstruction::new(address, opcode, "LDX", im16(), 3, microcode::ldx),
        0x90 => CPUInstruction::new(address, opcode, "SUBA", direct(), 4, microcode::suba),
        0x94 => CPUInstruction::new(address, opcode, "ANDA", direct(), 4, microcode::anda),
        0x96 => CPUInstruction::new(address, opcode, "LDA", direct(), 4, microcode::lda),
        0x97 => CPUInstruction::new(address, opcode, "STA", direct(), 4, microcode::sta),
        0x98 => CPUInstruction::new(address, opcode, "EORA", direct(), 4, microcode::eora),
        0x9a => CPUInstruction::new(address, opcode, "ORA", direct(), 4, microcode::ora),
        0x9b => CPUInstruction::new(address, opcode, "ADDA", direct(), 4, microcode::adda),
        0x9d => CPUInstruction::new(address, opcode, "JSR", direct(), 7, microcode::jsr),
        0x9e => CPUInstruction::new(address, opcode, "LDX", direct(), 4, microcode::ldx),
        0x9f => CPUInstruction::new(address, opcode, "STX", direct(), 4, microcode::stx),
        0xa0 => CPUInstruction::new(address, opcode, "SUBA", AddressingMode::new_indexed(address, memory)?, 4, microcode::suba),
        0xa4 => CPUInstruction::new(address, opcode, "ANDA", AddressingMode::new_indexed(address, memory)?, 4, microcode::anda),
        0xa6 => CPUInstruction::new(address, opcode, "LDA", AddressingMode::new_indexed(address, memory)?, 4, microcode::lda),
        0xa7 => CPUInstruction::new(address, opcode, "STA", AddressingMode::new_indexed(address, memory)?, 4, microcode::sta),
        0xa8 => CPUInstruction::new(address, opcode, "EORA", AddressingMode::new_indexed(address, memory)?, 4, microcode::eora),
        0xaa => CPUInstruction::new(address, opcode, "ORA", AddressingMode::new_indexed(address, memory)?, 4, microcode::ora),
        0xab => CPUInstruction::new(address, opcode, "ADDA", AddressingMode::new_indexed(address, memory)?, 4, microcode::adda),
        0xad => CPUInstruction::new(address, opcode, "JSR", AddressingMode::new_indexed(address, memory)?, 7, microcode::jsr),
        0xae => CPUInstruction::new(address, opcode, "LDX", AddressingMode::new_indexed(address, memory)?, 4, microcode::ldx),
        0xaf => CPUInstruction::new(address, opcode, "STX", AddressingMode::new_indexed(address, memory)?, 4, microcode::stx),
        0xb0 => CPUInstruction::new(address, opcode, "SUBA", extended(), 5, microcode::suba),
        0xb4 => CPUInstruction::new(address, opcode, "ANDA", extended(), 5, microcode::anda),
        0xb6 => CPUInstruction::new(address, opcode, "LDA", extended(), 5, microcode::lda),
        0xb7 => CPUInstruction::new(address, opcode, "STA", extended(), 5, microcode::sta),
        0xb8 => CPUInstruction::new(address, opcode, "EORA", extended(), 5, microcode::eora),
        0xba => CPUInstruction::new(address, opcode, "ORA", extended(), 5, microcode::ora),
        0xbb => CPUInstruction::new(address, opcode, "ADDA", extended(), 5, microcode::adda),
        0xbd => CPUInstruction::new(address, opcode, "JSR", extended(), 7, microcode::jsr),
        0xbe => CPUInstruction::new(address, opcode, "LDX", extended(), 5, microcode::ldx),
        0xbf => CPUInstruction::new(address, opcode, "STX", extended(), 5, microcode::stx),
        0xc0 => CPUInstruction::new(address, opcode, "SUBB", im8(), 2, microcode::subb),
        0xc4 => CPUInstruction::new(address, opcode, "ANDB", im8(), 2, microcode::andb),
        0xc6 => CPUInstruction::new(address, opcode, "LDB", im8(), 2, microcode::ldb),
        0xc8 => CPUInstruction::new(address, opcode, "EORB", im8(), 2, microcode::eorb),
        0xca => CPUInstruction::new(address, opcode, "ORB", im8(), 2, microcode::orb),
        0xcb => CPUInstruction::new(address, opcode, "ADDB", im8(), 2, microcode::addb),
        0xce => CPUInstruction::new(address, opcode, "LDU", im16(), 3, microcode::ldu),
        0xd0 => CPUInstruction::new(address, opcode, "SUBB", direct(), 4, microcode::subb),
        0xd4 => CPUInstruction::new(address, opcode, "ANDB", direct(), 4, microcode::andb),
        0xd6 => CPUInstruction::new(address, opcode, "LDB", direct(), 4, microcode::ldb),
        0xd7 => CPUInstruction::new(address, opcode, "STB", direct(), 4, microcode::stb),
        0xd8 => CPUInstruction::new(address, opcode, "EORB", direct(), 4, microcode::eorb),
        0xda => CPUInstruction::new(address, opcode, "ORB", direct(), 4, microcode::orb),
        0xdb => CPUInstruction::new(address, opcode, "ADDB", direct(), 4, microcode::addb),
        0xde => CPUInstruction::new(address, opcode, "LDU", direct(), 4, microcode::ldu),
        0xdf => CPUInstruction::new(address, opcode, "STU", direct(), 4, microcode::stu),
        0xe0 => CPUInstruction::new(address, opcode, "SUBB", AddressingMode::new_indexed(address, memory)?, 4, microcode::subb),
        0xe4 => CPUInstruction::new(address, opcode, "ANDB", AddressingMode::new_indexed(address, memory)?, 4, microcode::andb),
        0xe6 => CPUInstruction::new(address, opcode, "LDB", AddressingMode::new_indexed(address, memory)?, 4, microcode::ldb),
        0xe7 => CPUInstruction::new(address, opcode, "STB", AddressingMode::new_indexed(address, memory)?, 4, microcode::stb),
        0xe8 => CPUInstruction::new(address, opcode, "EORB", AddressingMode::new_indexed(address, memory)?, 4, microcode::eorb),
        0xea => CPUInstruction::new(address, opcode, "ORB", AddressingMode::new_indexed(address, memory)?, 4, microcode::orb),
        0xeb => CPUInstruction::new(address, opcode, "ADDB", AddressingMode::new_indexed(address, memory)?, 4, microcode::addb),
        0xee => CPUInstruction::new(address, opcode, "LDU", AddressingMode::new_indexed(address, memory)?, 4, microcode::ldu),
        0xef => CPUInstruction::new(address, opcode, "STU", AddressingMode::new_indexed(address, memory)?, 4, microcode::stu),
        0xf0 => CPUInstruction::new(address, opcode, "SUBB", extended(), 5, microcode::subb),
        0xf4 => CPUInstruction::new(address, opcode, "ANDB", extended(), 5, microcode::andb),
        0xf6 => CPUInstruction::new(address, opcode, "LDB", extended(), 5, microcode::ldb),
        0xf7 => CPUInstruction::new(address, opcode, "STB", extended(), 5, microcode::stb),
        0xf8 => CPUInstruction::new(address, opcode, "EORB", extended(), 5, microcode::eorb),
        0xfa => CPUInstruction::new(address, opcode, "ORB", extended(), 5, microcode::orb),
        0xfb => CPUInstruction::new(address, opcode, "ADDB", extended(), 5, microcode::addb),
        0xfe => CPUInstruction::new(address, opcode, "LDU", extended(), 5, microcode::ldu),
        0xff => CPUInstruction::new(address, opcode, "STU", extended(), 5, microcode::stu),
        _ => return Err(ProcessingError::UnimplementedOpcode(opcode, address)),
    };

    Ok(instruction)
}

/*
 * execute_step
 * Fetch the opcode at PC, decode, execute and account for the declared
 * cycle cost. On a fault the error propagates and nothing else moves.
 */
pub fn execute_step(registers: &mut Registers, memory: &mut Memory) -> Result<LogLine> {
    let address = registers.pc as usize;
    let opcode = memory.read_byte(address);
    let cpu_instruction = resolve_opcode(address, opcode, memory)?;
    let cycles = cpu_instruction.cycles;
    let log_line = cpu_instruction.execute(memory, registers)?;
    registers.cycles += cycles as u64;

    Ok(log_line)
}

/*
 * execute_step_with_breakpoints
 * The breakpoint test happens before the fetch so a hit leaves the
 * instruction at PC unexecuted. Ok(None) reports the hit.
 */
pub fn execute_step_with_breakpoints(
    registers: &mut Registers,
    memory: &mut Memory,
    breakpoints: &HashSet<u16>,
) -> Result<Option<LogLine>> {
    if breakpoints.contains(&registers.pc) {
        return Ok(None);
    }

    execute_step(registers, memory).map(Some)
}

use super::memory::Memory;
use super::{RESET_VECTOR_ADDR, ROM_START_ADDR};
use std::error;
use std::fmt;

pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Size of the region the assembler may fill, `0xFC00..=0xFFFF`.
pub const ROM_SIZE: usize = 0x10000 - ROM_START_ADDR;

#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyError {
    UnknownMnemonic(usize, String),
    UnsupportedOperand(usize, String),
    MissingOperand(usize, String),
    BadLiteral(usize, String),
    UnknownStackRegister(usize, String),
    ProgramTooLarge(usize),
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssemblyError::UnknownMnemonic(line_no, line) => {
                write!(f, "line {}: unknown mnemonic in '{}'", line_no, line)
            }
            AssemblyError::UnsupportedOperand(line_no, line) => write!(
                f,
                "line {}: unsupported addressing mode for this mnemonic in '{}'",
                line_no, line
            ),
            AssemblyError::MissingOperand(line_no, line) => {
                write!(f, "line {}: missing operand in '{}'", line_no, line)
            }
            AssemblyError::BadLiteral(line_no, line) => {
                write!(f, "line {}: malformed literal in '{}'", line_no, line)
            }
            AssemblyError::UnknownStackRegister(line_no, line) => {
                write!(f, "line {}: unknown stack register in '{}'", line_no, line)
            }
            AssemblyError::ProgramTooLarge(bytes) => write!(
                f,
                "program does not fit in the {} byte region ({} bytes assembled)",
                ROM_SIZE, bytes
            ),
        }
    }
}

impl error::Error for AssemblyError {}

enum Operand {
    Immediate(i32),
    Indexed { offset: Option<i32>, y: bool },
    Address(i32),
}

/*
 * assemble_and_load
 * Translate the source into machine code starting at 0xFC00, then
 * point the reset vector there. The region is zeroed first and nothing
 * is committed to memory until the whole source assembled cleanly.
 */
pub fn assemble_and_load(source: &str, memory: &mut Memory) -> Result<()> {
    let mut program: Vec<u8> = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        assemble_line(line, line_no, &mut program)?;
    }

    if program.len() > ROM_SIZE {
        return Err(AssemblyError::ProgramTooLarge(program.len()));
    }

    let mut rom = vec![0x00; ROM_SIZE];
    rom[..program.len()].copy_from_slice(&program);
    rom[RESET_VECTOR_ADDR - ROM_START_ADDR] = (ROM_START_ADDR >> 8) as u8;
    rom[RESET_VECTOR_ADDR - ROM_START_ADDR + 1] = (ROM_START_ADDR & 0xff) as u8;
    memory
        .load(&rom, ROM_START_ADDR)
        .expect("the ROM region is a constant in-bounds slice of the address space");

    Ok(())
}

fn assemble_line(line: &str, line_no: usize, program: &mut Vec<u8>) -> Result<()> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let mnemonic = parts
        .next()
        .expect("splitn on a non empty line yields at least one part")
        .to_uppercase();
    let operand = parts.next().map(str::trim).unwrap_or("");

    // Inherent forms take no operand, anything trailing is ignored.
    if let Some(opcode) = inherent_opcode(&mnemonic) {
        program.push(opcode);
        return Ok(());
    }

    if matches!(mnemonic.as_str(), "PSHS" | "PULS" | "PSHU" | "PULU") {
        if operand.is_empty() {
            return Err(AssemblyError::MissingOperand(line_no, line.to_owned()));
        }
        let opcode = match mnemonic.as_str() {
            "PSHS" => 0x34,
            "PULS" => 0x35,
            "PSHU" => 0x36,
            _ => 0x37,
        };
        program.push(opcode);
        program.push(parse_stack_mask(operand, line_no, line)?);
        return Ok(());
    }

    if operand.is_empty() {
        return Err(AssemblyError::MissingOperand(line_no, line.to_owned()));
    }

    match parse_operand(operand, line_no, line)? {
        Operand::Immediate(value) => {
            let opcode = opcode_for(&mnemonic, Mode::Immediate)
                .ok_or_else(|| unsupported(&mnemonic, line_no, line))?;
            program.push(opcode);
            if wide_immediate(&mnemonic) {
                if value < 0 || value > 0xffff {
                    return Err(AssemblyError::BadLiteral(line_no, line.to_owned()));
                }
                program.push((value >> 8) as u8);
                program.push((value & 0xff) as u8);
            } else {
                if value < 0 || value > 0xff {
                    return Err(AssemblyError::BadLiteral(line_no, line.to_owned()));
                }
                program.push(value as u8);
            }
        }
        Operand::Indexed { offset, y } => {
            let opcode = opcode_for(&mnemonic, Mode::Indexed)
                .ok_or_else(|| unsupported(&mnemonic, line_no, line))?;
            program.push(opcode);
            let y_bit = if y { 0x20 } else { 0x00 };
            match offset {
                None => program.push(y_bit),
                Some(value) if (-128..=127).contains(&value) => {
                    program.push(0x08 | y_bit);
                    program.push(value as u8);
                }
                Some(value) if (-32768..=32767).contains(&value) => {
                    program.push(0x09 | y_bit);
                    program.push(((value as u16) >> 8) as u8);
                    program.push((value as u16 & 0xff) as u8);
                }
                Some(_) => return Err(AssemblyError::BadLiteral(line_no, line.to_owned())),
            }
        }
        Operand::Address(value) => {
            if value < 0 || value > 0xffff {
                return Err(AssemblyError::BadLiteral(line_no, line.to_owned()));
            }
            if value > 0xff {
                let opcode = opcode_for(&mnemonic, Mode::Extended)
                    .ok_or_else(|| unsupported(&mnemonic, line_no, line))?;
                program.push(opcode);
                program.push((value >> 8) as u8);
                program.push((value & 0xff) as u8);
            } else {
                let opcode = opcode_for(&mnemonic, Mode::Direct)
                    .ok_or_else(|| unsupported(&mnemonic, line_no, line))?;
                program.push(opcode);
                program.push(value as u8);
            }
        }
    }

    Ok(())
}

fn unsupported(mnemonic: &str, line_no: usize, line: &str) -> AssemblyError {
    if opcode_for(mnemonic, Mode::Immediate).is_none()
        && opcode_for(mnemonic, Mode::Direct).is_none()
        && opcode_for(mnemonic, Mode::Indexed).is_none()
        && opcode_for(mnemonic, Mode::Extended).is_none()
    {
        AssemblyError::UnknownMnemonic(line_no, line.to_owned())
    } else {
        AssemblyError::UnsupportedOperand(line_no, line.to_owned())
    }
}

fn parse_operand(operand: &str, line_no: usize, line: &str) -> Result<Operand> {
    if let Some(literal) = operand.strip_prefix('#') {
        return Ok(Operand::Immediate(parse_number(literal, line_no, line)?));
    }

    if let Some(comma) = operand.rfind(',') {
        let register = operand[comma + 1..].trim();
        if matches!(register, "X" | "x" | "Y" | "y") {
            let offset_text = operand[..comma].trim();
            let offset = if offset_text.is_empty() {
                None
            } else {
                Some(parse_number(offset_text, line_no, line)?)
            };
            return Ok(Operand::Indexed {
                offset,
                y: register.eq_ignore_ascii_case("y"),
            });
        }
    }

    Ok(Operand::Address(parse_number(operand, line_no, line)?))
}

// Numeric literals: `$` or `0x` prefixed hexadecimal, decimal
// otherwise. A leading minus sign is only meaningful in decimal.
fn parse_number(text: &str, line_no: usize, line: &str) -> Result<i32> {
    let bad = || AssemblyError::BadLiteral(line_no, line.to_owned());

    if let Some(hex) = text.strip_prefix('$') {
        i32::from_str_radix(hex, 16).map_err(|_| bad())
    } else if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        i32::from_str_radix(hex, 16).map_err(|_| bad())
    } else {
        text.parse::<i32>().map_err(|_| bad())
    }
}

// Mask bits, most significant first: PC, U or S, Y, X, DP, B, A, CC.
fn parse_stack_mask(operand: &str, line_no: usize, line: &str) -> Result<u8> {
    let mut mask: u8 = 0;

    for name in operand.split(',') {
        mask |= match name.trim().to_uppercase().as_str() {
            "PC" => 0x80,
            "U" | "S" => 0x40,
            "Y" => 0x20,
            "X" => 0x10,
            "DP" => 0x08,
            "B" => 0x04,
            "A" => 0x02,
            "CC" => 0x01,
            _ => return Err(AssemblyError::UnknownStackRegister(line_no, line.to_owned())),
        };
    }

    Ok(mask)
}

fn inherent_opcode(mnemonic: &str) -> Option<u8> {
    match mnemonic {
        "NOP" => Some(0x12),
        "RTS" => Some(0x39),
        "DECA" => Some(0x4a),
        "INCA" => Some(0x4c),
        "CLRA" => Some(0x4f),
        "DECB" => Some(0x5a),
        "INCB" => Some(0x5c),
        "CLRB" => Some(0x5f),
        _ => None,
    }
}

fn wide_immediate(mnemonic: &str) -> bool {
    matches!(mnemonic, "LDX" | "LDU")
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Immediate,
    Direct,
    Indexed,
    Extended,
}

fn opcode_for(mnemonic: &str, mode: Mode) -> Option<u8> {
    let opcode = match (mnemonic, mode) {
        ("LDA", Mode::Immediate) => 0x86,
        ("LDA", Mode::Direct) => 0x96,
        ("LDA", Mode::Indexed) => 0xa6,
        ("LDA", Mode::Extended) => 0xb6,
        ("LDB", Mode::Immediate) => 0xc6,
        ("LDB", Mode::Direct) => 0xd6,
        ("LDB", Mode::Indexed) => 0xe6,
        ("LDB", Mode::Extended) => 0xf6,
        ("LDX", Mode::Immediate) => 0x8e,
        ("LDX", Mode::Direct) => 0x9e,
        ("LDX", Mode::Indexed) => 0xae,
        ("LDX", Mode::Extended) => 0xbe,
        ("LDU", Mode::Immediate) => 0xce,
        ("LDU", Mode::Direct) => 0xde,
        ("LDU", Mode::Indexed) => 0xee,
        ("LDU", Mode::Extended) => 0xfe,
        ("STA", Mode::Direct) => 0x97,
        ("STA", Mode::Indexed) => 0xa7,
        ("STA", Mode::Extended) => 0xb7,
        ("STB", Mode::Direct) => 0xd7,
        ("STB", Mode::Indexed) => 0xe7,
        ("STB", Mode::Extended) => 0xf7,
        ("STX", Mode::Direct) => 0x9f,
        ("STX", Mode::Indexed) => 0xaf,
        ("STX", Mode::Extended) => 0xbf,
        ("STU", Mode::Direct) => 0xdf,
        ("STU", Mode::Indexed) => 0xef,
        ("STU", Mode::Extended) => 0xff,
        ("ADDA", Mode::Immediate) => 0x8b,
        ("ADDA", Mode::Direct) => 0x9b,
        ("ADDA", Mode::Indexed) => 0xab,
        ("ADDA", Mode::Extended) => 0xbb,
        ("ADDB", Mode::Immediate) => 0xcb,
        ("ADDB", Mode::Direct) => 0xdb,
        ("ADDB", Mode::Indexed) => 0xeb,
        ("ADDB", Mode::Extended) => 0xfb,
        ("SUBA", Mode::Immediate) => 0x80,
        ("SUBA", Mode::Direct) => 0x90,
        ("SUBA", Mode::Indexed) => 0xa0,
        ("SUBA", Mode::Extended) => 0xb0,
        ("SUBB", Mode::Immediate) => 0xc0,
        ("SUBB", Mode::Direct) => 0xd0,
        ("SUBB", Mode::Indexed) => 0xe0,
        ("SUBB", Mode::Extended) => 0xf0,
        ("ANDA", Mode::Immediate) => 0x84,
        ("ANDA", Mode::Direct) => 0x94,
        ("ANDA", Mode::Indexed) => 0xa4,
        ("ANDA", Mode::Extended) => 0xb4,
        ("ANDB", Mode::Immediate) => 0xc4,
        ("ANDB", Mode::Direct) => 0xd4,
        ("ANDB", Mode::Indexed) => 0xe4,
        ("ANDB", Mode::Extended) => 0xf4,
        ("ORA", Mode::Immediate) => 0x8a,
        ("ORA", Mode::Direct) => 0x9a,
        ("ORA", Mode::Indexed) => 0xaa,
        ("ORA", Mode::Extended) => 0xba,
        ("ORB", Mode::Immediate) => 0xca,
        ("ORB", Mode::Direct) => 0xda,
        ("ORB", Mode::Indexed) => 0xea,
        ("ORB", Mode::Extended) => 0xfa,
        ("EORA", Mode::Immediate) => 0x88,
        ("EORA", Mode::Direct) => 0x98,
        ("EORA", Mode::Indexed) => 0xa8,
        ("EORA", Mode::Extended) => 0xb8,
        ("EORB", Mode::Immediate) => 0xc8,
        ("EORB", Mode::Direct) => 0xd8,
        ("EORB", Mode::Indexed) => 0xe8,
        ("EORB", Mode::Extended) => 0xf8,
        ("INC", Mode::Direct) => 0x0c,
        ("INC", Mode::Indexed) => 0x6c,
        ("INC", Mode::Extended) => 0x7c,
        ("DEC", Mode::Direct) => 0x0a,
        ("DEC", Mode::Indexed) => 0x6a,
        ("DEC", Mode::Extended) => 0x7a,
        ("CLR", Mode::Direct) => 0x0f,
        ("CLR", Mode::Indexed) => 0x6f,
        ("CLR", Mode::Extended) => 0x7f,
        ("NEG", Mode::Direct) => 0x00,
        ("NEG", Mode::Indexed) => 0x60,
        ("NEG", Mode::Extended) => 0x70,
        ("JMP", Mode::Direct) => 0x0e,
        ("JMP", Mode::Indexed) => 0x6e,
        ("JMP", Mode::Extended) => 0x7e,
        ("JSR", Mode::Direct) => 0x9d,
        ("JSR", Mode::Indexed) => 0xad,
        ("JSR", Mode::Extended) => 0xbd,
        _ => return None,
    };

    Some(opcode)
}

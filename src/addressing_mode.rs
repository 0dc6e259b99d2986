use super::memory::Memory;
use super::registers::Registers;
use std::error;
use std::fmt;

pub type Result<T> = std::result::Result<T, ResolutionError>;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum ResolutionError {
    UnimplementedSubMode(u8, usize),
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ResolutionError::UnimplementedSubMode(postbyte, opcode_address) => write!(
                f,
                "unimplemented indexed sub-mode, postbyte 0x{:02X} for opcode at address #0x{:04X}",
                postbyte, opcode_address
            ),
        }
    }
}

impl error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

#[derive(Debug)]
pub struct AddressingModeResolution {
    pub operands: Vec<u8>,
    pub addressing_mode: AddressingMode,
    pub target_address: Option<usize>,
}

impl AddressingModeResolution {
    fn new(
        operands: Vec<u8>,
        addressing_mode: AddressingMode,
        target_address: Option<usize>,
    ) -> Self {
        AddressingModeResolution {
            operands,
            addressing_mode,
            target_address,
        }
    }
}

impl fmt::Display for AddressingModeResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target_address {
            Some(addr) => write!(
                f,
                "{: <9}(#0x{:04X})",
                format!("{}", self.addressing_mode),
                addr
            ),
            None => write!(f, "{: <9}         ", format!("{}", self.addressing_mode)),
        }
    }
}

/*
 * 6809 addressing modes.
 * Operand bytes are captured at decode time so the same value drives
 * both execution and disassembly. Indexed operands start with a
 * postbyte: bit 5 selects Y over X, the low 5 bits select the sub-mode
 * (0x00 bare register, 0x08 signed 8 bit offset, 0x09 signed 16 bit
 * offset). Any other sub-mode is refused at decode.
 */
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum AddressingMode {
    Inherent,
    Immediate8([u8; 1]),
    Immediate16([u8; 2]),
    Direct([u8; 1]),
    Extended([u8; 2]),
    Indexed(u8),
    IndexedOffset8(u8, [u8; 1]),
    IndexedOffset16(u8, [u8; 2]),
}

const INDEXED_SUBMODE_MASK: u8 = 0x1f;
const INDEXED_Y_BIT: u8 = 0x20;

impl AddressingMode {
    /*
     * new_indexed
     * Read the postbyte following the opcode, refuse unknown sub-modes
     * and capture the offset bytes the sub-mode calls for.
     */
    pub fn new_indexed(opcode_address: usize, memory: &Memory) -> Result<AddressingMode> {
        let postbyte = memory.read_byte(opcode_address + 1);

        match postbyte & INDEXED_SUBMODE_MASK {
            0x00 => Ok(AddressingMode::Indexed(postbyte)),
            0x08 => Ok(AddressingMode::IndexedOffset8(
                postbyte,
                [memory.read_byte(opcode_address + 2)],
            )),
            0x09 => Ok(AddressingMode::IndexedOffset16(
                postbyte,
                [
                    memory.read_byte(opcode_address + 2),
                    memory.read_byte(opcode_address + 3),
                ],
            )),
            _ => Err(ResolutionError::UnimplementedSubMode(
                postbyte,
                opcode_address,
            )),
        }
    }

    /*
     * solve
     * Create an AddressingModeResolution using the memory and/or
     * registers for each AddressingMode. All address arithmetic is
     * modulo 65536.
     */
    pub fn solve(
        &self,
        opcode_address: usize,
        _memory: &Memory,
        registers: &Registers,
    ) -> Result<AddressingModeResolution> {
        match *self {
            AddressingMode::Inherent => Ok(AddressingModeResolution::new(vec![], *self, None)),
            AddressingMode::Immediate8(v) => Ok(AddressingModeResolution::new(
                vec![v[0]],
                *self,
                Some((opcode_address + 1) & 0xffff),
            )),
            AddressingMode::Immediate16(v) => Ok(AddressingModeResolution::new(
                vec![v[0], v[1]],
                *self,
                Some((opcode_address + 1) & 0xffff),
            )),
            AddressingMode::Direct(v) => Ok(AddressingModeResolution::new(
                vec![v[0]],
                *self,
                Some((registers.dp as usize) << 8 | v[0] as usize),
            )),
            AddressingMode::Extended(v) => Ok(AddressingModeResolution::new(
                vec![v[0], v[1]],
                *self,
                Some((v[0] as usize) << 8 | v[1] as usize),
            )),
            AddressingMode::Indexed(postbyte) => {
                let base = self.index_register(postbyte, registers);
                Ok(AddressingModeResolution::new(
                    vec![postbyte],
                    *self,
                    Some(base as usize),
                ))
            }
            AddressingMode::IndexedOffset8(postbyte, v) => {
                let base = self.index_register(postbyte, registers);
                let offset = i8::from_le_bytes(v) as i16;
                Ok(AddressingModeResolution::new(
                    vec![postbyte, v[0]],
                    *self,
                    Some(base.wrapping_add(offset as u16) as usize),
                ))
            }
            AddressingMode::IndexedOffset16(postbyte, v) => {
                let base = self.index_register(postbyte, registers);
                let offset = (v[0] as u16) << 8 | v[1] as u16;
                Ok(AddressingModeResolution::new(
                    vec![postbyte, v[0], v[1]],
                    *self,
                    Some(base.wrapping_add(offset) as usize),
                ))
            }
        }
    }

    fn index_register(&self, postbyte: u8, registers: &Registers) -> u16 {
        if postbyte & INDEXED_Y_BIT != 0 {
            registers.y
        } else {
            registers.x
        }
    }

    pub fn get_operands(&self) -> Vec<u8> {
        match *self {
            AddressingMode::Inherent => vec![],
            AddressingMode::Immediate8(v) => v.to_vec(),
            AddressingMode::Immediate16(v) => v.to_vec(),
            AddressingMode::Direct(v) => v.to_vec(),
            AddressingMode::Extended(v) => v.to_vec(),
            AddressingMode::Indexed(postbyte) => vec![postbyte],
            AddressingMode::IndexedOffset8(postbyte, v) => vec![postbyte, v[0]],
            AddressingMode::IndexedOffset16(postbyte, v) => vec![postbyte, v[0], v[1]],
        }
    }

    fn index_register_name(postbyte: u8) -> char {
        if postbyte & INDEXED_Y_BIT != 0 {
            'Y'
        } else {
            'X'
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AddressingMode::Inherent => write!(f, ""),
            AddressingMode::Immediate8(v) => write!(f, "#${:02x}", v[0]),
            AddressingMode::Immediate16(v) => write!(f, "#${:02x}{:02x}", v[0], v[1]),
            AddressingMode::Direct(v) => write!(f, "${:02x}", v[0]),
            AddressingMode::Extended(v) => write!(f, "${:02x}{:02x}", v[0], v[1]),
            AddressingMode::Indexed(postbyte) => {
                write!(f, ",{}", AddressingMode::index_register_name(postbyte))
            }
            AddressingMode::IndexedOffset8(postbyte, v) => write!(
                f,
                "{},{}",
                i8::from_le_bytes(v),
                AddressingMode::index_register_name(postbyte)
            ),
            AddressingMode::IndexedOffset16(postbyte, v) => write!(
                f,
                "{},{}",
                ((v[0] as u16) << 8 | v[1] as u16) as i16,
                AddressingMode::index_register_name(postbyte)
            ),
        }
    }
}

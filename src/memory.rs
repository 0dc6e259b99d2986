use std::cell::RefCell;
use std::error;
use std::fmt;

pub const MEMMAX: usize = 65535;

/// Writing here sends the byte to the console output hook.
pub const CONSOLE_OUT_ADDR: usize = 0xFF00;
/// Reading here polls the console input hook.
pub const CONSOLE_IN_ADDR: usize = 0xFF01;

#[derive(Debug, Clone, PartialEq)]
pub enum MemoryError {
    LoadOverflow(usize, usize),
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryError::LoadOverflow(addr, len) => write!(
                f,
                "Loading {} bytes at address 0x{:04X} would overflow the address space.",
                len, addr
            ),
        }
    }
}

impl error::Error for MemoryError {}

/*
 * 64 KiB flat address space.
 * Every address is taken modulo 65536, a byte access can never fault.
 * Two console ports are folded into the byte accessors: a write to
 * CONSOLE_OUT_ADDR goes to the output hook instead of storage, a read
 * from CONSOLE_IN_ADDR polls the input hook. When a hook is not set the
 * port behaves as plain memory.
 */
pub struct Memory {
    ram: Vec<u8>,
    console_out: Option<Box<dyn FnMut(u8) + Send>>,
    console_in: RefCell<Option<Box<dyn FnMut() -> u8 + Send>>>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            ram: vec![0x00; MEMMAX + 1],
            console_out: None,
            console_in: RefCell::new(None),
        }
    }

    pub fn set_console_out(&mut self, hook: Box<dyn FnMut(u8) + Send>) {
        self.console_out = Some(hook);
    }

    pub fn set_console_in(&mut self, hook: Box<dyn FnMut() -> u8 + Send>) {
        *self.console_in.borrow_mut() = Some(hook);
    }

    pub fn read_byte(&self, addr: usize) -> u8 {
        let addr = addr & MEMMAX;

        if addr == CONSOLE_IN_ADDR {
            if let Some(hook) = self.console_in.borrow_mut().as_mut() {
                return hook();
            }
        }

        self.ram[addr]
    }

    pub fn write_byte(&mut self, addr: usize, value: u8) {
        let addr = addr & MEMMAX;

        if addr == CONSOLE_OUT_ADDR {
            if let Some(hook) = self.console_out.as_mut() {
                hook(value);
                return;
            }
        }

        self.ram[addr] = value;
    }

    // Big endian. Composed of byte accesses so a word at 0xFFFF wraps
    // to 0x0000.
    pub fn read_word(&self, addr: usize) -> u16 {
        (self.read_byte(addr) as u16) << 8 | self.read_byte(addr + 1) as u16
    }

    pub fn write_word(&mut self, addr: usize, value: u16) {
        self.write_byte(addr, (value >> 8) as u8);
        self.write_byte(addr + 1, (value & 0xff) as u8);
    }

    // Bounds are checked before anything is written.
    pub fn load(&mut self, bytes: &[u8], start: usize) -> Result<(), MemoryError> {
        if start + bytes.len() > MEMMAX + 1 {
            return Err(MemoryError::LoadOverflow(start, bytes.len()));
        }
        self.ram[start..start + bytes.len()].copy_from_slice(bytes);

        Ok(())
    }

    pub fn clear(&mut self) {
        for byte in self.ram.iter_mut() {
            *byte = 0x00;
        }
    }

    // Raw slice of storage, bypassing the ports. Dumping must not poll
    // the console input hook.
    pub fn slice(&self, start: usize, len: usize) -> &[u8] {
        let start = start & MEMMAX;
        let end = if start + len > MEMMAX + 1 {
            MEMMAX + 1
        } else {
            start + len
        };

        &self.ram[start..end]
    }

    pub fn dump(&self, start: usize, len: usize) -> String {
        let mut output = String::new();

        for (line_no, line) in self.slice(start, len).chunks(16).enumerate() {
            let address = (start + line_no * 16) & MEMMAX;
            let bytes: Vec<String> = line.iter().map(|b| format!("{:02X}", b)).collect();
            let ascii: String = line
                .iter()
                .map(|b| {
                    if *b >= 0x20 && *b < 0x7f {
                        *b as char
                    } else {
                        '.'
                    }
                })
                .collect();
            output.push_str(&format!(
                "{:04X} : {: <47} | {}\n",
                address,
                bytes.join(" "),
                ascii
            ));
        }

        output
    }
}

impl Default for Memory {
    fn default() -> Memory {
        Memory::new()
    }
}

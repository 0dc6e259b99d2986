mod addressing_mode;
pub mod assembler;
mod cpu_instruction;
pub mod debugger;
pub mod disassembler;
pub mod memory;
mod processing_unit;
mod registers;

pub const VERSION: &str = "0.1.0";

/// Start of the region the assembler targets.
pub const ROM_START_ADDR: usize = 0xFC00;
/// Big endian word read into PC by `reset`.
pub const RESET_VECTOR_ADDR: usize = 0xFFFE;

pub use addressing_mode::{AddressingMode, ResolutionError};
pub use assembler::{assemble_and_load, AssemblyError};
pub use cpu_instruction::{CPUInstruction, LogLine};
pub use debugger::{Debugger, RunOutcome};
pub use disassembler::{disassemble, MemoryParserIterator};
pub use memory::{Memory, MemoryError, CONSOLE_IN_ADDR, CONSOLE_OUT_ADDR};
pub use processing_unit::*;
pub use registers::Registers;

mod error;
pub use error::{MicrocodeError, Result};

mod add;
mod and;
mod clr;
mod dec;
mod eor;
mod inc;
mod jmp;
mod jsr;
mod load;
mod neg;
mod nop;
mod or;
mod rts;
mod stack;
mod store;
mod sub;

pub use add::{adda, addb};
pub use and::{anda, andb};
pub use clr::{clr, clra, clrb};
pub use dec::{dec, deca, decb};
pub use eor::{eora, eorb};
pub use inc::{inc, inca, incb};
pub use jmp::jmp;
pub use jsr::jsr;
pub use load::{lda, ldb, ldu, ldx};
pub use neg::neg;
pub use nop::nop;
pub use or::{ora, orb};
pub use rts::rts;
pub use stack::{pshs, pshu, puls, pulu};
pub use store::{sta, stb, stu, stx};
pub use sub::{suba, subb};

pub use crate::addressing_mode::AddressingMode;
pub use crate::cpu_instruction::{CPUInstruction, LogLine};
pub use crate::memory::Memory;
pub use crate::registers::Registers;

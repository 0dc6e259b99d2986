mod cpu_instruction;
pub mod microcode;

pub use self::cpu_instruction::{format_stack_mask, CPUInstruction, LogLine};

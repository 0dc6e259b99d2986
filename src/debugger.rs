use super::cpu_instruction::LogLine;
use super::memory::Memory;
use super::processing_unit::{execute_step_with_breakpoints, Result};
use super::registers::Registers;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    BreakpointHit(u16),
    Interrupted,
}

/*
 * Breakpoint set plus a cooperative stop flag. The flag is shared so a
 * signal handler can interrupt a run loop from another thread; the
 * loop clears it on the way out.
 */
pub struct Debugger {
    breakpoints: HashSet<u16>,
    stop_flag: Arc<AtomicBool>,
}

impl Debugger {
    pub fn new() -> Debugger {
        Debugger {
            breakpoints: HashSet::new(),
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    pub fn add_breakpoint(&mut self, address: usize) {
        self.breakpoints.insert((address & 0xffff) as u16);
    }

    pub fn remove_breakpoint(&mut self, address: usize) -> bool {
        self.breakpoints.remove(&((address & 0xffff) as u16))
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    pub fn is_breakpoint(&self, address: usize) -> bool {
        self.breakpoints.contains(&((address & 0xffff) as u16))
    }

    pub fn breakpoints(&self) -> Vec<u16> {
        let mut addresses: Vec<u16> = self.breakpoints.iter().copied().collect();
        addresses.sort_unstable();

        addresses
    }

    /// One instruction, or `None` when PC sits on a breakpoint.
    pub fn step(&self, registers: &mut Registers, memory: &mut Memory) -> Result<Option<LogLine>> {
        execute_step_with_breakpoints(registers, memory, &self.breakpoints)
    }

    /*
     * run
     * Execute until a breakpoint or the stop flag. The breakpoint test
     * happens before each fetch so the instruction at the breakpoint
     * is left unexecuted. Faults propagate to the caller untouched.
     */
    pub fn run(
        &self,
        registers: &mut Registers,
        memory: &mut Memory,
        mut on_step: impl FnMut(LogLine),
    ) -> Result<RunOutcome> {
        loop {
            if self.stop_flag.swap(false, Ordering::Relaxed) {
                return Ok(RunOutcome::Interrupted);
            }

            match self.step(registers, memory)? {
                Some(log_line) => on_step(log_line),
                None => return Ok(RunOutcome::BreakpointHit(registers.pc)),
            }
        }
    }
}

impl Default for Debugger {
    fn default() -> Debugger {
        Debugger::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_set_operations() {
        let mut debugger = Debugger::new();
        debugger.add_breakpoint(0xfc08);
        debugger.add_breakpoint(0x2fc04);
        assert!(debugger.is_breakpoint(0xfc08));
        // addresses are masked to 16 bits
        assert!(debugger.is_breakpoint(0xfc04));
        assert_eq!(vec![0xfc04, 0xfc08], debugger.breakpoints());
        assert!(debugger.remove_breakpoint(0xfc04));
        assert!(!debugger.remove_breakpoint(0xfc04));
        debugger.clear_breakpoints();
        assert!(debugger.breakpoints().is_empty());
    }

    #[test]
    fn test_run_halts_on_breakpoint_before_fetch() {
        let mut memory = Memory::new();
        // LDA #$05 / INCA / INCA
        memory.load(&[0x86, 0x05, 0x4c, 0x4c], 0xfc00).unwrap();
        let mut registers = Registers::new(0xfc00);
        let mut debugger = Debugger::new();
        debugger.add_breakpoint(0xfc03);

        let mut steps = 0;
        let outcome = debugger
            .run(&mut registers, &mut memory, |_| steps += 1)
            .unwrap();
        assert_eq!(RunOutcome::BreakpointHit(0xfc03), outcome);
        assert_eq!(2, steps);
        assert_eq!(0xfc03, registers.pc);
        // the instruction at the breakpoint did not execute
        assert_eq!(0x06, registers.a);
    }

    #[test]
    fn test_run_propagates_faults() {
        let mut memory = Memory::new();
        memory.load(&[0x86, 0x05, 0x01], 0xfc00).unwrap();
        let mut registers = Registers::new(0xfc00);
        let debugger = Debugger::new();

        let result = debugger.run(&mut registers, &mut memory, |_| {});
        assert!(result.is_err());
        assert_eq!(0xfc02, registers.pc);
    }

    #[test]
    fn test_run_interrupted_by_stop_flag() {
        let mut memory = Memory::new();
        memory.load(&[0x86, 0x05], 0xfc00).unwrap();
        let mut registers = Registers::new(0xfc00);
        let debugger = Debugger::new();
        debugger.stop_flag().store(true, Ordering::Relaxed);

        let outcome = debugger.run(&mut registers, &mut memory, |_| {}).unwrap();
        assert_eq!(RunOutcome::Interrupted, outcome);
        // flag is cleared on the way out
        assert!(!debugger.stop_flag().load(Ordering::Relaxed));
        assert_eq!(0xfc00, registers.pc);
    }

    #[test]
    fn test_step_past_breakpoint_after_hit() {
        let mut memory = Memory::new();
        memory.load(&[0x4c, 0x4c], 0xfc00).unwrap();
        let mut registers = Registers::new(0xfc00);
        let mut debugger = Debugger::new();
        debugger.add_breakpoint(0xfc00);

        assert!(debugger.step(&mut registers, &mut memory).unwrap().is_none());
        debugger.remove_breakpoint(0xfc00);
        assert!(debugger.step(&mut registers, &mut memory).unwrap().is_some());
        assert_eq!(0x01, registers.a);
    }
}

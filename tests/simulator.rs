use soft6809::{
    assemble_and_load, execute_step, Debugger, Memory, Registers, RunOutcome, CONSOLE_OUT_ADDR,
    RESET_VECTOR_ADDR,
};
use std::sync::{Arc, Mutex};

fn boot(source: &str) -> (Memory, Registers) {
    let mut memory = Memory::new();
    assemble_and_load(source, &mut memory).unwrap();
    let mut registers = Registers::new(0x0000);
    registers.reset(&memory);

    (memory, registers)
}

#[test]
fn reset_loads_pc_from_vector() {
    let (memory, registers) = boot("NOP");
    assert_eq!(0xfc00, memory.read_word(RESET_VECTOR_ADDR));
    assert_eq!(0xfc00, registers.pc);
    assert_eq!(0x00, registers.a);
    assert_eq!(0x0000, registers.s);
    assert_eq!(0, registers.cycles);
}

#[test]
fn print_to_console() {
    let source = "LDA #$48\nSTA $FF00\nLDB #$69\nSTB $FF00\n";
    let (mut memory, mut registers) = boot(source);
    let output = Arc::new(Mutex::new(Vec::new()));
    let sink = output.clone();
    memory.set_console_out(Box::new(move |byte| {
        sink.lock().unwrap().push(byte);
    }));

    for _ in 0..4 {
        execute_step(&mut registers, &mut memory).unwrap();
    }

    assert_eq!(b"Hi".to_vec(), *output.lock().unwrap());
    // the port is not backed by storage while the hook is set
    assert_eq!(0x00, memory.read_byte(CONSOLE_OUT_ADDR));
}

#[test]
fn arithmetic_and_cycle_accounting() {
    let source = "LDA #$7F\nADDA #$01\nSUBA #$80\n";
    let (mut memory, mut registers) = boot(source);

    execute_step(&mut registers, &mut memory).unwrap();
    assert_eq!(0x7f, registers.a);
    assert_eq!(2, registers.cycles);

    execute_step(&mut registers, &mut memory).unwrap();
    assert_eq!(0x80, registers.a);
    assert!(registers.v_flag_is_set());
    assert!(registers.n_flag_is_set());
    assert!(!registers.c_flag_is_set());
    assert_eq!(4, registers.cycles);

    execute_step(&mut registers, &mut memory).unwrap();
    assert_eq!(0x00, registers.a);
    assert!(registers.z_flag_is_set());
    assert_eq!(6, registers.cycles);
}

#[test]
fn subroutine_call_and_return() {
    let source = "JSR $FC06\nLDB #$22\nNOP\nLDA #$11\nRTS\n";
    let (mut memory, mut registers) = boot(source);
    registers.s = 0x8000;

    execute_step(&mut registers, &mut memory).unwrap();
    assert_eq!(0xfc06, registers.pc);
    assert_eq!(0x7ffe, registers.s);
    assert_eq!(0xfc03, memory.read_word(0x7ffe));

    execute_step(&mut registers, &mut memory).unwrap();
    assert_eq!(0x11, registers.a);

    execute_step(&mut registers, &mut memory).unwrap();
    assert_eq!(0xfc03, registers.pc);
    assert_eq!(0x8000, registers.s);

    execute_step(&mut registers, &mut memory).unwrap();
    assert_eq!(0x22, registers.b);
}

#[test]
fn push_pull_round_trip() {
    let source = "PSHS A,B,X\nCLRA\nCLRB\nLDX #$0000\nPULS A,B,X\n";
    let (mut memory, mut registers) = boot(source);
    registers.s = 0x8000;
    registers.a = 0x11;
    registers.b = 0x22;
    registers.x = 0x3344;

    for _ in 0..5 {
        execute_step(&mut registers, &mut memory).unwrap();
    }

    assert_eq!(0x11, registers.a);
    assert_eq!(0x22, registers.b);
    assert_eq!(0x3344, registers.x);
    assert_eq!(0x8000, registers.s);
}

#[test]
fn indexed_store_walks_a_buffer() {
    let source = "LDX #$2000\nLDA #$41\nSTA ,X\nSTA 1,X\nSTA -1,X\n";
    let (mut memory, mut registers) = boot(source);

    for _ in 0..5 {
        execute_step(&mut registers, &mut memory).unwrap();
    }

    assert_eq!(0x41, memory.read_byte(0x2000));
    assert_eq!(0x41, memory.read_byte(0x2001));
    assert_eq!(0x41, memory.read_byte(0x1fff));
}

#[test]
fn run_halts_on_breakpoint() {
    let source = "CLRA\nINCA\nJMP $FC01\n";
    let (mut memory, mut registers) = boot(source);
    let mut debugger = Debugger::new();
    debugger.add_breakpoint(0xfc02);

    let outcome = debugger.run(&mut registers, &mut memory, |_| {}).unwrap();
    assert_eq!(RunOutcome::BreakpointHit(0xfc02), outcome);
    assert_eq!(0xfc02, registers.pc);
    // the jump at the breakpoint did not execute
    assert_eq!(0x01, registers.a);
}

#[test]
fn decode_fault_leaves_machine_untouched() {
    let mut memory = Memory::new();
    memory.load(&[0x86, 0x05, 0x01], 0xfc00).unwrap();
    memory.write_word(RESET_VECTOR_ADDR, 0xfc00);
    let mut registers = Registers::new(0x0000);
    registers.reset(&memory);

    execute_step(&mut registers, &mut memory).unwrap();
    let cycles = registers.cycles;
    let result = execute_step(&mut registers, &mut memory);
    assert!(result.is_err());
    assert_eq!(0xfc02, registers.pc);
    assert_eq!(0x05, registers.a);
    assert_eq!(cycles, registers.cycles);
}

#[test]
fn write_word_wraps_around_the_address_space() {
    let mut memory = Memory::new();
    memory.write_word(0xffff, 0x1234);
    assert_eq!(0x12, memory.read_byte(0xffff));
    assert_eq!(0x34, memory.read_byte(0x0000));
}

/*
 * Interactive monitor for the soft6809 library.
 */
use ansi_term::Colour;

extern crate pest;
#[macro_use]
extern crate pest_derive;

use pest::error::Error as PestError;
use pest::iterators::Pairs;
use pest::{Parser, RuleType};

extern crate rustyline;

use rustyline::error::ReadlineError;
use rustyline::Result as RustyResult;
use rustyline::{Context, Editor};

use structopt::StructOpt;

use soft6809::{
    assemble_and_load, execute_step, Debugger, LogLine, Memory, MemoryParserIterator, Registers,
    RunOutcome, VERSION,
};

use std::collections::VecDeque;
use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

const LOGLINE_MEMORY_LEN: usize = 35;

#[derive(Parser)]
#[grammar = "cli.pest"]
pub struct BEParser;

#[derive(Debug, StructOpt)]
#[structopt(name = "soft6809", about = "Motorola 6809 emulator and monitor")]
struct CliOptions {
    /// Assembly source assembled into the ROM region at startup.
    #[structopt(short = "a", long = "asm", parse(from_os_str))]
    asm_file: Option<PathBuf>,

    /// Monitor commands executed before the prompt shows up.
    #[structopt(short = "s", long = "script", parse(from_os_str))]
    script_file: Option<PathBuf>,
}

fn display_error<T: RuleType>(err: PestError<T>) {
    let (mark_str, msg) = match err.location {
        pest::error::InputLocation::Pos(x) => {
            let mut pos_str = String::new();
            for _ in 0..x {
                pos_str.push(' ');
            }
            pos_str.push('↑');

            (pos_str, format!("at position {}", x))
        }
        pest::error::InputLocation::Span((a, b)) => {
            let mut pos_str = String::new();
            for _ in 0..a {
                pos_str.push(' ');
            }
            pos_str.push('↑');
            for _ in a..b {
                pos_str.push(' ');
            }
            pos_str.push('↑');
            (
                pos_str,
                format!("somewhere between position {} and {}", a, b),
            )
        }
    };
    println!("   {}", mark_str);
    print_err(&msg);
    match err.variant {
        pest::error::ErrorVariant::ParsingError {
            positives,
            negatives: _,
        } => {
            println!(
                "{}",
                Colour::Fixed(240).paint(format!("hint: expected {:?}", positives))
            );
        }
        pest::error::ErrorVariant::CustomError { message } => {
            println!(
                "{}",
                Colour::Fixed(240).paint(format!("message: {}", message))
            );
        }
    };
}

fn main() {
    let cli_options = CliOptions::from_args();

    // 1 setting up the machine
    let mut registers = Registers::new(0x0000);
    let mut memory = Memory::new();
    memory.set_console_out(Box::new(|byte| {
        print!("{}", byte as char);
        std::io::stdout().flush().ok();
    }));
    let mut debugger = Debugger::new();

    // 2 CTRL-C handler shares the debugger stop flag
    let interrupted = debugger.stop_flag();
    let rmtint = interrupted.clone();
    ctrlc::set_handler(move || {
        rmtint.store(true, Ordering::SeqCst);
    })
    .unwrap();

    // 3 startup options
    if let Some(filename) = &cli_options.asm_file {
        match assemble_file(&filename.to_string_lossy(), &mut registers, &mut memory) {
            Ok(()) => println!("Assembled '{}', PC=#0x{:04X}.", filename.display(), registers.pc),
            Err(msg) => print_err(&msg),
        }
    }

    // 4 CLI prompt & readline configuration
    println!(
        "{}",
        Colour::Green.paint(format!("Welcome in Soft-6809 version {}", VERSION))
    );
    let prompt = format!("{}", Colour::Fixed(148).bold().paint(">> "));
    let mut rl = Editor::<CommandLineCompleter>::new();
    if rl.load_history("history.txt").is_err() {
        println!("No previous history.");
    }
    rl.set_helper(Some(CommandLineCompleter {}));

    if let Some(filename) = &cli_options.script_file {
        match std::fs::read_to_string(filename) {
            Ok(script) => {
                for line in script.lines().filter(|line| !line.trim().is_empty()) {
                    println!("{}{}", prompt, line);
                    execute_command(line, &mut registers, &mut memory, &mut debugger);
                }
            }
            Err(e) => print_err(format!("cannot read script: {}", e).as_str()),
        }
    }

    // 5 main CLI loop
    loop {
        let readline = rl.readline(&prompt);
        match readline {
            Ok(line) => {
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str());
                execute_command(&line, &mut registers, &mut memory, &mut debugger);
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL+C caught, press CTRL+D to exit.");
            }
            Err(ReadlineError::Eof) => {
                println!("Quit!");
                break;
            }
            Err(err) => {
                print_err(format!("{:?}", err).as_str());
                break;
            }
        }
    }
    rl.save_history("history.txt").unwrap();
    println!("Writing commands history in 'history.txt'.");
}

fn execute_command(
    line: &str,
    registers: &mut Registers,
    memory: &mut Memory,
    debugger: &mut Debugger,
) {
    match BEParser::parse(Rule::sentence, line) {
        Ok(mut pairs) => {
            parse_instruction(
                pairs.next().unwrap().into_inner(),
                registers,
                memory,
                debugger,
            );
            let interrupted = debugger.stop_flag();
            if interrupted.load(Ordering::Relaxed) {
                println!("Execution interrupted by CTRL+C!");
                interrupted.store(false, Ordering::SeqCst);
            }
        }
        Err(parse_err) => {
            display_error(parse_err);
        }
    };
}

pub fn parse_instruction(
    mut nodes: Pairs<Rule>,
    registers: &mut Registers,
    memory: &mut Memory,
    debugger: &mut Debugger,
) {
    let node = nodes.next().unwrap();
    match node.as_rule() {
        Rule::registers_instruction => exec_register_instruction(node.into_inner(), registers, memory),
        Rule::memory_instruction => exec_memory_instruction(node.into_inner(), memory),
        Rule::assemble_instruction => exec_assemble_instruction(node.into_inner(), registers, memory),
        Rule::disassemble_instruction => {
            exec_disassemble_instruction(node.into_inner(), registers, memory, debugger)
        }
        Rule::breakpoint_instruction => exec_breakpoint_instruction(node.into_inner(), debugger),
        Rule::run_instruction => exec_run_instruction(node.into_inner(), registers, memory, debugger),
        Rule::step_instruction => exec_step_instruction(registers, memory),
        Rule::reset_instruction => {
            registers.reset(memory);
            println!("Machine reset, PC=#0x{:04X}.", registers.pc);
        }
        Rule::help_instruction => help(node.into_inner()),
        _ => {}
    };
}

fn exec_register_instruction(mut nodes: Pairs<Rule>, registers: &mut Registers, memory: &Memory) {
    let node = nodes.next().unwrap();
    match node.as_rule() {
        Rule::registers_show => {
            println!("{:?}", registers);
        }
        Rule::registers_flush => {
            registers.reset(memory);
            println!("Registers flushed!");
        }
        _ => {
            println!("{:?}", node);
        }
    };
}

fn exec_memory_instruction(mut nodes: Pairs<Rule>, memory: &mut Memory) {
    let node = nodes.next().unwrap();
    match node.as_rule() {
        Rule::memory_show => {
            let mut subnodes = node.into_inner();
            let addr = parse_memory(subnodes.next().unwrap().as_str()[3..].to_owned());
            let len: usize = subnodes.next().unwrap().as_str().parse::<usize>().unwrap();
            print!("{}", memory.dump(addr, len));
        }
        Rule::memory_load => {
            let mut subnodes = node.into_inner();
            let addr = parse_memory(subnodes.next().unwrap().as_str()[3..].to_owned());
            let filename = subnodes.next().unwrap().as_str().trim_matches('"');
            match load_memory(filename, addr, memory) {
                Ok(len) => println!("Loaded {} bytes at address #0x{:04X}.", len, addr),
                Err(e) => print_err(format!("{}", e).as_str()),
            }
        }
        _ => println!("{:?}", node),
    }
}

fn exec_assemble_instruction(mut nodes: Pairs<Rule>, registers: &mut Registers, memory: &mut Memory) {
    let filename = nodes.next().unwrap().as_str().trim_matches('"').to_owned();
    match assemble_file(&filename, registers, memory) {
        Ok(()) => println!("Assembled '{}', PC=#0x{:04X}.", filename, registers.pc),
        Err(msg) => print_err(&msg),
    }
}

fn assemble_file(
    filename: &str,
    registers: &mut Registers,
    memory: &mut Memory,
) -> Result<(), String> {
    let source =
        std::fs::read_to_string(filename).map_err(|e| format!("cannot read '{}': {}", filename, e))?;
    assemble_and_load(&source, memory).map_err(|e| format!("{}", e))?;
    registers.reset(memory);

    Ok(())
}

fn exec_disassemble_instruction(
    mut nodes: Pairs<Rule>,
    registers: &Registers,
    memory: &Memory,
    debugger: &Debugger,
) {
    let mut addr = registers.pc as usize;
    let mut len = 0;
    for node in nodes.by_ref() {
        match node.as_rule() {
            Rule::memory_address => addr = parse_memory(node.as_str()[3..].to_owned()),
            Rule::size_parameter => len = node.as_str().parse::<usize>().unwrap(),
            _ => {}
        }
    }

    if len == 0 {
        print_err("length 0");
        return;
    }

    let interrupted = debugger.stop_flag();
    for (op, line) in MemoryParserIterator::new(addr, memory).enumerate() {
        println!("{}", line);
        if interrupted.load(Ordering::Relaxed) || op + 1 >= len {
            break;
        }
    }
}

fn exec_breakpoint_instruction(mut nodes: Pairs<Rule>, debugger: &mut Debugger) {
    let node = nodes.next().unwrap();
    match node.as_rule() {
        Rule::breakpoint_add => {
            let addr = parse_memory(node.into_inner().next().unwrap().as_str()[3..].to_owned());
            debugger.add_breakpoint(addr);
            println!("Breakpoint set at #0x{:04X}.", addr);
        }
        Rule::breakpoint_remove => {
            let addr = parse_memory(node.into_inner().next().unwrap().as_str()[3..].to_owned());
            if debugger.remove_breakpoint(addr) {
                println!("Breakpoint removed from #0x{:04X}.", addr);
            } else {
                print_err(format!("no breakpoint at #0x{:04X}", addr).as_str());
            }
        }
        Rule::breakpoint_clear => {
            debugger.clear_breakpoints();
            println!("All breakpoints cleared.");
        }
        Rule::breakpoint_list => {
            let breakpoints = debugger.breakpoints();
            if breakpoints.is_empty() {
                println!("No breakpoints.");
            } else {
                for addr in breakpoints {
                    println!("#0x{:04X}", addr);
                }
            }
        }
        _ => println!("{:?}", node),
    }
}

fn exec_run_instruction(
    mut nodes: Pairs<Rule>,
    registers: &mut Registers,
    memory: &mut Memory,
    debugger: &Debugger,
) {
    if let Some(node) = nodes.next() {
        if node.as_rule() == Rule::memory_address {
            registers.pc = (parse_memory(node.as_str()[3..].to_owned()) & 0xffff) as u16;
        }
    }

    let mut loglines: VecDeque<LogLine> = VecDeque::new();
    let mut count: usize = 0;
    let outcome = debugger.run(registers, memory, |log_line| {
        count += 1;
        loglines.push_back(log_line);
        if loglines.len() > LOGLINE_MEMORY_LEN {
            loglines.pop_front();
        }
    });

    if count > LOGLINE_MEMORY_LEN {
        println!("Stopped after {} cpu instructions.", count);
    }
    loglines.iter().for_each(|x| println!("{}", x));
    match outcome {
        Ok(RunOutcome::BreakpointHit(addr)) => println!("Breakpoint hit at #0x{:04X}.", addr),
        Ok(RunOutcome::Interrupted) => {}
        Err(e) => print_err(format!("{}", e).as_str()),
    }
}

fn exec_step_instruction(registers: &mut Registers, memory: &mut Memory) {
    match execute_step(registers, memory) {
        Ok(log_line) => println!("{}", log_line),
        Err(e) => print_err(format!("{}", e).as_str()),
    }
}

fn help(mut nodes: Pairs<Rule>) {
    if let Some(node) = nodes.next() {
        match node.as_rule() {
            Rule::help_registers => {
                println!("{}", Colour::Green.paint("Registers commands:"));
                println!();
                println!("  registers show");
                println!("          Dump the content of the CPU registers.");
                println!();
                println!("  registers flush");
                println!("          Reset the registers, loading PC from the reset vector.");
            }
            Rule::help_memory => {
                println!("{}", Colour::Green.paint("Memory commands:"));
                println!("  memory show ADDRESS LENGTH");
                println!("          Show the content of the memory starting from ADDRESS.");
                print_example("memory show #0x1234 100");
                println!();
                println!("  memory load ADDRESS \"filename.ext\"");
                println!("          Load a binary file at the selected address in memory.");
                print_example("memory load #0x1C00 \"program.bin\"");
            }
            Rule::help_assemble => {
                println!("{}", Colour::Green.paint("Assembler command:"));
                println!("  assemble \"filename.asm\"");
                println!("          Assemble the source into the ROM region at #0xFC00, write");
                println!("          the reset vector and reset the machine.");
                print_example("assemble \"hello.asm\"");
            }
            Rule::help_disassemble => {
                println!("{}", Colour::Green.paint("Disassembler command:"));
                println!();
                println!("  disassemble [ADDRESS] LENGTH");
                println!("          Disassemble LENGTH instructions starting from ADDRESS. If the");
                println!("          ADDRESS parameter is not provided, the current PC is taken.");
                println!();
                print_example("disassemble #0xFC00 100");
                print_example("disassemble 10");
            }
            Rule::help_breakpoint => {
                println!("{}", Colour::Green.paint("Breakpoint commands:"));
                println!("  breakpoint add ADDRESS");
                println!("  breakpoint remove ADDRESS");
                println!("  breakpoint clear");
                println!("  breakpoint list");
                println!("          A run halts before fetching the instruction at a breakpoint.");
                print_example("breakpoint add #0xFC08");
            }
            Rule::help_run => {
                println!("{}", Colour::Green.paint("Execution commands:"));
                println!("  run [ADDRESS]");
                println!("          Execute from ADDRESS (or the current PC) until a breakpoint");
                println!("          is hit, an error occurs or CTRL-C interrupts the run.");
                println!();
                println!("  step");
                println!("          Execute the single instruction at PC.");
                println!();
                println!("  reset");
                println!("          Zero the registers and load PC from the reset vector at");
                println!("          #0xFFFE.");
                print_example("run #0xFC00");
            }
            _ => {}
        };
    } else {
        println!("{}", Colour::Green.paint("Available commands:"));
        println!("{}", Colour::White.bold().paint("Registers"));
        println!("  registers show");
        println!("  registers flush");
        println!("{}", Colour::White.bold().paint("Memory"));
        println!("  memory show ADDRESS LENGTH");
        println!("  memory load ADDRESS \"filename.ext\"");
        println!("{}", Colour::White.bold().paint("Assembler"));
        println!("  assemble \"filename.asm\"");
        println!("{}", Colour::White.bold().paint("Disassembler"));
        println!("  disassemble [ADDRESS] LENGTH");
        println!("{}", Colour::White.bold().paint("Breakpoints"));
        println!("  breakpoint add|remove ADDRESS, breakpoint clear, breakpoint list");
        println!("{}", Colour::White.bold().paint("Execution"));
        println!("  run [ADDRESS], step, reset");
        println!("{}", Colour::White.bold().paint("Help"));
        println!("  help [TOPIC]");
    };
}

fn load_memory(filename: &str, addr: usize, memory: &mut Memory) -> Result<usize, String> {
    let buffer = {
        let mut f = File::open(filename).map_err(|e| format!("{}", e))?;
        let mut buffer: Vec<u8> = vec![];
        f.read_to_end(&mut buffer).map_err(|e| format!("{}", e))?;
        buffer
    };
    memory
        .load(&buffer, addr)
        .map_err(|e| format!("{}", e))?;

    Ok(buffer.len())
}

// #0xNNNN literals, odd digit counts are padded before decoding.
fn parse_memory(addr: String) -> usize {
    let string = if addr.len() % 2 == 1 {
        format!("0{}", addr)
    } else {
        addr.clone()
    };
    let bytes = match hex::decode(string) {
        Ok(s) => s,
        Err(t) => panic!("Could not turn '{}' into hex. {:?}", addr, t),
    };
    let mut addr: usize = 0;

    for byte in bytes.iter() {
        addr = addr << 8 | (*byte as usize);
    }

    addr
}

fn print_err(msg: &str) {
    println!("{}: {}", Colour::Red.paint("Error"), msg);
}

fn print_example(msg: &str) {
    println!("          Example: {}", Colour::Fixed(130).paint(msg));
}

struct CommandLineCompleter {}

impl rustyline::completion::Completer for CommandLineCompleter {
    type Candidate = String;
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context,
    ) -> RustyResult<(usize, Vec<Self::Candidate>)> {
        let mut candidates: Vec<String> = vec![];
        let keywords = vec![
            "registers show",
            "registers flush",
            "memory show #0x",
            "memory load #0x",
            "assemble \"",
            "disassemble ",
            "disassemble #0x",
            "breakpoint add #0x",
            "breakpoint remove #0x",
            "breakpoint clear",
            "breakpoint list",
            "run ",
            "run #0x",
            "step",
            "reset",
            "help",
            "help registers",
            "help memory",
            "help assemble",
            "help disassemble",
            "help breakpoint",
            "help run",
        ];

        for word in keywords {
            if word.contains(line) {
                candidates.push(word.to_owned());
            }
        }

        if !candidates.is_empty() {
            Ok((0, candidates))
        } else {
            Ok((pos, vec![]))
        }
    }
}

impl rustyline::hint::Hinter for CommandLineCompleter {}

impl rustyline::highlight::Highlighter for CommandLineCompleter {}

impl rustyline::Helper for CommandLineCompleter {}

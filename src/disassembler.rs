use super::memory::Memory;
use super::processing_unit::resolve_opcode;

/*
 * Iterator walking memory with its own cursor, one disassembled line
 * per instruction. The machine PC is never involved so disassembly is
 * safe on a live machine. An opcode the table does not know renders a
 * ??? placeholder and the cursor moves one byte.
 */
pub struct MemoryParserIterator<'a> {
    cursor: usize,
    memory: &'a Memory,
}

impl<'a> MemoryParserIterator<'a> {
    pub fn new(start_address: usize, memory: &'a Memory) -> MemoryParserIterator<'a> {
        MemoryParserIterator {
            cursor: start_address & 0xffff,
            memory,
        }
    }
}

impl<'a> Iterator for MemoryParserIterator<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let opcode = self.memory.read_byte(self.cursor);

        match resolve_opcode(self.cursor, opcode, self.memory) {
            Ok(instruction) => {
                let line = format!("{}", instruction);
                self.cursor =
                    (self.cursor + 1 + instruction.addressing_mode.get_operands().len()) & 0xffff;
                Some(line)
            }
            Err(_) => {
                let line = format!(
                    "#0x{:04X}: {: <14}???",
                    self.cursor,
                    format!("({:02x})", opcode)
                );
                self.cursor = (self.cursor + 1) & 0xffff;
                Some(line)
            }
        }
    }
}

pub fn disassemble(start_address: usize, count: usize, memory: &Memory) -> Vec<String> {
    MemoryParserIterator::new(start_address, memory)
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_program() {
        let mut memory = Memory::new();
        memory
            .load(
                &[
                    0x86, 0x05, 0xc6, 0xff, 0x8e, 0x12, 0x34, 0xa6, 0x08, 0xfb, 0x12, 0x39,
                ],
                0xfc00,
            )
            .unwrap();
        let expected: Vec<&str> = vec![
            "#0xFC00: (86 05)       LDA   #$05",
            "#0xFC02: (c6 ff)       LDB   #$ff",
            "#0xFC04: (8e 12 34)    LDX   #$1234",
            "#0xFC07: (a6 08 fb)    LDA   -5,X",
            "#0xFC0A: (12)          NOP",
            "#0xFC0B: (39)          RTS",
        ];
        let output = disassemble(0xfc00, 6, &memory);

        for (i, line) in output.iter().enumerate() {
            assert_eq!(expected[i], line.trim_end());
        }
    }

    #[test]
    fn test_unknown_opcode_renders_placeholder() {
        let mut memory = Memory::new();
        memory.load(&[0x01, 0x12], 0xfc00).unwrap();
        let output = disassemble(0xfc00, 2, &memory);
        assert_eq!("#0xFC00: (01)          ???", output[0]);
        assert_eq!("#0xFC01: (12)          NOP", output[1].trim_end());
    }

    #[test]
    fn test_bad_postbyte_renders_placeholder() {
        let mut memory = Memory::new();
        memory.load(&[0xa6, 0x86], 0xfc00).unwrap();
        let output = disassemble(0xfc00, 1, &memory);
        assert_eq!("#0xFC00: (a6)          ???", output[0]);
    }

    #[test]
    fn test_stack_masks_render_register_lists() {
        let mut memory = Memory::new();
        memory.load(&[0x34, 0x16, 0x36, 0x40], 0xfc00).unwrap();
        let output = disassemble(0xfc00, 2, &memory);
        assert_eq!("#0xFC00: (34 16)       PSHS  X,B,A", output[0].trim_end());
        assert_eq!("#0xFC02: (36 40)       PSHU  S", output[1].trim_end());
    }

    #[test]
    fn test_cursor_wraps_at_top_of_memory() {
        let mut memory = Memory::new();
        memory.write_byte(0xffff, 0x12);
        memory.write_byte(0x0000, 0x39);
        let output = disassemble(0xffff, 2, &memory);
        assert_eq!("#0xFFFF: (12)          NOP", output[0].trim_end());
        assert_eq!("#0x0000: (39)          RTS", output[1].trim_end());
    }
}

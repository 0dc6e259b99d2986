use super::memory::Memory;
use super::RESET_VECTOR_ADDR;
use std::fmt;

/*
 * 6809 register file
 * A & B are the 8 bit accumulators, D is the 16 bit view A:B (A high).
 * X & Y are the index registers, S & U the system and user stack pointers.
 * DP holds the high byte of direct mode addresses.
 * CCR flags, MSB to LSB:
 * bit 8: Entire state saved
 * bit 7: Fast interrupt mask
 * bit 6: Half carry
 * bit 5: Interrupt mask
 * bit 4: Negative
 * bit 3: Zero
 * bit 2: oVerflow
 * bit 1: Carry
 */
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub dp: u8,
    pub ccr: u8,
    pub x: u16,
    pub y: u16,
    pub s: u16,
    pub u: u16,
    pub pc: u16,
    pub cycles: u64,
}

impl Registers {
    pub fn new(init_address: u16) -> Registers {
        Registers {
            a: 0x00,
            b: 0x00,
            dp: 0x00,
            ccr: 0x00,
            x: 0x0000,
            y: 0x0000,
            s: 0x0000,
            u: 0x0000,
            pc: init_address,
            cycles: 0,
        }
    }

    /*
     * reset
     * Zero every register and the cycle counter, then load PC from the
     * reset vector. Nothing else gives a well defined starting state.
     */
    pub fn reset(&mut self, memory: &Memory) {
        self.a = 0x00;
        self.b = 0x00;
        self.dp = 0x00;
        self.ccr = 0x00;
        self.x = 0x0000;
        self.y = 0x0000;
        self.s = 0x0000;
        self.u = 0x0000;
        self.cycles = 0;
        self.pc = memory.read_word(RESET_VECTOR_ADDR);
    }

    pub fn get_d(&self) -> u16 {
        (self.a as u16) << 8 | self.b as u16
    }

    pub fn set_d(&mut self, value: u16) {
        self.a = (value >> 8) as u8;
        self.b = (value & 0xff) as u8;
    }

    pub fn e_flag_is_set(&self) -> bool {
        self.ccr & 0b1000_0000 != 0
    }

    pub fn f_flag_is_set(&self) -> bool {
        self.ccr & 0b0100_0000 != 0
    }

    pub fn h_flag_is_set(&self) -> bool {
        self.ccr & 0b0010_0000 != 0
    }

    pub fn i_flag_is_set(&self) -> bool {
        self.ccr & 0b0001_0000 != 0
    }

    pub fn n_flag_is_set(&self) -> bool {
        self.ccr & 0b0000_1000 != 0
    }

    pub fn z_flag_is_set(&self) -> bool {
        self.ccr & 0b0000_0100 != 0
    }

    pub fn v_flag_is_set(&self) -> bool {
        self.ccr & 0b0000_0010 != 0
    }

    pub fn c_flag_is_set(&self) -> bool {
        self.ccr & 0b0000_0001 != 0
    }

    pub fn set_e_flag(&mut self, flag: bool) {
        if flag {
            self.ccr |= 0b1000_0000;
        } else {
            self.ccr &= 0b0111_1111;
        }
    }

    pub fn set_f_flag(&mut self, flag: bool) {
        if flag {
            self.ccr |= 0b0100_0000;
        } else {
            self.ccr &= 0b1011_1111;
        }
    }

    pub fn set_h_flag(&mut self, flag: bool) {
        if flag {
            self.ccr |= 0b0010_0000;
        } else {
            self.ccr &= 0b1101_1111;
        }
    }

    pub fn set_i_flag(&mut self, flag: bool) {
        if flag {
            self.ccr |= 0b0001_0000;
        } else {
            self.ccr &= 0b1110_1111;
        }
    }

    pub fn set_n_flag(&mut self, flag: bool) {
        if flag {
            self.ccr |= 0b0000_1000;
        } else {
            self.ccr &= 0b1111_0111;
        }
    }

    pub fn set_z_flag(&mut self, flag: bool) {
        if flag {
            self.ccr |= 0b0000_0100;
        } else {
            self.ccr &= 0b1111_1011;
        }
    }

    pub fn set_v_flag(&mut self, flag: bool) {
        if flag {
            self.ccr |= 0b0000_0010;
        } else {
            self.ccr &= 0b1111_1101;
        }
    }

    pub fn set_c_flag(&mut self, flag: bool) {
        if flag {
            self.ccr |= 0b0000_0001;
        } else {
            self.ccr &= 0b1111_1110;
        }
    }

    pub fn update_nz8(&mut self, result: u8) {
        self.set_z_flag(result == 0);
        self.set_n_flag(result & 0x80 != 0);
    }

    pub fn update_nz16(&mut self, result: u16) {
        self.set_z_flag(result == 0);
        self.set_n_flag(result & 0x8000 != 0);
    }

    // 8 bit addition, `result` is the unmasked sum.
    pub fn update_flags_add8(&mut self, a: u8, b: u8, result: u16) {
        let r = (result & 0xff) as u8;
        self.set_c_flag(result > 0xff);
        self.set_z_flag(r == 0);
        self.set_n_flag(r & 0x80 != 0);
        self.set_v_flag(!(a ^ b) & (a ^ r) & 0x80 != 0);
        self.set_h_flag(((a & 0x0f) + (b & 0x0f)) & 0x10 != 0);
    }

    // 8 bit subtraction, `result` is the wrapping 16 bit difference so
    // bit 8 carries the borrow. H is left untouched.
    pub fn update_flags_sub8(&mut self, a: u8, b: u8, result: u16) {
        let r = (result & 0xff) as u8;
        self.set_c_flag(result & 0x100 != 0);
        self.set_z_flag(r == 0);
        self.set_n_flag(r & 0x80 != 0);
        self.set_v_flag((a ^ b) & (a ^ r) & 0x80 != 0);
    }

    // AND, OR, EOR. C and H untouched.
    pub fn update_flags_logic(&mut self, result: u8) {
        self.set_z_flag(result == 0);
        self.set_n_flag(result & 0x80 != 0);
        self.set_v_flag(false);
    }

    pub fn update_flags_inc(&mut self, result: u8) {
        self.set_z_flag(result == 0);
        self.set_n_flag(result & 0x80 != 0);
        self.set_v_flag(result == 0x80); // 0x7f -> 0x80
    }

    pub fn update_flags_dec(&mut self, result: u8) {
        self.set_z_flag(result == 0);
        self.set_n_flag(result & 0x80 != 0);
        self.set_v_flag(result == 0x7f); // 0x80 -> 0x7f
    }

    pub fn update_flags_clr(&mut self) {
        self.set_z_flag(true);
        self.set_n_flag(false);
        self.set_v_flag(false);
        self.set_c_flag(false);
    }

    pub fn update_flags_neg(&mut self, value: u8, result: u8) {
        self.set_z_flag(result == 0);
        self.set_n_flag(result & 0x80 != 0);
        self.set_c_flag(value != 0);
        self.set_v_flag(value == 0x80);
    }

    /*
     * System stack (S) and user stack (U).
     * Push pre-decrements so the pointer always addresses the most
     * recently pushed byte; pull post-increments. 16 bit pushes store
     * the high byte first so pulls restore big endian order.
     */
    pub fn stack_push_s(&mut self, memory: &mut Memory, byte: u8) {
        self.s = self.s.wrapping_sub(1);
        memory.write_byte(self.s as usize, byte);
    }

    pub fn stack_pull_s(&mut self, memory: &Memory) -> u8 {
        let byte = memory.read_byte(self.s as usize);
        self.s = self.s.wrapping_add(1);
        byte
    }

    pub fn stack_push_s16(&mut self, memory: &mut Memory, word: u16) {
        self.stack_push_s(memory, (word >> 8) as u8);
        self.stack_push_s(memory, (word & 0xff) as u8);
    }

    pub fn stack_pull_s16(&mut self, memory: &Memory) -> u16 {
        let low = self.stack_pull_s(memory);
        let high = self.stack_pull_s(memory);
        (high as u16) << 8 | low as u16
    }

    pub fn stack_push_u(&mut self, memory: &mut Memory, byte: u8) {
        self.u = self.u.wrapping_sub(1);
        memory.write_byte(self.u as usize, byte);
    }

    pub fn stack_pull_u(&mut self, memory: &Memory) -> u8 {
        let byte = memory.read_byte(self.u as usize);
        self.u = self.u.wrapping_add(1);
        byte
    }

    pub fn stack_push_u16(&mut self, memory: &mut Memory, word: u16) {
        self.stack_push_u(memory, (word >> 8) as u8);
        self.stack_push_u(memory, (word & 0xff) as u8);
    }

    pub fn stack_pull_u16(&mut self, memory: &Memory) -> u16 {
        let low = self.stack_pull_u(memory);
        let high = self.stack_pull_u(memory);
        (high as u16) << 8 | low as u16
    }

    pub fn format_ccr(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}{}",
            if self.e_flag_is_set() { "E" } else { "e" },
            if self.f_flag_is_set() { "F" } else { "f" },
            if self.h_flag_is_set() { "H" } else { "h" },
            if self.i_flag_is_set() { "I" } else { "i" },
            if self.n_flag_is_set() { "N" } else { "n" },
            if self.z_flag_is_set() { "Z" } else { "z" },
            if self.v_flag_is_set() { "V" } else { "v" },
            if self.c_flag_is_set() { "C" } else { "c" },
        )
    }
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Registers [A:0x{:02x}, B:0x{:02x}, DP:0x{:02x} | X:0x{:04x}, Y:0x{:04x} | S:0x{:04x}, U:0x{:04x} | PC:0x{:04x} | {} | cycles:{}]",
            self.a,
            self.b,
            self.dp,
            self.x,
            self.y,
            self.s,
            self.u,
            self.pc,
            self.format_ccr(),
            self.cycles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_flags() {
        let registers = Registers::new(0xfc00);
        assert!(!registers.z_flag_is_set());
        assert!(!registers.n_flag_is_set());
        assert!(!registers.v_flag_is_set());
        assert!(!registers.c_flag_is_set());
        assert!(!registers.h_flag_is_set());
        assert_eq!(0xfc00, registers.pc);
    }

    #[test]
    fn test_set_flags() {
        let mut registers = Registers::new(0x0000);
        registers.set_c_flag(true);
        registers.set_v_flag(true);
        registers.set_z_flag(true);
        registers.set_n_flag(true);
        registers.set_h_flag(true);
        assert_eq!("efHiNZVC", registers.format_ccr());
        registers.set_z_flag(false);
        registers.set_n_flag(false);
        registers.set_c_flag(false);
        registers.set_v_flag(false);
        registers.set_h_flag(false);
        assert_eq!("efhinzvc", registers.format_ccr());
    }

    #[test]
    fn test_d_register_view() {
        let mut registers = Registers::new(0x0000);
        registers.a = 0x12;
        registers.b = 0x34;
        assert_eq!(0x1234, registers.get_d());
        registers.set_d(0xbeef);
        assert_eq!(0xbe, registers.a);
        assert_eq!(0xef, registers.b);
    }

    #[test]
    fn test_reset_loads_vector() {
        let mut memory = Memory::new();
        memory.write_word(RESET_VECTOR_ADDR, 0xfc00);
        let mut registers = Registers::new(0x0000);
        registers.a = 0xff;
        registers.s = 0x8000;
        registers.cycles = 42;
        registers.reset(&memory);
        assert_eq!(0xfc00, registers.pc);
        assert_eq!(0x00, registers.a);
        assert_eq!(0x0000, registers.s);
        assert_eq!(0, registers.cycles);
    }

    #[test]
    fn test_stack_push_pull_round_trip() {
        let mut memory = Memory::new();
        let mut registers = Registers::new(0x0000);
        registers.s = 0x8000;
        registers.stack_push_s16(&mut memory, 0x1234);
        assert_eq!(0x7ffe, registers.s);
        // high byte stored at the higher address
        assert_eq!(0x12, memory.read_byte(0x7fff));
        assert_eq!(0x34, memory.read_byte(0x7ffe));
        assert_eq!(0x1234, registers.stack_pull_s16(&memory));
        assert_eq!(0x8000, registers.s);
    }

    #[test]
    fn test_stacks_are_independent() {
        let mut memory = Memory::new();
        let mut registers = Registers::new(0x0000);
        registers.s = 0x8000;
        registers.u = 0x7000;
        registers.stack_push_s(&mut memory, 0xaa);
        registers.stack_push_u(&mut memory, 0xbb);
        assert_eq!(0x7fff, registers.s);
        assert_eq!(0x6fff, registers.u);
        assert_eq!(0xbb, registers.stack_pull_u(&memory));
        assert_eq!(0xaa, registers.stack_pull_s(&memory));
    }
}

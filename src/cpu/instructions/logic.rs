// Logical instructions

use crate::bus::CpuBus;
use crate::cpu::{flags, Cpu};

impl Cpu {
    /// AND - Bitwise AND with accumulator
    pub(crate) fn and(&mut self, bus: &mut CpuBus) -> bool {
        self.a &= self.fetch_operand(bus);
        self.update_zero_and_negative_flags(self.a);
        true
    }

    /// ORA - Bitwise OR with accumulator
    pub(crate) fn ora(&mut self, bus: &mut CpuBus) -> bool {
        self.a |= self.fetch_operand(bus);
        self.update_zero_and_negative_flags(self.a);
        true
    }

    /// EOR - Bitwise exclusive OR with accumulator
    pub(crate) fn eor(&mut self, bus: &mut CpuBus) -> bool {
        self.a ^= self.fetch_operand(bus);
        self.update_zero_and_negative_flags(self.a);
        true
    }

    /// BIT - Test bits: Z from A AND M, N and V straight from memory
    pub(crate) fn bit(&mut self, bus: &mut CpuBus) -> bool {
        let operand = self.fetch_operand(bus);
        self.update_flag(flags::ZERO, self.a & operand == 0);
        self.update_flag(flags::NEGATIVE, operand & 0x80 != 0);
        self.update_flag(flags::OVERFLOW, operand & 0x40 != 0);
        false
    }
}

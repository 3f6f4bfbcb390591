// Arithmetic instructions
//
// ADC and SBC share one adder; SBC feeds the operand in one's complement.
// The 2A03 ignores the decimal flag, so there is no BCD path.

use crate::bus::CpuBus;
use crate::cpu::{flags, Cpu};

impl Cpu {
    /// Binary add with carry; sets C, Z, V, N
    ///
    /// Overflow follows the sign rule: set when both operands share a sign
    /// and the result does not (`~(A^M) & (A^R) & 0x80`).
    fn add_with_carry(&mut self, operand: u8) {
        let a = self.a as u16;
        let m = operand as u16;
        let result = a + m + self.get_flag(flags::CARRY) as u16;

        self.update_flag(flags::CARRY, result > 0xFF);
        let result_byte = result as u8;
        self.update_flag(
            flags::OVERFLOW,
            (!(self.a ^ operand) & (self.a ^ result_byte) & 0x80) != 0,
        );
        self.a = result_byte;
        self.update_zero_and_negative_flags(self.a);
    }

    /// ADC - Add memory to accumulator with carry
    pub(crate) fn adc(&mut self, bus: &mut CpuBus) -> bool {
        let operand = self.fetch_operand(bus);
        self.add_with_carry(operand);
        true
    }

    /// SBC - Subtract memory from accumulator with borrow
    pub(crate) fn sbc(&mut self, bus: &mut CpuBus) -> bool {
        let operand = self.fetch_operand(bus);
        self.add_with_carry(operand ^ 0xFF);
        true
    }

    /// INC - Increment memory
    pub(crate) fn inc(&mut self, bus: &mut CpuBus) -> bool {
        let value = bus.read(self.effective_address).wrapping_add(1);
        bus.write(self.effective_address, value);
        self.update_zero_and_negative_flags(value);
        false
    }

    /// DEC - Decrement memory
    pub(crate) fn dec(&mut self, bus: &mut CpuBus) -> bool {
        let value = bus.read(self.effective_address).wrapping_sub(1);
        bus.write(self.effective_address, value);
        self.update_zero_and_negative_flags(value);
        false
    }

    /// INX - Increment X
    pub(crate) fn inx(&mut self) -> bool {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
        false
    }

    /// INY - Increment Y
    pub(crate) fn iny(&mut self) -> bool {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
        false
    }

    /// DEX - Decrement X
    pub(crate) fn dex(&mut self) -> bool {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
        false
    }

    /// DEY - Decrement Y
    pub(crate) fn dey(&mut self) -> bool {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
        false
    }
}

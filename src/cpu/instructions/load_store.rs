// Load and store instructions
//
// Loads pay the page-crossing cycle on indexed modes; stores never do.

use crate::bus::CpuBus;
use crate::cpu::Cpu;

impl Cpu {
    /// LDA - Load accumulator
    pub(crate) fn lda(&mut self, bus: &mut CpuBus) -> bool {
        self.a = self.fetch_operand(bus);
        self.update_zero_and_negative_flags(self.a);
        true
    }

    /// LDX - Load X register
    pub(crate) fn ldx(&mut self, bus: &mut CpuBus) -> bool {
        self.x = self.fetch_operand(bus);
        self.update_zero_and_negative_flags(self.x);
        true
    }

    /// LDY - Load Y register
    pub(crate) fn ldy(&mut self, bus: &mut CpuBus) -> bool {
        self.y = self.fetch_operand(bus);
        self.update_zero_and_negative_flags(self.y);
        true
    }

    /// STA - Store accumulator
    pub(crate) fn sta(&mut self, bus: &mut CpuBus) -> bool {
        bus.write(self.effective_address, self.a);
        false
    }

    /// STX - Store X register
    pub(crate) fn stx(&mut self, bus: &mut CpuBus) -> bool {
        bus.write(self.effective_address, self.x);
        false
    }

    /// STY - Store Y register
    pub(crate) fn sty(&mut self, bus: &mut CpuBus) -> bool {
        bus.write(self.effective_address, self.y);
        false
    }
}

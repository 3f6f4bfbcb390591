// Flag set/clear instructions

use crate::cpu::{flags, Cpu};

impl Cpu {
    /// CLC - Clear carry
    pub(crate) fn clc(&mut self) -> bool {
        self.clear_flag(flags::CARRY);
        false
    }

    /// CLD - Clear decimal (flag only; the 2A03 has no BCD)
    pub(crate) fn cld(&mut self) -> bool {
        self.clear_flag(flags::DECIMAL);
        false
    }

    /// CLI - Clear interrupt disable
    pub(crate) fn cli(&mut self) -> bool {
        self.clear_flag(flags::INTERRUPT_DISABLE);
        false
    }

    /// CLV - Clear overflow
    pub(crate) fn clv(&mut self) -> bool {
        self.clear_flag(flags::OVERFLOW);
        false
    }

    /// SEC - Set carry
    pub(crate) fn sec(&mut self) -> bool {
        self.set_flag(flags::CARRY);
        false
    }

    /// SED - Set decimal
    pub(crate) fn sed(&mut self) -> bool {
        self.set_flag(flags::DECIMAL);
        false
    }

    /// SEI - Set interrupt disable
    pub(crate) fn sei(&mut self) -> bool {
        self.set_flag(flags::INTERRUPT_DISABLE);
        false
    }
}

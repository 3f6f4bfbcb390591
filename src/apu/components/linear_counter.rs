//! Linear counter for the triangle channel

/// Quarter-frame countdown gating triangle output
///
/// A write to the triangle's length register arms the reload latch; the
/// next quarter-frame reloads the counter from the value programmed via
/// $4008. The latch stays armed while the control flag is set.
#[derive(Debug, Clone, Default)]
pub struct LinearCounter {
    /// Remaining quarter-frames of output
    counter: u8,
    /// Reload value ($4008 bits 6-0)
    reload_value: u8,
    /// Reload latch, armed by length-register writes
    reload: bool,
    /// Control flag ($4008 bit 7); doubles as the length counter halt
    control: bool,
}

impl LinearCounter {
    pub fn new() -> Self {
        LinearCounter::default()
    }

    /// Write $4008
    pub fn write_control(&mut self, data: u8) {
        self.control = (data & 0x80) != 0;
        self.reload_value = data & 0x7F;
    }

    /// Arm the reload latch (length-register write)
    pub fn arm_reload(&mut self) {
        self.reload = true;
    }

    /// Quarter-frame clock
    pub fn clock(&mut self) {
        if self.reload {
            self.counter = self.reload_value;
        } else if self.counter > 0 {
            self.counter -= 1;
        }

        if !self.control {
            self.reload = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.counter > 0
    }

    /// Control flag, shared with the triangle's length counter halt
    pub fn control_flag(&self) -> bool {
        self.control
    }
}

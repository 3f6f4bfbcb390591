//! Length counter controlling note duration

use crate::apu::constants::LENGTH_COUNTER_TABLE;

/// Table-loaded countdown gating channel output
#[derive(Debug, Clone, Default)]
pub struct LengthCounter {
    /// Remaining half-frames of output
    counter: u8,
    /// Halt flag; while set the counter does not decrement
    halt: bool,
}

impl LengthCounter {
    pub fn new() -> Self {
        LengthCounter::default()
    }

    /// Load the counter from the 5-bit table index
    pub fn load(&mut self, index: u8) {
        self.counter = LENGTH_COUNTER_TABLE[(index & 0x1F) as usize];
    }

    /// Half-frame clock
    pub fn clock(&mut self) {
        if !self.halt && self.counter > 0 {
            self.counter -= 1;
        }
    }

    pub fn set_halt(&mut self, halt: bool) {
        self.halt = halt;
    }

    /// Force the counter to zero (channel disabled via $4015)
    pub fn clear(&mut self) {
        self.counter = 0;
    }

    pub fn is_active(&self) -> bool {
        self.counter > 0
    }

    pub fn value(&self) -> u8 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_table() {
        let mut lc = LengthCounter::new();
        lc.load(0); // table entry 0 is 10
        assert_eq!(lc.value(), 10);
        lc.load(1); // table entry 1 is 254
        assert_eq!(lc.value(), 254);
    }

    #[test]
    fn test_clock_decrements() {
        let mut lc = LengthCounter::new();
        lc.load(0);
        lc.clock();
        assert_eq!(lc.value(), 9);
    }

    #[test]
    fn test_halt_freezes_counter() {
        let mut lc = LengthCounter::new();
        lc.load(0);
        lc.set_halt(true);
        for _ in 0..5 {
            lc.clock();
        }
        assert_eq!(lc.value(), 10, "halted counter must not decrement");
    }

    #[test]
    fn test_stops_at_zero() {
        let mut lc = LengthCounter::new();
        lc.load(3); // value 2
        for _ in 0..10 {
            lc.clock();
        }
        assert_eq!(lc.value(), 0);
        assert!(!lc.is_active());
    }

    #[test]
    fn test_clear() {
        let mut lc = LengthCounter::new();
        lc.load(1);
        lc.clear();
        assert!(!lc.is_active());
    }
}

// Shift and rotate instructions
//
// The one-byte encodings resolve in implied mode and write back to the
// accumulator; every other encoding read-modify-writes the effective
// address.

use crate::bus::CpuBus;
use crate::cpu::{flags, Cpu};

impl Cpu {
    /// Write a shift result to A or back to memory, updating Z/N
    fn store_shift_result(&mut self, bus: &mut CpuBus, value: u8) {
        if self.operand_is_implied() {
            self.a = value;
        } else {
            bus.write(self.effective_address, value);
        }
        self.update_zero_and_negative_flags(value);
    }

    /// ASL - Arithmetic shift left; bit 7 into carry
    pub(crate) fn asl(&mut self, bus: &mut CpuBus) -> bool {
        let value = self.fetch_operand(bus);
        self.update_flag(flags::CARRY, value & 0x80 != 0);
        self.store_shift_result(bus, value << 1);
        false
    }

    /// LSR - Logical shift right; bit 0 into carry
    pub(crate) fn lsr(&mut self, bus: &mut CpuBus) -> bool {
        let value = self.fetch_operand(bus);
        self.update_flag(flags::CARRY, value & 0x01 != 0);
        self.store_shift_result(bus, value >> 1);
        false
    }

    /// ROL - Rotate left through carry
    pub(crate) fn rol(&mut self, bus: &mut CpuBus) -> bool {
        let value = self.fetch_operand(bus);
        let carry_in = self.get_flag(flags::CARRY) as u8;
        self.update_flag(flags::CARRY, value & 0x80 != 0);
        self.store_shift_result(bus, (value << 1) | carry_in);
        false
    }

    /// ROR - Rotate right through carry
    pub(crate) fn ror(&mut self, bus: &mut CpuBus) -> bool {
        let value = self.fetch_operand(bus);
        let carry_in = (self.get_flag(flags::CARRY) as u8) << 7;
        self.update_flag(flags::CARRY, value & 0x01 != 0);
        self.store_shift_result(bus, (value >> 1) | carry_in);
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::test_support::bus;
    use crate::cpu::{flags, Cpu};

    fn run(cpu: &mut Cpu, bus: &mut crate::bus::CpuBus, code: &[u8]) {
        cpu.pc = 0x0200;
        for (i, &byte) in code.iter().enumerate() {
            bus.write(0x0200 + i as u16, byte);
        }
        cpu.step(bus);
    }

    #[test]
    fn test_asl_accumulator() {
        let mut cpu = Cpu::new();
        let mut bus = bus();
        cpu.a = 0b1100_0001;

        run(&mut cpu, &mut bus, &[0x0A]);
        assert_eq!(cpu.a, 0b1000_0010);
        assert!(cpu.get_flag(flags::CARRY), "bit 7 lands in carry");
        assert!(cpu.get_flag(flags::NEGATIVE));
    }

    #[test]
    fn test_asl_memory() {
        let mut cpu = Cpu::new();
        let mut bus = bus();
        bus.write(0x0030, 0x40);

        run(&mut cpu, &mut bus, &[0x06, 0x30]);
        assert_eq!(bus.read(0x0030), 0x80);
        assert!(!cpu.get_flag(flags::CARRY));
    }

    #[test]
    fn test_memory_shift_leaves_accumulator_alone() {
        let mut cpu = Cpu::new();
        let mut bus = bus();
        cpu.a = 0x77;
        bus.write(0x0030, 0x01);

        run(&mut cpu, &mut bus, &[0x06, 0x30]); // ASL $30
        assert_eq!(cpu.a, 0x77);
        assert_eq!(bus.read(0x0030), 0x02);
    }

    #[test]
    fn test_lsr_sets_carry_from_bit0() {
        let mut cpu = Cpu::new();
        let mut bus = bus();
        cpu.a = 0x01;

        run(&mut cpu, &mut bus, &[0x4A]);
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.get_flag(flags::CARRY));
        assert!(cpu.get_flag(flags::ZERO));
    }

    #[test]
    fn test_rol_through_carry() {
        let mut cpu = Cpu::new();
        let mut bus = bus();
        cpu.a = 0b1000_0000;
        cpu.set_flag(flags::CARRY);

        run(&mut cpu, &mut bus, &[0x2A]);
        assert_eq!(cpu.a, 0b0000_0001, "old carry rotates into bit 0");
        assert!(cpu.get_flag(flags::CARRY), "old bit 7 rotates out");
    }

    #[test]
    fn test_ror_through_carry() {
        let mut cpu = Cpu::new();
        let mut bus = bus();
        cpu.a = 0b0000_0001;
        cpu.set_flag(flags::CARRY);

        run(&mut cpu, &mut bus, &[0x6A]);
        assert_eq!(cpu.a, 0b1000_0000, "old carry rotates into bit 7");
        assert!(cpu.get_flag(flags::CARRY));
        assert!(cpu.get_flag(flags::NEGATIVE));
    }

    #[test]
    fn test_rotate_roundtrip() {
        let mut cpu = Cpu::new();
        let mut bus = bus();
        cpu.a = 0x5A;
        cpu.clear_flag(flags::CARRY);

        run(&mut cpu, &mut bus, &[0x2A]); // ROL
        run(&mut cpu, &mut bus, &[0x6A]); // ROR
        assert_eq!(cpu.a, 0x5A, "ROL then ROR restores the value");
    }
}

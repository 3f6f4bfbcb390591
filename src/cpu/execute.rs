// Instruction execution and trace logging

use crate::bus::CpuBus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::opcodes::{Operation, OPCODE_TABLE};
use crate::cpu::Cpu;

impl Cpu {
    /// Execute the instruction at PC and return its cycle cost
    ///
    /// The command table supplies the base cycles. Resolving the operand
    /// and running the operation each report whether they are sensitive
    /// to a page crossing; one cycle is added only when both are. Taken
    /// branches add their own cycles while they execute.
    pub fn step(&mut self, bus: &mut CpuBus) -> u8 {
        self.opcode = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);

        let info = &OPCODE_TABLE[self.opcode as usize];
        self.pending_cycles = info.cycles;

        let crossed_page = self.resolve_operand(info.mode, bus);
        let pays_for_crossing = self.run_operation(info.operation, bus);
        if crossed_page && pays_for_crossing {
            self.pending_cycles += 1;
        }

        self.cycles = self.cycles.wrapping_add(self.pending_cycles as u64);
        self.pending_cycles
    }

    /// Route the decoded operation to its implementation
    ///
    /// Returns true for the memory-reading operations that pay the
    /// page-crossing cycle.
    fn run_operation(&mut self, operation: Operation, bus: &mut CpuBus) -> bool {
        use Operation::*;
        match operation {
            Adc => self.adc(bus),
            And => self.and(bus),
            Asl => self.asl(bus),
            Bcc => self.bcc(),
            Bcs => self.bcs(),
            Beq => self.beq(),
            Bit => self.bit(bus),
            Bmi => self.bmi(),
            Bne => self.bne(),
            Bpl => self.bpl(),
            Brk => self.brk(bus),
            Bvc => self.bvc(),
            Bvs => self.bvs(),
            Clc => self.clc(),
            Cld => self.cld(),
            Cli => self.cli(),
            Clv => self.clv(),
            Cmp => self.cmp(bus),
            Cpx => self.cpx(bus),
            Cpy => self.cpy(bus),
            Dec => self.dec(bus),
            Dex => self.dex(),
            Dey => self.dey(),
            Eor => self.eor(bus),
            Inc => self.inc(bus),
            Inx => self.inx(),
            Iny => self.iny(),
            Jmp => self.jmp(),
            Jsr => self.jsr(bus),
            Lda => self.lda(bus),
            Ldx => self.ldx(bus),
            Ldy => self.ldy(bus),
            Lsr => self.lsr(bus),
            Nop => self.nop(),
            Ora => self.ora(bus),
            Pha => self.pha(bus),
            Php => self.php(bus),
            Pla => self.pla(bus),
            Plp => self.plp(bus),
            Rol => self.rol(bus),
            Ror => self.ror(bus),
            Rti => self.rti(bus),
            Rts => self.rts(bus),
            Sbc => self.sbc(bus),
            Sec => self.sec(),
            Sed => self.sed(),
            Sei => self.sei(),
            Sta => self.sta(bus),
            Stx => self.stx(bus),
            Sty => self.sty(bus),
            Tax => self.tax(),
            Tay => self.tay(),
            Tsx => self.tsx(),
            Txa => self.txa(),
            Txs => self.txs(),
            Tya => self.tya(),
        }
    }

    /// Generate a nestest-format trace line for the instruction at PC
    ///
    /// Format: `PC  OP OP OP  MNEMONIC OPERAND  A:.. X:.. Y:.. P:.. SP:.. CYC:..`
    pub fn trace(&self, bus: &mut CpuBus) -> String {
        let pc = self.pc;
        let opcode = bus.read(pc);
        let info = &OPCODE_TABLE[opcode as usize];

        let byte1 = opcode;
        let byte2 = if info.bytes >= 2 {
            bus.read(pc.wrapping_add(1))
        } else {
            0
        };
        let byte3 = if info.bytes >= 3 {
            bus.read(pc.wrapping_add(2))
        } else {
            0
        };

        let hex_bytes = match info.bytes {
            2 => format!("{:02X} {:02X}   ", byte1, byte2),
            3 => format!("{:02X} {:02X} {:02X}", byte1, byte2, byte3),
            _ => format!("{:02X}      ", byte1),
        };

        let disassembly = self.render_operand(pc, bus, opcode, byte2, byte3);

        format!(
            "{:04X}  {}  {:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, hex_bytes, disassembly, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }

    /// Render the operand the way the nestest golden log spells it
    fn render_operand(&self, pc: u16, bus: &mut CpuBus, opcode: u8, byte2: u8, byte3: u8) -> String {
        let info = &OPCODE_TABLE[opcode as usize];
        let mnemonic = info.mnemonic;

        match info.mode {
            AddressingMode::Implied => {
                // One-byte shifts operate on A and are spelled that way
                if matches!(
                    info.operation,
                    Operation::Asl | Operation::Lsr | Operation::Rol | Operation::Ror
                ) {
                    format!("{} A", mnemonic)
                } else {
                    mnemonic.to_string()
                }
            }
            AddressingMode::Immediate => format!("{} #${:02X}", mnemonic, byte2),
            AddressingMode::ZeroPage => {
                let value = bus.read(byte2 as u16);
                format!("{} ${:02X} = {:02X}", mnemonic, byte2, value)
            }
            AddressingMode::ZeroPageX => {
                let addr = byte2.wrapping_add(self.x);
                let value = bus.read(addr as u16);
                format!("{} ${:02X},X @ {:02X} = {:02X}", mnemonic, byte2, addr, value)
            }
            AddressingMode::ZeroPageY => {
                let addr = byte2.wrapping_add(self.y);
                let value = bus.read(addr as u16);
                format!("{} ${:02X},Y @ {:02X} = {:02X}", mnemonic, byte2, addr, value)
            }
            AddressingMode::Relative => {
                let target = pc.wrapping_add(2).wrapping_add(byte2 as i8 as u16);
                format!("{} ${:04X}", mnemonic, target)
            }
            AddressingMode::Absolute => {
                let addr = (byte3 as u16) << 8 | byte2 as u16;
                if matches!(info.operation, Operation::Jmp | Operation::Jsr) {
                    format!("{} ${:04X}", mnemonic, addr)
                } else {
                    let value = bus.read(addr);
                    format!("{} ${:04X} = {:02X}", mnemonic, addr, value)
                }
            }
            AddressingMode::AbsoluteX => {
                let base = (byte3 as u16) << 8 | byte2 as u16;
                let addr = base.wrapping_add(self.x as u16);
                let value = bus.read(addr);
                format!("{} ${:04X},X @ {:04X} = {:02X}", mnemonic, base, addr, value)
            }
            AddressingMode::AbsoluteY => {
                let base = (byte3 as u16) << 8 | byte2 as u16;
                let addr = base.wrapping_add(self.y as u16);
                let value = bus.read(addr);
                format!("{} ${:04X},Y @ {:04X} = {:02X}", mnemonic, base, addr, value)
            }
            AddressingMode::Indirect => {
                let pointer = (byte3 as u16) << 8 | byte2 as u16;
                let low = bus.read(pointer);
                let high_source = if pointer & 0x00FF == 0x00FF {
                    pointer & 0xFF00
                } else {
                    pointer.wrapping_add(1)
                };
                let high = bus.read(high_source);
                let target = (high as u16) << 8 | low as u16;
                format!("{} (${:04X}) = {:04X}", mnemonic, pointer, target)
            }
            AddressingMode::IndexedIndirect => {
                let zp = byte2.wrapping_add(self.x);
                let low = bus.read(zp as u16);
                let high = bus.read(zp.wrapping_add(1) as u16);
                let addr = (high as u16) << 8 | low as u16;
                let value = bus.read(addr);
                format!(
                    "{} (${:02X},X) @ {:02X} = {:04X} = {:02X}",
                    mnemonic, byte2, zp, addr, value
                )
            }
            AddressingMode::IndirectIndexed => {
                let low = bus.read(byte2 as u16);
                let high = bus.read(byte2.wrapping_add(1) as u16);
                let base = (high as u16) << 8 | low as u16;
                let addr = base.wrapping_add(self.y as u16);
                let value = bus.read(addr);
                format!(
                    "{} (${:02X}),Y = {:04X} @ {:04X} = {:02X}",
                    mnemonic, byte2, base, addr, value
                )
            }
        }
    }
}

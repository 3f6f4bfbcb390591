// Command table
//
// One entry per opcode byte, pairing the operation with its addressing
// mode, trace mnemonic, instruction length and base cycle count. Extra
// cycles (page crossings, taken branches) are settled during execution,
// not in the table.
//
// Coverage: the full documented set minus decimal arithmetic (the 2A03
// has none), the unofficial NOP family with its real lengths and
// timings, and the $EB SBC alias. Every other undefined byte decodes as
// a two-cycle no-op tagged "???".

use super::addressing::AddressingMode;

/// Every operation the interpreter implements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

/// One command-table row
pub struct OpcodeInfo {
    /// The operation to run
    pub operation: Operation,
    /// How the operand is located
    pub mode: AddressingMode,
    /// Mnemonic for the trace log
    pub mnemonic: &'static str,
    /// Instruction length in bytes
    pub bytes: u8,
    /// Base cycle count
    pub cycles: u8,
}

const fn entry(
    operation: Operation,
    mode: AddressingMode,
    mnemonic: &'static str,
    bytes: u8,
    cycles: u8,
) -> OpcodeInfo {
    OpcodeInfo {
        operation,
        mode,
        mnemonic,
        bytes,
        cycles,
    }
}

/// Undefined byte: decodes as a two-cycle no-op
const fn undefined() -> OpcodeInfo {
    entry(Operation::Nop, AddressingMode::Implied, "???", 1, 2)
}

use AddressingMode::*;
use Operation::*;

/// 256-entry command table indexed by the fetched opcode byte
pub static OPCODE_TABLE: [OpcodeInfo; 256] = [
    // 0x00
    entry(Brk, Implied, "BRK", 1, 7),
    entry(Ora, IndexedIndirect, "ORA", 2, 6),
    undefined(),
    undefined(),
    entry(Nop, ZeroPage, "NOP", 2, 3),
    entry(Ora, ZeroPage, "ORA", 2, 3),
    entry(Asl, ZeroPage, "ASL", 2, 5),
    undefined(),
    entry(Php, Implied, "PHP", 1, 3),
    entry(Ora, Immediate, "ORA", 2, 2),
    entry(Asl, Implied, "ASL", 1, 2),
    undefined(),
    entry(Nop, Absolute, "NOP", 3, 4),
    entry(Ora, Absolute, "ORA", 3, 4),
    entry(Asl, Absolute, "ASL", 3, 6),
    undefined(),
    // 0x10
    entry(Bpl, Relative, "BPL", 2, 2),
    entry(Ora, IndirectIndexed, "ORA", 2, 5),
    undefined(),
    undefined(),
    entry(Nop, ZeroPageX, "NOP", 2, 4),
    entry(Ora, ZeroPageX, "ORA", 2, 4),
    entry(Asl, ZeroPageX, "ASL", 2, 6),
    undefined(),
    entry(Clc, Implied, "CLC", 1, 2),
    entry(Ora, AbsoluteY, "ORA", 3, 4),
    entry(Nop, Implied, "NOP", 1, 2),
    undefined(),
    entry(Nop, AbsoluteX, "NOP", 3, 4),
    entry(Ora, AbsoluteX, "ORA", 3, 4),
    entry(Asl, AbsoluteX, "ASL", 3, 7),
    undefined(),
    // 0x20
    entry(Jsr, Absolute, "JSR", 3, 6),
    entry(And, IndexedIndirect, "AND", 2, 6),
    undefined(),
    undefined(),
    entry(Bit, ZeroPage, "BIT", 2, 3),
    entry(And, ZeroPage, "AND", 2, 3),
    entry(Rol, ZeroPage, "ROL", 2, 5),
    undefined(),
    entry(Plp, Implied, "PLP", 1, 4),
    entry(And, Immediate, "AND", 2, 2),
    entry(Rol, Implied, "ROL", 1, 2),
    undefined(),
    entry(Bit, Absolute, "BIT", 3, 4),
    entry(And, Absolute, "AND", 3, 4),
    entry(Rol, Absolute, "ROL", 3, 6),
    undefined(),
    // 0x30
    entry(Bmi, Relative, "BMI", 2, 2),
    entry(And, IndirectIndexed, "AND", 2, 5),
    undefined(),
    undefined(),
    entry(Nop, ZeroPageX, "NOP", 2, 4),
    entry(And, ZeroPageX, "AND", 2, 4),
    entry(Rol, ZeroPageX, "ROL", 2, 6),
    undefined(),
    entry(Sec, Implied, "SEC", 1, 2),
    entry(And, AbsoluteY, "AND", 3, 4),
    entry(Nop, Implied, "NOP", 1, 2),
    undefined(),
    entry(Nop, AbsoluteX, "NOP", 3, 4),
    entry(And, AbsoluteX, "AND", 3, 4),
    entry(Rol, AbsoluteX, "ROL", 3, 7),
    undefined(),
    // 0x40
    entry(Rti, Implied, "RTI", 1, 6),
    entry(Eor, IndexedIndirect, "EOR", 2, 6),
    undefined(),
    undefined(),
    entry(Nop, ZeroPage, "NOP", 2, 3),
    entry(Eor, ZeroPage, "EOR", 2, 3),
    entry(Lsr, ZeroPage, "LSR", 2, 5),
    undefined(),
    entry(Pha, Implied, "PHA", 1, 3),
    entry(Eor, Immediate, "EOR", 2, 2),
    entry(Lsr, Implied, "LSR", 1, 2),
    undefined(),
    entry(Jmp, Absolute, "JMP", 3, 3),
    entry(Eor, Absolute, "EOR", 3, 4),
    entry(Lsr, Absolute, "LSR", 3, 6),
    undefined(),
    // 0x50
    entry(Bvc, Relative, "BVC", 2, 2),
    entry(Eor, IndirectIndexed, "EOR", 2, 5),
    undefined(),
    undefined(),
    entry(Nop, ZeroPageX, "NOP", 2, 4),
    entry(Eor, ZeroPageX, "EOR", 2, 4),
    entry(Lsr, ZeroPageX, "LSR", 2, 6),
    undefined(),
    entry(Cli, Implied, "CLI", 1, 2),
    entry(Eor, AbsoluteY, "EOR", 3, 4),
    entry(Nop, Implied, "NOP", 1, 2),
    undefined(),
    entry(Nop, AbsoluteX, "NOP", 3, 4),
    entry(Eor, AbsoluteX, "EOR", 3, 4),
    entry(Lsr, AbsoluteX, "LSR", 3, 7),
    undefined(),
    // 0x60
    entry(Rts, Implied, "RTS", 1, 6),
    entry(Adc, IndexedIndirect, "ADC", 2, 6),
    undefined(),
    undefined(),
    entry(Nop, ZeroPage, "NOP", 2, 3),
    entry(Adc, ZeroPage, "ADC", 2, 3),
    entry(Ror, ZeroPage, "ROR", 2, 5),
    undefined(),
    entry(Pla, Implied, "PLA", 1, 4),
    entry(Adc, Immediate, "ADC", 2, 2),
    entry(Ror, Implied, "ROR", 1, 2),
    undefined(),
    entry(Jmp, Indirect, "JMP", 3, 5),
    entry(Adc, Absolute, "ADC", 3, 4),
    entry(Ror, Absolute, "ROR", 3, 6),
    undefined(),
    // 0x70
    entry(Bvs, Relative, "BVS", 2, 2),
    entry(Adc, IndirectIndexed, "ADC", 2, 5),
    undefined(),
    undefined(),
    entry(Nop, ZeroPageX, "NOP", 2, 4),
    entry(Adc, ZeroPageX, "ADC", 2, 4),
    entry(Ror, ZeroPageX, "ROR", 2, 6),
    undefined(),
    entry(Sei, Implied, "SEI", 1, 2),
    entry(Adc, AbsoluteY, "ADC", 3, 4),
    entry(Nop, Implied, "NOP", 1, 2),
    undefined(),
    entry(Nop, AbsoluteX, "NOP", 3, 4),
    entry(Adc, AbsoluteX, "ADC", 3, 4),
    entry(Ror, AbsoluteX, "ROR", 3, 7),
    undefined(),
    // 0x80
    entry(Nop, Immediate, "NOP", 2, 2),
    entry(Sta, IndexedIndirect, "STA", 2, 6),
    entry(Nop, Immediate, "NOP", 2, 2),
    undefined(),
    entry(Sty, ZeroPage, "STY", 2, 3),
    entry(Sta, ZeroPage, "STA", 2, 3),
    entry(Stx, ZeroPage, "STX", 2, 3),
    undefined(),
    entry(Dey, Implied, "DEY", 1, 2),
    entry(Nop, Immediate, "NOP", 2, 2),
    entry(Txa, Implied, "TXA", 1, 2),
    undefined(),
    entry(Sty, Absolute, "STY", 3, 4),
    entry(Sta, Absolute, "STA", 3, 4),
    entry(Stx, Absolute, "STX", 3, 4),
    undefined(),
    // 0x90
    entry(Bcc, Relative, "BCC", 2, 2),
    entry(Sta, IndirectIndexed, "STA", 2, 6),
    undefined(),
    undefined(),
    entry(Sty, ZeroPageX, "STY", 2, 4),
    entry(Sta, ZeroPageX, "STA", 2, 4),
    entry(Stx, ZeroPageY, "STX", 2, 4),
    undefined(),
    entry(Tya, Implied, "TYA", 1, 2),
    entry(Sta, AbsoluteY, "STA", 3, 5),
    entry(Txs, Implied, "TXS", 1, 2),
    undefined(),
    undefined(),
    entry(Sta, AbsoluteX, "STA", 3, 5),
    undefined(),
    undefined(),
    // 0xA0
    entry(Ldy, Immediate, "LDY", 2, 2),
    entry(Lda, IndexedIndirect, "LDA", 2, 6),
    entry(Ldx, Immediate, "LDX", 2, 2),
    undefined(),
    entry(Ldy, ZeroPage, "LDY", 2, 3),
    entry(Lda, ZeroPage, "LDA", 2, 3),
    entry(Ldx, ZeroPage, "LDX", 2, 3),
    undefined(),
    entry(Tay, Implied, "TAY", 1, 2),
    entry(Lda, Immediate, "LDA", 2, 2),
    entry(Tax, Implied, "TAX", 1, 2),
    undefined(),
    entry(Ldy, Absolute, "LDY", 3, 4),
    entry(Lda, Absolute, "LDA", 3, 4),
    entry(Ldx, Absolute, "LDX", 3, 4),
    undefined(),
    // 0xB0
    entry(Bcs, Relative, "BCS", 2, 2),
    entry(Lda, IndirectIndexed, "LDA", 2, 5),
    undefined(),
    undefined(),
    entry(Ldy, ZeroPageX, "LDY", 2, 4),
    entry(Lda, ZeroPageX, "LDA", 2, 4),
    entry(Ldx, ZeroPageY, "LDX", 2, 4),
    undefined(),
    entry(Clv, Implied, "CLV", 1, 2),
    entry(Lda, AbsoluteY, "LDA", 3, 4),
    entry(Tsx, Implied, "TSX", 1, 2),
    undefined(),
    entry(Ldy, AbsoluteX, "LDY", 3, 4),
    entry(Lda, AbsoluteX, "LDA", 3, 4),
    entry(Ldx, AbsoluteY, "LDX", 3, 4),
    undefined(),
    // 0xC0
    entry(Cpy, Immediate, "CPY", 2, 2),
    entry(Cmp, IndexedIndirect, "CMP", 2, 6),
    entry(Nop, Immediate, "NOP", 2, 2),
    undefined(),
    entry(Cpy, ZeroPage, "CPY", 2, 3),
    entry(Cmp, ZeroPage, "CMP", 2, 3),
    entry(Dec, ZeroPage, "DEC", 2, 5),
    undefined(),
    entry(Iny, Implied, "INY", 1, 2),
    entry(Cmp, Immediate, "CMP", 2, 2),
    entry(Dex, Implied, "DEX", 1, 2),
    undefined(),
    entry(Cpy, Absolute, "CPY", 3, 4),
    entry(Cmp, Absolute, "CMP", 3, 4),
    entry(Dec, Absolute, "DEC", 3, 6),
    undefined(),
    // 0xD0
    entry(Bne, Relative, "BNE", 2, 2),
    entry(Cmp, IndirectIndexed, "CMP", 2, 5),
    undefined(),
    undefined(),
    entry(Nop, ZeroPageX, "NOP", 2, 4),
    entry(Cmp, ZeroPageX, "CMP", 2, 4),
    entry(Dec, ZeroPageX, "DEC", 2, 6),
    undefined(),
    entry(Cld, Implied, "CLD", 1, 2),
    entry(Cmp, AbsoluteY, "CMP", 3, 4),
    entry(Nop, Implied, "NOP", 1, 2),
    undefined(),
    entry(Nop, AbsoluteX, "NOP", 3, 4),
    entry(Cmp, AbsoluteX, "CMP", 3, 4),
    entry(Dec, AbsoluteX, "DEC", 3, 7),
    undefined(),
    // 0xE0
    entry(Cpx, Immediate, "CPX", 2, 2),
    entry(Sbc, IndexedIndirect, "SBC", 2, 6),
    entry(Nop, Immediate, "NOP", 2, 2),
    undefined(),
    entry(Cpx, ZeroPage, "CPX", 2, 3),
    entry(Sbc, ZeroPage, "SBC", 2, 3),
    entry(Inc, ZeroPage, "INC", 2, 5),
    undefined(),
    entry(Inx, Implied, "INX", 1, 2),
    entry(Sbc, Immediate, "SBC", 2, 2),
    entry(Nop, Implied, "NOP", 1, 2),
    entry(Sbc, Immediate, "SBC", 2, 2),
    entry(Cpx, Absolute, "CPX", 3, 4),
    entry(Sbc, Absolute, "SBC", 3, 4),
    entry(Inc, Absolute, "INC", 3, 6),
    undefined(),
    // 0xF0
    entry(Beq, Relative, "BEQ", 2, 2),
    entry(Sbc, IndirectIndexed, "SBC", 2, 5),
    undefined(),
    undefined(),
    entry(Nop, ZeroPageX, "NOP", 2, 4),
    entry(Sbc, ZeroPageX, "SBC", 2, 4),
    entry(Inc, ZeroPageX, "INC", 2, 6),
    undefined(),
    entry(Sed, Implied, "SED", 1, 2),
    entry(Sbc, AbsoluteY, "SBC", 3, 4),
    entry(Nop, Implied, "NOP", 1, 2),
    undefined(),
    entry(Nop, AbsoluteX, "NOP", 3, 4),
    entry(Sbc, AbsoluteX, "SBC", 3, 4),
    entry(Inc, AbsoluteX, "INC", 3, 7),
    undefined(),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_full() {
        assert_eq!(OPCODE_TABLE.len(), 256);
    }

    #[test]
    fn test_documented_entries() {
        assert_eq!(OPCODE_TABLE[0x00].operation, Brk);
        assert_eq!(OPCODE_TABLE[0xA9].operation, Lda);
        assert_eq!(OPCODE_TABLE[0xA9].mode, Immediate);
        assert_eq!(OPCODE_TABLE[0x6C].mode, Indirect);
        assert_eq!(OPCODE_TABLE[0x6C].cycles, 5);
        assert_eq!(OPCODE_TABLE[0x91].cycles, 6, "STA ($nn),Y is always 6");
    }

    #[test]
    fn test_accumulator_shifts_decode_as_implied() {
        for index in [0x0Ausize, 0x2A, 0x4A, 0x6A] {
            assert_eq!(OPCODE_TABLE[index].mode, Implied, "opcode {:#04X}", index);
            assert_eq!(OPCODE_TABLE[index].bytes, 1);
            assert_eq!(OPCODE_TABLE[index].cycles, 2);
        }
    }

    #[test]
    fn test_unofficial_nops() {
        assert_eq!(OPCODE_TABLE[0x04].operation, Nop);
        assert_eq!(OPCODE_TABLE[0x04].bytes, 2);
        assert_eq!(OPCODE_TABLE[0x04].cycles, 3);

        assert_eq!(OPCODE_TABLE[0x1C].mode, AbsoluteX);
        assert_eq!(OPCODE_TABLE[0x1C].mnemonic, "NOP");

        assert_eq!(OPCODE_TABLE[0x80].mode, Immediate);
        assert_eq!(OPCODE_TABLE[0x1A].bytes, 1);
    }

    #[test]
    fn test_sbc_alias() {
        assert_eq!(OPCODE_TABLE[0xEB].operation, Sbc);
        assert_eq!(OPCODE_TABLE[0xEB].mode, Immediate);
    }

    #[test]
    fn test_undefined_bytes_cost_two_cycles() {
        for index in [0x02usize, 0x22, 0x42, 0x62, 0x93, 0x9F, 0xFF] {
            assert_eq!(OPCODE_TABLE[index].mnemonic, "???");
            assert_eq!(OPCODE_TABLE[index].operation, Nop);
            assert_eq!(OPCODE_TABLE[index].cycles, 2);
            assert_eq!(OPCODE_TABLE[index].bytes, 1);
        }
    }

    #[test]
    fn test_branches_are_relative() {
        for index in [0x10usize, 0x30, 0x50, 0x70, 0x90, 0xB0, 0xD0, 0xF0] {
            assert_eq!(OPCODE_TABLE[index].mode, Relative, "opcode {:#04X}", index);
            assert_eq!(OPCODE_TABLE[index].cycles, 2);
        }
    }
}

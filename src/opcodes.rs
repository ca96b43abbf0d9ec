//! # Opcode Table and Instruction Decoding
//!
//! A 256-entry table maps every opcode byte to its [`OpcodeMetadata`]:
//! mnemonic, addressing mode, base cycle cost and size. The 151 documented
//! NMOS opcodes are populated; the remaining 105 undocumented slots are
//! `None` and decode to [`ExecutionError::IllegalOpcode`].
//!
//! [`Instruction::decode`] reads an opcode and its inline operand bytes from
//! the bus and produces the immutable descriptor consumed by the
//! instruction handlers.

use crate::addressing::AddressingMode;
use crate::{ExecutionError, MemoryBus};
use std::fmt;

/// Documented 6502 instruction mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

impl Mnemonic {
    /// Upper-case three-letter assembler name.
    #[rustfmt::skip]
    pub const fn as_str(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Brk => "BRK", Bvc => "BVC", Bvs => "BVS", Clc => "CLC", Cld => "CLD",
            Cli => "CLI", Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR", Inc => "INC",
            Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA",
            Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC", Sec => "SEC",
            Sed => "SED", Sei => "SEI", Sta => "STA", Stx => "STX", Sty => "STY",
            Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Tya => "TYA",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a single documented opcode.
///
/// # Examples
///
/// ```
/// use mos6502_acia::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// let lda_imm = OPCODE_TABLE[0xA9].unwrap();
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
///
/// // Undocumented opcodes have no entry
/// assert!(OPCODE_TABLE[0x02].is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Which handler runs this opcode.
    pub mnemonic: Mnemonic,

    /// How the operand bytes are interpreted.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost. Page-crossing and branch-taken penalties are not modelled.
    pub base_cycles: u8,

    /// Total size including the opcode byte (1-3).
    pub size_bytes: u8,
}

use AddressingMode as Am;
use Mnemonic as Mn;

/// (opcode, mnemonic, mode, base cycles) for every documented opcode.
#[rustfmt::skip]
const DOCUMENTED: [(u8, Mnemonic, AddressingMode, u8); 151] = [
    (0x69, Mn::Adc, Am::Immediate, 2), (0x65, Mn::Adc, Am::ZeroPage, 3),
    (0x75, Mn::Adc, Am::ZeroPageX, 4), (0x6D, Mn::Adc, Am::Absolute, 4),
    (0x7D, Mn::Adc, Am::AbsoluteX, 4), (0x79, Mn::Adc, Am::AbsoluteY, 4),
    (0x61, Mn::Adc, Am::IndirectX, 6), (0x71, Mn::Adc, Am::IndirectY, 5),

    (0x29, Mn::And, Am::Immediate, 2), (0x25, Mn::And, Am::ZeroPage, 3),
    (0x35, Mn::And, Am::ZeroPageX, 4), (0x2D, Mn::And, Am::Absolute, 4),
    (0x3D, Mn::And, Am::AbsoluteX, 4), (0x39, Mn::And, Am::AbsoluteY, 4),
    (0x21, Mn::And, Am::IndirectX, 6), (0x31, Mn::And, Am::IndirectY, 5),

    (0x0A, Mn::Asl, Am::Accumulator, 2), (0x06, Mn::Asl, Am::ZeroPage, 5),
    (0x16, Mn::Asl, Am::ZeroPageX, 6), (0x0E, Mn::Asl, Am::Absolute, 6),
    (0x1E, Mn::Asl, Am::AbsoluteX, 7),

    (0x90, Mn::Bcc, Am::Relative, 2), (0xB0, Mn::Bcs, Am::Relative, 2),
    (0xF0, Mn::Beq, Am::Relative, 2), (0x30, Mn::Bmi, Am::Relative, 2),
    (0xD0, Mn::Bne, Am::Relative, 2), (0x10, Mn::Bpl, Am::Relative, 2),
    (0x50, Mn::Bvc, Am::Relative, 2), (0x70, Mn::Bvs, Am::Relative, 2),

    (0x24, Mn::Bit, Am::ZeroPage, 3), (0x2C, Mn::Bit, Am::Absolute, 4),

    (0x00, Mn::Brk, Am::Implicit, 7),

    (0x18, Mn::Clc, Am::Implicit, 2), (0xD8, Mn::Cld, Am::Implicit, 2),
    (0x58, Mn::Cli, Am::Implicit, 2), (0xB8, Mn::Clv, Am::Implicit, 2),

    (0xC9, Mn::Cmp, Am::Immediate, 2), (0xC5, Mn::Cmp, Am::ZeroPage, 3),
    (0xD5, Mn::Cmp, Am::ZeroPageX, 4), (0xCD, Mn::Cmp, Am::Absolute, 4),
    (0xDD, Mn::Cmp, Am::AbsoluteX, 4), (0xD9, Mn::Cmp, Am::AbsoluteY, 4),
    (0xC1, Mn::Cmp, Am::IndirectX, 6), (0xD1, Mn::Cmp, Am::IndirectY, 5),

    (0xE0, Mn::Cpx, Am::Immediate, 2), (0xE4, Mn::Cpx, Am::ZeroPage, 3),
    (0xEC, Mn::Cpx, Am::Absolute, 4),

    (0xC0, Mn::Cpy, Am::Immediate, 2), (0xC4, Mn::Cpy, Am::ZeroPage, 3),
    (0xCC, Mn::Cpy, Am::Absolute, 4),

    (0xC6, Mn::Dec, Am::ZeroPage, 5), (0xD6, Mn::Dec, Am::ZeroPageX, 6),
    (0xCE, Mn::Dec, Am::Absolute, 6), (0xDE, Mn::Dec, Am::AbsoluteX, 7),

    (0xCA, Mn::Dex, Am::Implicit, 2), (0x88, Mn::Dey, Am::Implicit, 2),

    (0x49, Mn::Eor, Am::Immediate, 2), (0x45, Mn::Eor, Am::ZeroPage, 3),
    (0x55, Mn::Eor, Am::ZeroPageX, 4), (0x4D, Mn::Eor, Am::Absolute, 4),
    (0x5D, Mn::Eor, Am::AbsoluteX, 4), (0x59, Mn::Eor, Am::AbsoluteY, 4),
    (0x41, Mn::Eor, Am::IndirectX, 6), (0x51, Mn::Eor, Am::IndirectY, 5),

    (0xE6, Mn::Inc, Am::ZeroPage, 5), (0xF6, Mn::Inc, Am::ZeroPageX, 6),
    (0xEE, Mn::Inc, Am::Absolute, 6), (0xFE, Mn::Inc, Am::AbsoluteX, 7),

    (0xE8, Mn::Inx, Am::Implicit, 2), (0xC8, Mn::Iny, Am::Implicit, 2),

    (0x4C, Mn::Jmp, Am::Absolute, 3), (0x6C, Mn::Jmp, Am::Indirect, 5),
    (0x20, Mn::Jsr, Am::Absolute, 6),

    (0xA9, Mn::Lda, Am::Immediate, 2), (0xA5, Mn::Lda, Am::ZeroPage, 3),
    (0xB5, Mn::Lda, Am::ZeroPageX, 4), (0xAD, Mn::Lda, Am::Absolute, 4),
    (0xBD, Mn::Lda, Am::AbsoluteX, 4), (0xB9, Mn::Lda, Am::AbsoluteY, 4),
    (0xA1, Mn::Lda, Am::IndirectX, 6), (0xB1, Mn::Lda, Am::IndirectY, 5),

    (0xA2, Mn::Ldx, Am::Immediate, 2), (0xA6, Mn::Ldx, Am::ZeroPage, 3),
    (0xB6, Mn::Ldx, Am::ZeroPageY, 4), (0xAE, Mn::Ldx, Am::Absolute, 4),
    (0xBE, Mn::Ldx, Am::AbsoluteY, 4),

    (0xA0, Mn::Ldy, Am::Immediate, 2), (0xA4, Mn::Ldy, Am::ZeroPage, 3),
    (0xB4, Mn::Ldy, Am::ZeroPageX, 4), (0xAC, Mn::Ldy, Am::Absolute, 4),
    (0xBC, Mn::Ldy, Am::AbsoluteX, 4),

    (0x4A, Mn::Lsr, Am::Accumulator, 2), (0x46, Mn::Lsr, Am::ZeroPage, 5),
    (0x56, Mn::Lsr, Am::ZeroPageX, 6), (0x4E, Mn::Lsr, Am::Absolute, 6),
    (0x5E, Mn::Lsr, Am::AbsoluteX, 7),

    (0xEA, Mn::Nop, Am::Implicit, 2),

    (0x09, Mn::Ora, Am::Immediate, 2), (0x05, Mn::Ora, Am::ZeroPage, 3),
    (0x15, Mn::Ora, Am::ZeroPageX, 4), (0x0D, Mn::Ora, Am::Absolute, 4),
    (0x1D, Mn::Ora, Am::AbsoluteX, 4), (0x19, Mn::Ora, Am::AbsoluteY, 4),
    (0x01, Mn::Ora, Am::IndirectX, 6), (0x11, Mn::Ora, Am::IndirectY, 5),

    (0x48, Mn::Pha, Am::Implicit, 3), (0x08, Mn::Php, Am::Implicit, 3),
    (0x68, Mn::Pla, Am::Implicit, 4), (0x28, Mn::Plp, Am::Implicit, 4),

    (0x2A, Mn::Rol, Am::Accumulator, 2), (0x26, Mn::Rol, Am::ZeroPage, 5),
    (0x36, Mn::Rol, Am::ZeroPageX, 6), (0x2E, Mn::Rol, Am::Absolute, 6),
    (0x3E, Mn::Rol, Am::AbsoluteX, 7),

    (0x6A, Mn::Ror, Am::Accumulator, 2), (0x66, Mn::Ror, Am::ZeroPage, 5),
    (0x76, Mn::Ror, Am::ZeroPageX, 6), (0x6E, Mn::Ror, Am::Absolute, 6),
    (0x7E, Mn::Ror, Am::AbsoluteX, 7),

    (0x40, Mn::Rti, Am::Implicit, 6), (0x60, Mn::Rts, Am::Implicit, 6),

    (0xE9, Mn::Sbc, Am::Immediate, 2), (0xE5, Mn::Sbc, Am::ZeroPage, 3),
    (0xF5, Mn::Sbc, Am::ZeroPageX, 4), (0xED, Mn::Sbc, Am::Absolute, 4),
    (0xFD, Mn::Sbc, Am::AbsoluteX, 4), (0xF9, Mn::Sbc, Am::AbsoluteY, 4),
    (0xE1, Mn::Sbc, Am::IndirectX, 6), (0xF1, Mn::Sbc, Am::IndirectY, 5),

    (0x38, Mn::Sec, Am::Implicit, 2), (0xF8, Mn::Sed, Am::Implicit, 2),
    (0x78, Mn::Sei, Am::Implicit, 2),

    (0x85, Mn::Sta, Am::ZeroPage, 3), (0x95, Mn::Sta, Am::ZeroPageX, 4),
    (0x8D, Mn::Sta, Am::Absolute, 4), (0x9D, Mn::Sta, Am::AbsoluteX, 5),
    (0x99, Mn::Sta, Am::AbsoluteY, 5), (0x81, Mn::Sta, Am::IndirectX, 6),
    (0x91, Mn::Sta, Am::IndirectY, 6),

    (0x86, Mn::Stx, Am::ZeroPage, 3), (0x96, Mn::Stx, Am::ZeroPageY, 4),
    (0x8E, Mn::Stx, Am::Absolute, 4),

    (0x84, Mn::Sty, Am::ZeroPage, 3), (0x94, Mn::Sty, Am::ZeroPageX, 4),
    (0x8C, Mn::Sty, Am::Absolute, 4),

    (0xAA, Mn::Tax, Am::Implicit, 2), (0xA8, Mn::Tay, Am::Implicit, 2),
    (0xBA, Mn::Tsx, Am::Implicit, 2), (0x8A, Mn::Txa, Am::Implicit, 2),
    (0x9A, Mn::Txs, Am::Implicit, 2), (0x98, Mn::Tya, Am::Implicit, 2),
];

const fn build_table() -> [Option<OpcodeMetadata>; 256] {
    let mut table: [Option<OpcodeMetadata>; 256] = [None; 256];
    let mut i = 0;
    while i < DOCUMENTED.len() {
        let (opcode, mnemonic, addressing_mode, base_cycles) = DOCUMENTED[i];
        table[opcode as usize] = Some(OpcodeMetadata {
            mnemonic,
            addressing_mode,
            base_cycles,
            size_bytes: 1 + addressing_mode.operand_len(),
        });
        i += 1;
    }
    table
}

/// Opcode metadata indexed by opcode byte. `None` marks undocumented opcodes.
pub const OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_table();

/// A decoded instruction: what to run, how to address it, and its inline operand.
///
/// Handlers only ever see `&Instruction`, so a descriptor cannot change while
/// it executes.
///
/// # Examples
///
/// ```
/// use mos6502_acia::{AddressingMode, FlatMemory, Instruction, MemoryBus, Mnemonic};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x0200, 0xAD); // LDA $1234
/// mem.write(0x0201, 0x34);
/// mem.write(0x0202, 0x12);
///
/// let instr = Instruction::decode(&mem, 0x0200).unwrap();
/// assert_eq!(instr.mnemonic, Mnemonic::Lda);
/// assert_eq!(instr.mode, AddressingMode::Absolute);
/// assert_eq!(instr.operand, 0x1234);
/// assert_eq!(instr.size, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Raw opcode byte (0 for descriptors built with [`Instruction::new`]).
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Inline operand bytes, little-endian. One-byte operands sit in the low byte.
    pub operand: u16,
    /// Size in bytes including the opcode.
    pub size: u8,
    pub base_cycles: u8,
}

impl Instruction {
    /// Builds a descriptor directly, without going through the opcode table.
    ///
    /// Useful when driving the instruction handlers from an external decoder.
    pub fn new(mnemonic: Mnemonic, mode: AddressingMode, operand: u16) -> Self {
        Self {
            opcode: 0,
            mnemonic,
            mode,
            operand,
            size: 1 + mode.operand_len(),
            base_cycles: 0,
        }
    }

    /// Decodes the instruction at `addr`.
    ///
    /// Returns [`ExecutionError::IllegalOpcode`] for undocumented opcodes.
    pub fn decode<M: MemoryBus + ?Sized>(bus: &M, addr: u16) -> Result<Self, ExecutionError> {
        let opcode = bus.read(addr);
        let metadata = OPCODE_TABLE[opcode as usize].ok_or(ExecutionError::IllegalOpcode {
            opcode,
            address: addr,
        })?;

        let operand = match metadata.addressing_mode.operand_len() {
            0 => 0,
            1 => bus.read(addr.wrapping_add(1)) as u16,
            _ => {
                let lo = bus.read(addr.wrapping_add(1)) as u16;
                let hi = bus.read(addr.wrapping_add(2)) as u16;
                (hi << 8) | lo
            }
        };

        Ok(Self {
            opcode,
            mnemonic: metadata.mnemonic,
            mode: metadata.addressing_mode,
            operand,
            size: metadata.size_bytes,
            base_cycles: metadata.base_cycles,
        })
    }

    /// The low operand byte (immediate value, zero-page address, branch offset).
    #[inline]
    pub fn operand_byte(&self) -> u8 {
        self.operand as u8
    }
}

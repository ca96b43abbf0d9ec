//! # Addressing Modes
//!
//! The 13 addressing modes of the NMOS 6502. The mode tells the resolver on
//! [`CPU`](crate::CPU) how to turn an instruction's inline operand bytes into
//! either an 8-bit value ([`CPU::resolve_operand`](crate::CPU::resolve_operand))
//! or a 16-bit effective address ([`CPU::memory_address`](crate::CPU::memory_address)).

/// 6502 addressing mode.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset from the address of the next instruction.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through a 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// True for modes that resolve to a memory location.
    pub const fn targets_memory(self) -> bool {
        !matches!(
            self,
            AddressingMode::Implicit | AddressingMode::Accumulator | AddressingMode::Immediate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_len() {
        assert_eq!(AddressingMode::Implicit.operand_len(), 0);
        assert_eq!(AddressingMode::Accumulator.operand_len(), 0);
        assert_eq!(AddressingMode::Immediate.operand_len(), 1);
        assert_eq!(AddressingMode::IndirectY.operand_len(), 1);
        assert_eq!(AddressingMode::Indirect.operand_len(), 2);
        assert_eq!(AddressingMode::AbsoluteX.operand_len(), 2);
    }

    #[test]
    fn test_targets_memory() {
        assert!(!AddressingMode::Accumulator.targets_memory());
        assert!(!AddressingMode::Immediate.targets_memory());
        assert!(AddressingMode::ZeroPage.targets_memory());
        assert!(AddressingMode::IndirectX.targets_memory());
    }
}

//! # 6502 Instruction Implementations
//!
//! Every instruction is a standalone handler taking the CPU and the decoded
//! [`Instruction`]. By the time a handler runs, PC already points at the next
//! instruction and the base cycle cost has been charged.
//!
//! [`handler_for`] is the single mapping from mnemonic to handler.
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP
//! - **stack**: PHA, PHP, PLA, PLP
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS

use crate::{Instruction, MemoryBus, Mnemonic, CPU};

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

/// Signature shared by all instruction handlers.
pub(crate) type Handler<M> = fn(&mut CPU<M>, &Instruction);

/// Returns the handler that implements `mnemonic`.
pub(crate) fn handler_for<M: MemoryBus>(mnemonic: Mnemonic) -> Handler<M> {
    match mnemonic {
        Mnemonic::Adc => alu::execute_adc,
        Mnemonic::Sbc => alu::execute_sbc,
        Mnemonic::And => alu::execute_and,
        Mnemonic::Ora => alu::execute_ora,
        Mnemonic::Eor => alu::execute_eor,
        Mnemonic::Cmp => alu::execute_cmp,
        Mnemonic::Cpx => alu::execute_cpx,
        Mnemonic::Cpy => alu::execute_cpy,
        Mnemonic::Bit => alu::execute_bit,

        Mnemonic::Bcc => branches::execute_bcc,
        Mnemonic::Bcs => branches::execute_bcs,
        Mnemonic::Beq => branches::execute_beq,
        Mnemonic::Bne => branches::execute_bne,
        Mnemonic::Bmi => branches::execute_bmi,
        Mnemonic::Bpl => branches::execute_bpl,
        Mnemonic::Bvc => branches::execute_bvc,
        Mnemonic::Bvs => branches::execute_bvs,

        Mnemonic::Asl => shifts::execute_asl,
        Mnemonic::Lsr => shifts::execute_lsr,
        Mnemonic::Rol => shifts::execute_rol,
        Mnemonic::Ror => shifts::execute_ror,

        Mnemonic::Lda => load_store::execute_lda,
        Mnemonic::Ldx => load_store::execute_ldx,
        Mnemonic::Ldy => load_store::execute_ldy,
        Mnemonic::Sta => load_store::execute_sta,
        Mnemonic::Stx => load_store::execute_stx,
        Mnemonic::Sty => load_store::execute_sty,

        Mnemonic::Inc => inc_dec::execute_inc,
        Mnemonic::Dec => inc_dec::execute_dec,
        Mnemonic::Inx => inc_dec::execute_inx,
        Mnemonic::Iny => inc_dec::execute_iny,
        Mnemonic::Dex => inc_dec::execute_dex,
        Mnemonic::Dey => inc_dec::execute_dey,

        Mnemonic::Jmp => control::execute_jmp,
        Mnemonic::Jsr => control::execute_jsr,
        Mnemonic::Rts => control::execute_rts,
        Mnemonic::Rti => control::execute_rti,
        Mnemonic::Brk => control::execute_brk,
        Mnemonic::Nop => control::execute_nop,

        Mnemonic::Pha => stack::execute_pha,
        Mnemonic::Php => stack::execute_php,
        Mnemonic::Pla => stack::execute_pla,
        Mnemonic::Plp => stack::execute_plp,

        Mnemonic::Clc => flags::execute_clc,
        Mnemonic::Sec => flags::execute_sec,
        Mnemonic::Cli => flags::execute_cli,
        Mnemonic::Sei => flags::execute_sei,
        Mnemonic::Cld => flags::execute_cld,
        Mnemonic::Sed => flags::execute_sed,
        Mnemonic::Clv => flags::execute_clv,

        Mnemonic::Tax => transfer::execute_tax,
        Mnemonic::Tay => transfer::execute_tay,
        Mnemonic::Txa => transfer::execute_txa,
        Mnemonic::Tya => transfer::execute_tya,
        Mnemonic::Tsx => transfer::execute_tsx,
        Mnemonic::Txs => transfer::execute_txs,
    }
}

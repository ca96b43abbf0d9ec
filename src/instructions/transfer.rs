//! # Register Transfer Instructions
//!
//! - TAX, TAY, TXA, TYA, TSX: copy and update Z and N
//! - TXS: copy X into SP without touching flags

use crate::{Instruction, MemoryBus, CPU};

pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.x = cpu.a;
    cpu.status.set_zn(cpu.x);
}

pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.y = cpu.a;
    cpu.status.set_zn(cpu.y);
}

pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.a = cpu.x;
    cpu.status.set_zn(cpu.a);
}

pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.a = cpu.y;
    cpu.status.set_zn(cpu.a);
}

pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.x = cpu.sp;
    cpu.status.set_zn(cpu.x);
}

/// TXS is the only transfer that leaves the flags alone.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.sp = cpu.x;
}

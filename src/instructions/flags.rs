//! # Status Flag Manipulation Instructions
//!
//! - CLC / SEC: Carry
//! - CLI / SEI: Interrupt disable
//! - CLD / SED: Decimal mode
//! - CLV: Overflow (there is no SEV)

use crate::{Instruction, MemoryBus, CPU};

pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.status.c = false;
}

pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.status.c = true;
}

pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.status.i = false;
}

pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.status.i = true;
}

pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.status.d = false;
}

pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.status.d = true;
}

pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.status.v = false;
}

//! # Branch Instructions
//!
//! Conditional branches on a single status flag:
//! - BCC / BCS: Carry clear / set
//! - BNE / BEQ: Zero clear / set
//! - BPL / BMI: Negative clear / set
//! - BVC / BVS: Overflow clear / set
//!
//! All branches use relative addressing: a signed 8-bit offset from the
//! address of the next instruction. No flags are affected.

use crate::{Instruction, MemoryBus, CPU};

/// Moves PC to the branch target when `condition` holds.
fn branch_if<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction, condition: bool) {
    if condition {
        cpu.pc = cpu.memory_address(instr);
    }
}

pub(crate) fn execute_bcc<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let taken = !cpu.status.c;
    branch_if(cpu, instr, taken);
}

pub(crate) fn execute_bcs<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let taken = cpu.status.c;
    branch_if(cpu, instr, taken);
}

pub(crate) fn execute_bne<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let taken = !cpu.status.z;
    branch_if(cpu, instr, taken);
}

pub(crate) fn execute_beq<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let taken = cpu.status.z;
    branch_if(cpu, instr, taken);
}

pub(crate) fn execute_bpl<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let taken = !cpu.status.n;
    branch_if(cpu, instr, taken);
}

pub(crate) fn execute_bmi<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let taken = cpu.status.n;
    branch_if(cpu, instr, taken);
}

pub(crate) fn execute_bvc<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let taken = !cpu.status.v;
    branch_if(cpu, instr, taken);
}

pub(crate) fn execute_bvs<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let taken = cpu.status.v;
    branch_if(cpu, instr, taken);
}

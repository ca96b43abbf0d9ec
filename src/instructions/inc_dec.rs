//! # Increment and Decrement Instructions
//!
//! - INC, DEC: read-modify-write memory
//! - INX, INY, DEX, DEY: registers
//!
//! All wrap at 8 bits and update only Z and N.

use crate::{Instruction, MemoryBus, CPU};

/// Adds `delta` to the byte at the effective address.
fn step_memory<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction, delta: i8) {
    let addr = cpu.memory_address(instr);
    let result = cpu.memory.read(addr).wrapping_add_signed(delta);
    cpu.memory.write(addr, result);
    cpu.status.set_zn(result);
}

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    step_memory(cpu, instr, 1);
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    step_memory(cpu, instr, -1);
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.status.set_zn(cpu.x);
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.status.set_zn(cpu.y);
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.status.set_zn(cpu.x);
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.status.set_zn(cpu.y);
}

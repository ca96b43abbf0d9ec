//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works on the accumulator in Accumulator mode and read-modify-writes
//! memory otherwise. C receives the bit shifted out, Z and N follow the
//! result, and V is never touched.

use crate::{AddressingMode, Instruction, MemoryBus, CPU};

/// Applies `op` to the instruction's target and stores the result back.
///
/// `op` receives the old value and the incoming carry and returns the new
/// value and the outgoing carry.
fn read_modify_write<M: MemoryBus>(
    cpu: &mut CPU<M>,
    instr: &Instruction,
    op: fn(u8, bool) -> (u8, bool),
) {
    let carry_in = cpu.status.c;

    let result = if instr.mode == AddressingMode::Accumulator {
        let (result, carry_out) = op(cpu.a, carry_in);
        cpu.a = result;
        cpu.status.c = carry_out;
        result
    } else {
        let addr = cpu.memory_address(instr);
        let (result, carry_out) = op(cpu.memory.read(addr), carry_in);
        cpu.memory.write(addr, result);
        cpu.status.c = carry_out;
        result
    };

    cpu.status.set_zn(result);
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    read_modify_write(cpu, instr, |value, _| (value << 1, value & 0x80 != 0));
}

/// Executes the LSR (Logical Shift Right) instruction. N is always cleared.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    read_modify_write(cpu, instr, |value, _| (value >> 1, value & 0x01 != 0));
}

/// Executes the ROL (Rotate Left) instruction. Old carry enters bit 0.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    read_modify_write(cpu, instr, |value, carry| {
        ((value << 1) | u8::from(carry), value & 0x80 != 0)
    });
}

/// Executes the ROR (Rotate Right) instruction. Old carry enters bit 7.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    read_modify_write(cpu, instr, |value, carry| {
        ((value >> 1) | (u8::from(carry) << 7), value & 0x01 != 0)
    });
}

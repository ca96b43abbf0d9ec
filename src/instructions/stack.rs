//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA / PLA: Push / pull accumulator
//! - PHP / PLP: Push / pull processor status
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! PHP pushes the status with B and bit 5 set; PLP (and RTI) discard both.

use crate::status::FLAG_B;
use crate::{Instruction, MemoryBus, Status, CPU};

/// Pulls a status byte from the stack. B does not exist as a latch in
/// hardware, so the pulled value of B is dropped.
pub(crate) fn pull_status<M: MemoryBus>(cpu: &mut CPU<M>) {
    let byte = cpu.pop();
    cpu.status = Status {
        b: false,
        ..Status::from_byte(byte)
    };
}

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.push(cpu.a);
}

/// Executes the PHP (Push Processor Status) instruction.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.push(cpu.status.to_byte() | FLAG_B);
}

/// Executes the PLA (Pull Accumulator) instruction. Updates Z and N.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.a = cpu.pop();
    cpu.status.set_zn(cpu.a);
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    pull_status(cpu);
}

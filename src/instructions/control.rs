//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump (absolute or indirect)
//! - JSR / RTS: Subroutine call and return
//! - BRK / RTI: Software interrupt and return from interrupt
//! - NOP: No operation
//!
//! JSR pushes the address of its own last byte (next instruction - 1) and RTS
//! adds one after popping. BRK sets B and enters the shared interrupt
//! sequence with a return address one past the next instruction, so the
//! byte after BRK is skipped on RTI.

use super::stack::pull_status;
use crate::cpu::IRQ_VECTOR;
use crate::{Instruction, MemoryBus, CPU};

/// Executes the JMP (Jump) instruction.
///
/// Sets PC to the effective address. The Indirect form reproduces the NMOS
/// page-wrap bug through the addressing resolver.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    cpu.pc = cpu.memory_address(instr);
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes (PC - 1) high byte then low byte, then jumps.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let return_addr = cpu.pc.wrapping_sub(1);
    cpu.push_word(return_addr);
    cpu.pc = cpu.memory_address(instr);
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    cpu.pc = cpu.pop_word().wrapping_add(1);
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// Flags affected:
/// - B: Set
/// - I: Set
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    let return_addr = cpu.pc.wrapping_add(1);
    cpu.interrupt(return_addr, IRQ_VECTOR, true);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register, then PC (low, high). Unlike RTS there is no
/// +1 adjustment.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>, _instr: &Instruction) {
    pull_status(cpu);
    cpu.pc = cpu.pop_word();
}

/// Executes the NOP (No Operation) instruction.
pub(crate) fn execute_nop<M: MemoryBus>(_cpu: &mut CPU<M>, _instr: &Instruction) {}

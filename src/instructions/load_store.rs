//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: load the resolved operand, update Z and N
//! - STA, STX, STY: write the register to the effective address, no flags

use crate::{Instruction, MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    cpu.a = cpu.resolve_operand(instr);
    cpu.status.set_zn(cpu.a);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    cpu.x = cpu.resolve_operand(instr);
    cpu.status.set_zn(cpu.x);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    cpu.y = cpu.resolve_operand(instr);
    cpu.status.set_zn(cpu.y);
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let addr = cpu.memory_address(instr);
    cpu.memory.write(addr, cpu.a);
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let addr = cpu.memory_address(instr);
    cpu.memory.write(addr, cpu.x);
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let addr = cpu.memory_address(instr);
    cpu.memory.write(addr, cpu.y);
}

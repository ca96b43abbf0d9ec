//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry (binary and BCD)
//! - SBC: Subtract with Carry (binary and BCD)
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Register comparisons
//! - BIT: Bit test
//!
//! ## Decimal mode
//!
//! With D set, ADC and SBC operate on packed BCD. N and V are always cleared
//! in decimal mode, as on the NMOS part used here; only C and Z carry meaning.
//!
//! ## Binary subtraction
//!
//! Binary SBC is ADC of the complemented operand: `A + !M + C`. This is the
//! hardware's own subtraction path, so carry acts as "no borrow".

use crate::{Instruction, MemoryBus, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the resolved operand plus the carry flag to the accumulator.
///
/// Flags affected:
/// - Binary: C, Z, V, N
/// - Decimal: C, Z; N and V cleared
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let value = cpu.resolve_operand(instr);
    let carry_in = cpu.status.carry_bit();

    if cpu.status.d {
        adc_decimal(cpu, value, carry_in);
    } else {
        adc_binary(cpu, value, carry_in);
    }
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Subtracts the resolved operand and the inverted carry from the accumulator.
///
/// Flags affected:
/// - Binary: C (clear on borrow), Z, V, N
/// - Decimal: C, Z; N and V cleared
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let value = cpu.resolve_operand(instr);
    let carry_in = cpu.status.carry_bit();

    if cpu.status.d {
        sbc_decimal(cpu, value, carry_in);
    } else {
        adc_binary(cpu, !value, carry_in);
    }
}

/// 8-bit binary addition shared by ADC and SBC.
fn adc_binary<M: MemoryBus>(cpu: &mut CPU<M>, value: u8, carry_in: u8) {
    let a = cpu.a;

    let result16 = a as u16 + value as u16 + carry_in as u16;
    let result = result16 as u8;

    // Carry out of bit 7
    cpu.status.c = result16 & 0x100 != 0;

    // Both inputs share a sign the result does not have
    cpu.status.v = (a ^ result) & (value ^ result) & 0x80 != 0;

    cpu.a = result;
    cpu.status.set_zn(result);
}

/// Packed BCD addition.
fn adc_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8, carry_in: u8) {
    let a = cpu.a;

    let mut low = (a & 0x0F) + (value & 0x0F) + carry_in;
    if low > 9 {
        low += 6;
    }
    let nibble_carry = u8::from(low > 15);

    let mut high = (a >> 4) + (value >> 4) + nibble_carry;
    if high > 9 {
        high += 6;
    }

    let result = (low & 0x0F) | ((high << 4) & 0xF0);

    cpu.status.c = high > 15;
    cpu.status.z = result == 0;
    cpu.status.n = false;
    cpu.status.v = false;

    cpu.a = result;
}

/// Packed BCD subtraction. Nibble arithmetic wraps in 8 bits and bit 4
/// signals the borrow out of each nibble.
fn sbc_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8, carry_in: u8) {
    let a = cpu.a;
    let borrow = 1 - carry_in;

    let mut low = (a & 0x0F).wrapping_sub(value & 0x0F).wrapping_sub(borrow);
    if low & 0x10 != 0 {
        low = low.wrapping_sub(6);
    }
    let nibble_borrow = u8::from(low & 0x10 != 0);

    let mut high = (a >> 4)
        .wrapping_sub(value >> 4)
        .wrapping_sub(nibble_borrow);
    if high & 0x10 != 0 {
        high = high.wrapping_sub(6);
    }

    let result = (low & 0x0F) | (high << 4);

    // Any borrow out of the high nibble leaves it >= 0xE0 after the -6 fixup
    cpu.status.c = high < 15;
    cpu.status.z = result == 0;
    cpu.status.n = false;
    cpu.status.v = false;

    cpu.a = result;
}

/// Executes the AND (Logical AND) instruction. Updates Z and N.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let value = cpu.resolve_operand(instr);
    cpu.a &= value;
    cpu.status.set_zn(cpu.a);
}

/// Executes the ORA (Logical Inclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let value = cpu.resolve_operand(instr);
    cpu.a |= value;
    cpu.status.set_zn(cpu.a);
}

/// Executes the EOR (Exclusive OR) instruction. Updates Z and N.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let value = cpu.resolve_operand(instr);
    cpu.a ^= value;
    cpu.status.set_zn(cpu.a);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let value = cpu.resolve_operand(instr);
    let register = cpu.a;
    compare(cpu, register, value);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let value = cpu.resolve_operand(instr);
    let register = cpu.x;
    compare(cpu, register, value);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let value = cpu.resolve_operand(instr);
    let register = cpu.y;
    compare(cpu, register, value);
}

/// C = register >= value (unsigned); Z and N from the wrapped difference.
/// V is not touched.
fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, value: u8) {
    cpu.status.c = register >= value;
    cpu.status.set_zn(register.wrapping_sub(value));
}

/// Executes the BIT (Bit Test) instruction.
///
/// N and V are copied from bits 7 and 6 of the operand; Z is set when
/// `A & operand` is zero. The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, instr: &Instruction) {
    let value = cpu.resolve_operand(instr);
    cpu.status.n = value & 0x80 != 0;
    cpu.status.v = value & 0x40 != 0;
    cpu.status.z = cpu.a & value == 0;
}

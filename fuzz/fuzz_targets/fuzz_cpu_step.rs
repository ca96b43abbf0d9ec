//! Executes one instruction from an arbitrary CPU state and memory image.
//!
//! Illegal opcodes must surface as errors with PC untouched; everything else
//! must run without panicking and advance the cycle counter.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mos6502_acia::{FlatMemory, MemoryBus, CPU, OPCODE_TABLE};

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instruction + operands)
    instruction_bytes: [u8; 3],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Mapped at 0x4000 for absolute modes
    main_memory: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0x90);

    memory.load(0x8000, &input.memory.instruction_bytes);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);

    let mut cpu = CPU::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    let opcode = input.memory.instruction_bytes[0];
    let result = cpu.step();

    match OPCODE_TABLE[opcode as usize] {
        Some(meta) => {
            assert!(result.is_ok());
            assert_eq!(cpu.cycles(), meta.base_cycles as u64);
        }
        None => {
            assert!(result.is_err());
            assert_eq!(cpu.pc(), 0x8000);
            assert_eq!(cpu.cycles(), 0);
        }
    }
    // Bit 5 always reads as set
    assert_eq!(cpu.status() & 0x20, 0x20);
});

//! Tests for the fetch-decode-execute loop: cycle budgets and illegal opcodes.

use mos6502_acia::{ExecutionError, FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_run_for_cycles_exact() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xEA; 16]); // NOPs

    let consumed = cpu.run_for_cycles(10).unwrap();

    assert_eq!(consumed, 10);
    assert_eq!(cpu.pc(), 0x8005);
}

#[test]
fn test_run_for_cycles_overshoots_by_partial_instruction() {
    let mut cpu = setup_cpu();
    // JSR $9000 (6 cycles) with a 4-cycle budget
    cpu.memory_mut().load(0x8000, &[0x20, 0x00, 0x90]);
    cpu.memory_mut().write(0x9000, 0xEA);

    let consumed = cpu.run_for_cycles(4).unwrap();

    assert_eq!(consumed, 6);
    assert_eq!(cpu.pc(), 0x9000);
}

#[test]
fn test_illegal_opcode_reported() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xEA, 0x02]); // NOP ; KIL

    cpu.step().unwrap();
    let err = cpu.step().unwrap_err();

    assert_eq!(
        err,
        ExecutionError::IllegalOpcode {
            opcode: 0x02,
            address: 0x8001
        }
    );
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.cycles(), 2);
    assert_eq!(err.to_string(), "illegal opcode 0x02 at 0x8001");
}

#[test]
fn test_run_for_cycles_stops_on_illegal_opcode() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xEA, 0xEA, 0xFF]);

    let result = cpu.run_for_cycles(100);

    assert!(matches!(
        result,
        Err(ExecutionError::IllegalOpcode { opcode: 0xFF, .. })
    ));
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_pc_wraps_at_top_of_memory() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0xFFFF, 0xE8); // INX
    cpu.memory_mut().write(0x0000, 0xE8);
    cpu.set_pc(0xFFFF);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0000);
    cpu.step().unwrap();
    assert_eq!(cpu.x(), 2);
}

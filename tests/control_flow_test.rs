//! Tests for jumps, subroutine calls and branches.

use mos6502_acia::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

// ========== JMP ==========

#[test]
fn test_jmp_absolute() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x4C, 0x34, 0x12]);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_jmp_indirect() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x6C, 0x00, 0x02]); // JMP ($0200)
    cpu.memory_mut().load(0x0200, &[0xCD, 0xAB]);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0xABCD);
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_jmp_indirect_page_boundary_bug() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x6C, 0xFF, 0x02]); // JMP ($02FF)
    cpu.memory_mut().write(0x02FF, 0x34);
    cpu.memory_mut().write(0x0200, 0x12); // high byte comes from here
    cpu.memory_mut().write(0x0300, 0x56); // not from here

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1234);
}

// ========== JSR / RTS ==========

#[test]
fn test_jsr_pushes_return_address() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x20, 0x00, 0x90]); // JSR $9000

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFB);
    assert_eq!(cpu.memory().read(0x01FD), 0x80);
    assert_eq!(cpu.memory().read(0x01FC), 0x02);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_jsr_rts_roundtrip() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x20, 0x00, 0x90, 0xEA]); // JSR $9000 ; NOP
    cpu.memory_mut().load(0x9000, &[0xA9, 0x07, 0x60]); // LDA #7 ; RTS

    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.a(), 0x07);
    assert_eq!(cpu.cycles(), 6 + 2 + 6);
}

#[test]
fn test_nested_subroutines() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x20, 0x00, 0x90]); // JSR $9000
    cpu.memory_mut().load(0x9000, &[0x20, 0x00, 0xA0, 0x60]); // JSR $A000 ; RTS
    cpu.memory_mut().load(0xA000, &[0xE8, 0x60]); // INX ; RTS

    for _ in 0..5 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.x(), 0x01);
    assert_eq!(cpu.sp(), 0xFD);
}

// ========== Branches ==========

#[test]
fn test_bne_taken_forward() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xD0, 0x10]); // BNE +16
    cpu.set_flag_z(false);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8012);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_bne_not_taken() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xD0, 0x10]);
    cpu.set_flag_z(true);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_beq_taken_backward() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xF0, 0xFC]); // BEQ -4
    cpu.set_flag_z(true);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x7FFE);
}

#[test]
fn test_each_branch_condition() {
    // (opcode, flag setter, flag value that takes the branch)
    let cases: [(u8, fn(&mut CPU<FlatMemory>, bool), bool); 8] = [
        (0x90, CPU::set_flag_c, false), // BCC
        (0xB0, CPU::set_flag_c, true),  // BCS
        (0xD0, CPU::set_flag_z, false), // BNE
        (0xF0, CPU::set_flag_z, true),  // BEQ
        (0x10, CPU::set_flag_n, false), // BPL
        (0x30, CPU::set_flag_n, true),  // BMI
        (0x50, CPU::set_flag_v, false), // BVC
        (0x70, CPU::set_flag_v, true),  // BVS
    ];

    for (opcode, set_flag, taken_when) in cases {
        for flag in [false, true] {
            let mut cpu = setup_cpu();
            cpu.memory_mut().load(0x8000, &[opcode, 0x04]);
            set_flag(&mut cpu, flag);

            cpu.step().unwrap();

            let expected = if flag == taken_when { 0x8006 } else { 0x8002 };
            assert_eq!(cpu.pc(), expected, "opcode 0x{:02X} flag {}", opcode, flag);
        }
    }
}

#[test]
fn test_countdown_loop() {
    let mut cpu = setup_cpu();
    // LDX #3 ; loop: DEX ; BNE loop ; NOP
    cpu.memory_mut()
        .load(0x8000, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0xEA]);

    // LDX + 3 * (DEX + BNE)
    for _ in 0..7 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.pc(), 0x8005);
}

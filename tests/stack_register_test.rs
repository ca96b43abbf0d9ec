//! Tests for stack operations, register transfers, increments and flag
//! instructions.

use mos6502_acia::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_pha_pla_roundtrip() {
    let mut cpu = setup_cpu();
    // LDA #$9C ; PHA ; LDA #$00 ; PLA
    cpu.memory_mut()
        .load(0x8000, &[0xA9, 0x9C, 0x48, 0xA9, 0x00, 0x68]);

    for _ in 0..4 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.a(), 0x9C);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.cycles(), 2 + 3 + 2 + 4);
}

#[test]
fn test_php_plp_roundtrip() {
    let mut cpu = setup_cpu();
    // SEC ; SED ; PHP ; CLC ; CLD ; PLP
    cpu.memory_mut()
        .load(0x8000, &[0x38, 0xF8, 0x08, 0x18, 0xD8, 0x28]);

    for _ in 0..6 {
        cpu.step().unwrap();
    }

    assert!(cpu.flag_c());
    assert!(cpu.flag_d());
    assert!(!cpu.flag_b());
    assert_eq!(cpu.memory().read(0x01FD), 0x3D);
}

#[test]
fn test_stack_pointer_wraps() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x8000, 0x48); // PHA
    cpu.set_sp(0x00);
    cpu.set_a(0x5E);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0100), 0x5E);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_transfers() {
    let mut cpu = setup_cpu();
    // LDA #$80 ; TAX ; TAY ; LDA #$00 ; TXA ; TYA ; TSX ; TXS
    cpu.memory_mut().load(
        0x8000,
        &[0xA9, 0x80, 0xAA, 0xA8, 0xA9, 0x00, 0x8A, 0x98, 0xBA, 0x9A],
    );

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x80);
    assert!(cpu.flag_n());

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0x80);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x80);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x80);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0xFD);

    cpu.set_x(0x00);
    cpu.step().unwrap(); // TXS
    assert_eq!(cpu.sp(), 0x00);
    assert!(cpu.flag_n()); // untouched by TXS
}

#[test]
fn test_inc_dec_memory() {
    let mut cpu = setup_cpu();
    // INC $10 ; DEC $11
    cpu.memory_mut().load(0x8000, &[0xE6, 0x10, 0xC6, 0x11]);
    cpu.memory_mut().write(0x0010, 0x7F);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read(0x0010), 0x80);
    assert!(cpu.flag_n());

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read(0x0011), 0xFF);
    assert_eq!(cpu.cycles(), 10);
}

#[test]
fn test_register_increments_wrap() {
    let mut cpu = setup_cpu();
    // INX ; INY ; DEX ; DEY ; DEY
    cpu.memory_mut().load(0x8000, &[0xE8, 0xC8, 0xCA, 0x88, 0x88]);
    cpu.set_x(0xFF);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0xFF);
    assert_eq!(cpu.y(), 0xFF);
    assert!(cpu.flag_n());
}

#[test]
fn test_flag_instructions() {
    let mut cpu = setup_cpu();
    // SEC ; SED ; CLI ; CLC ; CLD ; SEI ; CLV
    cpu.memory_mut()
        .load(0x8000, &[0x38, 0xF8, 0x58, 0x18, 0xD8, 0x78, 0xB8]);
    cpu.set_flag_v(true);

    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert!(cpu.flag_c());
    assert!(cpu.flag_d());
    assert!(!cpu.flag_i());

    for _ in 0..4 {
        cpu.step().unwrap();
    }
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_d());
    assert!(cpu.flag_i());
    assert!(!cpu.flag_v());
    assert_eq!(cpu.cycles(), 14);
}

//! # CPU State and Execution
//!
//! This module contains the [`CPU`] struct representing the 6502 processor state,
//! the fetch-decode-execute loop, the addressing resolver, the hardware stack and
//! the shared interrupt entry sequence.
//!
//! ## CPU State
//!
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (see [`Status`])
//! - **Cycle counter**: sum of base cycle costs of executed instructions
//!
//! ## Execution Model
//!
//! - `step()`: decode one instruction at PC, advance PC past it, run its handler
//! - `execute()`: run an already-decoded [`Instruction`] against the current state
//! - `run_for_cycles()`: step until a cycle budget is exhausted
//! - `irq()` / `nmi()` / `reset()`: external signals

use crate::instructions;
use crate::{AddressingMode, ExecutionError, Instruction, MemoryBus, Status};

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Non-maskable interrupt vector.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ and BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Stack pointer value after reset.
const RESET_SP: u8 = 0xFD;

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the [`MemoryBus`] trait. The CPU
/// owns its bus; each instance is a fully independent machine.
///
/// # Examples
///
/// ```
/// use mos6502_acia::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// let cpu = CPU::new(memory);
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i()); // Interrupt disable set on reset
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Processor status flags
    pub(crate) status: Status,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU in the power-on state.
    ///
    /// - A, X, Y are zeroed
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian)
    /// - SP is 0xFD
    /// - Only the Interrupt Disable flag is set
    pub fn new(memory: M) -> Self {
        let pc = memory.read_word(RESET_VECTOR);

        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc,
            sp: RESET_SP,
            status: Status {
                i: true,
                ..Status::default()
            },
            cycles: 0,
            memory,
        }
    }

    /// Applies the RESET signal.
    ///
    /// Reloads PC from the reset vector, sets SP to 0xFD, sets I and clears D.
    /// A, X, Y, the remaining flags and memory are left as they were.
    pub fn reset(&mut self) {
        self.pc = self.memory.read_word(RESET_VECTOR);
        self.sp = RESET_SP;
        self.status.i = true;
        self.status.d = false;
        log::debug!("cpu reset, pc=0x{:04X}", self.pc);
    }

    /// Executes one instruction.
    ///
    /// 1. Decode the instruction at PC
    /// 2. Advance PC past it and add its base cycles
    /// 3. Run the handler for its mnemonic
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::IllegalOpcode`] if the byte at PC is not a
    /// documented opcode. PC and the cycle counter are left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use mos6502_acia::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xA9); // LDA #$42
    /// mem.write(0x8001, 0x42);
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.step().unwrap();
    ///
    /// assert_eq!(cpu.a(), 0x42);
    /// assert_eq!(cpu.pc(), 0x8002);
    /// assert_eq!(cpu.cycles(), 2);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        let instr = match Instruction::decode(&self.memory, self.pc) {
            Ok(instr) => instr,
            Err(err) => {
                log::warn!("{}", err);
                return Err(err);
            }
        };

        log::trace!(
            "{:04X}  {} {:?} ${:04X}  A={:02X} X={:02X} Y={:02X} P={:02X} SP={:02X}",
            self.pc,
            instr.mnemonic,
            instr.mode,
            instr.operand,
            self.a,
            self.x,
            self.y,
            self.status.to_byte(),
            self.sp
        );

        self.pc = self.pc.wrapping_add(instr.size as u16);
        self.cycles += instr.base_cycles as u64;
        self.execute(&instr);

        Ok(())
    }

    /// Runs the handler for an already-decoded instruction.
    ///
    /// PC is expected to already point past the instruction, as it does
    /// inside [`step`](Self::step). Neither PC nor the cycle counter is
    /// advanced here.
    ///
    /// # Examples
    ///
    /// ```
    /// use mos6502_acia::{AddressingMode, CPU, FlatMemory, Instruction, Mnemonic};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.set_a(0x10);
    ///
    /// cpu.execute(&Instruction::new(Mnemonic::Adc, AddressingMode::Immediate, 0x05));
    /// assert_eq!(cpu.a(), 0x15);
    /// ```
    pub fn execute(&mut self, instr: &Instruction) {
        let handler = instructions::handler_for::<M>(instr.mnemonic);
        handler(self, instr);
    }

    /// Runs the CPU until at least `cycle_budget` cycles have elapsed.
    ///
    /// Returns the number of cycles actually consumed, which may overshoot the
    /// budget by part of one instruction.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Signals a maskable interrupt request.
    ///
    /// Returns `false` without doing anything if the Interrupt Disable flag is
    /// set. Otherwise runs the interrupt entry sequence with the current PC
    /// as return address and returns `true`.
    pub fn irq(&mut self) -> bool {
        if self.status.i {
            return false;
        }
        log::debug!("irq taken at pc=0x{:04X}", self.pc);
        self.interrupt(self.pc, IRQ_VECTOR, false);
        self.cycles += 7;
        true
    }

    /// Signals a non-maskable interrupt. Always taken.
    pub fn nmi(&mut self) {
        log::debug!("nmi taken at pc=0x{:04X}", self.pc);
        self.interrupt(self.pc, NMI_VECTOR, false);
        self.cycles += 7;
    }

    /// Interrupt entry shared by BRK, IRQ and NMI.
    ///
    /// Pushes `return_addr` (high, low), pushes the status byte with B set to
    /// `brk`, sets I and loads PC from `vector`.
    pub(crate) fn interrupt(&mut self, return_addr: u16, vector: u16, brk: bool) {
        self.status.b = brk;
        self.push_word(return_addr);
        self.push(self.status.to_byte());
        self.status.i = true;
        self.pc = self.memory.read_word(vector);
    }

    // ========== Stack ==========

    /// Stores a byte at 0x0100|SP, then decrements SP.
    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Increments SP, then loads the byte at 0x0100|SP.
    pub(crate) fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    /// Pushes high byte then low byte.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    /// Pops low byte then high byte.
    pub(crate) fn pop_word(&mut self) -> u16 {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        (hi << 8) | lo
    }

    // ========== Addressing Resolver ==========

    /// Resolves the 8-bit operand of an instruction.
    ///
    /// Immediate yields the inline byte and Accumulator yields A; every
    /// memory mode reads the byte at [`memory_address`](Self::memory_address).
    pub fn resolve_operand(&self, instr: &Instruction) -> u8 {
        match instr.mode {
            AddressingMode::Immediate => instr.operand_byte(),
            AddressingMode::Accumulator => self.a,
            AddressingMode::Implicit => 0,
            _ => self.memory.read(self.memory_address(instr)),
        }
    }

    /// Resolves the 16-bit effective address of an instruction.
    ///
    /// Zero page indexing and zero page pointers wrap within page zero. The
    /// Indirect mode reproduces the NMOS page-wrap bug: a pointer at $xxFF
    /// takes its high byte from $xx00. Relative is taken from the current PC,
    /// which already points past the branch. Implicit, Accumulator and
    /// Immediate have no address and yield 0.
    pub fn memory_address(&self, instr: &Instruction) -> u16 {
        let zp = instr.operand_byte();

        match instr.mode {
            AddressingMode::ZeroPage => zp as u16,
            AddressingMode::ZeroPageX => zp.wrapping_add(self.x) as u16,
            AddressingMode::ZeroPageY => zp.wrapping_add(self.y) as u16,
            AddressingMode::Absolute => instr.operand,
            AddressingMode::AbsoluteX => instr.operand.wrapping_add(self.x as u16),
            AddressingMode::AbsoluteY => instr.operand.wrapping_add(self.y as u16),
            AddressingMode::Indirect => {
                let ptr = instr.operand;
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let lo = self.memory.read(ptr) as u16;
                let hi = self.memory.read(hi_addr) as u16;
                (hi << 8) | lo
            }
            AddressingMode::IndirectX => self.zero_page_pointer(zp.wrapping_add(self.x)),
            AddressingMode::IndirectY => self
                .zero_page_pointer(zp)
                .wrapping_add(self.y as u16),
            AddressingMode::Relative => self.pc.wrapping_add_signed(zp as i8 as i16),
            AddressingMode::Implicit
            | AddressingMode::Accumulator
            | AddressingMode::Immediate => 0,
        }
    }

    /// Reads a pointer from page zero; the high byte wraps to 0x00.
    fn zero_page_pointer(&self, zp: u8) -> u16 {
        let lo = self.memory.read(zp as u16) as u16;
        let hi = self.memory.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value. The stack lives at 0x0100 + SP.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register packed as NV-BDIZC, bit 5 always 1.
    pub fn status(&self) -> u8 {
        self.status.to_byte()
    }

    /// Returns the status flags.
    pub fn flags(&self) -> Status {
        self.status
    }

    /// Returns the total number of CPU cycles executed since initialization.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Shared access to the bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable access to the bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.status.n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.status.v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.status.b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.status.d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.status.i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.status.z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.status.c
    }

    // ========== Setters ==========

    /// Sets the accumulator register.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Replaces every flag from a packed NV-BDIZC byte.
    pub fn set_status(&mut self, value: u8) {
        self.status = Status::from_byte(value);
    }

    /// Sets or clears the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.status.n = value;
    }

    /// Sets or clears the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.status.v = value;
    }

    /// Sets or clears the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.status.b = value;
    }

    /// Sets or clears the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.status.d = value;
    }

    /// Sets or clears the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.status.i = value;
    }

    /// Sets or clears the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.status.z = value;
    }

    /// Sets or clears the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.status.c = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlatMemory, Mnemonic};

    fn setup_cpu() -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x00);
        mem.write(0xFFFD, 0x80);
        CPU::new(mem)
    }

    fn instr(mode: AddressingMode, operand: u16) -> Instruction {
        Instruction::new(Mnemonic::Lda, mode, operand)
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = setup_cpu();

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.status(), 0x24);
    }

    #[test]
    fn test_reset_keeps_registers() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x11);
        cpu.set_sp(0x20);
        cpu.set_flag_d(true);
        cpu.set_flag_i(false);
        cpu.set_pc(0x1234);

        cpu.reset();

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.a(), 0x11);
        assert!(cpu.flag_i());
        assert!(!cpu.flag_d());
    }

    #[test]
    fn test_stack_push_pop_symmetric() {
        let mut cpu = setup_cpu();

        cpu.push(0xAB);
        assert_eq!(cpu.memory().read(0x01FD), 0xAB);
        assert_eq!(cpu.sp(), 0xFC);

        assert_eq!(cpu.pop(), 0xAB);
        assert_eq!(cpu.sp(), 0xFD);
    }

    #[test]
    fn test_stack_wraps_within_page() {
        let mut cpu = setup_cpu();
        cpu.set_sp(0x00);

        cpu.push(0x42);
        assert_eq!(cpu.memory().read(0x0100), 0x42);
        assert_eq!(cpu.sp(), 0xFF);

        assert_eq!(cpu.pop(), 0x42);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_push_word_order() {
        let mut cpu = setup_cpu();
        cpu.push_word(0x1234);

        assert_eq!(cpu.memory().read(0x01FD), 0x12);
        assert_eq!(cpu.memory().read(0x01FC), 0x34);
        assert_eq!(cpu.pop_word(), 0x1234);
    }

    #[test]
    fn test_irq_masked_by_i_flag() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0xFFFE, 0x00);
        cpu.memory_mut().write(0xFFFF, 0x90);

        assert!(!cpu.irq());
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);
    }

    #[test]
    fn test_irq_entry() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0xFFFE, 0x00);
        cpu.memory_mut().write(0xFFFF, 0x90);
        cpu.set_flag_i(false);
        cpu.set_flag_c(true);

        assert!(cpu.irq());

        assert_eq!(cpu.pc(), 0x9000);
        assert_eq!(cpu.memory().read(0x01FD), 0x80);
        assert_eq!(cpu.memory().read(0x01FC), 0x00);
        // B clear, bit 5 set, C set
        assert_eq!(cpu.memory().read(0x01FB), 0x21);
        assert_eq!(cpu.sp(), 0xFA);
        assert!(cpu.flag_i());
    }

    #[test]
    fn test_nmi_ignores_i_flag() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0xFFFA, 0x00);
        cpu.memory_mut().write(0xFFFB, 0xA0);

        cpu.nmi();

        assert_eq!(cpu.pc(), 0xA000);
        assert_eq!(cpu.memory().read(0x01FB) & 0x10, 0x00);
    }

    #[test]
    fn test_step_illegal_opcode() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0x02);

        assert_eq!(
            cpu.step(),
            Err(ExecutionError::IllegalOpcode {
                opcode: 0x02,
                address: 0x8000
            })
        );
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn test_run_for_cycles() {
        let mut cpu = setup_cpu();
        for addr in 0x8000..=0x8010 {
            cpu.memory_mut().write(addr, 0xEA); // NOP
        }

        assert_eq!(cpu.run_for_cycles(10), Ok(10));
        assert_eq!(cpu.pc(), 0x8005);
    }

    #[test]
    fn test_resolve_immediate_and_accumulator() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x77);

        assert_eq!(cpu.resolve_operand(&instr(AddressingMode::Immediate, 0x42)), 0x42);
        assert_eq!(cpu.resolve_operand(&instr(AddressingMode::Accumulator, 0)), 0x77);
    }

    #[test]
    fn test_zero_page_indexed_wraps() {
        let mut cpu = setup_cpu();
        cpu.set_x(0x10);
        cpu.set_y(0x20);

        assert_eq!(cpu.memory_address(&instr(AddressingMode::ZeroPageX, 0xF8)), 0x0008);
        assert_eq!(cpu.memory_address(&instr(AddressingMode::ZeroPageY, 0xF0)), 0x0010);
    }

    #[test]
    fn test_absolute_indexed_wraps() {
        let mut cpu = setup_cpu();
        cpu.set_x(0x02);

        assert_eq!(cpu.memory_address(&instr(AddressingMode::AbsoluteX, 0xFFFF)), 0x0001);
    }

    #[test]
    fn test_indirect_page_wrap_bug() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x10FF, 0x34);
        cpu.memory_mut().write(0x1000, 0x12);
        cpu.memory_mut().write(0x1100, 0x56);

        assert_eq!(cpu.memory_address(&instr(AddressingMode::Indirect, 0x10FF)), 0x1234);
    }

    #[test]
    fn test_indirect_x_and_y() {
        let mut cpu = setup_cpu();
        cpu.set_x(0x04);
        cpu.set_y(0x10);
        cpu.memory_mut().write(0x0024, 0x00);
        cpu.memory_mut().write(0x0025, 0x30);
        cpu.memory_mut().write(0x0040, 0xF8);
        cpu.memory_mut().write(0x0041, 0x20);

        assert_eq!(cpu.memory_address(&instr(AddressingMode::IndirectX, 0x20)), 0x3000);
        assert_eq!(cpu.memory_address(&instr(AddressingMode::IndirectY, 0x40)), 0x2108);
    }

    #[test]
    fn test_indirect_pointer_wraps_in_zero_page() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x00FF, 0x00);
        cpu.memory_mut().write(0x0000, 0x40);

        assert_eq!(cpu.memory_address(&instr(AddressingMode::IndirectY, 0xFF)), 0x4000);
        cpu.set_x(0x01);
        assert_eq!(cpu.memory_address(&instr(AddressingMode::IndirectX, 0xFE)), 0x4000);
    }

    #[test]
    fn test_relative_target() {
        let mut cpu = setup_cpu();
        cpu.set_pc(0x8002);

        assert_eq!(cpu.memory_address(&instr(AddressingMode::Relative, 0x10)), 0x8012);
        assert_eq!(cpu.memory_address(&instr(AddressingMode::Relative, 0xFE)), 0x8000);
    }

    #[test]
    fn test_run_for_cycles_huge_budget_after_steps() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load(0x8000, &[0xEA, 0x02]); // NOP ; illegal
        cpu.step().unwrap();

        let result = cpu.run_for_cycles(u64::MAX);

        assert!(matches!(
            result,
            Err(ExecutionError::IllegalOpcode { opcode: 0x02, .. })
        ));
        assert_eq!(cpu.cycles(), 2);
    }
}

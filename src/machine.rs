//! A ready-wired 6502 system: RAM, one 6551 ACIA and a vector page.
//!
//! ## Memory Map
//!
//! | Range | Device |
//! |-------|--------|
//! | `0x0000..ram_size` | RAM |
//! | `acia_base..acia_base + 4` | ACIA registers |
//! | `0xFFFA..=0xFFFF` | Vector page (NMI, RESET, IRQ), writable |
//!
//! Everything else reads 0xFF.

use crate::{
    Acia6551, AciaPort, ConfigError, ExecutionError, MachineConfig, MappedMemory, RamDevice, CPU,
    NMI_VECTOR,
};

/// CPU plus its mapped bus, built from a [`MachineConfig`].
///
/// ```rust
/// use mos6502_acia::{Machine, MachineConfig};
///
/// let machine = Machine::new(&MachineConfig::default()).unwrap();
/// assert_eq!(machine.cpu().pc(), 0x0600);
/// ```
pub struct Machine {
    cpu: CPU<MappedMemory>,
    acia: AciaPort,
    config: MachineConfig,
}

impl Machine {
    /// Build the memory map described by `config` and power on the CPU.
    ///
    /// # Errors
    ///
    /// [`ConfigError::RamTooSmall`] for an undersized RAM and
    /// [`ConfigError::Device`] when the ACIA or vector page collides with
    /// another device.
    pub fn new(config: &MachineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut memory = MappedMemory::new();
        memory.add_device(0x0000, Box::new(RamDevice::new(config.ram_size)))?;

        let acia = Acia6551::new();
        let port = acia.port();
        memory.add_device(config.acia_base, Box::new(acia))?;

        let mut vectors = RamDevice::new(6);
        let [nmi_lo, nmi_hi] = config.nmi_vector.to_le_bytes();
        let [reset_lo, reset_hi] = config.reset_vector.to_le_bytes();
        let [irq_lo, irq_hi] = config.irq_vector.to_le_bytes();
        vectors.load_bytes(0, &[nmi_lo, nmi_hi, reset_lo, reset_hi, irq_lo, irq_hi]);
        memory.add_device(NMI_VECTOR, Box::new(vectors))?;

        log::debug!(
            "machine: ram 0x0000-0x{:04X}, acia at 0x{:04X}, reset to 0x{:04X}",
            config.ram_size - 1,
            config.acia_base,
            config.reset_vector
        );

        Ok(Self {
            cpu: CPU::new(memory),
            acia: port,
            config: config.clone(),
        })
    }

    /// Host-side handle onto the ACIA. Each call returns a new clone.
    pub fn acia_port(&self) -> AciaPort {
        self.acia.clone()
    }

    /// The configuration this machine was built from.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Shared access to the CPU.
    pub fn cpu(&self) -> &CPU<MappedMemory> {
        &self.cpu
    }

    /// Mutable access to the CPU (and through it, the bus).
    pub fn cpu_mut(&mut self) -> &mut CPU<MappedMemory> {
        &mut self.cpu
    }

    /// Execute one instruction.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        self.cpu.step()
    }

    /// Execute until at least `cycle_budget` cycles have elapsed.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        self.cpu.run_for_cycles(cycle_budget)
    }

    /// Reset both the ACIA and the CPU. RAM is left intact.
    pub fn reset(&mut self) {
        self.acia.reset();
        self.cpu.reset();
    }
}

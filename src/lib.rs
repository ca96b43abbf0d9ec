//! # 6502 Execution Core with a 6551 ACIA
//!
//! An NMOS 6502 CPU core and a memory-mapped 6551 Asynchronous Communications
//! Interface Adapter, built to reproduce the processor's flag behaviour
//! (decimal mode included) and the ACIA's register semantics exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use mos6502_acia::{Machine, MachineConfig, MemoryBus};
//!
//! let config = MachineConfig::default();
//! let mut machine = Machine::new(&config).unwrap();
//! let port = machine.acia_port();
//!
//! // LDA #$48 ; STA $8800 (ACIA data register)
//! machine
//!     .cpu_mut()
//!     .memory_mut()
//!     .load(0x0600, &[0xA9, 0x48, 0x8D, 0x00, 0x88]);
//!
//! machine.step().unwrap();
//! machine.step().unwrap();
//!
//! assert_eq!(port.produce(), Some(b'H'));
//! assert_eq!(port.produce(), None);
//! ```
//!
//! ## Architecture
//!
//! - **Status**: the seven processor flags and their packed NV-BDIZC byte
//! - **Decoder**: opcode table producing immutable [`Instruction`] descriptors
//! - **Instruction engine**: one handler per [`Mnemonic`], dispatched by a
//!   mnemonic-to-function mapping
//! - **CPU**: registers, stack, addressing resolver, interrupt entry
//! - **Bus**: [`MemoryBus`] trait, [`FlatMemory`] and the device router [`MappedMemory`]
//! - **ACIA**: [`Acia6551`] on the bus side, [`AciaPort`] on the host side
//!
//! ## Modules
//!
//! - `cpu` - CPU state and execution logic
//! - `status` - Processor status flags
//! - `memory` - MemoryBus trait and flat memory
//! - `devices` - Memory-mapped devices and the address router
//! - `opcodes` - Opcode metadata table and instruction decoding
//! - `addressing` - Addressing mode enumeration
//! - `config` - Machine configuration
//! - `machine` - A ready-wired CPU + RAM + ACIA system

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod devices;
pub mod machine;
pub mod memory;
pub mod opcodes;
pub mod status;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use config::{ConfigError, MachineConfig};
pub use cpu::{CPU, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR, STACK_BASE};
pub use devices::{Acia6551, AciaPort, AciaRegisters, Device, DeviceError, MappedMemory, RamDevice};
pub use machine::Machine;
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Instruction, Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use status::Status;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The byte at `address` is not a documented opcode.
    #[error("illegal opcode 0x{opcode:02X} at 0x{address:04X}")]
    IllegalOpcode {
        /// The opcode byte
        opcode: u8,
        /// Where it was fetched from
        address: u16,
    },
}

//! Machine configuration.
//!
//! A [`MachineConfig`] describes the memory map of a [`Machine`](crate::Machine):
//! how much RAM sits at 0x0000, where the ACIA's four registers live, and
//! where execution starts after reset. Every field has a default, so a JSON
//! document only needs to name what it changes.
//!
//! ```rust
//! use mos6502_acia::MachineConfig;
//!
//! let config = MachineConfig::from_json(r#"{ "acia_base": 40960 }"#).unwrap();
//! assert_eq!(config.acia_base, 0xA000);
//! assert_eq!(config.ram_size, 0x8000);
//! ```

use crate::DeviceError;
use serde::{Deserialize, Serialize};

/// Smallest RAM that still covers page zero and the stack page.
pub const MIN_RAM_SIZE: u16 = 0x0200;

/// Errors raised while building a machine from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid machine config: {0}")]
    Parse(#[from] serde_json::Error),

    /// RAM does not cover page zero and the stack.
    #[error("ram_size 0x{0:04X} is below the 0x0200 minimum")]
    RamTooSmall(u16),

    /// Two devices in the memory map collide.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Memory map of a CPU + RAM + ACIA machine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MachineConfig {
    /// Bytes of RAM mapped from 0x0000
    pub ram_size: u16,

    /// Base address of the ACIA registers
    pub acia_base: u16,

    /// Address stored in the reset vector
    pub reset_vector: u16,

    /// NMI handler address
    pub nmi_vector: u16,

    /// IRQ/BRK handler address
    pub irq_vector: u16,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            ram_size: 0x8000,
            acia_base: 0x8800,
            reset_vector: 0x0600,
            nmi_vector: 0x0600,
            irq_vector: 0x0600,
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MachineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the constraints that do not depend on device registration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ram_size < MIN_RAM_SIZE {
            return Err(ConfigError::RamTooSmall(self.ram_size));
        }
        Ok(())
    }
}

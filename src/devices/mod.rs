//! Memory-mapped device support.
//!
//! Hardware components attach to the 6502 bus through the [`Device`] trait and
//! a [`MappedMemory`] router that sends each 16-bit address to at most one
//! device.
//!
//! # Example
//!
//! ```rust
//! use mos6502_acia::{Acia6551, MappedMemory, MemoryBus, RamDevice, CPU};
//!
//! let mut memory = MappedMemory::new();
//!
//! // 32KB RAM at 0x0000-0x7FFF
//! memory.add_device(0x0000, Box::new(RamDevice::new(0x8000))).unwrap();
//!
//! // ACIA at 0x8800-0x8803
//! let acia = Acia6551::new();
//! let port = acia.port();
//! memory.add_device(0x8800, Box::new(acia)).unwrap();
//!
//! memory.write(0x8800, b'!');
//! assert_eq!(port.produce(), Some(b'!'));
//!
//! let cpu = CPU::new(memory);
//! ```

use crate::MemoryBus;

pub mod acia;
pub mod ram;

pub use acia::{Acia6551, AciaPort, AciaRegisters};
pub use ram::RamDevice;

/// Abstract interface for memory-mapped hardware devices.
///
/// The router calls these methods with an offset relative to the device's
/// base address (0 to size-1), so a device never knows where it is mapped.
/// Devices that change state on reads use interior mutability.
///
/// # Examples
///
/// ```rust
/// use mos6502_acia::Device;
///
/// struct Latch(u8);
///
/// impl Device for Latch {
///     fn read(&self, _offset: u16) -> u8 {
///         self.0
///     }
///
///     fn write(&mut self, _offset: u16, value: u8) {
///         self.0 = value;
///     }
///
///     fn size(&self) -> u16 {
///         1
///     }
/// }
/// ```
pub trait Device: Send {
    /// Read byte from device at offset relative to device base address.
    fn read(&self, offset: u16) -> u8;

    /// Write byte to device at offset relative to device base address.
    fn write(&mut self, offset: u16, value: u8);

    /// Number of bytes in the device's address range.
    fn size(&self) -> u16;
}

/// Internal mapping of a device to a base address.
struct DeviceMapping {
    base_addr: u16,
    device: Box<dyn Device>,
}

impl DeviceMapping {
    /// Offset of `addr` within this device, if it falls inside the range.
    /// A device whose range runs past 0xFFFF is clipped there.
    fn offset_of(&self, addr: u16) -> Option<u16> {
        let offset = addr.checked_sub(self.base_addr)?;
        (u32::from(offset) < u32::from(self.device.size())).then_some(offset)
    }

    fn end(&self) -> u32 {
        u32::from(self.base_addr) + u32::from(self.device.size())
    }
}

/// Error returned when device registration fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// Address range overlaps with an existing device.
    #[error(
        "device at 0x{new_base:04X} (size {new_size}) overlaps device at 0x{existing_base:04X} (size {existing_size})"
    )]
    Overlap {
        /// Base address of the new device
        new_base: u16,
        /// Size of the new device
        new_size: u16,
        /// Base address of the conflicting existing device
        existing_base: u16,
        /// Size of the conflicting existing device
        existing_size: u16,
    },

    /// Device reports a zero-byte address range.
    #[error("device at 0x{base:04X} has zero size")]
    Empty {
        /// Requested base address
        base: u16,
    },
}

/// Memory router that dispatches reads and writes to registered devices.
///
/// Unmapped addresses read 0xFF (floating bus) and swallow writes.
///
/// # Examples
///
/// ```rust
/// use mos6502_acia::{MappedMemory, MemoryBus, RamDevice};
///
/// let mut memory = MappedMemory::new();
/// memory.add_device(0x0000, Box::new(RamDevice::new(16384))).unwrap();
///
/// memory.write(0x1234, 0x42);
/// assert_eq!(memory.read(0x1234), 0x42);
///
/// // Unmapped address returns 0xFF
/// assert_eq!(memory.read(0x8000), 0xFF);
/// ```
pub struct MappedMemory {
    devices: Vec<DeviceMapping>,
    unmapped_value: u8,
}

impl MappedMemory {
    /// Create a new empty memory mapper.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            unmapped_value: 0xFF,
        }
    }

    /// Register a device at the specified base address.
    ///
    /// The device occupies `base_addr..base_addr + size`. Registration fails
    /// if that range overlaps a registered device or is empty.
    ///
    /// ```rust
    /// use mos6502_acia::{DeviceError, MappedMemory, RamDevice};
    ///
    /// let mut memory = MappedMemory::new();
    /// memory.add_device(0x0000, Box::new(RamDevice::new(16384))).unwrap();
    ///
    /// let result = memory.add_device(0x1000, Box::new(RamDevice::new(1024)));
    /// assert!(matches!(result, Err(DeviceError::Overlap { .. })));
    /// ```
    pub fn add_device(
        &mut self,
        base_addr: u16,
        device: Box<dyn Device>,
    ) -> Result<(), DeviceError> {
        let new_size = device.size();
        if new_size == 0 {
            return Err(DeviceError::Empty { base: base_addr });
        }
        let mapping = DeviceMapping { base_addr, device };
        let new_end = mapping.end();

        if let Some(existing) = self.devices.iter().find(|existing| {
            u32::from(base_addr) < existing.end() && new_end > u32::from(existing.base_addr)
        }) {
            return Err(DeviceError::Overlap {
                new_base: base_addr,
                new_size,
                existing_base: existing.base_addr,
                existing_size: existing.device.size(),
            });
        }

        log::debug!(
            "mapped device at 0x{:04X}-0x{:04X}",
            base_addr,
            new_end.min(0x1_0000) - 1
        );
        self.devices.push(mapping);
        Ok(())
    }

    /// Number of registered devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    fn find_device(&mut self, addr: u16) -> Option<(&mut dyn Device, u16)> {
        for mapping in &mut self.devices {
            if let Some(offset) = mapping.offset_of(addr) {
                return Some((mapping.device.as_mut(), offset));
            }
        }
        None
    }

    fn find_device_immut(&self, addr: u16) -> Option<(&dyn Device, u16)> {
        self.devices.iter().find_map(|mapping| {
            let offset = mapping.offset_of(addr)?;
            Some((mapping.device.as_ref(), offset))
        })
    }
}

impl Default for MappedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for MappedMemory {
    fn read(&self, addr: u16) -> u8 {
        match self.find_device_immut(addr) {
            Some((device, offset)) => device.read(offset),
            None => self.unmapped_value,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let Some((device, offset)) = self.find_device(addr) {
            device.write(offset, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestDevice {
        data: Vec<u8>,
    }

    impl TestDevice {
        fn new(size: u16) -> Self {
            Self {
                data: vec![0; size as usize],
            }
        }
    }

    impl Device for TestDevice {
        fn read(&self, offset: u16) -> u8 {
            self.data[offset as usize]
        }

        fn write(&mut self, offset: u16, value: u8) {
            self.data[offset as usize] = value;
        }

        fn size(&self) -> u16 {
            self.data.len() as u16
        }
    }

    #[test]
    fn test_mapped_memory_empty() {
        let memory = MappedMemory::new();
        assert_eq!(memory.read(0x0000), 0xFF);
        assert_eq!(memory.read(0xFFFF), 0xFF);
    }

    #[test]
    fn test_routing_uses_offsets() {
        let mut memory = MappedMemory::new();
        memory
            .add_device(0x0000, Box::new(TestDevice::new(256)))
            .unwrap();
        memory
            .add_device(0x1000, Box::new(TestDevice::new(256)))
            .unwrap();

        memory.write(0x0042, 0xAA);
        memory.write(0x1042, 0xBB);

        assert_eq!(memory.read(0x0042), 0xAA);
        assert_eq!(memory.read(0x1042), 0xBB);
        assert_eq!(memory.read(0x0500), 0xFF);
        assert_eq!(memory.device_count(), 2);
    }

    #[test]
    fn test_overlap_detection() {
        let mut memory = MappedMemory::new();
        memory
            .add_device(0x1000, Box::new(TestDevice::new(256)))
            .unwrap();

        assert_eq!(
            memory.add_device(0x1080, Box::new(TestDevice::new(256))),
            Err(DeviceError::Overlap {
                new_base: 0x1080,
                new_size: 256,
                existing_base: 0x1000,
                existing_size: 256,
            })
        );
        assert!(memory
            .add_device(0x0F80, Box::new(TestDevice::new(256)))
            .is_err());

        // Exactly adjacent on either side is fine
        assert!(memory
            .add_device(0x0F00, Box::new(TestDevice::new(256)))
            .is_ok());
        assert!(memory
            .add_device(0x1100, Box::new(TestDevice::new(256)))
            .is_ok());
    }

    #[test]
    fn test_empty_device_rejected() {
        let mut memory = MappedMemory::new();
        assert_eq!(
            memory.add_device(0x2000, Box::new(TestDevice::new(0))),
            Err(DeviceError::Empty { base: 0x2000 })
        );
    }

    #[test]
    fn test_device_at_top_of_memory() {
        let mut memory = MappedMemory::new();
        memory
            .add_device(0xFFFA, Box::new(TestDevice::new(6)))
            .unwrap();

        memory.write(0xFFFF, 0x12);
        assert_eq!(memory.read(0xFFFF), 0x12);
        assert_eq!(memory.read(0xFFF9), 0xFF);
    }

    #[test]
    fn test_write_reaches_only_owning_device() {
        let mut memory = MappedMemory::new();
        memory
            .add_device(0x0000, Box::new(TestDevice::new(0x100)))
            .unwrap();
        memory
            .add_device(0x0100, Box::new(TestDevice::new(0x100)))
            .unwrap();

        memory.write(0x00FF, 0x11);
        memory.write(0x0100, 0x22);

        assert_eq!(memory.read(0x00FF), 0x11);
        assert_eq!(memory.read(0x0100), 0x22);
        assert_eq!(memory.read(0x0000), 0x00);
        assert_eq!(memory.read(0x01FF), 0x00);
    }

    #[test]
    fn test_unmapped_write_ignored() {
        let mut memory = MappedMemory::new();
        memory.write(0x1234, 0x42);
        assert_eq!(memory.read(0x1234), 0xFF);
    }

    #[test]
    fn test_acia_through_router() {
        let mut memory = MappedMemory::new();
        let acia = Acia6551::new();
        let port = acia.port();
        memory.add_device(0x8800, Box::new(acia)).unwrap();

        port.consume(0x33);
        assert_eq!(memory.read(0x8800), 0x33);
        assert_eq!(memory.read(0x8803), 0x18);
        assert_eq!(memory.read(0x8804), 0xFF);
    }
}

//! RAM device implementation.

use super::Device;

/// Plain read/write storage.
///
/// # Examples
///
/// ```rust
/// use mos6502_acia::{Device, RamDevice};
///
/// let mut ram = RamDevice::new(1024);
///
/// ram.write(0x42, 0xAA);
/// assert_eq!(ram.read(0x42), 0xAA);
/// ```
#[derive(Debug, Clone)]
pub struct RamDevice {
    data: Vec<u8>,
}

impl RamDevice {
    /// Create a zero-filled RAM device of `size` bytes.
    pub fn new(size: u16) -> Self {
        Self {
            data: vec![0; size as usize],
        }
    }

    /// Copy `bytes` into RAM starting at `offset`.
    ///
    /// Bytes that would land past the end of the device are dropped.
    ///
    /// ```rust
    /// use mos6502_acia::{Device, RamDevice};
    ///
    /// let mut ram = RamDevice::new(4);
    /// ram.load_bytes(2, &[0x01, 0x02, 0x03]);
    ///
    /// assert_eq!(ram.read(2), 0x01);
    /// assert_eq!(ram.read(3), 0x02);
    /// ```
    pub fn load_bytes(&mut self, offset: u16, bytes: &[u8]) {
        let start = (offset as usize).min(self.data.len());
        let end = start.saturating_add(bytes.len()).min(self.data.len());
        self.data[start..end].copy_from_slice(&bytes[..end - start]);
    }
}

impl Device for RamDevice {
    fn read(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write(&mut self, offset: u16, value: u8) {
        if let Some(cell) = self.data.get_mut(offset as usize) {
            *cell = value;
        }
    }

    fn size(&self) -> u16 {
        self.data.len() as u16
    }
}

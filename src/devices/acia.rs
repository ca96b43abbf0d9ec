//! 6551 ACIA serial device.
//!
//! The device has two faces. [`Acia6551`] sits on the memory bus and answers
//! CPU reads and writes through the [`Device`] trait. [`AciaPort`] is the
//! host-side handle that drains transmitted bytes and injects received ones.
//! Both share one register file behind a single lock, so the host side may
//! live on another thread than the CPU.

use super::Device;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Data register offset (write: transmit, read: receive).
pub const REG_DATA: u16 = 0;
/// Command register offset.
pub const REG_COMMAND: u16 = 1;
/// Control register offset.
pub const REG_CONTROL: u16 = 2;
/// Status register offset (read-only).
pub const REG_STATUS: u16 = 3;

/// Status bit 2: a received byte replaced one the CPU had not read.
pub const STATUS_OVERRUN: u8 = 0x04;
/// Status bit 3: the receive slot holds a byte.
pub const STATUS_RX_FULL: u8 = 0x08;
/// Status bit 4: the transmit slot is free.
pub const STATUS_TX_EMPTY: u8 = 0x10;

const COMMAND_RX_IRQ: u8 = 0x02;
const COMMAND_TX_IRQ: u8 = 0x04;

/// Snapshot of the ACIA register file and buffer flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AciaRegisters {
    /// Last byte written by the CPU to the data register
    pub tx: u8,
    /// Transmit slot is free
    pub tx_empty: bool,
    /// Last byte pushed by the host
    pub rx: u8,
    /// Receive slot holds a byte
    pub rx_full: bool,
    /// Command bit 1
    pub rx_irq_enabled: bool,
    /// Command bit 2
    pub tx_irq_enabled: bool,
    /// Sticky until reset
    pub overrun: bool,
    /// Raw command byte
    pub command: u8,
    /// Raw control byte (not interpreted)
    pub control: u8,
}

impl AciaRegisters {
    const RESET: Self = Self {
        tx: 0,
        tx_empty: true,
        rx: 0,
        rx_full: false,
        rx_irq_enabled: false,
        tx_irq_enabled: false,
        overrun: false,
        command: 0,
        control: 0,
    };

    /// Compose the status byte from the live flags.
    pub fn status(&self) -> u8 {
        let mut status = 0;
        if self.overrun {
            status |= STATUS_OVERRUN;
        }
        if self.rx_full {
            status |= STATUS_RX_FULL;
        }
        if self.tx_empty {
            status |= STATUS_TX_EMPTY;
        }
        status
    }
}

impl Default for AciaRegisters {
    fn default() -> Self {
        Self::RESET
    }
}

type Shared = Arc<Mutex<AciaRegisters>>;

fn reset_shared(shared: &Shared) {
    *lock(shared) = AciaRegisters::RESET;
    log::debug!("ACIA reset");
}

fn lock(shared: &Shared) -> MutexGuard<'_, AciaRegisters> {
    // Plain bytes and flags: a poisoned guard still holds a valid register file.
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Bus-side 6551 ACIA.
///
/// ## Register Map (offsets from device base address)
///
/// | Offset | Write | Read |
/// |--------|-------|------|
/// | 0 | transmit byte, clears TX empty | last received byte |
/// | 1 | command (bit 1 RX IRQ, bit 2 TX IRQ) | command |
/// | 2 | control | control |
/// | 3 | ignored | status |
///
/// Reading the data register does not consume the received byte; RX full
/// stays set until [`Acia6551::reset`].
///
/// # Example
///
/// ```rust
/// use mos6502_acia::{Acia6551, Device};
///
/// let mut acia = Acia6551::new();
/// let port = acia.port();
///
/// acia.write(0, 0x42);
/// assert_eq!(port.produce(), Some(0x42));
/// assert_eq!(port.produce(), None);
///
/// port.consume(b'A');
/// assert_eq!(acia.read(0), b'A');
/// assert_eq!(acia.read(3), 0x18);
/// ```
#[derive(Debug, Default)]
pub struct Acia6551 {
    shared: Shared,
}

impl Acia6551 {
    /// Create an ACIA in its reset state.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(AciaRegisters::RESET)),
        }
    }

    /// Get a host-side handle onto this ACIA.
    pub fn port(&self) -> AciaPort {
        AciaPort {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Return every register and flag to its power-on value.
    ///
    /// This is the only way to clear a latched overrun.
    pub fn reset(&self) {
        reset_shared(&self.shared);
    }

    /// Copy of the current register file.
    pub fn registers(&self) -> AciaRegisters {
        *lock(&self.shared)
    }
}

impl Device for Acia6551 {
    fn read(&self, offset: u16) -> u8 {
        let regs = lock(&self.shared);
        match offset {
            REG_DATA => regs.rx,
            REG_COMMAND => regs.command,
            REG_CONTROL => regs.control,
            REG_STATUS => regs.status(),
            _ => 0,
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        let mut regs = lock(&self.shared);
        match offset {
            REG_DATA => {
                regs.tx = value;
                regs.tx_empty = false;
            }
            REG_COMMAND => {
                regs.command = value;
                regs.rx_irq_enabled = value & COMMAND_RX_IRQ != 0;
                regs.tx_irq_enabled = value & COMMAND_TX_IRQ != 0;
            }
            REG_CONTROL => regs.control = value,
            _ => {}
        }
    }

    fn size(&self) -> u16 {
        4
    }
}

/// Host-side handle onto an [`Acia6551`].
///
/// Cheap to clone and safe to move to another thread. `produce` drains the
/// transmit slot; `consume` fills the receive slot.
#[derive(Debug, Clone)]
pub struct AciaPort {
    shared: Shared,
}

impl AciaPort {
    /// Take the byte the CPU transmitted, if there is one.
    pub fn produce(&self) -> Option<u8> {
        let mut regs = lock(&self.shared);
        if regs.tx_empty {
            return None;
        }
        regs.tx_empty = true;
        Some(regs.tx)
    }

    /// Deliver a byte to the CPU side. Replacing an unread byte latches overrun.
    pub fn consume(&self, byte: u8) {
        let mut regs = lock(&self.shared);
        if regs.rx_full {
            if !regs.overrun {
                log::debug!("ACIA receive overrun (dropped 0x{:02X})", regs.rx);
            }
            regs.overrun = true;
        }
        regs.rx = byte;
        regs.rx_full = true;
    }

    /// Reset the ACIA from the host side.
    pub fn reset(&self) {
        reset_shared(&self.shared);
    }

    /// Copy of the current register file.
    pub fn registers(&self) -> AciaRegisters {
        *lock(&self.shared)
    }

    /// Status byte as the CPU would read it.
    pub fn status(&self) -> u8 {
        lock(&self.shared).status()
    }
}

impl io::Read for AciaPort {
    /// Reads at most one byte, since the transmit slot holds one.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(first) = buf.first_mut() else {
            return Ok(0);
        };
        match self.produce() {
            Some(byte) => {
                *first = byte;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl io::Write for AciaPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            self.consume(byte);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

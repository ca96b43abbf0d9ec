//! # Processor Status Register
//!
//! The 6502 keeps seven flags in the P register. Internally they are held as
//! individual booleans; [`Status::to_byte`] and [`Status::from_byte`] convert
//! to and from the packed form used by PHP/PLP, BRK/RTI and interrupt entry.
//!
//! ## Bit layout (NV-BDIZC)
//!
//! | Bit | Flag | Meaning |
//! |-----|------|---------|
//! | 7   | N    | Negative |
//! | 6   | V    | Overflow |
//! | 5   | -    | Unused, always reads as 1 |
//! | 4   | B    | Break |
//! | 3   | D    | Decimal mode |
//! | 2   | I    | Interrupt disable |
//! | 1   | Z    | Zero |
//! | 0   | C    | Carry |

/// Negative flag bit.
pub const FLAG_N: u8 = 0b1000_0000;
/// Overflow flag bit.
pub const FLAG_V: u8 = 0b0100_0000;
/// Unused bit 5, always set when the register is pushed.
pub const FLAG_UNUSED: u8 = 0b0010_0000;
/// Break flag bit.
pub const FLAG_B: u8 = 0b0001_0000;
/// Decimal mode flag bit.
pub const FLAG_D: u8 = 0b0000_1000;
/// Interrupt disable flag bit.
pub const FLAG_I: u8 = 0b0000_0100;
/// Zero flag bit.
pub const FLAG_Z: u8 = 0b0000_0010;
/// Carry flag bit.
pub const FLAG_C: u8 = 0b0000_0001;

/// Processor status flags.
///
/// # Examples
///
/// ```
/// use mos6502_acia::Status;
///
/// let mut status = Status::default();
/// status.c = true;
/// status.n = true;
///
/// assert_eq!(status.to_byte(), 0b1010_0001);
/// assert_eq!(Status::from_byte(status.to_byte()), status);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status {
    /// Negative (bit 7 of the last result)
    pub n: bool,
    /// Overflow (signed overflow, or bit 6 of a BIT operand)
    pub v: bool,
    /// Break (set by BRK)
    pub b: bool,
    /// Decimal mode (ADC/SBC use BCD arithmetic)
    pub d: bool,
    /// Interrupt disable (masks IRQ)
    pub i: bool,
    /// Zero (last result was zero)
    pub z: bool,
    /// Carry (unsigned overflow / no borrow)
    pub c: bool,
}

impl Status {
    /// Packs the flags into the NV-BDIZC byte. Bit 5 is always 1.
    pub fn to_byte(self) -> u8 {
        let mut byte = FLAG_UNUSED;

        for (set, bit) in [
            (self.n, FLAG_N),
            (self.v, FLAG_V),
            (self.b, FLAG_B),
            (self.d, FLAG_D),
            (self.i, FLAG_I),
            (self.z, FLAG_Z),
            (self.c, FLAG_C),
        ] {
            if set {
                byte |= bit;
            }
        }

        byte
    }

    /// Unpacks an NV-BDIZC byte. Bit 5 is ignored.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            n: byte & FLAG_N != 0,
            v: byte & FLAG_V != 0,
            b: byte & FLAG_B != 0,
            d: byte & FLAG_D != 0,
            i: byte & FLAG_I != 0,
            z: byte & FLAG_Z != 0,
            c: byte & FLAG_C != 0,
        }
    }

    /// Recomputes Z and N from a freshly produced value.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.z = value == 0;
        self.n = value & 0x80 != 0;
    }

    /// Carry as the 0/1 value fed into ADC, SBC and the rotates.
    #[inline]
    pub fn carry_bit(self) -> u8 {
        u8::from(self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_packs_to_unused_bit_only() {
        assert_eq!(Status::default().to_byte(), 0x20);
    }

    #[test]
    fn test_round_trip_every_flag_combination() {
        for byte in 0..=255u8 {
            let status = Status::from_byte(byte);
            // Bit 5 is forced on when packing
            assert_eq!(status.to_byte(), byte | FLAG_UNUSED);
            assert_eq!(Status::from_byte(status.to_byte()), status);
        }
    }

    #[test]
    fn test_individual_bits() {
        let status = Status {
            i: true,
            ..Status::default()
        };
        assert_eq!(status.to_byte(), 0x24);

        let status = Status::from_byte(FLAG_D | FLAG_B);
        assert!(status.d);
        assert!(status.b);
        assert!(!status.c);
    }

    #[test]
    fn test_set_zn() {
        let mut status = Status::default();

        status.set_zn(0x00);
        assert!(status.z);
        assert!(!status.n);

        status.set_zn(0x80);
        assert!(!status.z);
        assert!(status.n);

        status.set_zn(0x7F);
        assert!(!status.z);
        assert!(!status.n);
    }
}

//! Drives an ACIA with an arbitrary mix of CPU register accesses and host
//! stream operations, checking the status byte against the flags each time.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mos6502_acia::{Acia6551, Device};

#[derive(Debug, Arbitrary)]
enum Op {
    CpuRead(u8),
    CpuWrite(u8, u8),
    HostSend(u8),
    HostTake,
    Reset,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut acia = Acia6551::new();
    let port = acia.port();

    for op in ops {
        match op {
            Op::CpuRead(offset) => {
                let value = acia.read(offset as u16);
                if offset > 3 {
                    assert_eq!(value, 0);
                }
            }
            Op::CpuWrite(offset, value) => acia.write(offset as u16, value),
            Op::HostSend(byte) => {
                port.consume(byte);
                assert_eq!(acia.read(0), byte);
            }
            Op::HostTake => {
                port.produce();
                assert!(acia.registers().tx_empty);
            }
            Op::Reset => acia.reset(),
        }

        let regs = acia.registers();
        assert_eq!(acia.read(3), regs.status());
        assert_eq!(acia.read(3) & !0x1C, 0);
    }
});

//! JavaScript-callable machine API.

use crate::{AciaPort, ConfigError, ExecutionError, Machine, MachineConfig, MemoryBus};
use wasm_bindgen::prelude::*;

/// Error surfaced to JavaScript
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MachineError {
    message: String,
}

#[wasm_bindgen]
impl MachineError {
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<ConfigError> for MachineError {
    fn from(err: ConfigError) -> Self {
        MachineError {
            message: err.to_string(),
        }
    }
}

impl From<ExecutionError> for MachineError {
    fn from(err: ExecutionError) -> Self {
        MachineError {
            message: err.to_string(),
        }
    }
}

/// A [`Machine`] driven from JavaScript.
///
/// Bytes the program writes to the ACIA are either pulled with
/// `take_byte()` or, when a transmit callback is installed, pushed to it
/// after every step.
#[wasm_bindgen]
pub struct WasmMachine {
    machine: Machine,
    port: AciaPort,
    on_transmit: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl WasmMachine {
    /// Build a machine from a JSON config; an empty string uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmMachine, MachineError> {
        let config = if config_json.trim().is_empty() {
            MachineConfig::default()
        } else {
            MachineConfig::from_json(config_json)?
        };
        let machine = Machine::new(&config)?;
        let port = machine.acia_port();
        Ok(WasmMachine {
            machine,
            port,
            on_transmit: None,
        })
    }

    /// Install a callback receiving each transmitted byte as a number.
    pub fn set_on_transmit(&mut self, callback: js_sys::Function) {
        self.on_transmit = Some(callback);
    }

    pub fn step(&mut self) -> Result<(), MachineError> {
        self.machine.step()?;
        self.flush_transmit();
        Ok(())
    }

    /// Runs instructions until the budget is used. Returns cycles consumed.
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, MachineError> {
        let mut consumed = 0u64;
        // Step one instruction at a time so the callback sees every byte.
        while consumed < u64::from(cycles) {
            let before = self.machine.cpu().cycles();
            self.step()?;
            consumed += self.machine.cpu().cycles() - before;
        }
        Ok(consumed.min(u64::from(u32::MAX)) as u32)
    }

    pub fn reset(&mut self) {
        self.machine.reset();
    }

    /// Host to ACIA.
    pub fn send_byte(&mut self, byte: u8) {
        self.port.consume(byte);
    }

    /// ACIA to host. Returns `undefined` when nothing was transmitted.
    pub fn take_byte(&mut self) -> Option<u8> {
        self.port.produce()
    }

    pub fn acia_status(&self) -> u8 {
        self.port.status()
    }

    pub fn a(&self) -> u8 {
        self.machine.cpu().a()
    }

    pub fn x(&self) -> u8 {
        self.machine.cpu().x()
    }

    pub fn y(&self) -> u8 {
        self.machine.cpu().y()
    }

    pub fn pc(&self) -> u16 {
        self.machine.cpu().pc()
    }

    pub fn sp(&self) -> u8 {
        self.machine.cpu().sp()
    }

    pub fn status(&self) -> u8 {
        self.machine.cpu().status()
    }

    /// Cycle count as f64 (JS numbers are doubles)
    pub fn cycles(&self) -> f64 {
        self.machine.cpu().cycles() as f64
    }

    pub fn set_pc(&mut self, addr: u16) {
        self.machine.cpu_mut().set_pc(addr);
    }

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.machine.cpu().memory().read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.machine.cpu_mut().memory_mut().write(addr, value);
    }

    pub fn load_program(&mut self, program: &[u8], start_addr: u16) {
        self.machine.cpu_mut().memory_mut().load(start_addr, program);
    }

    /// Trigger a maskable interrupt. Returns whether it was taken.
    pub fn irq(&mut self) -> bool {
        self.machine.cpu_mut().irq()
    }

    pub fn nmi(&mut self) {
        self.machine.cpu_mut().nmi();
    }
}

impl WasmMachine {
    fn flush_transmit(&mut self) {
        let Some(callback) = &self.on_transmit else {
            return;
        };
        if let Some(byte) = self.port.produce() {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from(byte));
        }
    }
}

//! WebAssembly bindings.
//!
//! Exposes a [`Machine`](crate::Machine) to JavaScript with the ACIA wired to
//! a byte-at-a-time host interface.

pub mod api;

pub use api::WasmMachine;

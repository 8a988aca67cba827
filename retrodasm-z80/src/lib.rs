//! # Z80 Family Backend
//!
//! The Z80 CPU family for the retrodasm engine: the full documented
//! instruction set, the ZX Spectrum Next vendor extensions (behind
//! `allow_extended_set`), and the ZX Spectrum ROM-convention custom
//! disassemblers.
//!
//! ```ignore
//! use retrodasm_core::engine::Disassembler;
//! use retrodasm_core::section::MemorySection;
//! use retrodasm_z80::Z80Backend;
//!
//! let memory = [0x3e, 0x42, 0xc9];
//! let sections = vec![MemorySection::disassemble(0x0000, 0x0002)];
//! let mut disassembler = Disassembler::new(Z80Backend::new(), sections, &memory);
//! let output = disassembler.disassemble(0x0000, 0x0002);
//! ```

pub mod backend;
pub mod float;
pub mod spectrum;
pub mod tables;

pub use backend::Z80Backend;
pub use float::{FloatError, FloatNumber};
pub use spectrum::{Spectrum128CustomDisassembler, Spectrum48CustomDisassembler};

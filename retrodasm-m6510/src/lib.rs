//! # M6510 Family Backend
//!
//! The MOS 6510 (6502-family) CPU for the retrodasm engine, with the full
//! undocumented opcode set and per-operation cycle counts.
//!
//! ```ignore
//! use retrodasm_core::engine::Disassembler;
//! use retrodasm_core::section::MemorySection;
//! use retrodasm_m6510::M6510Backend;
//!
//! let memory = [0xa9, 0x42, 0x60];
//! let sections = vec![MemorySection::disassemble(0x0000, 0x0002)];
//! let mut disassembler = Disassembler::new(M6510Backend::new(), sections, &memory);
//! let output = disassembler.disassemble(0x0000, 0x0002);
//! ```

pub mod backend;
pub mod tables;

pub use backend::M6510Backend;

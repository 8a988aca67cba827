//! # Retrodasm Core
//!
//! Retargetable disassembler engine for 8-bit CPUs.
//!
//! The engine walks a [`MemoryMap`] of address sections over a byte buffer
//! and renders each section per its treatment kind: decode instructions,
//! emit byte/word data lines, or emit a skip marker. CPU families plug in
//! through [`CpuBackend`] (opcode-pattern selection plus pragma expansion),
//! and machine-specific conventions can hijack decode steps through
//! [`CustomDisassembler`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use retrodasm_core::{Disassembler, MemoryMap, MemorySection};
//!
//! let mut map = MemoryMap::new();
//! map.add(MemorySection::disassemble(0x0000, 0x3FFF));
//!
//! let mut disasm = Disassembler::new(SomeBackend, map.into_sections(), &rom);
//! let output = disasm.disassemble(0x0000, 0x3FFF).unwrap();
//! for item in output.items() {
//!     println!("{:04X}  {}", item.address, item.instruction);
//! }
//! ```

pub mod backend;
pub mod context;
pub mod custom;
pub mod engine;
pub mod format;
pub mod options;
pub mod output;
pub mod section;

pub use backend::{CpuBackend, OpPattern, PragmaExpansion};
pub use context::{DecodeContext, FetchResult, IndexMode};
pub use custom::{CustomDisassembler, DisassemblyApi};
pub use engine::Disassembler;
pub use options::DisassemblyOptions;
pub use output::{DisassemblyItem, DisassemblyLabel, DisassemblyOutput};
pub use section::{MemoryMap, MemorySection, MemorySectionType};

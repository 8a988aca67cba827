//! # CPU Backend Capability Set
//!
//! A CPU family plugs into the engine through this trait: it selects an
//! opcode pattern for the bytes at the cursor (walking whatever prefixes the
//! family defines) and expands the `^<letter>` pragma markers the pattern
//! contains. The engine owns the loop, the pragma splice, the safety cap,
//! and all output bookkeeping.

use std::borrow::Cow;

use crate::context::DecodeContext;
use crate::options::DisassemblyOptions;
use crate::output::DisassemblyOutput;

/// The pattern chosen for one operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpPattern {
    /// Pattern text, possibly containing `^<letter>` pragma markers
    pub text: Cow<'static, str>,

    /// Clock cycles, for families whose tables carry them
    pub cycles: Option<u8>,
}

impl OpPattern {
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            text: text.into(),
            cycles: None,
        }
    }

    pub fn with_cycles(text: impl Into<Cow<'static, str>>, cycles: u8) -> Self {
        Self {
            text: text.into(),
            cycles: Some(cycles),
        }
    }
}

/// The result of expanding one pragma marker
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PragmaExpansion {
    /// Text spliced into the pattern in place of the marker
    pub replacement: String,

    /// Operand value, when the operand carries a symbol
    pub symbol: Option<u16>,

    /// The symbol is a label reference
    pub is_label_symbol: bool,
}

impl PragmaExpansion {
    /// A plain textual replacement with no symbol metadata
    pub fn text(replacement: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            ..Self::default()
        }
    }

    /// A replacement carrying an operand symbol
    pub fn symbol(replacement: impl Into<String>, value: u16) -> Self {
        Self {
            replacement: replacement.into(),
            symbol: Some(value),
            is_label_symbol: false,
        }
    }

    /// A replacement carrying a label-reference symbol
    pub fn label(replacement: impl Into<String>, value: u16) -> Self {
        Self {
            replacement: replacement.into(),
            symbol: Some(value),
            is_label_symbol: true,
        }
    }
}

/// The capability set a CPU family implements for the engine
pub trait CpuBackend {
    /// Directive that introduces a byte-array data line
    const BYTE_DIRECTIVE: &'static str;

    /// Directive that introduces a word-array data line
    const WORD_DIRECTIVE: &'static str;

    /// Directive that introduces a skip marker
    const SKIP_DIRECTIVE: &'static str;

    /// Pattern used when a byte does not decode to a documented operation.
    /// An unrecognized byte always decodes to something; the disassembler
    /// must never halt on data it cannot interpret as code.
    const FALLBACK_PATTERN: &'static str;

    /// Consume the opcode byte (and any prefix bytes) at the cursor and
    /// select the pattern for the operation. `None` falls back to
    /// [`Self::FALLBACK_PATTERN`].
    fn select_pattern(
        &self,
        ctx: &mut DecodeContext<'_>,
        options: &DisassemblyOptions,
    ) -> Option<OpPattern>;

    /// Expand the pragma `marker`, consuming whatever operand bytes its
    /// semantics require and registering labels for address-valued operands.
    fn expand_pragma(
        &self,
        marker: char,
        ctx: &mut DecodeContext<'_>,
        output: &mut DisassemblyOutput,
        options: &DisassemblyOptions,
    ) -> PragmaExpansion;
}

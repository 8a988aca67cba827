//! Disassembly options shared by all CPU backends

use serde::{Deserialize, Serialize};

/// Options recognized by the engine and its backends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisassemblyOptions {
    /// Emit decimal operands instead of `$`-prefixed hexadecimal
    pub decimal_mode: bool,

    /// Emit raw `$addr` references instead of `Laddr` generated labels
    pub no_label_prefix: bool,

    /// Permit the vendor-extended opcode set under the two-byte extended
    /// prefix (Z80 family only); otherwise those opcodes decode as `nop`
    pub allow_extended_set: bool,
}

impl DisassemblyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decimal_mode(mut self, value: bool) -> Self {
        self.decimal_mode = value;
        self
    }

    pub fn no_label_prefix(mut self, value: bool) -> Self {
        self.no_label_prefix = value;
        self
    }

    pub fn allow_extended_set(mut self, value: bool) -> Self {
        self.allow_extended_set = value;
        self
    }
}

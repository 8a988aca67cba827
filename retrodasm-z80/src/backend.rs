//! # Z80 Backend
//!
//! Pattern selection walks the four prefix forms of the Z80 encoding: `ED`
//! (extended operations), `CB` (bit operations), `DD`/`FD` (IX/IY indexed
//! operations), and the two-level `DD CB`/`FD CB` chain (indexed bit
//! operations, where the displacement byte sits *between* the two prefix
//! levels). Bit-operation patterns are derived from the opcode's bit fields
//! instead of a 256-entry table.

use retrodasm_core::backend::{CpuBackend, OpPattern, PragmaExpansion};
use retrodasm_core::context::{DecodeContext, IndexMode};
use retrodasm_core::format::{int_to_x2, int_to_x4, to_sbyte, to_decimal5};
use retrodasm_core::options::DisassemblyOptions;
use retrodasm_core::output::DisassemblyOutput;

use crate::tables::{
    extended_pattern, indexed_pattern, is_extended_set_op, Q8_REGS, SHIFT_OPS,
    STANDARD_INSTRUCTIONS,
};

/// The Z80 CPU family
#[derive(Clone, Copy, Debug, Default)]
pub struct Z80Backend;

impl Z80Backend {
    pub fn new() -> Self {
        Self
    }

    /// Derive the bit-operation pattern for a `CB`-prefixed opcode
    fn bit_pattern(op: u8) -> &'static str {
        if op < 0x40 {
            match op >> 3 {
                0x00 => "rlc ^s",
                0x01 => "rrc ^s",
                0x02 => "rl ^s",
                0x03 => "rr ^s",
                0x04 => "sla ^s",
                0x05 => "sra ^s",
                0x06 => "sll ^s",
                _ => "srl ^s",
            }
        } else if op < 0x80 {
            "bit ^b,^s"
        } else if op < 0xc0 {
            "res ^b,^s"
        } else {
            "set ^b,^s"
        }
    }

    /// Derive the pattern for an indexed bit operation (`DD CB d op`).
    /// Shift and res/set forms below name a result register on bits 0-2
    /// unless that field selects the memory operand itself.
    fn indexed_bit_pattern(op: u8) -> String {
        if op < 0x40 {
            let mut pattern = format!("{} (^X^D)", SHIFT_OPS[(op >> 3) as usize]);
            if op & 0x07 != 0x06 {
                pattern.push_str(",^s");
            }
            pattern
        } else if op < 0x80 {
            "bit ^b,(^X^D)".to_string()
        } else if op < 0xc0 {
            if op & 0x07 == 0x06 {
                "res ^b,(^X^D)".to_string()
            } else {
                "res ^b,(^X^D),^s".to_string()
            }
        } else if op & 0x07 == 0x06 {
            "set ^b,(^X^D)".to_string()
        } else {
            "set ^b,(^X^D),^s".to_string()
        }
    }

    /// Select the pattern for an opcode under the `DD`/`FD` index prefix
    fn indexed_operation(ctx: &mut DecodeContext<'_>) -> OpPattern {
        ctx.opcode = ctx.fetch();
        if ctx.opcode != 0xcb {
            let pattern = indexed_pattern(ctx.opcode)
                .unwrap_or(STANDARD_INSTRUCTIONS[ctx.opcode as usize]);
            if pattern.contains("^D") {
                ctx.displacement = Some(ctx.fetch());
            }
            return OpPattern::new(pattern);
        }
        // Indexed bit operation: displacement precedes the sub-opcode
        ctx.displacement = Some(ctx.fetch());
        ctx.opcode = ctx.fetch();
        OpPattern::new(Self::indexed_bit_pattern(ctx.opcode))
    }

    fn label_name(address: u16, options: &DisassemblyOptions) -> String {
        let prefix = if options.no_label_prefix { "$" } else { "L" };
        let digits = if options.decimal_mode {
            to_decimal5(address)
        } else {
            int_to_x4(address)
        };
        format!("{prefix}{digits}")
    }

    fn format_byte(value: u8, options: &DisassemblyOptions) -> String {
        if options.decimal_mode {
            value.to_string()
        } else {
            format!("${}", int_to_x2(value))
        }
    }

    fn format_word(value: u16, options: &DisassemblyOptions) -> String {
        if options.decimal_mode {
            value.to_string()
        } else {
            format!("${}", int_to_x4(value))
        }
    }
}

impl CpuBackend for Z80Backend {
    const BYTE_DIRECTIVE: &'static str = ".defb";
    const WORD_DIRECTIVE: &'static str = ".defw";
    const SKIP_DIRECTIVE: &'static str = ".skip";
    const FALLBACK_PATTERN: &'static str = "nop";

    fn select_pattern(
        &self,
        ctx: &mut DecodeContext<'_>,
        options: &DisassemblyOptions,
    ) -> Option<OpPattern> {
        ctx.opcode = ctx.fetch();
        match ctx.opcode {
            0xed => {
                ctx.opcode = ctx.fetch();
                if !options.allow_extended_set && is_extended_set_op(ctx.opcode) {
                    return Some(OpPattern::new(Self::FALLBACK_PATTERN));
                }
                Some(OpPattern::new(
                    extended_pattern(ctx.opcode).unwrap_or(Self::FALLBACK_PATTERN),
                ))
            }
            0xcb => {
                ctx.opcode = ctx.fetch();
                Some(OpPattern::new(Self::bit_pattern(ctx.opcode)))
            }
            0xdd => {
                ctx.index_mode = IndexMode::Ix;
                Some(Self::indexed_operation(ctx))
            }
            0xfd => {
                ctx.index_mode = IndexMode::Iy;
                Some(Self::indexed_operation(ctx))
            }
            op => Some(OpPattern::new(STANDARD_INSTRUCTIONS[op as usize])),
        }
    }

    fn expand_pragma(
        &self,
        marker: char,
        ctx: &mut DecodeContext<'_>,
        output: &mut DisassemblyOutput,
        options: &DisassemblyOptions,
    ) -> PragmaExpansion {
        match marker {
            // Bit index encoded on bits 3-5 of the opcode
            'b' => PragmaExpansion::text(((ctx.opcode & 0x38) >> 3).to_string()),
            // Relative label: signed 8-bit offset from the following operation
            'r' => {
                let distance = ctx.fetch();
                let target = ctx
                    .op_address()
                    .wrapping_add(2)
                    .wrapping_add(to_sbyte(distance) as u16);
                output.create_label(target, Some(ctx.op_address()));
                PragmaExpansion::label(Self::label_name(target, options), target)
            }
            // Absolute label: 16-bit target address
            'L' => {
                let target = ctx.fetch_word();
                output.create_label(target, Some(ctx.op_address()));
                PragmaExpansion::label(Self::label_name(target, options), target)
            }
            // 8-bit register encoded on bits 0-2 of the opcode
            's' => PragmaExpansion::text(Q8_REGS[(ctx.opcode & 0x07) as usize]),
            // 8-bit value from the code
            'B' => {
                let value = ctx.fetch();
                PragmaExpansion::symbol(Self::format_byte(value, options), value as u16)
            }
            // 16-bit word from the code, little endian
            'W' => {
                let word = ctx.fetch_word();
                PragmaExpansion::symbol(Self::format_word(word, options), word)
            }
            // 16-bit word from the code, big endian
            'w' => {
                let word = ctx.fetch_word_be();
                PragmaExpansion::symbol(Self::format_word(word, options), word)
            }
            // Index register per the current index mode
            'X' => PragmaExpansion::text(match ctx.index_mode {
                IndexMode::Iy => "iy",
                _ => "ix",
            }),
            // Low 8-bit half of the index register
            'l' => PragmaExpansion::text(match ctx.index_mode {
                IndexMode::Iy => "yl",
                _ => "xl",
            }),
            // High 8-bit half of the index register
            'h' => PragmaExpansion::text(match ctx.index_mode {
                IndexMode::Iy => "yh",
                _ => "xh",
            }),
            // Signed index displacement; zero displacement renders empty
            'D' => {
                let expansion = match ctx.displacement {
                    Some(d) if d != 0 => {
                        let signed = to_sbyte(d);
                        if signed < 0 {
                            let magnitude = (0x100 - d as u16) as u8;
                            if options.decimal_mode {
                                format!("-{magnitude}")
                            } else {
                                format!("-${}", int_to_x2(magnitude))
                            }
                        } else if options.decimal_mode {
                            format!("+{d}")
                        } else {
                            format!("+${}", int_to_x2(d))
                        }
                    }
                    _ => String::new(),
                };
                PragmaExpansion::text(expansion)
            }
            _ => PragmaExpansion::default(),
        }
    }
}

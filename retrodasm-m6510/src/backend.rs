//! # M6510 Backend
//!
//! The 6502 family has no prefix bytes; every operation is one table hit.
//! The pragma letters cover the twelve addressing modes, and the table
//! carries per-operation cycle counts.

use retrodasm_core::backend::{CpuBackend, OpPattern, PragmaExpansion};
use retrodasm_core::context::DecodeContext;
use retrodasm_core::format::{int_to_x2, int_to_x4, to_sbyte, to_decimal5};
use retrodasm_core::options::DisassemblyOptions;
use retrodasm_core::output::DisassemblyOutput;

use crate::tables::M6510_INSTRUCTIONS;

/// The M6510 (6502-family) CPU
#[derive(Clone, Copy, Debug, Default)]
pub struct M6510Backend;

impl M6510Backend {
    pub fn new() -> Self {
        Self
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

impl CpuBackend for M6510Backend {
    const BYTE_DIRECTIVE: &'static str = ".byte";
    const WORD_DIRECTIVE: &'static str = ".word";
    const SKIP_DIRECTIVE: &'static str = ".skip";
    const FALLBACK_PATTERN: &'static str = "???";

    fn select_pattern(
        &self,
        ctx: &mut DecodeContext<'_>,
        _options: &DisassemblyOptions,
    ) -> Option<OpPattern> {
        ctx.opcode = ctx.fetch();
        let entry = M6510_INSTRUCTIONS[ctx.opcode as usize];
        match entry.split_once('|') {
            Some((pattern, cycles)) => match cycles.parse::<u8>() {
                Ok(cycles) => Some(OpPattern::with_cycles(pattern, cycles)),
                Err(_) => Some(OpPattern::new(pattern)),
            },
            None => Some(OpPattern::new(entry)),
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
            // Immediate value
            'I' => {
                let value = ctx.fetch();
                let text = if options.decimal_mode {
                    format!("#{value}")
                } else {
                    format!("#${}", int_to_x2(value))
                };
                PragmaExpansion::symbol(text, value as u16)
            }
            // Zero page
            'Z' => {
                let addr = ctx.fetch();
                PragmaExpansion::symbol(Self::format_byte(addr, options), addr as u16)
            }
            // Zero page indexed
            'X' => {
                let addr = ctx.fetch();
                let text = format!("{},x", Self::format_byte(addr, options));
                PragmaExpansion::symbol(text, addr as u16)
            }
            'Y' => {
                let addr = ctx.fetch();
                let text = format!("{},y", Self::format_byte(addr, options));
                PragmaExpansion::symbol(text, addr as u16)
            }
            // Absolute
            'A' => {
                let addr = ctx.fetch_word();
                PragmaExpansion::symbol(Self::format_word(addr, options), addr)
            }
            // Absolute jump target
            'J' => {
                let target = ctx.fetch_word();
                output.create_label(target, Some(ctx.op_address()));
                PragmaExpansion::label(Self::label_name(target, options), target)
            }
            // Absolute indexed
            'U' => {
                let addr = ctx.fetch_word();
                let text = format!("{},x", Self::format_word(addr, options));
                PragmaExpansion::symbol(text, addr)
            }
            'V' => {
                let addr = ctx.fetch_word();
                let text = format!("{},y", Self::format_word(addr, options));
                PragmaExpansion::symbol(text, addr)
            }
            // Relative branch target
            'R' => {
                let distance = ctx.fetch();
                let target = ctx
                    .op_address()
                    .wrapping_add(2)
                    .wrapping_add(to_sbyte(distance) as u16);
                output.create_label(target, Some(ctx.op_address()));
                PragmaExpansion::label(Self::label_name(target, options), target)
            }
            // Indexed indirect
            'N' => {
                let addr = ctx.fetch();
                let text = format!("({},x)", Self::format_byte(addr, options));
                PragmaExpansion::symbol(text, addr as u16)
            }
            // Indirect indexed
            'M' => {
                let addr = ctx.fetch();
                let text = format!("({}),y", Self::format_byte(addr, options));
                PragmaExpansion::symbol(text, addr as u16)
            }
            // Indirect jump vector
            'P' => {
                let addr = ctx.fetch_word();
                let text = format!("({})", Self::format_word(addr, options));
                PragmaExpansion::symbol(text, addr)
            }
            _ => PragmaExpansion::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_one(bytes: &[u8]) -> (String, Option<u8>) {
        decode_one_with(bytes, DisassemblyOptions::new())
    }

    fn decode_one_with(bytes: &[u8], options: DisassemblyOptions) -> (String, Option<u8>) {
        let backend = M6510Backend::new();
        let mut ctx = DecodeContext::new(bytes, 0);
        let mut output = DisassemblyOutput::new();
        ctx.begin_operation();
        let pattern = backend.select_pattern(&mut ctx, &options).unwrap();
        let mut instruction = pattern.text.into_owned();
        while let Some(index) = instruction.find('^') {
            let marker = instruction[index + 1..].chars().next().unwrap();
            let expansion = backend.expand_pragma(marker, &mut ctx, &mut output, &options);
            instruction = format!(
                "{}{}{}",
                &instruction[..index],
                expansion.replacement,
                &instruction[index + 2..]
            );
        }
        (instruction, pattern.cycles)
    }

    #[test]
    fn test_implied_and_immediate() {
        assert_eq!(decode_one(&[0xea]), ("nop".to_string(), Some(2)));
        assert_eq!(decode_one(&[0xa9, 0x42]), ("lda #$42".to_string(), Some(2)));
    }

    #[test]
    fn test_zero_page_modes() {
        assert_eq!(decode_one(&[0xa5, 0x10]).0, "lda $10");
        assert_eq!(decode_one(&[0xb5, 0x10]).0, "lda $10,x");
        assert_eq!(decode_one(&[0xb6, 0x10]).0, "ldx $10,y");
    }

    #[test]
    fn test_absolute_modes() {
        assert_eq!(decode_one(&[0xad, 0x00, 0xd0]).0, "lda $D000");
        assert_eq!(decode_one(&[0xbd, 0x00, 0xd0]).0, "lda $D000,x");
        assert_eq!(decode_one(&[0xb9, 0x00, 0xd0]).0, "lda $D000,y");
    }

    #[test]
    fn test_indirect_modes() {
        assert_eq!(decode_one(&[0xa1, 0x20]).0, "lda ($20,x)");
        assert_eq!(decode_one(&[0xb1, 0x20]).0, "lda ($20),y");
        assert_eq!(decode_one(&[0x6c, 0x00, 0x03]).0, "jmp ($0300)");
    }

    #[test]
    fn test_jump_and_branch_labels() {
        assert_eq!(decode_one(&[0x20, 0x00, 0xc0]).0, "jsr LC000");
        assert_eq!(decode_one(&[0xd0, 0xfe]).0, "bne L0000");
        assert_eq!(decode_one(&[0xf0, 0x02]).0, "beq L0004");
    }

    #[test]
    fn test_undocumented_opcodes() {
        assert_eq!(decode_one(&[0x03, 0x10]), ("slo ($10,x)".to_string(), Some(8)));
        assert_eq!(decode_one(&[0x02]), ("jam".to_string(), Some(2)));
        assert_eq!(decode_one(&[0xcb, 0x05]).0, "axs #$05");
    }

    #[test]
    fn test_decimal_mode() {
        let options = DisassemblyOptions::new().decimal_mode(true);
        assert_eq!(decode_one_with(&[0xa9, 0x42], options).0, "lda #66");
        assert_eq!(decode_one_with(&[0xad, 0x00, 0xd0], options).0, "lda 53248");
        assert_eq!(decode_one_with(&[0xb1, 0x20], options).0, "lda (32),y");
        assert_eq!(decode_one_with(&[0x4c, 0x00, 0xc0], options).0, "jmp L49152");
    }
}

//! M6510 opcode pattern table
//!
//! One flat 256-entry table, no prefixes. Each entry is `"pattern|cycles"`;
//! the pattern may contain one `^<letter>` addressing-mode pragma:
//!
//! - `^I` immediate (`#$nn`)
//! - `^Z` zero page (`$nn`)
//! - `^X` / `^Y` zero page indexed (`$nn,x` / `$nn,y`)
//! - `^A` absolute (`$nnnn`)
//! - `^J` absolute jump target (creates a label)
//! - `^U` / `^V` absolute indexed (`$nnnn,x` / `$nnnn,y`)
//! - `^R` relative branch target (creates a label)
//! - `^N` indexed indirect (`($nn,x)`)
//! - `^M` indirect indexed (`($nn),y`)
//! - `^P` indirect (`($nnnn)`)
//!
//! The undocumented opcodes are listed under their common mnemonics; the
//! `jam` entries are the halt opcodes.

/// Patterns for the full opcode space, undocumented operations included
pub const M6510_INSTRUCTIONS: [&str; 256] = [
    /* 0x00 */ "brk|7",
    /* 0x01 */ "ora ^N|6",
    /* 0x02 */ "jam|2",
    /* 0x03 */ "slo ^N|8",
    /* 0x04 */ "nop ^Z|3",
    /* 0x05 */ "ora ^Z|3",
    /* 0x06 */ "asl ^Z|5",
    /* 0x07 */ "slo ^Z|5",
    /* 0x08 */ "php|3",
    /* 0x09 */ "ora ^I|2",
    /* 0x0a */ "asl|2",
    /* 0x0b */ "aac ^I|2",
    /* 0x0c */ "nop ^A|4",
    /* 0x0d */ "ora ^A|4",
    /* 0x0e */ "asl ^A|6",
    /* 0x0f */ "slo ^A|6",
    /* 0x10 */ "bpl ^R|2",
    /* 0x11 */ "ora ^M|5",
    /* 0x12 */ "jam|2",
    /* 0x13 */ "slo ^M|8",
    /* 0x14 */ "nop ^X|4",
    /* 0x15 */ "ora ^X|4",
    /* 0x16 */ "asl ^X|6",
    /* 0x17 */ "slo ^X|6",
    /* 0x18 */ "clc|2",
    /* 0x19 */ "ora ^V|4",
    /* 0x1a */ "nop|2",
    /* 0x1b */ "slo ^V|7",
    /* 0x1c */ "nop ^U|4",
    /* 0x1d */ "ora ^U|4",
    /* 0x1e */ "asl ^U|7",
    /* 0x1f */ "slo ^U|7",
    /* 0x20 */ "jsr ^J|6",
    /* 0x21 */ "and ^N|6",
    /* 0x22 */ "jam|2",
    /* 0x23 */ "rla ^N|8",
    /* 0x24 */ "bit ^Z|3",
    /* 0x25 */ "and ^Z|3",
    /* 0x26 */ "rol ^Z|5",
    /* 0x27 */ "rla ^Z|5",
    /* 0x28 */ "plp|4",
    /* 0x29 */ "and ^I|2",
    /* 0x2a */ "rol|2",
    /* 0x2b */ "aac ^I|2",
    /* 0x2c */ "bit ^A|4",
    /* 0x2d */ "and ^A|4",
    /* 0x2e */ "rol ^A|6",
    /* 0x2f */ "rla ^A|6",
    /* 0x30 */ "bmi ^R|2",
    /* 0x31 */ "and ^M|5",
    /* 0x32 */ "jam|2",
    /* 0x33 */ "rla ^M|8",
    /* 0x34 */ "nop ^X|4",
    /* 0x35 */ "and ^X|4",
    /* 0x36 */ "rol ^X|6",
    /* 0x37 */ "rla ^X|6",
    /* 0x38 */ "sec|2",
    /* 0x39 */ "and ^V|4",
    /* 0x3a */ "nop|2",
    /* 0x3b */ "rla ^V|7",
    /* 0x3c */ "nop ^U|4",
    /* 0x3d */ "and ^U|4",
    /* 0x3e */ "rol ^U|7",
    /* 0x3f */ "rla ^U|7",
    /* 0x40 */ "rti|6",
    /* 0x41 */ "eor ^N|6",
    /* 0x42 */ "jam|2",
    /* 0x43 */ "sre ^N|8",
    /* 0x44 */ "nop ^Z|3",
    /* 0x45 */ "eor ^Z|3",
    /* 0x46 */ "lsr ^Z|5",
    /* 0x47 */ "sre ^Z|5",
    /* 0x48 */ "pha|3",
    /* 0x49 */ "eor ^I|2",
    /* 0x4a */ "lsr|2",
    /* 0x4b */ "asr ^I|2",
    /* 0x4c */ "jmp ^J|3",
    /* 0x4d */ "eor ^A|4",
    /* 0x4e */ "lsr ^A|6",
    /* 0x4f */ "sre ^A|6",
    /* 0x50 */ "bvc ^R|2",
    /* 0x51 */ "eor ^M|5",
    /* 0x52 */ "jam|2",
    /* 0x53 */ "sre ^M|8",
    /* 0x54 */ "nop ^X|4",
    /* 0x55 */ "eor ^X|4",
    /* 0x56 */ "lsr ^X|6",
    /* 0x57 */ "sre ^X|6",
    /* 0x58 */ "cli|2",
    /* 0x59 */ "eor ^V|4",
    /* 0x5a */ "nop|2",
    /* 0x5b */ "sre ^V|7",
    /* 0x5c */ "nop ^U|4",
    /* 0x5d */ "eor ^U|4",
    /* 0x5e */ "lsr ^U|7",
    /* 0x5f */ "sre ^U|7",
    /* 0x60 */ "rts|6",
    /* 0x61 */ "adc ^N|6",
    /* 0x62 */ "jam|2",
    /* 0x63 */ "rra ^N|8",
    /* 0x64 */ "nop ^Z|3",
    /* 0x65 */ "adc ^Z|3",
    /* 0x66 */ "ror ^Z|5",
    /* 0x67 */ "rra ^Z|5",
    /* 0x68 */ "pla|4",
    /* 0x69 */ "adc ^I|2",
    /* 0x6a */ "ror|2",
    /* 0x6b */ "arr ^I|2",
    /* 0x6c */ "jmp ^P|5",
    /* 0x6d */ "adc ^A|4",
    /* 0x6e */ "ror ^A|6",
    /* 0x6f */ "rra ^A|6",
    /* 0x70 */ "bvs ^R|2",
    /* 0x71 */ "adc ^M|5",
    /* 0x72 */ "jam|2",
    /* 0x73 */ "rra ^M|8",
    /* 0x74 */ "nop ^X|4",
    /* 0x75 */ "adc ^X|4",
    /* 0x76 */ "ror ^X|6",
    /* 0x77 */ "rra ^X|6",
    /* 0x78 */ "sei|2",
    /* 0x79 */ "adc ^V|4",
    /* 0x7a */ "nop|2",
    /* 0x7b */ "rra ^V|7",
    /* 0x7c */ "nop ^U|4",
    /* 0x7d */ "adc ^U|4",
    /* 0x7e */ "ror ^U|7",
    /* 0x7f */ "rra ^U|7",
    /* 0x80 */ "nop ^I|2",
    /* 0x81 */ "sta ^N|6",
    /* 0x82 */ "nop ^I|2",
    /* 0x83 */ "sax ^N|6",
    /* 0x84 */ "sty ^Z|3",
    /* 0x85 */ "sta ^Z|3",
    /* 0x86 */ "stx ^Z|3",
    /* 0x87 */ "sax ^Z|3",
    /* 0x88 */ "dey|2",
    /* 0x89 */ "nop ^I|2",
    /* 0x8a */ "txa|2",
    /* 0x8b */ "xaa ^I|2",
    /* 0x8c */ "sty ^A|4",
    /* 0x8d */ "sta ^A|4",
    /* 0x8e */ "stx ^A|4",
    /* 0x8f */ "sax ^A|4",
    /* 0x90 */ "bcc ^R|2",
    /* 0x91 */ "sta ^M|6",
    /* 0x92 */ "jam|2",
    /* 0x93 */ "axa ^M|6",
    /* 0x94 */ "sty ^X|4",
    /* 0x95 */ "sta ^X|4",
    /* 0x96 */ "stx ^Y|4",
    /* 0x97 */ "sax ^Y|4",
    /* 0x98 */ "tya|2",
    /* 0x99 */ "sta ^V|5",
    /* 0x9a */ "txs|2",
    /* 0x9b */ "xas ^V|5",
    /* 0x9c */ "sya ^U|5",
    /* 0x9d */ "sta ^U|5",
    /* 0x9e */ "sxa ^V|5",
    /* 0x9f */ "axa ^V|5",
    /* 0xa0 */ "ldy ^I|2",
    /* 0xa1 */ "lda ^N|6",
    /* 0xa2 */ "ldx ^I|2",
    /* 0xa3 */ "lax ^N|6",
    /* 0xa4 */ "ldy ^Z|3",
    /* 0xa5 */ "lda ^Z|3",
    /* 0xa6 */ "ldx ^Z|3",
    /* 0xa7 */ "lax ^Z|3",
    /* 0xa8 */ "tay|2",
    /* 0xa9 */ "lda ^I|2",
    /* 0xaa */ "tax|2",
    /* 0xab */ "atx ^I|2",
    /* 0xac */ "ldy ^A|4",
    /* 0xad */ "lda ^A|4",
    /* 0xae */ "ldx ^A|4",
    /* 0xaf */ "lax ^A|4",
    /* 0xb0 */ "bcs ^R|2",
    /* 0xb1 */ "lda ^M|5",
    /* 0xb2 */ "jam|2",
    /* 0xb3 */ "lax ^M|5",
    /* 0xb4 */ "ldy ^X|4",
    /* 0xb5 */ "lda ^X|4",
    /* 0xb6 */ "ldx ^Y|4",
    /* 0xb7 */ "lax ^Y|4",
    /* 0xb8 */ "clv|2",
    /* 0xb9 */ "lda ^V|4",
    /* 0xba */ "tsx|2",
    /* 0xbb */ "lar ^V|4",
    /* 0xbc */ "ldy ^U|4",
    /* 0xbd */ "lda ^U|4",
    /* 0xbe */ "ldx ^V|4",
    /* 0xbf */ "lax ^V|4",
    /* 0xc0 */ "cpy ^I|2",
    /* 0xc1 */ "cmp ^N|6",
    /* 0xc2 */ "nop ^I|2",
    /* 0xc3 */ "dcp ^N|8",
    /* 0xc4 */ "cpy ^Z|3",
    /* 0xc5 */ "cmp ^Z|3",
    /* 0xc6 */ "dec ^Z|5",
    /* 0xc7 */ "dcp ^Z|5",
    /* 0xc8 */ "iny|2",
    /* 0xc9 */ "cmp ^I|2",
    /* 0xca */ "dex|2",
    /* 0xcb */ "axs ^I|2",
    /* 0xcc */ "cpy ^A|4",
    /* 0xcd */ "cmp ^A|4",
    /* 0xce */ "dec ^A|6",
    /* 0xcf */ "dcp ^A|6",
    /* 0xd0 */ "bne ^R|2",
    /* 0xd1 */ "cmp ^M|5",
    /* 0xd2 */ "jam|2",
    /* 0xd3 */ "dcp ^M|8",
    /* 0xd4 */ "nop ^X|4",
    /* 0xd5 */ "cmp ^X|4",
    /* 0xd6 */ "dec ^X|6",
    /* 0xd7 */ "dcp ^X|6",
    /* 0xd8 */ "cld|2",
    /* 0xd9 */ "cmp ^V|4",
    /* 0xda */ "nop|2",
    /* 0xdb */ "dcp ^V|7",
    /* 0xdc */ "nop ^U|4",
    /* 0xdd */ "cmp ^U|4",
    /* 0xde */ "dec ^U|7",
    /* 0xdf */ "dcp ^U|7",
    /* 0xe0 */ "cpx ^I|2",
    /* 0xe1 */ "sbc ^N|6",
    /* 0xe2 */ "nop ^I|2",
    /* 0xe3 */ "isc ^N|8",
    /* 0xe4 */ "cpx ^Z|3",
    /* 0xe5 */ "sbc ^Z|3",
    /* 0xe6 */ "inc ^Z|5",
    /* 0xe7 */ "isc ^Z|5",
    /* 0xe8 */ "inx|2",
    /* 0xe9 */ "sbc ^I|2",
    /* 0xea */ "nop|2",
    /* 0xeb */ "sbc ^I|2",
    /* 0xec */ "cpx ^A|4",
    /* 0xed */ "sbc ^A|4",
    /* 0xee */ "inc ^A|6",
    /* 0xef */ "isc ^A|6",
    /* 0xf0 */ "beq ^R|2",
    /* 0xf1 */ "sbc ^M|5",
    /* 0xf2 */ "jam|2",
    /* 0xf3 */ "isc ^M|8",
    /* 0xf4 */ "nop ^X|4",
    /* 0xf5 */ "sbc ^X|4",
    /* 0xf6 */ "inc ^X|6",
    /* 0xf7 */ "isc ^X|6",
    /* 0xf8 */ "sed|2",
    /* 0xf9 */ "sbc ^V|4",
    /* 0xfa */ "nop|2",
    /* 0xfb */ "isc ^V|7",
    /* 0xfc */ "nop ^U|4",
    /* 0xfd */ "sbc ^U|4",
    /* 0xfe */ "inc ^U|7",
    /* 0xff */ "isc ^U|7",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_carries_cycles() {
        for (op, entry) in M6510_INSTRUCTIONS.iter().enumerate() {
            let (pattern, cycles) = entry.split_once('|').expect("missing cycle count");
            assert!(!pattern.is_empty(), "empty pattern for {op:#04x}");
            let cycles: u8 = cycles.parse().expect("bad cycle count");
            assert!((2..=8).contains(&cycles), "cycles out of range for {op:#04x}");
        }
    }

    #[test]
    fn test_single_pragma_per_pattern() {
        for entry in M6510_INSTRUCTIONS {
            assert!(entry.matches('^').count() <= 1);
        }
    }
}

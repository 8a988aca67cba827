//! Z80 opcode pattern tables
//!
//! Pattern strings may contain `^<letter>` pragma markers where an operand
//! must be decoded and substituted:
//!
//! - `^b` bit index encoded on bits 3-5 of the opcode
//! - `^s` 8-bit register encoded on bits 0-2 of the opcode
//! - `^B` 8-bit immediate from the code
//! - `^W` 16-bit word from the code, little endian
//! - `^w` 16-bit word from the code, big endian
//! - `^L` absolute label (16-bit address, creates a label)
//! - `^r` relative label (8-bit signed offset, creates a label)
//! - `^X` index register name (ix/iy) per the current index mode
//! - `^h` / `^l` high/low 8-bit half of the index register
//! - `^D` signed index displacement

/// 8-bit register names for the `^s` pragma
pub const Q8_REGS: [&str; 8] = ["b", "c", "d", "e", "h", "l", "(hl)", "a"];

/// Patterns for the unprefixed opcode set. Empty entries are prefix bytes.
pub const STANDARD_INSTRUCTIONS: [&str; 256] = [
    /* 0x00 */ "nop",
    /* 0x01 */ "ld bc,^W",
    /* 0x02 */ "ld (bc),a",
    /* 0x03 */ "inc bc",
    /* 0x04 */ "inc b",
    /* 0x05 */ "dec b",
    /* 0x06 */ "ld b,^B",
    /* 0x07 */ "rlca",
    /* 0x08 */ "ex af,af'",
    /* 0x09 */ "add hl,bc",
    /* 0x0a */ "ld a,(bc)",
    /* 0x0b */ "dec bc",
    /* 0x0c */ "inc c",
    /* 0x0d */ "dec c",
    /* 0x0e */ "ld c,^B",
    /* 0x0f */ "rrca",
    /* 0x10 */ "djnz ^r",
    /* 0x11 */ "ld de,^W",
    /* 0x12 */ "ld (de),a",
    /* 0x13 */ "inc de",
    /* 0x14 */ "inc d",
    /* 0x15 */ "dec d",
    /* 0x16 */ "ld d,^B",
    /* 0x17 */ "rla",
    /* 0x18 */ "jr ^r",
    /* 0x19 */ "add hl,de",
    /* 0x1a */ "ld a,(de)",
    /* 0x1b */ "dec de",
    /* 0x1c */ "inc e",
    /* 0x1d */ "dec e",
    /* 0x1e */ "ld e,^B",
    /* 0x1f */ "rra",
    /* 0x20 */ "jr nz,^r",
    /* 0x21 */ "ld hl,^W",
    /* 0x22 */ "ld (^W),hl",
    /* 0x23 */ "inc hl",
    /* 0x24 */ "inc h",
    /* 0x25 */ "dec h",
    /* 0x26 */ "ld h,^B",
    /* 0x27 */ "daa",
    /* 0x28 */ "jr z,^r",
    /* 0x29 */ "add hl,hl",
    /* 0x2a */ "ld hl,(^W)",
    /* 0x2b */ "dec hl",
    /* 0x2c */ "inc l",
    /* 0x2d */ "dec l",
    /* 0x2e */ "ld l,^B",
    /* 0x2f */ "cpl",
    /* 0x30 */ "jr nc,^r",
    /* 0x31 */ "ld sp,^W",
    /* 0x32 */ "ld (^W),a",
    /* 0x33 */ "inc sp",
    /* 0x34 */ "inc (hl)",
    /* 0x35 */ "dec (hl)",
    /* 0x36 */ "ld (hl),^B",
    /* 0x37 */ "scf",
    /* 0x38 */ "jr c,^r",
    /* 0x39 */ "add hl,sp",
    /* 0x3a */ "ld a,(^W)",
    /* 0x3b */ "dec sp",
    /* 0x3c */ "inc a",
    /* 0x3d */ "dec a",
    /* 0x3e */ "ld a,^B",
    /* 0x3f */ "ccf",
    /* 0x40 */ "ld b,b",
    /* 0x41 */ "ld b,c",
    /* 0x42 */ "ld b,d",
    /* 0x43 */ "ld b,e",
    /* 0x44 */ "ld b,h",
    /* 0x45 */ "ld b,l",
    /* 0x46 */ "ld b,(hl)",
    /* 0x47 */ "ld b,a",
    /* 0x48 */ "ld c,b",
    /* 0x49 */ "ld c,c",
    /* 0x4a */ "ld c,d",
    /* 0x4b */ "ld c,e",
    /* 0x4c */ "ld c,h",
    /* 0x4d */ "ld c,l",
    /* 0x4e */ "ld c,(hl)",
    /* 0x4f */ "ld c,a",
    /* 0x50 */ "ld d,b",
    /* 0x51 */ "ld d,c",
    /* 0x52 */ "ld d,d",
    /* 0x53 */ "ld d,e",
    /* 0x54 */ "ld d,h",
    /* 0x55 */ "ld d,l",
    /* 0x56 */ "ld d,(hl)",
    /* 0x57 */ "ld d,a",
    /* 0x58 */ "ld e,b",
    /* 0x59 */ "ld e,c",
    /* 0x5a */ "ld e,d",
    /* 0x5b */ "ld e,e",
    /* 0x5c */ "ld e,h",
    /* 0x5d */ "ld e,l",
    /* 0x5e */ "ld e,(hl)",
    /* 0x5f */ "ld e,a",
    /* 0x60 */ "ld h,b",
    /* 0x61 */ "ld h,c",
    /* 0x62 */ "ld h,d",
    /* 0x63 */ "ld h,e",
    /* 0x64 */ "ld h,h",
    /* 0x65 */ "ld h,l",
    /* 0x66 */ "ld h,(hl)",
    /* 0x67 */ "ld h,a",
    /* 0x68 */ "ld l,b",
    /* 0x69 */ "ld l,c",
    /* 0x6a */ "ld l,d",
    /* 0x6b */ "ld l,e",
    /* 0x6c */ "ld l,h",
    /* 0x6d */ "ld l,l",
    /* 0x6e */ "ld l,(hl)",
    /* 0x6f */ "ld l,a",
    /* 0x70 */ "ld (hl),b",
    /* 0x71 */ "ld (hl),c",
    /* 0x72 */ "ld (hl),d",
    /* 0x73 */ "ld (hl),e",
    /* 0x74 */ "ld (hl),h",
    /* 0x75 */ "ld (hl),l",
    /* 0x76 */ "halt",
    /* 0x77 */ "ld (hl),a",
    /* 0x78 */ "ld a,b",
    /* 0x79 */ "ld a,c",
    /* 0x7a */ "ld a,d",
    /* 0x7b */ "ld a,e",
    /* 0x7c */ "ld a,h",
    /* 0x7d */ "ld a,l",
    /* 0x7e */ "ld a,(hl)",
    /* 0x7f */ "ld a,a",
    /* 0x80 */ "add a,b",
    /* 0x81 */ "add a,c",
    /* 0x82 */ "add a,d",
    /* 0x83 */ "add a,e",
    /* 0x84 */ "add a,h",
    /* 0x85 */ "add a,l",
    /* 0x86 */ "add a,(hl)",
    /* 0x87 */ "add a,a",
    /* 0x88 */ "adc a,b",
    /* 0x89 */ "adc a,c",
    /* 0x8a */ "adc a,d",
    /* 0x8b */ "adc a,e",
    /* 0x8c */ "adc a,h",
    /* 0x8d */ "adc a,l",
    /* 0x8e */ "adc a,(hl)",
    /* 0x8f */ "adc a,a",
    /* 0x90 */ "sub b",
    /* 0x91 */ "sub c",
    /* 0x92 */ "sub d",
    /* 0x93 */ "sub e",
    /* 0x94 */ "sub h",
    /* 0x95 */ "sub l",
    /* 0x96 */ "sub (hl)",
    /* 0x97 */ "sub a",
    /* 0x98 */ "sbc a,b",
    /* 0x99 */ "sbc a,c",
    /* 0x9a */ "sbc a,d",
    /* 0x9b */ "sbc a,e",
    /* 0x9c */ "sbc a,h",
    /* 0x9d */ "sbc a,l",
    /* 0x9e */ "sbc a,(hl)",
    /* 0x9f */ "sbc a,a",
    /* 0xa0 */ "and b",
    /* 0xa1 */ "and c",
    /* 0xa2 */ "and d",
    /* 0xa3 */ "and e",
    /* 0xa4 */ "and h",
    /* 0xa5 */ "and l",
    /* 0xa6 */ "and (hl)",
    /* 0xa7 */ "and a",
    /* 0xa8 */ "xor b",
    /* 0xa9 */ "xor c",
    /* 0xaa */ "xor d",
    /* 0xab */ "xor e",
    /* 0xac */ "xor h",
    /* 0xad */ "xor l",
    /* 0xae */ "xor (hl)",
    /* 0xaf */ "xor a",
    /* 0xb0 */ "or b",
    /* 0xb1 */ "or c",
    /* 0xb2 */ "or d",
    /* 0xb3 */ "or e",
    /* 0xb4 */ "or h",
    /* 0xb5 */ "or l",
    /* 0xb6 */ "or (hl)",
    /* 0xb7 */ "or a",
    /* 0xb8 */ "cp b",
    /* 0xb9 */ "cp c",
    /* 0xba */ "cp d",
    /* 0xbb */ "cp e",
    /* 0xbc */ "cp h",
    /* 0xbd */ "cp l",
    /* 0xbe */ "cp (hl)",
    /* 0xbf */ "cp a",
    /* 0xc0 */ "ret nz",
    /* 0xc1 */ "pop bc",
    /* 0xc2 */ "jp nz,^L",
    /* 0xc3 */ "jp ^L",
    /* 0xc4 */ "call nz,^L",
    /* 0xc5 */ "push bc",
    /* 0xc6 */ "add a,^B",
    /* 0xc7 */ "rst $00",
    /* 0xc8 */ "ret z",
    /* 0xc9 */ "ret",
    /* 0xca */ "jp z,^L",
    /* 0xcb */ "",
    /* 0xcc */ "call z,^L",
    /* 0xcd */ "call ^L",
    /* 0xce */ "adc a,^B",
    /* 0xcf */ "rst $08",
    /* 0xd0 */ "ret nc",
    /* 0xd1 */ "pop de",
    /* 0xd2 */ "jp nc,^L",
    /* 0xd3 */ "out (^B),a",
    /* 0xd4 */ "call nc,^L",
    /* 0xd5 */ "push de",
    /* 0xd6 */ "sub ^B",
    /* 0xd7 */ "rst $10",
    /* 0xd8 */ "ret c",
    /* 0xd9 */ "exx",
    /* 0xda */ "jp c,^L",
    /* 0xdb */ "in a,(^B)",
    /* 0xdc */ "call c,^L",
    /* 0xdd */ "",
    /* 0xde */ "sbc a,^B",
    /* 0xdf */ "rst $18",
    /* 0xe0 */ "ret po",
    /* 0xe1 */ "pop hl",
    /* 0xe2 */ "jp po,^L",
    /* 0xe3 */ "ex (sp),hl",
    /* 0xe4 */ "call po,^L",
    /* 0xe5 */ "push hl",
    /* 0xe6 */ "and ^B",
    /* 0xe7 */ "rst $20",
    /* 0xe8 */ "ret pe",
    /* 0xe9 */ "jp (hl)",
    /* 0xea */ "jp pe,^L",
    /* 0xeb */ "ex de,hl",
    /* 0xec */ "call pe,^L",
    /* 0xed */ "",
    /* 0xee */ "xor ^B",
    /* 0xef */ "rst $28",
    /* 0xf0 */ "ret p",
    /* 0xf1 */ "pop af",
    /* 0xf2 */ "jp p,^L",
    /* 0xf3 */ "di",
    /* 0xf4 */ "call p,^L",
    /* 0xf5 */ "push af",
    /* 0xf6 */ "or ^B",
    /* 0xf7 */ "rst $30",
    /* 0xf8 */ "ret m",
    /* 0xf9 */ "ld sp,hl",
    /* 0xfa */ "jp m,^L",
    /* 0xfb */ "ei",
    /* 0xfc */ "call m,^L",
    /* 0xfd */ "",
    /* 0xfe */ "cp ^B",
    /* 0xff */ "rst $38",
];

/// True for opcodes under the `ED` prefix that belong to the vendor-extended
/// (ZX Spectrum Next) set; they decode as `nop` unless the extended set is
/// allowed
pub fn is_extended_set_op(op: u8) -> bool {
    matches!(
        op,
        0x23 | 0x24
            | 0x27..=0x2c
            | 0x30..=0x36
            | 0x8a
            | 0x90..=0x95
            | 0x98
            | 0xa4
            | 0xa5
            | 0xac
            | 0xb4
            | 0xb7
            | 0xbc
    )
}

/// Pattern for an opcode under the `ED` prefix
pub fn extended_pattern(op: u8) -> Option<&'static str> {
    let pattern = match op {
        0x23 => "swapnib",
        0x24 => "mirror a",
        0x27 => "test ^B",
        0x28 => "bsla de,b",
        0x29 => "bsra de,b",
        0x2a => "bsrl de,b",
        0x2b => "bsrf de,b",
        0x2c => "brlc de,b",
        0x30 => "mul d,e",
        0x31 => "add hl,a",
        0x32 => "add de,a",
        0x33 => "add bc,a",
        0x34 => "add hl,^W",
        0x35 => "add de,^W",
        0x36 => "add bc,^W",
        0x40 => "in b,(c)",
        0x41 => "out (c),b",
        0x42 => "sbc hl,bc",
        0x43 => "ld (^W),bc",
        0x44 => "neg",
        0x45 => "retn",
        0x46 => "im 0",
        0x47 => "ld i,a",
        0x48 => "in c,(c)",
        0x49 => "out (c),c",
        0x4a => "adc hl,bc",
        0x4b => "ld bc,(^W)",
        0x4c => "neg",
        0x4d => "reti",
        0x4e => "im 0",
        0x4f => "ld r,a",
        0x50 => "in d,(c)",
        0x51 => "out (c),d",
        0x52 => "sbc hl,de",
        0x53 => "ld (^W),de",
        0x54 => "neg",
        0x55 => "retn",
        0x56 => "im 1",
        0x57 => "ld a,i",
        0x58 => "in e,(c)",
        0x59 => "out (c),e",
        0x5a => "adc hl,de",
        0x5b => "ld de,(^W)",
        0x5c => "neg",
        0x5d => "retn",
        0x5e => "im 2",
        0x5f => "ld a,r",
        0x60 => "in h,(c)",
        0x61 => "out (c),h",
        0x62 => "sbc hl,hl",
        0x63 => "ld (^W),hl",
        0x64 => "neg",
        0x65 => "retn",
        0x66 => "im 0",
        0x67 => "rrd",
        0x68 => "in l,(c)",
        0x69 => "out (c),l",
        0x6a => "adc hl,hl",
        0x6b => "ld hl,(^W)",
        0x6c => "neg",
        0x6d => "retn",
        0x6e => "im 0",
        0x6f => "rld",
        0x70 => "in (c)",
        0x71 => "out (c),0",
        0x72 => "sbc hl,sp",
        0x73 => "ld (^W),sp",
        0x74 => "neg",
        0x75 => "retn",
        0x76 => "im 1",
        0x78 => "in a,(c)",
        0x79 => "out (c),a",
        0x7a => "adc hl,sp",
        0x7b => "ld sp,(^W)",
        0x7c => "neg",
        0x7d => "retn",
        0x7e => "im 2",
        0x8a => "push ^w", // big endian
        0x90 => "outinb",
        0x91 => "nextreg ^B,^B",
        0x92 => "nextreg ^B,a",
        0x93 => "pixeldn",
        0x94 => "pixelad",
        0x95 => "setae",
        0x98 => "jp (c)",
        0xa0 => "ldi",
        0xa1 => "cpi",
        0xa2 => "ini",
        0xa3 => "outi",
        0xa4 => "ldix",
        0xa5 => "ldws",
        0xa8 => "ldd",
        0xa9 => "cpd",
        0xaa => "ind",
        0xab => "outd",
        0xac => "lddx",
        0xb0 => "ldir",
        0xb1 => "cpir",
        0xb2 => "inir",
        0xb3 => "otir",
        0xb4 => "ldirx",
        0xb7 => "ldpirx",
        0xb8 => "lddr",
        0xb9 => "cpdr",
        0xba => "indr",
        0xbb => "otdr",
        0xbc => "lddrx",
        _ => return None,
    };
    Some(pattern)
}

/// Pattern for an opcode under the `DD`/`FD` index prefix.
/// Opcodes without an indexed form fall through to the standard table.
pub fn indexed_pattern(op: u8) -> Option<&'static str> {
    let pattern = match op {
        0x09 => "add ^X,bc",
        0x19 => "add ^X,de",
        0x21 => "ld ^X,^W",
        0x22 => "ld (^W),^X",
        0x23 => "inc ^X",
        0x24 => "inc ^h",
        0x25 => "dec ^h",
        0x26 => "ld ^h,^B",
        0x29 => "add ^X,^X",
        0x2a => "ld ^X,(^W)",
        0x2b => "dec ^X",
        0x2c => "inc ^l",
        0x2d => "dec ^l",
        0x2e => "ld ^l,^B",
        0x34 => "inc (^X^D)",
        0x35 => "dec (^X^D)",
        0x36 => "ld (^X^D),^B",
        0x39 => "add ^X,sp",
        0x44 => "ld b,^h",
        0x45 => "ld b,^l",
        0x46 => "ld b,(^X^D)",
        0x4c => "ld c,^h",
        0x4d => "ld c,^l",
        0x4e => "ld c,(^X^D)",
        0x54 => "ld d,^h",
        0x55 => "ld d,^l",
        0x56 => "ld d,(^X^D)",
        0x5c => "ld e,^h",
        0x5d => "ld e,^l",
        0x5e => "ld e,(^X^D)",
        0x60 => "ld ^h,b",
        0x61 => "ld ^h,c",
        0x62 => "ld ^h,d",
        0x63 => "ld ^h,e",
        0x64 => "ld ^h,^h",
        0x65 => "ld ^h,^l",
        0x66 => "ld h,(^X^D)",
        0x67 => "ld ^h,a",
        0x68 => "ld ^l,b",
        0x69 => "ld ^l,c",
        0x6a => "ld ^l,d",
        0x6b => "ld ^l,e",
        0x6c => "ld ^l,^h",
        0x6d => "ld ^l,^l",
        0x6e => "ld l,(^X^D)",
        0x6f => "ld ^l,a",
        0x70 => "ld (^X^D),b",
        0x71 => "ld (^X^D),c",
        0x72 => "ld (^X^D),d",
        0x73 => "ld (^X^D),e",
        0x74 => "ld (^X^D),h",
        0x75 => "ld (^X^D),l",
        0x77 => "ld (^X^D),a",
        0x7c => "ld a,^h",
        0x7d => "ld a,^l",
        0x7e => "ld a,(^X^D)",
        0x84 => "add a,^h",
        0x85 => "add a,^l",
        0x86 => "add a,(^X^D)",
        0x8c => "adc a,^h",
        0x8d => "adc a,^l",
        0x8e => "adc a,(^X^D)",
        0x94 => "sub ^h",
        0x95 => "sub ^l",
        0x96 => "sub (^X^D)",
        0x9c => "sbc a,^h",
        0x9d => "sbc a,^l",
        0x9e => "sbc a,(^X^D)",
        0xa4 => "and ^h",
        0xa5 => "and ^l",
        0xa6 => "and (^X^D)",
        0xac => "xor ^h",
        0xad => "xor ^l",
        0xae => "xor (^X^D)",
        0xb4 => "or ^h",
        0xb5 => "or ^l",
        0xb6 => "or (^X^D)",
        0xbc => "cp ^h",
        0xbd => "cp ^l",
        0xbe => "cp (^X^D)",
        0xe1 => "pop ^X",
        0xe3 => "ex (sp),^X",
        0xe5 => "push ^X",
        0xe9 => "jp (^X)",
        0xf9 => "ld sp,^X",
        _ => return None,
    };
    Some(pattern)
}

/// Mnemonics for the shift/rotate group on bits 3-5 of a bit-operation
/// opcode below 0x40
pub const SHIFT_OPS: [&str; 8] = ["rlc", "rrc", "rl", "rr", "sla", "sra", "sll", "srl"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_complete() {
        // Only the four prefix bytes have empty patterns
        for (op, pattern) in STANDARD_INSTRUCTIONS.iter().enumerate() {
            let is_prefix = matches!(op, 0xcb | 0xdd | 0xed | 0xfd);
            assert_eq!(pattern.is_empty(), is_prefix, "opcode {op:#04x}");
        }
    }

    #[test]
    fn test_no_pattern_exceeds_pragma_cap() {
        let all: Vec<&str> = STANDARD_INSTRUCTIONS
            .iter()
            .copied()
            .chain((0..=255u8).filter_map(extended_pattern))
            .chain((0..=255u8).filter_map(indexed_pattern))
            .collect();
        for pattern in all {
            let pragmas = pattern.matches('^').count();
            assert!(pragmas <= 4, "pattern {pattern:?} has {pragmas} pragmas");
        }
    }

    #[test]
    fn test_extended_set_membership() {
        assert!(is_extended_set_op(0x23));
        assert!(is_extended_set_op(0x8a));
        assert!(is_extended_set_op(0xbc));
        assert!(!is_extended_set_op(0x40));
        assert!(!is_extended_set_op(0xa0));
    }
}

//! # ZX Spectrum ROM Extensions
//!
//! Custom disassemblers for the ROM calling conventions the stock decoder
//! cannot know about: the RST $08 error report (one error-code byte follows
//! the call), the RST $28 calculator (a bytecode stream follows, terminated
//! by `end-calc`), and the Spectrum 128 RST $28 ROM-call vector. Each is an
//! explicit state machine armed by `after_instruction` when the recognized
//! calling sequence goes by, and discharged by `before_instruction` on the
//! following step.

use retrodasm_core::custom::{CustomDisassembler, DisassemblyApi};
use retrodasm_core::context::FetchResult;
use retrodasm_core::format::{int_to_x2, int_to_x4, to_sbyte};
use retrodasm_core::output::DisassemblyItem;
use retrodasm_core::section::MemorySection;

use crate::float::FloatNumber;

/// Name of a calculator bytecode operation. Codes 0x3e-0x41 address groups
/// of related operations; the member is picked by `indexed_calc_op`.
pub fn calc_op_name(code: u8) -> Option<&'static str> {
    let name = match code {
        0x00 => "jump-true",
        0x01 => "exchange",
        0x02 => "delete",
        0x03 => "subtract",
        0x04 => "multiply",
        0x05 => "division",
        0x06 => "to-power",
        0x07 => "or",
        0x08 => "no-&-no",
        0x09 => "no-l-eql",
        0x0a => "no-gr-eq",
        0x0b => "nos-neql",
        0x0c => "no-grtr",
        0x0d => "no-less",
        0x0e => "nos-eql",
        0x0f => "addition",
        0x10 => "str-&-no",
        0x11 => "str-l-eql",
        0x12 => "str-gr-eq",
        0x13 => "strs-neql",
        0x14 => "str-grtr",
        0x15 => "str-less",
        0x16 => "strs-eql",
        0x17 => "strs-add",
        0x18 => "val$",
        0x19 => "usr-$",
        0x1a => "read-in",
        0x1b => "negate",
        0x1c => "code",
        0x1d => "val",
        0x1e => "len",
        0x1f => "sin",
        0x20 => "cos",
        0x21 => "tan",
        0x22 => "asn",
        0x23 => "acs",
        0x24 => "atn",
        0x25 => "ln",
        0x26 => "exp",
        0x27 => "int",
        0x28 => "sqr",
        0x29 => "sgn",
        0x2a => "abs",
        0x2b => "peek",
        0x2c => "in",
        0x2d => "usr-no",
        0x2e => "str$",
        0x2f => "chr$",
        0x30 => "not",
        0x31 => "duplicate",
        0x32 => "n-mod-m",
        0x33 => "jump",
        0x34 => "stk-data",
        0x35 => "dec-jr-nz",
        0x36 => "less-0",
        0x37 => "greater-0",
        0x38 => "end-calc",
        0x39 => "get-argt",
        0x3a => "truncate",
        0x3b => "fp-calc-2",
        0x3c => "e-to-fp",
        0x3d => "re-stack",
        0x3e => "series-06|series-08|series-0C",
        0x3f => "stk-zero|stk-one|stk-half|stk-pi-half|stk-ten",
        0x40 => "st-mem-0|st-mem-1|st-mem-2|st-mem-3|st-mem-4|st-mem-5",
        0x41 => "get-mem-0|get-mem-1|get-mem-2|get-mem-3|get-mem-4|get-mem-5",
        _ => return None,
    };
    Some(name)
}

/// Comment for a member of a grouped calculator operation
fn indexed_calc_op(group: u8, index: usize) -> String {
    if let Some(names) = calc_op_name(group) {
        if let Some(name) = names.split('|').nth(index) {
            return format!("({name})");
        }
    }
    format!("calc code: {group}/{index}")
}

/// Per-pass state of the Spectrum 48 extension
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Rom48State {
    /// No recognized calling sequence pending
    #[default]
    Idle,
    /// A RST $08 went by; the next byte is an error code
    ErrorCode,
    /// A calculator invocation went by; the next bytes are calculator
    /// bytecode, with `series` float literals outstanding
    Calculator { series: u8 },
}

/// Spectrum 48 ROM conventions: RST $08 error reports and the RST $28
/// calculator (also entered through CALL $335E and CALL $3362). Also
/// renders `Custom`-kind sections as calculator bytecode.
#[derive(Debug, Default)]
pub struct Spectrum48CustomDisassembler {
    state: Rom48State,
}

impl Spectrum48CustomDisassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one calculator bytecode entry at `address`, `calc_code`
    /// already consumed. Returns whether calculator mode continues.
    fn calculator_entry(
        &mut self,
        address: u16,
        calc_code: u8,
        api: &mut DisassemblyApi<'_, '_>,
    ) -> bool {
        let mut item = DisassemblyItem::new(address, format!(".defb #{}", int_to_x2(calc_code)));
        item.op_codes.push(calc_code);

        // A pending series entry is a packed float literal, not an op code
        if let Rom48State::Calculator { series } = &mut self.state {
            if *series > 0 {
                let mut length = (calc_code >> 6) + 1;
                if calc_code & 0x3f == 0 {
                    length += 1;
                }
                for _ in 0..length {
                    item.op_codes.push(api.fetch().opcode);
                }
                let rendered: Vec<String> = item
                    .op_codes
                    .iter()
                    .map(|b| format!("#{}", int_to_x2(*b)))
                    .collect();
                item.instruction = format!(".defb {}", rendered.join(", "));
                if let Ok(value) = FloatNumber::from_compact_bytes(&item.op_codes) {
                    item.hard_comment = Some(format!("({value:.6})"));
                }
                *series -= 1;
                api.add_disassembly_item(item);
                return true;
            }
        }

        let mut carry_on = true;
        match calc_code {
            // Jump codes carry a signed displacement to another entry
            0x00 | 0x33 | 0x35 => {
                let jump = api.fetch().opcode;
                item.op_codes.push(jump);
                let target = api
                    .offset()
                    .wrapping_sub(1)
                    .wrapping_add(to_sbyte(jump) as u16);
                api.create_label(target);
                item.instruction =
                    format!(".defb #{}, #{}", int_to_x2(calc_code), int_to_x2(jump));
                item.hard_comment = Some(format!(
                    "({}: L{})",
                    calc_op_name(calc_code).unwrap_or("jump"),
                    int_to_x4(target)
                ));
                carry_on = calc_code != 0x33;
            }
            0x34 => {
                self.state = Rom48State::Calculator { series: 1 };
                item.hard_comment = Some("(stk-data)".to_string());
            }
            0x38 => {
                item.hard_comment = Some("(end-calc)".to_string());
                carry_on = false;
            }
            0x86 | 0x88 | 0x8c => {
                let count = calc_code - 0x80;
                self.state = Rom48State::Calculator { series: count };
                item.hard_comment = Some(format!("(series-0{count:x})"));
            }
            0xa0..=0xa4 => {
                item.hard_comment = Some(indexed_calc_op(0x3f, (calc_code - 0xa0) as usize));
            }
            0xc0..=0xc5 => {
                item.hard_comment = Some(indexed_calc_op(0x40, (calc_code - 0xc0) as usize));
            }
            0xe0..=0xe5 => {
                item.hard_comment = Some(indexed_calc_op(0x41, (calc_code - 0xe0) as usize));
            }
            _ => {
                let comment = match calc_op_name(calc_code) {
                    Some(name) => name.to_string(),
                    None => format!("calc code: #{}", int_to_x2(calc_code)),
                };
                item.hard_comment = Some(format!("({comment})"));
            }
        }
        api.add_disassembly_item(item);
        carry_on
    }
}

impl CustomDisassembler for Spectrum48CustomDisassembler {
    fn start_section(&mut self, _section: &MemorySection) {
        self.state = Rom48State::Idle;
    }

    fn before_instruction(
        &mut self,
        peek: FetchResult,
        api: &mut DisassemblyApi<'_, '_>,
    ) -> bool {
        match self.state {
            Rom48State::Idle => false,
            Rom48State::ErrorCode => {
                let address = peek.offset;
                let error_code = api.fetch().opcode;
                let mut item = DisassemblyItem::new(
                    address,
                    format!(".defb #{}", int_to_x2(error_code)),
                );
                item.op_codes.push(error_code);
                item.hard_comment = Some(format!("(error code: #{})", int_to_x2(error_code)));
                api.add_disassembly_item(item);
                self.state = Rom48State::Idle;
                true
            }
            Rom48State::Calculator { .. } => {
                let address = peek.offset;
                let calc_code = api.fetch().opcode;
                if !self.calculator_entry(address, calc_code, api) {
                    self.state = Rom48State::Idle;
                }
                true
            }
        }
    }

    fn after_instruction(&mut self, item: &DisassemblyItem, api: &mut DisassemblyApi<'_, '_>) {
        match item.op_codes.as_slice() {
            // RST $08: report error
            [0xcf] => {
                self.state = Rom48State::ErrorCode;
                api.set_hard_comment(item.address, "(Report error)");
            }
            // RST $28, CALL $335E, CALL $3362: invoke the calculator
            [0xef] | [0xcd, 0x5e, 0x33] | [0xcd, 0x62, 0x33] => {
                self.state = Rom48State::Calculator { series: 0 };
                api.set_hard_comment(item.address, "(Invoke Calculator)");
            }
            _ => {}
        }
    }

    /// Render a whole section as calculator bytecode
    fn custom_section(
        &mut self,
        section: &MemorySection,
        api: &mut DisassemblyApi<'_, '_>,
    ) -> bool {
        self.state = Rom48State::Calculator { series: 0 };
        let end = section.end_address();
        loop {
            let peek = api.peek(0);
            if peek.overflow || peek.offset > end {
                break;
            }
            let calc_code = api.fetch().opcode;
            if !self.calculator_entry(peek.offset, calc_code, api) {
                self.state = Rom48State::Calculator { series: 0 };
            }
        }
        self.state = Rom48State::Idle;
        true
    }
}

/// Per-pass state of the Spectrum 128 extension
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Rom128State {
    #[default]
    Idle,
    /// A RST $28 went by; a ROM-call vector follows
    Vector,
}

/// Spectrum 128 ROM 1 convention: RST $28 calls a Spectrum 48 ROM routine
/// through a 2-byte address vector placed after the call. The banked
/// variant carries a third byte naming the target bank.
#[derive(Debug, Default)]
pub struct Spectrum128CustomDisassembler {
    state: Rom128State,
    banked: bool,
}

impl Spectrum128CustomDisassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect 3-byte vectors (address plus bank byte)
    pub fn banked() -> Self {
        Self {
            state: Rom128State::Idle,
            banked: true,
        }
    }
}

impl CustomDisassembler for Spectrum128CustomDisassembler {
    fn start_section(&mut self, _section: &MemorySection) {
        self.state = Rom128State::Idle;
    }

    fn before_instruction(
        &mut self,
        peek: FetchResult,
        api: &mut DisassemblyApi<'_, '_>,
    ) -> bool {
        if self.state != Rom128State::Vector {
            return false;
        }
        let address = peek.offset;
        let low = api.fetch().opcode;
        let high = api.fetch().opcode;
        let target = u16::from_le_bytes([low, high]);
        let mut item = DisassemblyItem::new(address, format!(".defw #{}", int_to_x4(target)));
        item.op_codes.extend_from_slice(&[low, high]);
        if self.banked {
            let bank = api.fetch().opcode;
            item.op_codes.push(bank);
            item.hard_comment = Some(format!("(bank #{})", int_to_x2(bank)));
        }
        api.add_disassembly_item(item);
        self.state = Rom128State::Idle;
        true
    }

    fn after_instruction(&mut self, item: &DisassemblyItem, api: &mut DisassemblyApi<'_, '_>) {
        if item.op_codes.as_slice() == [0xef] {
            self.state = Rom128State::Vector;
            api.set_hard_comment(item.address, "(Call Spectrum 48 ROM)");
        }
    }
}

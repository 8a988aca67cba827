//! # Disassembly Engine
//!
//! One pass: intersect every registered section with the requested range,
//! dispatch each sub-range on its treatment kind, and run label fixup when a
//! decoded section completes. The engine owns the instruction loop; the CPU
//! family behind it only selects patterns and expands pragmas, and an
//! optional custom extension gets first refusal on every step.

use tracing::{debug, trace};

use crate::backend::CpuBackend;
use crate::context::DecodeContext;
use crate::custom::{CustomDisassembler, DisassemblyApi};
use crate::format::{int_to_x2, int_to_x4, to_decimal3};
use crate::options::DisassemblyOptions;
use crate::output::{DisassemblyItem, DisassemblyOutput};
use crate::section::{MemorySection, MemorySectionType};

/// Safety cap on pragma substitutions per instruction. No known pattern
/// carries more than four markers; review any addition that exceeds this.
const MAX_PRAGMA_COUNT: usize = 4;

/// Bytes rendered per byte-array data line
const BYTES_PER_LINE: usize = 8;

/// The disassembler for one CPU family, driving one pass at a time
pub struct Disassembler<'a, B: CpuBackend> {
    backend: B,
    sections: Vec<MemorySection>,
    memory: &'a [u8],
    base_address: u16,
    options: DisassemblyOptions,
    custom: Option<Box<dyn CustomDisassembler>>,
}

impl<'a, B: CpuBackend> Disassembler<'a, B> {
    /// Create a disassembler over `memory`, whose first byte sits at
    /// address 0
    pub fn new(backend: B, sections: Vec<MemorySection>, memory: &'a [u8]) -> Self {
        Self {
            backend,
            sections,
            memory,
            base_address: 0,
            options: DisassemblyOptions::default(),
            custom: None,
        }
    }

    /// Set the address of the buffer's first byte (for buffers that do not
    /// start at address 0, e.g. the upper half of a ROM image)
    pub fn with_base_address(mut self, base_address: u16) -> Self {
        self.base_address = base_address;
        self
    }

    pub fn with_options(mut self, options: DisassemblyOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach a machine-specific custom disassembler
    pub fn set_custom_disassembler(&mut self, custom: Box<dyn CustomDisassembler>) {
        self.custom = Some(custom);
    }

    /// Disassemble the address range `start..=end`.
    ///
    /// Returns `None` only when the range lies entirely outside the buffer;
    /// a range that extends past the buffer end is clamped.
    pub fn disassemble(&mut self, start: u16, end: u16) -> Option<DisassemblyOutput> {
        if self.memory.is_empty() {
            return None;
        }
        let max_address = self.base_address as usize + self.memory.len() - 1;
        let max_address = max_address.min(0xFFFF) as u16;
        if start > max_address || end < self.base_address {
            return None;
        }
        let start = start.max(self.base_address);
        let end = end.min(max_address);

        let mut output = DisassemblyOutput::new();
        let mut ctx = DecodeContext::new(self.memory, self.base_address);
        let ref_section = MemorySection::disassemble(start, end);

        for section in self.sections.clone() {
            let Some(sub) = section.intersect(&ref_section) else {
                continue;
            };
            debug!(
                start = sub.start_address(),
                end = sub.end_address(),
                kind = ?section.section_type(),
                "disassembling section"
            );
            match section.section_type() {
                MemorySectionType::Disassemble => {
                    self.disassemble_section(&sub, &mut ctx, &mut output);
                }
                MemorySectionType::ByteArray => self.generate_byte_array(&sub, &mut output),
                MemorySectionType::WordArray => self.generate_word_array(&sub, &mut output),
                MemorySectionType::Skip => self.generate_skip_output(&sub, &mut output),
                MemorySectionType::Custom => {
                    self.generate_custom_section(&sub, &mut ctx, &mut output);
                }
            }
        }
        Some(output)
    }

    /// Decode instructions over a section, giving the custom extension
    /// first refusal on every step
    fn disassemble_section(
        &mut self,
        section: &MemorySection,
        ctx: &mut DecodeContext<'a>,
        output: &mut DisassemblyOutput,
    ) {
        if let Some(custom) = self.custom.as_mut() {
            custom.start_section(section);
        }
        ctx.seek(section.start_address());
        let end_offset = section.end_address() as u32;

        while ctx.offset() <= end_offset && !ctx.overflow() {
            let peeked = ctx.peek(0);
            if let Some(custom) = self.custom.as_mut() {
                let mut api = DisassemblyApi::new(ctx, output);
                if custom.before_instruction(peeked, &mut api) {
                    continue;
                }
            }
            let item = decode_operation(&self.backend, ctx, output, &self.options);
            output.add_item(item.clone());
            if let Some(custom) = self.custom.as_mut() {
                let mut api = DisassemblyApi::new(ctx, output);
                custom.after_instruction(&item, &mut api);
            }
        }
        self.label_fixup(output);
    }

    /// Emit byte-array lines, eight bytes per line
    fn generate_byte_array(&self, section: &MemorySection, output: &mut DisassemblyOutput) {
        let length = section.length();
        for i in (0..length).step_by(BYTES_PER_LINE) {
            let mut bytes: Vec<String> = Vec::with_capacity(BYTES_PER_LINE);
            for j in 0..BYTES_PER_LINE {
                if i + j >= length {
                    break;
                }
                let value = self.read(section.start_address().wrapping_add((i + j) as u16));
                bytes.push(self.format_byte(value));
            }
            let address = section.start_address().wrapping_add(i as u16);
            output.add_item(DisassemblyItem::new(
                address,
                format!("{} {}", B::BYTE_DIRECTIVE, bytes.join(", ")),
            ));
        }
    }

    /// Emit word-array lines, four little-endian words per line; an odd
    /// trailing byte becomes a final byte-array line
    fn generate_word_array(&self, section: &MemorySection, output: &mut DisassemblyOutput) {
        let length = section.length();
        for i in (0..length).step_by(BYTES_PER_LINE) {
            if i + 1 >= length {
                break;
            }
            let mut words: Vec<String> = Vec::with_capacity(BYTES_PER_LINE / 2);
            for j in (0..BYTES_PER_LINE).step_by(2) {
                if i + j + 1 >= length {
                    break;
                }
                let l = self.read(section.start_address().wrapping_add((i + j) as u16)) as u16;
                let h = self.read(section.start_address().wrapping_add((i + j + 1) as u16)) as u16;
                words.push(self.format_word((h << 8) | l));
            }
            let address = section.start_address().wrapping_add(i as u16);
            output.add_item(DisassemblyItem::new(
                address,
                format!("{} {}", B::WORD_DIRECTIVE, words.join(", ")),
            ));
        }
        if length % 2 == 1 {
            self.generate_byte_array(
                &MemorySection::new(
                    section.end_address(),
                    section.end_address(),
                    MemorySectionType::ByteArray,
                ),
                output,
            );
        }
    }

    /// Emit a single skip marker covering the section
    fn generate_skip_output(&self, section: &MemorySection, output: &mut DisassemblyOutput) {
        let count = section.length() as u16;
        let count = if self.options.decimal_mode {
            count.to_string()
        } else {
            format!("${}", int_to_x4(count))
        };
        output.add_item(DisassemblyItem::new(
            section.start_address(),
            format!("{} {}", B::SKIP_DIRECTIVE, count),
        ));
    }

    /// Hand a `Custom`-kind section to the extension; fall back to a byte
    /// array when no extension claims it
    fn generate_custom_section(
        &mut self,
        section: &MemorySection,
        ctx: &mut DecodeContext<'a>,
        output: &mut DisassemblyOutput,
    ) {
        ctx.seek(section.start_address());
        let handled = match self.custom.as_mut() {
            Some(custom) => {
                let mut api = DisassemblyApi::new(ctx, output);
                custom.custom_section(section, &mut api)
            }
            None => false,
        };
        if !handled {
            self.generate_byte_array(section, output);
        }
        self.label_fixup(output);
    }

    /// Flag every item whose address carries a label
    fn label_fixup(&self, output: &mut DisassemblyOutput) {
        let addresses: Vec<u16> = output.labels().keys().copied().collect();
        for address in addresses {
            if output.mark_label(address) {
                trace!(address, "label fixed up");
            }
        }
    }

    fn read(&self, address: u16) -> u8 {
        let index = address as i64 - self.base_address as i64;
        if (0..self.memory.len() as i64).contains(&index) {
            self.memory[index as usize]
        } else {
            0
        }
    }

    fn format_byte(&self, value: u8) -> String {
        if self.options.decimal_mode {
            to_decimal3(value)
        } else {
            format!("${}", int_to_x2(value))
        }
    }

    fn format_word(&self, value: u16) -> String {
        if self.options.decimal_mode {
            value.to_string()
        } else {
            format!("${}", int_to_x4(value))
        }
    }
}

/// Decode one operation: pattern selection, then the pragma expansion loop
fn decode_operation<B: CpuBackend>(
    backend: &B,
    ctx: &mut DecodeContext<'_>,
    output: &mut DisassemblyOutput,
    options: &DisassemblyOptions,
) -> DisassemblyItem {
    ctx.begin_operation();
    let address = ctx.address();
    let pattern = backend.select_pattern(ctx, options);

    let mut item = DisassemblyItem::new(address, B::FALLBACK_PATTERN);
    if let Some(pattern) = pattern {
        if !pattern.text.is_empty() {
            item.instruction = pattern.text.into_owned();
        }
        item.cycles = pattern.cycles;
    }

    let mut pragma_count = 0;
    while pragma_count < MAX_PRAGMA_COUNT {
        let Some(index) = item.instruction.find('^') else {
            break;
        };
        let Some(marker) = item.instruction[index + 1..].chars().next() else {
            break;
        };
        pragma_count += 1;

        let expansion = backend.expand_pragma(marker, ctx, output, options);
        if expansion.symbol.is_some() && !expansion.replacement.is_empty() {
            item.token_position = Some(index);
            item.token_length = Some(expansion.replacement.len());
            item.has_symbol = true;
            item.symbol_value = expansion.symbol;
            if expansion.is_label_symbol {
                item.has_label_symbol = true;
            }
        }
        item.instruction = format!(
            "{}{}{}",
            &item.instruction[..index],
            expansion.replacement,
            &item.instruction[index + 2..]
        );
    }

    item.op_codes = ctx.take_bytes();
    item
}

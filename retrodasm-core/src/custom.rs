//! # Custom Disassembly Extensions
//!
//! A host can hijack decoding for machine-specific byte conventions (a ROM's
//! fixed calling sequence, an embedded bytecode block) by implementing
//! [`CustomDisassembler`]. The extension sees every decode step before the
//! core decoder does and works through [`DisassemblyApi`], the same
//! fetch/peek/add-item/create-label primitives the core uses; it has no
//! privileged access.

use crate::context::{DecodeContext, FetchResult};
use crate::output::{DisassemblyItem, DisassemblyOutput};
use crate::section::MemorySection;

/// The decode primitives exposed to a custom disassembler
pub struct DisassemblyApi<'e, 'a> {
    ctx: &'e mut DecodeContext<'a>,
    output: &'e mut DisassemblyOutput,
}

impl<'e, 'a> DisassemblyApi<'e, 'a> {
    pub(crate) fn new(ctx: &'e mut DecodeContext<'a>, output: &'e mut DisassemblyOutput) -> Self {
        Self { ctx, output }
    }

    /// The full memory buffer under disassembly
    pub fn memory(&self) -> &[u8] {
        self.ctx.memory()
    }

    /// Current cursor address
    pub fn offset(&self) -> u16 {
        self.ctx.address()
    }

    /// Consume and return the next byte
    pub fn fetch(&mut self) -> FetchResult {
        self.ctx.fetch_result()
    }

    /// Consume the next little-endian word
    pub fn fetch_word(&mut self) -> u16 {
        self.ctx.fetch_word()
    }

    /// Non-consuming look at the byte `ahead` positions past the cursor
    pub fn peek(&self, ahead: u32) -> FetchResult {
        self.ctx.peek(ahead)
    }

    /// Emit an item to the disassembly output
    pub fn add_disassembly_item(&mut self, item: DisassemblyItem) {
        self.output.add_item(item);
    }

    /// Look up or create a label at `address`
    pub fn create_label(&mut self, address: u16) {
        self.output.create_label(address, None);
    }

    /// Look up or create a label, recording the referring instruction
    pub fn create_label_with_reference(&mut self, address: u16, referring_address: u16) {
        self.output.create_label(address, Some(referring_address));
    }

    /// Attach a hard comment to the item emitted at `address`
    pub fn set_hard_comment(&mut self, address: u16, comment: impl Into<String>) {
        if let Some(item) = self.output.get_mut(address) {
            item.hard_comment = Some(comment.into());
        }
    }
}

/// Machine-specific hook set for hijacking decode steps.
///
/// A `before_instruction` implementation that returns `true` must have
/// consumed at least one byte through the API; the engine trusts the cursor
/// position the handler leaves behind and performs no runaway guard.
///
/// One extension instance serves one pass at a time; per-section state must
/// be reset in [`start_section`](Self::start_section).
pub trait CustomDisassembler {
    /// A new section is about to be disassembled; reset per-section state
    fn start_section(&mut self, _section: &MemorySection) {}

    /// First refusal on the next decode step. Return `true` after consuming
    /// bytes and emitting items to skip the core decoder for this step.
    fn before_instruction(
        &mut self,
        _peek: FetchResult,
        _api: &mut DisassemblyApi<'_, '_>,
    ) -> bool {
        false
    }

    /// Inspect the item the core decoder just produced; typically used to
    /// recognize a calling convention and arm state for the next step
    fn after_instruction(&mut self, _item: &DisassemblyItem, _api: &mut DisassemblyApi<'_, '_>) {}

    /// Render a whole `Custom`-kind section. Return `true` when handled;
    /// otherwise the engine renders the section as a byte array.
    fn custom_section(
        &mut self,
        _section: &MemorySection,
        _api: &mut DisassemblyApi<'_, '_>,
    ) -> bool {
        false
    }
}

//! # Disassembly Output
//!
//! The growing result of one disassembly pass: an ordered item sequence, an
//! address index for O(1) random access, and the label table. A fresh output
//! is created per pass and never reused.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One decoded instruction or synthesized data/skip line
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisassemblyItem {
    /// The memory address of the disassembled instruction
    pub address: u16,

    /// Raw bytes consumed for this item (prefixes, opcode, operands)
    pub op_codes: Vec<u8>,

    /// The rendered assembly instruction
    pub instruction: String,

    /// Set by label fixup when a label exists at this item's address
    pub has_label: bool,

    /// Disassembler-generated comment (machine-specific annotation)
    pub hard_comment: Option<String>,

    /// Optional source comment attached by the host
    pub comment: Option<String>,

    /// Start of the operand token within the instruction text
    pub token_position: Option<usize>,

    /// Length of the operand token within the instruction text
    pub token_length: Option<usize>,

    /// The item has an operand value that can be bound to a symbol
    pub has_symbol: bool,

    /// The operand value, when `has_symbol` is set
    pub symbol_value: Option<u16>,

    /// The operand symbol is a label reference
    pub has_label_symbol: bool,

    /// The item is a prefix-only placeholder, not a full instruction
    pub is_prefix_item: bool,

    /// Clock cycles the instruction takes, for families that publish them
    pub cycles: Option<u8>,
}

impl DisassemblyItem {
    /// Create an item with only an address and instruction text
    pub fn new(address: u16, instruction: impl Into<String>) -> Self {
        Self {
            address,
            instruction: instruction.into(),
            ..Self::default()
        }
    }
}

/// A label with the addresses of the instructions that reference it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisassemblyLabel {
    /// Label address
    pub address: u16,

    /// Referring instruction addresses, in insertion order
    pub references: Vec<u16>,
}

impl DisassemblyLabel {
    pub fn new(address: u16) -> Self {
        Self {
            address,
            references: Vec::new(),
        }
    }
}

/// The output of one disassembly pass
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DisassemblyOutput {
    items: Vec<DisassemblyItem>,
    by_address: HashMap<u16, usize>,
    labels: BTreeMap<u16, DisassemblyLabel>,
}

impl DisassemblyOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordered item sequence
    pub fn items(&self) -> &[DisassemblyItem] {
        &self.items
    }

    /// The labels created during the pass, ordered by address
    pub fn labels(&self) -> &BTreeMap<u16, DisassemblyLabel> {
        &self.labels
    }

    /// Append an item and index it by address. A later item at the same
    /// address replaces the earlier index entry (last write wins); custom
    /// extensions rely on this when emitting multi-line synthetic output.
    pub fn add_item(&mut self, item: DisassemblyItem) {
        self.by_address.insert(item.address, self.items.len());
        self.items.push(item);
    }

    /// Look up an item by address
    pub fn get(&self, address: u16) -> Option<&DisassemblyItem> {
        self.by_address.get(&address).map(|&idx| &self.items[idx])
    }

    /// Mutable lookup by address; custom extensions use this to annotate
    /// an item they recognized after the core decoder emitted it
    pub fn get_mut(&mut self, address: u16) -> Option<&mut DisassemblyItem> {
        self.by_address
            .get(&address)
            .map(|&idx| &mut self.items[idx])
    }

    /// Look up or create the label at `address`; a referring instruction
    /// address, when given, is appended to the label's reference list
    pub fn create_label(&mut self, address: u16, referring_address: Option<u16>) {
        let label = self
            .labels
            .entry(address)
            .or_insert_with(|| DisassemblyLabel::new(address));
        if let Some(referring) = referring_address {
            label.references.push(referring);
        }
    }

    /// Mark the item at `address` as carrying a label. Returns whether an
    /// item existed there.
    pub fn mark_label(&mut self, address: u16) -> bool {
        match self.by_address.get(&address) {
            Some(&idx) => {
                self.items[idx].has_label = true;
                true
            }
            None => false,
        }
    }

    /// Replace the item sequence, rebuilding the address index. Prefix-only
    /// placeholder items are not indexed.
    pub fn replace_output_items(&mut self, items: Vec<DisassemblyItem>) {
        self.items = items;
        self.by_address.clear();
        for (idx, item) in self.items.iter().enumerate() {
            if !item.is_prefix_item {
                self.by_address.insert(item.address, idx);
            }
        }
    }

    /// Discard all items and labels
    pub fn clear(&mut self) {
        self.items.clear();
        self.by_address.clear();
        self.labels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_indexes_by_address() {
        let mut output = DisassemblyOutput::new();
        output.add_item(DisassemblyItem::new(0x8000, "nop"));
        output.add_item(DisassemblyItem::new(0x8001, "ret"));
        assert_eq!(output.items().len(), 2);
        assert_eq!(output.get(0x8001).unwrap().instruction, "ret");
        assert!(output.get(0x8002).is_none());
    }

    #[test]
    fn test_last_write_wins_at_same_address() {
        let mut output = DisassemblyOutput::new();
        output.add_item(DisassemblyItem::new(0x8000, "first"));
        output.add_item(DisassemblyItem::new(0x8000, "second"));
        assert_eq!(output.items().len(), 2);
        assert_eq!(output.get(0x8000).unwrap().instruction, "second");
    }

    #[test]
    fn test_create_label_is_idempotent() {
        let mut output = DisassemblyOutput::new();
        output.create_label(0x1234, Some(0x8000));
        output.create_label(0x1234, Some(0x8003));
        output.create_label(0x1234, None);
        assert_eq!(output.labels().len(), 1);
        let label = &output.labels()[&0x1234];
        assert_eq!(label.references, vec![0x8000, 0x8003]);
    }

    #[test]
    fn test_mark_label() {
        let mut output = DisassemblyOutput::new();
        output.add_item(DisassemblyItem::new(0x8000, "nop"));
        assert!(output.mark_label(0x8000));
        assert!(!output.mark_label(0x9000));
        assert!(output.get(0x8000).unwrap().has_label);
    }

    #[test]
    fn test_replace_output_items_skips_prefix_items() {
        let mut output = DisassemblyOutput::new();
        output.add_item(DisassemblyItem::new(0x8000, "old"));

        let prefix = DisassemblyItem {
            is_prefix_item: true,
            ..DisassemblyItem::new(0x9000, "prefix")
        };
        output.replace_output_items(vec![prefix, DisassemblyItem::new(0x9001, "real")]);
        assert!(output.get(0x9000).is_none());
        assert_eq!(output.get(0x9001).unwrap().instruction, "real");
        assert!(output.get(0x8000).is_none());
    }
}

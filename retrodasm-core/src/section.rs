//! # Memory Section Model
//!
//! A memory map is an ordered list of non-overlapping address intervals
//! (sections), each tagged with a treatment kind that tells the engine how
//! to render the bytes it covers. Inserting a section resolves every overlap
//! with the existing ones, so the map invariants hold after any sequence of
//! mutations:
//!
//! - no two sections overlap
//! - sections are sorted ascending by start address

use serde::{Deserialize, Serialize};

/// Determines how a section's bytes are rendered during disassembly
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemorySectionType {
    /// Skip the section without generating output beyond a skip marker
    Skip,

    /// Decode the section as CPU instructions
    #[default]
    Disassemble,

    /// Render the section as byte-array data lines
    ByteArray,

    /// Render the section as word-array data lines
    WordArray,

    /// Hand the section to the machine-specific custom disassembler
    Custom,
}

/// A contiguous address range with a treatment kind.
///
/// The end address is inclusive. A reversed range is normalized by swapping
/// the bounds, so `start <= end` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySection {
    start: u16,
    end: u16,
    section_type: MemorySectionType,
}

impl MemorySection {
    /// Create a section; reversed bounds are swapped silently
    pub fn new(start: u16, end: u16, section_type: MemorySectionType) -> Self {
        if end >= start {
            Self { start, end, section_type }
        } else {
            Self { start: end, end: start, section_type }
        }
    }

    /// Create a section with the `Disassemble` kind
    pub fn disassemble(start: u16, end: u16) -> Self {
        Self::new(start, end, MemorySectionType::Disassemble)
    }

    pub fn start_address(&self) -> u16 {
        self.start
    }

    pub fn end_address(&self) -> u16 {
        self.end
    }

    pub fn section_type(&self) -> MemorySectionType {
        self.section_type
    }

    /// Number of addresses the section covers
    pub fn length(&self) -> usize {
        self.end as usize - self.start as usize + 1
    }

    /// True if the two ranges share at least one address
    pub fn overlaps(&self, other: &MemorySection) -> bool {
        other.start <= self.end && self.start <= other.end
    }

    /// The address-range overlap of the two sections, carrying this
    /// section's kind; `None` when the ranges are disjoint
    pub fn intersect(&self, other: &MemorySection) -> Option<MemorySection> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then(|| MemorySection::new(start, end, self.section_type))
    }

    /// True if both sections cover exactly the same range
    pub fn same_section(&self, other: &MemorySection) -> bool {
        self.start == other.start && self.end == other.end
    }
}

/// An ordered set of non-overlapping memory sections
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryMap {
    sections: Vec<MemorySection>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[MemorySection] {
        &self.sections
    }

    /// Consume the map, yielding the section list
    pub fn into_sections(self) -> Vec<MemorySection> {
        self.sections
    }

    /// Insert a section, resolving every overlap with existing sections.
    ///
    /// Existing sections that the new one covers entirely are removed;
    /// partially covered ones are truncated, and a section that extends past
    /// both ends of the new one is split in two. The list stays sorted
    /// ascending by start address.
    pub fn add(&mut self, item: MemorySection) {
        let mut rebuilt = Vec::with_capacity(self.sections.len() + 2);
        for old in &self.sections {
            if !old.overlaps(&item) {
                rebuilt.push(*old);
                continue;
            }
            if old.start_address() < item.start_address() {
                // Keep the part of the old section left of the new one
                rebuilt.push(MemorySection::new(
                    old.start_address(),
                    item.start_address() - 1,
                    old.section_type(),
                ));
            }
            if old.end_address() > item.end_address() {
                // Keep the surviving tail right of the new one
                rebuilt.push(MemorySection::new(
                    item.end_address() + 1,
                    old.end_address(),
                    old.section_type(),
                ));
            }
        }
        let insert_pos = rebuilt
            .iter()
            .position(|s| s.start_address() > item.start_address())
            .unwrap_or(rebuilt.len());
        rebuilt.insert(insert_pos, item);
        self.sections = rebuilt;
    }

    /// Re-insert every section of another map, shifting addresses by `offset`
    pub fn merge(&mut self, other: &MemoryMap, offset: u16) {
        for section in &other.sections {
            self.add(MemorySection::new(
                section.start_address().wrapping_add(offset),
                section.end_address().wrapping_add(offset),
                section.section_type(),
            ));
        }
    }

    /// Coalesce adjacent `Disassemble` sections into one
    pub fn normalize(&mut self) {
        let mut normalized: Vec<MemorySection> = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            if let Some(prev) = normalized.last_mut() {
                if prev.section_type() == MemorySectionType::Disassemble
                    && section.section_type() == MemorySectionType::Disassemble
                    && prev.end_address().checked_add(1) == Some(section.start_address())
                {
                    *prev = MemorySection::disassemble(prev.start_address(), section.end_address());
                    continue;
                }
            }
            normalized.push(*section);
        }
        self.sections = normalized;
    }
}

//! Property tests for the memory section model
//!
//! Verifies the map invariants hold after arbitrary insertion sequences:
//! no two sections overlap, the list stays sorted ascending by start
//! address, and normalization is idempotent.

use proptest::prelude::*;
use retrodasm_core::{MemoryMap, MemorySection, MemorySectionType};

fn arb_section_type() -> impl Strategy<Value = MemorySectionType> {
    prop_oneof![
        Just(MemorySectionType::Skip),
        Just(MemorySectionType::Disassemble),
        Just(MemorySectionType::ByteArray),
        Just(MemorySectionType::WordArray),
        Just(MemorySectionType::Custom),
    ]
}

fn arb_section() -> impl Strategy<Value = MemorySection> {
    (any::<u16>(), any::<u16>(), arb_section_type())
        .prop_map(|(a, b, ty)| MemorySection::new(a, b, ty))
}

fn assert_invariants(map: &MemoryMap) {
    let sections = map.sections();
    for pair in sections.windows(2) {
        assert!(
            pair[0].start_address() <= pair[1].start_address(),
            "sections out of order: {:?}",
            sections
        );
        assert!(
            pair[0].end_address() < pair[1].start_address(),
            "sections overlap: {:?}",
            sections
        );
    }
}

proptest! {
    #[test]
    fn add_preserves_no_overlap_and_ordering(sections in prop::collection::vec(arb_section(), 1..32)) {
        let mut map = MemoryMap::new();
        for section in sections {
            map.add(section);
            assert_invariants(&map);
        }
    }

    #[test]
    fn last_added_section_survives_intact(sections in prop::collection::vec(arb_section(), 1..16)) {
        let mut map = MemoryMap::new();
        let last = *sections.last().unwrap();
        for section in sections {
            map.add(section);
        }
        // The newest insertion always wins its full range
        assert!(map.sections().iter().any(|s| s.same_section(&last)));
    }

    #[test]
    fn normalize_is_idempotent(sections in prop::collection::vec(arb_section(), 1..32)) {
        let mut map = MemoryMap::new();
        for section in sections {
            map.add(section);
        }
        map.normalize();
        let once = map.sections().to_vec();
        map.normalize();
        prop_assert_eq!(map.sections(), &once[..]);
    }

    #[test]
    fn normalize_preserves_covered_addresses(sections in prop::collection::vec(arb_section(), 1..16)) {
        let mut map = MemoryMap::new();
        for section in sections {
            map.add(section);
        }
        let covered_before: usize = map.sections().iter().map(|s| s.length()).sum();
        map.normalize();
        let covered_after: usize = map.sections().iter().map(|s| s.length()).sum();
        prop_assert_eq!(covered_before, covered_after);
        assert_invariants(&map);
    }

    #[test]
    fn intersect_is_symmetric_in_range(a in arb_section(), b in arb_section()) {
        let ab = a.intersect(&b);
        let ba = b.intersect(&a);
        match (ab, ba) {
            (Some(x), Some(y)) => {
                prop_assert_eq!(x.start_address(), y.start_address());
                prop_assert_eq!(x.end_address(), y.end_address());
                // The queried side's kind is carried
                prop_assert_eq!(x.section_type(), a.section_type());
            }
            (None, None) => {}
            _ => prop_assert!(false, "intersection not symmetric"),
        }
    }
}

#[test]
fn merge_composes_bank_maps() {
    let mut bank0 = MemoryMap::new();
    bank0.add(MemorySection::disassemble(0x0000, 0x1FFF));
    bank0.add(MemorySection::new(0x2000, 0x3FFF, MemorySectionType::ByteArray));

    let mut full = MemoryMap::new();
    full.add(MemorySection::disassemble(0x0000, 0x3FFF));
    full.merge(&bank0, 0x4000);

    assert_eq!(full.count(), 3);
    assert_eq!(full.sections()[1].start_address(), 0x4000);
    assert_eq!(full.sections()[2].start_address(), 0x6000);
    assert_eq!(
        full.sections()[2].section_type(),
        MemorySectionType::ByteArray
    );
}

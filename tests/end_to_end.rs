//! End-to-end scenarios exercised through both CPU family backends.

use retrodasm_core::engine::Disassembler;
use retrodasm_core::options::DisassemblyOptions;
use retrodasm_core::section::{MemorySection, MemorySectionType};
use retrodasm_m6510::M6510Backend;
use retrodasm_z80::Z80Backend;

// ---------------------------------------------------------------------------
// Scenario A: plain code, no labels
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_a_nop_ret() {
    let memory = [0x00, 0xc9];
    let sections = vec![MemorySection::disassemble(0x0000, 0x0001)];
    let mut disassembler = Disassembler::new(Z80Backend::new(), sections, &memory);
    let output = disassembler.disassemble(0x0000, 0x0001).unwrap();

    assert_eq!(output.items().len(), 2);
    assert_eq!(output.items()[0].address, 0x0000);
    assert_eq!(output.items()[0].instruction, "nop");
    assert_eq!(output.items()[1].address, 0x0001);
    assert_eq!(output.items()[1].instruction, "ret");
    assert!(output.labels().is_empty());
}

#[test]
fn test_scenario_a_m6510() {
    let memory = [0xea, 0x60];
    let sections = vec![MemorySection::disassemble(0x0000, 0x0001)];
    let mut disassembler = Disassembler::new(M6510Backend::new(), sections, &memory);
    let output = disassembler.disassemble(0x0000, 0x0001).unwrap();

    assert_eq!(output.items().len(), 2);
    assert_eq!(output.items()[0].instruction, "nop");
    assert_eq!(output.items()[1].instruction, "rts");
    assert!(output.labels().is_empty());
}

// ---------------------------------------------------------------------------
// Scenario B: self-referencing jump
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_b_jump_to_self() {
    let memory = [0xc3, 0x00, 0x00];
    let sections = vec![MemorySection::disassemble(0x0000, 0x0002)];
    let mut disassembler = Disassembler::new(Z80Backend::new(), sections, &memory);
    let output = disassembler.disassemble(0x0000, 0x0002).unwrap();

    assert_eq!(output.items().len(), 1);
    let item = &output.items()[0];
    assert_eq!(item.instruction, "jp L0000");
    assert!(item.has_label);
    assert!(item.has_label_symbol);

    let label = output.labels().get(&0x0000).unwrap();
    assert_eq!(label.references, [0x0000]);
}

// ---------------------------------------------------------------------------
// Scenario C: byte-array chunking
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_c_byte_array_chunks() {
    let memory = [0u8; 10];
    let sections = vec![MemorySection::new(0x0000, 0x0009, MemorySectionType::ByteArray)];
    let mut disassembler = Disassembler::new(Z80Backend::new(), sections, &memory);
    let output = disassembler.disassemble(0x0000, 0x0009).unwrap();

    assert_eq!(output.items().len(), 2);
    let first_values = output.items()[0].instruction.matches('$').count();
    let second_values = output.items()[1].instruction.matches('$').count();
    assert_eq!(first_values, 8);
    assert_eq!(second_values, 2);
    assert_eq!(output.items()[1].address, 0x0008);
}

// ---------------------------------------------------------------------------
// Scenario D: decimal mode keeps structure
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_d_decimal_mode_same_structure() {
    let memory = [0xc3, 0x00, 0x00];
    let sections = vec![MemorySection::disassemble(0x0000, 0x0002)];

    let mut hex = Disassembler::new(Z80Backend::new(), sections.clone(), &memory);
    let hex_output = hex.disassemble(0x0000, 0x0002).unwrap();

    let mut dec = Disassembler::new(Z80Backend::new(), sections, &memory)
        .with_options(DisassemblyOptions::new().decimal_mode(true));
    let dec_output = dec.disassemble(0x0000, 0x0002).unwrap();

    assert_eq!(hex_output.items().len(), dec_output.items().len());
    assert_eq!(hex_output.labels().len(), dec_output.labels().len());
    assert_eq!(dec_output.items()[0].instruction, "jp L00000");
    assert!(!dec_output.items()[0].instruction.contains('$'));
}

// ---------------------------------------------------------------------------
// Cross-family checks
// ---------------------------------------------------------------------------

#[test]
fn test_families_use_their_own_directives() {
    let memory = [0xaa, 0xbb];
    let sections = vec![MemorySection::new(0, 1, MemorySectionType::ByteArray)];

    let mut z80 = Disassembler::new(Z80Backend::new(), sections.clone(), &memory);
    let z80_output = z80.disassemble(0, 1).unwrap();
    assert!(z80_output.items()[0].instruction.starts_with(".defb"));

    let mut m6510 = Disassembler::new(M6510Backend::new(), sections, &memory);
    let m6510_output = m6510.disassemble(0, 1).unwrap();
    assert!(m6510_output.items()[0].instruction.starts_with(".byte"));
}

#[test]
fn test_unknown_bytes_decode_to_fallback() {
    // ED 00 has no documented meaning on the Z80
    let memory = [0xed, 0x00];
    let sections = vec![MemorySection::disassemble(0, 1)];
    let mut disassembler = Disassembler::new(Z80Backend::new(), sections, &memory);
    let output = disassembler.disassemble(0, 1).unwrap();
    assert_eq!(output.items()[0].instruction, "nop");
    assert_eq!(output.items()[0].op_codes, [0xed, 0x00]);
}

#[test]
fn test_m6510_cycles_flow_to_items() {
    let memory = [0x00, 0xa9, 0x01];
    let sections = vec![MemorySection::disassemble(0, 2)];
    let mut disassembler = Disassembler::new(M6510Backend::new(), sections, &memory);
    let output = disassembler.disassemble(0, 2).unwrap();

    assert_eq!(output.items()[0].cycles, Some(7));
    assert_eq!(output.items()[1].cycles, Some(2));
}

#[test]
fn test_z80_items_carry_no_cycles() {
    let memory = [0x00];
    let sections = vec![MemorySection::disassemble(0, 0)];
    let mut disassembler = Disassembler::new(Z80Backend::new(), sections, &memory);
    let output = disassembler.disassemble(0, 0).unwrap();
    assert_eq!(output.items()[0].cycles, None);
}

//! Stress and determinism tests over large, adversarial inputs.

use retrodasm_core::engine::Disassembler;
use retrodasm_core::output::DisassemblyOutput;
use retrodasm_core::section::MemorySection;
use retrodasm_m6510::M6510Backend;
use retrodasm_z80::Z80Backend;

fn run_z80(memory: &[u8]) -> DisassemblyOutput {
    let end = (memory.len() - 1) as u16;
    let sections = vec![MemorySection::disassemble(0, end)];
    let mut disassembler = Disassembler::new(Z80Backend::new(), sections, memory);
    disassembler.disassemble(0, end).unwrap()
}

fn run_m6510(memory: &[u8]) -> DisassemblyOutput {
    let end = (memory.len() - 1) as u16;
    let sections = vec![MemorySection::disassemble(0, end)];
    let mut disassembler = Disassembler::new(M6510Backend::new(), sections, memory);
    disassembler.disassemble(0, end).unwrap()
}

/// Simple deterministic byte-soup generator
fn lcg_bytes(seed: u32, len: usize) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}

fn assert_covers_buffer(output: &DisassemblyOutput, len: usize) {
    let total: usize = output.items().iter().map(|i| i.op_codes.len()).sum();
    assert_eq!(total, len);
}

fn assert_monotonic(output: &DisassemblyOutput) {
    let mut expected = None;
    for item in output.items() {
        if let Some(address) = expected {
            assert_eq!(item.address, address);
        }
        expected = Some(item.address.wrapping_add(item.op_codes.len() as u16));
    }
}

#[test]
fn test_every_single_byte_decodes_z80() {
    for op in 0..=255u8 {
        // A prefix byte alone at buffer end must still terminate
        let output = run_z80(&[op]);
        assert!(!output.items().is_empty());
    }
}

#[test]
fn test_every_single_byte_decodes_m6510() {
    for op in 0..=255u8 {
        let output = run_m6510(&[op]);
        assert_eq!(output.items().len(), 1);
        assert_ne!(output.items()[0].instruction, "");
    }
}

#[test]
fn test_opcode_ramp_covers_buffer() {
    let memory: Vec<u8> = (0..=255u8).collect();
    assert_covers_buffer(&run_z80(&memory), memory.len());
    assert_covers_buffer(&run_m6510(&memory), memory.len());
}

#[test]
fn test_byte_soup_is_total_and_monotonic() {
    for seed in [1, 42, 0xdead_beef, 0x1234_5678] {
        let memory = lcg_bytes(seed, 4096);
        let z80_output = run_z80(&memory);
        assert_covers_buffer(&z80_output, memory.len());
        assert_monotonic(&z80_output);

        let m6510_output = run_m6510(&memory);
        assert_covers_buffer(&m6510_output, memory.len());
        assert_monotonic(&m6510_output);
    }
}

#[test]
fn test_determinism_across_runs() {
    let memory = lcg_bytes(7, 2048);
    let first = run_z80(&memory);
    let second = run_z80(&memory);

    assert_eq!(first.items().len(), second.items().len());
    for (a, b) in first.items().iter().zip(second.items()) {
        assert_eq!(a.address, b.address);
        assert_eq!(a.instruction, b.instruction);
        assert_eq!(a.op_codes, b.op_codes);
    }
    assert_eq!(
        first.labels().keys().collect::<Vec<_>>(),
        second.labels().keys().collect::<Vec<_>>()
    );
}

#[test]
fn test_full_64k_space_m6510() {
    let memory = lcg_bytes(99, 0x10000);
    let sections = vec![MemorySection::disassemble(0x0000, 0xffff)];
    let mut disassembler = Disassembler::new(M6510Backend::new(), sections, &memory);
    let output = disassembler.disassemble(0x0000, 0xffff).unwrap();
    assert_covers_buffer(&output, memory.len());
}

#[test]
fn test_truncated_multibyte_tails() {
    // Operations whose operands run past the buffer end
    for memory in [
        &[0xc3u8][..],       // jp with no target
        &[0xdd, 0xcb][..],   // indexed bit prefix with nothing after
        &[0xed][..],         // bare extended prefix
        &[0xdd, 0x36][..],   // ld (ix+d),n missing both operands
    ] {
        let output = run_z80(memory);
        assert!(!output.items().is_empty());
    }
    for memory in [&[0x20u8][..], &[0xad, 0x00][..], &[0xd0][..]] {
        let output = run_m6510(memory);
        assert_eq!(output.items().len(), 1);
    }
}

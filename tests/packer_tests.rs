//! Bit packer tests

use rust_signal_reader::packer::SampleAccumulator;

/// Pack a bit sequence the way the acquisition loop does, collecting
/// every completed unit.
fn pack(bits: &[bool]) -> Vec<u8> {
    let mut acc = SampleAccumulator::new();
    bits.iter().filter_map(|&b| acc.push(b)).collect()
}

/// Reference packing: MSB-first 8-bit grouping, trailing partial group
/// dropped.
fn reference_pack(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|group| group.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
        .collect()
}

#[test]
fn test_known_scenario_byte() {
    let bits = [true, false, true, true, false, false, true, false];
    assert_eq!(pack(&bits), vec![0b1011_0010]);
}

#[test]
fn test_matches_msb_first_grouping() {
    // Pseudo-random but deterministic bit pattern, length not a
    // multiple of 8 so a partial group remains.
    let bits: Vec<bool> = (0u32..83).map(|i| (i * i + i / 3) % 5 < 2).collect();

    assert_eq!(pack(&bits), reference_pack(&bits));
}

#[test]
fn test_final_partial_group_never_emitted() {
    for len in 1..8 {
        let bits = vec![true; len];
        assert!(pack(&bits).is_empty(), "partial group of {} emitted", len);
    }
}

#[test]
fn test_earliest_sample_is_most_significant() {
    let mut bits = vec![false; 8];
    bits[0] = true;
    assert_eq!(pack(&bits), vec![0x80]);

    let mut bits = vec![false; 8];
    bits[7] = true;
    assert_eq!(pack(&bits), vec![0x01]);
}

#[test]
fn test_long_stream_unit_count() {
    let bits = vec![true; 8 * 1000 + 5];
    let units = pack(&bits);
    assert_eq!(units.len(), 1000);
    assert!(units.iter().all(|&u| u == 0xFF));
}

use voxell_rng::rng::XorShift128;

use crate::compressor::Compressor;
use crate::huffman::{self, HuffmanCoding};

const SHORT_DATA: &[u8] = b"Hello, World!";
const LONG_DATA: &[u8] =
    b"This is a longer string to test the huffman coding algorithm. It should be able to handle various lengths and characters.";
const RNG_DATA: &[u8] = &const {
    let mut arr = [0u8; 1000];
    let mut rng = XorShift128::new(0xdeadcafe);
    let mut i = 0;
    while i < 1000 {
        let data = rng.peek_next_u64();
        arr[i] = (data & 0xFF) as u8;
        rng = XorShift128::new(data);
        i += 1;
    }
    arr
};
const REPEATING_DATA: &[u8] = b"a baba da babble da dabble babble doo bee babble dabble dooble dee boo dooble daddle boo";
const SINGLE_SYMBOL_DATA: &[u8] = &[0x41; 1000];
const TWO_SYMBOL_DATA: &[u8] = b"ababababbbbbbbbbbbbbbbbbbbbbbbbbab";
/// Every byte value, value `v` repeated `v + 1` times, so all frequencies differ.
const FULL_ALPHABET_DATA: &[u8] = &const {
    let mut arr = [0u8; 256 * 257 / 2];
    let mut value = 0usize;
    let mut i = 0;
    while value < 256 {
        let mut n = 0;
        while n <= value {
            arr[i] = value as u8;
            i += 1;
            n += 1;
        }
        value += 1;
    }
    arr
};
const EMPTY_DATA: &[u8] = &[];

const TEST_CASES: &[(&[u8], &str)] = &[
    (REPEATING_DATA, "repeating data"),
    (SHORT_DATA, "short data"),
    (LONG_DATA, "long data"),
    (RNG_DATA, "rng data"),
    (SINGLE_SYMBOL_DATA, "single symbol data"),
    (TWO_SYMBOL_DATA, "two symbol data"),
    (FULL_ALPHABET_DATA, "full alphabet data"),
    (EMPTY_DATA, "empty data"),
];

pub fn roundtrip_test<C: Compressor>(mut compressor: C) {
    for &(test_case, test_name) in TEST_CASES {
        match compressor.test_roundtrip(test_case) {
            Ok(eq) => {
                let ratio = compression_ratio(eq.get_original(), eq.get_compressed());

                eprintln!(
                    "Compression ratio for {} with {}: {:.2}%",
                    test_name,
                    compressor.compressor_name(),
                    ratio * 100.0
                );

                assert!(
                    eq.is_successful(),
                    "Roundtrip test for {} failed at {}:\n\tExpected: {:?}\n\tGot: {:?}\n\tCompressed: {:?}",
                    compressor.compressor_name(),
                    test_name,
                    eq.get_original(),
                    eq.get_decompressed(),
                    eq.get_compressed(),
                );
            }
            Err(e) => {
                panic!(
                    "Fatal error while trying to compress/decompress {} with {}: {}",
                    test_name,
                    compressor.compressor_name(),
                    e
                );
            }
        }
    }
}

pub fn compression_ratio(original: &[u8], compressed: &[u8]) -> f64 {
    if original.is_empty() {
        return 0.0;
    }
    compressed.len() as f64 / original.len() as f64
}

#[test]
fn compression_is_deterministic() {
    for &(test_case, test_name) in TEST_CASES {
        let first = huffman::compress(test_case).unwrap();
        let second = HuffmanCoding.compress_bytes(test_case).unwrap();
        assert_eq!(first, second, "output differs between runs for {}", test_name);
    }
}

#[test]
fn full_alphabet_builds_256_leaves() {
    let compressed = huffman::compress(FULL_ALPHABET_DATA).unwrap();
    let tree = huffman::tree::Tree::build(&huffman::tree::count_frequencies(FULL_ALPHABET_DATA));
    assert_eq!(tree.leaf_count(), 256);
    // 255 internal nodes at 1 bit plus 256 leaves at 9 bits.
    let tree_bits = 255 + 256 * 9;
    assert!(compressed.len() > huffman::container::HEADER_LEN + tree_bits / 8);
}

#[test]
fn repetitive_text_shrinks() {
    let compressed = huffman::compress(LONG_DATA).unwrap();
    assert!(compressed.len() < LONG_DATA.len());
}

#[test]
fn single_symbol_costs_no_payload() {
    // 4 byte header plus a 9 bit tree, whatever the input length.
    assert_eq!(huffman::compress(SINGLE_SYMBOL_DATA).unwrap().len(), 6);
}

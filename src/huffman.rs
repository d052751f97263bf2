//! Static huffman coding.
//!
//! The whole input is tallied up front, a tree is built from the byte frequencies, and the tree
//! itself is stored ahead of the encoded symbols so the decoder never needs the frequencies.

use core::fmt::{self, Display};

use crate::compressor::{Compressor, Result};

pub mod bits;
pub mod container;
pub mod symbol_codec;
pub mod tree;
pub mod tree_codec;

pub use self::container::{compress, decompress};

#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCoding;

impl Compressor for HuffmanCoding {
    fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(compress(data)?)
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(decompress(data)?)
    }

    fn compressor_name(&self) -> String {
        self.to_string()
    }
}

impl Display for HuffmanCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Huffman Coding")
    }
}

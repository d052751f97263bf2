//! The compressed file layout:
//!
//! ```text
//! [4 bytes, big-endian i32]  original byte length N
//! [tree bits]                preorder tree, absent when N == 0
//! [symbol bits]              N huffman codes, last byte zero padded
//! ```

use std::io::{self, Read, Write};

use crate::compressor::{CompressionError, DecompressionError};
use crate::huffman::bits::{BitReader, BitWriter};
use crate::huffman::tree::{Tree, count_frequencies};
use crate::huffman::tree_codec;

if_tracing! {
    use tracing::{debug, info};
}

/// Size of the byte count header.
pub const HEADER_LEN: usize = size_of::<i32>();

/// The byte count that prefixes every compressed stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub byte_count: u32,
}

impl Header {
    pub fn for_input(data: &[u8]) -> Result<Self, CompressionError> {
        i32::try_from(data.len())
            .map(|len| Self { byte_count: len as u32 })
            .map_err(|_| CompressionError::InputTooLarge(data.len()))
    }

    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        // byte_count never exceeds i32::MAX, see for_input and read_from.
        sink.write_all(&(self.byte_count as i32).to_be_bytes())
    }

    pub fn read_from<R: Read>(source: &mut R) -> Result<Self, DecompressionError> {
        let mut raw = [0u8; HEADER_LEN];
        source.read_exact(&mut raw).map_err(DecompressionError::from_io("header"))?;

        let count = i32::from_be_bytes(raw);
        if count < 0 {
            return Err(DecompressionError::NegativeLength(count));
        }
        Ok(Self { byte_count: count as u32 })
    }
}

/// Compresses `data` into `sink`, returning the sink once everything has been flushed.
pub fn compress_to<W: Write>(data: &[u8], mut sink: W) -> Result<W, CompressionError> {
    if_tracing! {{
        debug!(target = "huffman", input_len = data.len(), "compress start");
    }}

    let header = Header::for_input(data)?;
    header.write_to(&mut sink)?;

    let tree = Tree::build(&count_frequencies(data));
    let mut writer = BitWriter::new(sink);
    tree_codec::serialize(&tree, &mut writer)?;

    if_tracing! {{
        debug!(target = "huffman", distinct_symbols = tree.leaf_count(), tree_bits = writer.bits_written(), "tree written");
    }}

    for &symbol in data {
        tree.encode_symbol(symbol, &mut writer)?;
    }

    if_tracing! {{
        info!(target = "huffman", input_len = data.len(), payload_bits = writer.bits_written(), "compress complete");
    }}

    Ok(writer.into_inner()?)
}

/// Reads one compressed stream from `source` and returns the original bytes.
///
/// Trailing bytes after the last encoded symbol are left unread.
pub fn decompress_from<R: Read>(mut source: R) -> Result<Vec<u8>, DecompressionError> {
    let header = Header::read_from(&mut source)?;

    if_tracing! {{
        debug!(target = "huffman", byte_count = header.byte_count, "decompress start");
    }}

    if header.byte_count == 0 {
        return Ok(Vec::new());
    }

    let mut reader = BitReader::new(source);
    let tree = tree_codec::deserialize(&mut reader)?;

    // capacity is capped so a lying header cannot force a huge allocation up front.
    let mut out = Vec::with_capacity((header.byte_count as usize).min(1 << 20));
    for _ in 0..header.byte_count {
        out.push(tree.decode_symbol(&mut reader)?);
    }

    if_tracing! {{
        info!(target = "huffman", distinct_symbols = tree.leaf_count(), output_len = out.len(), "decompress complete");
    }}

    Ok(out)
}

/// Compresses `data` into a fresh buffer.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CompressionError> {
    compress_to(data, Vec::with_capacity(HEADER_LEN + data.len() / 2))
}

/// Decompresses a buffer produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, DecompressionError> {
    decompress_from(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_only_a_header() {
        let compressed = compress(&[]).unwrap();
        assert_eq!(compressed, vec![0, 0, 0, 0]);
        assert_eq!(decompress(&compressed).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn header_is_big_endian() {
        let data = vec![7u8; 0x0102];
        let compressed = compress(&data).unwrap();
        assert_eq!(&compressed[..HEADER_LEN], &[0x00, 0x00, 0x01, 0x02]);
    }

    #[test]
    fn single_symbol_layout() {
        // header, then the 9-bit leaf 1 01000001 padded, and no symbol bits at all.
        let compressed = compress(&[0x41; 1000]).unwrap();
        assert_eq!(compressed, vec![0x00, 0x00, 0x03, 0xE8, 0b1010_0000, 0b1000_0000]);
        assert_eq!(decompress(&compressed).unwrap(), vec![0x41; 1000]);
    }

    #[test]
    fn two_symbol_layout() {
        // tree 0 1'a' 1'b' is 19 bits, then codes a=0 b=1 b=1.
        let compressed = compress(b"abb").unwrap();
        assert_eq!(&compressed[..HEADER_LEN], &[0, 0, 0, 3]);
        // 0101 1000 0110 1100 0100 1100 (last 2 bits padding)
        assert_eq!(&compressed[HEADER_LEN..], &[0x58, 0x6C, 0x4C]);
        assert_eq!(decompress(&compressed).unwrap(), b"abb");
    }

    #[test]
    fn compress_to_returns_the_sink() {
        let sink = compress_to(b"hello", Vec::new()).unwrap();
        assert_eq!(sink, compress(b"hello").unwrap());
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        let mut compressed = compress(b"hello world").unwrap();
        compressed.extend_from_slice(&[0xDE, 0xAD]);
        assert_eq!(decompress(&compressed).unwrap(), b"hello world");
    }

    #[test]
    fn short_header_is_truncated() {
        let err = decompress(&[0, 0, 1]).unwrap_err();
        assert!(matches!(err, DecompressionError::Truncated("header")), "{err}");
    }

    #[test]
    fn negative_header_is_rejected() {
        let err = decompress(&[0xFF, 0xFF, 0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, DecompressionError::NegativeLength(-2)), "{err}");
    }

    #[test]
    fn missing_tree_is_truncated() {
        let err = decompress(&[0, 0, 0, 5]).unwrap_err();
        assert!(matches!(err, DecompressionError::Truncated("huffman tree")), "{err}");
    }

    #[test]
    fn overstated_byte_count_is_truncated() {
        let mut compressed = compress(b"the quick brown fox").unwrap();
        compressed[3] = 200;
        let err = decompress(&compressed).unwrap_err();
        assert!(matches!(err, DecompressionError::Truncated("encoded symbols")), "{err}");
    }

    #[test]
    fn truncated_payload_is_an_error() {
        let data = b"jumps over the lazy dog, again and again and again";
        let compressed = compress(data).unwrap();
        let err = decompress(&compressed[..compressed.len() - 3]).unwrap_err();
        assert!(matches!(err, DecompressionError::Truncated(_)), "{err}");
    }
}

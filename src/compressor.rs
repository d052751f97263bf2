pub use anyhow::Result;
use std::io;
use thiserror::Error;

/// Represents an error emitted while encoding data.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// The byte count header is a signed 32-bit integer, so longer inputs cannot be described.
    #[error("input of {0} bytes does not fit the 31-bit length header")]
    InputTooLarge(usize),

    /// A symbol was handed to the encoder that has no leaf in the tree.
    #[error("symbol {0:#04x} has no leaf in the huffman tree")]
    MissingSymbol(u8),

    #[error("I/O error while encoding: {0}")]
    Io(#[from] io::Error),
}

/// Represents an error emitted by the decompressor while decoding data.
#[derive(Debug, Error)]
pub enum DecompressionError {
    /// The input ended before everything the header promised could be read.
    ///
    /// The argument names the part of the stream that was being read.
    #[error("input ended while reading the {0}")]
    Truncated(&'static str),

    #[error("header declares a negative byte count ({0})")]
    NegativeLength(i32),

    /// The serialized tree nests deeper than any tree over 256 symbols can.
    #[error("serialized tree nests deeper than {0} levels")]
    TreeTooDeep(usize),

    #[error("serialized tree contains symbol {0:#04x} more than once")]
    DuplicateLeaf(u8),

    /// Symbols were requested from a tree that has no root.
    #[error("cannot decode symbols without a huffman tree")]
    EmptyTree,

    #[error("I/O error while decoding: {0}")]
    Io(io::Error),
}

impl DecompressionError {
    /// Maps an I/O error raised while reading `what`, turning end-of-stream into [`Truncated`].
    ///
    /// [`Truncated`]: DecompressionError::Truncated
    pub fn from_io(what: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |err| match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::Truncated(what),
            _ => Self::Io(err),
        }
    }
}

/// Represents shared behavior for all compressors.
///
/// Provides a method [`compress_bytes`](Compressor::compress_bytes) to compress data and
/// [`decompress_bytes`](Compressor::decompress_bytes) to decompress data.
///
/// # Note
///
/// No guarantees are made about the length of the resulting [`Vec<u8>`] from
/// [`compress_bytes`](Compressor::compress_bytes). It can be shorter, equal in length, or longer.
/// The only guarantee is that [`decompress_bytes`](Compressor::decompress_bytes) will be able to
/// reconstruct the original data.
pub trait Compressor {
    /// Compresses a given byte slice and returns the encoded data.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be described by the output format.
    fn compress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompresses a given byte slice and returns the decoded data.
    ///
    /// # Errors
    ///
    /// Returns an error if the input data was malformed or truncated.
    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Human readable name, used in reports.
    fn compressor_name(&self) -> String {
        core::any::type_name::<Self>().to_string()
    }

    /// Performs a round-trip test on the compressor.
    ///
    /// Use for sanity checking the compressor and decompressor.
    #[cfg(test)]
    fn test_roundtrip<'orig>(&mut self, data: &'orig [u8]) -> Result<RoundTripTestResult<'orig>> {
        let compressed = self.compress_bytes(data)?;
        let decompressed = self.decompress_bytes(&compressed)?;
        let equal = data == decompressed.as_slice();

        Ok(RoundTripTestResult {
            equal,
            original: data,
            compressed,
            decompressed,
        })
    }
}

/// Represents the result of a round-trip test.
///
/// Use accessor methods to retrieve the [`result`][RoundTripTestResult::is_successful],
/// the [`original data`][RoundTripTestResult::get_original],
/// the [`compressed data`][RoundTripTestResult::get_compressed],
/// and the [`decompressed data`][RoundTripTestResult::get_decompressed].
#[derive(Clone, Debug, Hash)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig [u8],
    pub(crate) compressed: Vec<u8>,
    pub(crate) decompressed: Vec<u8>,
}

impl<'orig> RoundTripTestResult<'orig> {
    /// Whether the original and decompressed data were equal.
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    /// The original data before any action was taken.
    pub const fn get_original(&self) -> &'orig [u8] {
        self.original
    }

    /// The data after it has been encoded by the compressor.
    pub fn get_compressed(&self) -> &[u8] {
        self.compressed.as_slice()
    }

    /// The data after it has been decoded by the decompressor.
    pub fn get_decompressed(&self) -> &[u8] {
        self.decompressed.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_maps_to_truncated() {
        let err = io::Error::from(io::ErrorKind::UnexpectedEof);
        let mapped = DecompressionError::from_io("tree")(err);
        assert!(matches!(mapped, DecompressionError::Truncated("tree")));
    }

    #[test]
    fn other_io_errors_are_kept() {
        let err = io::Error::from(io::ErrorKind::PermissionDenied);
        let mapped = DecompressionError::from_io("header")(err);
        match mapped {
            DecompressionError::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("unexpected error: {other}"),
        }
    }
}

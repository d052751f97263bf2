use std::io::{Read, Write};

use crate::compressor::{CompressionError, DecompressionError};
use crate::huffman::bits::{BitReader, BitWriter};
use crate::huffman::tree::Tree;

impl Tree {
    /// Writes the root-to-leaf path of `symbol`.
    ///
    /// The path is collected leaf-to-root by following parent links, then popped off in reverse.
    /// A tree whose root is a leaf writes no bits at all.
    pub fn encode_symbol<W: Write>(&self, symbol: u8, writer: &mut BitWriter<W>) -> Result<(), CompressionError> {
        let mut current = self.leaf(symbol).ok_or(CompressionError::MissingSymbol(symbol))?;
        let mut stack = Vec::new();

        while let Some(parent) = self.node(current).parent() {
            stack.push(self.node(parent).child(true) == Some(current));
            current = parent;
        }

        while let Some(bit) = stack.pop() {
            writer.write_bit(bit)?;
        }

        Ok(())
    }

    /// Reads bits and walks down from the root until a leaf is reached.
    ///
    /// A root that is itself a leaf is returned without consuming anything, mirroring
    /// [`encode_symbol`](Tree::encode_symbol).
    pub fn decode_symbol<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u8, DecompressionError> {
        let mut current = self.root().ok_or(DecompressionError::EmptyTree)?;

        // stops immediately on a single-leaf root.
        while let Some([zero, one]) = self.node(current).children() {
            let bit = reader.read_bit().map_err(DecompressionError::from_io("encoded symbols"))?;
            current = if bit { one } else { zero };
        }

        Ok(self.node(current).symbol())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use crate::compressor::{CompressionError, DecompressionError};
    use crate::huffman::bits::{BitReader, BitWriter};
    use crate::huffman::tree::{NUM_SYMBOLS, Tree, count_frequencies};

    fn encode_all(tree: &Tree, data: &[u8]) -> (Vec<u8>, u64) {
        let mut writer = BitWriter::new(Vec::new());
        for &symbol in data {
            tree.encode_symbol(symbol, &mut writer).unwrap();
        }
        let bits = writer.bits_written();
        (writer.into_inner().unwrap(), bits)
    }

    #[test]
    fn encoded_bits_match_codes() {
        let data = b"mississippi";
        let tree = Tree::build(&count_frequencies(data));
        let (_, bits) = encode_all(&tree, data);

        let expected: usize = data.iter().map(|&s| tree.code(s).unwrap().len()).sum();
        assert_eq!(bits, expected as u64);
    }

    #[test]
    fn decode_inverts_encode() {
        let data = b"she sells sea shells by the sea shore";
        let tree = Tree::build(&count_frequencies(data));
        let (bytes, _) = encode_all(&tree, data);

        let mut reader = BitReader::new(bytes.as_slice());
        let decoded: Vec<u8> = (0..data.len()).map(|_| tree.decode_symbol(&mut reader).unwrap()).collect();
        assert_eq!(decoded, data);
    }

    #[test]
    fn single_leaf_root_uses_no_bits() {
        let data = [0x41u8; 1000];
        let tree = Tree::build(&count_frequencies(&data));
        let (bytes, bits) = encode_all(&tree, &data);
        assert_eq!(bits, 0);
        assert!(bytes.is_empty());

        let mut reader = BitReader::new(io::empty());
        for _ in 0..data.len() {
            assert_eq!(tree.decode_symbol(&mut reader).unwrap(), 0x41);
        }
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        let tree = Tree::build(&count_frequencies(b"abc"));
        let mut writer = BitWriter::new(Vec::new());
        let err = tree.encode_symbol(b'z', &mut writer).unwrap_err();
        assert!(matches!(err, CompressionError::MissingSymbol(b'z')));
    }

    #[test]
    fn exhausted_stream_is_an_error() {
        let tree = Tree::build(&count_frequencies(b"abcd"));
        let mut reader = BitReader::new(io::empty());
        let err = tree.decode_symbol(&mut reader).unwrap_err();
        assert!(matches!(err, DecompressionError::Truncated(_)));
    }

    #[test]
    fn empty_tree_cannot_decode() {
        let tree = Tree::build(&[0; NUM_SYMBOLS]);
        let err = tree.decode_symbol(&mut BitReader::new(&[0u8][..])).unwrap_err();
        assert!(matches!(err, DecompressionError::EmptyTree));
    }
}

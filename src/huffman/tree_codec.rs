//! Preorder bit serialization of a tree's shape and leaf symbols.
//!
//! A leaf is written as a `1` bit followed by its symbol in 8 bits; an internal node as a `0` bit
//! followed by its `0` child and then its `1` child. The grammar is self-delimiting, so no node
//! count is stored. Frequencies are not part of the format.

use std::io::{self, Read, Write};

use crate::compressor::DecompressionError;
use crate::huffman::bits::{BitReader, BitWriter};
use crate::huffman::tree::{NUM_SYMBOLS, NodeId, Tree};

/// Deepest nesting a tree over the byte alphabet can have.
pub const MAX_DEPTH: usize = NUM_SYMBOLS - 1;

const LEAF: bool = true;
const INTERNAL: bool = false;

/// Writes the tree rooted at `tree.root()`. An empty tree writes nothing.
pub fn serialize<W: Write>(tree: &Tree, writer: &mut BitWriter<W>) -> io::Result<()> {
    match tree.root() {
        Some(root) => serialize_node(tree, root, writer),
        None => Ok(()),
    }
}

fn serialize_node<W: Write>(tree: &Tree, id: NodeId, writer: &mut BitWriter<W>) -> io::Result<()> {
    let node = tree.node(id);
    if node.is_leaf() {
        writer.write_bit(LEAF)?;
        return writer.write_byte(node.symbol());
    }

    writer.write_bit(INTERNAL)?;
    for child in node.children().into_iter().flatten() {
        serialize_node(tree, child, writer)?;
    }
    Ok(())
}

/// Reads one serialized tree and rebuilds it, registering every leaf.
///
/// # Errors
///
/// Fails if the stream ends mid-tree, nests deeper than [`MAX_DEPTH`], or repeats a symbol.
pub fn deserialize<R: Read>(reader: &mut BitReader<R>) -> Result<Tree, DecompressionError> {
    let mut tree = Tree::empty();
    let root = deserialize_node(&mut tree, reader, 0)?;
    tree.set_root(root);
    Ok(tree)
}

fn deserialize_node<R: Read>(tree: &mut Tree, reader: &mut BitReader<R>, depth: usize) -> Result<NodeId, DecompressionError> {
    if depth > MAX_DEPTH {
        return Err(DecompressionError::TreeTooDeep(MAX_DEPTH));
    }

    let kind = reader.read_bit().map_err(DecompressionError::from_io("huffman tree"))?;
    if kind == LEAF {
        let symbol = reader.read_byte().map_err(DecompressionError::from_io("huffman tree"))?;
        if tree.leaf(symbol).is_some() {
            return Err(DecompressionError::DuplicateLeaf(symbol));
        }
        Ok(tree.push_leaf(symbol, 0))
    } else {
        let zero = deserialize_node(tree, reader, depth + 1)?;
        let one = deserialize_node(tree, reader, depth + 1)?;
        Ok(tree.push_internal(zero, one, 0))
    }
}

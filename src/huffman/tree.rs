use core::cmp::Reverse;
use core::fmt;
use std::collections::BinaryHeap;

if_tracing! {
    use tracing::debug;
}

/// Size of the byte alphabet.
pub const NUM_SYMBOLS: usize = 256;

/// Occurrence count of every byte value, indexed by the byte.
pub type Frequencies = [u64; NUM_SYMBOLS];

/// Index of a node inside its [`Tree`]'s arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// One vertex of a huffman tree.
#[derive(Clone, Debug)]
pub struct Node {
    symbol: u8,
    frequency: u64,
    /// `[child0, child1]`. Either both children exist or neither does.
    children: Option<[NodeId; 2]>,
    parent: Option<NodeId>,
}

impl Node {
    /// The byte this leaf stands for. Meaningless on internal nodes.
    pub const fn symbol(&self) -> u8 {
        self.symbol
    }

    /// Occurrence count used while building. Trees read back from a stream carry zero here.
    pub const fn frequency(&self) -> u64 {
        self.frequency
    }

    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Follows the `1` branch if `bit` is set, otherwise the `0` branch.
    pub fn child(&self, bit: bool) -> Option<NodeId> {
        self.children.map(|children| children[bit as usize])
    }

    pub const fn children(&self) -> Option<[NodeId; 2]> {
        self.children
    }

    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// A huffman tree owning all of its nodes.
///
/// Nodes live in a single arena and refer to each other by [`NodeId`], so the parent links the
/// encoder walks never form ownership cycles. The tree is filled in once, either by [`Tree::build`]
/// or by [`deserialize`](super::tree_codec::deserialize), and is read-only afterward.
#[derive(Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    leaves: [Option<NodeId>; NUM_SYMBOLS],
}

/// Tallies how often each byte value occurs in `data`.
pub fn count_frequencies(data: &[u8]) -> Frequencies {
    let mut frequencies = [0u64; NUM_SYMBOLS];
    for &byte in data {
        frequencies[byte as usize] += 1;
    }
    frequencies
}

impl Tree {
    pub(super) const fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            leaves: [None; NUM_SYMBOLS],
        }
    }

    /// Builds the huffman tree for `frequencies`.
    ///
    /// Nodes are merged lowest `(frequency, symbol)` first, with the first node removed from the
    /// queue going on the `0` branch. An internal node is queued under the symbol of its `0`
    /// child, which keeps every key in the queue distinct and the resulting shape deterministic.
    ///
    /// With no nonzero frequency the tree has no root. With exactly one, that leaf is the root.
    pub fn build(frequencies: &Frequencies) -> Self {
        let mut tree = Self::empty();
        let mut queue = BinaryHeap::new();

        for (symbol, &frequency) in frequencies.iter().enumerate() {
            if frequency == 0 {
                continue;
            }
            let symbol = symbol as u8;
            let id = tree.push_leaf(symbol, frequency);
            queue.push(Reverse((frequency, symbol, id)));
        }

        if_tracing! {{
            debug!(target = "huffman", distinct_symbols = queue.len(), "building tree");
        }}

        while let Some(Reverse((f0, symbol, zero))) = queue.pop() {
            // the last node standing is the root, including a sole leaf that never merged.
            let Some(Reverse((f1, _, one))) = queue.pop() else {
                tree.root = Some(zero);
                break;
            };
            let parent = tree.push_internal(zero, one, f0 + f1);
            queue.push(Reverse((f0 + f1, symbol, parent)));
        }

        tree
    }

    pub(super) fn push_leaf(&mut self, symbol: u8, frequency: u64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            symbol,
            frequency,
            children: None,
            parent: None,
        });
        self.leaves[symbol as usize] = Some(id);
        id
    }

    pub(super) fn push_internal(&mut self, zero: NodeId, one: NodeId, frequency: u64) -> NodeId {
        let id = NodeId(self.nodes.len());
        // internal nodes borrow their 0 child's symbol; it only matters as a queue tie-break.
        let symbol = self.nodes[zero.0].symbol;
        self.nodes.push(Node {
            symbol,
            frequency,
            children: Some([zero, one]),
            parent: None,
        });
        self.nodes[zero.0].parent = Some(id);
        self.nodes[one.0].parent = Some(id);
        id
    }

    pub(super) fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The leaf holding `symbol`, if the symbol is part of this tree's alphabet.
    pub fn leaf(&self, symbol: u8) -> Option<NodeId> {
        self.leaves[symbol as usize]
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.iter().flatten().count()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root-to-leaf path for `symbol`, `true` meaning the `1` branch.
    ///
    /// A tree made of a single leaf yields an empty path.
    pub fn code(&self, symbol: u8) -> Option<Vec<bool>> {
        let mut path = Vec::new();
        let mut current = self.leaf(symbol)?;

        while let Some(parent) = self.node(current).parent {
            path.push(self.node(parent).child(true) == Some(current));
            current = parent;
        }

        path.reverse();
        Some(path)
    }

    /// Symbols present in the tree, in ascending byte order.
    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        (0..NUM_SYMBOLS).filter(|&s| self.leaves[s].is_some()).map(|s| s as u8)
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn walk(tree: &Tree, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let node = tree.node(id);
            match node.children {
                None => write!(f, "{:?}", node.symbol as char),
                Some([zero, one]) => {
                    f.write_str("(")?;
                    walk(tree, zero, f)?;
                    f.write_str(" ")?;
                    walk(tree, one, f)?;
                    f.write_str(")")
                }
            }
        }

        match self.root {
            Some(root) => walk(self, root, f),
            None => f.write_str("<empty>"),
        }
    }
}

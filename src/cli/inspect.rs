use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::InspectArgs;
use crate::huffman::bits::{BitReader, BitWriter};
use crate::huffman::container::{HEADER_LEN, Header};
use crate::huffman::tree::{NUM_SYMBOLS, Tree, count_frequencies};
use crate::huffman::tree_codec;

/// Code table of a single tree, as printed by `inspect`.
#[derive(Serialize, Debug)]
pub struct TreeReport {
    /// Bytes the tree encodes, taken from the input length or the compressed header.
    pub byte_count: u64,
    pub distinct_symbols: usize,
    /// Leaves and internal nodes together.
    pub nodes: usize,
    /// Size of the serialized tree.
    pub tree_bits: u64,
    /// Size of the encoded symbols. Only known when frequencies are.
    pub payload_bits: Option<u64>,
    pub codes: Vec<CodeEntry>,
}

#[derive(Serialize, Debug)]
pub struct CodeEntry {
    pub symbol: u8,
    pub display: String,
    pub frequency: Option<u64>,
    pub code: String,
}

impl TreeReport {
    /// Frequencies are taken from the tree's leaves. A tree read back from a compressed file has
    /// none, so its payload size stays unknown.
    pub fn new(tree: &Tree, byte_count: u64) -> io::Result<Self> {
        let mut counter = BitWriter::new(io::sink());
        tree_codec::serialize(tree, &mut counter)?;

        let codes: Vec<CodeEntry> = tree
            .symbols()
            .filter_map(|symbol| tree.leaf(symbol).map(|id| (symbol, tree.node(id).frequency())))
            .map(|(symbol, frequency)| CodeEntry {
                symbol,
                display: display_symbol(symbol),
                frequency: Some(frequency).filter(|&f| f > 0),
                code: tree
                    .code(symbol)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|bit| if bit { '1' } else { '0' })
                    .collect(),
            })
            .collect();

        let payload_bits = if tree.is_empty() {
            Some(0)
        } else if codes.iter().all(|entry| entry.frequency.is_some()) {
            Some(
                codes
                    .iter()
                    .map(|entry| entry.frequency.unwrap_or(0) * entry.code.len() as u64)
                    .sum::<u64>(),
            )
        } else {
            None
        };

        Ok(Self {
            byte_count,
            distinct_symbols: tree.leaf_count(),
            nodes: tree.node_count(),
            tree_bits: counter.bits_written(),
            payload_bits,
            codes,
        })
    }

    /// Size of the compressed file, when the payload size is known.
    pub fn compressed_len(&self) -> Option<u64> {
        self.payload_bits
            .map(|payload| HEADER_LEN as u64 + (self.tree_bits + payload).div_ceil(u8::BITS as u64))
    }

    fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "bytes: {}", self.byte_count)?;
        writeln!(out, "distinct symbols: {}", self.distinct_symbols)?;
        writeln!(out, "nodes: {}", self.nodes)?;
        writeln!(out, "tree: {} bits", self.tree_bits)?;
        if let (Some(payload), Some(total)) = (self.payload_bits, self.compressed_len()) {
            writeln!(out, "payload: {} bits", payload)?;
            writeln!(out, "compressed size: {} bytes", total)?;
        }
        writeln!(out)?;

        for entry in &self.codes {
            match entry.frequency {
                Some(freq) => writeln!(out, "{:>6} {:>10}  {}", entry.display, freq, entry.code)?,
                None => writeln!(out, "{:>6}  {}", entry.display, entry.code)?,
            }
        }
        Ok(())
    }
}

fn display_symbol(symbol: u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("{:#04x}", symbol)
    }
}

pub fn inspect(args: InspectArgs) -> Result<()> {
    let data = fs::read(&args.input).with_context(|| format!("failed to read {}", args.input.display()))?;

    let report = if args.compressed {
        let mut source = data.as_slice();
        let header = Header::read_from(&mut source).context("failed to read compressed header")?;
        let tree = if header.byte_count == 0 {
            Tree::build(&[0; NUM_SYMBOLS])
        } else {
            tree_codec::deserialize(&mut BitReader::new(source)).context("failed to read stored tree")?
        };
        TreeReport::new(&tree, header.byte_count as u64)?
    } else {
        TreeReport::new(&Tree::build(&count_frequencies(&data)), data.len() as u64)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        report.write_table(&mut out)?;
    }
    Ok(())
}

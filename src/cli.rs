//! cli component of the huffpack project.
//!
//! lines starting with `> ` denote valid invocations. `$exename` stands for the executable name,
//! `<description>` denotes a required argument and `[description]` an optional one.
//!
//! # Compression
//!
//! > `$exename compress <input file> <output file>`
//!
//! the whole input file is read into memory, byte frequencies are tallied, and the output is
//! written as a 4 byte big-endian length, the serialized huffman tree, then the encoded bytes.
//! `c` and `enc` are accepted as shorthands.
//!
//! # Decompression
//!
//! > `$exename decompress <input file> <output file>`
//!
//! reads the length and the tree, then decodes exactly that many bytes. the output file is only
//! created once decoding succeeded, so a corrupt input never leaves a half-written file behind.
//! `d` and `dec` are accepted as shorthands.
//!
//! # Testing
//!
//! > `$exename test <input file> [--keep <directory>]`
//!
//! compresses the file in memory, immediately decompresses it and compares the result with the
//! original. if they differ, the original and the roundtripped bytes are written to the keep
//! directory (the current directory by default) as `{name}.expected.bin` and `{name}.got.bin`.
//!
//! > `$exename corpus [directory]`
//!
//! does the same for every file below a directory, `./test_data` by default, and fails if any
//! of them did not survive the roundtrip.
//!
//! # Inspection
//!
//! > `$exename inspect <file> [--compressed] [--json]`
//!
//! prints the code assigned to every symbol. for a plain file the tree is built from its
//! frequencies; with `--compressed` the tree stored in a compressed file is read back instead,
//! which carries no frequencies. `--json` prints the same report as json.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod compress;
pub mod corpus;
pub mod decompress;
pub mod inspect;

/// CLI arguments for the huffpack application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for huffpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a file
    #[command(visible_alias = "c", alias = "enc")]
    Compress(CompressArgs),

    /// Decompress a file produced by `compress`
    #[command(visible_alias = "d", alias = "dec")]
    Decompress(DecompressArgs),

    /// Test compression/decompression roundtrip of a single file
    Test(TestArgs),

    /// Roundtrip every file below a directory
    Corpus(CorpusArgs),

    /// Print the huffman code table of a file
    Inspect(InspectArgs),
}

/// Arguments specific to the compress command
#[derive(Args, Debug)]
pub struct CompressArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the compressed output file
    pub output: PathBuf,
}

/// Arguments specific to the decompress command
#[derive(Args, Debug)]
pub struct DecompressArgs {
    /// Path to the compressed input file
    pub input: PathBuf,

    /// Path for the decompressed output file
    pub output: PathBuf,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the original file
    pub input: PathBuf,

    /// Directory that receives the expected/got dumps on a mismatch
    #[arg(long, default_value = ".")]
    pub keep: PathBuf,
}

/// Arguments specific to the corpus command
#[derive(Args, Debug)]
pub struct CorpusArgs {
    /// Directory to walk for input files
    #[arg(default_value = "./test_data")]
    pub directory: PathBuf,

    /// Directory that receives the expected/got dumps on a mismatch
    #[arg(long, default_value = ".")]
    pub keep: PathBuf,
}

/// Arguments specific to the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// File to inspect
    pub input: PathBuf,

    /// Treat the input as a compressed file and read its stored tree
    #[arg(long)]
    pub compressed: bool,

    /// Print the report as json
    #[arg(long)]
    pub json: bool,
}

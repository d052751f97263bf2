use std::fs::{self, File};
use std::io::BufReader;

use anyhow::{Context, Result};
use voxell_timer::time_fn;

use crate::cli::DecompressArgs;
use crate::huffman::container;

pub fn decompress(args: DecompressArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let input = File::open(input_path).with_context(|| format!("failed to open input file {}", input_path.display()))?;

    // decode fully before touching the output path.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    let (decompressed_data, decomp_dur) = time_fn(|| container::decompress_from(BufReader::new(input)));
    let decompressed_data = decompressed_data.with_context(|| format!("failed to decompress {}", input_path.display()))?;

    if_tracing! {{
        tracing::info!(event = "decompress_complete", input = %input_path.display(), output = %output_path.display(), elapsed_us = %decomp_dur.as_micros(), decompressed_len = decompressed_data.len(), "decompress finished");
    }}

    fs::write(output_path, decompressed_data).with_context(|| format!("failed to write output file {}", output_path.display()))
}

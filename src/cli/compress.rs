use std::fs::{self, File};
use std::io::BufWriter;

use anyhow::{Context, Result};
use voxell_timer::time_fn;

use crate::cli::CompressArgs;
use crate::huffman::container;

pub fn compress(args: CompressArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let input_data = fs::read(input_path).with_context(|| format!("failed to read input file {}", input_path.display()))?;
    let output =
        File::create(output_path).with_context(|| format!("failed to create output file {}", output_path.display()))?;

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    let (sink, comp_dur) = time_fn(|| container::compress_to(&input_data, BufWriter::new(output)));
    let sink = sink.with_context(|| format!("failed to compress {} into {}", input_path.display(), output_path.display()))?;
    let file = sink.into_inner().context("failed to flush output file")?;

    if_tracing! {{
        let compressed_len = file.metadata().map(|m| m.len()).unwrap_or_default();
        tracing::info!(event = "compress_complete", input = %input_path.display(), output = %output_path.display(), elapsed_us = %comp_dur.as_micros(), input_len = input_data.len(), compressed_len, "compress finished");
    }}

    drop(file);
    Ok(())
}

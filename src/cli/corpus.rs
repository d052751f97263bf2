use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, bail};
use voxell_timer::time_fn;
use walkdir::WalkDir;

use crate::{
    cli::CorpusArgs,
    compressor::{Compressor, RoundTripTestResult},
    huffman::HuffmanCoding,
};

pub fn corpus(args: CorpusArgs) -> Result<()> {
    if !args.directory.is_dir() {
        bail!("corpus directory {} does not exist", args.directory.display());
    }

    let mut total = 0usize;
    let mut failed = 0usize;

    for entry in WalkDir::new(&args.directory).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(args.directory.as_path()).to_path_buf();
                report_unreadable(&path, &anyhow::Error::new(e));
                total += 1;
                failed += 1;
                continue;
            }
        };
        if !(entry.file_type().is_file() || entry.file_type().is_symlink()) {
            continue;
        }

        let path = entry.path();
        total += 1;
        let input = match fs::read(path) {
            Ok(input) => input,
            Err(e) => {
                report_unreadable(path, &anyhow::Error::new(e));
                failed += 1;
                continue;
            }
        };

        if !roundtrip_and_report(&input, path, &args.keep)? {
            failed += 1;
        }
    }

    eprintln!("{} of {} files passed", total - failed, total);
    if failed > 0 {
        bail!("{} of {} files failed the roundtrip", failed, total);
    }
    Ok(())
}

/// An entry that could not be read counts as a failed file instead of being skipped.
fn report_unreadable(path: &Path, error: &anyhow::Error) {
    if_tracing! {{
        tracing::warn!(target = "corpus", path = %path.display(), error = %error, "unreadable entry");
    }}
    eprintln!("======== FAILED {} ========\n\terror: could not read entry: {:#}", path.display(), error);
}

/// Compresses and decompresses `input` in memory, printing a report for `path`.
///
/// Returns whether the roundtrip reproduced the input. Mismatches are dumped into `keep`.
pub fn roundtrip_and_report(input: &[u8], path: &Path, keep: &Path) -> Result<bool> {
    let mut compressor = HuffmanCoding;
    let mut result = RoundTripTestResult {
        equal: false,
        original: input,
        compressed: Vec::new(),
        decompressed: Vec::new(),
    };

    let (compressed, comp_dur) = time_fn(|| compressor.compress_bytes(input));
    result.compressed = match compressed {
        Ok(data) => data,
        Err(e) => return print_results(Err(e), path, &compressor.compressor_name(), &result, comp_dur, Duration::ZERO, keep),
    };

    let (decompressed, decomp_dur) = time_fn(|| compressor.decompress_bytes(&result.compressed));
    let res = decompressed.map(|data| {
        result.equal = input == data.as_slice();
        result.decompressed = data;
    });

    print_results(res, path, &compressor.compressor_name(), &result, comp_dur, decomp_dur, keep)
}

fn save_failed_equality_results_to_file(expected: &[u8], got: &[u8], path: &Path, keep: &Path) -> Result<(String, String)> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    let target_expected = keep.join(format!("{}.expected.bin", filename));
    let target_got = keep.join(format!("{}.got.bin", filename));

    for target in [&target_expected, &target_got] {
        if target.try_exists()? {
            let mut old = target.clone().into_os_string();
            old.push(".old");
            fs::rename(target, old)?;
        }
    }

    fs::write(&target_expected, expected)?;
    fs::write(&target_got, got)?;

    Ok((target_expected.display().to_string(), target_got.display().to_string()))
}

fn print_results(
    res: Result<()>,
    path: &Path,
    compressor_name: &str,
    result: &RoundTripTestResult<'_>,
    compression_time: Duration,
    decompression_time: Duration,
    keep: &Path,
) -> Result<bool> {
    let expected = result.get_original();
    let got = result.get_decompressed();
    let original_size = expected.len();
    let compressed_size = result.get_compressed().len();
    let decompressed_size = got.len();

    let ratio = if original_size == 0 {
        1.0
    } else {
        compressed_size as f64 / original_size as f64
    };

    let bytes_saved = original_size as isize - compressed_size as isize;
    let percent_saved = if original_size == 0 {
        0.0
    } else {
        (bytes_saved as f64) / (original_size as f64) * 100.0
    };

    let passed = result.is_successful() && res.is_ok();

    let details = if passed {
        String::new()
    } else {
        let (expected_dump, got_dump) = save_failed_equality_results_to_file(expected, got, path, keep)
            .with_context(|| format!("failed to dump mismatch for {}", path.display()))?;
        let error = match &res {
            Err(e) => format!("{:#}", e),
            Ok(()) => "output differs from input".to_string(),
        };
        format!("error: {}\nsee {} and {} for details", error, expected_dump, got_dump)
    };

    if_tracing! {{
        tracing::debug!(target = "corpus", path = %path.display(), passed, original_size, compressed_size, "roundtrip checked");
    }}

    eprintln!(
        "======== {} {} ({}) ========\n\t{:.0?} encode\n\t{:.0?} decode\n\toriginal: {} bytes\n\tcompressed: {} bytes\n\tdecompressed: {} bytes\n\tratio: {:.1}% (compressed/original)\n\tsaved: {:+} bytes ({:+.1}%)\n\t{}",
        if passed { "PASSED" } else { "FAILED" },
        path.display(),
        compressor_name,
        compression_time,
        decompression_time,
        original_size,
        compressed_size,
        decompressed_size,
        ratio * 100.0,
        bytes_saved,
        percent_saved,
        details,
    );

    Ok(passed)
}

// backuptool/src/backup/compress.rs
use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Terminal state of one compression task.
#[derive(Debug)]
pub enum CompressionOutcome {
    /// Compressed and the original removed.
    Cleaned { destination: PathBuf },
    /// Compressed, but the original could not be removed. The compressed
    /// artifact is valid; the leftover original is only a logged anomaly.
    CleanupFailed {
        destination: PathBuf,
        error: io::Error,
    },
    /// Compression failed; the original is left untouched.
    CompressFailed {
        source: PathBuf,
        error: anyhow::Error,
    },
    /// The source file was gone before compression started.
    MissingSource { source: PathBuf },
}

/// Derives the sibling destination path: `<source>.gz`.
pub fn gz_destination(source: &Path) -> PathBuf {
    let mut path = source.as_os_str().to_os_string();
    path.push(".gz");
    PathBuf::from(path)
}

/// Compresses one backup file and removes the original on success.
///
/// Each invocation owns its source/destination pair exclusively and shares
/// no state with other invocations, so any number of them may run
/// concurrently. The source is never deleted unless the compressed file was
/// fully written.
pub fn compress_and_cleanup(source: &Path) -> CompressionOutcome {
    if !source.is_file() {
        eprintln!("❌ Source file does not exist: {}", source.display());
        return CompressionOutcome::MissingSource {
            source: source.to_path_buf(),
        };
    }

    let destination = gz_destination(source);
    println!("🗜 Compressing: {}", source.display());

    if let Err(error) = compress_file(source, &destination) {
        eprintln!("❌ Compression failed for {}: {:?}", source.display(), error);
        return CompressionOutcome::CompressFailed {
            source: source.to_path_buf(),
            error,
        };
    }
    println!(
        "✔ Compressed {} to {}",
        source.display(),
        destination.display()
    );

    match fs::remove_file(source) {
        Ok(()) => {
            println!("✔ Deleted original: {}", source.display());
            CompressionOutcome::Cleaned { destination }
        }
        Err(error) => {
            eprintln!(
                "⚠ Failed to delete original {}: {}",
                source.display(),
                error
            );
            CompressionOutcome::CleanupFailed { destination, error }
        }
    }
}

fn compress_file(source: &Path, destination: &Path) -> Result<()> {
    // A destination left behind by an earlier run or attempt is replaced.
    if destination.exists() {
        fs::remove_file(destination).with_context(|| {
            format!(
                "Failed to remove stale destination file: {}",
                destination.display()
            )
        })?;
    }

    let input = File::open(source)
        .with_context(|| format!("Failed to open source file: {}", source.display()))?;
    let output = File::create(destination)
        .with_context(|| format!("Failed to create destination file: {}", destination.display()))?;

    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut BufReader::new(input), &mut encoder)
        .with_context(|| format!("Failed to compress {}", source.display()))?;
    encoder.finish().with_context(|| {
        format!(
            "Failed to finish Gzip encoding for {}",
            destination.display()
        )
    })?;

    Ok(())
}

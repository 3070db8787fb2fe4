//! Reference loader for FASTA files using noodles.
//!
//! Supports both uncompressed and gzip/bgzip compressed files:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::debug;

use crate::core::reference::ReferenceSequence;
use crate::parsing::sam::ParseError;

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub(crate) fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Load the sequence named `ctg_name` from a FASTA file.
///
/// Records are read in file order and reading stops at the first record
/// whose name matches exactly.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if parsing fails, or `ParseError::ContigNotFound` if no record matches.
pub fn load_reference(path: &Path, ctg_name: &str) -> Result<ReferenceSequence, ParseError> {
    let file = std::fs::File::open(path)?;

    if is_gzipped(path) {
        let reader = BufReader::new(MultiGzDecoder::new(file));
        find_contig(&mut fasta::io::Reader::new(reader), ctg_name)
    } else {
        let reader = BufReader::new(file);
        find_contig(&mut fasta::io::Reader::new(reader), ctg_name)
    }
}

/// Scan a noodles FASTA reader for `ctg_name`
pub fn find_contig<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
    ctg_name: &str,
) -> Result<ReferenceSequence, ParseError> {
    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name: &[u8] = record.name();
        if name != ctg_name.as_bytes() {
            continue;
        }

        let bases = record.sequence().as_ref().to_vec();
        debug!(contig = %ctg_name, length = bases.len(), "Loaded reference sequence");
        return Ok(ReferenceSequence::new(ctg_name, bases));
    }

    Err(ParseError::ContigNotFound(ctg_name.to_string()))
}

//! Readers for the reference sequence and the alignment-record stream.
//!
//! - **FASTA**: the single target contig, selected by exact name
//! - **SAM text**: full files or headerless `samtools view` output, from a
//!   file or stdin (`-`)
//! - **BAM**: binary alignments
//!
//! Both alignment formats are decoded with noodles.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pileup_scan::parsing::{fasta::load_reference, open_alignments};
//! use std::path::Path;
//!
//! let reference = load_reference(Path::new("ref.fa"), "chr17").unwrap();
//! for record in open_alignments(Path::new("sample.bam")).unwrap() {
//!     let record = record.unwrap();
//!     println!("{} {:?}", record.contig, record.start);
//! }
//! ```

pub mod bam;
pub mod fasta;
pub mod sam;

use std::io::Read;
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::core::alignment::AlignmentRecord;
use crate::parsing::sam::ParseError;

/// Boxed stream of alignment records from any supported source
pub type AlignmentRecords = Box<dyn Iterator<Item = Result<AlignmentRecord, ParseError>>>;

/// Open an alignment source, choosing the decoder from the path.
///
/// `-` reads SAM text from stdin; `.sam` and `.sam.gz` are SAM text; `.bam`
/// is decoded with noodles.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened,
/// `ParseError::Noodles` if a SAM or BAM header is malformed, or
/// `ParseError::UnsupportedFormat` for any other extension.
pub fn open_alignments(path: &Path) -> Result<AlignmentRecords, ParseError> {
    if path == Path::new("-") {
        return sam_text(std::io::stdin());
    }

    let lower = path.to_string_lossy().to_lowercase();
    if lower.ends_with(".sam.gz") {
        let file = std::fs::File::open(path)?;
        return sam_text(MultiGzDecoder::new(file));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("sam") => {
            let file = std::fs::File::open(path)?;
            sam_text(file)
        }
        Some("bam") => {
            let file = std::fs::File::open(path)?;
            Ok(Box::new(bam::read_bam(file)?))
        }
        Some(ext) => Err(ParseError::UnsupportedFormat(ext.to_string())),
        None => Err(ParseError::UnsupportedFormat(path.display().to_string())),
    }
}

fn sam_text<R: Read + 'static>(inner: R) -> Result<AlignmentRecords, ParseError> {
    Ok(Box::new(sam::read_sam(inner)?))
}

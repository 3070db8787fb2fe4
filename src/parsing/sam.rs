use std::io::{BufReader, Read};

use noodles::sam;
use noodles::sam::alignment::record::cigar::Op;
use thiserror::Error;

use crate::core::alignment::{AlignmentRecord, CigarOp};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid alignment record: {0}")]
    InvalidFormat(String),

    #[error("Invalid CIGAR string: {0}")]
    InvalidCigar(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot find reference sequence {0}")]
    ContigNotFound(String),
}

pub(crate) fn noodles_error(e: impl std::fmt::Display) -> ParseError {
    ParseError::Noodles(e.to_string())
}

/// Map decoded noodles CIGAR ops onto [`CigarOp`], stopping at the first error
pub(crate) fn convert_ops<E>(
    ops: impl Iterator<Item = Result<Op, E>>,
) -> Result<Vec<CigarOp>, E> {
    ops.map(|result| result.map(|op| CigarOp::new(op.kind().into(), op.len())))
        .collect()
}

/// Parse a CIGAR string such as `5S90M2I3M` into run-length operations.
///
/// `*` (CIGAR unavailable) parses to an empty list.
///
/// # Errors
///
/// Returns `ParseError::InvalidCigar` for an empty string, unknown operation
/// codes, missing lengths, or a trailing length without an operation.
pub fn parse_cigar(text: &str) -> Result<Vec<CigarOp>, ParseError> {
    match text {
        "*" => Ok(Vec::new()),
        "" => Err(ParseError::InvalidCigar("empty CIGAR".to_string())),
        _ => convert_ops(sam::record::Cigar::new(text.as_bytes()).iter())
            .map_err(|e| ParseError::InvalidCigar(format!("{text}: {e}"))),
    }
}

/// Read SAM text from `inner` (a full file or headerless `samtools view`
/// output) and stream its alignment records.
///
/// Header lines are consumed up front; a stream without a header is fine
/// because records carry contig names rather than ids.
///
/// # Errors
///
/// Returns `ParseError::Noodles` if the header cannot be read. Errors while
/// decoding individual records are yielded by the iterator and name the
/// 1-based record number.
pub fn read_sam<R: Read>(
    inner: R,
) -> Result<impl Iterator<Item = Result<AlignmentRecord, ParseError>>, ParseError> {
    let mut reader = sam::io::Reader::new(BufReader::new(inner));
    reader.read_header().map_err(noodles_error)?;
    let mut record = sam::Record::default();
    let mut record_number = 0usize;

    Ok(std::iter::from_fn(move || {
        record_number += 1;
        let result = match reader.read_record(&mut record) {
            Ok(0) => return None,
            Ok(_) => convert_record(&record),
            Err(e) => Err(noodles_error(e)),
        };
        Some(result.map_err(|e| match e {
            ParseError::Noodles(msg) => {
                ParseError::InvalidFormat(format!("record {record_number}: {msg}"))
            }
            other => other,
        }))
    }))
}

/// Convert a noodles SAM record into the fields the scanner consumes
fn convert_record(record: &sam::Record) -> Result<AlignmentRecord, ParseError> {
    let contig = record
        .reference_sequence_name()
        .map_or_else(|| "*".to_string(), |name| name.to_string());

    let start = record
        .alignment_start()
        .transpose()
        .map_err(noodles_error)?
        .map(|position| (position.get() - 1) as u64);

    let cigar = convert_ops(record.cigar().iter()).map_err(|e| {
        ParseError::InvalidCigar(format!(
            "{}: {e}",
            String::from_utf8_lossy(record.cigar().as_ref())
        ))
    })?;

    let sequence = record.sequence().as_ref().to_vec();

    Ok(AlignmentRecord::new(contig, start, cigar, sequence))
}

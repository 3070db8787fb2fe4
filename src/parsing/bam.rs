//! BAM input through noodles.
//!
//! Reference sequence ids are resolved to names through the BAM header so
//! records can be filtered by contig name exactly like SAM text input.

use std::io::Read;

use noodles::{bam, sam};

use crate::core::alignment::AlignmentRecord;
use crate::parsing::sam::{convert_ops, noodles_error, ParseError};

/// Read the BAM header from `inner` and stream its alignment records.
///
/// # Errors
///
/// Returns `ParseError::Noodles` if the header cannot be read. Errors while
/// decoding individual records are yielded by the iterator.
pub fn read_bam<R: Read>(
    inner: R,
) -> Result<impl Iterator<Item = Result<AlignmentRecord, ParseError>>, ParseError> {
    let mut reader = bam::io::Reader::new(inner);
    let header = reader.read_header().map_err(noodles_error)?;
    let mut record = bam::Record::default();

    Ok(std::iter::from_fn(move || {
        match reader.read_record(&mut record) {
            Ok(0) => None,
            Ok(_) => Some(convert_record(&header, &record)),
            Err(e) => Some(Err(noodles_error(e))),
        }
    }))
}

/// Convert a noodles BAM record into the fields the scanner consumes
fn convert_record(
    header: &sam::Header,
    record: &bam::Record,
) -> Result<AlignmentRecord, ParseError> {
    let contig = match record
        .reference_sequence_id()
        .transpose()
        .map_err(noodles_error)?
    {
        Some(id) => header
            .reference_sequences()
            .get_index(id)
            .map(|(name, _)| name.to_string())
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "reference sequence id {id} is not in the BAM header"
                ))
            })?,
        None => "*".to_string(),
    };

    let start = record
        .alignment_start()
        .transpose()
        .map_err(noodles_error)?
        .map(|position| (position.get() - 1) as u64);

    let cigar = convert_ops(record.cigar().iter()).map_err(noodles_error)?;

    let sequence: Vec<u8> = record.sequence().iter().collect();

    Ok(AlignmentRecord::new(contig, start, cigar, sequence))
}

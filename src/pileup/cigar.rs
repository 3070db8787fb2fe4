//! CIGAR interpretation: read acceptance and per-base reference coordinates.
//!
//! A read is walked from its leftmost reference position with a query offset
//! of zero. Only `M`, `=` and `X` runs produce (position, base) pairs:
//!
//! | Op          | Reference offset | Query offset | Emits |
//! |-------------|------------------|--------------|-------|
//! | `M` `=` `X` | +len             | +len         | yes   |
//! | `S` `I`     |                  | +len         | no    |
//! | `D`         | +len             |              | no    |
//! | `N` `H` `P` |                  |              | no    |
//!
//! Deleted spans add nothing to any tally, so they are invisible to depth.

use std::slice;

use crate::core::alignment::{CigarOp, CigarOpKind};
use crate::core::types::Base;

/// Why a read was kept out of the pileup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadRejection {
    /// Too much of the alignment span is soft-clipped
    Clipped { aligned_fraction: f64 },

    /// The CIGAR consumes more query bases than the record carries
    MissingBases { needed: usize, available: usize },
}

/// Sum of all op lengths and of soft-clip lengths
fn span_and_clipped(cigar: &[CigarOp]) -> (usize, usize) {
    cigar.iter().fold((0, 0), |(total, clipped), op| {
        let clip = if op.kind == CigarOpKind::SoftClip {
            op.len
        } else {
            0
        };
        (total + op.len, clipped + clip)
    })
}

/// Non-soft-clipped fraction of a read: `1 - clipped / (total + 1)`.
///
/// Every op counts toward the total, including hard clips and indels.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aligned_fraction(cigar: &[CigarOp]) -> f64 {
    let (total, clipped) = span_and_clipped(cigar);
    1.0 - clipped as f64 / (total as f64 + 1.0)
}

/// Number of read bases the walk reads or skips over (`M`, `=`, `X`, `S`, `I`)
#[must_use]
pub fn query_length(cigar: &[CigarOp]) -> usize {
    cigar
        .iter()
        .filter(|op| {
            matches!(
                op.kind,
                CigarOpKind::Match
                    | CigarOpKind::SequenceMatch
                    | CigarOpKind::SequenceMismatch
                    | CigarOpKind::SoftClip
                    | CigarOpKind::Insertion
            )
        })
        .map(|op| op.len)
        .sum()
}

/// Decide whether a read enters the pileup and, if so, walk its bases.
///
/// # Errors
///
/// Returns `ReadRejection::Clipped` when the aligned fraction is below
/// `min_aligned_fraction`, or `ReadRejection::MissingBases` when the
/// sequence is shorter than the CIGAR's query length (e.g. SEQ `*`).
pub fn interpret<'a>(
    start: u64,
    cigar: &'a [CigarOp],
    sequence: &'a [u8],
    min_aligned_fraction: f64,
) -> Result<AlignedBases<'a>, ReadRejection> {
    let fraction = aligned_fraction(cigar);
    if fraction < min_aligned_fraction {
        return Err(ReadRejection::Clipped {
            aligned_fraction: fraction,
        });
    }

    let needed = query_length(cigar);
    if needed > sequence.len() {
        return Err(ReadRejection::MissingBases {
            needed,
            available: sequence.len(),
        });
    }

    Ok(AlignedBases::new(start, cigar, sequence))
}

/// Lazy walk over the (reference position, base) pairs of an accepted read
#[derive(Debug, Clone)]
pub struct AlignedBases<'a> {
    ops: slice::Iter<'a, CigarOp>,
    sequence: &'a [u8],
    ref_pos: u64,
    query_pos: usize,
    remaining: usize,
}

impl<'a> AlignedBases<'a> {
    #[must_use]
    pub fn new(start: u64, cigar: &'a [CigarOp], sequence: &'a [u8]) -> Self {
        Self {
            ops: cigar.iter(),
            sequence,
            ref_pos: start,
            query_pos: 0,
            remaining: 0,
        }
    }

    /// Reference offset the walk has reached
    #[must_use]
    pub fn reference_position(&self) -> u64 {
        self.ref_pos
    }

    /// Query offset the walk has reached
    #[must_use]
    pub fn query_position(&self) -> usize {
        self.query_pos
    }
}

impl Iterator for AlignedBases<'_> {
    type Item = (u64, Base);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining == 0 {
            let op = self.ops.next()?;
            match op.kind {
                CigarOpKind::Match | CigarOpKind::SequenceMatch | CigarOpKind::SequenceMismatch => {
                    self.remaining = op.len;
                }
                CigarOpKind::SoftClip | CigarOpKind::Insertion => self.query_pos += op.len,
                CigarOpKind::Deletion => self.ref_pos += op.len as u64,
                CigarOpKind::Skip | CigarOpKind::HardClip | CigarOpKind::Pad => {}
            }
        }

        let base = Base::from_byte(*self.sequence.get(self.query_pos)?);
        let item = (self.ref_pos, base);
        self.ref_pos += 1;
        self.query_pos += 1;
        self.remaining -= 1;
        Some(item)
    }
}

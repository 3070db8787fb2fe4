//! Sweep-line driver: accumulate each read, finalize positions behind it.
//!
//! Records must arrive sorted by leftmost position. When a read starting at
//! `P` arrives, every buffered position below `P` can no longer gain
//! observations, so it is taken from the table, evaluated, and emitted. The
//! table therefore only ever holds the window between the sweep cursor and
//! the rightmost base of the reads seen so far. At end of input the rest of
//! the table is flushed in ascending position order.

use std::io;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::alignment::AlignmentRecord;
use crate::core::config::ScanConfig;
use crate::core::reference::ReferenceSequence;
use crate::core::types::BaseCounts;
use crate::parsing::sam::ParseError;
use crate::pileup::candidate::CandidateSelector;
use crate::pileup::cigar::{self, ReadRejection};
use crate::pileup::sink::CandidateSink;
use crate::pileup::table::PileupTable;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(
        "Alignments are not sorted by position: {contig}:{current} follows {contig}:{previous}"
    )]
    UnsortedInput {
        contig: String,
        previous: u64,
        current: u64,
    },

    #[error("Position {position} is beyond the end of {contig} (length {length})")]
    ReferenceOutOfBounds {
        contig: String,
        position: u64,
        length: usize,
    },
}

/// Counters describing one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Records read from the source
    pub records: u64,
    /// Records placed on a contig other than the target
    pub other_contig: u64,
    /// Records on the target contig with no alignment start
    pub unmapped: u64,
    /// Reads dropped for excessive soft clipping
    pub clipped_reads: u64,
    /// Reads dropped because SEQ is shorter than the CIGAR requires
    pub missing_base_reads: u64,
    /// Reads that contributed to the pileup
    pub accepted_reads: u64,
    /// Bases added to the table
    pub bases_tallied: u64,
    /// Bases behind the sweep cursor, only possible with unsorted input
    pub bases_dropped: u64,
    /// Positions taken from the table and evaluated
    pub positions_finalized: u64,
    /// Candidates written to the sink
    pub candidates: u64,
    /// Largest number of positions buffered at once
    pub peak_table_size: usize,
}

/// Streaming pileup over a single reference contig
pub struct CandidateScanner<'r, S> {
    reference: &'r ReferenceSequence,
    config: ScanConfig,
    selector: CandidateSelector,
    table: PileupTable,
    cursor: u64,
    last_start: Option<u64>,
    warned_unsorted: bool,
    summary: ScanSummary,
    sink: S,
}

impl<'r, S: CandidateSink> CandidateScanner<'r, S> {
    pub fn new(reference: &'r ReferenceSequence, config: ScanConfig, sink: S) -> Self {
        let selector = CandidateSelector::from_config(&config);
        Self {
            reference,
            config,
            selector,
            table: PileupTable::new(),
            cursor: 0,
            last_start: None,
            warned_unsorted: false,
            summary: ScanSummary::default(),
            sink,
        }
    }

    /// Next position eligible for finalization
    #[must_use]
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Number of positions currently buffered
    #[must_use]
    pub fn buffered_positions(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn summary(&self) -> &ScanSummary {
        &self.summary
    }

    /// Process one record: finalize everything behind its start, then add
    /// its aligned bases to the table.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::UnsortedInput` if the record starts before the
    /// previous one (unless unsorted input is allowed),
    /// `ScanError::ReferenceOutOfBounds` if a finalized position lies past
    /// the contig end, or `ScanError::Io` if the sink fails.
    pub fn push(&mut self, record: &AlignmentRecord) -> Result<(), ScanError> {
        self.summary.records += 1;

        if record.contig != self.config.ctg_name {
            self.summary.other_contig += 1;
            return Ok(());
        }

        let Some(start) = record.start else {
            self.summary.unmapped += 1;
            return Ok(());
        };

        self.check_order(start)?;
        self.sweep_to(start)?;

        match cigar::interpret(
            start,
            &record.cigar,
            &record.sequence,
            self.config.min_aligned_fraction,
        ) {
            Ok(bases) => {
                self.summary.accepted_reads += 1;
                for (position, base) in bases {
                    if position < self.cursor {
                        self.summary.bases_dropped += 1;
                        continue;
                    }
                    self.table.accumulate(position, base);
                    self.summary.bases_tallied += 1;
                }
                self.summary.peak_table_size = self.summary.peak_table_size.max(self.table.len());
            }
            Err(ReadRejection::Clipped { aligned_fraction }) => {
                debug!(start, aligned_fraction, "Skipping heavily clipped read");
                self.summary.clipped_reads += 1;
            }
            Err(ReadRejection::MissingBases { needed, available }) => {
                debug!(start, needed, available, "Skipping read without enough bases");
                self.summary.missing_base_reads += 1;
            }
        }

        Ok(())
    }

    /// Flush every remaining position in ascending order and close the sink.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::ReferenceOutOfBounds` if a buffered position lies
    /// past the contig end, or `ScanError::Io` if the sink fails.
    pub fn finish(mut self) -> Result<(ScanSummary, S), ScanError> {
        for (position, counts) in self.table.drain_ascending() {
            self.finalize(position, &counts)?;
            self.cursor = position + 1;
        }
        self.sink.finish()?;

        info!(
            records = self.summary.records,
            accepted_reads = self.summary.accepted_reads,
            positions = self.summary.positions_finalized,
            candidates = self.summary.candidates,
            peak_table_size = self.summary.peak_table_size,
            "Scan complete"
        );

        Ok((self.summary, self.sink))
    }

    fn check_order(&mut self, start: u64) -> Result<(), ScanError> {
        match self.last_start {
            Some(previous) if start < previous => {
                if !self.config.allow_unsorted {
                    return Err(ScanError::UnsortedInput {
                        contig: self.config.ctg_name.clone(),
                        previous,
                        current: start,
                    });
                }
                if !self.warned_unsorted {
                    warn!(
                        contig = %self.config.ctg_name,
                        previous,
                        current = start,
                        "Alignments are not sorted; positions already emitted will be undercounted"
                    );
                    self.warned_unsorted = true;
                }
            }
            _ => self.last_start = Some(start),
        }
        Ok(())
    }

    /// Advance the cursor to `target`, finalizing each buffered position
    /// it passes. Unbuffered stretches are skipped in one step.
    fn sweep_to(&mut self, target: u64) -> Result<(), ScanError> {
        while self.cursor < target {
            match self.table.first_position() {
                Some(next) if next < target => {
                    self.cursor = self.cursor.max(next);
                    if let Some(counts) = self.table.take(self.cursor) {
                        self.finalize(self.cursor, &counts)?;
                    }
                    self.cursor += 1;
                }
                _ => self.cursor = target,
            }
        }
        Ok(())
    }

    fn finalize(&mut self, position: u64, counts: &BaseCounts) -> Result<(), ScanError> {
        let ref_base =
            self.reference
                .base_at(position)
                .ok_or_else(|| ScanError::ReferenceOutOfBounds {
                    contig: self.reference.name.clone(),
                    position,
                    length: self.reference.len(),
                })?;

        self.summary.positions_finalized += 1;
        if let Some(candidate) =
            self.selector
                .evaluate(&self.config.ctg_name, position, ref_base, counts)
        {
            self.sink.emit(&candidate)?;
            self.summary.candidates += 1;
        }
        Ok(())
    }
}

/// Run a full scan over `records`, writing candidates to `sink`.
///
/// # Errors
///
/// Returns the first parse error from the record source, or any error from
/// [`CandidateScanner::push`] and [`CandidateScanner::finish`].
pub fn scan<I, S>(
    reference: &ReferenceSequence,
    config: ScanConfig,
    records: I,
    sink: S,
) -> Result<(ScanSummary, S), ScanError>
where
    I: IntoIterator<Item = Result<AlignmentRecord, ParseError>>,
    S: CandidateSink,
{
    let mut scanner = CandidateScanner::new(reference, config, sink);
    for result in records {
        let record = result?;
        scanner.push(&record)?;
    }
    scanner.finish()
}

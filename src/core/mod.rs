//! Core data types shared by the parsers and the pileup scanner.
//!
//! - [`Base`], [`BaseCounts`]: the five tallied symbols and their counts
//! - [`ReferenceSequence`]: the single contig being scanned
//! - [`AlignmentRecord`], [`CigarOp`]: the parts of a read the scanner consumes
//! - [`ScanConfig`]: thresholds and the target contig
//!
//! [`Base`]: types::Base
//! [`BaseCounts`]: types::BaseCounts
//! [`ReferenceSequence`]: reference::ReferenceSequence
//! [`AlignmentRecord`]: alignment::AlignmentRecord
//! [`CigarOp`]: alignment::CigarOp
//! [`ScanConfig`]: config::ScanConfig

pub mod alignment;
pub mod config;
pub mod reference;
pub mod types;

//! # pileup-scan
//!
//! A streaming pileup scanner that finds candidate variant sites in sorted
//! alignments against a single reference contig.
//!
//! Reads are consumed in position order. Each accepted read adds its aligned
//! bases to a table of per-position A/C/G/T/N tallies; once no later read can
//! reach a position, the position is taken out of the table and tested. A
//! site is reported when it has enough depth and either its two most common
//! bases look heterozygous or its most common base differs from the
//! reference.
//!
//! ## Features
//!
//! - **Bounded memory**: only the window of positions still reachable by
//!   incoming reads is kept
//! - **Read filter**: heavily soft-clipped reads are ignored
//! - **Deterministic output**: ascending positions, fixed A < C < G < T < N
//!   tie order
//! - **Sort checking**: out-of-order input fails the run instead of
//!   silently undercounting
//!
//! ## Example
//!
//! ```rust,no_run
//! use pileup_scan::{scan, Candidate, ScanConfig};
//! use pileup_scan::parsing::{fasta::load_reference, open_alignments};
//! use std::path::Path;
//!
//! let config = ScanConfig::new("chr17").with_min_coverage(4);
//! let reference = load_reference(Path::new("ref.fa"), &config.ctg_name).unwrap();
//! let records = open_alignments(Path::new("sample.bam")).unwrap();
//!
//! let (summary, candidates) = scan(&reference, config, records, Vec::<Candidate>::new()).unwrap();
//! for candidate in &candidates {
//!     println!("{candidate}");
//! }
//! println!("{} sites evaluated", summary.positions_finalized);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Bases, tallies, reference and alignment types, configuration
//! - [`pileup`]: CIGAR interpretation, pileup table, sweep, candidate selection
//! - [`parsing`]: FASTA, SAM text and BAM readers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod pileup;

// Re-export commonly used types for convenience
pub use core::alignment::{AlignmentRecord, CigarOp, CigarOpKind};
pub use core::config::{ConfigError, ScanConfig};
pub use core::reference::ReferenceSequence;
pub use core::types::{Base, BaseCounts};
pub use parsing::sam::ParseError;
pub use pileup::candidate::{Candidate, CandidateSelector};
pub use pileup::sweep::{scan, CandidateScanner, ScanError, ScanSummary};

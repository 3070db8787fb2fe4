//! Command-line interface for pileup-scan.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **extract**: Scan sorted alignments against one contig and write candidate sites
//!
//! ## Usage
//!
//! ```text
//! # Scan chr17 of a sorted BAM
//! pileup-scan extract --bam sample.bam --ref ref.fa --ctg-name chr17 -o candidates.txt
//!
//! # Pipe from samtools
//! samtools view sample.bam chr17 | pileup-scan extract --bam - --ref ref.fa --ctg-name chr17
//!
//! # JSON Lines output with a run summary on stderr
//! pileup-scan extract --bam sample.bam --ref ref.fa --format json --verbose
//! ```

use clap::{Parser, Subcommand};

pub mod extract;

#[derive(Parser)]
#[command(name = "pileup-scan")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Generate variant candidates from sorted alignments")]
#[command(
    long_about = "pileup-scan streams position-sorted alignments for one reference contig, tallies the bases observed at every position, and reports sites where the base distribution disagrees with the reference or looks heterozygous.\n\nOutput lines are: contig, 1-based position, reference base, depth, then all five symbols (A, C, G, T, N) with their counts, highest first."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract candidate variant sites from sorted alignments
    Extract(extract::ExtractArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

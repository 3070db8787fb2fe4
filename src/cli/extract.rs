//! Extract command - scan sorted alignments and write candidate variant sites.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::config::{
    ScanConfig, DEFAULT_MIN_ALIGNED_FRACTION, DEFAULT_MIN_COVERAGE, DEFAULT_THRESHOLD,
};
use crate::parsing;
use crate::pileup::sink::{JsonSink, TextSink};
use crate::pileup::sweep::{scan, ScanError, ScanSummary};

#[derive(Args)]
pub struct ExtractArgs {
    /// Alignments sorted by position (BAM, SAM, or SAM.gz)
    /// Use '-' to read SAM text from stdin (e.g. piped from `samtools view`)
    #[arg(long = "bam", value_name = "FILE", default_value = "input.bam")]
    pub input: PathBuf,

    /// Reference FASTA (optionally gzip/bgzip compressed)
    #[arg(long = "ref", value_name = "FILE", default_value = "ref.fa")]
    pub reference: PathBuf,

    /// Candidate output file; '-' writes to stdout
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    pub output: PathBuf,

    /// Minimum allele frequency of the second-ranked allele for a site
    /// to be considered a candidate
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Minimum coverage required to consider a site
    #[arg(long, default_value_t = DEFAULT_MIN_COVERAGE)]
    pub min_coverage: u32,

    /// Name of the reference sequence to process
    #[arg(long, default_value = "chr17")]
    pub ctg_name: String,

    /// Reads with a smaller non-soft-clipped fraction are ignored
    #[arg(long, default_value_t = DEFAULT_MIN_ALIGNED_FRACTION)]
    pub min_aligned_fraction: f64,

    /// Keep going when alignments are out of order (undercounts affected sites)
    #[arg(long)]
    pub allow_unsorted: bool,
}

impl ExtractArgs {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig::new(&self.ctg_name)
            .with_threshold(self.threshold)
            .with_min_coverage(self.min_coverage)
            .with_min_aligned_fraction(self.min_aligned_fraction)
            .with_allow_unsorted(self.allow_unsorted)
    }
}

/// Execute extract subcommand
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the contig is missing
/// from the reference, an input cannot be read, or the output cannot be
/// written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ExtractArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.scan_config();
    config.validate()?;

    let reference = parsing::fasta::load_reference(&args.reference, &config.ctg_name)?;

    if verbose {
        eprintln!(
            "Loaded reference sequence {} ({} bp) from {}",
            reference.name,
            reference.len(),
            args.reference.display()
        );
    }

    let records = parsing::open_alignments(&args.input).map_err(|e| {
        anyhow::anyhow!("Failed to open alignments {}: {e}", args.input.display())
    })?;

    let writer: Box<dyn Write> = if args.output == PathBuf::from("-") {
        Box::new(io::stdout().lock())
    } else {
        Box::new(File::create(&args.output).map_err(|e| {
            anyhow::anyhow!("Failed to create output {}: {e}", args.output.display())
        })?)
    };
    let writer = BufWriter::new(writer);

    let result = match format {
        OutputFormat::Text => scan(&reference, config, records, TextSink::new(writer)).map(|r| r.0),
        OutputFormat::Json => scan(&reference, config, records, JsonSink::new(writer)).map(|r| r.0),
    };
    if matches!(result, Err(ScanError::UnsortedInput { .. })) {
        return result
            .map(|_| ())
            .context("Rerun with --allow-unsorted to scan unsorted input anyway");
    }
    let summary = result?;

    if verbose {
        print_summary(&summary, format)?;
    }

    Ok(())
}

fn print_summary(summary: &ScanSummary, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            eprintln!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Text => {
            eprintln!(
                "Records: {} ({} on other contigs, {} unmapped)",
                summary.records, summary.other_contig, summary.unmapped
            );
            eprintln!(
                "Reads: {} accepted, {} clipped, {} missing bases",
                summary.accepted_reads, summary.clipped_reads, summary.missing_base_reads
            );
            eprintln!(
                "Bases: {} tallied, {} dropped behind the sweep",
                summary.bases_tallied, summary.bases_dropped
            );
            eprintln!(
                "Positions: {} evaluated, {} candidates, peak window {}",
                summary.positions_finalized, summary.candidates, summary.peak_table_size
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ExtractArgs,
    }

    #[test]
    fn test_defaults_match_scan_config() {
        let cli = TestCli::parse_from(["test"]);
        let config = cli.args.scan_config();
        assert_eq!(config, ScanConfig::new("chr17"));
        assert_eq!(cli.args.input, PathBuf::from("input.bam"));
        assert_eq!(cli.args.reference, PathBuf::from("ref.fa"));
    }

    #[test]
    fn test_overrides() {
        let cli = TestCli::parse_from([
            "test",
            "--ctg-name",
            "chr20",
            "--threshold",
            "0.2",
            "--min-coverage",
            "10",
            "--allow-unsorted",
        ]);
        let config = cli.args.scan_config();
        assert_eq!(config.ctg_name, "chr20");
        assert_eq!(config.threshold, 0.2);
        assert_eq!(config.min_coverage, 10);
        assert!(config.allow_unsorted);
    }
}

//! End-to-end tests for the `extract` command
//!
//! Each test writes a small reference and SAM (or BAM) file to temporary
//! files and runs the binary against them.

use std::io::Write;

use assert_cmd::Command;
use noodles::sam::alignment::io::Write as _;
use noodles::{bam, sam};
use predicates::prelude::*;
use tempfile::NamedTempFile;

const REFERENCE: &str = ">chr1 test contig\nAAAAAAAAAA\n>chr2\nCCCCCCCCCC\n";

const SORTED_SAM: &str = "@HD\tVN:1.6\tSO:coordinate
@SQ\tSN:chr1\tLN:10
@SQ\tSN:chr2\tLN:10
r1\t0\tchr1\t1\t60\t5M\t*\t0\t0\tCCCCC\tIIIII
r2\t0\tchr1\t1\t60\t5M\t*\t0\t0\tAAAAA\tIIIII
r3\t0\tchr1\t2\t60\t4M\t*\t0\t0\tCCAA\tIIII
r4\t0\tchr1\t2\t60\t4M\t*\t0\t0\tCAAA\tIIII
r5\t0\tchr2\t1\t60\t5M\t*\t0\t0\tGGGGG\tIIIII
";

const EXPECTED: &str = "chr1 2 A 4 C 3 A 1 G 0 T 0 N 0
chr1 3 A 4 A 2 C 2 G 0 T 0 N 0
chr1 4 A 4 A 3 C 1 G 0 T 0 N 0
chr1 5 A 4 A 3 C 1 G 0 T 0 N 0
";

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(suffix).unwrap();
    temp.write_all(content.as_bytes()).unwrap();
    temp.flush().unwrap();
    temp
}

/// Re-encode SAM text as a BAM file
fn bam_file(sam_text: &str) -> NamedTempFile {
    let mut reader = sam::io::Reader::new(sam_text.as_bytes());
    let header = reader.read_header().unwrap();

    let mut temp = NamedTempFile::with_suffix(".bam").unwrap();
    {
        let mut writer = bam::io::Writer::new(temp.as_file_mut());
        writer.write_header(&header).unwrap();
        for result in reader.record_bufs(&header) {
            let record = result.unwrap();
            writer.write_alignment_record(&header, &record).unwrap();
        }
        writer.try_finish().unwrap();
    }
    temp.flush().unwrap();
    temp
}

fn extract(reference: &NamedTempFile, sam: &NamedTempFile, min_coverage: u32) -> Command {
    let mut cmd = Command::cargo_bin("pileup-scan").unwrap();
    cmd.arg("extract")
        .arg("--ref")
        .arg(reference.path())
        .arg("--bam")
        .arg(sam.path())
        .args(["--ctg-name", "chr1", "--min-coverage"])
        .arg(min_coverage.to_string());
    cmd
}

#[test]
fn test_text_output() {
    let reference = temp_file(".fa", REFERENCE);
    let sam = temp_file(".sam", SORTED_SAM);

    extract(&reference, &sam, 3)
        .assert()
        .success()
        .stdout(EXPECTED);
}

#[test]
fn test_bam_input() {
    let reference = temp_file(".fa", REFERENCE);
    let bam = bam_file(SORTED_SAM);

    extract(&reference, &bam, 3)
        .assert()
        .success()
        .stdout(EXPECTED);
}

#[test]
fn test_stdin_input() {
    let reference = temp_file(".fa", REFERENCE);

    Command::cargo_bin("pileup-scan")
        .unwrap()
        .arg("extract")
        .arg("--ref")
        .arg(reference.path())
        .args(["--bam", "-", "--ctg-name", "chr1", "--min-coverage", "3"])
        .write_stdin(SORTED_SAM)
        .assert()
        .success()
        .stdout(EXPECTED);
}

#[test]
fn test_output_file() {
    let reference = temp_file(".fa", REFERENCE);
    let sam = temp_file(".sam", SORTED_SAM);
    let output = NamedTempFile::with_suffix(".txt").unwrap();

    extract(&reference, &sam, 3)
        .arg("--output")
        .arg(output.path())
        .assert()
        .success()
        .stdout("");

    let written = std::fs::read_to_string(output.path()).unwrap();
    assert_eq!(written, EXPECTED);
}

#[test]
fn test_json_output() {
    let reference = temp_file(".fa", REFERENCE);
    let sam = temp_file(".sam", SORTED_SAM);

    let output = extract(&reference, &sam, 3)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["position"], 2);
    assert_eq!(lines[0]["ref_base"], "A");
    assert_eq!(lines[0]["depth"], 4);
    assert_eq!(lines[0]["counts"][0]["base"], "C");
    assert_eq!(lines[0]["counts"][0]["count"], 3);
    assert_eq!(lines[0]["counts"].as_array().unwrap().len(), 5);
}

#[test]
fn test_high_coverage_threshold_filters_everything() {
    let reference = temp_file(".fa", REFERENCE);
    let sam = temp_file(".sam", SORTED_SAM);

    extract(&reference, &sam, 5)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_missing_contig_fails() {
    let reference = temp_file(".fa", REFERENCE);
    let sam = temp_file(".sam", SORTED_SAM);

    Command::cargo_bin("pileup-scan")
        .unwrap()
        .arg("extract")
        .arg("--ref")
        .arg(reference.path())
        .arg("--bam")
        .arg(sam.path())
        .args(["--ctg-name", "chrX"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot find reference sequence chrX"));
}

#[test]
fn test_unsorted_input_fails() {
    let reference = temp_file(".fa", REFERENCE);
    let sam = temp_file(
        ".sam",
        "r1\t0\tchr1\t5\t60\t4M\t*\t0\t0\tCCCC\tIIII
r2\t0\tchr1\t2\t60\t4M\t*\t0\t0\tCCCC\tIIII
",
    );

    extract(&reference, &sam, 3)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("not sorted")
                .and(predicate::str::contains("--allow-unsorted")),
        );
}

#[test]
fn test_unsorted_input_allowed() {
    let reference = temp_file(".fa", REFERENCE);
    let sam = temp_file(
        ".sam",
        "r1\t0\tchr1\t5\t60\t4M\t*\t0\t0\tCCCC\tIIII
r2\t0\tchr1\t2\t60\t4M\t*\t0\t0\tCCCC\tIIII
",
    );

    extract(&reference, &sam, 1)
        .arg("--allow-unsorted")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("chr1 5 A 2 C 2"));
}

#[test]
fn test_clipped_reads_are_ignored() {
    let reference = temp_file(".fa", REFERENCE);
    let sam = temp_file(
        ".sam",
        "r1\t0\tchr1\t1\t60\t5S5M\t*\t0\t0\tGGGGGCCCCC\tIIIIIIIIII
r2\t0\tchr1\t1\t60\t2S8M\t*\t0\t0\tGGTTTTTTTT\tIIIIIIIIII
",
    );

    // 5S5M keeps 1 - 5/11 < 0.55 of its span and is dropped; 2S8M is kept
    extract(&reference, &sam, 1)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("chr1 1 A 1 T 1 A 0 C 0 G 0 N 0")
                .and(predicate::str::contains(" C 1").not()),
        );
}

#[test]
fn test_invalid_threshold_fails() {
    let reference = temp_file(".fa", REFERENCE);
    let sam = temp_file(".sam", SORTED_SAM);

    extract(&reference, &sam, 3)
        .args(["--threshold", "1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold"));
}

#[test]
fn test_unsupported_input_format_fails() {
    let reference = temp_file(".fa", REFERENCE);
    let input = temp_file(".cram", "");

    extract(&reference, &input, 3)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

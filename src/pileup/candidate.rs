use serde::Serialize;

use crate::core::config::ScanConfig;
use crate::core::types::{Base, BaseCounts, NUM_SYMBOLS};

/// One symbol's share of a candidate site's depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseCount {
    pub base: Base,
    pub count: u32,
}

/// A reference position flagged as possibly variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub contig: String,

    /// One-based reference position
    pub position: u64,

    pub ref_base: char,

    /// Total tallied depth
    pub depth: u32,

    /// All five symbols, highest count first
    pub counts: [BaseCount; NUM_SYMBOLS],
}

impl std::fmt::Display for Candidate {
    /// `contig position refBase depth` followed by five `symbol count` pairs
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.contig, self.position, self.ref_base, self.depth
        )?;
        for entry in &self.counts {
            write!(f, " {} {}", entry.base, entry.count)?;
        }
        Ok(())
    }
}

/// Accept/reject rule applied to each finalized position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateSelector {
    pub min_coverage: u32,
    pub threshold: f64,
}

impl CandidateSelector {
    #[must_use]
    pub fn new(min_coverage: u32, threshold: f64) -> Self {
        Self {
            min_coverage,
            threshold,
        }
    }

    #[must_use]
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.min_coverage, config.threshold)
    }

    /// Evaluate the tallies at a zero-based `position`.
    ///
    /// A site is reported when its depth reaches `min_coverage` and either
    /// the top two symbols look heterozygous (`p0 <= 1 - threshold` and
    /// `p1 >= threshold`) or the most frequent symbol differs from the
    /// reference base.
    #[must_use]
    pub fn evaluate(
        &self,
        contig: &str,
        position: u64,
        ref_base: char,
        counts: &BaseCounts,
    ) -> Option<Candidate> {
        let total = counts.total();
        if total < self.min_coverage || total == 0 {
            return None;
        }

        let ranked = counts.ranked();
        let p0 = f64::from(ranked[0].1) / f64::from(total);
        let p1 = f64::from(ranked[1].1) / f64::from(total);

        let heterozygous = p0 <= 1.0 - self.threshold && p1 >= self.threshold;
        let diverges = ranked[0].0.as_char() != ref_base;
        if !(heterozygous || diverges) {
            return None;
        }

        Some(Candidate {
            contig: contig.to_string(),
            position: position + 1,
            ref_base,
            depth: total,
            counts: ranked.map(|(base, count)| BaseCount { base, count }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(Base, u32)]) -> BaseCounts {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_heterozygous_site_accepted() {
        let selector = CandidateSelector::new(4, 0.15);
        let candidate = selector
            .evaluate("chr1", 99, 'A', &counts(&[(Base::A, 3), (Base::C, 7)]))
            .unwrap();

        assert_eq!(candidate.position, 100);
        assert_eq!(candidate.depth, 10);
        assert_eq!(candidate.counts[0], BaseCount { base: Base::C, count: 7 });
        assert_eq!(candidate.counts[1], BaseCount { base: Base::A, count: 3 });
    }

    #[test]
    fn test_reference_dominated_site_rejected() {
        let selector = CandidateSelector::new(4, 0.15);
        let result = selector.evaluate("chr1", 0, 'A', &counts(&[(Base::A, 9), (Base::C, 1)]));
        assert!(result.is_none());
    }

    #[test]
    fn test_low_coverage_rejected() {
        let selector = CandidateSelector::new(4, 0.15);
        // Would diverge from the reference, but depth is too low
        let result = selector.evaluate("chr1", 0, 'C', &counts(&[(Base::A, 2)]));
        assert!(result.is_none());
    }

    #[test]
    fn test_homozygous_alt_accepted() {
        let selector = CandidateSelector::new(4, 0.15);
        let candidate = selector
            .evaluate("chr1", 4, 'G', &counts(&[(Base::T, 12)]))
            .unwrap();
        assert_eq!(candidate.counts[0].base, Base::T);
        assert_eq!(candidate.depth, 12);
    }

    #[test]
    fn test_zero_min_coverage_with_empty_tallies() {
        let selector = CandidateSelector::new(0, 0.15);
        assert!(selector.evaluate("chr1", 0, 'A', &BaseCounts::new()).is_none());
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let selector = CandidateSelector::new(4, 0.2);
        let tallies = counts(&[(Base::G, 5), (Base::T, 5)]);
        let first = selector.evaluate("chr2", 10, 'G', &tallies);
        for _ in 0..10 {
            assert_eq!(selector.evaluate("chr2", 10, 'G', &tallies), first);
        }
    }

    #[test]
    fn test_display_line_format() {
        let selector = CandidateSelector::new(4, 0.15);
        let candidate = selector
            .evaluate("chr17", 99, 'A', &counts(&[(Base::A, 3), (Base::C, 7)]))
            .unwrap();
        assert_eq!(
            candidate.to_string(),
            "chr17 100 A 10 C 7 A 3 G 0 T 0 N 0"
        );
    }
}

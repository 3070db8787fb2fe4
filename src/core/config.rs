use serde::Serialize;
use thiserror::Error;

/// Default minimum frequency of the second-ranked allele
pub const DEFAULT_THRESHOLD: f64 = 0.15;

/// Default minimum total depth for a site to be considered
pub const DEFAULT_MIN_COVERAGE: u32 = 4;

/// Default minimum non-soft-clipped fraction of a read's alignment span
pub const DEFAULT_MIN_ALIGNED_FRACTION: f64 = 0.55;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Contig name must not be empty")]
    EmptyContigName,

    #[error("{name} must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
}

/// Settings consumed by the candidate scanner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanConfig {
    /// Target contig; records on other contigs are skipped
    pub ctg_name: String,

    /// Minimum allele frequency of the second-ranked symbol for a
    /// heterozygous-looking site to be reported
    pub threshold: f64,

    /// Minimum total depth to consider a site
    pub min_coverage: u32,

    /// Reads whose non-soft-clipped fraction falls below this are dropped
    pub min_aligned_fraction: f64,

    /// Warn and keep going on out-of-order records instead of failing
    pub allow_unsorted: bool,
}

impl ScanConfig {
    pub fn new(ctg_name: impl Into<String>) -> Self {
        Self {
            ctg_name: ctg_name.into(),
            threshold: DEFAULT_THRESHOLD,
            min_coverage: DEFAULT_MIN_COVERAGE,
            min_aligned_fraction: DEFAULT_MIN_ALIGNED_FRACTION,
            allow_unsorted: false,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_min_coverage(mut self, min_coverage: u32) -> Self {
        self.min_coverage = min_coverage;
        self
    }

    #[must_use]
    pub fn with_min_aligned_fraction(mut self, fraction: f64) -> Self {
        self.min_aligned_fraction = fraction;
        self
    }

    #[must_use]
    pub fn with_allow_unsorted(mut self, allow: bool) -> Self {
        self.allow_unsorted = allow;
        self
    }

    /// Check values before any input is opened.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyContigName` for a blank contig name, or
    /// `ConfigError::OutOfRange` if a fraction is NaN or outside [0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ctg_name.trim().is_empty() {
            return Err(ConfigError::EmptyContigName);
        }
        check_unit_interval("threshold", self.threshold)?;
        check_unit_interval("min_aligned_fraction", self.min_aligned_fraction)?;
        Ok(())
    }
}

fn check_unit_interval(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}

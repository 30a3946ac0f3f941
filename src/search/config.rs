//! Search configuration parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolverError};

/// Width of the first slice in discrepancy-bounded search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Width {
    /// A fixed number of children.
    Count(usize),
    /// A fraction of the children, rounded up.
    Fraction(f64),
}

impl Width {
    /// Interpret a numeric width: `0` selects best-first search (no width),
    /// values below 1 are fractions, anything else must be a whole count.
    pub fn from_f64(value: f64) -> Result<Option<Width>> {
        if !value.is_finite() || value < 0.0 || (value >= 1.0 && value.fract() != 0.0) {
            return Err(SolverError::Config(format!("invalid width {value}")));
        }
        Ok(if value == 0.0 {
            None
        } else if value < 1.0 {
            Some(Width::Fraction(value))
        } else {
            Some(Width::Count(value as usize))
        })
    }

    /// Number of the `children` that make up the first slice.
    #[must_use]
    pub fn first_slice(self, children: usize) -> usize {
        let slice = match self {
            Width::Count(n) => n,
            Width::Fraction(f) => (f * children as f64).ceil() as usize,
        };
        slice.min(children)
    }

    fn validate(self) -> Result<()> {
        match self {
            Width::Count(0) => Err(SolverError::Config("width count must be positive".into())),
            Width::Fraction(f) if !(f > 0.0 && f < 1.0) => Err(SolverError::Config(format!(
                "width fraction {f} outside (0, 1)"
            ))),
            _ => Ok(()),
        }
    }
}

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum distinct states visited before giving up.
    pub cutoff: usize,

    /// Allow hidden-information choices to be made with full knowledge.
    pub prescient: bool,

    /// `None` runs best-first search, otherwise discrepancy-bounded beam
    /// search with this first-slice width.
    pub width: Option<Width>,

    /// Record a human-readable trace along the solution path.
    pub trace: bool,

    /// Entries per visited-set shard.
    pub shard_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cutoff: 1_000_000,
            prescient: true,
            width: None,
            trace: true,
            shard_capacity: 1 << 24,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: usize) -> Self {
        self.cutoff = cutoff;
        self
    }

    #[must_use]
    pub fn with_prescient(mut self, prescient: bool) -> Self {
        self.prescient = prescient;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: Option<Width>) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    #[must_use]
    pub fn with_shard_capacity(mut self, shard_capacity: usize) -> Self {
        self.shard_capacity = shard_capacity;
        self
    }

    /// Reject settings no search can run with.
    pub fn validate(&self) -> Result<()> {
        if self.shard_capacity == 0 {
            return Err(SolverError::Config("shard capacity must be positive".into()));
        }
        if let Some(width) = self.width {
            width.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.cutoff, 1_000_000);
        assert!(config.prescient);
        assert!(config.width.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_width_from_f64() {
        assert_eq!(Width::from_f64(0.0).unwrap(), None);
        assert_eq!(Width::from_f64(0.5).unwrap(), Some(Width::Fraction(0.5)));
        assert_eq!(Width::from_f64(3.0).unwrap(), Some(Width::Count(3)));
        assert!(Width::from_f64(-1.0).is_err());
        assert!(Width::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_width_from_f64_rejects_fractional_count() {
        assert!(matches!(Width::from_f64(2.7), Err(SolverError::Config(_))));
        assert!(Width::from_f64(1.5).is_err());
        assert_eq!(Width::from_f64(1.0).unwrap(), Some(Width::Count(1)));
    }

    #[test]
    fn test_first_slice() {
        assert_eq!(Width::Count(2).first_slice(5), 2);
        assert_eq!(Width::Count(8).first_slice(5), 5);
        assert_eq!(Width::Fraction(0.5).first_slice(5), 3);
        assert_eq!(Width::Fraction(0.1).first_slice(3), 1);
        assert_eq!(Width::Fraction(0.5).first_slice(0), 0);
    }

    #[test]
    fn test_validate_rejects_bad_width() {
        let config = SearchConfig::default().with_width(Some(Width::Count(0)));
        assert!(matches!(config.validate(), Err(SolverError::Config(_))));
        let config = SearchConfig::default().with_width(Some(Width::Fraction(1.5)));
        assert!(config.validate().is_err());
        let config = SearchConfig::default().with_shard_capacity(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = SearchConfig::default()
            .with_cutoff(500)
            .with_width(Some(Width::Fraction(0.25)));
        let json = serde_json::to_string(&config).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let partial: SearchConfig = serde_json::from_str(r#"{"cutoff": 10}"#).unwrap();
        assert_eq!(partial.cutoff, 10);
        assert!(partial.trace);
    }
}

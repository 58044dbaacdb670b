//! Errors raised by the sampling and aggregation stages.
//!
//! Report-layout failures have their own type (`report::ReportError`) since a
//! missing sheet must not discard the run results.

use std::fmt;

/// Error type shared by trials, experiments and aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Non-positive experiment count or sample size, or an unusable size list.
    InvalidInput { reason: String },
    /// Mean requested over zero experiment results.
    EmptyAggregation { sample_size: Option<u64> },
}

impl SimError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
            Self::EmptyAggregation {
                sample_size: Some(n),
            } => write!(f, "cannot aggregate zero experiments for N = {n}"),
            Self::EmptyAggregation { sample_size: None } => {
                write!(f, "cannot aggregate zero experiments")
            }
        }
    }
}

impl std::error::Error for SimError {}

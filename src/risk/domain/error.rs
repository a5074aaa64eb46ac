//! Error types for risk domain validation and parsing.

use super::RiskId;
use thiserror::Error;

/// Business-rule violations raised by the risk domain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RiskDomainError {
    /// Probability is outside `1..=5`.
    #[error("risk probability must be between 1 and 5, got {0}")]
    ProbabilityOutOfRange(u8),

    /// Impact is outside `1..=5`.
    #[error("risk impact must be between 1 and 5, got {0}")]
    ImpactOutOfRange(u8),

    /// The risk description is empty after trimming.
    #[error("risk details must not be empty")]
    EmptyRiskDetails,

    /// A stored score disagrees with its factors.
    #[error("risk {risk_id} stores score {stored} but probability x impact is {expected}")]
    ScoreMismatch {
        /// Offending risk.
        risk_id: RiskId,
        /// Score found in storage.
        stored: u8,
        /// Score derived from probability and impact.
        expected: u8,
    },
}

/// Error returned while parsing risk statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown risk status: {0}")]
pub struct ParseRiskStatusError(pub String);

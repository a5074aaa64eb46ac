//! Risk probability, impact and the score derived from them.

use super::RiskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Likelihood that a risk materialises, rated 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Probability {
    /// 1
    Rare = 1,
    /// 2
    Unlikely = 2,
    /// 3
    Moderate = 3,
    /// 4
    Likely = 4,
    /// 5
    AlmostCertain = 5,
}

impl Probability {
    /// Returns the numeric rating.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Probability {
    type Error = RiskDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Rare),
            2 => Ok(Self::Unlikely),
            3 => Ok(Self::Moderate),
            4 => Ok(Self::Likely),
            5 => Ok(Self::AlmostCertain),
            other => Err(RiskDomainError::ProbabilityOutOfRange(other)),
        }
    }
}

impl From<Probability> for u8 {
    fn from(value: Probability) -> Self {
        value.value()
    }
}

/// Consequence if a risk materialises, rated 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Impact {
    /// 1
    Insignificant = 1,
    /// 2
    Minor = 2,
    /// 3
    Significant = 3,
    /// 4
    Major = 4,
    /// 5
    Severe = 5,
}

impl Impact {
    /// Returns the numeric rating.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Impact {
    type Error = RiskDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Insignificant),
            2 => Ok(Self::Minor),
            3 => Ok(Self::Significant),
            4 => Ok(Self::Major),
            5 => Ok(Self::Severe),
            other => Err(RiskDomainError::ImpactOutOfRange(other)),
        }
    }
}

impl From<Impact> for u8 {
    fn from(value: Impact) -> Self {
        value.value()
    }
}

/// Severity of a risk: probability times impact, in `1..=25`.
///
/// There is no way to build a score except from its two factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RiskScore(u8);

impl RiskScore {
    /// Derives the score from its factors.
    #[must_use]
    pub const fn compute(probability: Probability, impact: Impact) -> Self {
        Self(probability.value() * impact.value())
    }

    /// Returns the numeric score.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Computes a risk score from raw ratings.
///
/// # Errors
///
/// Returns [`RiskDomainError::ProbabilityOutOfRange`] or
/// [`RiskDomainError::ImpactOutOfRange`] when a rating is outside `1..=5`.
///
/// # Examples
///
/// ```
/// use keystone::risk::domain::compute_risk_score;
///
/// assert_eq!(compute_risk_score(3, 4), Ok(12));
/// assert!(compute_risk_score(0, 4).is_err());
/// ```
pub fn compute_risk_score(probability: u8, impact: u8) -> Result<u8, RiskDomainError> {
    let rated_probability = Probability::try_from(probability)?;
    let rated_impact = Impact::try_from(impact)?;
    Ok(RiskScore::compute(rated_probability, rated_impact).value())
}

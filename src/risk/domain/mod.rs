//! Domain model for project risks and their scores.

mod error;
mod ids;
mod risk;
mod score;

pub use error::{ParseRiskStatusError, RiskDomainError};
pub use ids::{RiskDetails, RiskId};
pub use risk::{NewRisk, PersistedRiskData, Risk, RiskStatus};
pub use score::{Impact, Probability, RiskScore, compute_risk_score};

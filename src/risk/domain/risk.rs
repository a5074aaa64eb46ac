//! Risk aggregate and its status.

use super::{
    Impact, ParseRiskStatusError, Probability, RiskDetails, RiskDomainError, RiskId, RiskScore,
};
use crate::project::domain::ProjectId;
use crate::task::domain::AssetId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handling status of a risk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    /// Identified and not yet handled.
    #[default]
    Open,
    /// Mitigation under way.
    InProgress,
    /// No longer a concern.
    Closed,
}

impl RiskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RiskStatus {
    type Error = ParseRiskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseRiskStatusError(value.to_owned())),
        }
    }
}

/// Parameter object for recording a new risk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRisk {
    /// Owning project.
    pub project_id: ProjectId,
    /// What could go wrong.
    pub details: RiskDetails,
    /// Likelihood rating.
    pub probability: Probability,
    /// Consequence rating.
    pub impact: Impact,
    /// Planned response, if any.
    pub mitigation: Option<String>,
    /// Asset responsible for the risk.
    pub owner: Option<AssetId>,
}

impl NewRisk {
    /// Creates parameters without mitigation or owner.
    #[must_use]
    pub const fn new(
        project_id: ProjectId,
        details: RiskDetails,
        probability: Probability,
        impact: Impact,
    ) -> Self {
        Self {
            project_id,
            details,
            probability,
            impact,
            mitigation: None,
            owner: None,
        }
    }
}

/// A risk recorded against a project.
///
/// The score is derived from probability and impact on every read and is
/// never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    id: RiskId,
    project_id: ProjectId,
    details: RiskDetails,
    probability: Probability,
    impact: Impact,
    status: RiskStatus,
    mitigation: Option<String>,
    owner: Option<AssetId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted risk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRiskData {
    /// Persisted risk identifier.
    pub id: RiskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted details.
    pub details: RiskDetails,
    /// Persisted probability.
    pub probability: Probability,
    /// Persisted impact.
    pub impact: Impact,
    /// Score column as stored, if the store keeps one.
    pub risk_score: Option<u8>,
    /// Persisted status.
    pub status: RiskStatus,
    /// Persisted mitigation.
    pub mitigation: Option<String>,
    /// Persisted owner.
    pub owner: Option<AssetId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Risk {
    /// Records a new open risk.
    #[must_use]
    pub fn new(params: NewRisk, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: RiskId::new(),
            project_id: params.project_id,
            details: params.details,
            probability: params.probability,
            impact: params.impact,
            status: RiskStatus::Open,
            mitigation: params.mitigation,
            owner: params.owner,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a risk from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`RiskDomainError::ScoreMismatch`] when a stored score does
    /// not equal probability times impact.
    pub fn from_persisted(data: PersistedRiskData) -> Result<Self, RiskDomainError> {
        let expected = RiskScore::compute(data.probability, data.impact).value();
        if let Some(stored) = data.risk_score.filter(|stored| *stored != expected) {
            return Err(RiskDomainError::ScoreMismatch {
                risk_id: data.id,
                stored,
                expected,
            });
        }

        Ok(Self {
            id: data.id,
            project_id: data.project_id,
            details: data.details,
            probability: data.probability,
            impact: data.impact,
            status: data.status,
            mitigation: data.mitigation,
            owner: data.owner,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Returns the risk identifier.
    #[must_use]
    pub const fn id(&self) -> RiskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the risk description.
    #[must_use]
    pub const fn details(&self) -> &RiskDetails {
        &self.details
    }

    /// Returns the probability rating.
    #[must_use]
    pub const fn probability(&self) -> Probability {
        self.probability
    }

    /// Returns the impact rating.
    #[must_use]
    pub const fn impact(&self) -> Impact {
        self.impact
    }

    /// Returns probability times impact.
    #[must_use]
    pub const fn score(&self) -> RiskScore {
        RiskScore::compute(self.probability, self.impact)
    }

    /// Returns the handling status.
    #[must_use]
    pub const fn status(&self) -> RiskStatus {
        self.status
    }

    /// Returns the mitigation plan, if any.
    #[must_use]
    pub fn mitigation(&self) -> Option<&str> {
        self.mitigation.as_deref()
    }

    /// Returns the owner, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<AssetId> {
        self.owner
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces probability and impact, returning the new score.
    pub fn reassess(
        &mut self,
        probability: Probability,
        impact: Impact,
        clock: &impl Clock,
    ) -> RiskScore {
        self.probability = probability;
        self.impact = impact;
        self.touch(clock);
        self.score()
    }

    /// Replaces the mitigation plan.
    pub fn set_mitigation(&mut self, mitigation: Option<String>, clock: &impl Clock) {
        self.mitigation = mitigation;
        self.touch(clock);
    }

    /// Changes the handling status.
    pub fn change_status(&mut self, status: RiskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

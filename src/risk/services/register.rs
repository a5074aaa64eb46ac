//! Service layer for recording and reassessing project risks.

use crate::project::{
    domain::{ProjectDomainError, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::risk::{
    domain::{
        Impact, NewRisk, Probability, Risk, RiskDetails, RiskDomainError, RiskId, RiskStatus,
    },
    ports::{RiskRepository, RiskRepositoryError},
};
use crate::task::domain::AssetId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for recording a risk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRiskRequest {
    project_id: ProjectId,
    details: String,
    probability: u8,
    impact: u8,
    mitigation: Option<String>,
    owner: Option<AssetId>,
}

impl RecordRiskRequest {
    /// Creates a request with raw 1 to 5 ratings.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        details: impl Into<String>,
        probability: u8,
        impact: u8,
    ) -> Self {
        Self {
            project_id,
            details: details.into(),
            probability,
            impact,
            mitigation: None,
            owner: None,
        }
    }

    /// Sets the mitigation plan.
    #[must_use]
    pub fn with_mitigation(mut self, mitigation: impl Into<String>) -> Self {
        self.mitigation = Some(mitigation.into());
        self
    }

    /// Sets the owner.
    #[must_use]
    pub const fn with_owner(mut self, owner: AssetId) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Service-level errors for risk register operations.
#[derive(Debug, Error)]
pub enum RiskRegisterError {
    /// A risk rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] RiskDomainError),
    /// The owning project rejected the operation.
    #[error(transparent)]
    Project(#[from] ProjectDomainError),
    /// No risk exists with the given identifier.
    #[error("risk not found: {0}")]
    RiskNotFound(RiskId),
    /// No project exists with the given identifier.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// Risk repository operation failed.
    #[error(transparent)]
    Repository(#[from] RiskRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
}

/// Result type for risk register service operations.
pub type RiskRegisterResult<T> = Result<T, RiskRegisterError>;

/// Risk register orchestration service.
#[derive(Clone)]
pub struct RiskRegisterService<R, P, C>
where
    R: RiskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    risks: Arc<R>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> RiskRegisterService<R, P, C>
where
    R: RiskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new risk register service.
    #[must_use]
    pub const fn new(risks: Arc<R>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            risks,
            projects,
            clock,
        }
    }

    /// Records a new open risk against an open project.
    ///
    /// # Errors
    ///
    /// Returns [`RiskRegisterError::Domain`] for empty details or ratings
    /// outside `1..=5`, [`RiskRegisterError::Project`] when the project is
    /// closed, and other variants for lookup or persistence failures.
    pub async fn record(&self, request: RecordRiskRequest) -> RiskRegisterResult<Risk> {
        let RecordRiskRequest {
            project_id,
            details,
            probability,
            impact,
            mitigation,
            owner,
        } = request;

        let params = NewRisk {
            project_id,
            details: RiskDetails::new(details)?,
            probability: Probability::try_from(probability)?,
            impact: Impact::try_from(impact)?,
            mitigation,
            owner,
        };
        self.open_project(project_id).await?;

        let risk = Risk::new(params, &*self.clock);
        self.risks.store(&risk).await?;
        info!(
            risk_id = %risk.id(),
            project_id = %project_id,
            score = %risk.score(),
            "risk recorded"
        );
        Ok(risk)
    }

    /// Finds a risk by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RiskRegisterError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: RiskId) -> RiskRegisterResult<Option<Risk>> {
        Ok(self.risks.find_by_id(id).await?)
    }

    /// Lists the risks of a project, highest score first.
    ///
    /// Risks with equal scores keep the order they were recorded in.
    ///
    /// # Errors
    ///
    /// Returns [`RiskRegisterError::Repository`] when lookup fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> RiskRegisterResult<Vec<Risk>> {
        let mut risks = self.risks.list_by_project(project_id).await?;
        risks.sort_by_key(|risk| std::cmp::Reverse(risk.score()));
        Ok(risks)
    }

    /// Replaces probability and impact and recomputes the score.
    ///
    /// # Errors
    ///
    /// Returns [`RiskRegisterError::Domain`] for ratings outside `1..=5`
    /// and other variants for lookup or persistence failures.
    pub async fn reassess(
        &self,
        id: RiskId,
        probability: u8,
        impact: u8,
    ) -> RiskRegisterResult<Risk> {
        let rated_probability = Probability::try_from(probability)?;
        let rated_impact = Impact::try_from(impact)?;
        let mut risk = self.find_or_error(id).await?;
        self.open_project(risk.project_id()).await?;

        let previous = risk.score();
        let score = risk.reassess(rated_probability, rated_impact, &*self.clock);
        self.risks.update(&risk).await?;
        info!(risk_id = %id, %previous, %score, "risk reassessed");
        Ok(risk)
    }

    /// Changes the handling status of a risk.
    ///
    /// # Errors
    ///
    /// Returns [`RiskRegisterError`] when the risk is missing, its project
    /// is closed or persistence fails.
    pub async fn change_status(&self, id: RiskId, status: RiskStatus) -> RiskRegisterResult<Risk> {
        let mut risk = self.find_or_error(id).await?;
        self.open_project(risk.project_id()).await?;
        risk.change_status(status, &*self.clock);
        self.risks.update(&risk).await?;
        info!(risk_id = %id, status = %status, "risk status changed");
        Ok(risk)
    }

    async fn find_or_error(&self, id: RiskId) -> RiskRegisterResult<Risk> {
        self.risks
            .find_by_id(id)
            .await?
            .ok_or(RiskRegisterError::RiskNotFound(id))
    }

    async fn open_project(&self, project_id: ProjectId) -> RiskRegisterResult<()> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(RiskRegisterError::ProjectNotFound(project_id))?;
        project.ensure_open()?;
        Ok(())
    }
}

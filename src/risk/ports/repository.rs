//! Repository port for risk persistence and lookup.

use crate::project::domain::ProjectId;
use crate::risk::domain::{Risk, RiskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for risk repository operations.
pub type RiskRepositoryResult<T> = Result<T, RiskRepositoryError>;

/// Risk persistence contract.
#[async_trait]
pub trait RiskRepository: Send + Sync {
    /// Stores a new risk.
    ///
    /// # Errors
    ///
    /// Returns [`RiskRepositoryError::DuplicateRisk`] when the ID already
    /// exists.
    async fn store(&self, risk: &Risk) -> RiskRepositoryResult<()>;

    /// Persists changes to an existing risk.
    ///
    /// # Errors
    ///
    /// Returns [`RiskRepositoryError::NotFound`] when the risk does not exist, or
    /// [`RiskRepositoryError::ProjectChanged`] when the owning project differs from the
    /// stored one.
    async fn update(&self, risk: &Risk) -> RiskRepositoryResult<()>;

    /// Finds a risk by identifier.
    async fn find_by_id(&self, id: RiskId) -> RiskRepositoryResult<Option<Risk>>;

    /// Returns every risk recorded against the project, oldest first.
    async fn list_by_project(&self, project_id: ProjectId) -> RiskRepositoryResult<Vec<Risk>>;
}

/// Errors returned by risk repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RiskRepositoryError {
    /// A risk with the same identifier already exists.
    #[error("duplicate risk identifier: {0}")]
    DuplicateRisk(RiskId),

    /// The risk was not found.
    #[error("risk not found: {0}")]
    NotFound(RiskId),

    /// An update tried to move the risk to a different project.
    #[error("risk {risk_id} belongs to project {stored}, not {requested}")]
    ProjectChanged {
        /// Risk being updated.
        risk_id: RiskId,
        /// Project the stored risk belongs to.
        stored: ProjectId,
        /// Project named by the update.
        requested: ProjectId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RiskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! In-memory repository for the risk register.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::domain::ProjectId;
use crate::risk::{
    domain::{Risk, RiskId},
    ports::{RiskRepository, RiskRepositoryError, RiskRepositoryResult},
};

/// Thread-safe in-memory risk repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRiskRepository {
    state: Arc<RwLock<InMemoryRiskState>>,
}

#[derive(Debug, Default)]
struct InMemoryRiskState {
    risks: HashMap<RiskId, Risk>,
    project_index: HashMap<ProjectId, Vec<RiskId>>,
}

impl InMemoryRiskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> RiskRepositoryError {
    RiskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RiskRepository for InMemoryRiskRepository {
    async fn store(&self, risk: &Risk) -> RiskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.risks.contains_key(&risk.id()) {
            return Err(RiskRepositoryError::DuplicateRisk(risk.id()));
        }

        state
            .project_index
            .entry(risk.project_id())
            .or_default()
            .push(risk.id());
        state.risks.insert(risk.id(), risk.clone());
        Ok(())
    }

    async fn update(&self, risk: &Risk) -> RiskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .risks
            .get_mut(&risk.id())
            .ok_or(RiskRepositoryError::NotFound(risk.id()))?;
        if stored.project_id() != risk.project_id() {
            return Err(RiskRepositoryError::ProjectChanged {
                risk_id: risk.id(),
                stored: stored.project_id(),
                requested: risk.project_id(),
            });
        }
        *stored = risk.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: RiskId) -> RiskRepositoryResult<Option<Risk>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.risks.get(&id).cloned())
    }

    async fn list_by_project(&self, project_id: ProjectId) -> RiskRepositoryResult<Vec<Risk>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .project_index
            .get(&project_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.risks.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}

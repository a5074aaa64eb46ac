//! In-memory integration tests for the risk register.

use super::helpers::{Workspace, workspace};
use crate::test_helpers::date;
use keystone::risk::{
    domain::{RiskDomainError, RiskStatus},
    services::{RecordRiskRequest, RiskRegisterError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn risk_score_follows_reassessment(workspace: Workspace) -> Result<(), eyre::Report> {
    let project = workspace
        .project("Seawall", date(2024, 1, 1), date(2024, 6, 1))
        .await?;
    let risk = workspace
        .risks
        .record(RecordRiskRequest::new(project.id(), "Storm surge", 2, 5))
        .await?;
    eyre::ensure!(risk.score().value() == 10, "initial score should be 10");

    let reassessed = workspace.risks.reassess(risk.id(), 5, 5).await?;
    let closed = workspace
        .risks
        .change_status(risk.id(), RiskStatus::Closed)
        .await?;

    assert_eq!(reassessed.score().value(), 25);
    assert_eq!(closed.score().value(), 25);
    assert_eq!(closed.status(), RiskStatus::Closed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassessment_rejects_invalid_impact(workspace: Workspace) -> Result<(), eyre::Report> {
    let project = workspace
        .project("Seawall", date(2024, 1, 1), date(2024, 6, 1))
        .await?;
    let risk = workspace
        .risks
        .record(RecordRiskRequest::new(project.id(), "Erosion", 3, 3))
        .await?;

    let result = workspace.risks.reassess(risk.id(), 3, 0).await;

    assert!(matches!(
        result,
        Err(RiskRegisterError::Domain(RiskDomainError::ImpactOutOfRange(0)))
    ));
    let stored = workspace.risks.find_by_id(risk.id()).await?;
    assert_eq!(stored.map(|kept| kept.score().value()), Some(9));
    Ok(())
}

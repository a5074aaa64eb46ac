//! Port contracts for the risk register.

pub mod repository;

pub use repository::{RiskRepository, RiskRepositoryError, RiskRepositoryResult};

//! Application services for the risk register.

mod register;

pub use register::{RecordRiskRequest, RiskRegisterError, RiskRegisterResult, RiskRegisterService};

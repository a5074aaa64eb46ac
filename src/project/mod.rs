//! Project lifecycle management.
//!
//! Projects own tasks and risks. This module keeps the project status set,
//! the schedule rules, the closure gate that only lets a project close once
//! every task is completed, and the RAG health calculation. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

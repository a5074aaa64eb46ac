//! Keystone: task and project lifecycle rules.
//!
//! This crate holds the business rules a project tracker runs before it
//! writes anything: prerequisite cycle detection, the task status
//! automaton, the project closure gate, RAG health and risk scoring.
//!
//! # Architecture
//!
//! Keystone follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the entity store
//! - **Adapters**: In-memory implementations of the ports
//! - **Services**: Load, validate and write back one mutation at a time
//!
//! # Modules
//!
//! - [`task`]: Tasks, prerequisites, assignment and completion
//! - [`project`]: Projects, the closure gate and RAG health
//! - [`risk`]: Risk register and risk scores

pub mod project;
pub mod risk;
pub mod task;

#[cfg(test)]
mod test_support;

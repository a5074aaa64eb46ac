//! Task lifecycle management.
//!
//! Tasks belong to one project, may depend on one prerequisite task in the
//! same project, and move between `Unassigned`, `Assigned` and `Completed`.
//! Assignment drives the first two states; completion is explicit and
//! checks the prerequisite, the actual dates and the time spent. The module
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

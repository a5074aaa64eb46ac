//! Step definitions for lifecycle behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;

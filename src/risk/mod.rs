//! Risk register.
//!
//! Risks are rated for probability and impact on a 1 to 5 scale. Their
//! score is always the product of the two and is recomputed whenever either
//! rating changes.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

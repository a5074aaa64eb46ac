//! In-memory adapter implementations for testing and embedding.

mod risk;

pub use risk::InMemoryRiskRepository;

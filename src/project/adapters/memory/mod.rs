//! In-memory adapter implementations for testing and embedding.

mod project;

pub use project::InMemoryProjectRepository;

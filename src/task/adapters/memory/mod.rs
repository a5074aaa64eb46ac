//! In-memory adapter implementations for testing and embedding.

mod task;

pub use task::InMemoryTaskRepository;

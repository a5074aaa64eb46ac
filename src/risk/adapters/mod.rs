//! Adapter implementations for the risk repository port.

pub mod memory;

//! Unit tests for the risk register.

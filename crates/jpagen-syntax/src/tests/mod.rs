//! Crate-level tests for `jpagen-syntax`.

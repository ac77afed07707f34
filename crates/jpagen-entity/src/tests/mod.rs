//! Crate-level tests for `jpagen-entity`.

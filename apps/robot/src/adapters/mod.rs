//! Adapters for external dependencies.

pub mod tables_sea;

#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod feed;
pub mod infra;
pub mod repos;
pub mod robot;
pub mod store;
pub mod worker;

// Re-exports for public API
pub use error::AppError;
pub use feed::ChangeNotification;
pub use robot::{CommitPolicy, DispatchOutcome, DriveReport, TriggerDispatcher};
pub use store::{MemoryTableStore, SeaTableStore, TableRecord, TableStore};
pub use worker::DispatchMode;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    robot_test_support::logging::init();
}

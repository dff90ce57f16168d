//! Test support utilities for the table robot.
//!
//! Shared between unit tests and integration tests so both install the same
//! tracing subscriber.

pub mod logging;

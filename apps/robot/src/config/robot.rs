use std::env;

use crate::config::{must_var, var_or};
use crate::error::AppError;
use crate::robot::CommitPolicy;
use crate::worker::DispatchMode;

pub const DEFAULT_CHANNEL: &str = "tables:changed";

/// Runtime settings of the robot worker, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotConfig {
    pub redis_url: String,
    pub channel: String,
    pub commit_policy: CommitPolicy,
    pub dispatch_mode: DispatchMode,
    pub run_migrations: bool,
}

impl RobotConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let redis_url = must_var("REDIS_URL")?;
        let channel = var_or("ROBOT_CHANNEL", DEFAULT_CHANNEL);
        let commit_policy = match env::var("ROBOT_COMMIT_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => CommitPolicy::default(),
        };
        let dispatch_mode = match env::var("ROBOT_DISPATCH_MODE") {
            Ok(raw) => raw.parse()?,
            Err(_) => DispatchMode::default(),
        };
        let run_migrations = parse_flag("ROBOT_RUN_MIGRATIONS", &var_or("ROBOT_RUN_MIGRATIONS", "false"))?;

        Ok(Self {
            redis_url,
            channel,
            commit_policy,
            dispatch_mode,
            run_migrations,
        })
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(AppError::config(format!(
            "{name} must be true or false, got '{other}'"
        ))),
    }
}

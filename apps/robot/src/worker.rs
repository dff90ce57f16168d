//! Consumes change notifications and runs the dispatcher for each one.

use std::str::FromStr;
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn, Instrument};

use crate::domain::HandAggregate;
use crate::error::AppError;
use crate::feed::ChangeNotification;
use crate::robot::TriggerDispatcher;
use crate::store::TableStore;

/// How much work one notification triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Keep moving until no robot can act.
    #[default]
    Drive,
    /// One move; the write's own notification triggers the next.
    Single,
}

impl DispatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchMode::Drive => "drive",
            DispatchMode::Single => "single",
        }
    }
}

impl FromStr for DispatchMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drive" => Ok(DispatchMode::Drive),
            "single" => Ok(DispatchMode::Single),
            other => Err(AppError::config(format!(
                "Unknown dispatch mode '{other}', expected drive or single"
            ))),
        }
    }
}

/// Runs until `notifications` ends or `shutdown` fires, then waits for the
/// in-flight invocations.
///
/// Each notification gets its own task; a failing invocation is logged and
/// does not affect the others.
pub async fn run<S, H, N>(
    dispatcher: TriggerDispatcher<S, H>,
    mode: DispatchMode,
    mut notifications: N,
    shutdown: CancellationToken,
) where
    S: TableStore + 'static,
    H: HandAggregate + 'static,
    N: Stream<Item = ChangeNotification> + Unpin,
{
    let dispatcher = Arc::new(dispatcher);
    let mut in_flight = JoinSet::new();

    info!(mode = mode.as_str(), "Robot worker started");

    loop {
        let change = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown requested, stopping robot worker");
                break;
            }
            next = notifications.next() => match next {
                Some(change) => change,
                None => {
                    warn!("Change feed closed, stopping robot worker");
                    break;
                }
            },
        };

        // Reap finished tasks.
        while in_flight.try_join_next().is_some() {}

        let dispatcher = dispatcher.clone();
        in_flight.spawn(
            async move { invoke(dispatcher.as_ref(), mode, &change).await }.in_current_span(),
        );
    }

    while in_flight.join_next().await.is_some() {}
    info!("Robot worker stopped");
}

async fn invoke<S, H>(
    dispatcher: &TriggerDispatcher<S, H>,
    mode: DispatchMode,
    change: &ChangeNotification,
) where
    S: TableStore,
    H: HandAggregate,
{
    let table_id = change.table_id.as_str();
    let result = match mode {
        DispatchMode::Single => dispatcher
            .on_change(change)
            .await
            .map(|outcome| debug!(table_id, committed = outcome.is_committed(), "Dispatch finished")),
        DispatchMode::Drive => dispatcher
            .drive(table_id)
            .await
            .map(|report| debug!(table_id, moves = report.moves_committed, "Drive finished")),
    };

    match result {
        Ok(()) => {}
        Err(err) if err.is_not_found() => {
            // Deletions arrive here too.
            info!(table_id, error = %err, "Table no longer exists");
        }
        Err(err) => {
            error!(table_id, code = %err.code(), error = %err, "Robot invocation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_case_insensitively() {
        assert_eq!("Drive".parse::<DispatchMode>().unwrap(), DispatchMode::Drive);
        assert_eq!(" single ".parse::<DispatchMode>().unwrap(), DispatchMode::Single);
        assert!("batch".parse::<DispatchMode>().is_err());
    }
}

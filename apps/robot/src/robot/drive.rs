//! Runs the dispatcher for one table until an invocation writes nothing.

use tracing::{info, warn};

use crate::domain::{HandAggregate, Seat};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::robot::dispatcher::{DispatchOutcome, TriggerDispatcher};
use crate::store::TableStore;

/// Why a drive stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveStop {
    NoActiveTurn,
    HumanTurn { seat: Seat },
    NoMoveProduced { seat: Seat },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveReport {
    pub moves_committed: usize,
    pub stopped_on: DriveStop,
}

impl<S: TableStore, H: HandAggregate> TriggerDispatcher<S, H> {
    /// Dispatches repeatedly until nothing is committed.
    ///
    /// Terminates because every commit must raise `moves_made` above every
    /// value seen so far, and `moves_made` may never pass `move_budget`.
    /// Either condition failing aborts with an internal error.
    pub async fn drive(&self, table_id: &str) -> Result<DriveReport, AppError> {
        let mut moves_committed = 0usize;
        let mut high_water: Option<usize> = None;

        loop {
            let (moves_before, moves_after, move_budget) = match self.dispatch(table_id).await? {
                DispatchOutcome::Committed {
                    moves_before,
                    moves_after,
                    move_budget,
                    ..
                } => (moves_before, moves_after, move_budget),
                DispatchOutcome::NoActiveTurn => {
                    return Ok(report(moves_committed, DriveStop::NoActiveTurn, table_id))
                }
                DispatchOutcome::HumanTurn { seat } => {
                    return Ok(report(moves_committed, DriveStop::HumanTurn { seat }, table_id))
                }
                DispatchOutcome::NoMoveProduced { seat } => {
                    return Ok(report(
                        moves_committed,
                        DriveStop::NoMoveProduced { seat },
                        table_id,
                    ))
                }
            };

            let advanced = moves_after > moves_before && high_water.is_none_or(|hw| moves_after > hw);
            if !advanced {
                warn!(table_id, moves_before, moves_after, "Committed move did not advance the hand");
                return Err(AppError::internal(
                    ErrorCode::DriveNoProgress,
                    format!(
                        "table {table_id}: commit left moves_made at {moves_after} (was {moves_before}, high water {high_water:?})"
                    ),
                ));
            }
            if moves_after > move_budget {
                return Err(AppError::internal(
                    ErrorCode::DriveBudgetExceeded,
                    format!("table {table_id}: {moves_after} moves exceed budget {move_budget}"),
                ));
            }

            high_water = Some(moves_after);
            moves_committed += 1;
        }
    }
}

fn report(moves_committed: usize, stopped_on: DriveStop, table_id: &str) -> DriveReport {
    info!(table_id, moves_committed, stopped_on = ?stopped_on, "Drive finished");
    DriveReport {
        moves_committed,
        stopped_on,
    }
}

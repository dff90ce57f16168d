//! Entry point keyed by table id: read, decide, write at most once.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};
use ulid::Ulid;

use crate::domain::{BridgeHand, HandAggregate, Seat};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::feed::ChangeNotification;
use crate::robot::commit::{HandCommitter, LastWriterWins};
use crate::robot::synth::{synthesize_move, HandMove, Move, Synthesized};
use crate::robot::turn::{resolve_turn, TurnResolution};
use crate::store::TableStore;

/// What one invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome<B, C> {
    /// The hand is over (or was never dealt).
    NoActiveTurn,
    /// The seat to act is not automated; nothing to do.
    HumanTurn { seat: Seat },
    /// The robot had the turn but the hand accepted none of its candidates.
    NoMoveProduced { seat: Seat },
    Committed {
        seat: Seat,
        mv: Move<B, C>,
        moves_before: usize,
        moves_after: usize,
        move_budget: usize,
        version: i32,
    },
}

impl<B, C> DispatchOutcome<B, C> {
    pub fn is_committed(&self) -> bool {
        matches!(self, DispatchOutcome::Committed { .. })
    }
}

pub type HandOutcome<H> = DispatchOutcome<<H as HandAggregate>::Bid, <H as HandAggregate>::Card>;

/// Drives the robot's seats on a table, one move per invocation.
///
/// Holds no per-table state: every call starts from a fresh read of the
/// store, so repeated, duplicated or reordered triggers are harmless.
pub struct TriggerDispatcher<S, H = BridgeHand> {
    store: Arc<S>,
    committer: Arc<dyn HandCommitter>,
    _hand: PhantomData<fn() -> H>,
}

impl<S, H> Clone for TriggerDispatcher<S, H> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            committer: self.committer.clone(),
            _hand: PhantomData,
        }
    }
}

impl<S: TableStore, H: HandAggregate> TriggerDispatcher<S, H> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            committer: Arc::new(LastWriterWins),
            _hand: PhantomData,
        }
    }

    pub fn with_committer(mut self, committer: Arc<dyn HandCommitter>) -> Self {
        self.committer = committer;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Handles a change notification. Only the table id is used; the
    /// payload may be stale by the time it arrives.
    pub async fn on_change(&self, change: &ChangeNotification) -> Result<HandOutcome<H>, AppError> {
        self.dispatch(&change.table_id).await
    }

    pub async fn dispatch(&self, table_id: &str) -> Result<HandOutcome<H>, AppError> {
        let span = info_span!(
            "robot_dispatch",
            invocation_id = %Ulid::new(),
            table_id,
            policy = self.committer.policy().as_str(),
        );
        self.dispatch_inner(table_id).instrument(span).await
    }

    async fn dispatch_inner(&self, table_id: &str) -> Result<HandOutcome<H>, AppError> {
        let table = self.store.get(table_id).await?.ok_or_else(|| {
            AppError::not_found(
                ErrorCode::TableNotFound,
                format!("Table not found at {table_id}"),
            )
        })?;

        let hand = H::from_document(&table.hand)?;

        let seat = match resolve_turn(&hand, &table.players) {
            TurnResolution::NoActiveTurn => {
                debug!(phase = ?hand.phase(), "No active turn, nothing to do");
                return Ok(DispatchOutcome::NoActiveTurn);
            }
            TurnResolution::Human { seat } => {
                debug!(seat, "Human player's turn, stopping robot processing");
                return Ok(DispatchOutcome::HumanTurn { seat });
            }
            TurnResolution::Robot { seat } => seat,
        };

        info!(seat, phase = ?hand.phase(), "Processing robot turn");

        let Some(Synthesized { hand: next, mv }) = synthesize_move(&hand, seat) else {
            return Ok(DispatchOutcome::NoMoveProduced { seat });
        };

        let doc = next.to_document()?;
        let version = self
            .committer
            .commit(self.store.as_ref(), &table, doc)
            .await?;

        info!(seat, mv = %mv, version, "Robot move committed");

        Ok(committed::<H>(seat, mv, &hand, &next, version))
    }
}

fn committed<H: HandAggregate>(
    seat: Seat,
    mv: HandMove<H>,
    before: &H,
    after: &H,
    version: i32,
) -> HandOutcome<H> {
    DispatchOutcome::Committed {
        seat,
        mv,
        moves_before: before.moves_made(),
        moves_after: after.moves_made(),
        move_budget: after.move_budget(),
        version,
    }
}

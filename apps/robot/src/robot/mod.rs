//! The robot: resolves whose turn it is, proposes a move for automated seats
//! and commits it.

pub mod commit;
pub mod dispatcher;
pub mod drive;
pub mod synth;
pub mod turn;

pub use commit::{CommitPolicy, HandCommitter, LastWriterWins, VersionChecked};
pub use dispatcher::{DispatchOutcome, HandOutcome, TriggerDispatcher};
pub use drive::{DriveReport, DriveStop};
pub use synth::{synthesize_move, HandMove, Move, Synthesized};
pub use turn::{is_robot, resolve_turn, TurnResolution, ROBOT_PLAYER};

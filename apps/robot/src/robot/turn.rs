use crate::domain::{HandAggregate, Seat};

/// Player label that marks a seat as played by the robot. Matched exactly.
pub const ROBOT_PLAYER: &str = "Robot";

/// Who, if anyone, is expected to act on a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResolution {
    /// The hand has no current turn.
    NoActiveTurn,
    /// A person (or nobody) sits at the seat to act.
    Human { seat: Seat },
    Robot { seat: Seat },
}

pub fn is_robot(label: Option<&str>) -> bool {
    label == Some(ROBOT_PLAYER)
}

/// Pure: decides from the hand's turn and the seated players alone.
pub fn resolve_turn<H: HandAggregate>(hand: &H, players: &[Option<String>]) -> TurnResolution {
    let Some(seat) = hand.current_turn() else {
        return TurnResolution::NoActiveTurn;
    };

    let label = players.get(seat as usize).and_then(|p| p.as_deref());
    if is_robot(label) {
        TurnResolution::Robot { seat }
    } else {
        TurnResolution::Human { seat }
    }
}

//! Error codes for the table robot.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in structured logs.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Move validation (absorbed by the synthesizer, never surfaced)
    /// Bid does not outrank the auction or is not allowed here
    InvalidBid,
    /// Must follow suit
    MustFollowSuit,
    /// Card not in the seat's holding
    CardNotInHand,
    /// Out of turn
    OutOfTurn,
    /// Phase mismatch
    PhaseMismatch,
    /// Seat index outside [0, 4)
    InvalidSeat,

    // Document parsing
    /// Parse card error
    ParseCard,
    /// Parse bid error
    ParseBid,
    /// Stored hand document is not a valid hand
    HandCorrupt,

    // Resource Not Found
    /// Table not found
    TableNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict
    Conflict,

    // Drive loop invariants
    /// A committed move did not advance the hand
    DriveNoProgress,
    /// The loop ran past the hand's move budget
    DriveBudgetExceeded,

    // System Errors
    /// Database error
    DbError,
    /// Notification substrate error
    FeedError,
    /// Configuration error
    ConfigError,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidBid => "INVALID_BID",
            Self::MustFollowSuit => "MUST_FOLLOW_SUIT",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::InvalidSeat => "INVALID_SEAT",

            Self::ParseCard => "PARSE_CARD",
            Self::ParseBid => "PARSE_BID",
            Self::HandCorrupt => "HAND_CORRUPT",

            Self::TableNotFound => "TABLE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DriveNoProgress => "DRIVE_NO_PROGRESS",
            Self::DriveBudgetExceeded => "DRIVE_BUDGET_EXCEEDED",

            Self::DbError => "DB_ERROR",
            Self::FeedError => "FEED_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

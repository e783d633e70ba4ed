use thiserror::Error;

/// Result alias used across the engine.
pub type GameResult<T> = Result<T, GameError>;

/// Errors surfaced by table operations. Action-level variants carry the rule
/// that failed together with the current legal bounds so a caller can retry
/// with a legal action; the engine never substitutes an action on its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("need {needed} cards, only {available} available")]
    InsufficientCards { needed: usize, available: usize },

    #[error("it's not {actual}'s turn (waiting on {expected})")]
    NotYourTurn { expected: String, actual: String },

    #[error("cannot check while owing {to_call}")]
    CannotCheck { to_call: u32 },

    #[error("raise to {attempted} is below the minimum of {minimum}")]
    RaiseTooSmall { minimum: u32, attempted: u32 },

    #[error("player cannot act in their current state")]
    CannotAct,

    #[error("seat {seat} is already occupied")]
    SeatTaken { seat: usize },

    #[error("seat {seat} does not exist, table has {max_seats} seats")]
    InvalidSeat { seat: usize, max_seats: usize },

    #[error("table is full ({max_players} players)")]
    RoomFull { max_players: usize },

    #[error("player {player_id} is not at this table")]
    PlayerNotFound { player_id: String },

    #[error("player {player_id} is already seated")]
    AlreadySeated { player_id: String },

    #[error("buy-in {amount} is outside {min}..={max}")]
    BuyInOutOfRange { amount: u32, min: u32, max: u32 },

    #[error("need at least {required} funded players, have {seated}")]
    NotEnoughPlayers { seated: usize, required: usize },

    #[error("a hand is already in progress")]
    HandInProgress,

    #[error("no hand in progress")]
    NoHandInProgress,

    #[error("invariant violated: {detail}")]
    InvariantViolation { detail: String },
}

//! Game State & Rules
//!
//! The adversarial turn protocol's state machine:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    GAME LAYER                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  state.rs      - Game record, phases, slots, game ids       │
//! │  transition.rs - pure all-or-nothing turn transitions       │
//! │  registry.rs   - one-active-game-per-player bookkeeping     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure here is a caller-attributable precondition violation,
//! surfaced as a [`GameError`] without mutating anything. Truly unreachable
//! invariant violations are defensive assertions instead.

pub mod registry;
pub mod state;
pub mod transition;

pub use registry::GameRegistry;
pub use state::{Game, GameId, GamePhase, PlayerSlot};
pub use transition::{LeaveOutcome, TurnOutcome};

/// Caller-attributable precondition failures.
///
/// None of these represents an internal fault, and no transition partially
/// mutates state before returning one. `DuplicateShot` and `InvalidProof`
/// are security-critical: both are checked before any state change so a
/// rejected submission can never advance the turn or credit a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Caller is already bound to an active game.
    #[error("already in an active game")]
    AlreadyInGame,

    /// Caller tried to join a game they created.
    #[error("cannot join your own game")]
    SelfJoin,

    /// Game is not in the phase this operation requires.
    #[error("game is not in a joinable phase")]
    GameNotJoinable,

    /// Caller does not own the current turn.
    #[error("not your turn")]
    NotYourTurn,

    /// The opening shot has already been fired.
    #[error("game already started")]
    AlreadyStarted,

    /// No shot is awaiting resolution.
    #[error("no pending shot to resolve")]
    NoPendingShot,

    /// This shot was already resolved against this board (nullifier collision).
    #[error("shot already resolved against this board")]
    DuplicateShot,

    /// The verifier rejected the submitted proof.
    #[error("proof rejected by verifier")]
    InvalidProof,

    /// Caller is not a player in this game.
    #[error("caller is not a player in this game")]
    NotInGame,

    /// Game already reached a terminal phase.
    #[error("game already finished")]
    GameAlreadyFinished,

    /// No game exists with this id.
    #[error("unknown game id")]
    UnknownGame,
}

//! Game State Definitions
//!
//! The durable per-game record. Everything here is what an external store
//! would persist: ids, identities, commitments, phase, turn ownership, the
//! pending shot, hit tallies and the winner. No board contents, ever.

use serde::{Serialize, Deserialize};

use crate::TOTAL_SHIP_CELLS;
use crate::core::{Coordinate, PlayerId};
use crate::proof::Commitment;

/// Monotonically increasing game identifier. The first valid id is 1;
/// 0 is reserved to mean "not in a game" in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct GameId(pub u64);

impl GameId {
    /// Sentinel for "not bound to any game".
    pub const NONE: GameId = GameId(0);

    /// Is this the "no game" sentinel?
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two player slots of a game. The creator always occupies the first
/// slot and fires the opening shot; there is no coin flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// The creator's slot.
    First = 0,
    /// The joiner's slot.
    Second = 1,
}

impl PlayerSlot {
    /// The other slot.
    #[inline]
    pub fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::First => PlayerSlot::Second,
            PlayerSlot::Second => PlayerSlot::First,
        }
    }

    /// Array index for per-slot fields.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Phase of a game. Transitions only move forward:
/// `AwaitingOpponent -> Active -> Finished`, or
/// `AwaitingOpponent -> Cancelled` when the creator leaves before anyone joins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Created, waiting for a second player.
    #[default]
    AwaitingOpponent,
    /// Both boards committed, shots being exchanged.
    Active,
    /// Won, by sinking the fleet or by forfeit.
    Finished,
    /// Abandoned before an opponent joined.
    Cancelled,
}

impl GamePhase {
    /// Terminal phases admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Finished | GamePhase::Cancelled)
    }
}

/// Complete state of one game.
///
/// Invariants maintained by the transition functions:
/// - `players[0]` is set before `players[1]`; `commitments[i]` is set iff
///   `players[i]` is.
/// - `pending_shot` is `Some` only while the game is `Active` and exactly
///   one shot awaits resolution.
/// - `hits_taken[i] <= TOTAL_SHIP_CELLS`; reaching the cap finishes the
///   game in the same transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Game identifier.
    pub id: GameId,

    /// Bound players, creator first.
    pub players: [Option<PlayerId>; 2],

    /// Board commitments, parallel to `players`.
    pub commitments: [Option<Commitment>; 2],

    /// Current phase.
    pub phase: GamePhase,

    /// Which slot must submit the next `first_turn`/`turn` call.
    pub turn_owner: PlayerSlot,

    /// The most recently fired, unresolved shot.
    pub pending_shot: Option<Coordinate>,

    /// Cumulative confirmed hits against each player's board.
    pub hits_taken: [u8; 2],

    /// Winner identity once `phase == Finished`.
    pub winner: Option<PlayerId>,
}

impl Game {
    /// Create a fresh game awaiting an opponent.
    pub fn new(id: GameId, creator: PlayerId, commitment: Commitment) -> Self {
        Self {
            id,
            players: [Some(creator), None],
            commitments: [Some(commitment), None],
            phase: GamePhase::AwaitingOpponent,
            turn_owner: PlayerSlot::First,
            pending_shot: None,
            hits_taken: [0, 0],
            winner: None,
        }
    }

    /// Identity bound to a slot, if any.
    pub fn player(&self, slot: PlayerSlot) -> Option<PlayerId> {
        self.players[slot.index()]
    }

    /// Commitment bound to a slot, if any.
    pub fn commitment(&self, slot: PlayerSlot) -> Option<Commitment> {
        self.commitments[slot.index()]
    }

    /// Which slot an identity occupies, if bound.
    pub fn slot_of(&self, id: &PlayerId) -> Option<PlayerSlot> {
        if self.players[0] == Some(*id) {
            Some(PlayerSlot::First)
        } else if self.players[1] == Some(*id) {
            Some(PlayerSlot::Second)
        } else {
            None
        }
    }

    /// Is this identity one of the bound players?
    pub fn is_player(&self, id: &PlayerId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Has any hit been confirmed yet?
    pub fn has_hits(&self) -> bool {
        self.hits_taken != [0, 0]
    }

    /// Confirmed hits still needed to sink a slot's fleet.
    pub fn hits_remaining(&self, slot: PlayerSlot) -> u8 {
        TOTAL_SHIP_CELLS - self.hits_taken[slot.index()]
    }

    /// Serialize the durable record.
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("game record serialization cannot fail")
    }

    /// Deserialize a durable record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

//! Player-Game Bookkeeping
//!
//! Tracks which game, if any, each identity is currently bound to, and
//! allocates game ids. Purely bookkeeping: this component knows nothing
//! about proofs or turn order, and is synchronized with game phase changes
//! by the protocol layer.

use std::collections::BTreeMap;

use crate::core::PlayerId;
use crate::game::{GameError, GameId};

/// One-active-game-per-player registry.
///
/// An identity maps to a nonzero game id exactly while it occupies a slot
/// of a game whose phase is `AwaitingOpponent` or `Active`.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    /// Identity -> bound game. Absent means "not in a game".
    playing: BTreeMap<PlayerId, GameId>,
    /// Next id to allocate. The first valid game id is 1.
    next_game_id: u64,
}

impl GameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            playing: BTreeMap::new(),
            next_game_id: 1,
        }
    }

    /// The game an identity is bound to, or [`GameId::NONE`].
    pub fn playing(&self, id: &PlayerId) -> GameId {
        self.playing.get(id).copied().unwrap_or(GameId::NONE)
    }

    /// Fail with `AlreadyInGame` if the identity is bound anywhere.
    pub fn ensure_free(&self, id: &PlayerId) -> Result<(), GameError> {
        if self.playing.contains_key(id) {
            return Err(GameError::AlreadyInGame);
        }
        Ok(())
    }

    /// Allocate the next game id and bind the creator to it.
    pub fn create_game(&mut self, caller: PlayerId) -> Result<GameId, GameError> {
        self.ensure_free(&caller)?;

        let id = GameId(self.next_game_id);
        self.next_game_id += 1;
        self.playing.insert(caller, id);
        Ok(id)
    }

    /// Bind the second player to an existing game.
    ///
    /// The caller must already have passed [`ensure_free`](Self::ensure_free)
    /// and the game's own join checks; binding itself cannot fail, which is
    /// what lets the protocol apply it after the state transition without
    /// risking partial mutation.
    pub fn bind_second(&mut self, caller: PlayerId, game_id: GameId) {
        debug_assert!(!self.playing.contains_key(&caller));
        self.playing.insert(caller, game_id);
    }

    /// Unbind an identity. Called on finish or cancel for every bound player.
    pub fn release(&mut self, id: &PlayerId) {
        self.playing.remove(id);
    }

    /// Number of currently bound identities.
    pub fn bound_count(&self) -> usize {
        self.playing.len()
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

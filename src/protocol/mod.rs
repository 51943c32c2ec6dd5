//! Turn Protocol
//!
//! The public operation surface: `new_game`, `join_game`, `first_turn`,
//! `turn` and `leave_game`. Caller identities arrive already authenticated
//! by whatever transport delivers the calls; this layer is thin
//! orchestration:
//!
//! 1. consult the registry for binding and anti-collision checks,
//! 2. apply the corresponding state-machine transition (which performs the
//!    cryptographic gates), and
//! 3. synchronize the registry when a game starts or ends.
//!
//! Failures surface as typed [`GameError`] values, never as silent no-ops,
//! and no operation leaves partial state behind. Replaying an accepted
//! operation is naturally rejected the second time by the phase and
//! pending-shot preconditions.

pub mod service;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::core::{Coordinate, PlayerId};
use crate::game::{
    transition, Game, GameError, GameId, GameRegistry, LeaveOutcome, PlayerSlot, TurnOutcome,
};
use crate::proof::{Commitment, NullifierLedger, ProofVerifier, Statement};

/// Sequential protocol core.
///
/// Owns all process-wide state: the registry, the game table and the
/// nullifier ledger, all initialized empty and mutated only through the
/// operations below. A `&mut self` call is one linearization point; for
/// per-game locking across tasks, wrap games with
/// [`service::ProtocolService`] instead.
pub struct TurnProtocol<V> {
    registry: GameRegistry,
    games: BTreeMap<GameId, Game>,
    nullifiers: NullifierLedger,
    verifier: V,
}

impl<V: ProofVerifier> TurnProtocol<V> {
    /// Create an empty protocol instance around a verifier capability.
    pub fn new(verifier: V) -> Self {
        Self {
            registry: GameRegistry::new(),
            games: BTreeMap::new(),
            nullifiers: NullifierLedger::new(),
            verifier,
        }
    }

    /// Create a new game with the caller's board commitment.
    ///
    /// The commitment must come with an accepted `BoardValidity` proof;
    /// the caller must not be bound to another game.
    pub fn new_game(
        &mut self,
        caller: PlayerId,
        commitment: Commitment,
        proof: &[u8],
    ) -> Result<GameId, GameError> {
        self.registry.ensure_free(&caller)?;

        let statement = Statement::BoardValidity { commitment };
        if !self.verifier.verify(&statement, proof) {
            return Err(GameError::InvalidProof);
        }

        let id = self.registry.create_game(caller)?;
        self.games.insert(id, Game::new(id, caller, commitment));
        info!(game = %id, player = %caller, board = %commitment, "game created");
        Ok(id)
    }

    /// Join an existing game with the caller's board commitment.
    pub fn join_game(
        &mut self,
        caller: PlayerId,
        game_id: GameId,
        commitment: Commitment,
        proof: &[u8],
    ) -> Result<(), GameError> {
        self.registry.ensure_free(&caller)?;
        let game = self.games.get_mut(&game_id).ok_or(GameError::UnknownGame)?;

        transition::join(game, caller, commitment, &self.verifier, proof)?;

        // Infallible once the transition accepted; keeps join all-or-nothing.
        self.registry.bind_second(caller, game_id);
        info!(game = %game_id, player = %caller, board = %commitment, "game joined");
        Ok(())
    }

    /// Fire the opening shot. Creator only, once, no proof attached.
    pub fn first_turn(
        &mut self,
        caller: PlayerId,
        game_id: GameId,
        shot: Coordinate,
    ) -> Result<(), GameError> {
        let game = self.games.get_mut(&game_id).ok_or(GameError::UnknownGame)?;

        transition::opening_shot(game, caller, shot)?;
        debug!(game = %game_id, player = %caller, %shot, "opening shot");
        Ok(())
    }

    /// Resolve the pending shot against the caller's board and fire back.
    pub fn turn(
        &mut self,
        caller: PlayerId,
        game_id: GameId,
        hit_claim: bool,
        next_shot: Coordinate,
        proof: &[u8],
    ) -> Result<TurnOutcome, GameError> {
        let game = self.games.get_mut(&game_id).ok_or(GameError::UnknownGame)?;

        let outcome = transition::resolve_and_fire(
            game,
            caller,
            hit_claim,
            next_shot,
            proof,
            &self.verifier,
            &mut self.nullifiers,
        )?;
        debug!(
            game = %game_id, player = %caller, hit = outcome.hit,
            "shot resolved",
        );

        if let Some(winner) = outcome.winner {
            let players: Vec<PlayerId> = game.players.iter().flatten().copied().collect();
            for player in &players {
                self.registry.release(player);
            }
            info!(game = %game_id, winner = %winner, "game finished");
        }
        Ok(outcome)
    }

    /// Leave the game: cancellation before an opponent joins, forfeit after.
    pub fn leave_game(
        &mut self,
        caller: PlayerId,
        game_id: GameId,
    ) -> Result<LeaveOutcome, GameError> {
        let game = self.games.get_mut(&game_id).ok_or(GameError::UnknownGame)?;

        let outcome = transition::forfeit(game, caller)?;
        match outcome {
            LeaveOutcome::Cancelled => {
                self.registry.release(&caller);
                info!(game = %game_id, player = %caller, "game cancelled");
            }
            LeaveOutcome::Forfeited { winner } => {
                let players: Vec<PlayerId> = game.players.iter().flatten().copied().collect();
                for player in &players {
                    self.registry.release(player);
                }
                info!(game = %game_id, player = %caller, winner = %winner, "game forfeited");
            }
        }
        Ok(outcome)
    }

    // -------------------------------------------------------------------------
    // Read surface
    // -------------------------------------------------------------------------

    /// Look up a game's public state.
    pub fn game(&self, game_id: GameId) -> Option<&Game> {
        self.games.get(&game_id)
    }

    /// The game an identity is bound to, or [`GameId::NONE`].
    pub fn playing(&self, id: &PlayerId) -> GameId {
        self.registry.playing(id)
    }

    /// Has a shot already been resolved against this board?
    pub fn shot_consumed(&self, commitment: &Commitment, shot: Coordinate) -> bool {
        self.nullifiers.contains(commitment, shot)
    }

    /// The opening slot's identity for a game, if it exists.
    pub fn creator(&self, game_id: GameId) -> Option<PlayerId> {
        self.games.get(&game_id).and_then(|g| g.player(PlayerSlot::First))
    }
}

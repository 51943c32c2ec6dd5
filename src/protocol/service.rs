//! Concurrent Protocol Service
//!
//! Async facade over the turn protocol for multi-task callers. Progress in
//! one game never waits on another: each game sits behind its own mutex and
//! the shared structures are touched only briefly.
//!
//! Lock discipline, in acquisition order:
//!
//! 1. At most one of the registry lock and the game-table lock is held at a
//!    time, and never across an `.await` on a game mutex.
//! 2. A game mutex may be held while taking the registry lock (end-of-game
//!    release) or the nullifier lock (shot resolution).
//! 3. The nullifier lock is innermost and never held while acquiring
//!    anything else.
//!
//! Joining reserves the caller's registry binding up front, drops the lock,
//! and rolls the reservation back if the game-level transition rejects the
//! join. That keeps the one-game-per-player rule race-free without ever
//! holding the registry across a game mutex.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::core::{Coordinate, PlayerId};
use crate::game::{
    transition, Game, GameError, GameId, GameRegistry, LeaveOutcome, TurnOutcome,
};
use crate::proof::{Commitment, NullifierLedger, ProofVerifier, Statement};

/// Shared-state turn protocol with per-game mutual exclusion.
pub struct ProtocolService<V> {
    registry: RwLock<GameRegistry>,
    games: RwLock<BTreeMap<GameId, Arc<Mutex<Game>>>>,
    nullifiers: Mutex<NullifierLedger>,
    verifier: V,
}

impl<V: ProofVerifier> ProtocolService<V> {
    /// Create an empty service around a verifier capability.
    pub fn new(verifier: V) -> Self {
        Self {
            registry: RwLock::new(GameRegistry::new()),
            games: RwLock::new(BTreeMap::new()),
            nullifiers: Mutex::new(NullifierLedger::new()),
            verifier,
        }
    }

    /// Clone out the handle for a game so its mutex can be taken without
    /// holding the table lock.
    async fn handle(&self, game_id: GameId) -> Result<Arc<Mutex<Game>>, GameError> {
        self.games
            .read()
            .await
            .get(&game_id)
            .cloned()
            .ok_or(GameError::UnknownGame)
    }

    /// Create a new game with the caller's board commitment.
    pub async fn new_game(
        &self,
        caller: PlayerId,
        commitment: Commitment,
        proof: &[u8],
    ) -> Result<GameId, GameError> {
        let statement = Statement::BoardValidity { commitment };

        let id = {
            let mut registry = self.registry.write().await;
            registry.ensure_free(&caller)?;
            if !self.verifier.verify(&statement, proof) {
                return Err(GameError::InvalidProof);
            }
            registry.create_game(caller)?
        };

        // The id is unpublished until this insert, so the gap is invisible.
        let game = Arc::new(Mutex::new(Game::new(id, caller, commitment)));
        self.games.write().await.insert(id, game);
        info!(game = %id, player = %caller, board = %commitment, "game created");
        Ok(id)
    }

    /// Join an existing game with the caller's board commitment.
    pub async fn join_game(
        &self,
        caller: PlayerId,
        game_id: GameId,
        commitment: Commitment,
        proof: &[u8],
    ) -> Result<(), GameError> {
        let handle = self.handle(game_id).await?;

        // Reserve the binding before touching the game.
        {
            let mut registry = self.registry.write().await;
            registry.ensure_free(&caller)?;
            registry.bind_second(caller, game_id);
        }

        let result = {
            let mut game = handle.lock().await;
            transition::join(&mut game, caller, commitment, &self.verifier, proof)
        };

        if result.is_err() {
            self.registry.write().await.release(&caller);
        } else {
            info!(game = %game_id, player = %caller, board = %commitment, "game joined");
        }
        result
    }

    /// Fire the opening shot. Creator only, once, no proof attached.
    pub async fn first_turn(
        &self,
        caller: PlayerId,
        game_id: GameId,
        shot: Coordinate,
    ) -> Result<(), GameError> {
        let handle = self.handle(game_id).await?;
        let mut game = handle.lock().await;

        transition::opening_shot(&mut game, caller, shot)?;
        debug!(game = %game_id, player = %caller, %shot, "opening shot");
        Ok(())
    }

    /// Resolve the pending shot against the caller's board and fire back.
    pub async fn turn(
        &self,
        caller: PlayerId,
        game_id: GameId,
        hit_claim: bool,
        next_shot: Coordinate,
        proof: &[u8],
    ) -> Result<TurnOutcome, GameError> {
        let handle = self.handle(game_id).await?;
        let mut game = handle.lock().await;

        let outcome = {
            let mut nullifiers = self.nullifiers.lock().await;
            transition::resolve_and_fire(
                &mut game,
                caller,
                hit_claim,
                next_shot,
                proof,
                &self.verifier,
                &mut nullifiers,
            )?
        };
        debug!(game = %game_id, player = %caller, hit = outcome.hit, "shot resolved");

        if let Some(winner) = outcome.winner {
            let mut registry = self.registry.write().await;
            for player in game.players.iter().flatten() {
                registry.release(player);
            }
            info!(game = %game_id, winner = %winner, "game finished");
        }
        Ok(outcome)
    }

    /// Leave the game: cancellation before an opponent joins, forfeit after.
    pub async fn leave_game(
        &self,
        caller: PlayerId,
        game_id: GameId,
    ) -> Result<LeaveOutcome, GameError> {
        let handle = self.handle(game_id).await?;
        let mut game = handle.lock().await;

        let outcome = transition::forfeit(&mut game, caller)?;
        let mut registry = self.registry.write().await;
        match outcome {
            LeaveOutcome::Cancelled => {
                registry.release(&caller);
                info!(game = %game_id, player = %caller, "game cancelled");
            }
            LeaveOutcome::Forfeited { winner } => {
                for player in game.players.iter().flatten() {
                    registry.release(player);
                }
                info!(game = %game_id, player = %caller, winner = %winner, "game forfeited");
            }
        }
        Ok(outcome)
    }

    // -------------------------------------------------------------------------
    // Read surface
    // -------------------------------------------------------------------------

    /// Snapshot a game's public state.
    pub async fn game(&self, game_id: GameId) -> Option<Game> {
        let handle = self.games.read().await.get(&game_id).cloned()?;
        let game = handle.lock().await;
        Some(game.clone())
    }

    /// The game an identity is bound to, or [`GameId::NONE`].
    pub async fn playing(&self, id: &PlayerId) -> GameId {
        self.registry.read().await.playing(id)
    }

    /// Has a shot already been resolved against this board?
    pub async fn shot_consumed(&self, commitment: &Commitment, shot: Coordinate) -> bool {
        self.nullifiers.lock().await.contains(commitment, shot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GamePhase;
    use crate::proof::StubVerifier;

    const PROOF: &[u8] = b"proof";

    fn player(tag: u8) -> PlayerId {
        PlayerId::new([tag; 16])
    }

    fn board(tag: u8) -> Commitment {
        Commitment::new([tag; 32])
    }

    #[tokio::test]
    async fn test_full_lifecycle_through_service() {
        let service = ProtocolService::new(StubVerifier);
        let (alice, bob) = (player(1), player(2));

        let id = service.new_game(alice, board(0xa1), PROOF).await.unwrap();
        service.join_game(bob, id, board(0xb0), PROOF).await.unwrap();
        service.first_turn(alice, id, Coordinate::new(1, 0)).await.unwrap();

        let outcome = service
            .turn(bob, id, true, Coordinate::new(9, 9), PROOF)
            .await
            .unwrap();
        assert!(outcome.hit);

        let game = service.game(id).await.unwrap();
        assert_eq!(game.phase, GamePhase::Active);
        assert_eq!(game.hits_taken, [0, 1]);
        assert!(service.shot_consumed(&board(0xb0), Coordinate::new(1, 0)).await);
    }

    #[tokio::test]
    async fn test_failed_join_rolls_back_reservation() {
        let service = ProtocolService::new(StubVerifier);
        let (alice, bob) = (player(1), player(2));

        let id = service.new_game(alice, board(0xa1), PROOF).await.unwrap();

        // Empty proof fails inside the game transition, after reservation.
        let result = service.join_game(bob, id, board(0xb0), &[]).await;
        assert_eq!(result, Err(GameError::InvalidProof));
        assert_eq!(service.playing(&bob).await, GameId::NONE);

        // The rollback leaves Bob free to join for real.
        service.join_game(bob, id, board(0xb0), PROOF).await.unwrap();
        assert_eq!(service.playing(&bob).await, id);
    }

    #[tokio::test]
    async fn test_forfeit_releases_both_players() {
        let service = ProtocolService::new(StubVerifier);
        let (alice, bob) = (player(1), player(2));

        let id = service.new_game(alice, board(0xa1), PROOF).await.unwrap();
        service.join_game(bob, id, board(0xb0), PROOF).await.unwrap();

        let outcome = service.leave_game(alice, id).await.unwrap();
        assert_eq!(outcome, LeaveOutcome::Forfeited { winner: bob });
        assert_eq!(service.playing(&alice).await, GameId::NONE);
        assert_eq!(service.playing(&bob).await, GameId::NONE);
    }

    #[tokio::test]
    async fn test_independent_games_progress_in_parallel() {
        let service = Arc::new(ProtocolService::new(StubVerifier));

        let mut ids = Vec::new();
        for i in 0u8..4 {
            let creator = player(i * 2 + 1);
            let joiner = player(i * 2 + 2);
            let id = service.new_game(creator, board(i * 2 + 1), PROOF).await.unwrap();
            service.join_game(joiner, id, board(i * 2 + 2), PROOF).await.unwrap();
            service.first_turn(creator, id, Coordinate::new(0, 0)).await.unwrap();
            ids.push((id, creator, joiner));
        }

        let mut tasks = Vec::new();
        for (id, creator, joiner) in ids.clone() {
            let service = Arc::clone(&service);
            tasks.push(tokio::spawn(async move {
                for round in 0u8..8 {
                    service
                        .turn(joiner, id, true, Coordinate::new(round, 1), PROOF)
                        .await
                        .unwrap();
                    service
                        .turn(creator, id, false, Coordinate::new(round + 1, 0), PROOF)
                        .await
                        .unwrap();
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        for (id, _, _) in ids {
            let game = service.game(id).await.unwrap();
            assert_eq!(game.phase, GamePhase::Active);
            assert_eq!(game.hits_taken, [0, 8]);
        }
    }

    #[tokio::test]
    async fn test_concurrent_join_admits_exactly_one() {
        let service = Arc::new(ProtocolService::new(StubVerifier));
        let alice = player(1);

        let id = service.new_game(alice, board(0xa1), PROOF).await.unwrap();

        let mut tasks = Vec::new();
        for i in 0u8..8 {
            let service = Arc::clone(&service);
            tasks.push(tokio::spawn(async move {
                service.join_game(player(10 + i), id, board(10 + i), PROOF).await
            }));
        }

        let mut admitted = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);

        let game = service.game(id).await.unwrap();
        assert_eq!(game.phase, GamePhase::Active);
    }
}

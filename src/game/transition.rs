//! Turn Transitions
//!
//! The pure rules of the adversarial turn protocol. Each function either
//! fully applies or returns a [`GameError`] with the game untouched; every
//! cryptographic gate (nullifier membership, proof verification) is checked
//! before the first mutation.
//!
//! Registry synchronization and logging live one layer up, in the protocol;
//! these functions know only about a single [`Game`] and the capabilities
//! they are handed.

use crate::core::{Coordinate, PlayerId};
use crate::game::{Game, GameError, GamePhase};
use crate::proof::{Commitment, NullifierLedger, ProofVerifier, Statement};

/// Result of an accepted `resolve_and_fire` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Whether the resolved shot was a confirmed hit.
    pub hit: bool,
    /// Winner identity when this turn finished the game.
    pub winner: Option<PlayerId>,
}

/// Result of an accepted `forfeit` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Left before an opponent joined; the game is void.
    Cancelled,
    /// Left an active game; the opponent wins by forfeit.
    Forfeited {
        /// The remaining player.
        winner: PlayerId,
    },
}

/// Bind the second player and activate the game.
///
/// Requires an accepted `BoardValidity` proof for `commitment`. The creator
/// keeps the opening shot: `turn_owner` stays on the first slot.
pub fn join<V: ProofVerifier>(
    game: &mut Game,
    caller: PlayerId,
    commitment: Commitment,
    verifier: &V,
    proof: &[u8],
) -> Result<(), GameError> {
    if game.phase != GamePhase::AwaitingOpponent {
        return Err(GameError::GameNotJoinable);
    }
    if game.players[0] == Some(caller) {
        return Err(GameError::SelfJoin);
    }

    let statement = Statement::BoardValidity { commitment };
    if !verifier.verify(&statement, proof) {
        return Err(GameError::InvalidProof);
    }

    game.players[1] = Some(caller);
    game.commitments[1] = Some(commitment);
    game.phase = GamePhase::Active;
    Ok(())
}

/// Fire the very first shot of the game.
///
/// No proof accompanies the opening shot: there is nothing to resolve yet,
/// so no hit/miss claim is attached and no nullifier is consumed. The shot
/// becomes pending and the opposing slot must resolve it.
pub fn opening_shot(
    game: &mut Game,
    caller: PlayerId,
    shot: Coordinate,
) -> Result<(), GameError> {
    if game.phase.is_terminal() {
        return Err(GameError::GameAlreadyFinished);
    }
    if game.phase != GamePhase::Active {
        return Err(GameError::GameNotJoinable);
    }
    if game.player(game.turn_owner) != Some(caller) {
        return Err(GameError::NotYourTurn);
    }
    if game.pending_shot.is_some() || game.has_hits() {
        return Err(GameError::AlreadyStarted);
    }

    game.pending_shot = Some(shot);
    game.turn_owner = game.turn_owner.opponent();
    Ok(())
}

/// Resolve the pending shot against the caller's own board and fire back.
///
/// The caller is the defender of the pending shot: the `ShotIntegrity`
/// proof binds `(their commitment, the pending shot, hit_claim)`. On
/// acceptance the nullifier is consumed, the hit (if claimed and proven)
/// is counted, and either the game finishes or `next_shot` becomes the new
/// pending shot with the turn handed back.
///
/// `next_shot` is ignored when this resolution sinks the last ship cell.
pub fn resolve_and_fire<V: ProofVerifier>(
    game: &mut Game,
    caller: PlayerId,
    hit_claim: bool,
    next_shot: Coordinate,
    proof: &[u8],
    verifier: &V,
    nullifiers: &mut NullifierLedger,
) -> Result<TurnOutcome, GameError> {
    if game.phase.is_terminal() {
        return Err(GameError::GameAlreadyFinished);
    }
    if game.phase != GamePhase::Active {
        return Err(GameError::GameNotJoinable);
    }

    let defender = game.turn_owner;
    if game.player(defender) != Some(caller) {
        return Err(GameError::NotYourTurn);
    }

    let shot = game.pending_shot.ok_or(GameError::NoPendingShot)?;
    let commitment = game
        .commitment(defender)
        .expect("commitment is bound for every slot of an active game");

    // Security-critical gates, in order, before any mutation.
    if nullifiers.contains(&commitment, shot) {
        return Err(GameError::DuplicateShot);
    }
    let statement = Statement::ShotIntegrity {
        commitment,
        shot,
        hit: hit_claim,
    };
    if !verifier.verify(&statement, proof) {
        return Err(GameError::InvalidProof);
    }

    // Accepted: consume the nullifier and apply the turn.
    nullifiers.insert(&commitment, shot);
    if hit_claim {
        game.hits_taken[defender.index()] += 1;
    }

    if game.hits_remaining(defender) == 0 {
        let winner = game
            .player(defender.opponent())
            .expect("both slots are bound while a game is active");
        game.phase = GamePhase::Finished;
        game.winner = Some(winner);
        game.pending_shot = None;
        return Ok(TurnOutcome {
            hit: true,
            winner: Some(winner),
        });
    }

    game.pending_shot = Some(next_shot);
    game.turn_owner = defender.opponent();
    Ok(TurnOutcome {
        hit: hit_claim,
        winner: None,
    })
}

/// Leave the game.
///
/// Before an opponent joins this cancels the game; afterwards it is a
/// forfeit awarding the remaining player the win. Either player may call
/// this at any time while the game is not terminal.
pub fn forfeit(game: &mut Game, caller: PlayerId) -> Result<LeaveOutcome, GameError> {
    if game.phase.is_terminal() {
        return Err(GameError::GameAlreadyFinished);
    }

    let slot = game.slot_of(&caller).ok_or(GameError::NotInGame)?;

    match game.phase {
        GamePhase::AwaitingOpponent => {
            game.phase = GamePhase::Cancelled;
            Ok(LeaveOutcome::Cancelled)
        }
        GamePhase::Active => {
            let winner = game
                .player(slot.opponent())
                .expect("both slots are bound while a game is active");
            game.phase = GamePhase::Finished;
            game.winner = Some(winner);
            game.pending_shot = None;
            Ok(LeaveOutcome::Forfeited { winner })
        }
        GamePhase::Finished | GamePhase::Cancelled => unreachable!("terminal phases rejected above"),
    }
}

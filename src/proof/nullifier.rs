//! Shot Nullifiers
//!
//! Replay prevention for resolved shots. Once a `(commitment, coordinate)`
//! pair has been resolved by an accepted `ShotIntegrity` proof, its derived
//! nullifier is consumed forever: the same shot can never be resolved twice
//! against the same board, even with a freshly generated proof.
//!
//! Keys are scoped per commitment, so the same coordinate fired at two
//! different boards (in different games) stays independent.

use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};
use sha2::{Sha256, Digest};

use crate::core::Coordinate;
use crate::proof::commitment::Commitment;

/// Domain separator for nullifier derivation.
const NULLIFIER_DOMAIN: &[u8] = b"ZK_BATTLESHIP_NULLIFIER_V1";

/// Derived key marking one `(commitment, coordinate)` resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Nullifier([u8; 32]);

impl Nullifier {
    /// Derive the nullifier for a shot against a committed board.
    pub fn derive(commitment: &Commitment, shot: Coordinate) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(NULLIFIER_DOMAIN);
        hasher.update(commitment.as_bytes());
        hasher.update(shot.to_bytes());
        Self(hasher.finalize().into())
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Nullifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..", hex::encode(&self.0[..4]))
    }
}

/// Append-only set of consumed nullifiers.
///
/// Membership is the sole query; entries are never removed. Entries could
/// be pruned once the owning game reaches a terminal phase, but this ledger
/// keeps them for the life of the process.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NullifierLedger {
    consumed: BTreeSet<Nullifier>,
}

impl NullifierLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Has this `(commitment, coordinate)` pair already been resolved?
    pub fn contains(&self, commitment: &Commitment, shot: Coordinate) -> bool {
        self.consumed.contains(&Nullifier::derive(commitment, shot))
    }

    /// Record a resolution. Returns `false` if the pair was already consumed.
    pub fn insert(&mut self, commitment: &Commitment, shot: Coordinate) -> bool {
        self.consumed.insert(Nullifier::derive(commitment, shot))
    }

    /// Number of consumed entries.
    pub fn len(&self) -> usize {
        self.consumed.len()
    }

    /// Is the ledger empty?
    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty()
    }
}

//! Proof Verification Interface
//!
//! Interface for the external zero-knowledge proof backend. The engine
//! calls `verify` synchronously inside a transition, so implementations
//! must be pure functions of their inputs: no mutation, no cryptographic
//! state carried across calls, and rejection expressed as `false` rather
//! than an error.

use serde::{Serialize, Deserialize};

use crate::core::Coordinate;
use crate::proof::commitment::Commitment;

/// The two circuits the protocol depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Circuit {
    /// All ships in bounds, no overlap, and the commitment hashes the placement.
    BoardValidity,
    /// The hit claim truthfully reflects whether the shot intersects the
    /// placement behind the commitment.
    ShotIntegrity,
}

/// A circuit together with the declared public-input set a proof must bind.
///
/// Private inputs (the placement itself) never appear here; they exist only
/// inside the prover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// `BoardValidity` public inputs.
    BoardValidity {
        /// Commitment to the hidden placement.
        commitment: Commitment,
    },
    /// `ShotIntegrity` public inputs.
    ShotIntegrity {
        /// Commitment to the defender's hidden placement.
        commitment: Commitment,
        /// The shot being resolved.
        shot: Coordinate,
        /// The defender's hit/miss claim.
        hit: bool,
    },
}

impl Statement {
    /// Which circuit this statement belongs to.
    pub fn circuit(&self) -> Circuit {
        match self {
            Statement::BoardValidity { .. } => Circuit::BoardValidity,
            Statement::ShotIntegrity { .. } => Circuit::ShotIntegrity,
        }
    }
}

/// External proof verification capability.
///
/// Consumed, not owned: the engine injects an implementation and trusts its
/// accept/reject answer completely. Correctness of the whole protocol rests
/// on the verifier only accepting proofs whose private witness satisfies
/// the circuit for exactly the public inputs in `statement`.
pub trait ProofVerifier {
    /// Verify a proof against a statement. `false` means rejected.
    fn verify(&self, statement: &Statement, proof: &[u8]) -> bool;
}

/// Stub verifier: accepts any non-empty proof blob.
///
/// Useful for wiring tests and demos where proof generation is out of
/// scope. Replace with a real backend for any adversarial setting.
pub struct StubVerifier;

impl ProofVerifier for StubVerifier {
    fn verify(&self, _statement: &Statement, proof: &[u8]) -> bool {
        !proof.is_empty()
    }
}

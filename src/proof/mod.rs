//! Proof System Boundary
//!
//! Everything cryptographic lives on the far side of this module. The engine
//! consumes three things and interprets none of them:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PROOF BOUNDARY                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  commitment.rs - opaque 256-bit board commitments           │
//! │  verify.rs     - circuits, public inputs, ProofVerifier     │
//! │  nullifier.rs  - replay prevention for resolved shots       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The circuits themselves (board placement validity, shot hit/miss
//! integrity) are external collaborators; the engine only declares the
//! public-input sets it expects them to bind.

pub mod commitment;
pub mod nullifier;
pub mod verify;

pub use commitment::Commitment;
pub use nullifier::{Nullifier, NullifierLedger};
pub use verify::{Circuit, ProofVerifier, Statement, StubVerifier};

//! # ZK Battleship Turn Protocol
//!
//! Adversarial two-player Battleship where boards never leave the players'
//! machines. Each player commits to a hidden fleet; every claim about that
//! fleet is gated by a zero-knowledge proof checked against the commitment,
//! and replayed shots are rejected by per-board nullifiers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ZK BATTLESHIP PROTOCOL                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Shared primitives                      │
//! │  ├── coord.rs      - Board coordinates                      │
//! │  └── identity.rs   - Player identities                      │
//! │                                                              │
//! │  proof/            - Cryptographic gates                     │
//! │  ├── commitment.rs - Opaque board commitments                │
//! │  ├── verify.rs     - Circuits, statements, verifier trait    │
//! │  └── nullifier.rs  - Shot replay prevention                  │
//! │                                                              │
//! │  game/             - State machine (deterministic)           │
//! │  ├── state.rs      - Durable game records                    │
//! │  ├── transition.rs - All-or-nothing turn transitions         │
//! │  └── registry.rs   - One-game-per-player bookkeeping         │
//! │                                                              │
//! │  protocol/         - Operation surface                       │
//! │  ├── mod.rs        - Sequential TurnProtocol                 │
//! │  └── service.rs    - Async per-game-locked service           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trust Model
//!
//! The protocol never learns ship placements. It trusts only:
//! - the binding and hiding of the commitments,
//! - the soundness of the two circuits behind [`proof::ProofVerifier`],
//! - its own nullifier ledger, which is append-only and never pruned.
//!
//! Everything else, including hit/miss claims, is adversarial input and is
//! rejected without state change unless proven.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod proof;
pub mod protocol;

// Re-export commonly used types
pub use crate::core::{Coordinate, PlayerId};
pub use game::{Game, GameError, GameId, GamePhase, LeaveOutcome, PlayerSlot, TurnOutcome};
pub use proof::{Commitment, Nullifier, NullifierLedger, ProofVerifier, Statement, StubVerifier};
pub use protocol::service::ProtocolService;
pub use protocol::TurnProtocol;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Board side length; coordinates range over `0..BOARD_SIZE` on each axis.
pub const BOARD_SIZE: u8 = 10;

/// Fleet composition, longest ship first.
pub const SHIP_LENGTHS: [u8; 5] = [5, 4, 3, 3, 2];

/// Total occupied cells across the fleet; confirming this many hits against
/// one board ends the game.
pub const TOTAL_SHIP_CELLS: u8 = 17;

//! Board Commitments
//!
//! A commitment is the only thing the engine ever learns about a board:
//! an opaque 256-bit hash produced off-process by the player's prover.
//! It is compared for equality, used as a lookup key, and fed to the
//! verifier as a public input. It is never interpreted.

use serde::{Serialize, Deserialize};

/// Opaque 256-bit commitment binding a player to a hidden board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Commitment([u8; 32]);

impl Commitment {
    /// Wrap raw commitment bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..", hex::encode(&self.0[..4]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_only() {
        let a = Commitment::new([7; 32]);
        let b = Commitment::new([7; 32]);
        let c = Commitment::new([8; 32]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_is_short() {
        let c = Commitment::new([0xab; 32]);
        assert_eq!(c.to_string(), "abababab..");
    }
}

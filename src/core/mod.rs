//! Core Primitives
//!
//! Small deterministic value types shared by every layer:
//! board coordinates and player identities. Both implement `Ord`
//! so the registries can use `BTreeMap` with stable iteration order.

pub mod coord;
pub mod identity;

pub use coord::Coordinate;
pub use identity::PlayerId;

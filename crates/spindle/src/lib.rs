//! Geometry and planning for a roulette-style wheel: equal-angle wedge
//! partitioning, pointer-to-wedge resolution, and randomized spin planning.
//!
//! Everything here is pure and deterministic once a [`TurnSource`] is
//! injected; the stateful spin lifecycle lives in the application crate.

pub mod angle;
pub mod item;
mod macros;
pub mod planner;
pub mod wedge;

pub use item::{Item, ItemError, ItemId, Title};
pub use planner::{FixedTurns, RandomTurns, TurnBounds, TurnSource};
pub use wedge::{Pointer, WedgeRange, WheelError, partition, resolve};

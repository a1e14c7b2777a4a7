use crate::angle::FULL_TURN;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub const MIN_TURNS: f64 = 20.0;
pub const MAX_TURNS: f64 = 30.0;

#[derive(Debug, Error, PartialEq)]
#[error("turn bounds must satisfy 0 < min <= max and be finite, got {min}..={max}")]
pub struct BoundsError {
    min: f64,
    max: f64,
}

/// Closed interval of whole turns a single spin may cover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnBounds {
    min: f64,
    max: f64,
}

impl TurnBounds {
    pub fn new(min: f64, max: f64) -> Result<Self, BoundsError> {
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(BoundsError { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for TurnBounds {
    fn default() -> Self {
        Self {
            min: MIN_TURNS,
            max: MAX_TURNS,
        }
    }
}

/// Uniform source of turn multipliers. Injected into the engine so tests
/// can force deterministic spins.
pub trait TurnSource {
    /// Draws a multiplier from the closed interval described by `bounds`.
    fn multiplier(&mut self, bounds: TurnBounds) -> f64;
}

/// Production source backed by the standard RNG.
pub struct RandomTurns(StdRng);

impl RandomTurns {
    pub fn new() -> Self {
        Self(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomTurns {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnSource for RandomTurns {
    fn multiplier(&mut self, bounds: TurnBounds) -> f64 {
        self.0.random_range(bounds.min()..=bounds.max())
    }
}

/// Source that always returns the same multiplier, for scripted spins.
pub struct FixedTurns(pub f64);

impl TurnSource for FixedTurns {
    fn multiplier(&mut self, _bounds: TurnBounds) -> f64 {
        self.0
    }
}

/// Plans the rotation delta for one spin: a random number of whole turns,
/// strictly positive, so the wheel only ever spins forward.
pub fn plan(source: &mut dyn TurnSource, bounds: TurnBounds) -> f64 {
    source.multiplier(bounds) * FULL_TURN
}

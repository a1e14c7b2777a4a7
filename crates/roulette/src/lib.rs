//! Spin a wheel of labeled items and let a fixed pointer pick the winner
//! after a timed deceleration.

pub mod app;
pub mod config;
pub mod engine;
pub mod events;
pub mod store;
pub mod sys;

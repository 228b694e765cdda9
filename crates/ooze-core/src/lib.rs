//! Core types shared by the ooze crates.
//!
//! Holds the tunable constants, the configuration structs built from them,
//! surface geometry and the frame clock that drives the particle phases.

mod clock;
mod config;
mod filter;
mod geometry;

pub use clock::{Phase, SimClock};
pub use config::*;
pub use filter::FilterChain;
pub use geometry::{Bounds, Viewport};

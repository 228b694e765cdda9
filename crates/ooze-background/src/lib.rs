//! Animated blob background for the ooze terminal app.
//!
//! Two independent simulations each own one drawing surface: a swarm of
//! particles rendered as soft radial gradients that fuse under a
//! blur-plus-contrast filter, and a slow layer of translucent fog blobs under
//! a plain blur. [`FxContext`] owns both and composites them into a ratatui
//! frame.

mod color;
mod error;
mod filter;
mod fog;
mod forces;
mod gradient;
mod motion;
mod particle;
mod raster;
mod schedule;
mod state;

pub use color::mercury_shade;
pub use error::FxError;
pub use filter::apply_filter;
pub use fog::{FogBlob, FogField};
pub use forces::apply_pair_forces;
pub use gradient::{GradientStop, PARTICLE_STOPS, RadialGradient, fog_stops};
pub use motion::{bounce, clamp_speed, speed};
pub use particle::{Particle, ParticleField};
pub use raster::{Rgba, Surface, composite};
pub use schedule::{FrameTicker, ResizeDebouncer};
pub use state::FxContext;

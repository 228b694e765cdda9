//! Tunable constants and the configuration structs seeded from them.

use serde::{Deserialize, Serialize};

use crate::FilterChain;

// Particle spawn
pub const PARTICLE_COUNT: usize = 12;
pub const MIN_RADIUS: f32 = 65.0;
pub const MAX_RADIUS: f32 = 115.0;
pub const MIN_SPEED: f32 = 0.60;
pub const MAX_SPEED: f32 = 1.40;

// Particle motion
pub const MAX_SPEED_CAP: f32 = 1.80;
/// Applied every frame. 1.0 would be frictionless.
pub const FRICTION: f32 = 0.997;
pub const WANDER_STRENGTH: f32 = 0.040;
/// Largest wander-angle change per frame, in radians.
pub const WANDER_DELTA: f32 = 0.080;

// Particle forces
pub const CENTER_GRAVITY: f32 = 0.025;
/// Fraction of width/height near each edge where the extra push applies.
pub const EDGE_ZONE: f32 = 0.05;
pub const EDGE_REPULSE: f32 = 0.08;
pub const ATTRACT_RADIUS: f32 = 450.0;
pub const ATTRACT_FORCE: f32 = 0.08;
/// Pairs repel while closer than `(ra + rb) * REPEL_RADIUS_FACTOR`.
pub const REPEL_RADIUS_FACTOR: f32 = 2.4;
pub const REPEL_FORCE: f32 = 0.22;
/// About four seconds at 60 fps.
pub const ATTRACT_PHASE_FRAMES: u64 = 240;
pub const ATTRACT_SPEED_MULTIPLIER: f32 = 2.2;
pub const ATTRACT_GRAVITY_MULTIPLIER: f32 = 2.5;

// Particle rescue
pub const MIN_SPEED_ENFORCE: f32 = 0.25;
pub const CENTER_KICK: f32 = 0.45;
/// Peak-to-peak random jitter added per axis by the rescue kick.
pub const RESCUE_JITTER: f32 = 0.30;

// Particle render
pub const BLOB_RADIUS_FACTOR: f32 = 3.5;
pub const FILTER_BLUR: f32 = 28.0;
pub const FILTER_CONTRAST: f32 = 12.0;
pub const FILTER_BRIGHTNESS: f32 = 1.15;

// Fog spawn
pub const FOG_COUNT: usize = 5;
pub const FOG_MIN_RADIUS: f32 = 180.0;
pub const FOG_MAX_RADIUS: f32 = 380.0;
pub const FOG_OPACITY_MIN: f32 = 0.05;
pub const FOG_OPACITY_MAX: f32 = 0.11;

// Fog motion and render
pub const FOG_SPEED: f32 = 0.10;
pub const FOG_SPEED_CAP_FACTOR: f32 = 1.5;
pub const FOG_WANDER: f32 = 0.015;
pub const FOG_WANDER_STRENGTH: f32 = 0.004;
pub const FOG_FRICTION: f32 = 0.998;
pub const FOG_CENTER_GRAVITY: f32 = 0.005;
pub const FOG_BLUR: f32 = 100.0;
pub const FOG_BRIGHTNESS: f32 = 0.9;

// Host
pub const CELL_WIDTH_PX: u16 = 10;
pub const CELL_HEIGHT_PX: u16 = 20;
pub const PARTICLE_FPS: u32 = 60;
pub const FOG_FPS: u32 = 60;
pub const RESIZE_DEBOUNCE_MS: u64 = 150;

/// Spawn, motion and force parameters for the particle swarm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub max_speed_cap: f32,
    pub friction: f32,
    pub wander_strength: f32,
    pub wander_delta: f32,
    pub center_gravity: f32,
    pub edge_zone: f32,
    pub edge_repulse: f32,
    pub attract_radius: f32,
    pub attract_force: f32,
    pub repel_radius_factor: f32,
    pub repel_force: f32,
    pub attract_phase_frames: u64,
    pub attract_speed_multiplier: f32,
    pub attract_gravity_multiplier: f32,
    pub min_speed_enforce: f32,
    pub center_kick: f32,
    pub rescue_jitter: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            max_speed_cap: MAX_SPEED_CAP,
            friction: FRICTION,
            wander_strength: WANDER_STRENGTH,
            wander_delta: WANDER_DELTA,
            center_gravity: CENTER_GRAVITY,
            edge_zone: EDGE_ZONE,
            edge_repulse: EDGE_REPULSE,
            attract_radius: ATTRACT_RADIUS,
            attract_force: ATTRACT_FORCE,
            repel_radius_factor: REPEL_RADIUS_FACTOR,
            repel_force: REPEL_FORCE,
            attract_phase_frames: ATTRACT_PHASE_FRAMES,
            attract_speed_multiplier: ATTRACT_SPEED_MULTIPLIER,
            attract_gravity_multiplier: ATTRACT_GRAVITY_MULTIPLIER,
            min_speed_enforce: MIN_SPEED_ENFORCE,
            center_kick: CENTER_KICK,
            rescue_jitter: RESCUE_JITTER,
        }
    }
}

impl ParticleConfig {
    /// Speed cap for a frame running in the given phase.
    pub fn speed_cap(&self, phase: crate::Phase) -> f32 {
        if phase.is_attract() {
            self.max_speed_cap * self.attract_speed_multiplier
        } else {
            self.max_speed_cap
        }
    }

    /// Center gravity multiplier for a frame running in the given phase.
    pub fn gravity_multiplier(&self, phase: crate::Phase) -> f32 {
        if phase.is_attract() {
            self.attract_gravity_multiplier
        } else {
            1.0
        }
    }
}

/// Spawn and motion parameters for the fog layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub opacity_min: f32,
    pub opacity_max: f32,
    pub speed: f32,
    pub speed_cap_factor: f32,
    pub wander: f32,
    pub wander_strength: f32,
    pub friction: f32,
    pub center_gravity: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            count: FOG_COUNT,
            min_radius: FOG_MIN_RADIUS,
            max_radius: FOG_MAX_RADIUS,
            opacity_min: FOG_OPACITY_MIN,
            opacity_max: FOG_OPACITY_MAX,
            speed: FOG_SPEED,
            speed_cap_factor: FOG_SPEED_CAP_FACTOR,
            wander: FOG_WANDER,
            wander_strength: FOG_WANDER_STRENGTH,
            friction: FOG_FRICTION,
            center_gravity: FOG_CENTER_GRAVITY,
        }
    }
}

impl FogConfig {
    pub fn speed_cap(&self) -> f32 {
        self.speed * self.speed_cap_factor
    }
}

/// Drawing, filter and scheduling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub blob_radius_factor: f32,
    pub particle_filter: FilterChain,
    pub fog_filter: FilterChain,
    /// Pixel width of one terminal cell.
    pub cell_width_px: u16,
    /// Pixel height of one terminal cell. Each cell holds two samples.
    pub cell_height_px: u16,
    pub particle_fps: u32,
    pub fog_fps: u32,
    pub resize_debounce_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            blob_radius_factor: BLOB_RADIUS_FACTOR,
            particle_filter: FilterChain::new(FILTER_BLUR, FILTER_CONTRAST, FILTER_BRIGHTNESS),
            fog_filter: FilterChain::new(FOG_BLUR, 1.0, FOG_BRIGHTNESS),
            cell_width_px: CELL_WIDTH_PX,
            cell_height_px: CELL_HEIGHT_PX,
            particle_fps: PARTICLE_FPS,
            fog_fps: FOG_FPS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

/// Full configuration of one background instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    pub particles: ParticleConfig,
    pub fog: FogConfig,
    pub render: RenderConfig,
    /// Fixed random seed. A time-based seed is used when absent.
    pub seed: Option<u64>,
}

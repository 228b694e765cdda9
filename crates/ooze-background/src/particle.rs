//! Particle swarm: disks with wander, center gravity, edge push, a rescue
//! kick against stalling, and wall bounce.

use std::f32::consts::TAU;

use ooze_core::{Bounds, ParticleConfig, Phase, SimClock};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, info};

use crate::forces::apply_pair_forces;
use crate::motion::{bounce, clamp_speed, normalized_offset_to_center, speed};

/// A single blob in the swarm.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Radius in pixels, fixed for the particle's lifetime.
    pub r: f32,
    pub vx: f32,
    pub vy: f32,
    /// Wander heading in radians.
    pub wander: f32,
}

impl Particle {
    /// Create a particle with a random wander heading.
    pub fn new<R: Rng + ?Sized>(x: f32, y: f32, r: f32, vx: f32, vy: f32, rng: &mut R) -> Self {
        Self {
            x,
            y,
            r,
            vx,
            vy,
            wander: rng.random::<f32>() * TAU,
        }
    }

    /// Random radius, position inside `bounds` and velocity.
    pub fn spawn<R: Rng + ?Sized>(bounds: Bounds, config: &ParticleConfig, rng: &mut R) -> Self {
        let r = config.min_radius + rng.random::<f32>() * (config.max_radius - config.min_radius);
        let x = r + rng.random::<f32>() * (bounds.w - r * 2.0);
        let y = r + rng.random::<f32>() * (bounds.h - r * 2.0);
        let spd = config.min_speed + rng.random::<f32>() * (config.max_speed - config.min_speed);
        let ang = rng.random::<f32>() * TAU;
        Self::new(x, y, r, ang.cos() * spd, ang.sin() * spd, rng)
    }

    pub fn speed(&self) -> f32 {
        speed(self.vx, self.vy)
    }

    /// Advance one frame.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        bounds: Bounds,
        phase: Phase,
        config: &ParticleConfig,
        rng: &mut R,
    ) {
        self.steer(bounds, phase, config, rng);
        self.clamp_speed(config.speed_cap(phase));
        self.rescue(bounds, config, rng);
        self.x += self.vx;
        self.y += self.vy;
        self.bounce(bounds);
    }

    /// Wander, friction, center gravity and edge push.
    pub fn steer<R: Rng + ?Sized>(
        &mut self,
        bounds: Bounds,
        phase: Phase,
        config: &ParticleConfig,
        rng: &mut R,
    ) {
        self.wander += (rng.random::<f32>() - 0.5) * config.wander_delta;
        self.vx += self.wander.cos() * config.wander_strength;
        self.vy += self.wander.sin() * config.wander_strength;

        self.vx *= config.friction;
        self.vy *= config.friction;

        let (to_cx, to_cy) = normalized_offset_to_center(self.x, self.y, bounds);
        let gravity = config.center_gravity * config.gravity_multiplier(phase);
        self.vx += to_cx * gravity;
        self.vy += to_cy * gravity;

        // Fixed push, not scaled by how deep into the margin the particle is.
        let edge_x = bounds.w * config.edge_zone;
        let edge_y = bounds.h * config.edge_zone;
        if self.x < edge_x {
            self.vx += config.edge_repulse;
        } else if self.x > bounds.w - edge_x {
            self.vx -= config.edge_repulse;
        }
        if self.y < edge_y {
            self.vy += config.edge_repulse;
        } else if self.y > bounds.h - edge_y {
            self.vy -= config.edge_repulse;
        }
    }

    pub fn clamp_speed(&mut self, cap: f32) {
        clamp_speed(&mut self.vx, &mut self.vy, cap);
    }

    /// Kick the particle toward the center when it has nearly stopped.
    ///
    /// Returns whether the kick was applied.
    pub fn rescue<R: Rng + ?Sized>(
        &mut self,
        bounds: Bounds,
        config: &ParticleConfig,
        rng: &mut R,
    ) -> bool {
        if self.speed() >= config.min_speed_enforce {
            return false;
        }
        let (cx, cy) = bounds.center();
        let dx = cx - self.x;
        let dy = cy - self.y;
        let mut len = speed(dx, dy);
        if len == 0.0 {
            len = 1.0;
        }
        let jitter_x = (rng.random::<f32>() - 0.5) * config.rescue_jitter;
        let jitter_y = (rng.random::<f32>() - 0.5) * config.rescue_jitter;
        self.vx += dx / len * config.center_kick + jitter_x;
        self.vy += dy / len * config.center_kick + jitter_y;
        true
    }

    pub fn bounce(&mut self, bounds: Bounds) {
        bounce(&mut self.x, &mut self.y, &mut self.vx, &mut self.vy, self.r, bounds);
    }

    /// Pull the particle back inside after the bounds shrank.
    ///
    /// Only the far edges move on resize, so only those are checked.
    pub fn clamp_to(&mut self, bounds: Bounds) {
        if self.x + self.r > bounds.w {
            self.x = bounds.w - self.r;
        }
        if self.y + self.r > bounds.h {
            self.y = bounds.h - self.r;
        }
    }
}

/// The particle swarm with its frame clock and random stream.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    clock: SimClock,
    config: ParticleConfig,
    rng: SmallRng,
    repel_logged: bool,
}

impl ParticleField {
    /// Spawn `config.count` particles inside `bounds`.
    pub fn new(config: ParticleConfig, bounds: Bounds, seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(config.count),
            clock: SimClock::new(),
            config,
            rng: SmallRng::seed_from_u64(seed),
            repel_logged: false,
        };
        field.respawn(bounds);
        field
    }

    /// Replace every particle with a fresh random one.
    pub fn respawn(&mut self, bounds: Bounds) {
        self.particles.clear();
        for _ in 0..self.config.count {
            let particle = Particle::spawn(bounds, &self.config, &mut self.rng);
            self.particles.push(particle);
        }
        info!(count = self.particles.len(), w = bounds.w, h = bounds.h, "spawned particles");
    }

    /// Advance the clock one frame, run the pair forces and update every
    /// particle. Returns the phase the frame ran in.
    pub fn step(&mut self, bounds: Bounds) -> Phase {
        let phase = self.clock.advance(self.config.attract_phase_frames);
        if phase == Phase::Repel && !self.repel_logged {
            self.repel_logged = true;
            info!(frame = self.clock.frame(), "particles switched to repel phase");
        }

        apply_pair_forces(&mut self.particles, phase, &self.config);
        for particle in &mut self.particles {
            particle.update(bounds, phase, &self.config, &mut self.rng);
        }
        phase
    }

    /// Clamp every particle into freshly resized bounds.
    pub fn clamp_to(&mut self, bounds: Bounds) {
        for particle in &mut self.particles {
            particle.clamp_to(bounds);
        }
        debug!(w = bounds.w, h = bounds.h, "clamped particles to new bounds");
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clock(&self) -> SimClock {
        self.clock
    }
}

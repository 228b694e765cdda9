//! Fog layer: large, faint blobs drifting slowly with no interaction.

use std::f32::consts::TAU;

use ooze_core::{Bounds, FogConfig};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::info;

use crate::motion::{bounce, clamp_speed, normalized_offset_to_center};

/// A translucent fog blob.
#[derive(Debug, Clone, PartialEq)]
pub struct FogBlob {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    /// Peak alpha at the blob center, fixed at spawn.
    pub opacity: f32,
    pub vx: f32,
    pub vy: f32,
    pub wander: f32,
}

impl FogBlob {
    /// Create a blob with a random heading and a speed between half and all
    /// of the configured fog speed.
    pub fn new<R: Rng + ?Sized>(
        x: f32,
        y: f32,
        r: f32,
        opacity: f32,
        config: &FogConfig,
        rng: &mut R,
    ) -> Self {
        let wander = rng.random::<f32>() * TAU;
        let spd = config.speed * (0.5 + rng.random::<f32>() * 0.5);
        let ang = rng.random::<f32>() * TAU;
        Self {
            x,
            y,
            r,
            opacity,
            vx: ang.cos() * spd,
            vy: ang.sin() * spd,
            wander,
        }
    }

    pub fn spawn<R: Rng + ?Sized>(bounds: Bounds, config: &FogConfig, rng: &mut R) -> Self {
        let r = config.min_radius + rng.random::<f32>() * (config.max_radius - config.min_radius);
        let x = r + rng.random::<f32>() * (bounds.w - r * 2.0);
        let y = r + rng.random::<f32>() * (bounds.h - r * 2.0);
        let opacity =
            config.opacity_min + rng.random::<f32>() * (config.opacity_max - config.opacity_min);
        Self::new(x, y, r, opacity, config, rng)
    }

    /// Advance one frame.
    pub fn update<R: Rng + ?Sized>(&mut self, bounds: Bounds, config: &FogConfig, rng: &mut R) {
        self.wander += (rng.random::<f32>() - 0.5) * config.wander;
        self.vx += self.wander.cos() * config.wander_strength;
        self.vy += self.wander.sin() * config.wander_strength;

        self.vx *= config.friction;
        self.vy *= config.friction;

        clamp_speed(&mut self.vx, &mut self.vy, config.speed_cap());

        // Gravity comes after the clamp, so the speed can sit slightly above
        // the cap until the next frame.
        let (to_cx, to_cy) = normalized_offset_to_center(self.x, self.y, bounds);
        self.vx += to_cx * config.center_gravity;
        self.vy += to_cy * config.center_gravity;

        self.x += self.vx;
        self.y += self.vy;

        bounce(&mut self.x, &mut self.y, &mut self.vx, &mut self.vy, self.r, bounds);
    }
}

/// All fog blobs and their random stream. Has no frame clock.
#[derive(Debug, Clone)]
pub struct FogField {
    blobs: Vec<FogBlob>,
    config: FogConfig,
    rng: SmallRng,
}

impl FogField {
    pub fn new(config: FogConfig, bounds: Bounds, seed: u64) -> Self {
        let mut field = Self {
            blobs: Vec::with_capacity(config.count),
            config,
            rng: SmallRng::seed_from_u64(seed),
        };
        field.respawn(bounds);
        field
    }

    pub fn respawn(&mut self, bounds: Bounds) {
        self.blobs.clear();
        for _ in 0..self.config.count {
            let blob = FogBlob::spawn(bounds, &self.config, &mut self.rng);
            self.blobs.push(blob);
        }
        info!(count = self.blobs.len(), "spawned fog blobs");
    }

    pub fn step(&mut self, bounds: Bounds) {
        for blob in &mut self.blobs {
            blob.update(bounds, &self.config, &mut self.rng);
        }
    }

    pub fn blobs(&self) -> &[FogBlob] {
        &self.blobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_ranges() {
        let config = FogConfig::default();
        let bounds = Bounds::new(1600.0, 1000.0);
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..100 {
            let blob = FogBlob::spawn(bounds, &config, &mut rng);
            assert!(blob.r >= config.min_radius && blob.r <= config.max_radius);
            assert!(blob.opacity >= config.opacity_min && blob.opacity <= config.opacity_max);
            assert!(bounds.contains_disk(blob.x, blob.y, blob.r));
            let speed = (blob.vx * blob.vx + blob.vy * blob.vy).sqrt();
            assert!(speed >= config.speed * 0.5 - 1e-5 && speed <= config.speed + 1e-5);
        }
    }

    #[test]
    fn test_opacity_and_radius_constant() {
        let bounds = Bounds::new(1600.0, 1000.0);
        let mut field = FogField::new(FogConfig::default(), bounds, 4);
        let before: Vec<(f32, f32)> = field.blobs().iter().map(|b| (b.r, b.opacity)).collect();
        for _ in 0..500 {
            field.step(bounds);
        }
        let after: Vec<(f32, f32)> = field.blobs().iter().map(|b| (b.r, b.opacity)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_containment_over_many_frames() {
        let bounds = Bounds::new(1600.0, 1000.0);
        let mut field = FogField::new(FogConfig::default(), bounds, 21);
        for _ in 0..3_000 {
            field.step(bounds);
            for b in field.blobs() {
                assert!(b.x >= b.r && b.x <= bounds.w - b.r);
                assert!(b.y >= b.r && b.y <= bounds.h - b.r);
            }
        }
    }

    #[test]
    fn test_oversized_blobs_hold_still_on_short_axis() {
        // An 80x24 terminal: most fog disks are taller than 480 px.
        let bounds = Bounds::new(800.0, 480.0);
        let mut field = FogField::new(FogConfig::default(), bounds, 1);
        field.step(bounds);
        let mut previous: Vec<FogBlob> = field.blobs().to_vec();
        for _ in 0..60 {
            field.step(bounds);
            for (before, after) in previous.iter().zip(field.blobs()) {
                assert!((after.x - before.x).abs() <= 0.5);
                assert!((after.y - before.y).abs() <= 0.5);
                if after.r * 2.0 > bounds.h {
                    assert_eq!(after.y, bounds.h / 2.0);
                }
            }
            previous = field.blobs().to_vec();
        }
    }

    #[test]
    fn test_speed_stays_near_cap() {
        let config = FogConfig::default();
        let bounds = Bounds::new(1600.0, 1000.0);
        let mut field = FogField::new(config.clone(), bounds, 8);
        for _ in 0..1_000 {
            field.step(bounds);
            for b in field.blobs() {
                let speed = (b.vx * b.vx + b.vy * b.vy).sqrt();
                // Cap plus one frame of gravity.
                assert!(speed <= config.speed_cap() + config.center_gravity + 1e-5);
            }
        }
    }
}

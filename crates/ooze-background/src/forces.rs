//! Pairwise attraction and repulsion between particles.

use ooze_core::{ParticleConfig, Phase};

use crate::particle::Particle;

/// Apply one frame of pair forces.
///
/// Visits every unordered pair, so the cost is O(n²). That is fine for the
/// dozen or so particles the background uses (66 pairs at 12); revisit the
/// pairing strategy before raising the count by an order of magnitude.
///
/// Each pair receives equal and opposite impulses. In [`Phase::Attract`]
/// pairs closer than `attract_radius` pull together with a force falling off
/// linearly to zero at that radius. In [`Phase::Repel`] pairs closer than
/// `(ra + rb) * repel_radius_factor` push apart, scaled by how deep they are
/// inside that threshold.
pub fn apply_pair_forces(particles: &mut [Particle], phase: Phase, config: &ParticleConfig) {
    for i in 0..particles.len() {
        let (head, tail) = particles.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            let (ix, iy) = pair_impulse(a, b, phase, config);
            a.vx += ix;
            a.vy += iy;
            b.vx -= ix;
            b.vy -= iy;
        }
    }
}

/// Impulse applied to `a`; `b` receives the negation.
pub(crate) fn pair_impulse(
    a: &Particle,
    b: &Particle,
    phase: Phase,
    config: &ParticleConfig,
) -> (f32, f32) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut dist = (dx * dx + dy * dy).sqrt();
    if dist == 0.0 {
        dist = 1.0;
    }
    let nx = dx / dist;
    let ny = dy / dist;

    match phase {
        Phase::Attract => {
            if dist < config.attract_radius {
                let f = config.attract_force * (1.0 - dist / config.attract_radius);
                (nx * f, ny * f)
            } else {
                (0.0, 0.0)
            }
        }
        Phase::Repel => {
            let repel_dist = (a.r + b.r) * config.repel_radius_factor;
            if dist < repel_dist {
                let f = config.repel_force * (1.0 - dist / repel_dist);
                (-nx * f, -ny * f)
            } else {
                (0.0, 0.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(x: f32, y: f32, r: f32) -> Particle {
        Particle {
            x,
            y,
            r,
            vx: 0.0,
            vy: 0.0,
            wander: 0.0,
        }
    }

    #[test]
    fn test_attract_pulls_together() {
        let config = ParticleConfig::default();
        let mut pair = [particle(100.0, 100.0, 70.0), particle(325.0, 100.0, 70.0)];
        apply_pair_forces(&mut pair, Phase::Attract, &config);
        // Halfway through the attract radius: half the force.
        assert!((pair[0].vx - config.attract_force * 0.5).abs() < 1e-6);
        assert!((pair[1].vx + config.attract_force * 0.5).abs() < 1e-6);
        assert_eq!(pair[0].vy, 0.0);
    }

    #[test]
    fn test_attract_ignores_far_pairs() {
        let config = ParticleConfig::default();
        let mut pair = [particle(0.0, 0.0, 70.0), particle(500.0, 0.0, 70.0)];
        apply_pair_forces(&mut pair, Phase::Attract, &config);
        assert_eq!((pair[0].vx, pair[1].vx), (0.0, 0.0));
    }

    #[test]
    fn test_repel_pushes_apart() {
        let config = ParticleConfig::default();
        // Threshold is (70 + 80) * 2.4 = 360.
        let mut pair = [particle(100.0, 200.0, 70.0), particle(100.0, 290.0, 80.0)];
        apply_pair_forces(&mut pair, Phase::Repel, &config);
        let expected = config.repel_force * (1.0 - 90.0 / 360.0);
        assert!((pair[0].vy + expected).abs() < 1e-6);
        assert!((pair[1].vy - expected).abs() < 1e-6);
    }

    #[test]
    fn test_repel_ignores_distant_pairs() {
        let config = ParticleConfig::default();
        let mut pair = [particle(0.0, 0.0, 70.0), particle(400.0, 0.0, 80.0)];
        apply_pair_forces(&mut pair, Phase::Repel, &config);
        assert_eq!((pair[0].vx, pair[1].vx), (0.0, 0.0));
    }

    #[test]
    fn test_coincident_particles_stay_finite() {
        let config = ParticleConfig::default();
        for phase in [Phase::Attract, Phase::Repel] {
            let mut pair = [particle(50.0, 50.0, 70.0), particle(50.0, 50.0, 70.0)];
            apply_pair_forces(&mut pair, phase, &config);
            for p in &pair {
                assert!(p.vx.is_finite() && p.vy.is_finite());
            }
        }
    }

    #[test]
    fn test_impulses_are_exact_negations() {
        let config = ParticleConfig::default();
        let a = particle(120.0, 340.0, 90.0);
        let b = particle(260.0, 410.0, 75.0);
        for phase in [Phase::Attract, Phase::Repel] {
            let mut pair = [a.clone(), b.clone()];
            apply_pair_forces(&mut pair, phase, &config);
            assert_eq!(pair[0].vx, -pair[1].vx);
            assert_eq!(pair[0].vy, -pair[1].vy);
        }
    }
}

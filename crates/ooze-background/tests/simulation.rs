use ooze_background::{FogField, FxContext, Particle, ParticleField, apply_pair_forces};
use ooze_core::{Bounds, FogConfig, FxConfig, ParticleConfig, Phase, Viewport};
use rand::{SeedableRng, rngs::SmallRng};

fn snapshot(field: &ParticleField) -> Vec<(f32, f32, f32, f32)> {
    field
        .particles()
        .iter()
        .map(|p| (p.x, p.y, p.vx, p.vy))
        .collect()
}

#[test]
fn test_same_seed_reproduces_every_frame() {
    let bounds = Bounds::new(1400.0, 900.0);
    let mut a = ParticleField::new(ParticleConfig::default(), bounds, 0xDEC0DE);
    let mut b = ParticleField::new(ParticleConfig::default(), bounds, 0xDEC0DE);
    let mut fog_a = FogField::new(FogConfig::default(), bounds, 77);
    let mut fog_b = FogField::new(FogConfig::default(), bounds, 77);
    for _ in 0..600 {
        a.step(bounds);
        b.step(bounds);
        fog_a.step(bounds);
        fog_b.step(bounds);
        assert_eq!(snapshot(&a), snapshot(&b));
        assert_eq!(fog_a.blobs(), fog_b.blobs());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let bounds = Bounds::new(1400.0, 900.0);
    let a = ParticleField::new(ParticleConfig::default(), bounds, 1);
    let b = ParticleField::new(ParticleConfig::default(), bounds, 2);
    assert_ne!(snapshot(&a), snapshot(&b));
}

#[test]
fn test_context_runs_are_deterministic() {
    let config = FxConfig::default();
    let viewport = Viewport::new(100, 40);
    let mut a = FxContext::new(&config, viewport, 99).expect("context");
    let mut b = FxContext::new(&config, viewport, 99).expect("context");
    for frame in 0..300 {
        a.tick_particles();
        b.tick_particles();
        if frame % 2 == 0 {
            a.tick_fog();
            b.tick_fog();
        }
    }
    assert_eq!(a.particles().particles(), b.particles().particles());
    assert_eq!(a.fog().blobs(), b.fog().blobs());
}

#[test]
fn test_phase_switches_once_and_stays() {
    let config = FxConfig::default();
    let threshold = config.particles.attract_phase_frames;
    let mut ctx = FxContext::new(&config, Viewport::new(120, 40), 5).expect("context");
    let mut switched_at = None;
    for _ in 0..(threshold * 3) {
        let phase = ctx.tick_particles();
        let frame = ctx.particles().clock().frame();
        match (phase, switched_at) {
            (Phase::Repel, None) => switched_at = Some(frame),
            (Phase::Attract, Some(at)) => panic!("attract at frame {frame} after repel at {at}"),
            _ => {}
        }
    }
    assert_eq!(switched_at, Some(threshold));
}

#[test]
fn test_particles_stay_contained_through_both_phases() {
    let config = FxConfig::default();
    let mut ctx = FxContext::new(&config, Viewport::new(90, 35), 1234).expect("context");
    for _ in 0..1_500 {
        ctx.tick_particles();
        let bounds = ctx.bounds();
        for p in ctx.particles().particles() {
            assert!(p.r <= p.x && p.x <= bounds.w - p.r, "{p:?}");
            assert!(p.r <= p.y && p.y <= bounds.h - p.r, "{p:?}");
        }
    }
}

#[test]
fn test_resize_to_smaller_bounds_keeps_particles_inside() {
    let config = FxConfig::default();
    let mut ctx = FxContext::new(&config, Viewport::new(200, 60), 8).expect("context");
    for _ in 0..120 {
        ctx.tick_particles();
        ctx.tick_fog();
    }
    let before = ctx.bounds();
    ctx.resize(Viewport::new(80, 30)).expect("resize");
    let after = ctx.bounds();
    assert!(after.w < before.w && after.h < before.h);
    for p in ctx.particles().particles() {
        assert!(p.x + p.r <= after.w);
        assert!(p.y + p.r <= after.h);
    }
    // The simulation keeps running inside the new bounds.
    for _ in 0..60 {
        ctx.tick_particles();
    }
    for p in ctx.particles().particles() {
        assert!(after.contains_disk(p.x, p.y, p.r));
    }
}

#[test]
fn test_pair_forces_conserve_momentum() {
    let bounds = Bounds::new(1000.0, 800.0);
    let config = ParticleConfig::default();
    let mut rng = SmallRng::seed_from_u64(31);
    let mut particles: Vec<Particle> = (0..12)
        .map(|_| {
            let mut p = Particle::spawn(bounds, &config, &mut rng);
            p.vx = 0.0;
            p.vy = 0.0;
            p
        })
        .collect();
    for phase in [Phase::Attract, Phase::Repel] {
        apply_pair_forces(&mut particles, phase, &config);
        let (px, py) = particles
            .iter()
            .fold((0.0f32, 0.0f32), |(x, y), p| (x + p.vx, y + p.vy));
        assert!(px.abs() < 1e-4 && py.abs() < 1e-4, "net impulse ({px}, {py})");
    }
}

#[test]
fn test_rescue_kicks_stalled_particle() {
    let bounds = Bounds::new(800.0, 600.0);
    let config = ParticleConfig::default();
    let mut rng = SmallRng::seed_from_u64(2);
    for _ in 0..100 {
        let mut p = Particle::spawn(bounds, &config, &mut rng);
        p.vx = 0.0;
        p.vy = 0.05;
        let before = (p.vx, p.vy);
        assert!(p.rescue(bounds, &config, &mut rng));
        assert_ne!((p.vx, p.vy), before);
    }
}

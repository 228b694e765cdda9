//! Kinematic helpers shared by particles and fog blobs.

use ooze_core::Bounds;

/// Velocity magnitude.
pub fn speed(vx: f32, vy: f32) -> f32 {
    (vx * vx + vy * vy).sqrt()
}

/// Scale the velocity down to `cap` if it is faster, keeping its direction.
pub fn clamp_speed(vx: &mut f32, vy: &mut f32, cap: f32) {
    let s = speed(*vx, *vy);
    if s > cap {
        let scale = cap / s;
        *vx *= scale;
        *vy *= scale;
    }
}

/// Reflect off the four walls so a disk of radius `r` stays inside `bounds`.
///
/// Each axis is handled independently: the position is clamped to the wall
/// and the velocity component forced to point back inward. An axis too short
/// for the disk pins it at the middle with no velocity along that axis.
pub fn bounce(x: &mut f32, y: &mut f32, vx: &mut f32, vy: &mut f32, r: f32, bounds: Bounds) {
    bounce_axis(x, vx, r, bounds.w);
    bounce_axis(y, vy, r, bounds.h);
}

fn bounce_axis(pos: &mut f32, vel: &mut f32, r: f32, extent: f32) {
    if extent < r * 2.0 {
        *pos = extent / 2.0;
        *vel = 0.0;
    } else if *pos - r < 0.0 {
        *pos = r;
        *vel = vel.abs();
    } else if *pos + r > extent {
        *pos = extent - r;
        *vel = -vel.abs();
    }
}

/// Offset from (`x`, `y`) to the center of `bounds`, normalized by the
/// bounds on each axis (so each component lies in -0.5..0.5 when inside).
pub fn normalized_offset_to_center(x: f32, y: f32, bounds: Bounds) -> (f32, f32) {
    let (cx, cy) = bounds.center();
    ((cx - x) / bounds.w, (cy - y) / bounds.h)
}

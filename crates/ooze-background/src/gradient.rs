//! Radial gradients used to paint the blobs.

use crate::raster::Rgba;

/// A color stop at `offset` (0 at the center, 1 at the rim), straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub rgb: [f32; 3],
    pub alpha: f32,
}

impl GradientStop {
    pub const fn white(offset: f32, alpha: f32) -> Self {
        Self {
            offset,
            rgb: [1.0, 1.0, 1.0],
            alpha,
        }
    }
}

/// Particle blob profile: small opaque core, fast drop, wide soft halo.
pub const PARTICLE_STOPS: [GradientStop; 5] = [
    GradientStop::white(0.00, 1.00),
    GradientStop::white(0.06, 0.88),
    GradientStop::white(0.22, 0.42),
    GradientStop::white(0.55, 0.10),
    GradientStop::white(1.00, 0.00),
];

/// Fog blob profile, scaled by the blob's opacity.
pub fn fog_stops(opacity: f32) -> [GradientStop; 3] {
    [
        GradientStop::white(0.00, opacity),
        GradientStop::white(0.45, opacity * 0.40),
        GradientStop::white(1.00, 0.0),
    ]
}

/// Radial gradient centered on (`x`, `y`) reaching `radius`.
#[derive(Debug, Clone, Copy)]
pub struct RadialGradient<'a> {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub stops: &'a [GradientStop],
}

impl<'a> RadialGradient<'a> {
    pub fn new(x: f32, y: f32, radius: f32, stops: &'a [GradientStop]) -> Self {
        Self {
            x,
            y,
            radius,
            stops,
        }
    }

    /// Premultiplied color at normalized offset `t`, interpolating linearly
    /// between stops and holding the end stops beyond them.
    pub fn color_at(&self, t: f32) -> Rgba {
        let Some(first) = self.stops.first() else {
            return Rgba::TRANSPARENT;
        };
        let t = t.clamp(0.0, 1.0);
        if t <= first.offset {
            return premultiply(first.rgb, first.alpha);
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                let k = if span > 0.0 { (t - lo.offset) / span } else { 1.0 };
                let rgb = [
                    lerp(lo.rgb[0], hi.rgb[0], k),
                    lerp(lo.rgb[1], hi.rgb[1], k),
                    lerp(lo.rgb[2], hi.rgb[2], k),
                ];
                return premultiply(rgb, lerp(lo.alpha, hi.alpha, k));
            }
        }
        let last = self.stops[self.stops.len() - 1];
        premultiply(last.rgb, last.alpha)
    }

    /// Color at pixel (`px`, `py`), or `None` outside the disk.
    pub fn sample(&self, px: f32, py: f32) -> Option<Rgba> {
        if self.radius <= 0.0 {
            return None;
        }
        let dx = px - self.x;
        let dy = py - self.y;
        let d = (dx * dx + dy * dy).sqrt();
        (d <= self.radius).then(|| self.color_at(d / self.radius))
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn premultiply(rgb: [f32; 3], alpha: f32) -> Rgba {
    Rgba::new(rgb[0] * alpha, rgb[1] * alpha, rgb[2] * alpha, alpha)
}

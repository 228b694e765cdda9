//! Software drawing surfaces sampled in pixel space.

use std::ops::{Add, Mul, Sub};

use ooze_core::{FilterChain, Viewport};

use crate::filter::apply_filter;
use crate::gradient::RadialGradient;

/// Premultiplied RGBA, each channel in 0..=1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Source-over: `self` painted on top of `dst`.
    pub fn over(self, dst: Rgba) -> Rgba {
        self + dst * (1.0 - self.a)
    }

    /// Rec. 709 luma of the premultiplied color.
    pub fn luma(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

impl Add for Rgba {
    type Output = Rgba;

    fn add(self, rhs: Rgba) -> Rgba {
        Rgba::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl Sub for Rgba {
    type Output = Rgba;

    fn sub(self, rhs: Rgba) -> Rgba {
        Rgba::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b, self.a - rhs.a)
    }
}

impl Mul<f32> for Rgba {
    type Output = Rgba;

    fn mul(self, k: f32) -> Rgba {
        Rgba::new(self.r * k, self.g * k, self.b * k, self.a * k)
    }
}

/// A full-viewport drawing surface with its own post-processing filter.
///
/// Each terminal cell holds two vertically stacked samples; a sample covers
/// `sample_w` x `sample_h` pixels and is evaluated at its center.
#[derive(Debug, Clone)]
pub struct Surface {
    width: usize,
    height: usize,
    sample_w: f32,
    sample_h: f32,
    filter: FilterChain,
    pixels: Vec<Rgba>,
}

impl Surface {
    pub fn new(viewport: Viewport, cell_w: u16, cell_h: u16, filter: FilterChain) -> Self {
        let mut surface = Self {
            width: 0,
            height: 0,
            sample_w: f32::from(cell_w),
            sample_h: f32::from(cell_h) / 2.0,
            filter,
            pixels: Vec::new(),
        };
        surface.resize(viewport);
        surface
    }

    /// Reallocate for a new viewport. Contents are cleared.
    pub fn resize(&mut self, viewport: Viewport) {
        self.width = usize::from(viewport.cols);
        self.height = usize::from(viewport.rows) * 2;
        self.pixels.clear();
        self.pixels.resize(self.width * self.height, Rgba::TRANSPARENT);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Paint every sample with `color`.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Reset every sample to transparent.
    pub fn clear(&mut self) {
        self.fill(Rgba::TRANSPARENT);
    }

    /// Composite a gradient-filled disk over the surface.
    pub fn fill_radial(&mut self, gradient: &RadialGradient<'_>) {
        if self.width == 0 || self.height == 0 || gradient.radius <= 0.0 {
            return;
        }
        let (x0, x1) = span(gradient.x, gradient.radius, self.sample_w, self.width);
        let (y0, y1) = span(gradient.y, gradient.radius, self.sample_h, self.height);
        for sy in y0..y1 {
            let py = (sy as f32 + 0.5) * self.sample_h;
            let row = sy * self.width;
            for sx in x0..x1 {
                let px = (sx as f32 + 0.5) * self.sample_w;
                if let Some(color) = gradient.sample(px, py) {
                    let dst = &mut self.pixels[row + sx];
                    *dst = color.over(*dst);
                }
            }
        }
    }

    /// Copy of the pixels with this surface's filter chain applied.
    pub fn filtered(&self) -> Vec<Rgba> {
        let mut out = self.pixels.clone();
        if self.filter.is_identity() {
            return out;
        }
        apply_filter(
            &mut out,
            self.width,
            self.height,
            &self.filter,
            (self.sample_w, self.sample_h),
        );
        out
    }
}

/// Sample index range touched by a disk centered at `center` px.
fn span(center: f32, radius: f32, sample: f32, len: usize) -> (usize, usize) {
    let lo = ((center - radius) / sample - 0.5).floor().max(0.0) as usize;
    let hi = ((center + radius) / sample + 0.5).ceil().max(0.0) as usize;
    (lo.min(len), hi.min(len))
}

/// Stack filtered layers bottom to top over an opaque black backdrop.
///
/// All layers must share the same dimensions.
pub fn composite(layers: &[&[Rgba]]) -> Vec<Rgba> {
    let len = layers.first().map_or(0, |layer| layer.len());
    (0..len)
        .map(|i| {
            layers
                .iter()
                .fold(Rgba::BLACK, |dst, layer| layer[i].over(dst))
        })
        .collect()
}

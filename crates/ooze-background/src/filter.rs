//! Surface post-processing: gaussian blur, contrast and brightness.
//!
//! Kept apart from drawing so the merge effect can be tuned and tested on
//! its own. Samples outside the surface count as transparent during the
//! blur; contrast and brightness work on unpremultiplied color and leave
//! alpha untouched.

use ooze_core::FilterChain;

use crate::raster::Rgba;

/// Number of box passes used to approximate a gaussian.
const BOX_PASSES: usize = 3;

/// Apply `chain` in place to a `width` x `height` grid of samples, each
/// covering `sample_px` (width, height) pixels.
pub fn apply_filter(
    pixels: &mut [Rgba],
    width: usize,
    height: usize,
    chain: &FilterChain,
    sample_px: (f32, f32),
) {
    if width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(pixels.len(), width * height);

    if chain.blur_px > 0.0 {
        let radii_x = box_radii(chain.blur_px / sample_px.0);
        let radii_y = box_radii(chain.blur_px / sample_px.1);
        let mut scratch = Vec::with_capacity(width.max(height));
        for (&rx, &ry) in radii_x.iter().zip(radii_y.iter()) {
            blur_rows(pixels, width, height, rx, &mut scratch);
            blur_columns(pixels, width, height, ry, &mut scratch);
        }
    }

    if chain.contrast != 1.0 || chain.brightness != 1.0 {
        for px in pixels.iter_mut() {
            *px = adjust(*px, chain.contrast, chain.brightness);
        }
    }
}

/// Box radii whose successive passes approximate a gaussian of `sigma`
/// samples.
fn box_radii(sigma: f32) -> [usize; BOX_PASSES] {
    let n = BOX_PASSES as f32;
    let ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
    let mut lower = ideal.floor() as i32;
    if lower % 2 == 0 {
        lower -= 1;
    }
    let lower = lower.max(1);
    let upper = lower + 2;
    let lf = lower as f32;
    let m = ((12.0 * sigma * sigma - n * lf * lf - 4.0 * n * lf - 3.0 * n) / (-4.0 * lf - 4.0))
        .round()
        .max(0.0) as usize;

    let mut radii = [0; BOX_PASSES];
    for (i, radius) in radii.iter_mut().enumerate() {
        let size = if i < m { lower } else { upper };
        *radius = ((size - 1) / 2) as usize;
    }
    radii
}

fn blur_rows(
    pixels: &mut [Rgba],
    width: usize,
    height: usize,
    radius: usize,
    scratch: &mut Vec<Rgba>,
) {
    if radius == 0 {
        return;
    }
    for y in 0..height {
        let row = &mut pixels[y * width..(y + 1) * width];
        box_blur_line(row.iter().copied(), width, radius, scratch);
        row.copy_from_slice(&scratch[..width]);
    }
}

fn blur_columns(
    pixels: &mut [Rgba],
    width: usize,
    height: usize,
    radius: usize,
    scratch: &mut Vec<Rgba>,
) {
    if radius == 0 {
        return;
    }
    for x in 0..width {
        let column: Vec<Rgba> = (0..height).map(|y| pixels[y * width + x]).collect();
        box_blur_line(column.into_iter(), height, radius, scratch);
        for (y, px) in scratch.iter().take(height).enumerate() {
            pixels[y * width + x] = *px;
        }
    }
}

/// Sliding-window box blur of one line into `out`. Out-of-range samples are
/// transparent, so the window is always divided by its full size.
fn box_blur_line(
    line: impl Iterator<Item = Rgba>,
    len: usize,
    radius: usize,
    out: &mut Vec<Rgba>,
) {
    // prefix[i] = sum of the first i samples
    let mut prefix = Vec::with_capacity(len + 1);
    prefix.push(Rgba::TRANSPARENT);
    let mut acc = Rgba::TRANSPARENT;
    for px in line {
        acc = acc + px;
        prefix.push(acc);
    }

    let norm = 1.0 / (2 * radius + 1) as f32;
    out.clear();
    out.extend((0..len).map(|i| {
        let lo = i.saturating_sub(radius);
        let hi = (i + radius + 1).min(len);
        (prefix[hi] - prefix[lo]) * norm
    }));
}

fn adjust(px: Rgba, contrast: f32, brightness: f32) -> Rgba {
    if px.a <= 0.0 {
        return px;
    }
    let a = px.a.min(1.0);
    let channel = |c: f32| {
        let c = c / px.a;
        let c = ((c - 0.5) * contrast + 0.5).clamp(0.0, 1.0);
        (c * brightness).clamp(0.0, 1.0) * a
    };
    Rgba::new(channel(px.r), channel(px.g), channel(px.b), a)
}

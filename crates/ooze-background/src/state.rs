//! Background context: both simulations, their surfaces and the shared
//! bounds.

use ooze_core::{Bounds, FxConfig, Phase, RenderConfig, Viewport};
use ratatui::{
    Frame,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::{debug, info};

use crate::color::mercury_shade;
use crate::error::FxError;
use crate::fog::FogField;
use crate::gradient::{PARTICLE_STOPS, RadialGradient, fog_stops};
use crate::particle::ParticleField;
use crate::raster::{Rgba, Surface, composite};

/// Glyph whose foreground paints the top sample and background the bottom.
const UPPER_HALF: &str = "▀";

/// Mixed into the seed so the fog stream differs from the particle stream.
const FOG_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Owns everything one running background needs.
///
/// Construction spawns the agents; [`FxContext::tick_particles`] and
/// [`FxContext::tick_fog`] are the two frame loops, driven independently by
/// the host; [`FxContext::resize`] is the resize handler.
#[derive(Debug)]
pub struct FxContext {
    render: RenderConfig,
    viewport: Viewport,
    bounds: Bounds,
    particles: ParticleField,
    fog: FogField,
    particle_surface: Surface,
    fog_surface: Surface,
}

impl FxContext {
    /// Create both surfaces for `viewport` and spawn the agents.
    pub fn new(config: &FxConfig, viewport: Viewport, seed: u64) -> Result<Self, FxError> {
        if viewport.is_empty() {
            return Err(FxError::SurfaceUnavailable {
                cols: viewport.cols,
                rows: viewport.rows,
            });
        }
        let render = config.render.clone();
        let bounds = Bounds::from_viewport(viewport, render.cell_width_px, render.cell_height_px);

        let particle_surface = Surface::new(
            viewport,
            render.cell_width_px,
            render.cell_height_px,
            render.particle_filter,
        );
        // Composited above the particle surface.
        let fog_surface = Surface::new(
            viewport,
            render.cell_width_px,
            render.cell_height_px,
            render.fog_filter,
        );

        let particles = ParticleField::new(config.particles.clone(), bounds, seed);
        let fog = FogField::new(config.fog.clone(), bounds, seed ^ FOG_SEED_SALT);

        info!(
            cols = viewport.cols,
            rows = viewport.rows,
            w = bounds.w,
            h = bounds.h,
            seed,
            particle_filter = %render.particle_filter,
            fog_filter = %render.fog_filter,
            "background started"
        );

        Ok(Self {
            render,
            viewport,
            bounds,
            particles,
            fog,
            particle_surface,
            fog_surface,
        })
    }

    /// One particle frame: advance the clock, simulate, redraw the particle
    /// surface.
    pub fn tick_particles(&mut self) -> Phase {
        let phase = self.particles.step(self.bounds);

        // Opaque backdrop every frame so the contrast filter has a uniform
        // base to fuse against and nothing ghosts from the last frame.
        self.particle_surface.fill(Rgba::BLACK);
        let factor = self.render.blob_radius_factor;
        for p in self.particles.particles() {
            let gradient = RadialGradient::new(p.x, p.y, p.r * factor, &PARTICLE_STOPS);
            self.particle_surface.fill_radial(&gradient);
        }
        phase
    }

    /// One fog frame: simulate and redraw the fog surface.
    pub fn tick_fog(&mut self) {
        self.fog.step(self.bounds);

        self.fog_surface.clear();
        for blob in self.fog.blobs() {
            let stops = fog_stops(blob.opacity);
            let gradient = RadialGradient::new(blob.x, blob.y, blob.r, &stops);
            self.fog_surface.fill_radial(&gradient);
        }
    }

    /// Apply a (debounced) viewport change: resize both surfaces, update the
    /// bounds and pull particles back inside.
    ///
    /// An empty viewport is rejected and the previous state kept.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), FxError> {
        if viewport.is_empty() {
            return Err(FxError::SurfaceUnavailable {
                cols: viewport.cols,
                rows: viewport.rows,
            });
        }
        self.viewport = viewport;
        self.bounds = Bounds::from_viewport(
            viewport,
            self.render.cell_width_px,
            self.render.cell_height_px,
        );
        self.particle_surface.resize(viewport);
        self.fog_surface.resize(viewport);
        self.particles.clamp_to(self.bounds);
        debug!(cols = viewport.cols, rows = viewport.rows, "background resized");
        Ok(())
    }

    /// Filter both surfaces, stack fog over particles and draw the result.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let lines = self.compose_lines();
        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Final composited samples, row-major, `cols` x `rows * 2`.
    pub fn composite(&self) -> Vec<Rgba> {
        let particles = self.particle_surface.filtered();
        let fog = self.fog_surface.filtered();
        composite(&[particles.as_slice(), fog.as_slice()])
    }

    fn compose_lines(&self) -> Vec<Line<'static>> {
        let samples = self.composite();
        let width = self.particle_surface.width();
        (0..usize::from(self.viewport.rows))
            .map(|row| {
                let top = &samples[row * 2 * width..(row * 2 + 1) * width];
                let bottom = &samples[(row * 2 + 1) * width..(row * 2 + 2) * width];
                let spans: Vec<Span> = top
                    .iter()
                    .zip(bottom.iter())
                    .map(|(t, b)| render_cell(*t, *b))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    /// End the session. The host stops driving both loops and drops its
    /// resize subscription before calling this.
    pub fn dispose(self) {
        info!(
            frames = self.particles.clock().frame(),
            "background stopped"
        );
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn fog(&self) -> &FogField {
        &self.fog
    }

    pub fn particle_surface(&self) -> &Surface {
        &self.particle_surface
    }

    pub fn fog_surface(&self) -> &Surface {
        &self.fog_surface
    }
}

/// Render one cell from its top and bottom samples.
fn render_cell(top: Rgba, bottom: Rgba) -> Span<'static> {
    Span::styled(
        UPPER_HALF,
        Style::new()
            .fg(mercury_shade(top.luma()))
            .bg(mercury_shade(bottom.luma())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn context(cols: u16, rows: u16) -> FxContext {
        FxContext::new(&FxConfig::default(), Viewport::new(cols, rows), 1).expect("context")
    }

    #[test]
    fn test_new_rejects_empty_viewport() {
        let err = FxContext::new(&FxConfig::default(), Viewport::new(0, 20), 1).unwrap_err();
        assert_eq!(err, FxError::SurfaceUnavailable { cols: 0, rows: 20 });
    }

    #[test]
    fn test_new_spawns_agents() {
        let ctx = context(120, 40);
        assert_eq!(ctx.bounds(), Bounds::new(1200.0, 800.0));
        assert_eq!(ctx.particles().particles().len(), 12);
        assert_eq!(ctx.fog().blobs().len(), 5);
        assert_eq!(ctx.particles().clock().frame(), 0);
    }

    #[test]
    fn test_particle_tick_paints_opaque_backdrop() {
        let mut ctx = context(60, 20);
        ctx.tick_particles();
        assert!(ctx.particle_surface().pixels().iter().all(|p| p.a >= 0.999));
        assert!(ctx.particle_surface().pixels().iter().any(|p| p.luma() > 0.5));
    }

    #[test]
    fn test_fog_tick_stays_translucent() {
        let mut ctx = context(60, 20);
        ctx.tick_fog();
        let max_alpha = ctx
            .fog_surface()
            .pixels()
            .iter()
            .map(|p| p.a)
            .fold(0.0, f32::max);
        assert!(max_alpha > 0.0);
        assert!(max_alpha < 0.5);
    }

    #[test]
    fn test_fog_tick_leaves_clock_alone() {
        let mut ctx = context(60, 20);
        for _ in 0..10 {
            ctx.tick_fog();
        }
        assert_eq!(ctx.particles().clock().frame(), 0);
    }

    #[test]
    fn test_resize_clamps_particles() {
        let mut ctx = context(160, 50);
        for _ in 0..30 {
            ctx.tick_particles();
        }
        ctx.resize(Viewport::new(70, 30)).expect("resize");
        let bounds = ctx.bounds();
        assert_eq!(bounds, Bounds::new(700.0, 600.0));
        for p in ctx.particles().particles() {
            assert!(p.x + p.r <= bounds.w);
            assert!(p.y + p.r <= bounds.h);
        }
        assert_eq!(ctx.particle_surface().width(), 70);
        assert_eq!(ctx.fog_surface().height(), 60);
    }

    #[test]
    fn test_resize_rejects_empty_viewport() {
        let mut ctx = context(60, 20);
        assert!(ctx.resize(Viewport::new(60, 0)).is_err());
        assert_eq!(ctx.viewport(), Viewport::new(60, 20));
    }

    #[test]
    fn test_render_fills_buffer() {
        let mut ctx = context(30, 12);
        ctx.tick_particles();
        ctx.tick_fog();
        let mut terminal = Terminal::new(TestBackend::new(30, 12)).expect("terminal");
        terminal.draw(|frame| ctx.render(frame)).expect("draw");
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), UPPER_HALF);
        assert_eq!(buffer[(29, 11)].symbol(), UPPER_HALF);
    }

    #[test]
    fn test_composite_is_opaque() {
        let mut ctx = context(30, 12);
        ctx.tick_particles();
        ctx.tick_fog();
        let samples = ctx.composite();
        assert_eq!(samples.len(), 30 * 24);
        assert!(samples.iter().all(|s| (s.a - 1.0).abs() < 1e-4));
    }
}

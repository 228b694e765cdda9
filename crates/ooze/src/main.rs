use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ooze_background::{FrameTicker, FxContext, ResizeDebouncer};
use ooze_core::{FxConfig, Viewport};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};
use tracing::{info, warn};

mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    match logging::init() {
        Ok(Some(path)) => info!(path = %path.display(), "logging to file"),
        Ok(None) => {}
        Err(err) => eprintln!("ooze: logging disabled: {err}"),
    }
    let config = ooze_config::load()?;
    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The application: drives the particle loop, the fog loop and the resize
/// debouncer from one event loop.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Configuration read at startup.
    config: FxConfig,
    /// Seed for both random streams.
    seed: u64,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: FxConfig) -> Self {
        let seed = config.seed.unwrap_or_else(time_seed);
        Self {
            running: false,
            config,
            seed,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        let viewport = Viewport::new(size.width, size.height);
        let mut fx = FxContext::new(&self.config, viewport, self.seed)?;

        let now = Instant::now();
        let render = &self.config.render;
        let mut particle_ticker = FrameTicker::new(render.particle_fps, now);
        let mut fog_ticker = FrameTicker::new(render.fog_fps, now);
        let mut resize = ResizeDebouncer::new(Duration::from_millis(render.resize_debounce_ms));

        self.running = true;
        while self.running {
            let now = Instant::now();
            if let Some(viewport) = resize.poll(now) {
                if let Err(err) = fx.resize(viewport) {
                    warn!(%err, "ignoring resize");
                }
            }

            // The two loops are not synchronized; either may fire alone.
            let mut dirty = false;
            if particle_ticker.poll(now) {
                fx.tick_particles();
                dirty = true;
            }
            if fog_ticker.poll(now) {
                fx.tick_fog();
                dirty = true;
            }
            if dirty {
                terminal.draw(|frame| self.render(&fx, frame))?;
            }

            let deadline = [
                Some(particle_ticker.next_due()),
                Some(fog_ticker.next_due()),
                resize.deadline(),
            ]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(now);
            let timeout = deadline.saturating_duration_since(Instant::now());
            self.handle_crossterm_events(timeout, &mut resize)?;
        }

        resize.cancel();
        fx.dispose();
        Ok(())
    }

    /// Renders the background with the help line on top.
    fn render(&self, fx: &FxContext, frame: &mut Frame) {
        fx.render(frame);

        let chunks =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());
        let help = Line::from(vec!["q".bold().white(), " quit".dark_gray()]).centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Waits up to `timeout` for a terminal event and handles it.
    fn handle_crossterm_events(
        &mut self,
        timeout: Duration,
        resize: &mut ResizeDebouncer,
    ) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => {
                    resize.notify(Viewport::new(cols, rows), Instant::now())
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events. Quitting is the only binding.
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Seed derived from the system clock.
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

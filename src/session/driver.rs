//! Session driver
//!
//! `CursorSession` is the single owner of the cursor state. Input events,
//! timer ticks and mode commands all funnel through `handle` / `on_tick`,
//! which run to completion before the next event is taken from the queue.

use crate::config::{ConfigError, SessionConfig};
use crate::cursor::{
    CanvasSize, CursorRect, CursorTracker, PresetCursor, PresetMove, DEFAULT_PRESETS,
};
use crate::render::{RenderError, RenderTarget};
use crate::session::input::InputEvent;
use crate::session::layout::Layout;
use crate::session::mode::Mode;
use crate::session::timer::{Tick, TickTimer};
use crate::shader::{load_program, ShaderError, ShaderSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Shader error: {0}")]
    Shader(#[from] ShaderError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Preset table is empty")]
    NoPresets,

    #[error("Session is already running")]
    AlreadyRunning,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// What handling an event did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// The cursor was updated and republished
    pub moved: bool,
    /// The platform default action (context menu) must be suppressed
    pub prevent_default: bool,
    /// The session loop should stop
    pub stop: bool,
}

impl Outcome {
    fn moved() -> Self {
        Self {
            moved: true,
            ..Self::default()
        }
    }

    fn ignored() -> Self {
        Self::default()
    }
}

pub struct CursorSession {
    id: Uuid,
    config: SessionConfig,
    canvas: CanvasSize,
    tracker: CursorTracker,
    presets: Vec<PresetMove>,
    preset_cursor: PresetCursor,
    mode: Mode,
    timer: TickTimer,
    ticks: Option<mpsc::Receiver<Tick>>,
    rng: StdRng,
    layout: Box<dyn Layout>,
}

impl CursorSession {
    /// Build a session in click mode without loading any shader
    pub fn new(
        config: SessionConfig,
        targets: Vec<Box<dyn RenderTarget>>,
        layout: Box<dyn Layout>,
    ) -> SessionResult<Self> {
        config.validate()?;

        let (timer, ticks) = TickTimer::new();
        let preset_cursor =
            PresetCursor::new(DEFAULT_PRESETS.len()).ok_or(SessionError::NoPresets)?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            canvas: config.canvas,
            tracker: CursorTracker::new(config.cursor, targets),
            presets: DEFAULT_PRESETS.to_vec(),
            preset_cursor,
            mode: Mode::Click,
            timer,
            ticks: Some(ticks),
            rng,
            layout,
            config,
        })
    }

    /// Replace the preset table; the cycle restarts at index 0
    pub fn with_presets(mut self, presets: Vec<PresetMove>) -> SessionResult<Self> {
        self.preset_cursor = PresetCursor::new(presets.len()).ok_or(SessionError::NoPresets)?;
        self.presets = presets;
        Ok(self)
    }

    /// Load the cursor program into every target, prime them with an
    /// update to the initial rectangle and enter the configured mode.
    ///
    /// Fails if the program cannot be fetched or composed; nothing is
    /// published in that case.
    pub async fn bootstrap(
        config: SessionConfig,
        source: &dyn ShaderSource,
        targets: Vec<Box<dyn RenderTarget>>,
        layout: Box<dyn Layout>,
    ) -> SessionResult<Self> {
        let mut session = Self::new(config, targets, layout)?;

        let program = load_program(
            source,
            &session.config.shader.fragment,
            session.config.shader.wrapper.as_deref(),
        )
        .await?;
        session.tracker.load_program(&program)?;
        let initial = session.tracker.current();
        session
            .tracker
            .update(initial.x, initial.y, initial.width, initial.height)?;

        let initial_mode = session.config.initial_mode;
        session.set_mode(initial_mode);

        tracing::info!(
            "Session {} started ({} target(s), {}x{} canvas, mode={})",
            session.id,
            session.tracker.target_count(),
            session.canvas.width,
            session.canvas.height,
            session.mode
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn current(&self) -> CursorRect {
        self.tracker.current()
    }

    pub fn previous(&self) -> CursorRect {
        self.tracker.previous()
    }

    pub fn preset_index(&self) -> usize {
        self.preset_cursor.index()
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// Take the tick receiver to drive the timer manually; `run` fails afterwards
    pub fn take_ticks(&mut self) -> Option<mpsc::Receiver<Tick>> {
        self.ticks.take()
    }

    /// Move and resize the cursor, then publish
    pub fn update(&mut self, x: f32, y: f32, width: f32, height: f32) -> SessionResult<()> {
        self.tracker.update(x, y, width, height)?;
        Ok(())
    }

    /// Step the preset cycle by `delta` and apply the selected preset
    pub fn advance_preset(&mut self, delta: i32) -> SessionResult<()> {
        let index = self.preset_cursor.advance(delta);
        let preset = self.presets[index];
        tracing::debug!("Preset {} selected ({:?})", index, preset);
        self.tracker.apply_preset(&preset, self.canvas)?;
        Ok(())
    }

    /// Move to a uniformly random point inside the canvas
    pub fn randomize(&mut self) -> SessionResult<()> {
        let x = self.rng.gen_range(0.0..self.canvas.width);
        let y = self.rng.gen_range(0.0..self.canvas.height);
        self.tracker.move_to(x, y)?;
        Ok(())
    }

    /// Switch mode; timed modes (re)arm the single timer, click mode disarms it
    pub fn set_mode(&mut self, mode: Mode) {
        let previous = self.mode;
        self.mode = mode;

        if mode.is_timed() {
            self.timer.arm(self.config.tick_period());
        } else {
            self.timer.disarm();
        }

        tracing::info!("Mode {} -> {}", previous, mode);
    }

    /// Route one input event
    pub fn handle(&mut self, event: InputEvent) -> SessionResult<Outcome> {
        match event {
            InputEvent::PrimaryClick { x, y } => match self.mode {
                Mode::Click => {
                    let y = self.canvas.flip_y(y);
                    self.tracker.move_to(x, y)?;
                    Ok(Outcome::moved())
                }
                Mode::Auto => {
                    self.advance_preset(1)?;
                    Ok(Outcome::moved())
                }
                Mode::Random => Ok(Outcome::ignored()),
            },
            InputEvent::SecondaryClick => {
                let moved = if self.mode == Mode::Auto {
                    self.advance_preset(-1)?;
                    true
                } else {
                    false
                };
                Ok(Outcome {
                    moved,
                    prevent_default: true,
                    stop: false,
                })
            }
            InputEvent::KeyPress { key } => {
                let current = self.tracker.current();
                let step = self.config.key_step();
                tracing::debug!("Key {:?} steps cursor by {}", key, step);
                self.tracker.move_to(current.x + step, current.y)?;
                Ok(Outcome::moved())
            }
            InputEvent::WindowResize { width, height } => {
                self.layout.recompute(width, height);
                Ok(Outcome::ignored())
            }
            InputEvent::SetMode(mode) => {
                self.set_mode(mode);
                Ok(Outcome::ignored())
            }
            InputEvent::SetCursorSize { width, height } => {
                let current = self.tracker.current();
                self.tracker.update(current.x, current.y, width, height)?;
                Ok(Outcome::moved())
            }
            InputEvent::Quit => Ok(Outcome {
                stop: true,
                ..Outcome::default()
            }),
        }
    }

    /// Handle a timer firing; ticks from a replaced or disarmed timer are dropped
    pub fn on_tick(&mut self, tick: Tick) -> SessionResult<Outcome> {
        if !self.timer.accepts(tick) {
            tracing::debug!(
                "Dropping stale tick (generation={}, live={})",
                tick.generation,
                self.timer.generation()
            );
            return Ok(Outcome::ignored());
        }

        match self.mode {
            Mode::Auto => self.advance_preset(1)?,
            Mode::Random => self.randomize()?,
            Mode::Click => return Ok(Outcome::ignored()),
        }
        Ok(Outcome::moved())
    }

    /// Process events and ticks until `Quit` or until every event sender is gone.
    ///
    /// Render failures are logged and the loop keeps going.
    pub async fn run(mut self, mut events: mpsc::Receiver<InputEvent>) -> SessionResult<()> {
        let mut ticks = self.ticks.take().ok_or(SessionError::AlreadyRunning)?;

        loop {
            let result = tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
                Some(tick) = ticks.recv() => self.on_tick(tick),
            };

            match result {
                Ok(outcome) if outcome.stop => break,
                Ok(_) => {}
                Err(e) => tracing::warn!("Session {} event failed: {}", self.id, e),
            }
        }

        self.timer.disarm();
        tracing::info!("Session {} stopped", self.id);
        Ok(())
    }
}

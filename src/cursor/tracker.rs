//! Cursor state tracker
//!
//! `CursorState` is the one-step history: `previous` always holds the value
//! `current` had right before the latest update. `CursorTracker` pairs that
//! state with the registered render targets and republishes after every
//! update.

use crate::cursor::presets::PresetMove;
use crate::cursor::types::{CanvasSize, CursorRect};
use crate::render::{uniforms, RenderError, RenderResult, RenderTarget, UniformValue};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    pub previous: CursorRect,
    pub current: CursorRect,
    /// Primary target's clock reading at the latest publish
    pub changed_at: Option<f64>,
}

impl CursorState {
    /// Both rectangles start at `initial`
    pub fn new(initial: CursorRect) -> Self {
        Self {
            previous: initial,
            current: initial,
            changed_at: None,
        }
    }

    /// Shift `current` into `previous`, then store the new rectangle.
    ///
    /// Coordinates are taken as-is; nothing is clamped to the canvas.
    pub fn update(&mut self, next: CursorRect) {
        self.previous = self.current;
        self.current = next;
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new(CursorRect::default())
    }
}

pub struct CursorTracker {
    state: CursorState,
    targets: Vec<Box<dyn RenderTarget>>,
}

impl CursorTracker {
    pub fn new(initial: CursorRect, targets: Vec<Box<dyn RenderTarget>>) -> Self {
        Self {
            state: CursorState::new(initial),
            targets,
        }
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn current(&self) -> CursorRect {
        self.state.current
    }

    pub fn previous(&self) -> CursorRect {
        self.state.previous
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Hand the composed program to every target
    pub fn load_program(&mut self, program: &str) -> RenderResult<()> {
        for target in &mut self.targets {
            target.load(program)?;
            tracing::info!("Loaded cursor program into target {}", target.name());
        }
        Ok(())
    }

    /// Move and resize the cursor, then publish the new pair
    pub fn update(&mut self, x: f32, y: f32, width: f32, height: f32) -> RenderResult<()> {
        self.state.update(CursorRect::new(x, y, width, height));
        tracing::debug!(
            "Cursor moved ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            self.state.previous.x,
            self.state.previous.y,
            x,
            y
        );
        self.publish()
    }

    /// Move the cursor keeping its current size
    pub fn move_to(&mut self, x: f32, y: f32) -> RenderResult<()> {
        let CursorRect { width, height, .. } = self.state.current;
        self.update(x, y, width, height)
    }

    /// Apply a preset: one update for a jump, two consecutive updates for a sweep
    pub fn apply_preset(&mut self, preset: &PresetMove, canvas: CanvasSize) -> RenderResult<()> {
        for anchor in preset.hops() {
            let (x, y) = anchor.resolve(canvas);
            self.move_to(x, y)?;
        }
        Ok(())
    }

    /// Send `current`, `previous` and the change time to every target.
    ///
    /// Each target gets the change time read from its own clock. A failing
    /// target does not stop the others; the first failure is returned.
    fn publish(&mut self) -> RenderResult<()> {
        let current = self.state.current.to_uniform();
        let previous = self.state.previous.to_uniform();
        let mut first_error: Option<RenderError> = None;
        let mut changed_at = None;

        for target in &mut self.targets {
            let now = target.clock();
            changed_at.get_or_insert(now);

            if let Err(e) = send_cursor(target.as_mut(), current, previous, now) {
                tracing::warn!("Failed to publish cursor to target {}: {}", target.name(), e);
                first_error.get_or_insert(e);
            }
        }

        self.state.changed_at = changed_at;

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn send_cursor(
    target: &mut dyn RenderTarget,
    current: UniformValue,
    previous: UniformValue,
    now: f64,
) -> RenderResult<()> {
    target.set_uniform(uniforms::CURRENT_CURSOR, current)?;
    target.set_uniform(uniforms::PREVIOUS_CURSOR, previous)?;
    target.set_uniform(uniforms::TIME_CURSOR_CHANGE, UniformValue::Float(now as f32))
}

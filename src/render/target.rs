//! Render target trait
//!
//! Defines the interface every shader canvas wrapper implements.

use thiserror::Error;

/// Errors that can occur while talking to a render target
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Target {target} rejected uniform {uniform}: {reason}")]
    UniformRejected {
        target: String,
        uniform: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for render target operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Uniform names shared by every cursor shader
pub mod uniforms {
    /// Current cursor rectangle, vec4 `(x, y, width, height)`
    pub const CURRENT_CURSOR: &str = "iCurrentCursor";
    /// Cursor rectangle before the latest change, vec4
    pub const PREVIOUS_CURSOR: &str = "iPreviousCursor";
    /// Target clock reading (seconds) at the latest change
    pub const TIME_CURSOR_CHANGE: &str = "iTimeCursorChange";
}

/// Numeric uniform with one to four float components
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

impl UniformValue {
    pub fn components(&self) -> &[f32] {
        match self {
            UniformValue::Float(v) => std::slice::from_ref(v),
            UniformValue::Vec2(v) => v,
            UniformValue::Vec3(v) => v,
            UniformValue::Vec4(v) => v,
        }
    }
}

/// Shader canvas the cursor state is published to
///
/// Targets are registered once when the tracker is built and never removed.
/// They receive values; they never own the cursor state.
pub trait RenderTarget: Send {
    /// Identifier used in logs
    fn name(&self) -> &str;

    /// Hand over the composed fragment program
    fn load(&mut self, program: &str) -> RenderResult<()>;

    /// Set a named uniform for the next frame
    fn set_uniform(&mut self, name: &str, value: UniformValue) -> RenderResult<()>;

    /// Seconds on the target's own animation clock
    fn clock(&self) -> f64;
}

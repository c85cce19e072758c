//! Render targets
//!
//! A render target is the shader canvas the cursor state is published to.
//! The crate never compiles or draws shaders itself; it only hands over the
//! program source at startup and pushes uniform values afterwards.

pub mod recording;
pub mod stream;
pub mod target;

pub use recording::RecordingTarget;
pub use stream::JsonLinesTarget;
pub use target::{uniforms, RenderError, RenderResult, RenderTarget, UniformValue};

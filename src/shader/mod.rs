//! Shader program loading
//!
//! Fetches the cursor fragment (and optionally a wrapper shader) by name at
//! startup and composes them into the program handed to the render targets.
//! Any failure here is fatal to session startup.

pub mod compose;
pub mod source;

pub use compose::{compose, load_program, FRAGMENT_MARKER};
pub use source::{FileShaderSource, MemoryShaderSource, ShaderError, ShaderResult, ShaderSource};

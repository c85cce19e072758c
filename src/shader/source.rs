use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading shader sources
#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("Failed to fetch shader {name}: {source}")]
    Fetch {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Shader not found: {0}")]
    NotFound(String),

    #[error("Wrapper shader {0} has no fragment marker")]
    MissingMarker(String),
}

/// Result type for shader loading
pub type ShaderResult<T> = Result<T, ShaderError>;

/// Plain-text shader source looked up by name
#[async_trait]
pub trait ShaderSource: Send + Sync {
    async fn fetch(&self, name: &str) -> ShaderResult<String>;
}

/// Reads shaders from files under a root directory
#[derive(Debug, Clone)]
pub struct FileShaderSource {
    root: PathBuf,
}

impl FileShaderSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ShaderSource for FileShaderSource {
    async fn fetch(&self, name: &str) -> ShaderResult<String> {
        let path = self.root.join(name);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => ShaderError::NotFound(path.display().to_string()),
                _ => ShaderError::Fetch {
                    name: name.to_string(),
                    source,
                },
            })?;

        tracing::debug!("Fetched shader {} ({} bytes)", path.display(), text.len());
        Ok(text)
    }
}

/// Shaders held in memory, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemoryShaderSource {
    shaders: HashMap<String, String>,
}

impl MemoryShaderSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.shaders.insert(name.into(), text.into());
        self
    }
}

#[async_trait]
impl ShaderSource for MemoryShaderSource {
    async fn fetch(&self, name: &str) -> ShaderResult<String> {
        self.shaders
            .get(name)
            .cloned()
            .ok_or_else(|| ShaderError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source_reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cursor.glsl"), "void main() {}").unwrap();

        let source = FileShaderSource::new(dir.path());
        let text = source.fetch("cursor.glsl").await.unwrap();

        assert_eq!(text, "void main() {}");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileShaderSource::new(dir.path());

        let err = source.fetch("absent.glsl").await.unwrap_err();
        assert!(matches!(err, ShaderError::NotFound(_)), "unexpected error {:?}", err);
    }

    #[tokio::test]
    async fn test_memory_source() {
        let source = MemoryShaderSource::new().with("a.glsl", "a");

        assert_eq!(source.fetch("a.glsl").await.unwrap(), "a");
        assert!(matches!(
            source.fetch("b.glsl").await,
            Err(ShaderError::NotFound(_))
        ));
    }
}

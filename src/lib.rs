//! Cursor Canvas - animated text-cursor driver for shader canvases.
//!
//! Tracks the previous/current cursor rectangle, moves it in response to
//! clicks, key presses and a repeating timer, and publishes both rectangles
//! as uniforms to one or more render targets.

pub mod config;
pub mod cursor;
pub mod render;
pub mod session;
pub mod shader;

use anyhow::Context;
use config::SessionConfig;
use render::{JsonLinesTarget, RenderTarget};
use session::{forward_lines, CursorSession, TracingLayout};
use shader::FileShaderSource;
use std::path::Path;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EVENT_BUFFER: usize = 64;

/// Run the stdin-driven session, streaming uniforms to stdout
pub fn run() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the uniform stream
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cursor_canvas_lib=info,cursor_canvas=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Cursor Canvas v{}", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => SessionConfig::load(Path::new(&path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => SessionConfig::default(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let result = runtime.block_on(serve(config));
    // Blocking stdin reads would otherwise hold up shutdown
    runtime.shutdown_background();
    result
}

/// Bootstrap a session against the configured shader directory and drive it from stdin
pub async fn serve(config: SessionConfig) -> anyhow::Result<()> {
    let source = FileShaderSource::new(&config.shader.root);
    let targets: Vec<Box<dyn RenderTarget>> =
        vec![Box::new(JsonLinesTarget::new("stdout", std::io::stdout()))];

    let layout = Box::new(TracingLayout::default());
    let session = CursorSession::bootstrap(config, &source, targets, layout)
        .await
        .context("Failed to start cursor session")?;
    tracing::info!("Session {} reading events from stdin", session.id());

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    tokio::spawn(forward_lines(tokio::io::stdin(), tx));

    session.run(rx).await?;
    Ok(())
}

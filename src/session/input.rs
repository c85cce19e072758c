//! Input events and their text form
//!
//! The binary reads one event per line from stdin:
//!
//! ```text
//! click 120 48     primary click at device coordinates (origin top-left)
//! context          secondary click
//! key a            any key press
//! resize 800 600   window resize
//! mode auto        switch to click | auto | random
//! size 10 20       set the cursor size
//! quit
//! ```

use crate::session::mode::Mode;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary click, device coordinates relative to the render surface
    PrimaryClick { x: f32, y: f32 },
    /// Secondary click / context menu request
    SecondaryClick,
    KeyPress { key: String },
    /// Window resize; forwarded to the layout only
    WindowResize { width: u32, height: u32 },
    SetMode(Mode),
    SetCursorSize { width: f32, height: f32 },
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseEventError {
    #[error("Empty event")]
    Empty,

    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    #[error("Event '{event}' expects {expected} argument(s)")]
    WrongArity { event: String, expected: usize },

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Invalid mode: {0}")]
    InvalidMode(String),
}

fn number<T: FromStr>(raw: &str) -> Result<T, ParseEventError> {
    raw.parse()
        .map_err(|_| ParseEventError::InvalidNumber(raw.to_string()))
}

fn expect_args(event: &str, args: &[&str], expected: usize) -> Result<(), ParseEventError> {
    if args.len() != expected {
        return Err(ParseEventError::WrongArity {
            event: event.to_string(),
            expected,
        });
    }
    Ok(())
}

impl FromStr for InputEvent {
    type Err = ParseEventError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let event = parts.next().ok_or(ParseEventError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        match event.as_str() {
            "click" => {
                expect_args(&event, &args, 2)?;
                Ok(InputEvent::PrimaryClick {
                    x: number(args[0])?,
                    y: number(args[1])?,
                })
            }
            "context" => {
                expect_args(&event, &args, 0)?;
                Ok(InputEvent::SecondaryClick)
            }
            "key" => {
                expect_args(&event, &args, 1)?;
                Ok(InputEvent::KeyPress {
                    key: args[0].to_string(),
                })
            }
            "resize" => {
                expect_args(&event, &args, 2)?;
                Ok(InputEvent::WindowResize {
                    width: number(args[0])?,
                    height: number(args[1])?,
                })
            }
            "mode" => {
                expect_args(&event, &args, 1)?;
                let mode = args[0].parse::<Mode>().map_err(ParseEventError::InvalidMode)?;
                Ok(InputEvent::SetMode(mode))
            }
            "size" => {
                expect_args(&event, &args, 2)?;
                Ok(InputEvent::SetCursorSize {
                    width: number(args[0])?,
                    height: number(args[1])?,
                })
            }
            "quit" => {
                expect_args(&event, &args, 0)?;
                Ok(InputEvent::Quit)
            }
            _ => Err(ParseEventError::UnknownEvent(event)),
        }
    }
}

/// Parse one input line; `None` for blank lines and `#` comments
pub fn parse_line(line: &str) -> Option<Result<InputEvent, ParseEventError>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(trimmed.parse())
}

/// Forward parsed events from `reader` until EOF or until the session stops listening.
///
/// Malformed lines are logged and skipped.
pub async fn forward_lines<R: AsyncRead + Unpin>(reader: R, tx: mpsc::Sender<InputEvent>) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Failed to read input: {}", e);
                break;
            }
        };

        match parse_line(&line) {
            Some(Ok(event)) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Some(Err(e)) => tracing::warn!("Skipping input line {:?}: {}", line, e),
            None => {}
        }
    }
    tracing::debug!("Input stream closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_click() {
        assert_eq!(
            "click 120 48.5".parse::<InputEvent>().unwrap(),
            InputEvent::PrimaryClick { x: 120.0, y: 48.5 }
        );
    }

    #[test]
    fn test_parse_every_event() {
        assert_eq!(
            "context".parse::<InputEvent>().unwrap(),
            InputEvent::SecondaryClick
        );
        assert_eq!(
            "key a".parse::<InputEvent>().unwrap(),
            InputEvent::KeyPress {
                key: "a".to_string()
            }
        );
        assert_eq!(
            "resize 800 600".parse::<InputEvent>().unwrap(),
            InputEvent::WindowResize {
                width: 800,
                height: 600
            }
        );
        assert_eq!(
            "MODE random".parse::<InputEvent>().unwrap(),
            InputEvent::SetMode(Mode::Random)
        );
        assert_eq!(
            "size 10 20".parse::<InputEvent>().unwrap(),
            InputEvent::SetCursorSize {
                width: 10.0,
                height: 20.0
            }
        );
        assert_eq!("quit".parse::<InputEvent>().unwrap(), InputEvent::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<InputEvent>(), Err(ParseEventError::Empty));
        assert_eq!(
            "jump".parse::<InputEvent>(),
            Err(ParseEventError::UnknownEvent("jump".to_string()))
        );
        assert_eq!(
            "click 1".parse::<InputEvent>(),
            Err(ParseEventError::WrongArity {
                event: "click".to_string(),
                expected: 2
            })
        );
        assert_eq!(
            "click one 2".parse::<InputEvent>(),
            Err(ParseEventError::InvalidNumber("one".to_string()))
        );
        assert!(matches!(
            "mode sweep".parse::<InputEvent>(),
            Err(ParseEventError::InvalidMode(_))
        ));
        assert_eq!(
            "quit now".parse::<InputEvent>(),
            Err(ParseEventError::WrongArity {
                event: "quit".to_string(),
                expected: 0
            })
        );
        // Negative sizes are not valid window extents
        assert!("resize -1 5".parse::<InputEvent>().is_err());
    }

    #[test]
    fn test_parse_line_skips_comments() {
        assert!(parse_line("   ").is_none());
        assert!(parse_line("# warm up").is_none());
        assert_eq!(parse_line(" quit ").unwrap().unwrap(), InputEvent::Quit);
    }

    #[tokio::test]
    async fn test_forward_lines_skips_bad_input() {
        let input: &[u8] = b"# demo\nclick 1 2\nbogus\n\nmode auto\n";
        let (tx, mut rx) = mpsc::channel(8);

        forward_lines(input, tx).await;

        assert_eq!(
            rx.recv().await,
            Some(InputEvent::PrimaryClick { x: 1.0, y: 2.0 })
        );
        assert_eq!(rx.recv().await, Some(InputEvent::SetMode(Mode::Auto)));
        assert_eq!(rx.recv().await, None);
    }
}

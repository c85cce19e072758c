//! In-memory render target
//!
//! Keeps the latest value of every uniform plus an ordered log of writes.
//! Clones share the same buffers, so a caller can keep a handle after giving
//! the target to a tracker and inspect what was published.

use crate::render::target::{RenderError, RenderResult, RenderTarget, UniformValue};
use parking_lot::Mutex as ParkingMutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
enum TargetClock {
    Monotonic(Instant),
    Manual(f64),
}

#[derive(Debug)]
struct Recorded {
    program: Option<String>,
    uniforms: HashMap<String, UniformValue>,
    writes: Vec<(String, UniformValue)>,
    clock: TargetClock,
    rejected: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecordingTarget {
    name: String,
    inner: Arc<ParkingMutex<Recorded>>,
}

impl RecordingTarget {
    /// Target whose clock starts at zero now
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_clock(name, TargetClock::Monotonic(Instant::now()))
    }

    /// Target whose clock only moves through [`RecordingTarget::set_clock`]
    pub fn manual(name: impl Into<String>, seconds: f64) -> Self {
        Self::with_clock(name, TargetClock::Manual(seconds))
    }

    fn with_clock(name: impl Into<String>, clock: TargetClock) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(ParkingMutex::new(Recorded {
                program: None,
                uniforms: HashMap::new(),
                writes: Vec::new(),
                clock,
                rejected: None,
            })),
        }
    }

    /// Pin the clock to `seconds`
    pub fn set_clock(&self, seconds: f64) {
        self.inner.lock().clock = TargetClock::Manual(seconds);
    }

    /// Make every following `set_uniform` fail with `reason`
    pub fn reject_uniforms(&self, reason: impl Into<String>) {
        self.inner.lock().rejected = Some(reason.into());
    }

    pub fn program(&self) -> Option<String> {
        self.inner.lock().program.clone()
    }

    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.inner.lock().uniforms.get(name).copied()
    }

    /// Every write in order
    pub fn writes(&self) -> Vec<(String, UniformValue)> {
        self.inner.lock().writes.clone()
    }

    /// Number of writes to `name`
    pub fn write_count(&self, name: &str) -> usize {
        self.inner
            .lock()
            .writes
            .iter()
            .filter(|(written, _)| written == name)
            .count()
    }
}

impl RenderTarget for RecordingTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&mut self, program: &str) -> RenderResult<()> {
        self.inner.lock().program = Some(program.to_string());
        tracing::debug!("Target {} loaded program ({} bytes)", self.name, program.len());
        Ok(())
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> RenderResult<()> {
        let mut inner = self.inner.lock();
        if let Some(reason) = inner.rejected.clone() {
            return Err(RenderError::UniformRejected {
                target: self.name.clone(),
                uniform: name.to_string(),
                reason,
            });
        }
        inner.uniforms.insert(name.to_string(), value);
        inner.writes.push((name.to_string(), value));
        Ok(())
    }

    fn clock(&self) -> f64 {
        match self.inner.lock().clock {
            TargetClock::Monotonic(started) => started.elapsed().as_secs_f64(),
            TargetClock::Manual(seconds) => seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let target = RecordingTarget::manual("main", 0.0);
        let mut handle: Box<dyn RenderTarget> = Box::new(target.clone());

        handle.set_uniform("u_value", UniformValue::Float(2.5)).unwrap();
        handle.load("void main() {}").unwrap();

        assert_eq!(target.uniform("u_value"), Some(UniformValue::Float(2.5)));
        assert_eq!(target.program().as_deref(), Some("void main() {}"));
        assert_eq!(target.write_count("u_value"), 1);
    }

    #[test]
    fn test_manual_clock() {
        let target = RecordingTarget::manual("main", 1.5);
        assert_eq!(target.clock(), 1.5);
        target.set_clock(4.0);
        assert_eq!(target.clock(), 4.0);
    }

    #[test]
    fn test_monotonic_clock_does_not_go_backwards() {
        let target = RecordingTarget::new("main");
        let first = target.clock();
        let second = target.clock();
        assert!(first >= 0.0);
        assert!(second >= first);
    }

    #[test]
    fn test_rejected_uniforms_are_not_recorded() {
        let mut target = RecordingTarget::manual("broken", 0.0);
        target.reject_uniforms("context lost");

        let result = target.set_uniform("u_value", UniformValue::Float(1.0));
        assert!(matches!(result, Err(RenderError::UniformRejected { .. })));
        assert!(target.writes().is_empty());
    }
}

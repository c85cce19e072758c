//! Repeating tick timer
//!
//! The session owns exactly one `TickTimer`. Arming always disarms the
//! previous task first, and every tick carries the generation of the arm
//! that produced it, so a tick already queued before a re-arm is dropped
//! by [`TickTimer::accepts`].

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

const TICK_BUFFER: usize = 8;

/// One timer firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

#[derive(Debug)]
pub struct TickTimer {
    tx: mpsc::Sender<Tick>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
    period: Option<Duration>,
}

impl TickTimer {
    /// Timer plus the receiving end its ticks are delivered to
    pub fn new() -> (Self, mpsc::Receiver<Tick>) {
        let (tx, rx) = mpsc::channel(TICK_BUFFER);
        let timer = Self {
            tx,
            handle: None,
            generation: 0,
            period: None,
        };
        (timer, rx)
    }

    /// Start ticking every `period`, replacing any running timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, period: Duration) {
        self.disarm();

        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Tick { generation }).await.is_err() {
                    break;
                }
            }
        });

        self.handle = Some(handle);
        self.period = Some(period);
        tracing::debug!("Timer armed (generation={}, period={:?})", generation, period);
    }

    /// Stop the running timer, if any. Returns whether one was running.
    pub fn disarm(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                self.period = None;
                tracing::debug!("Timer disarmed (generation={})", self.generation);
                true
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Number of arms so far; also the generation of the live timer
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Whether `tick` came from the currently armed timer
    pub fn accepts(&self, tick: Tick) -> bool {
        self.is_armed() && tick.generation == self.generation
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_after_each_period() {
        let (mut timer, mut ticks) = TickTimer::new();
        timer.arm(Duration::from_millis(1000));

        let started = Instant::now();
        let first = ticks.recv().await.unwrap();
        let second = ticks.recv().await.unwrap();

        assert_eq!(first, Tick { generation: 1 });
        assert_eq!(second, Tick { generation: 1 });
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_running_timer() {
        let (mut timer, mut ticks) = TickTimer::new();

        timer.arm(Duration::from_millis(1000));
        timer.arm(Duration::from_millis(500));

        assert!(timer.is_armed());
        assert_eq!(timer.generation(), 2);
        assert_eq!(timer.period(), Some(Duration::from_millis(500)));

        // Only the second arm ever delivers
        for _ in 0..4 {
            let tick = ticks.recv().await.unwrap();
            assert_eq!(tick.generation, 2);
            assert!(timer.accepts(tick));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarm_stops_ticks() {
        let (mut timer, mut ticks) = TickTimer::new();
        timer.arm(Duration::from_millis(100));
        ticks.recv().await.unwrap();

        assert!(timer.disarm());
        assert!(!timer.disarm());
        assert!(!timer.is_armed());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        // At most the tick already buffered before the abort can remain
        while let Ok(tick) = ticks.try_recv() {
            assert!(!timer.accepts(tick));
        }
    }

    #[tokio::test]
    async fn test_stale_generation_rejected() {
        let (mut timer, _ticks) = TickTimer::new();
        timer.arm(Duration::from_secs(60));
        timer.arm(Duration::from_secs(60));

        assert!(!timer.accepts(Tick { generation: 1 }));
        assert!(timer.accepts(Tick { generation: 2 }));
    }
}

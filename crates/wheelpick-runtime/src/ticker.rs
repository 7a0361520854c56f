#![forbid(unsafe_code)]

//! Wall-clock frame ticks for the update thread.
//!
//! A [`FrameTicker`] sleeps on a condition variable for one interval at a
//! time and posts the real elapsed time (measured with
//! [`web_time::Instant`]) through a [`Dispatcher`]. Selectors only ever see
//! time through these posted ticks, so fail-safes and fades advance on the
//! update thread and never concurrently with other selector logic.

use std::io;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use web_time::Instant;

use crate::dispatcher::Dispatcher;

const THREAD_NAME: &str = "wheelpick-ticker";

/// Stop flag a background loop can wait on.
#[derive(Clone)]
pub(crate) struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a new stop signal pair (signal, trigger).
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Check if the stop signal has been triggered.
    #[must_use]
    pub(crate) fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Wait for either the stop signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if timed out.
    pub(crate) fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        if *stopped {
            return true;
        }
        let (stopped, _) = cvar
            .wait_timeout_while(stopped, duration, |stopped| !*stopped)
            .unwrap_or_else(|e| e.into_inner());
        *stopped
    }
}

impl std::fmt::Debug for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSignal")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

pub(crate) struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        *stopped = true;
        cvar.notify_all();
    }
}

/// Background thread posting elapsed time at a fixed interval.
pub struct FrameTicker {
    trigger: StopTrigger,
    handle: Option<JoinHandle<()>>,
    interval: Duration,
}

impl FrameTicker {
    /// Start ticking. `make_msg` turns the elapsed time since the previous
    /// tick into a message for the update thread.
    ///
    /// The ticker exits on its own once the update thread stops accepting
    /// messages.
    pub fn start<M, F>(interval: Duration, dispatcher: Dispatcher<M>, make_msg: F) -> io::Result<Self>
    where
        M: Send + 'static,
        F: Fn(Duration) -> M + Send + 'static,
    {
        let (signal, trigger) = StopSignal::new();
        let handle = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || tick_loop(interval, &signal, &dispatcher, &make_msg))?;
        tracing::debug!(
            message = "runtime.ticker",
            action = "start",
            interval_ms = whole_millis(interval)
        );
        Ok(Self {
            trigger,
            handle: Some(handle),
            interval,
        })
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop ticking and join the thread.
    pub fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.trigger.stop();
        // Don't join in drop to avoid blocking
    }
}

fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn tick_loop<M>(
    interval: Duration,
    stop: &StopSignal,
    dispatcher: &Dispatcher<M>,
    make_msg: &impl Fn(Duration) -> M,
) {
    let mut last = Instant::now();
    let mut ticks: u64 = 0;
    loop {
        if stop.wait_timeout(interval) {
            break;
        }
        let now = Instant::now();
        let dt = now.duration_since(last);
        last = now;
        if !dispatcher.post(make_msg(dt)) {
            break;
        }
        ticks += 1;
    }
    tracing::debug!(message = "runtime.ticker", action = "exit", ticks);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_signal_starts_false() {
        let (signal, _trigger) = StopSignal::new();
        assert!(!signal.is_stopped());
    }

    #[test]
    fn stop_signal_wait_returns_true_when_stopped() {
        let (signal, trigger) = StopSignal::new();
        trigger.stop();
        assert!(signal.is_stopped());
        assert!(signal.wait_timeout(Duration::from_secs(5)));
    }

    #[test]
    fn stop_signal_wait_returns_false_on_timeout() {
        let (signal, _trigger) = StopSignal::new();
        assert!(!signal.wait_timeout(Duration::from_millis(5)));
    }

    #[test]
    fn huge_intervals_saturate_when_logged() {
        assert_eq!(whole_millis(Duration::from_millis(16)), 16);
        assert_eq!(whole_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn stop_wakes_a_waiting_thread() {
        let (signal, trigger) = StopSignal::new();
        let waiter = thread::spawn(move || signal.wait_timeout(Duration::from_secs(30)));
        thread::sleep(Duration::from_millis(10));
        trigger.stop();
        assert!(waiter.join().expect("waiter thread"));
    }
}

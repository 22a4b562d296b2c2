//! Pre-shutter countdown.

use std::time::Duration;

use chacha_common::config::CameraDefaults;
use tokio::time::MissedTickBehavior;

/// Countdown shown before each shutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    /// Number of visible updates (`seconds`, `seconds - 1`, …, `1`).
    pub seconds: u32,
    /// Time between updates.
    pub tick: Duration,
}

impl Countdown {
    pub fn new(seconds: u32, tick: Duration) -> Self {
        Self { seconds, tick }
    }

    pub fn from_config(config: &CameraDefaults) -> Self {
        Self::new(config.countdown_secs, Duration::from_millis(config.tick_millis))
    }

    /// Total time from the first update until the countdown resolves.
    pub fn duration(&self) -> Duration {
        self.tick * self.seconds
    }

    /// Run the countdown, reporting each update to `on_tick`.
    ///
    /// Emits `Some(seconds)` immediately, then one decrement per tick down to
    /// `Some(1)`, and finally `None` one tick later when the display should
    /// be hidden. A zero-length countdown only emits `None`.
    pub async fn run<F>(&self, mut on_tick: F)
    where
        F: FnMut(Option<u32>) + Send,
    {
        if self.seconds == 0 {
            on_tick(None);
            return;
        }

        // `interval` panics on a zero period.
        let mut interval = tokio::time::interval(self.tick.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for remaining in (1..=self.seconds).rev() {
            interval.tick().await;
            tracing::trace!(remaining, "Countdown tick");
            on_tick(Some(remaining));
        }

        interval.tick().await;
        on_tick(None);
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::from_config(&CameraDefaults::default())
    }
}

//! Capture session state and its transitions.
//!
//! A session walks `Idle(0) → Countdown(0) → Idle(1) → … → Idle(3)`.
//! `Idle(TOTAL_STEPS)` is terminal until [`Session::reset`].

use chacha_common::error::{BoothError, BoothResult};
use chacha_common::theme::Theme;

use crate::photo::CapturedPhoto;
use crate::view::{Controls, SessionView};

/// Number of shots in one strip.
pub const TOTAL_STEPS: usize = 3;

/// Where the sequencer is within the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    /// Waiting for the trigger.
    Idle,
    /// Countdown running; the shutter fires when it ends.
    Countdown,
}

/// State of one photobooth session.
#[derive(Debug, Clone)]
pub struct Session {
    step: usize,
    phase: CapturePhase,
    photos: Vec<CapturedPhoto>,
    theme: Theme,
}

impl Session {
    pub fn new(theme: Theme) -> Self {
        Self {
            step: 0,
            phase: CapturePhase::Idle,
            photos: Vec::with_capacity(TOTAL_STEPS),
            theme,
        }
    }

    /// Number of completed shots, which is also the next slot to fill.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    /// Captured photos in capture order.
    pub fn photos(&self) -> &[CapturedPhoto] {
        &self.photos
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn is_complete(&self) -> bool {
        self.step >= TOTAL_STEPS
    }

    /// Slot awaiting the next shot, or `None` once the strip is full.
    pub fn active_slot(&self) -> Option<usize> {
        (!self.is_complete()).then_some(self.step)
    }

    /// Enter the countdown for the current step.
    pub fn begin_countdown(&mut self) -> BoothResult<usize> {
        if self.is_complete() {
            return Err(BoothError::session("All slots are already filled"));
        }
        if self.phase == CapturePhase::Countdown {
            return Err(BoothError::session("A capture is already in progress"));
        }
        self.phase = CapturePhase::Countdown;
        Ok(self.step)
    }

    /// Leave the countdown without taking a shot (the frame grab failed).
    pub fn abort_countdown(&mut self) {
        self.phase = CapturePhase::Idle;
    }

    /// Store the shot taken at the end of the countdown and advance the step.
    ///
    /// Returns the slot the photo was assigned to.
    pub fn record_photo(
        &mut self,
        width: u32,
        height: u32,
        encoded: Vec<u8>,
    ) -> BoothResult<usize> {
        if self.phase != CapturePhase::Countdown {
            return Err(BoothError::session("Shutter fired outside of a countdown"));
        }
        let slot = self.step;
        self.photos
            .push(CapturedPhoto::new(slot, width, height, encoded));
        self.step += 1;
        self.phase = CapturePhase::Idle;
        debug_assert_eq!(self.photos.len(), self.step);
        Ok(slot)
    }

    /// Discard every photo and start over with the given theme.
    pub fn reset(&mut self, theme: Theme) {
        *self = Session::new(theme);
    }

    /// Presentation snapshot for renderers.
    pub fn view(&self) -> SessionView {
        let controls = if self.is_complete() {
            Controls::ExportReady
        } else {
            Controls::Trigger {
                label: format!("📸 Smile! {} / {}", self.step + 1, TOTAL_STEPS),
                enabled: self.phase == CapturePhase::Idle,
            }
        };

        SessionView {
            step: self.step,
            total_steps: TOTAL_STEPS,
            active_slot: self.active_slot(),
            filled_slots: self.photos.len(),
            theme: self.theme,
            controls,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

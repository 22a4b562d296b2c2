//! The three-shot capture flow.

use chacha_common::error::BoothResult;
use chacha_session_model::{Session, SessionRenderer, Theme, TOTAL_STEPS};

use crate::countdown::Countdown;
use crate::shutter::develop_async;
use crate::source::FrameSource;

/// Owns the session and drives countdown → shutter → slot assignment,
/// keeping the renderer informed after every transition.
pub struct CaptureSequencer<S, R> {
    session: Session,
    source: S,
    renderer: R,
    countdown: Countdown,
    reset_theme: Theme,
}

impl<S, R> CaptureSequencer<S, R>
where
    S: FrameSource,
    R: SessionRenderer,
{
    /// Create a sequencer at step 0 and render the initial state.
    ///
    /// `theme` is the starting theme and the one restored on reset.
    pub fn new(source: S, renderer: R, countdown: Countdown, theme: Theme) -> Self {
        let mut sequencer = Self {
            session: Session::new(theme),
            source,
            renderer,
            countdown,
            reset_theme: theme,
        };
        sequencer.render();
        sequencer
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    /// Run one countdown and take one shot into the current slot.
    ///
    /// Returns the slot that was filled. If the frame source fails the step
    /// does not advance and the trigger is re-enabled.
    pub async fn start_capture(&mut self) -> BoothResult<usize> {
        let slot = self.session.begin_countdown()?;
        tracing::info!(slot, total = TOTAL_STEPS, "Starting countdown");
        self.render();

        let renderer = &mut self.renderer;
        self.countdown
            .run(|remaining| renderer.countdown(remaining))
            .await;

        self.renderer.flash();
        let shot = match self.grab_shot().await {
            Ok(shot) => shot,
            Err(e) => {
                tracing::warn!(slot, error = %e, "Shutter failed; step not advanced");
                self.session.abort_countdown();
                self.render();
                return Err(e);
            }
        };

        let filled = self
            .session
            .record_photo(shot.width, shot.height, shot.encoded)?;
        if let Some(photo) = self.session.photos().get(filled) {
            self.renderer.shutter(photo);
        }
        tracing::info!(
            slot = filled,
            remaining = TOTAL_STEPS - self.session.step(),
            width = shot.width,
            height = shot.height,
            "Shutter fired"
        );

        self.render();
        Ok(filled)
    }

    /// Discard all photos and return to step 0.
    pub fn reset(&mut self) {
        tracing::info!(
            discarded = self.session.photos().len(),
            "Resetting session"
        );
        self.session.reset(self.reset_theme);
        self.render();
    }

    /// Switch the strip theme; both overlay and stamp colour follow.
    pub fn set_theme(&mut self, theme: Theme) {
        tracing::debug!(%theme, "Theme selected");
        self.session.set_theme(theme);
        self.render();
    }

    async fn grab_shot(&mut self) -> BoothResult<crate::shutter::Shot> {
        let frame = self.source.grab_frame().await?;
        develop_async(frame).await
    }

    fn render(&mut self) {
        let view = self.session.view();
        self.renderer.render(&view);
    }
}

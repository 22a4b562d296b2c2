//! Presentation snapshot and the renderer interface.

use chacha_common::theme::Theme;

use crate::photo::CapturedPhoto;

/// What a front-end needs to draw the booth controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub step: usize,
    pub total_steps: usize,
    /// Slot to highlight; `None` once every slot is filled.
    pub active_slot: Option<usize>,
    pub filled_slots: usize,
    pub theme: Theme,
    pub controls: Controls,
}

/// Which control set is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Controls {
    /// The shutter trigger, with its label and whether it accepts presses.
    Trigger { label: String, enabled: bool },
    /// Trigger hidden; reset and export are offered instead.
    ExportReady,
}

/// Receives session updates from the capture sequencer.
///
/// Keeps sequencing logic independent of any particular UI.
pub trait SessionRenderer: Send {
    /// Session state changed.
    fn render(&mut self, view: &SessionView);

    /// Countdown display update. `Some(n)` shows `n`; `None` hides it.
    fn countdown(&mut self, remaining: Option<u32>);

    /// The countdown ended and the frame is about to be grabbed.
    fn flash(&mut self) {}

    /// The shutter fired and `photo` was stored.
    fn shutter(&mut self, _photo: &CapturedPhoto) {}
}

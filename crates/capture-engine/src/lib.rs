//! Chacha Photobooth Capture Engine
//!
//! Drives the fixed three-shot capture flow: a countdown, a single frame
//! grab from the camera, and slot assignment in the session.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               CaptureSequencer               │
//! │  ┌───────────┐  ┌─────────────┐  ┌─────────┐ │
//! │  │ Countdown │─▶│ FrameSource │─▶│ Shutter │ │
//! │  │  3 → 1    │  │ (webcam)    │  │ mirror  │ │
//! │  └───────────┘  └──────┬──────┘  └────┬────┘ │
//! │                        ▼              │      │
//! │         ffplay ◀─ FrameStream         │      │
//! │                                       ▼      │
//! │                 Session (photos[0..3])       │
//! │                        │                     │
//! │                        ▼                     │
//! │                 SessionRenderer              │
//! └──────────────────────────────────────────────┘
//! ```

pub mod countdown;
pub mod sequencer;
pub mod shutter;
pub mod source;

pub use countdown::Countdown;
pub use sequencer::CaptureSequencer;
pub use source::{FfmpegWebcam, FrameSource, StillFrameSource};

//! Chacha Photobooth Render Engine
//!
//! Composites captured photos into a printable strip and encodes it.
//!
//! # Pipeline Architecture
//!
//! ```text
//! white 1200x3150 canvas
//!          │
//! photos[0..3] ──┤ decode (async, in order)
//!                ├── aspect-fill into slot rectangles
//! theme overlay ─┤ load (async), stretch to canvas
//!                ├── alpha blend
//! date stamp ────┤ centred text, theme colour
//!                ▼
//!           PNG encode
//!                │
//!                ▼
//!   chacha-photobooth-<M-D-YYYY>.png
//! ```

pub mod compositor;
pub mod export;
pub mod fill;
pub mod layout;
pub mod load;
pub mod stamp;

pub use compositor::*;
pub use export::*;
pub use layout::*;

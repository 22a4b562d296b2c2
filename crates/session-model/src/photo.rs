//! Captured photo type.

/// One still produced by a shutter event.
///
/// Holds the encoded image (already mirrored for a selfie view) rather than
/// raw pixels; the compositor decodes it at export time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    /// Slot index in the strip (0-based, capture order).
    pub slot: usize,

    /// Pixel width of the encoded image.
    pub width: u32,

    /// Pixel height of the encoded image.
    pub height: u32,

    /// Encoded image bytes (JPEG for camera captures).
    pub encoded: Vec<u8>,
}

impl CapturedPhoto {
    pub fn new(slot: usize, width: u32, height: u32, encoded: Vec<u8>) -> Self {
        Self {
            slot,
            width,
            height,
            encoded,
        }
    }
}

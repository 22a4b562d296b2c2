//! Turning a raw camera frame into a stored shot.

use std::io::Cursor;

use chacha_common::error::{BoothError, BoothResult};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, RgbaImage};

/// JPEG quality used for stored shots.
pub const SHOT_JPEG_QUALITY: u8 = 100;

/// A mirrored, encoded frame ready to be placed in a slot.
#[derive(Debug, Clone)]
pub struct Shot {
    pub width: u32,
    pub height: u32,
    pub encoded: Vec<u8>,
}

/// Mirror a frame horizontally (selfie view) and encode it as JPEG.
pub fn develop(mut frame: RgbaImage) -> BoothResult<Shot> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return Err(BoothError::capture("Camera returned an empty frame"));
    }

    imageops::flip_horizontal_in_place(&mut frame);
    let rgb = DynamicImage::ImageRgba8(frame).to_rgb8();

    let mut encoded = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut encoded, SHOT_JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| BoothError::capture(format!("Failed to encode shot: {e}")))?;

    Ok(Shot {
        width,
        height,
        encoded: encoded.into_inner(),
    })
}

/// [`develop`] on the blocking pool.
pub async fn develop_async(frame: RgbaImage) -> BoothResult<Shot> {
    tokio::task::spawn_blocking(move || develop(frame))
        .await
        .map_err(|e| BoothError::capture(format!("Shot encode task failed: {e}")))?
}

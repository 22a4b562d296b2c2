//! Frame source backed by still images.
//!
//! Serves prepared frames in order, wrapping around when exhausted. Used to
//! build strips from existing photos and to drive the sequencer without a
//! camera.

use std::path::PathBuf;

use chacha_common::error::{BoothError, BoothResult};
use image::RgbaImage;

use super::FrameSource;

pub struct StillFrameSource {
    paths: Vec<PathBuf>,
    frames: Vec<RgbaImage>,
    next: usize,
}

impl StillFrameSource {
    /// Serve frames that are already in memory.
    pub fn from_images(frames: Vec<RgbaImage>) -> Self {
        Self {
            paths: Vec::new(),
            frames,
            next: 0,
        }
    }

    /// Serve frames decoded from files when the source is opened.
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            frames: Vec::new(),
            next: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len().max(self.paths.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl FrameSource for StillFrameSource {
    async fn open(&mut self) -> BoothResult<()> {
        if !self.frames.is_empty() {
            return Ok(());
        }

        for path in &self.paths {
            if !path.exists() {
                return Err(BoothError::FileNotFound { path: path.clone() });
            }
            let bytes = tokio::fs::read(path).await?;
            let frame = tokio::task::spawn_blocking(move || {
                image::load_from_memory(&bytes).map(|img| img.to_rgba8())
            })
            .await
            .map_err(|e| BoothError::capture(format!("Frame decode task failed: {e}")))?
            .map_err(|e| {
                BoothError::capture(format!("Failed to decode {}: {e}", path.display()))
            })?;
            tracing::debug!(path = %path.display(), "Loaded still frame");
            self.frames.push(frame);
        }

        if self.frames.is_empty() {
            return Err(BoothError::camera_unavailable("No still frames to serve"));
        }
        Ok(())
    }

    async fn grab_frame(&mut self) -> BoothResult<RgbaImage> {
        if self.frames.is_empty() {
            return Err(BoothError::capture("Still frame source has no frames"));
        }
        let frame = self.frames[self.next % self.frames.len()].clone();
        self.next += 1;
        Ok(frame)
    }

    fn describe(&self) -> String {
        format!("{} still frame(s)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    #[tokio::test]
    async fn serves_frames_in_order_and_wraps() {
        let frames = (0..2u8)
            .map(|v| RgbaImage::from_pixel(2, 2, Rgba([v, v, v, 255])))
            .collect();
        let mut source = StillFrameSource::from_images(frames);
        source.open().await.unwrap();

        let values: Vec<u8> = [
            source.grab_frame().await.unwrap(),
            source.grab_frame().await.unwrap(),
            source.grab_frame().await.unwrap(),
        ]
        .iter()
        .map(|f| f.get_pixel(0, 0)[0])
        .collect();
        assert_eq!(values, vec![0, 1, 0]);
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let mut source =
            StillFrameSource::from_paths(vec![PathBuf::from("/nonexistent/chacha.png")]);
        let err = source.open().await.unwrap_err();
        assert!(matches!(err, BoothError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn empty_source_cannot_open() {
        let mut source = StillFrameSource::from_images(Vec::new());
        assert!(source.is_empty());
        assert!(source.open().await.is_err());
        assert!(source.grab_frame().await.is_err());
    }
}

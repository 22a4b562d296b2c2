//! Strip export: compose, encode, deliver.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use chacha_common::datestamp::DateStamp;
use chacha_common::error::{BoothError, BoothResult};
use chacha_session_model::{CapturedPhoto, Theme};
use image::{ImageFormat, RgbaImage};

use crate::compositor::{CompositionReport, StripCompositor};

/// File name prefix of every exported strip.
pub const STRIP_FILE_PREFIX: &str = "chacha-photobooth";

/// Stages of the export process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Compositing,
    Encoding,
    Complete,
}

/// Progress callback for export.
pub type ProgressCallback<'a> = &'a (dyn Fn(ExportStage) + Send + Sync);

/// A finished strip, ready to be written or offered for download.
#[derive(Debug, Clone)]
pub struct StripArtifact {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// PNG-encoded strip.
    pub png: Vec<u8>,
    pub report: CompositionReport,
}

impl StripArtifact {
    /// Write the strip into `dir` under its file name.
    pub async fn save_to(&self, dir: &Path) -> BoothResult<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.png).await?;
        tracing::info!(
            path = %path.display(),
            bytes = self.png.len(),
            "Strip written"
        );
        Ok(path)
    }
}

/// File name for a strip made on `date`, e.g.
/// `chacha-photobooth-10-18-2026.png`.
pub fn strip_file_name(date: &DateStamp) -> String {
    format!("{STRIP_FILE_PREFIX}-{}.png", date.file_safe())
}

/// Encode a canvas as PNG.
pub fn encode_png(canvas: &RgbaImage) -> BoothResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    canvas
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| BoothError::render(format!("Failed to encode strip: {e}")))?;
    Ok(out.into_inner())
}

/// Compose and encode a strip from the captured photos.
///
/// Returns `Ok(None)` without doing any work when there are no photos.
pub async fn export_strip(
    compositor: &StripCompositor,
    photos: &[CapturedPhoto],
    theme: Theme,
    date: &DateStamp,
    progress: Option<ProgressCallback<'_>>,
) -> BoothResult<Option<StripArtifact>> {
    if photos.is_empty() {
        tracing::info!("No photos captured; nothing to export");
        return Ok(None);
    }

    tracing::info!(photos = photos.len(), %theme, date = %date, "Starting export");
    let report_stage = |stage: ExportStage| {
        if let Some(cb) = progress {
            cb(stage);
        }
    };

    report_stage(ExportStage::Compositing);
    let (canvas, report) = compositor.compose(photos, theme, date).await;

    report_stage(ExportStage::Encoding);
    let (width, height) = canvas.dimensions();
    let png = tokio::task::spawn_blocking(move || encode_png(&canvas))
        .await
        .map_err(|e| BoothError::render(format!("Encode task failed: {e}")))??;

    report_stage(ExportStage::Complete);
    Ok(Some(StripArtifact {
        file_name: strip_file_name(date),
        width,
        height,
        png,
        report,
    }))
}

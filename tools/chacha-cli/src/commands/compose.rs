//! Build a strip from photo files already on disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chacha_common::config::AppConfig;
use chacha_common::datestamp::DateStamp;
use chacha_render_engine::export::export_strip;
use chacha_render_engine::LayerOutcome;
use chacha_session_model::{CapturedPhoto, TOTAL_STEPS};

pub async fn run(
    config: AppConfig,
    images: Vec<PathBuf>,
    theme: Option<String>,
    output: Option<PathBuf>,
    date: Option<String>,
) -> anyhow::Result<()> {
    let theme = super::resolve_theme(theme.as_deref(), &config)?;
    let output_dir = super::resolve_output(output, &config);
    let date = match date {
        Some(s) => DateStamp::parse_iso(&s)
            .with_context(|| format!("Invalid date '{s}', expected YYYY-MM-DD"))?,
        None => DateStamp::today(),
    };

    if images.len() > TOTAL_STEPS {
        println!("Using the first {TOTAL_STEPS} of {} images", images.len());
    }

    let mut photos = Vec::with_capacity(TOTAL_STEPS);
    for (slot, path) in images.iter().take(TOTAL_STEPS).enumerate() {
        photos.push(read_photo(slot, path).await?);
    }

    let compositor = super::build_compositor(&config).await?;
    let artifact = export_strip(&compositor, &photos, theme, &date, None)
        .await?
        .context("No photos to compose")?;

    for (slot, outcome) in artifact.report.photos.iter().enumerate() {
        if let LayerOutcome::Skipped { reason } = outcome {
            println!("[WARN] Photo {} skipped: {reason}", slot + 1);
        }
    }
    if let LayerOutcome::Skipped { reason } = &artifact.report.overlay {
        println!("[WARN] Overlay skipped: {reason}");
    }
    if let LayerOutcome::Skipped { reason } = &artifact.report.stamp {
        println!("[WARN] Date stamp skipped: {reason}");
    }

    let path = artifact.save_to(&output_dir).await?;
    println!(
        "Strip saved: {} ({}x{}, {} theme, {})",
        path.display(),
        artifact.width,
        artifact.height,
        theme,
        date
    );
    Ok(())
}

/// Read a photo file as an encoded capture for `slot`.
///
/// Undecodable files are kept with zero dimensions; the compositor reports
/// and skips them.
async fn read_photo(slot: usize, path: &Path) -> anyhow::Result<CapturedPhoto> {
    let encoded = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let (width, height) = image::image_dimensions(path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Could not read image dimensions");
        (0, 0)
    });
    Ok(CapturedPhoto::new(slot, width, height, encoded))
}

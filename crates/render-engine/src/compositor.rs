//! Strip compositor: photos, frame overlay, and date stamp on one canvas.
//!
//! Layers are drawn strictly in order. Each image load is awaited before the
//! next layer starts; a failed load skips only its own layer.

use std::path::{Path, PathBuf};

use chacha_common::datestamp::DateStamp;
use chacha_common::error::BoothResult;
use chacha_session_model::{CapturedPhoto, Theme};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::fill::draw_aspect_fill;
use crate::layout::StripLayout;
use crate::load::{decode_image, load_image_file, ImageLoad};
use crate::stamp::{draw_centered_text, StampFont};

/// What happened to one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerOutcome {
    Drawn,
    Skipped { reason: String },
}

impl LayerOutcome {
    pub fn is_drawn(&self) -> bool {
        matches!(self, LayerOutcome::Drawn)
    }
}

/// Per-layer record of a composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionReport {
    /// One entry per input photo, in slot order.
    pub photos: Vec<LayerOutcome>,
    pub overlay: LayerOutcome,
    pub stamp: LayerOutcome,
}

impl CompositionReport {
    pub fn photos_drawn(&self) -> usize {
        self.photos.iter().filter(|p| p.is_drawn()).count()
    }

    /// Whether every layer made it onto the canvas.
    pub fn is_complete(&self) -> bool {
        self.photos.iter().all(LayerOutcome::is_drawn)
            && self.overlay.is_drawn()
            && self.stamp.is_drawn()
    }
}

/// Builds strip canvases.
#[derive(Debug, Clone)]
pub struct StripCompositor {
    layout: StripLayout,
    assets_dir: PathBuf,
    font: Option<StampFont>,
}

impl StripCompositor {
    pub fn new(layout: StripLayout, assets_dir: impl Into<PathBuf>) -> BoothResult<Self> {
        layout.validate()?;
        Ok(Self {
            layout,
            assets_dir: assets_dir.into(),
            font: None,
        })
    }

    /// Use `font` for the date stamp. Without a font the stamp is skipped.
    pub fn with_font(mut self, font: Option<StampFont>) -> Self {
        self.font = font;
        self
    }

    pub fn layout(&self) -> &StripLayout {
        &self.layout
    }

    /// Overlay image used for `theme`.
    pub fn overlay_path(&self, theme: Theme) -> PathBuf {
        overlay_asset_path(&self.assets_dir, theme)
    }

    /// Composite `photos` onto a fresh canvas.
    pub async fn compose(
        &self,
        photos: &[CapturedPhoto],
        theme: Theme,
        date: &DateStamp,
    ) -> (RgbaImage, CompositionReport) {
        let (w, h) = (self.layout.canvas_width, self.layout.canvas_height);
        let mut canvas = RgbaImage::new(w, h);
        draw_filled_rect_mut(
            &mut canvas,
            Rect::at(0, 0).of_size(w, h),
            Rgba([255, 255, 255, 255]),
        );

        let mut photo_outcomes = Vec::with_capacity(photos.len());
        for (index, photo) in photos.iter().enumerate() {
            let outcome = self.draw_photo(&mut canvas, index, photo).await;
            photo_outcomes.push(outcome);
        }

        let overlay = self.draw_overlay(&mut canvas, theme).await;
        let stamp = self.draw_stamp(&mut canvas, theme, date);

        let report = CompositionReport {
            photos: photo_outcomes,
            overlay,
            stamp,
        };
        tracing::debug!(
            photos_drawn = report.photos_drawn(),
            overlay = report.overlay.is_drawn(),
            stamp = report.stamp.is_drawn(),
            "Strip composed"
        );
        (canvas, report)
    }

    async fn draw_photo(
        &self,
        canvas: &mut RgbaImage,
        index: usize,
        photo: &CapturedPhoto,
    ) -> LayerOutcome {
        let Some(rect) = self.layout.slot(index) else {
            tracing::debug!(index, "No slot for photo; ignoring");
            return LayerOutcome::Skipped {
                reason: format!("layout has no slot {index}"),
            };
        };

        match decode_image(format!("photo {index}"), photo.encoded.clone()).await {
            ImageLoad::Loaded(img) => {
                if draw_aspect_fill(canvas, &img, rect) {
                    LayerOutcome::Drawn
                } else {
                    LayerOutcome::Skipped {
                        reason: format!("photo {index} has no pixels"),
                    }
                }
            }
            ImageLoad::Failed { what, reason } => {
                tracing::warn!(%what, %reason, "Photo failed to load; slot left blank");
                LayerOutcome::Skipped { reason }
            }
        }
    }

    async fn draw_overlay(&self, canvas: &mut RgbaImage, theme: Theme) -> LayerOutcome {
        let path = self.overlay_path(theme);
        match load_image_file(&path).await {
            ImageLoad::Loaded(overlay) => {
                let stretched = stretch(&overlay, canvas.width(), canvas.height());
                imageops::overlay(canvas, &stretched, 0, 0);
                LayerOutcome::Drawn
            }
            ImageLoad::Failed { what, reason } => {
                tracing::warn!(%what, %reason, "Frame overlay failed to load; skipping layer");
                LayerOutcome::Skipped { reason }
            }
        }
    }

    fn draw_stamp(&self, canvas: &mut RgbaImage, theme: Theme, date: &DateStamp) -> LayerOutcome {
        let Some(font) = &self.font else {
            tracing::warn!("No stamp font available; skipping date stamp");
            return LayerOutcome::Skipped {
                reason: "no stamp font available".to_string(),
            };
        };

        let text = date.display_text();
        let placement = self.layout.stamp;
        match draw_centered_text(
            canvas,
            font,
            &text,
            placement.size_px,
            placement.center_x,
            placement.baseline_y,
            theme.stamp_color(),
        ) {
            Some(_) => LayerOutcome::Drawn,
            None => LayerOutcome::Skipped {
                reason: format!("stamp '{text}' fell outside the canvas"),
            },
        }
    }
}

fn stretch(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width, height, FilterType::Triangle)
}

/// Overlay asset path for a theme within `assets_dir`.
pub fn overlay_asset_path(assets_dir: &Path, theme: Theme) -> PathBuf {
    assets_dir.join(theme.overlay_asset())
}

//! Date stamp text rendering.

use std::path::{Path, PathBuf};

use chacha_common::error::{BoothError, BoothResult};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

/// Bold monospace fonts tried, in order, when no font is configured.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts/Courier_New_Bold.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/courbd.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Bold.ttf",
    "/usr/share/fonts/truetype/liberation2/LiberationMono-Bold.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Bold.ttf",
    "/usr/share/fonts/liberation-mono-fonts/LiberationMono-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationMono-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Courier New Bold.ttf",
    "/Library/Fonts/Courier New Bold.ttf",
    "C:\\Windows\\Fonts\\courbd.ttf",
];

/// DejaVu Sans Mono Bold, used when no system font is found.
const EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono-Bold.ttf");

/// Where a stamp font came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    Embedded,
}

impl std::fmt::Display for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontSource::File(path) => write!(f, "{}", path.display()),
            FontSource::Embedded => f.write_str("built-in DejaVu Sans Mono Bold"),
        }
    }
}

/// A loaded stamp font.
#[derive(Clone)]
pub struct StampFont {
    font: Font<'static>,
    source: FontSource,
}

impl std::fmt::Debug for StampFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StampFont")
            .field("source", &self.source)
            .finish()
    }
}

impl StampFont {
    pub fn from_bytes(bytes: Vec<u8>, source: impl Into<PathBuf>) -> BoothResult<Self> {
        let source = source.into();
        let font = Font::try_from_vec(bytes).ok_or_else(|| {
            BoothError::render(format!("{} is not a usable font", source.display()))
        })?;
        Ok(Self {
            font,
            source: FontSource::File(source),
        })
    }

    /// The font compiled into the binary.
    pub fn embedded() -> BoothResult<Self> {
        let font = Font::try_from_bytes(EMBEDDED_FONT)
            .ok_or_else(|| BoothError::render("Built-in stamp font is corrupt"))?;
        Ok(Self {
            font,
            source: FontSource::Embedded,
        })
    }

    pub async fn load(path: &Path) -> BoothResult<Self> {
        if !path.exists() {
            return Err(BoothError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let bytes = tokio::fs::read(path).await?;
        Self::from_bytes(bytes, path)
    }

    /// Load the configured font, else the first well-known system font,
    /// else the built-in font.
    pub async fn resolve(configured: Option<&Path>) -> BoothResult<Self> {
        if let Some(path) = configured {
            match Self::load(path).await {
                Ok(font) => return Ok(font),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Configured stamp font unusable");
                }
            }
        }

        for candidate in FONT_CANDIDATES {
            let path = Path::new(candidate);
            if !path.exists() {
                continue;
            }
            match Self::load(path).await {
                Ok(font) => {
                    tracing::debug!(path = %path.display(), "Using system stamp font");
                    return Ok(font);
                }
                Err(e) => tracing::debug!(path = %path.display(), error = %e, "Skipping font"),
            }
        }

        tracing::debug!("No system stamp font found; using built-in font");
        Self::embedded()
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Rusttype scale for a CSS font size (em height in pixels).
    fn scale_for(&self, size_px: f32) -> Scale {
        let v = self.font.v_metrics_unscaled();
        let units_per_em = self.font.units_per_em().max(1) as f32;
        Scale::uniform(size_px * (v.ascent - v.descent) / units_per_em)
    }

    /// Advance width of `text` at `size_px`.
    pub fn text_width(&self, text: &str, size_px: f32) -> f32 {
        let scale = self.scale_for(size_px);
        self.font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }
}

/// Pixel extent actually touched by a text draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

/// Draw `text` horizontally centred on `center_x` with its baseline at
/// `baseline_y`, alpha-blended over the canvas.
///
/// Returns the painted bounds, or `None` if no glyph produced pixels.
pub fn draw_centered_text(
    canvas: &mut RgbaImage,
    font: &StampFont,
    text: &str,
    size_px: f32,
    center_x: f32,
    baseline_y: f32,
    color: [u8; 3],
) -> Option<TextBounds> {
    let scale = font.scale_for(size_px);
    let start_x = center_x - font.text_width(text, size_px) / 2.0;
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);
    let mut bounds: Option<TextBounds> = None;

    for glyph in font.font.layout(text, scale, point(start_x, baseline_y)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let x = bb.min.x + gx as i32;
            let y = bb.min.y + gy as i32;
            if coverage <= 0.0 || x < 0 || y < 0 || x >= width || y >= height {
                return;
            }
            let px = canvas.get_pixel_mut(x as u32, y as u32);
            *px = blend(*px, color, coverage.min(1.0));

            let b = bounds.get_or_insert(TextBounds {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            });
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        });
    }

    bounds
}

fn blend(dst: Rgba<u8>, color: [u8; 3], alpha: f32) -> Rgba<u8> {
    let mix = |d: u8, c: u8| (d as f32 * (1.0 - alpha) + c as f32 * alpha).round() as u8;
    let a = (dst[3] as f32).max(alpha * 255.0).round() as u8;
    Rgba([
        mix(dst[0], color[0]),
        mix(dst[1], color[1]),
        mix(dst[2], color[2]),
        a,
    ])
}

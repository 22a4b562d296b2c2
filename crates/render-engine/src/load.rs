//! Asynchronous image loading.
//!
//! A load never fails the caller: it resolves to either the decoded pixels
//! or an explicit [`ImageLoad::Failed`] the compositor can report and skip.

use std::path::Path;

use image::RgbaImage;

/// Outcome of loading one image.
#[derive(Debug)]
pub enum ImageLoad {
    Loaded(RgbaImage),
    Failed { what: String, reason: String },
}

impl ImageLoad {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ImageLoad::Loaded(_))
    }

    pub fn into_image(self) -> Option<RgbaImage> {
        match self {
            ImageLoad::Loaded(img) => Some(img),
            ImageLoad::Failed { .. } => None,
        }
    }

    fn failed(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        ImageLoad::Failed {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}

/// Decode encoded image bytes on the blocking pool.
pub async fn decode_image(what: impl Into<String>, bytes: Vec<u8>) -> ImageLoad {
    let what = what.into();
    let decoded =
        tokio::task::spawn_blocking(move || image::load_from_memory(&bytes).map(|i| i.to_rgba8()))
            .await;

    match decoded {
        Ok(Ok(img)) => ImageLoad::Loaded(img),
        Ok(Err(e)) => ImageLoad::failed(what, e),
        Err(e) => ImageLoad::failed(what, format!("decode task failed: {e}")),
    }
}

/// Read and decode an image file.
pub async fn load_image_file(path: &Path) -> ImageLoad {
    let what = path.display().to_string();
    match tokio::fs::read(path).await {
        Ok(bytes) => decode_image(what, bytes).await,
        Err(e) => ImageLoad::failed(what, e),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba};

    use super::*;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn decodes_valid_bytes() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        let load = decode_image("sample", png_bytes(&img)).await;
        assert!(load.is_loaded());
        assert_eq!(load.into_image().unwrap().dimensions(), (3, 2));
    }

    #[tokio::test]
    async fn garbage_is_an_explicit_failure() {
        match decode_image("junk", vec![0, 1, 2, 3]).await {
            ImageLoad::Failed { what, .. } => assert_eq!(what, "junk"),
            ImageLoad::Loaded(_) => panic!("garbage should not decode"),
        }
    }

    #[tokio::test]
    async fn missing_file_is_an_explicit_failure() {
        let load = load_image_file(Path::new("/nonexistent/pinkthimi.png")).await;
        assert!(!load.is_loaded());
        assert!(load.into_image().is_none());
    }
}

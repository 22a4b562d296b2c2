use chacha_common::error::BoothResult;
use image::RgbaImage;

pub mod preview;
pub mod still;
pub mod stream;
pub mod webcam;

pub use preview::FramePreview;
pub use still::StillFrameSource;
pub use stream::FrameStream;
pub use webcam::FfmpegWebcam;

/// A source of still frames for the shutter.
#[async_trait::async_trait]
pub trait FrameSource: Send {
    /// Acquire the device. Called once before the first grab.
    async fn open(&mut self) -> BoothResult<()>;

    /// Grab exactly one frame from the live feed.
    async fn grab_frame(&mut self) -> BoothResult<RgbaImage>;

    /// Human-readable description for logs and `chacha check`.
    fn describe(&self) -> String;
}

#[async_trait::async_trait]
impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    async fn open(&mut self) -> BoothResult<()> {
        (**self).open().await
    }

    async fn grab_frame(&mut self) -> BoothResult<RgbaImage> {
        (**self).grab_frame().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

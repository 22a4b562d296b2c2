//! Raw RGBA frame stream read continuously from a pipe.

use std::time::Duration;

use chacha_common::error::{BoothError, BoothResult};
use image::RgbaImage;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::preview::FramePreview;

/// Background reader that keeps only the newest frame.
pub struct FrameStream {
    frames: watch::Receiver<Option<RgbaImage>>,
    pump: JoinHandle<()>,
}

impl FrameStream {
    /// Start reading `width × height` RGBA frames from `reader`. Every frame
    /// is also forwarded to `preview` until the preview goes away.
    pub fn spawn<R>(reader: R, width: u32, height: u32, preview: Option<FramePreview>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, frames) = watch::channel(None);
        let pump = tokio::spawn(pump_frames(reader, width, height, tx, preview));
        Self { frames, pump }
    }

    /// Wait up to `timeout` for a frame newer than the last one returned.
    pub async fn next_frame(&mut self, timeout: Duration) -> BoothResult<RgbaImage> {
        match tokio::time::timeout(timeout, self.frames.changed()).await {
            Err(_) => Err(BoothError::capture(format!(
                "No camera frame within {}ms",
                timeout.as_millis()
            ))),
            Ok(Err(_)) => Err(BoothError::capture("Camera stream ended")),
            Ok(Ok(())) => self
                .frames
                .borrow_and_update()
                .clone()
                .ok_or_else(|| BoothError::capture("Camera stream produced no frame")),
        }
    }
}

impl Drop for FrameStream {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

async fn pump_frames<R>(
    mut reader: R,
    width: u32,
    height: u32,
    tx: watch::Sender<Option<RgbaImage>>,
    mut preview: Option<FramePreview>,
) where
    R: AsyncRead + Unpin,
{
    let frame_len = width as usize * height as usize * 4;
    let mut buf = vec![0u8; frame_len];
    let mut count: u64 = 0;

    loop {
        if let Err(e) = reader.read_exact(&mut buf).await {
            tracing::debug!(error = %e, frames = count, "Camera stream closed");
            return;
        }
        count += 1;

        let closed = match preview.as_mut() {
            Some(p) => p.show(&buf).await.err(),
            None => None,
        };
        if let Some(e) = closed {
            tracing::info!(error = %e, "Preview window closed");
            preview = None;
        }

        let Some(frame) = RgbaImage::from_raw(width, height, buf) else {
            return;
        };
        // Recycle the previous frame's buffer for the next read.
        buf = match tx.send_replace(Some(frame)) {
            Some(old) => old.into_raw(),
            None => vec![0u8; frame_len],
        };
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncWriteExt;

    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn serves_each_new_frame_once() {
        let (mut camera, feed) = tokio::io::duplex(256);
        let mut stream = FrameStream::spawn(feed, 2, 1, None);

        camera.write_all(&[1, 2, 3, 4, 5, 6, 7, 8]).await.unwrap();
        let frame = stream.next_frame(WAIT).await.unwrap();
        assert_eq!(frame.dimensions(), (2, 1));
        assert_eq!(frame.as_raw().as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);

        // Nothing new has arrived, so the old frame is not served again.
        let err = stream.next_frame(Duration::from_millis(50)).await.unwrap_err();
        assert!(matches!(err, BoothError::Capture { .. }));

        camera.write_all(&[9; 8]).await.unwrap();
        let frame = stream.next_frame(WAIT).await.unwrap();
        assert_eq!(frame.as_raw().as_slice(), &[9; 8]);
    }

    #[tokio::test]
    async fn frames_split_across_writes_are_reassembled() {
        let (mut camera, feed) = tokio::io::duplex(256);
        let mut stream = FrameStream::spawn(feed, 1, 2, None);

        camera.write_all(&[10, 20, 30]).await.unwrap();
        camera.write_all(&[40, 50, 60, 70, 80]).await.unwrap();
        let frame = stream.next_frame(WAIT).await.unwrap();
        assert_eq!(frame.as_raw().as_slice(), &[10, 20, 30, 40, 50, 60, 70, 80]);
    }

    #[tokio::test]
    async fn closed_pipe_ends_the_stream() {
        let (camera, feed) = tokio::io::duplex(256);
        let mut stream = FrameStream::spawn(feed, 2, 2, None);
        drop(camera);

        let err = stream.next_frame(WAIT).await.unwrap_err();
        assert!(err.to_string().contains("ended"));
    }
}

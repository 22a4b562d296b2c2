//! Live camera preview through `ffplay`.
//!
//! The camera can only be opened once, so the preview is fed the same raw
//! frames the shutter reads instead of opening the device itself.

use std::process::Stdio;

use chacha_common::error::{BoothError, BoothResult};
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};

use super::webcam::binary_available;

/// Width of the preview window; height follows the frame aspect.
pub const PREVIEW_WINDOW_WIDTH: u32 = 640;

/// A preview window. Closed when dropped.
pub struct FramePreview {
    _child: Child,
    stdin: ChildStdin,
}

impl FramePreview {
    /// Open a preview window for `width × height` RGBA frames at `fps`.
    pub fn spawn(width: u32, height: u32, fps: u32) -> BoothResult<Self> {
        if !binary_available("ffplay") {
            return Err(BoothError::capture("ffplay not found in PATH"));
        }

        let mut child = Command::new("ffplay")
            .args(preview_args(width, height, fps))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BoothError::capture(format!("Failed to start preview: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BoothError::capture("Preview has no input pipe"))?;

        tracing::debug!(width, height, fps, "Preview window started");
        Ok(Self {
            _child: child,
            stdin,
        })
    }

    /// Show one raw RGBA frame. Fails once the window has been closed.
    pub async fn show(&mut self, frame: &[u8]) -> std::io::Result<()> {
        self.stdin.write_all(frame).await
    }
}

/// `ffplay` arguments for a mirrored, low-latency raw RGBA preview.
pub fn preview_args(width: u32, height: u32, fps: u32) -> Vec<String> {
    let window_height = (PREVIEW_WINDOW_WIDTH as u64 * height as u64 / width.max(1) as u64).max(1);
    let mut args: Vec<String> = [
        "-loglevel",
        "error",
        "-nostats",
        "-fflags",
        "nobuffer",
        "-flags",
        "low_delay",
        "-f",
        "rawvideo",
        "-pixel_format",
        "rgba",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    args.extend([
        "-video_size".to_string(),
        format!("{width}x{height}"),
        "-framerate".to_string(),
        fps.to_string(),
        "-vf".to_string(),
        "hflip".to_string(),
        "-x".to_string(),
        PREVIEW_WINDOW_WIDTH.to_string(),
        "-y".to_string(),
        window_height.to_string(),
        "-window_title".to_string(),
        "Chacha Photobooth".to_string(),
        "-i".to_string(),
        "-".to_string(),
    ]);
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.windows(2)
            .find(|w| w[0] == flag)
            .map(|w| w[1].as_str())
    }

    #[test]
    fn preview_reads_mirrored_raw_frames_from_stdin() {
        let args = preview_args(1920, 1080, 15);
        assert_eq!(value_of(&args, "-f"), Some("rawvideo"));
        assert_eq!(value_of(&args, "-pixel_format"), Some("rgba"));
        assert_eq!(value_of(&args, "-video_size"), Some("1920x1080"));
        assert_eq!(value_of(&args, "-framerate"), Some("15"));
        assert_eq!(value_of(&args, "-vf"), Some("hflip"));
        assert_eq!(value_of(&args, "-i"), Some("-"));
    }

    #[test]
    fn window_keeps_the_frame_aspect() {
        let args = preview_args(1920, 1080, 15);
        assert_eq!(value_of(&args, "-x"), Some("640"));
        assert_eq!(value_of(&args, "-y"), Some("360"));
    }
}

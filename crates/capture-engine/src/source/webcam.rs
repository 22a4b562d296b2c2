//! Webcam frames via the `ffmpeg` binary.
//!
//! [`FrameSource::open`] starts one long-lived `ffmpeg` process that streams
//! raw RGBA frames from the device; each grab takes the next frame from that
//! stream. The process is killed when the webcam is dropped.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use chacha_common::config::CameraDefaults;
use chacha_common::error::{BoothError, BoothResult};
use image::RgbaImage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, Command};

use super::preview::FramePreview;
use super::stream::FrameStream;
use super::FrameSource;

/// Frame rate of the raw stream and the preview.
pub const STREAM_FPS: u32 = 15;

/// How long the device may take to deliver its first frame.
const FIRST_FRAME_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a grab waits for the next frame.
const FRAME_TIMEOUT: Duration = Duration::from_secs(2);

pub struct FfmpegWebcam {
    configured_device: Option<String>,
    width: u32,
    height: u32,
    preview: bool,
    device: Option<String>,
    stream: Option<FrameStream>,
    _child: Option<Child>,
}

impl FfmpegWebcam {
    pub fn new(config: &CameraDefaults) -> Self {
        Self {
            configured_device: config.device.clone(),
            width: config.width,
            height: config.height,
            preview: config.preview,
            device: None,
            stream: None,
            _child: None,
        }
    }

    /// Device opened by [`FrameSource::open`], if any.
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    /// Arguments for a continuous raw RGBA stream at the configured size.
    fn stream_args(&self, device: &str) -> Vec<String> {
        let mut args: Vec<String> = ["-hide_banner", "-loglevel", "error", "-nostdin"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        args.extend(input_args(device, self.width, self.height));
        args.extend([
            "-vf".to_string(),
            format!("fps={STREAM_FPS},scale={}:{}", self.width, self.height),
            "-f".to_string(),
            "rawvideo".to_string(),
            "-pix_fmt".to_string(),
            "rgba".to_string(),
            "-".to_string(),
        ]);
        args
    }

    fn start_preview(&self) -> Option<FramePreview> {
        if !self.preview {
            return None;
        }
        match FramePreview::spawn(self.width, self.height, STREAM_FPS) {
            Ok(preview) => Some(preview),
            Err(e) => {
                tracing::warn!(error = %e, "Live preview unavailable; continuing without it");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl FrameSource for FfmpegWebcam {
    async fn open(&mut self) -> BoothResult<()> {
        if self.stream.is_some() {
            return Ok(());
        }
        if !binary_available("ffmpeg") {
            return Err(BoothError::camera_unavailable("ffmpeg not found in PATH"));
        }

        let device = self
            .configured_device
            .clone()
            .or_else(detect_default_webcam_device)
            .ok_or_else(|| BoothError::camera_unavailable("No webcam device found"))?;

        if device_is_path(&device) && !Path::new(&device).exists() {
            return Err(BoothError::camera_unavailable(format!(
                "Webcam device {device} does not exist"
            )));
        }

        let mut child = Command::new("ffmpeg")
            .args(self.stream_args(&device))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BoothError::camera_unavailable(format!("Failed to start ffmpeg: {e}")))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BoothError::camera_unavailable("ffmpeg has no output pipe"))?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(log_ffmpeg_errors(stderr));
        }

        let mut stream = FrameStream::spawn(stdout, self.width, self.height, self.start_preview());
        // The device only counts as open once it delivers.
        if let Err(e) = stream.next_frame(FIRST_FRAME_TIMEOUT).await {
            return Err(BoothError::camera_unavailable(format!(
                "Webcam {device} produced no frames: {e}"
            )));
        }

        tracing::info!(
            device = %device,
            pid = ?child.id(),
            width = self.width,
            height = self.height,
            fps = STREAM_FPS,
            preview = self.preview,
            "Opened webcam stream"
        );
        self.device = Some(device);
        self.stream = Some(stream);
        self._child = Some(child);
        Ok(())
    }

    async fn grab_frame(&mut self) -> BoothResult<RgbaImage> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| BoothError::capture("Webcam has not been opened"))?;
        let frame = stream.next_frame(FRAME_TIMEOUT).await?;
        tracing::debug!(width = frame.width(), height = frame.height(), "Grabbed webcam frame");
        Ok(frame)
    }

    fn describe(&self) -> String {
        match (&self.device, &self.configured_device) {
            (Some(device), _) => format!("webcam {device} ({}x{})", self.width, self.height),
            (None, Some(device)) => format!("webcam {device} (not opened)"),
            (None, None) => "webcam (auto-detect)".to_string(),
        }
    }
}

async fn log_ffmpeg_errors(stderr: ChildStderr) {
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        tracing::warn!(target: "ffmpeg", "{line}");
    }
}

#[cfg(target_os = "linux")]
fn input_args(device: &str, width: u32, height: u32) -> Vec<String> {
    vec![
        "-f".into(),
        "video4linux2".into(),
        "-video_size".into(),
        format!("{width}x{height}"),
        "-i".into(),
        device.into(),
    ]
}

#[cfg(target_os = "macos")]
fn input_args(device: &str, width: u32, height: u32) -> Vec<String> {
    vec![
        "-f".into(),
        "avfoundation".into(),
        "-framerate".into(),
        "30".into(),
        "-video_size".into(),
        format!("{width}x{height}"),
        "-i".into(),
        device.into(),
    ]
}

#[cfg(target_os = "windows")]
fn input_args(device: &str, width: u32, height: u32) -> Vec<String> {
    vec![
        "-f".into(),
        "dshow".into(),
        "-video_size".into(),
        format!("{width}x{height}"),
        "-i".into(),
        format!("video={device}"),
    ]
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn input_args(device: &str, _width: u32, _height: u32) -> Vec<String> {
    vec!["-i".into(), device.into()]
}

fn device_is_path(device: &str) -> bool {
    device.starts_with('/')
}

/// First capture device the platform exposes.
pub fn detect_default_webcam_device() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        for idx in 0..16 {
            let candidate = format!("/dev/video{idx}");
            if Path::new(&candidate).exists() {
                return Some(candidate);
            }
        }
        None
    }
    #[cfg(target_os = "macos")]
    {
        // avfoundation index of the built-in camera.
        Some("0".to_string())
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

/// Whether `binary -version` runs successfully (`ffmpeg`, `ffplay`).
pub fn binary_available(binary: &str) -> bool {
    std::process::Command::new(binary)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_args_request_continuous_raw_rgba() {
        let webcam = FfmpegWebcam::new(&CameraDefaults::default());
        let args = webcam.stream_args("/dev/video0");

        assert!(!args.iter().any(|a| a == "-frames:v"));
        assert!(args.windows(2).any(|w| w[0] == "-f" && w[1] == "rawvideo"));
        assert!(args.windows(2).any(|w| w[0] == "-pix_fmt" && w[1] == "rgba"));
        assert!(args
            .windows(2)
            .any(|w| w[0] == "-vf" && w[1] == "fps=15,scale=1920:1080"));
        assert_eq!(args.last().map(String::as_str), Some("-"));
    }

    #[tokio::test]
    async fn grabs_come_from_the_open_stream() {
        use tokio::io::AsyncWriteExt;

        let config = CameraDefaults {
            width: 2,
            height: 1,
            ..CameraDefaults::default()
        };
        let mut webcam = FfmpegWebcam::new(&config);
        let (mut camera, feed) = tokio::io::duplex(64);
        webcam.stream = Some(FrameStream::spawn(feed, 2, 1, None));

        camera.write_all(&[1, 1, 1, 255, 2, 2, 2, 255]).await.unwrap();
        let first = webcam.grab_frame().await.unwrap();
        assert_eq!(first.get_pixel(1, 0).0, [2, 2, 2, 255]);

        camera.write_all(&[7, 7, 7, 255, 8, 8, 8, 255]).await.unwrap();
        let second = webcam.grab_frame().await.unwrap();
        assert_eq!(second.get_pixel(0, 0).0, [7, 7, 7, 255]);
    }

    #[tokio::test]
    async fn open_is_idempotent_once_streaming() {
        let mut webcam = FfmpegWebcam::new(&CameraDefaults::default());
        let (_camera, feed) = tokio::io::duplex(64);
        webcam.stream = Some(FrameStream::spawn(feed, 1920, 1080, None));
        assert!(webcam.open().await.is_ok());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_input_prefers_configured_resolution() {
        let args = input_args("/dev/video0", 1920, 1080);
        assert!(args.windows(2).any(|w| w[0] == "-video_size" && w[1] == "1920x1080"));
        assert!(args.windows(2).any(|w| w[0] == "-i" && w[1] == "/dev/video0"));
    }

    #[tokio::test]
    async fn grab_before_open_is_an_error() {
        let mut webcam = FfmpegWebcam::new(&CameraDefaults::default());
        let err = webcam.grab_frame().await.unwrap_err();
        assert!(matches!(err, BoothError::Capture { .. }));
    }

    #[test]
    fn describe_mentions_configured_device() {
        let config = CameraDefaults {
            device: Some("/dev/video7".to_string()),
            ..CameraDefaults::default()
        };
        let webcam = FfmpegWebcam::new(&config);
        assert!(webcam.describe().contains("/dev/video7"));
    }
}

//! Error types shared across Chacha Photobooth crates.

use std::path::PathBuf;

/// Top-level error type for photobooth operations.
#[derive(Debug, thiserror::Error)]
pub enum BoothError {
    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Camera unavailable: {message}")]
    CameraUnavailable { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using BoothError.
pub type BoothResult<T> = Result<T, BoothError>;

impl BoothError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn camera_unavailable(msg: impl Into<String>) -> Self {
        Self::CameraUnavailable {
            message: msg.into(),
        }
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_format_messages() {
        let err = BoothError::camera_unavailable("no /dev/video*");
        assert_eq!(err.to_string(), "Camera unavailable: no /dev/video*");

        let err = BoothError::session("capture sequence already complete");
        assert!(err.to_string().starts_with("Session error:"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BoothError = io.into();
        assert!(matches!(err, BoothError::Io(_)));
    }

    #[test]
    fn every_variant_carries_booth_context() {
        let errors = [
            BoothError::capture("grab timed out"),
            BoothError::camera_unavailable("no device"),
            BoothError::session("complete"),
            BoothError::render("bad layout"),
            BoothError::config("bad file"),
            BoothError::FileNotFound {
                path: PathBuf::from("pinkthimi.png"),
            },
            BoothError::Io(std::io::Error::other("pipe closed")),
        ];
        for err in errors {
            // No catch-all variant: every failure maps to a photobooth concern.
            let concern = match &err {
                BoothError::Capture { .. } | BoothError::CameraUnavailable { .. } => "camera",
                BoothError::Session { .. } => "session",
                BoothError::Render { .. } | BoothError::FileNotFound { .. } => "strip",
                BoothError::Config { .. } => "config",
                BoothError::Io(_) => "io",
            };
            assert!(!err.to_string().is_empty(), "{concern} error has no message");
        }
    }
}

//! Interactive capture session.

use std::path::PathBuf;

use chacha_capture_engine::{
    CaptureSequencer, Countdown, FfmpegWebcam, FrameSource, StillFrameSource,
};
use chacha_common::config::{AppConfig, CameraDefaults};
use chacha_common::datestamp::DateStamp;
use chacha_common::error::BoothError;
use chacha_render_engine::export::{export_strip, ExportStage};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::terminal::TerminalRenderer;

pub struct ShootOptions {
    pub theme: Option<String>,
    pub output: Option<PathBuf>,
    pub device: Option<String>,
    pub countdown: Option<u32>,
    pub from_files: Vec<PathBuf>,
    pub auto: bool,
    pub no_preview: bool,
}

/// What the user typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Go,
    ToggleTheme,
    Reset,
    Quit,
    Unknown(String),
}

fn parse_action(line: &str) -> Action {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => Action::Go,
        "t" | "theme" => Action::ToggleTheme,
        "r" | "reset" => Action::Reset,
        "q" | "quit" | "exit" => Action::Quit,
        other => Action::Unknown(other.to_string()),
    }
}

/// Camera config with the command-line overrides applied.
fn camera_settings(config: &AppConfig, options: &ShootOptions) -> CameraDefaults {
    let mut camera = config.camera.clone();
    if options.device.is_some() {
        camera.device = options.device.clone();
    }
    if let Some(secs) = options.countdown {
        camera.countdown_secs = secs;
    }
    if options.no_preview {
        camera.preview = false;
    }
    camera
}

pub async fn run(config: AppConfig, options: ShootOptions) -> anyhow::Result<()> {
    let theme = super::resolve_theme(options.theme.as_deref(), &config)?;
    let camera = camera_settings(&config, &options);
    let live = options.from_files.is_empty();
    let output_dir = super::resolve_output(options.output, &config);

    let mut source: Box<dyn FrameSource> = if live {
        Box::new(FfmpegWebcam::new(&camera))
    } else {
        Box::new(StillFrameSource::from_paths(options.from_files))
    };

    if let Err(e) = source.open().await {
        if matches!(e, BoothError::CameraUnavailable { .. }) {
            println!("Camera unavailable: {e}");
            println!("Run `chacha check` for details.");
        }
        return Err(e.into());
    }
    println!("Chacha Photobooth: using {}", source.describe());
    if live && camera.preview {
        println!("Live preview window: on (--no-preview to disable)");
    }
    println!("Enter: take photo   t: toggle theme   r: reset   q: quit");
    println!();

    let compositor = super::build_compositor(&config).await?;
    let mut sequencer = CaptureSequencer::new(
        source,
        TerminalRenderer::new(),
        Countdown::from_config(&camera),
        theme,
    );

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let action = if options.auto && !sequencer.is_complete() {
            Action::Go
        } else {
            match next_line(&mut input).await? {
                Some(line) => parse_action(&line),
                None => Action::Quit,
            }
        };

        match action {
            Action::Go if !sequencer.is_complete() => {
                if let Err(e) = sequencer.start_capture().await {
                    println!("Capture failed: {e}");
                    if options.auto {
                        return Err(e.into());
                    }
                }
            }
            Action::Go => {
                let date = DateStamp::today();
                let session = sequencer.session();
                let progress = |stage: ExportStage| tracing::debug!(?stage, "Export progress");
                match export_strip(
                    &compositor,
                    session.photos(),
                    session.theme(),
                    &date,
                    Some(&progress),
                )
                .await?
                {
                    Some(artifact) => {
                        let path = artifact.save_to(&output_dir).await?;
                        println!("Strip saved: {}", path.display());
                        if !artifact.report.is_complete() {
                            println!("  (some layers were skipped; see log for details)");
                        }
                    }
                    None => println!("Nothing to export yet."),
                }
                return Ok(());
            }
            Action::ToggleTheme => {
                let next = sequencer.session().theme().toggled();
                sequencer.set_theme(next);
            }
            Action::Reset => sequencer.reset(),
            Action::Quit => {
                println!("Bye!");
                return Ok(());
            }
            Action::Unknown(cmd) => println!("Unknown command: {cmd}"),
        }
    }
}

async fn next_line(input: &mut Lines<BufReader<Stdin>>) -> anyhow::Result<Option<String>> {
    Ok(input.next_line().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prompt_actions() {
        assert_eq!(parse_action(""), Action::Go);
        assert_eq!(parse_action("  \n"), Action::Go);
        assert_eq!(parse_action("T"), Action::ToggleTheme);
        assert_eq!(parse_action("reset"), Action::Reset);
        assert_eq!(parse_action("q"), Action::Quit);
        assert_eq!(parse_action("x"), Action::Unknown("x".to_string()));
    }

    fn options() -> ShootOptions {
        ShootOptions {
            theme: None,
            output: None,
            device: None,
            countdown: None,
            from_files: Vec::new(),
            auto: false,
            no_preview: false,
        }
    }

    #[test]
    fn preview_is_on_unless_disabled() {
        let config = AppConfig::default();
        assert!(camera_settings(&config, &options()).preview);

        let quiet = ShootOptions {
            no_preview: true,
            ..options()
        };
        assert!(!camera_settings(&config, &quiet).preview);
    }

    #[test]
    fn flags_override_camera_config() {
        let overrides = ShootOptions {
            device: Some("/dev/video2".to_string()),
            countdown: Some(0),
            ..options()
        };
        let camera = camera_settings(&AppConfig::default(), &overrides);
        assert_eq!(camera.device.as_deref(), Some("/dev/video2"));
        assert_eq!(camera.countdown_secs, 0);
        assert!(camera.preview);
    }
}

pub mod check;
pub mod compose;
pub mod config;
pub mod shoot;

use std::path::PathBuf;

use chacha_common::config::AppConfig;
use chacha_render_engine::layout::StripLayout;
use chacha_render_engine::stamp::StampFont;
use chacha_render_engine::StripCompositor;
use chacha_session_model::Theme;

/// Theme from a CLI flag, else from config.
pub fn resolve_theme(flag: Option<&str>, config: &AppConfig) -> anyhow::Result<Theme> {
    match flag {
        Some(name) => Ok(name.parse()?),
        None => Ok(config.theme),
    }
}

/// Compositor for the configured assets and stamp font.
pub async fn build_compositor(config: &AppConfig) -> anyhow::Result<StripCompositor> {
    let font = StampFont::resolve(config.stamp_font.as_deref()).await?;
    tracing::debug!(font = %font.source(), "Stamp font loaded");
    let compositor = StripCompositor::new(StripLayout::default(), config.assets_dir.clone())?;
    Ok(compositor.with_font(Some(font)))
}

/// Output directory from a CLI flag, else from config.
pub fn resolve_output(flag: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    flag.unwrap_or_else(|| config.output_dir.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_config_theme() {
        let mut config = AppConfig::default();
        config.theme = Theme::Blue;
        assert_eq!(resolve_theme(None, &config).unwrap(), Theme::Blue);
        assert_eq!(resolve_theme(Some("pink"), &config).unwrap(), Theme::Pink);
        assert!(resolve_theme(Some("green"), &config).is_err());
    }
}

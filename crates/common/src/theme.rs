//! Strip themes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visual theme of the strip. Selects the decorative overlay and the
/// colour of the date stamp together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Pink,
    Blue,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Pink, Theme::Blue];

    /// File name of the overlay image, relative to the assets directory.
    pub fn overlay_asset(&self) -> &'static str {
        match self {
            Theme::Pink => "pinkthimi.png",
            Theme::Blue => "bluethimi.png",
        }
    }

    /// RGB colour of the date stamp text.
    pub fn stamp_color(&self) -> [u8; 3] {
        match self {
            Theme::Pink => [193, 74, 104],
            Theme::Blue => [74, 104, 193],
        }
    }

    /// The other theme.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Pink => Theme::Blue,
            Theme::Blue => Theme::Pink,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Pink => "pink",
            Theme::Blue => "blue",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a theme name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme: {0}. Use: pink, blue")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pink" => Ok(Theme::Pink),
            "blue" => Ok(Theme::Blue),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

use image::Rgba;

/// Color mode of the clock face. Dark desktops get white strokes, light ones
/// black strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn foreground(self) -> Rgba<u8> {
        match self {
            Theme::Dark => Rgba([255, 255, 255, 255]),
            Theme::Light => Rgba([0, 0, 0, 255]),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Where the active theme came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    Stored,
    System,
    Default,
}

/// Picks the first available theme: the stored preference, then the desktop
/// setting, then [`Theme::Dark`]. The system query only runs when nothing is
/// stored.
pub fn resolve_theme(
    stored: Option<Theme>,
    system: impl FnOnce() -> Option<Theme>,
) -> (Theme, ThemeSource) {
    if let Some(theme) = stored {
        return (theme, ThemeSource::Stored);
    }
    match system() {
        Some(theme) => (theme, ThemeSource::System),
        None => (Theme::default(), ThemeSource::Default),
    }
}

//! Runtime settings read from the environment.
//!
//! | Variable                 | Default         | Effect                                   |
//! |--------------------------|-----------------|------------------------------------------|
//! | `LOGOPED_DOWNLOAD_PATH`  | `/api/download` | Base of the `download_url` in metadata   |
//! | `LOGOPED_FONT_PATH`      | unset           | Regular TrueType face, disables translit |
//! | `LOGOPED_BOLD_FONT_PATH` | unset           | Bold TrueType face                       |
//!
//! Unset and empty variables both fall back to the default.

use std::env;
use std::path::PathBuf;

use crate::fonts::FontSource;
use crate::render::RenderOptions;

/// Default base path of the binary download route.
pub const DEFAULT_DOWNLOAD_PATH: &str = "/api/download";

/// Variable overriding [`DEFAULT_DOWNLOAD_PATH`].
pub const DOWNLOAD_PATH_VAR: &str = "LOGOPED_DOWNLOAD_PATH";
/// Variable naming the regular TrueType face.
pub const FONT_PATH_VAR: &str = "LOGOPED_FONT_PATH";
/// Variable naming the bold TrueType face.
pub const BOLD_FONT_PATH_VAR: &str = "LOGOPED_BOLD_FONT_PATH";

/// Settings shared by both handler variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Route advertised in `download_url` (`<path>?id=<id>`).
    pub download_path: String,
    /// Fonts used by the binary variant.
    pub fonts: FontSource,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            download_path: DEFAULT_DOWNLOAD_PATH.to_owned(),
            fonts: FontSource::Builtin,
        }
    }
}

impl Settings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let download_path = non_empty(DOWNLOAD_PATH_VAR)
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_PATH.to_owned());
        let fonts = FontSource::from_paths(
            non_empty(FONT_PATH_VAR).map(PathBuf::from),
            non_empty(BOLD_FONT_PATH_VAR).map(PathBuf::from),
        );

        Self {
            download_path,
            fonts,
        }
    }

    /// Render options derived from these settings.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default().with_fonts(self.fonts.clone())
    }
}

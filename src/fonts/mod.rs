//! Font selection for rendered materials.
//!
//! Two sources are supported. The built-in Helvetica family needs no files but only covers a
//! Latin code page, so every string is transliterated before drawing. When TrueType files are
//! configured they are embedded instead and text keeps its original script.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use printpdf::{BuiltinFont, IndirectFontRef, PdfDocumentReference};

use crate::render::RenderError;
use crate::transliterate::transliterate;

/// Where the fonts of a rendered document come from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FontSource {
    /// The built-in Helvetica family with transliterated text.
    #[default]
    Builtin,
    /// TrueType files embedded into the document.
    External {
        /// Regular face, also used for bold text when no bold face is given.
        regular: PathBuf,
        /// Optional bold face.
        bold: Option<PathBuf>,
    },
}

impl FontSource {
    /// Builds a source from optional paths, falling back to the built-in family.
    pub fn from_paths(regular: Option<PathBuf>, bold: Option<PathBuf>) -> Self {
        match regular {
            Some(regular) => FontSource::External { regular, bold },
            None => FontSource::Builtin,
        }
    }
}

/// How strings are prepared before they are handed to the PDF layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextMode {
    /// Rewrite to ASCII through [`transliterate`].
    Transliterate,
    /// Draw the text as is.
    Native,
}

impl TextMode {
    /// Returns the text that will actually be drawn.
    pub fn prepare(self, text: &str) -> Cow<'_, str> {
        match self {
            TextMode::Native => Cow::Borrowed(text),
            TextMode::Transliterate if text.is_ascii() => Cow::Borrowed(text),
            TextMode::Transliterate => Cow::Owned(transliterate(text)),
        }
    }
}

/// Fonts registered on a document together with the text mode they require.
#[derive(Clone, Debug)]
pub struct FontSet {
    /// Face used for body text.
    pub regular: IndirectFontRef,
    /// Face used for headings and entry titles.
    pub bold: IndirectFontRef,
    /// Text preparation matching the faces.
    pub mode: TextMode,
}

fn install_builtin(document: &PdfDocumentReference) -> Result<FontSet, RenderError> {
    let regular = document
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| RenderError::Pdf(format!("Failed to add built-in Helvetica: {}", err)))?;
    let bold = document
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| {
            RenderError::Pdf(format!("Failed to add built-in Helvetica-Bold: {}", err))
        })?;

    Ok(FontSet {
        regular,
        bold,
        mode: TextMode::Transliterate,
    })
}

fn load_external_font(
    document: &PdfDocumentReference,
    path: &Path,
) -> Result<IndirectFontRef, RenderError> {
    let data = std::fs::read(path).map_err(|source| RenderError::Font {
        path: path.to_path_buf(),
        source,
    })?;

    document.add_external_font(data.as_slice()).map_err(|err| {
        RenderError::Pdf(format!(
            "Failed to embed font {}: {}",
            path.display(),
            err
        ))
    })
}

fn install_external(
    document: &PdfDocumentReference,
    regular: &Path,
    bold: Option<&Path>,
) -> Result<FontSet, RenderError> {
    let regular_font = load_external_font(document, regular)?;
    let bold_font = match bold {
        Some(path) => load_external_font(document, path)?,
        None => regular_font.clone(),
    };

    Ok(FontSet {
        regular: regular_font,
        bold: bold_font,
        mode: TextMode::Native,
    })
}

/// Registers the fonts described by `source` on `document`.
///
/// Configured TrueType files that cannot be read or embedded are reported with a warning and the
/// built-in family is used instead, so a broken font path never prevents a download.
pub fn install(
    document: &PdfDocumentReference,
    source: &FontSource,
) -> Result<FontSet, RenderError> {
    match source {
        FontSource::Builtin => install_builtin(document),
        FontSource::External { regular, bold } => {
            match install_external(document, regular, bold.as_deref()) {
                Ok(fonts) => {
                    debug!("Embedded fonts from {}", regular.display());
                    Ok(fonts)
                }
                Err(err) => {
                    warn!(
                        "Configured fonts unavailable ({}); falling back to built-in Helvetica with transliteration.",
                        err
                    );
                    install_builtin(document)
                }
            }
        }
    }
}

/// Indicates whether every file referenced by `source` exists on disk.
pub fn fonts_available(source: &FontSource) -> bool {
    match source {
        FontSource::Builtin => true,
        FontSource::External { regular, bold } => {
            regular.is_file() && bold.as_deref().map_or(true, Path::is_file)
        }
    }
}

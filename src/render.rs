//! Turns a material id into PDF bytes.

use std::path::PathBuf;

use log::debug;

use crate::builder::{DocumentBuilder, FooterSpec, Margins, Placement};
use crate::catalog::{self, MaterialKind};
use crate::content;
use crate::fonts::FontSource;

/// Attribution stamped in the footer of every page.
pub const ATTRIBUTION: &str = "Логопедия в ДОУ — материалы для занятий с детьми";

/// Height of the footer band in millimetres.
pub const FOOTER_HEIGHT_MM: f64 = 12.0;

/// Errors raised while producing a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// `printpdf` rejected an operation or failed to serialise the document.
    #[error("PDF generation failed: {0}")]
    Pdf(String),
    /// A configured font file could not be read.
    #[error("Failed to read font file {}: {source}", path.display())]
    Font {
        /// Path of the font file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The page geometry leaves no room for content.
    #[error("Invalid page layout: {0}")]
    Layout(String),
    /// Writing the serialised document failed.
    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),
    /// The outline could not be added to the rendered document.
    #[cfg(feature = "bookmarks")]
    #[error(transparent)]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}

/// A freshly rendered document. Owned by the request that asked for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Serialised PDF.
    pub bytes: Vec<u8>,
    /// Number of pages in the document.
    pub page_count: usize,
    /// Where each entry landed, in drawing order.
    pub placements: Vec<Placement>,
}

impl RenderedDocument {
    /// 1-based page number of every entry, in drawing order.
    pub fn entry_pages(&self) -> Vec<usize> {
        self.placements
            .iter()
            .map(|placement| placement.page)
            .collect()
    }
}

/// Knobs shared by every rendered document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Font families to embed.
    pub fonts: FontSource,
}

impl RenderOptions {
    /// Uses the given font source.
    pub fn with_fonts(mut self, fonts: FontSource) -> Self {
        self.fonts = fonts;
        self
    }
}

fn document_builder(kind: Option<MaterialKind>, options: &RenderOptions) -> DocumentBuilder {
    let title = kind.map_or("", |kind| catalog::record(kind).display_name);
    DocumentBuilder::new()
        .with_title(title)
        .with_margins(Margins::default())
        .with_footer(FooterSpec::new(FOOTER_HEIGHT_MM, ATTRIBUTION))
        .with_fonts(options.fonts.clone())
}

/// Renders `kind`, or a footer-only page when `kind` is `None`.
pub fn render_with(
    kind: Option<MaterialKind>,
    options: &RenderOptions,
) -> Result<RenderedDocument, RenderError> {
    let mut canvas = document_builder(kind, options).build()?;

    if let Some(kind) = kind {
        let routine = content::routine(kind);
        routine(&mut canvas);
    }

    let document = canvas.finish()?;
    debug!(
        "Rendered {} into {} page(s), {} bytes",
        kind.map_or("footer-only document", MaterialKind::as_str),
        document.page_count,
        document.bytes.len()
    );
    Ok(document)
}

/// Renders a catalog material with the default options.
pub fn render_material(kind: MaterialKind) -> Result<RenderedDocument, RenderError> {
    render_with(Some(kind), &RenderOptions::default())
}

/// Renders the material named by `id`.
///
/// Ids without a routine are not an error: they yield a single page carrying only the footer.
pub fn render(id: &str) -> Result<RenderedDocument, RenderError> {
    render_with(id.parse().ok(), &RenderOptions::default())
}

/// Renders `kind` and adds an outline with one bookmark per entry.
#[cfg(feature = "bookmarks")]
pub fn render_with_bookmarks(
    kind: MaterialKind,
    options: &RenderOptions,
) -> Result<RenderedDocument, RenderError> {
    let mut document = render_with(Some(kind), options)?;
    document.bytes = crate::bookmarks::apply_entry_bookmarks(&document.bytes, &document.placements)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_renders_footer_only_page() {
        let document = render("nonexistent").expect("footer-only render");
        assert_eq!(document.page_count, 1);
        assert!(document.placements.is_empty());
        assert!(!document.bytes.is_empty());
    }

    #[test]
    fn every_kind_renders_all_of_its_entries() {
        for kind in MaterialKind::ALL {
            let document = render_material(kind).expect("render");
            let pages = document.entry_pages();
            assert!(!pages.is_empty(), "{kind} has entries");
            assert!(pages.windows(2).all(|pair| pair[0] <= pair[1]));
            assert_eq!(pages.last().copied(), Some(document.page_count));
        }
    }

    #[test]
    fn games_spill_onto_a_second_page() {
        let document = render_material(MaterialKind::Games).expect("render");
        assert_eq!(document.page_count, 2);
        assert_eq!(document.entry_pages().first(), Some(&1));
    }

    #[test]
    fn short_materials_fit_one_page() {
        for kind in [
            MaterialKind::Articulation,
            MaterialKind::TongueTwisters,
            MaterialKind::Breathing,
        ] {
            assert_eq!(render_material(kind).expect("render").page_count, 1);
        }
    }
}

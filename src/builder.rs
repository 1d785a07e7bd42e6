//! Page canvas used by the rendering routines.
//!
//! [`DocumentBuilder`] configures paper size, margins, the footer and fonts. The resulting
//! [`Canvas`] keeps a vertical cursor measured in millimetres from the top edge of the current
//! page and starts a new page whenever the next block does not fit above the footer band.

use std::io::{BufWriter, Write};

use log::debug;
use printpdf::{
    Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point,
    Rgb,
};

use crate::fonts::{self, FontSet, FontSource};
use crate::render::{RenderError, RenderedDocument};

/// Width and height of an A4 page in millimetres.
pub const A4_MM: (f64, f64) = (210.0, 297.0);

const HEADING_SIZE_PT: f64 = 20.0;
const HEADING_BLOCK_MM: f64 = 12.0;
const SUBHEADING_SIZE_PT: f64 = 12.0;
const SUBHEADING_BLOCK_MM: f64 = 8.0;
const PARAGRAPH_SIZE_PT: f64 = 10.5;
const PARAGRAPH_BLOCK_MM: f64 = 6.0;
const GROUP_TITLE_SIZE_PT: f64 = 13.0;
const GROUP_TITLE_BLOCK_MM: f64 = 10.0;
const ENTRY_TITLE_SIZE_PT: f64 = 12.0;
const ENTRY_DESCRIPTION_SIZE_PT: f64 = 10.0;
const RULE_BLOCK_MM: f64 = 6.0;
const FOOTER_SIZE_PT: f64 = 9.0;

/// Page margins in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Space above the first block on every page.
    pub top: f64,
    /// Space right of the text column.
    pub right: f64,
    /// Space below the footer band.
    pub bottom: f64,
    /// Space left of the text column.
    pub left: f64,
}

impl Margins {
    /// Uses the same margin on all four sides.
    pub const fn uniform(margin: f64) -> Self {
        Self {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

/// Definition of a footer stamped at the bottom of every page.
#[derive(Clone, Debug, PartialEq)]
pub struct FooterSpec {
    height: f64,
    text: String,
}

impl FooterSpec {
    /// Creates a footer that reserves `height` millimetres above the bottom margin.
    pub fn new(height: f64, text: impl Into<String>) -> Self {
        Self {
            height,
            text: text.into(),
        }
    }

    /// Returns the reserved band height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the footer text before any transliteration.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Builder for [`Canvas`] instances pre-configured with the crate defaults.
#[derive(Clone, Debug, Default)]
pub struct DocumentBuilder {
    title: Option<String>,
    paper_size: Option<(f64, f64)>,
    margins: Option<Margins>,
    footer: Option<FooterSpec>,
    fonts: FontSource,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the paper size (width, height) in millimetres.
    pub fn with_paper_size(mut self, width: f64, height: f64) -> Self {
        self.paper_size = Some((width, height));
        self
    }

    /// Sets the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = Some(margins);
        self
    }

    /// Configures a footer with a fixed height that is stamped on every page.
    pub fn with_footer(mut self, footer: FooterSpec) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Selects where the document fonts come from.
    pub fn with_fonts(mut self, fonts: FontSource) -> Self {
        self.fonts = fonts;
        self
    }

    /// Creates the document, registers fonts and returns a canvas positioned at the top of page 1.
    pub fn build(self) -> Result<Canvas, RenderError> {
        let (width, height) = self.paper_size.unwrap_or(A4_MM);
        let margins = self.margins.unwrap_or_default();

        let reserved = self.footer.as_ref().map_or(0.0, FooterSpec::height);
        if margins.top + margins.bottom + reserved >= height {
            return Err(RenderError::Layout(
                "Footer height exceeds available space".to_owned(),
            ));
        }

        let title = self.title.unwrap_or_default();
        let (document, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), "Page 1");
        let fonts = fonts::install(&document, &self.fonts)?;
        let first_layer = document.get_page(page).get_layer(layer);

        Ok(Canvas {
            document,
            layers: vec![first_layer],
            fonts,
            width,
            height,
            margins,
            footer: self.footer,
            cursor: margins.top,
            placements: Vec::new(),
        })
    }
}

/// Where an entry ended up in the rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Entry title as given by the routine, before transliteration.
    pub title: String,
    /// 1-based page number.
    pub page: usize,
}

/// An in-progress document with a vertical cursor.
pub struct Canvas {
    document: PdfDocumentReference,
    layers: Vec<PdfLayerReference>,
    fonts: FontSet,
    width: f64,
    height: f64,
    margins: Margins,
    footer: Option<FooterSpec>,
    cursor: f64,
    placements: Vec<Placement>,
}

impl Canvas {
    /// Number of pages started so far.
    pub fn page_count(&self) -> usize {
        self.layers.len()
    }

    /// Distance of the cursor from the top edge of the current page.
    pub fn cursor_mm(&self) -> f64 {
        self.cursor
    }

    /// Lowest point (from the top edge) that content may reach on a page.
    pub fn content_bottom_mm(&self) -> f64 {
        let reserved = self.footer.as_ref().map_or(0.0, FooterSpec::height);
        self.height - self.margins.bottom - reserved
    }

    /// Space left between the cursor and the footer band.
    pub fn remaining_mm(&self) -> f64 {
        self.content_bottom_mm() - self.cursor
    }

    /// Entries drawn so far, in drawing order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    fn at_page_top(&self) -> bool {
        (self.cursor - self.margins.top).abs() < f64::EPSILON
    }

    /// Makes sure a block of `height` millimetres fits on the current page.
    ///
    /// Starts a new page and moves the cursor back to the top margin when it does not. A block
    /// taller than a whole page is drawn at the top of the current page rather than producing
    /// an endless run of empty pages. Returns whether a page break happened.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        if self.remaining_mm() >= height || self.at_page_top() {
            return false;
        }
        self.new_page();
        true
    }

    /// Starts a new page unconditionally.
    pub fn new_page(&mut self) {
        let number = self.layers.len() + 1;
        let (page, layer) = self.document.add_page(
            Mm(self.width),
            Mm(self.height),
            format!("Page {}", number),
        );
        self.layers.push(self.document.get_page(page).get_layer(layer));
        self.cursor = self.margins.top;
        debug!("Started page {}", number);
    }

    fn current_layer(&self) -> &PdfLayerReference {
        // `build` always creates the first page.
        &self.layers[self.layers.len() - 1]
    }

    fn draw_text(
        &self,
        layer: &PdfLayerReference,
        text: &str,
        size: f64,
        baseline: f64,
        font: &IndirectFontRef,
    ) {
        let prepared = self.fonts.mode.prepare(text);
        layer.use_text(
            prepared.into_owned(),
            size,
            Mm(self.margins.left),
            Mm(self.height - baseline),
            font,
        );
    }

    fn draw_rule(&self, layer: &PdfLayerReference, offset: f64) {
        let y = Mm(self.height - offset);
        let line = Line {
            points: vec![
                (Point::new(Mm(self.margins.left), y), false),
                (Point::new(Mm(self.width - self.margins.right), y), false),
            ],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        };
        layer.set_outline_thickness(0.5);
        layer.add_shape(line);
    }

    /// Draws the document heading in the accent colour.
    pub fn heading(&mut self, text: &str) {
        self.ensure_space(HEADING_BLOCK_MM);
        let layer = self.current_layer().clone();
        layer.set_fill_color(accent_color());
        self.draw_text(
            &layer,
            text,
            HEADING_SIZE_PT,
            self.cursor + 8.0,
            &self.fonts.bold,
        );
        layer.set_fill_color(text_color());
        self.cursor += HEADING_BLOCK_MM;
    }

    /// Draws a subheading followed by a horizontal rule.
    pub fn subheading(&mut self, text: &str) {
        self.ensure_space(SUBHEADING_BLOCK_MM + RULE_BLOCK_MM);
        let layer = self.current_layer().clone();
        self.draw_text(
            &layer,
            text,
            SUBHEADING_SIZE_PT,
            self.cursor + 5.0,
            &self.fonts.regular,
        );
        self.cursor += SUBHEADING_BLOCK_MM;
        self.rule();
    }

    /// Draws a single line of body text.
    pub fn paragraph(&mut self, text: &str) {
        self.ensure_space(PARAGRAPH_BLOCK_MM);
        let layer = self.current_layer().clone();
        self.draw_text(
            &layer,
            text,
            PARAGRAPH_SIZE_PT,
            self.cursor + 4.5,
            &self.fonts.regular,
        );
        self.cursor += PARAGRAPH_BLOCK_MM;
    }

    /// Draws a bold title introducing a group of entries.
    ///
    /// `keep_with_mm` is the height of the first entry of the group; the title moves to the next
    /// page together with it instead of being left alone at the bottom of the current one.
    pub fn group_title(&mut self, text: &str, keep_with_mm: f64) {
        self.ensure_space(GROUP_TITLE_BLOCK_MM + keep_with_mm);
        let layer = self.current_layer().clone();
        self.draw_text(
            &layer,
            text,
            GROUP_TITLE_SIZE_PT,
            self.cursor + 7.0,
            &self.fonts.bold,
        );
        self.cursor += GROUP_TITLE_BLOCK_MM;
    }

    /// Draws a horizontal rule across the text column.
    pub fn rule(&mut self) {
        self.ensure_space(RULE_BLOCK_MM);
        let layer = self.current_layer().clone();
        self.draw_rule(&layer, self.cursor + 2.0);
        self.cursor += RULE_BLOCK_MM;
    }

    /// Draws an entry (bold title, description underneath) inside a block of `height` mm.
    ///
    /// The page break check happens before anything is drawn, so an entry is never split
    /// across pages.
    pub fn entry(&mut self, title: &str, description: &str, height: f64) {
        self.ensure_space(height);
        let layer = self.current_layer().clone();
        self.draw_text(
            &layer,
            title,
            ENTRY_TITLE_SIZE_PT,
            self.cursor + 5.0,
            &self.fonts.bold,
        );
        self.draw_text(
            &layer,
            description,
            ENTRY_DESCRIPTION_SIZE_PT,
            self.cursor + 11.0,
            &self.fonts.regular,
        );
        self.placements.push(Placement {
            title: title.to_owned(),
            page: self.page_count(),
        });
        self.cursor += height;
    }

    fn stamp_footer(&self, layer: &PdfLayerReference, footer: &FooterSpec) {
        let band_top = self.height - self.margins.bottom - footer.height();
        self.draw_rule(layer, band_top + 1.0);
        layer.set_fill_color(muted_color());
        self.draw_text(
            layer,
            footer.text(),
            FOOTER_SIZE_PT,
            band_top + footer.height() * 0.6,
            &self.fonts.regular,
        );
    }

    /// Stamps the footer on every page and serialises the document.
    pub fn finish(self) -> Result<RenderedDocument, RenderError> {
        if let Some(footer) = &self.footer {
            for layer in &self.layers {
                self.stamp_footer(layer, footer);
            }
        }

        let page_count = self.layers.len();
        let Canvas {
            document,
            placements,
            ..
        } = self;

        let mut bytes = Vec::new();
        {
            let mut writer = BufWriter::new(&mut bytes);
            document
                .save(&mut writer)
                .map_err(|err| RenderError::Pdf(format!("Failed to write PDF: {}", err)))?;
            writer.flush()?;
        }

        debug!(
            "Serialised {} page(s) into {} bytes",
            page_count,
            bytes.len()
        );

        Ok(RenderedDocument {
            bytes,
            page_count,
            placements,
        })
    }
}

fn text_color() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn accent_color() -> Color {
    Color::Rgb(Rgb::new(0.16, 0.36, 0.63, None))
}

fn muted_color() -> Color {
    Color::Rgb(Rgb::new(0.45, 0.45, 0.45, None))
}

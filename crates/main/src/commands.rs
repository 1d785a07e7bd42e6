//! Command implementations for the `logoped` binary.

use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use logoped_materials::catalog::{self, MaterialKind};
use logoped_materials::config::Settings;
use logoped_materials::fonts::FontSource;
use logoped_materials::handler::{HttpRequest, MaterialsHandler};
#[cfg(feature = "bookmarks")]
use logoped_materials::render::render_with_bookmarks;
use logoped_materials::render::{render_with, RenderedDocument};

/// Directory used by `render-all` when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "target/materials";

/// Handler variant selected on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Variant {
    /// JSON metadata with a download URL.
    Metadata,
    /// Base64-encoded PDF.
    Download,
}

/// Environment settings with the font flags applied on top.
pub fn settings(font: Option<PathBuf>, bold_font: Option<PathBuf>) -> Settings {
    let mut settings = Settings::from_env();
    if font.is_some() {
        settings.fonts = FontSource::from_paths(font, bold_font);
    }
    settings
}

/// Prints one line per catalog entry.
pub fn list() -> Result<(), Box<dyn Error>> {
    for record in catalog::list_all() {
        println!(
            "{:<16} {:>7}  {:<34} {}",
            record.id(),
            record.size_label,
            record.file_name,
            record.display_name
        );
    }
    println!("{} materials", catalog::list_all().len());
    Ok(())
}

fn parse_kind(id: &str) -> Result<MaterialKind, Box<dyn Error>> {
    id.parse::<MaterialKind>().map_err(|err| {
        let known = MaterialKind::ALL.map(MaterialKind::as_str).join(", ");
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{err}; expected one of: {known}"),
        )
        .into()
    })
}

#[cfg(feature = "bookmarks")]
fn render_document(
    settings: &Settings,
    kind: MaterialKind,
    bookmarks: bool,
) -> Result<RenderedDocument, Box<dyn Error>> {
    let options = settings.render_options();
    if bookmarks {
        return Ok(render_with_bookmarks(kind, &options)?);
    }
    Ok(render_with(Some(kind), &options)?)
}

#[cfg(not(feature = "bookmarks"))]
fn render_document(
    settings: &Settings,
    kind: MaterialKind,
    bookmarks: bool,
) -> Result<RenderedDocument, Box<dyn Error>> {
    if bookmarks {
        return Err("`--bookmarks` requires building with the `bookmarks` feature".into());
    }
    Ok(render_with(Some(kind), &settings.render_options())?)
}

fn render_to(
    settings: &Settings,
    kind: MaterialKind,
    path: &Path,
    bookmarks: bool,
) -> Result<(), Box<dyn Error>> {
    let document = render_document(settings, kind, bookmarks)?;
    fs::write(path, &document.bytes)?;
    println!(
        "Generated {} ({} bytes, {} page(s))",
        path.display(),
        document.bytes.len(),
        document.page_count
    );
    Ok(())
}

/// Renders one material to `output` or to its catalog file name.
pub fn render(
    settings: &Settings,
    id: &str,
    output: Option<PathBuf>,
    bookmarks: bool,
) -> Result<(), Box<dyn Error>> {
    let kind = parse_kind(id)?;
    let path = output.unwrap_or_else(|| PathBuf::from(catalog::record(kind).file_name));
    render_to(settings, kind, &path, bookmarks)
}

/// Renders all materials into `dir`.
pub fn render_all(
    settings: &Settings,
    dir: &Path,
    bookmarks: bool,
) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(dir)?;

    for kind in MaterialKind::ALL {
        render_to(
            settings,
            kind,
            &dir.join(catalog::record(kind).file_name),
            bookmarks,
        )?;
    }

    println!("All renders completed successfully.");
    Ok(())
}

/// Calls a handler variant and prints the response envelope as JSON.
///
/// Base64 bodies are replaced by a length summary to keep the terminal readable.
pub fn invoke(
    settings: Settings,
    variant: Variant,
    method: &str,
    id: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let mut request = HttpRequest::new(method);
    if let Some(id) = id {
        request = request.with_query("id", id);
    }

    let handler = MaterialsHandler::new(settings);
    let mut response = match variant {
        Variant::Metadata => handler.metadata(&request),
        Variant::Download => handler.download(&request),
    };

    if response.is_base64_encoded {
        response.body = format!("<{} base64 characters>", response.body.len());
    }

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

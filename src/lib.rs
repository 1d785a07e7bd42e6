//! Speech-therapy material catalog with on-demand PDF rendering.
//!
//! The crate backs two serverless handlers that share one immutable catalog: a metadata variant
//! that answers with JSON and a download variant that renders the material as a PDF on every
//! request. See [`handler`] for the request flow and [`render`] for the documents.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod content;
pub mod fonts;
pub mod handler;
pub mod model;
pub mod render;
pub mod transliterate;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use catalog::{lookup, MaterialKind, MaterialRecord};
pub use handler::{handle_download, handle_metadata, HttpRequest, HttpResponse, MaterialsHandler};
pub use render::{render, RenderError, RenderedDocument};

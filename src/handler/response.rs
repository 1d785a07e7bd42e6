//! Response envelope builders.
//!
//! Every builder returns a complete [`HttpResponse`]; none of them can fail. Serialisation errors
//! (which the plain data used here cannot produce) are logged and replaced by an empty object.
//!
//! JSON bodies use `", "` and `": "` separators and escape every non-ASCII character as `\uXXXX`,
//! so clients of the existing deployment see byte-identical bodies.

use std::collections::BTreeMap;
use std::io;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::error;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::ser::Formatter;

use super::HttpResponse;
use crate::catalog::MaterialRecord;

const ALLOWED_METHODS: &str = "GET, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";
const PREFLIGHT_MAX_AGE: &str = "86400";

/// Confirmation shown to visitors once a material resolves.
pub const READY_MESSAGE: &str = "Материал готов к скачиванию";

type Headers = BTreeMap<String, String>;

fn cors_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Access-Control-Allow-Origin".to_owned(), "*".to_owned());
    headers
}

/// Spaced separators with ASCII-only output.
struct BodyFormatter;

impl Formatter for BodyFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn to_body<T: Serialize + ?Sized>(body: &T) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    body.serialize(&mut serde_json::Serializer::with_formatter(
        &mut buffer,
        BodyFormatter,
    ))?;
    // `BodyFormatter` only writes ASCII.
    Ok(buffer.into_iter().map(char::from).collect())
}

fn serialize_body<T: Serialize + ?Sized>(body: &T) -> String {
    to_body(body).unwrap_or_else(|err| {
        error!("Failed to serialise response body: {}", err);
        String::from("{}")
    })
}

/// JSON response with the standard cross-origin header.
pub fn json<T: Serialize + ?Sized>(status_code: u16, body: &T) -> HttpResponse {
    let mut headers = cors_headers();
    headers.insert("Content-Type".to_owned(), "application/json".to_owned());
    HttpResponse {
        status_code,
        headers,
        body: serialize_body(body),
        is_base64_encoded: false,
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// JSON error response (`{"error": message}`).
pub fn error(status_code: u16, message: &str) -> HttpResponse {
    json(status_code, &ErrorBody { error: message })
}

/// Returns the empty response to a cross-origin preflight request.
pub fn preflight() -> HttpResponse {
    let mut headers = cors_headers();
    headers.insert(
        "Access-Control-Allow-Methods".to_owned(),
        ALLOWED_METHODS.to_owned(),
    );
    headers.insert(
        "Access-Control-Allow-Headers".to_owned(),
        ALLOWED_HEADERS.to_owned(),
    );
    headers.insert(
        "Access-Control-Max-Age".to_owned(),
        PREFLIGHT_MAX_AGE.to_owned(),
    );
    HttpResponse {
        status_code: 200,
        headers,
        body: String::new(),
        is_base64_encoded: false,
    }
}

/// Returns 405 for any method other than `GET` and `OPTIONS`.
pub fn method_not_allowed() -> HttpResponse {
    error(405, "Method not allowed")
}

/// Returns 404 for an id the catalog does not know.
pub fn not_found() -> HttpResponse {
    error(404, "Material not found")
}

/// Returns 500 for a document that could not be generated.
pub fn render_failed() -> HttpResponse {
    error(500, "Failed to generate document")
}

/// Catalog fields shared by the listing and the metadata body.
#[derive(Serialize)]
struct MaterialFields<'a> {
    name: &'a str,
    filename: &'a str,
    size: &'a str,
    description: &'a str,
}

impl<'a> From<&'a MaterialRecord> for MaterialFields<'a> {
    fn from(record: &'a MaterialRecord) -> Self {
        Self {
            name: record.display_name,
            filename: record.file_name,
            size: record.size_label,
            description: record.description,
        }
    }
}

/// Serialises records as a JSON object keyed by id, keeping catalog order.
struct MaterialMap<'a>(&'a [MaterialRecord]);

impl Serialize for MaterialMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for record in self.0 {
            map.serialize_entry(record.id(), &MaterialFields::from(record))?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct Listing<'a> {
    materials: MaterialMap<'a>,
    total: usize,
}

/// Full catalog listing (`{"materials": {...}, "total": n}`).
pub fn listing(records: &[MaterialRecord]) -> HttpResponse {
    json(
        200,
        &Listing {
            materials: MaterialMap(records),
            total: records.len(),
        },
    )
}

#[derive(Serialize)]
struct Metadata<'a> {
    id: &'a str,
    #[serde(flatten)]
    fields: MaterialFields<'a>,
    download_url: String,
    message: &'a str,
}

/// Metadata of a single material with the URL of its binary download.
pub fn metadata(record: &MaterialRecord, download_path: &str) -> HttpResponse {
    json(
        200,
        &Metadata {
            id: record.id(),
            fields: MaterialFields::from(record),
            download_url: format!("{}?id={}", download_path, record.id()),
            message: READY_MESSAGE,
        },
    )
}

/// Binary PDF download, base64-encoded for the serverless gateway.
pub fn pdf(file_name: &str, bytes: &[u8]) -> HttpResponse {
    let mut headers = cors_headers();
    headers.insert("Content-Type".to_owned(), "application/pdf".to_owned());
    headers.insert(
        "Content-Disposition".to_owned(),
        format!("attachment; filename=\"{}\"", file_name),
    );
    headers.insert(
        "Access-Control-Expose-Headers".to_owned(),
        "Content-Disposition".to_owned(),
    );
    HttpResponse {
        status_code: 200,
        headers,
        body: STANDARD.encode(bytes),
        is_base64_encoded: true,
    }
}

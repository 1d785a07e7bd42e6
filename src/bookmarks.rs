//! Entry outline built on top of `lopdf`.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

use crate::builder::Placement;

/// Errors that can occur while embedding bookmarks into a rendered PDF document.
#[derive(Debug, thiserror::Error)]
pub enum BookmarkError {
    /// The PDF bytes could not be parsed or written by `lopdf`.
    #[error("Failed to process PDF bytes: {0}")]
    Parse(#[from] lopdf::Error),
    /// A required catalog entry was missing from the document trailer.
    #[error("PDF catalog entry is missing")]
    MissingCatalog,
    /// The catalog object was not a dictionary, preventing outline injection.
    #[error("PDF catalog entry is not a dictionary")]
    InvalidCatalog,
    /// A placement referenced a page that does not exist in the rendered document.
    #[error("Entry {entry_index} refers to missing page {page_number}")]
    MissingPage {
        /// Index of the entry whose page is missing.
        entry_index: usize,
        /// The requested (1-indexed) page number.
        page_number: usize,
    },
}

impl From<std::io::Error> for BookmarkError {
    fn from(err: std::io::Error) -> Self {
        Self::Parse(err.into())
    }
}

/// Adds a flat outline with one bookmark per placed entry.
///
/// Each bookmark carries the entry title as a UTF-16 text string, so titles keep their original
/// script even when the page itself was drawn transliterated, and a `/Dest [page /XYZ]` entry
/// pointing at the page the entry landed on.
pub fn apply_entry_bookmarks(
    pdf_bytes: &[u8],
    placements: &[Placement],
) -> Result<Vec<u8>, BookmarkError> {
    if placements.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let mut document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();
    let outline_entries = collect_outline_entries(&mut document, placements, &pages)?;

    let outlines_id = document.new_object_id();
    link_outline_entries(outlines_id, &mut document, &outline_entries);
    insert_outlines_root(outlines_id, &mut document, &outline_entries)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

struct OutlineEntry {
    object_id: ObjectId,
    page_ref: ObjectId,
    title: String,
}

fn collect_outline_entries(
    document: &mut Document,
    placements: &[Placement],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<OutlineEntry>, BookmarkError> {
    let mut entries = Vec::with_capacity(placements.len());

    for (index, placement) in placements.iter().enumerate() {
        let page_ref = u32::try_from(placement.page)
            .ok()
            .and_then(|number| pages.get(&number).copied())
            .ok_or(BookmarkError::MissingPage {
                entry_index: index,
                page_number: placement.page,
            })?;

        entries.push(OutlineEntry {
            object_id: document.new_object_id(),
            page_ref,
            title: placement.title.clone(),
        });
    }

    Ok(entries)
}

/// Encodes `text` as a PDF text string (UTF-16BE with byte order mark).
fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn link_outline_entries(
    outlines_id: ObjectId,
    document: &mut Document,
    entries: &[OutlineEntry],
) {
    for index in 0..entries.len() {
        let mut dictionary = Dictionary::new();
        dictionary.set("Title", text_string(&entries[index].title));
        dictionary.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(entries[index].page_ref),
                Object::Name("XYZ".into()),
                Object::Null,
                Object::Null,
                Object::Null,
            ]),
        );
        dictionary.set("Parent", Object::Reference(outlines_id));

        if index > 0 {
            dictionary.set("Prev", Object::Reference(entries[index - 1].object_id));
        }

        if index + 1 < entries.len() {
            dictionary.set("Next", Object::Reference(entries[index + 1].object_id));
        }

        document
            .objects
            .insert(entries[index].object_id, Object::Dictionary(dictionary));
    }
}

fn insert_outlines_root(
    outlines_id: ObjectId,
    document: &mut Document,
    entries: &[OutlineEntry],
) -> Result<(), BookmarkError> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;

    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)?;

    catalog.set("Outlines", Object::Reference(outlines_id));
    catalog.set("PageMode", Object::Name("UseOutlines".into()));

    let mut dictionary = Dictionary::new();
    dictionary.set("Type", Object::Name("Outlines".into()));
    dictionary.set("Count", Object::Integer(entries.len() as i64));
    if let Some(first) = entries.first() {
        dictionary.set("First", Object::Reference(first.object_id));
    }
    if let Some(last) = entries.last() {
        dictionary.set("Last", Object::Reference(last.object_id));
    }

    document
        .objects
        .insert(outlines_id, Object::Dictionary(dictionary));

    Ok(())
}

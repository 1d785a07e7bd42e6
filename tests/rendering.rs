use logoped_materials::catalog::{self, MaterialKind};
use logoped_materials::render::{self, render_material, ATTRIBUTION};
use logoped_materials::transliterate::transliterate;
use lopdf::content::Content;
use lopdf::{Document, Object};
use sha2::{Digest, Sha256};

fn render_sample_pdf(kind: MaterialKind) -> Vec<u8> {
    render_material(kind).expect("render sample pdf").bytes
}

/// Text operands of every `Tj`/`TJ` operation, grouped by page.
fn page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
    fn string_operand(object: &Object) -> Option<String> {
        match object {
            Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).into_owned()),
            Object::Array(items) => Some(items.iter().filter_map(string_operand).collect()),
            _ => None,
        }
    }

    let document = Document::load_mem(bytes).expect("parse rendered pdf");
    document
        .get_pages()
        .values()
        .map(|&page_id| {
            let content = document.get_page_content(page_id).expect("page content");
            Content::decode(&content)
                .expect("decode page content")
                .operations
                .iter()
                .filter(|operation| operation.operator == "Tj" || operation.operator == "TJ")
                .flat_map(|operation| operation.operands.iter())
                .filter_map(string_operand)
                .collect()
        })
        .collect()
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    scrub_xml(&mut normalized, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    scrub_xml(&mut normalized, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    scrub_xml(
        &mut normalized,
        b"<xmp:MetadataDate>",
        b"</xmp:MetadataDate>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:DocumentID>",
        b"</xmpMM:DocumentID>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:InstanceID>",
        b"</xmpMM:InstanceID>",
    );
    scrub_xml(&mut normalized, b"<xmpMM:VersionID>", b"</xmpMM:VersionID>");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    Sha256::digest(&normalized).into()
}

#[test]
fn renders_non_empty_output() {
    for kind in MaterialKind::ALL {
        let bytes = render_sample_pdf(kind);
        assert!(bytes.starts_with(b"%PDF"), "{kind} should start with a PDF header");
    }
}

#[test]
fn rendering_is_deterministic() {
    for kind in MaterialKind::ALL {
        let bytes_a = render_sample_pdf(kind);
        let bytes_b = render_sample_pdf(kind);

        assert_eq!(bytes_a.len(), bytes_b.len(), "{kind}: PDF sizes should match");
        assert_eq!(
            normalized_hash(&bytes_a),
            normalized_hash(&bytes_b),
            "{kind}: renders must be identical after metadata normalization"
        );
    }
}

#[test]
fn footer_is_stamped_on_every_page() {
    let footer = transliterate(ATTRIBUTION);
    let pages = page_texts(&render_sample_pdf(MaterialKind::Games));

    assert_eq!(pages.len(), 2);
    for (index, texts) in pages.iter().enumerate() {
        assert_eq!(
            texts.last(),
            Some(&footer),
            "page {} should end with the footer",
            index + 1
        );
    }
}

#[test]
fn drawn_text_is_transliterated() {
    for kind in MaterialKind::ALL {
        let record = catalog::record(kind);
        let pages = page_texts(&render_sample_pdf(kind));
        let first_page = &pages[0];

        assert_eq!(first_page[0], transliterate(record.display_name));
        assert_eq!(first_page[1], transliterate(record.description));
        assert!(pages.iter().flatten().all(|text| text.is_ascii()));
    }
}

#[test]
fn unknown_id_renders_only_the_footer() {
    let document = render::render("nonexistent").expect("footer-only render");
    let pages = page_texts(&document.bytes);

    assert_eq!(pages, vec![vec![transliterate(ATTRIBUTION)]]);
}

#[test]
fn page_count_matches_the_pdf() {
    for kind in MaterialKind::ALL {
        let document = render_material(kind).expect("render");
        let parsed = Document::load_mem(&document.bytes).expect("parse");
        assert_eq!(parsed.get_pages().len(), document.page_count, "{kind}");
    }
}

use pdf_flow::model::{Block, Cover, HeadingLevel, Table};
use pdf_flow::{DocumentBuilder, RenderError};
use sha2::{Digest, Sha256};

fn sample_document() -> DocumentBuilder {
    DocumentBuilder::new("Sample")
        .with_cover(Cover::new("Sample").with_info("Version", "1.0"))
        .add_block(Block::numbered_heading(HeadingLevel::Chapter, "1.", "Hello"))
        .add_block(Block::paragraph("Hello, PDF! \u{2014} with an em dash."))
        .add_block(Block::table(
            Table::new(["Key", "Value"]).with_row(["rows", "are banded"]),
        ))
        .add_block(Block::code("let x = 1;"))
}

fn render_sample_pdf() -> Vec<u8> {
    sample_document()
        .render()
        .expect("render sample pdf")
        .bytes
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
            if let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            {
                let start_index = offset + start_pos + start.len();
                if let Some(end_pos) = data[start_index..]
                    .windows(end.len())
                    .position(|window| window == end)
                {
                    for byte in &mut data[start_index..start_index + end_pos] {
                        if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                            *byte = b'0';
                        }
                    }
                    offset = start_index + end_pos + end.len();
                } else {
                    break;
                }
            } else {
                break;
            }
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
    let digest = Sha256::digest(&normalized);
    digest.into()
}

#[test]
fn renders_non_empty_output() {
    let bytes = render_sample_pdf();
    assert!(bytes.starts_with(b"%PDF"), "rendered PDF should start with a header");
}

#[test]
fn rendering_is_deterministic() {
    let bytes_a = render_sample_pdf();
    let bytes_b = render_sample_pdf();

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");

    let hash_a = normalized_hash(&bytes_a);
    let hash_b = normalized_hash(&bytes_b);

    assert_eq!(
        hash_a, hash_b,
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn render_reports_pages_and_headings() {
    let rendered = sample_document().render().expect("render");
    // Cover, contents, one body page.
    assert_eq!(rendered.page_count, 3);
    assert_eq!(rendered.toc.len(), 1);
    assert_eq!(rendered.toc[0].page(), 3);
}

#[test]
fn save_writes_the_file_and_no_leftovers() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("out.pdf");

    let rendered = sample_document().save(&path).expect("save");
    let written = std::fs::read(&path).expect("read back");
    assert_eq!(written, rendered.bytes);
    assert!(!dir.path().join("nested").join("out.pdf.partial").exists());
}

#[test]
fn unwritable_destination_is_an_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    // A regular file where a parent directory is expected.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"x").expect("write blocker");

    let err = sample_document()
        .save(blocker.join("out.pdf"))
        .unwrap_err();
    assert!(matches!(err, RenderError::Io { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[cfg(feature = "bookmarks")]
#[test]
fn bookmarks_add_an_outline() {
    let bytes = sample_document()
        .with_bookmarks(true)
        .render()
        .expect("render with bookmarks")
        .bytes;
    let document = lopdf::Document::load_mem(&bytes).expect("parse output");
    let catalog = document
        .trailer
        .get(b"Root")
        .and_then(lopdf::Object::as_reference)
        .and_then(|id| document.get_object(id))
        .and_then(lopdf::Object::as_dict)
        .expect("catalog");
    assert!(catalog.get(b"Outlines").is_ok());
}

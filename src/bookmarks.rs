//! PDF outline (bookmark) embedding built on top of `lopdf`.
//!
//! Every recorded heading becomes an outline item pointing at the page it was drawn on.
//! Items nest by heading level, so sections hang under their chapter in the viewer sidebar.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId};
use thiserror::Error;

use crate::model::TocEntry;

/// Errors that can occur while embedding bookmarks into a rendered PDF document.
#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("failed to parse PDF bytes: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("failed to write PDF bytes: {0}")]
    Write(#[from] std::io::Error),
    #[error("PDF catalog entry is missing")]
    MissingCatalog,
    #[error("PDF catalog entry is not a dictionary")]
    InvalidCatalog,
    #[error("heading {entry_index} refers to missing page {page_number}")]
    MissingPage {
        entry_index: usize,
        page_number: usize,
    },
}

struct OutlineNode {
    object_id: ObjectId,
    page_ref: ObjectId,
    title: Vec<u8>,
    depth: u8,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Adds a nested `/Outlines` tree for `entries` to the PDF in `pdf_bytes`.
///
/// Entry pages are physical, 1-indexed page numbers. Returns the input unchanged when there
/// are no entries.
pub fn apply_toc_bookmarks(
    pdf_bytes: &[u8],
    entries: &[TocEntry],
) -> Result<Vec<u8>, BookmarkError> {
    if entries.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let mut document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();
    let (nodes, roots) = build_tree(&mut document, entries, &pages)?;

    let outlines_id = document.new_object_id();
    write_items(outlines_id, &mut document, &nodes, &roots);
    insert_outlines_root(outlines_id, &mut document, &nodes, &roots)?;

    log::debug!("embedded {} bookmark(s)", nodes.len());

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

fn pdf_text(title: &str) -> Vec<u8> {
    title
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Links each entry to the nearest earlier entry with a smaller depth.
fn build_tree(
    document: &mut Document,
    entries: &[TocEntry],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<(Vec<OutlineNode>, Vec<usize>), BookmarkError> {
    let mut nodes: Vec<OutlineNode> = Vec::with_capacity(entries.len());
    let mut roots = Vec::new();
    let mut open: Vec<usize> = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let page_ref = u32::try_from(entry.page())
            .ok()
            .and_then(|page| pages.get(&page).copied())
            .ok_or(BookmarkError::MissingPage {
                entry_index: index,
                page_number: entry.page(),
            })?;

        let depth = entry.level().depth();
        while open.last().is_some_and(|&last| nodes[last].depth >= depth) {
            open.pop();
        }
        let parent = open.last().copied();
        match parent {
            Some(parent) => nodes[parent].children.push(index),
            None => roots.push(index),
        }

        nodes.push(OutlineNode {
            object_id: document.new_object_id(),
            page_ref,
            title: pdf_text(entry.title()),
            depth,
            parent,
            children: Vec::new(),
        });
        open.push(index);
    }

    Ok((nodes, roots))
}

fn descendant_count(nodes: &[OutlineNode], index: usize) -> usize {
    nodes[index]
        .children
        .iter()
        .map(|&child| 1 + descendant_count(nodes, child))
        .sum()
}

fn write_items(
    outlines_id: ObjectId,
    document: &mut Document,
    nodes: &[OutlineNode],
    roots: &[usize],
) {
    for index in 0..nodes.len() {
        let siblings = match nodes[index].parent {
            Some(parent) => nodes[parent].children.as_slice(),
            None => roots,
        };
        let position = siblings.iter().position(|&sibling| sibling == index);
        let prev = position
            .and_then(|position| position.checked_sub(1))
            .map(|position| siblings[position]);
        let next = position.and_then(|position| siblings.get(position + 1).copied());

        let node = &nodes[index];
        let mut dictionary = Dictionary::new();
        dictionary.set("Title", Object::string_literal(node.title.clone()));
        dictionary.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(node.page_ref),
                Object::Name(b"Fit".to_vec()),
            ]),
        );
        let parent_id = node
            .parent
            .map_or(outlines_id, |parent| nodes[parent].object_id);
        dictionary.set("Parent", Object::Reference(parent_id));
        if let Some(prev) = prev {
            dictionary.set("Prev", Object::Reference(nodes[prev].object_id));
        }
        if let Some(next) = next {
            dictionary.set("Next", Object::Reference(nodes[next].object_id));
        }
        if let (Some(&first), Some(&last)) = (node.children.first(), node.children.last()) {
            dictionary.set("First", Object::Reference(nodes[first].object_id));
            dictionary.set("Last", Object::Reference(nodes[last].object_id));
            // Negative count: item starts collapsed.
            let count = descendant_count(nodes, index) as i64;
            dictionary.set("Count", Object::Integer(-count));
        }

        document
            .objects
            .insert(node.object_id, Object::Dictionary(dictionary));
    }
}

fn insert_outlines_root(
    outlines_id: ObjectId,
    document: &mut Document,
    nodes: &[OutlineNode],
    roots: &[usize],
) -> Result<(), BookmarkError> {
    let mut dictionary = Dictionary::new();
    dictionary.set("Type", Object::Name(b"Outlines".to_vec()));
    dictionary.set("Count", Object::Integer(roots.len() as i64));
    if let (Some(&first), Some(&last)) = (roots.first(), roots.last()) {
        dictionary.set("First", Object::Reference(nodes[first].object_id));
        dictionary.set("Last", Object::Reference(nodes[last].object_id));
    }
    document
        .objects
        .insert(outlines_id, Object::Dictionary(dictionary));

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
    catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    fn document_with_pages(count: usize) -> (Document, BTreeMap<u32, ObjectId>) {
        let mut document = Document::with_version("1.5");
        let pages = (1..=count as u32)
            .map(|number| (number, document.new_object_id()))
            .collect();
        (document, pages)
    }

    #[test]
    fn sections_nest_under_their_chapter() {
        let (mut document, pages) = document_with_pages(3);
        let entries = [
            TocEntry::new(HeadingLevel::Chapter, "One", 1),
            TocEntry::new(HeadingLevel::Section, "One.A", 1),
            TocEntry::new(HeadingLevel::Subsection, "One.A.i", 2),
            TocEntry::new(HeadingLevel::Section, "One.B", 2),
            TocEntry::new(HeadingLevel::Chapter, "Two", 3),
        ];
        let (nodes, roots) = build_tree(&mut document, &entries, &pages).expect("tree");

        assert_eq!(roots, [0, 4]);
        assert_eq!(nodes[0].children, [1, 3]);
        assert_eq!(nodes[1].children, [2]);
        assert_eq!(nodes[2].parent, Some(1));
        assert_eq!(descendant_count(&nodes, 0), 3);
    }

    #[test]
    fn subsection_without_chapter_becomes_root() {
        let (mut document, pages) = document_with_pages(1);
        let entries = [TocEntry::new(HeadingLevel::Subsection, "Loose", 1)];
        let (_, roots) = build_tree(&mut document, &entries, &pages).expect("tree");
        assert_eq!(roots, [0]);
    }

    #[test]
    fn missing_page_is_reported() {
        let (mut document, pages) = document_with_pages(1);
        let entries = [TocEntry::new(HeadingLevel::Chapter, "Far", 9)];
        let err = build_tree(&mut document, &entries, &pages)
            .err()
            .expect("page 9 does not exist");
        assert!(matches!(
            err,
            BookmarkError::MissingPage {
                entry_index: 0,
                page_number: 9
            }
        ));
    }
}

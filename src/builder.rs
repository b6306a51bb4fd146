//! Document construction for the pdf_flow crate.
//!
//! [`DocumentBuilder`] collects the cover, the body blocks and the settings, then runs the
//! build in passes: the contents pages are measured first (their height only depends on how
//! many headings will be listed), the body is laid out behind them, and finally the contents
//! are rendered from the headings recorded during the body pass.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{LayoutConfig, PageGeometry, TocConfig, TocPlacement};
use crate::decorate::{DecorationContext, PageDecorator, PageLabels, RunningHeader};
use crate::draw::Page;
use crate::error::{LayoutError, RenderError};
use crate::fonts::{BuiltinMetrics, TextMeasure};
use crate::layout::cover::render_cover;
use crate::layout::toc::{render_toc, visible_entries};
use crate::layout::{FlowLayout, LayoutState};
use crate::model::{Block, Cover, TocEntry};
use crate::render::render_pdf;

/// Builder for complete documents.
#[derive(Clone, Debug)]
pub struct DocumentBuilder {
    title: String,
    geometry: PageGeometry,
    layout: LayoutConfig,
    toc: Option<TocConfig>,
    cover: Option<Cover>,
    header_title: Option<String>,
    blocks: Vec<Block>,
    #[cfg(feature = "bookmarks")]
    bookmarks: bool,
}

/// Pages of a finished layout, in physical order, with headings and contents location.
#[derive(Clone, Debug)]
pub struct LaidOutDocument {
    pub pages: Vec<Page>,
    pub toc: Vec<TocEntry>,
    /// Physical page numbers occupied by the contents, empty when disabled.
    pub toc_pages: Vec<usize>,
    pub labels: PageLabels,
}

/// The rendered PDF and a summary of what went into it.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub toc: Vec<TocEntry>,
}

impl DocumentBuilder {
    /// Creates a builder for a document with the given title and default settings.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            geometry: PageGeometry::default(),
            layout: LayoutConfig::default(),
            toc: Some(TocConfig::default()),
            cover: None,
            header_title: None,
            blocks: Vec::new(),
            #[cfg(feature = "bookmarks")]
            bookmarks: false,
        }
    }

    /// Sets the page size and margins.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Sets line heights and the pagination policy.
    pub fn with_layout_config(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Configures the table of contents; `None` disables it.
    pub fn with_toc(mut self, toc: impl Into<Option<TocConfig>>) -> Self {
        self.toc = toc.into();
        self
    }

    /// Sets the cover drawn on page 1.
    pub fn with_cover(mut self, cover: impl Into<Option<Cover>>) -> Self {
        self.cover = cover.into();
        self
    }

    /// Overrides the text of the running header (defaults to the document title).
    pub fn with_header_title(mut self, header_title: impl Into<Option<String>>) -> Self {
        self.header_title = header_title.into();
        self
    }

    /// Embeds every recorded heading as a PDF outline entry.
    #[cfg(feature = "bookmarks")]
    pub fn with_bookmarks(mut self, bookmarks: bool) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    /// Appends a block and returns the updated builder.
    pub fn add_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Appends blocks and returns the updated builder.
    pub fn add_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }

    /// Appends a block in place.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Document title, used for the PDF metadata and the running header.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Blocks appended so far, in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Lays the document out with the standard font metrics.
    pub fn layout(&self) -> Result<LaidOutDocument, LayoutError> {
        self.layout_with(&BuiltinMetrics)
    }

    /// Lays the document out with the given metrics.
    pub fn layout_with<M: TextMeasure>(&self, measure: &M) -> Result<LaidOutDocument, LayoutError> {
        let front_pages = usize::from(self.cover.is_some());
        let labels = PageLabels::new(front_pages);
        let mut pages = Vec::new();

        if let Some(cover) = &self.cover {
            let mut page = Page::new(1, false);
            render_cover(&mut page, cover, &self.geometry, measure);
            pages.push(page);
        }

        let reserved_toc_pages = match &self.toc {
            Some(toc) if toc.placement == TocPlacement::AfterCover => {
                self.predict_toc_pages(toc, front_pages + 1, measure)?
            }
            _ => 0,
        };

        let body_start = front_pages + 1 + reserved_toc_pages;
        let mut flow = FlowLayout::starting_at(self.geometry, self.layout, measure, body_start);
        flow.emit_all(&self.blocks)?;
        let body = flow.finish();
        let body_end = body_start + body.pages.len();

        let mut toc_pages = Vec::new();
        if let Some(toc) = &self.toc {
            let toc_start = match toc.placement {
                TocPlacement::AfterCover => front_pages + 1,
                TocPlacement::End => body_end,
            };
            let mut state =
                LayoutState::new(self.geometry, self.layout.strict_block_height, toc_start);
            render_toc(&mut state, &body.toc, toc, measure, |page| labels.label(page))?;
            let rendered = state.finish();
            if toc.placement == TocPlacement::AfterCover {
                debug_assert_eq!(rendered.len(), reserved_toc_pages);
            }
            toc_pages = rendered.iter().map(Page::number).collect();
            pages.extend(rendered);
        }

        pages.extend(body.pages);
        pages.sort_by_key(Page::number);

        let header_title = self.header_title.as_deref().unwrap_or(&self.title);
        let mut decorator = RunningHeader::new(header_title, labels);
        let context = DecorationContext {
            geometry: &self.geometry,
            measure,
        };
        for page in pages.iter_mut().filter(|page| page.is_decorated()) {
            decorator.decorate_page(page, &context);
        }

        log::debug!(
            "laid out {} page(s): {} contents page(s), {} heading(s)",
            pages.len(),
            toc_pages.len(),
            body.toc.len()
        );

        Ok(LaidOutDocument {
            pages,
            toc: body.toc,
            toc_pages,
            labels,
        })
    }

    /// Number of pages the contents will take, found by rendering it with placeholder pages.
    ///
    /// Line count only depends on how many headings are listed, which is known from the blocks
    /// before any layout happens.
    fn predict_toc_pages<M: TextMeasure>(
        &self,
        toc: &TocConfig,
        first_page: usize,
        measure: &M,
    ) -> Result<usize, LayoutError> {
        let placeholders: Vec<TocEntry> = self
            .blocks
            .iter()
            .filter_map(Block::as_heading)
            .map(|heading| TocEntry::new(heading.level(), heading.display_title(), 0))
            .collect();
        let listed = visible_entries(&placeholders, toc.max_level).count();
        let mut scratch =
            LayoutState::new(self.geometry, self.layout.strict_block_height, first_page);
        render_toc(&mut scratch, &placeholders, toc, measure, |page| page)?;
        let pages = scratch.finish().len();
        log::trace!("{listed} contents entries need {pages} page(s)");
        Ok(pages)
    }

    /// Lays out and serializes the document.
    pub fn render(&self) -> Result<RenderedDocument, RenderError> {
        let laid_out = self.layout()?;
        let bytes = render_pdf(&self.title, &self.geometry, &laid_out.pages)?;

        #[cfg(feature = "bookmarks")]
        let bytes = if self.bookmarks {
            crate::bookmarks::apply_toc_bookmarks(&bytes, &laid_out.toc)?
        } else {
            bytes
        };

        log::info!(
            "rendered {} page(s), {} contents entries, {} bytes",
            laid_out.pages.len(),
            laid_out.toc.len(),
            bytes.len()
        );

        Ok(RenderedDocument {
            bytes,
            page_count: laid_out.pages.len(),
            toc: laid_out.toc,
        })
    }

    /// Renders the document and writes it to `path`.
    ///
    /// The bytes go to a sibling temporary file that is renamed into place, so a failed write
    /// never leaves a truncated artifact behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<RenderedDocument, RenderError> {
        let rendered = self.render()?;
        write_atomically(path.as_ref(), &rendered.bytes)?;
        Ok(rendered)
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let io_error = |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let partial = partial_path(path);
    let result = fs::write(&partial, bytes).and_then(|()| fs::rename(&partial, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&partial);
        return Err(io_error(source));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_path_is_a_sibling() {
        assert_eq!(
            partial_path(Path::new("docs/out.pdf")),
            PathBuf::from("docs/out.pdf.partial")
        );
    }

    #[test]
    fn write_failure_reports_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let target = dir.path().join("occupied.pdf");
        fs::create_dir_all(&target).expect("create blocking directory");

        let err = write_atomically(&target, b"%PDF").unwrap_err();
        assert!(matches!(err, RenderError::Io { ref path, .. } if path == &target));
        assert!(!partial_path(&target).exists());
    }
}

//! The flow layout engine.
//!
//! [`FlowLayout`] consumes blocks in document order and places them onto pages from top to
//! bottom. Before anything with a known minimum height is drawn, the pagination controller in
//! [`cursor`] decides whether the block still fits; headings are recorded for the table of
//! contents only after that decision, so every [`TocEntry`] names the page its heading is on.

pub mod cover;
pub mod cursor;
pub mod table;
pub mod toc;

use crate::config::{LayoutConfig, PageGeometry};
use crate::draw::{Page, Rect};
use crate::error::LayoutError;
use crate::fonts::encoding::to_latin1;
use crate::fonts::{Font, TextMeasure};
use crate::model::{
    palette, Block, BulletItem, CodeBlock, Heading, HeadingLevel, KeyValue, NoteBox, Paragraph,
    Rgb, Table, TocEntry,
};
use crate::wrap::wrap_lines;

pub use cursor::{Cursor, LayoutState};
pub use table::{CellLayout, RowLayout};
pub use toc::TocRecorder;

const BODY_FONT: Font = Font::regular(10.0);
const BODY_BOLD_FONT: Font = Font::bold(10.0);
const CODE_FONT: Font = Font::mono(8.5);
const NOTE_FONT: Font = Font::italic(9.0);

const CHAPTER_FONT: Font = Font::bold(16.0);
const SECTION_FONT: Font = Font::bold(13.0);
const SUBSECTION_FONT: Font = Font::bold(11.0);

/// Room a paragraph, bullet or key/value pair asks for before its first line.
const TEXT_MIN_HEIGHT: f64 = 8.0;
const CODE_MIN_HEIGHT: f64 = 16.0;
const NOTE_MIN_HEIGHT: f64 = 16.0;
const NOTE_BAR_WIDTH: f64 = 3.0;
const NOTE_BAR_MIN_HEIGHT: f64 = 12.0;
const NOTE_TEXT_OFFSET: f64 = 6.0;
const BULLET_OFFSET: f64 = 4.0;
const BULLET_INDENT: f64 = 6.0;
const BULLET_GLYPH_WIDTH: f64 = 4.0;
const CODE_INSET: f64 = 4.0;
const KEY_COLUMN_WIDTH: f64 = 50.0;
const KEY_VALUE_LINE_HEIGHT: f64 = 6.0;

/// Output of a body layout pass.
#[derive(Clone, Debug)]
pub struct LaidOutBody {
    pub pages: Vec<Page>,
    pub toc: Vec<TocEntry>,
}

/// Places blocks onto pages and records headings.
pub struct FlowLayout<M> {
    state: LayoutState,
    config: LayoutConfig,
    measure: M,
    toc: TocRecorder,
}

impl<M: TextMeasure> FlowLayout<M> {
    /// Starts laying out on page 1.
    pub fn new(geometry: PageGeometry, config: LayoutConfig, measure: M) -> Self {
        Self::starting_at(geometry, config, measure, 1)
    }

    /// Starts laying out on physical page `first_page`.
    pub fn starting_at(
        geometry: PageGeometry,
        config: LayoutConfig,
        measure: M,
        first_page: usize,
    ) -> Self {
        Self {
            state: LayoutState::new(geometry, config.strict_block_height, first_page),
            config,
            measure,
            toc: TocRecorder::new(),
        }
    }

    /// Current page and vertical position.
    pub fn cursor(&self) -> Cursor {
        self.state.cursor()
    }

    /// Headings recorded so far.
    pub fn toc_entries(&self) -> &[TocEntry] {
        self.toc.entries()
    }

    /// Emits every block in order.
    pub fn emit_all<'a, I>(&mut self, blocks: I) -> Result<(), LayoutError>
    where
        I: IntoIterator<Item = &'a Block>,
    {
        for block in blocks {
            self.emit(block)?;
        }
        Ok(())
    }

    /// Emits a single block below the cursor.
    pub fn emit(&mut self, block: &Block) -> Result<(), LayoutError> {
        match block {
            Block::Heading(heading) => self.heading(heading),
            Block::Paragraph(paragraph) => self.paragraph(paragraph),
            Block::Bullet(item) => self.bullet(item),
            Block::Code(code) => self.code(code),
            Block::Table(table) => self.table(table).map(|_| ()),
            Block::Note(note) => self.note(note),
            Block::KeyValue(pair) => self.key_value(pair),
            Block::PageBreak => {
                self.page_break();
                Ok(())
            }
        }
    }

    /// Draws a heading and records it for the table of contents.
    ///
    /// Chapters start on a new page unless the current one is still empty.
    pub fn heading(&mut self, heading: &Heading) -> Result<(), LayoutError> {
        let title = to_latin1(&heading.display_title()).into_owned();
        let left = self.state.geometry().margin_left;
        let right = left + self.state.geometry().usable_width();

        match heading.level() {
            HeadingLevel::Chapter => {
                self.page_break();
                self.record(heading.level(), &title);
                let y = self.state.y();
                let page = self.state.page();
                page.fill_rect(
                    Rect::new(left, y - 2.0, right - left, 12.0),
                    palette::PRIMARY,
                );
                page.cell_text(left + 3.0, y, 10.0, title, CHAPTER_FONT, palette::WHITE);
                self.state.advance(16.0);
            }
            HeadingLevel::Section => {
                self.state.ensure_space(18.0)?;
                self.record(heading.level(), &title);
                self.state.advance(4.0);
                let y = self.state.y();
                let page = self.state.page();
                page.line((left, y), (right, y), palette::PRIMARY, 0.6);
                page.cell_text(left, y + 2.0, 8.0, title, SECTION_FONT, palette::PRIMARY);
                self.state.advance(12.0);
            }
            HeadingLevel::Subsection => {
                self.state.ensure_space(14.0)?;
                self.record(heading.level(), &title);
                self.state.advance(3.0);
                let y = self.state.y();
                self.state
                    .page()
                    .cell_text(left, y, 7.0, title, SUBSECTION_FONT, palette::ACCENT);
                self.state.advance(8.0);
            }
        }
        Ok(())
    }

    fn record(&mut self, level: HeadingLevel, title: &str) {
        self.toc.record(level, title, self.state.page_number());
    }

    /// Draws wrapped body text, breaking pages between lines as needed.
    pub fn paragraph(&mut self, paragraph: &Paragraph) -> Result<(), LayoutError> {
        let font = if paragraph.is_bold() {
            BODY_BOLD_FONT
        } else {
            BODY_FONT
        };
        self.state.ensure_space(TEXT_MIN_HEIGHT)?;
        let left = self.state.geometry().margin_left;
        let width = self.state.geometry().usable_width();
        let line_height = self.config.body_line_height;
        let lines = self.wrap(paragraph.text(), width, font);
        self.draw_lines(&lines, left, font, palette::DARK, line_height)?;
        self.state.pad(1.0);
        Ok(())
    }

    /// Draws a `-` glyph and the wrapped item text, indented by nesting level.
    pub fn bullet(&mut self, item: &BulletItem) -> Result<(), LayoutError> {
        self.state.ensure_space(TEXT_MIN_HEIGHT)?;
        let geometry = *self.state.geometry();
        let x = geometry.margin_left + BULLET_OFFSET + f64::from(item.indent()) * BULLET_INDENT;
        let text_x = x + BULLET_GLYPH_WIDTH;
        let width = geometry.usable_width() - (text_x - geometry.margin_left);
        let lines = self.wrap(item.text(), width, BODY_FONT);
        let line_height = self.config.body_line_height;

        for (index, line) in lines.into_iter().enumerate() {
            self.state.ensure_space(line_height)?;
            let y = self.state.y();
            let page = self.state.page();
            if index == 0 {
                page.cell_text(x, y, line_height, "-", BODY_FONT, palette::DARK);
            }
            page.cell_text(text_x, y, line_height, line, BODY_FONT, palette::DARK);
            self.state.advance(line_height);
        }
        Ok(())
    }

    /// Draws literal monospace lines on a shaded background. Lines are never wrapped.
    pub fn code(&mut self, code: &CodeBlock) -> Result<(), LayoutError> {
        self.state.ensure_space(CODE_MIN_HEIGHT)?;
        self.state.advance(2.0);
        let geometry = *self.state.geometry();
        let x = geometry.margin_left + CODE_INSET;
        let width = geometry.usable_width() - 2.0 * CODE_INSET;
        let line_height = self.config.code_line_height;

        for line in code.lines() {
            self.state.ensure_space(line_height)?;
            let y = self.state.y();
            let page = self.state.page();
            page.fill_rect(Rect::new(x, y, width, line_height), palette::CODE_BG);
            page.cell_text(
                x + 1.0,
                y,
                line_height,
                to_latin1(line).into_owned(),
                CODE_FONT,
                palette::DARK,
            );
            self.state.advance(line_height);
        }
        self.state.pad(2.0);
        Ok(())
    }

    /// Lays out a table; see [`table::layout_table`].
    pub fn table(&mut self, table: &Table) -> Result<Vec<RowLayout>, LayoutError> {
        table::layout_table(&mut self.state, table, &self.config, &self.measure)
    }

    /// Draws an italic note with a colored bar along its left edge.
    pub fn note(&mut self, note: &NoteBox) -> Result<(), LayoutError> {
        self.state.ensure_space(NOTE_MIN_HEIGHT)?;
        self.state.advance(2.0);
        let geometry = *self.state.geometry();
        let bar_x = geometry.margin_left;
        let text_x = bar_x + NOTE_TEXT_OFFSET;
        let width = geometry.usable_width() - 2.0 * NOTE_TEXT_OFFSET;
        let lines = self.wrap(note.text(), width, NOTE_FONT);
        let line_height = self.config.note_line_height;

        let start = self.state.cursor();
        for line in lines {
            self.state.ensure_space(line_height)?;
            let y = self.state.y();
            let page = self.state.page();
            page.fill_rect(
                Rect::new(bar_x, y, NOTE_BAR_WIDTH, line_height),
                note.color(),
            );
            page.cell_text(text_x, y, line_height, line, NOTE_FONT, palette::SECONDARY);
            self.state.advance(line_height);
        }

        let end = self.state.cursor();
        if end.page == start.page && end.y - start.y < NOTE_BAR_MIN_HEIGHT {
            let bar_bottom = start.y + NOTE_BAR_MIN_HEIGHT;
            self.state.page().fill_rect(
                Rect::new(bar_x, end.y, NOTE_BAR_WIDTH, bar_bottom - end.y),
                note.color(),
            );
            self.state.set_y(bar_bottom);
        }
        self.state.pad(2.0);
        Ok(())
    }

    /// Draws a bold `key:` label in a fixed column followed by the wrapped value.
    pub fn key_value(&mut self, pair: &KeyValue) -> Result<(), LayoutError> {
        self.state.ensure_space(TEXT_MIN_HEIGHT)?;
        let geometry = *self.state.geometry();
        let key_x = geometry.margin_left;
        let value_x = key_x + KEY_COLUMN_WIDTH;
        let width = geometry.usable_width() - KEY_COLUMN_WIDTH;
        let key = format!("{}:", to_latin1(pair.key()));
        let lines = self.wrap(pair.value(), width, BODY_FONT);

        for (index, line) in lines.into_iter().enumerate() {
            self.state.ensure_space(KEY_VALUE_LINE_HEIGHT)?;
            let y = self.state.y();
            let page = self.state.page();
            if index == 0 {
                page.cell_text(
                    key_x,
                    y,
                    KEY_VALUE_LINE_HEIGHT,
                    key.clone(),
                    BODY_BOLD_FONT,
                    palette::PRIMARY,
                );
            }
            page.cell_text(
                value_x,
                y,
                KEY_VALUE_LINE_HEIGHT,
                line,
                BODY_FONT,
                palette::DARK,
            );
            self.state.advance(KEY_VALUE_LINE_HEIGHT);
        }
        Ok(())
    }

    /// Starts a new page unless nothing has been drawn on the current one.
    pub fn page_break(&mut self) {
        if !self.state.is_page_fresh() {
            self.state.break_page();
        }
    }

    /// Flushes the last page and returns the pages together with the recorded headings.
    pub fn finish(self) -> LaidOutBody {
        LaidOutBody {
            pages: self.state.finish(),
            toc: self.toc.into_entries(),
        }
    }

    fn wrap(&self, text: &str, width: f64, font: Font) -> Vec<String> {
        let text = to_latin1(text);
        wrap_lines(&text, width, |s| self.measure.text_width(s, font))
    }

    fn draw_lines(
        &mut self,
        lines: &[String],
        x: f64,
        font: Font,
        color: Rgb,
        line_height: f64,
    ) -> Result<(), LayoutError> {
        for line in lines {
            self.state.ensure_space(line_height)?;
            let y = self.state.y();
            self.state
                .page()
                .cell_text(x, y, line_height, line.clone(), font, color);
            self.state.advance(line_height);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawOp;

    struct PerChar;

    impl TextMeasure for PerChar {
        fn text_width(&self, text: &str, _font: Font) -> f64 {
            text.chars().count() as f64
        }
    }

    fn layout() -> FlowLayout<PerChar> {
        FlowLayout::starting_at(PageGeometry::a4(), LayoutConfig::default(), PerChar, 2)
    }

    #[test]
    fn first_chapter_on_empty_page_does_not_break() {
        let mut flow = layout();
        flow.emit(&Block::numbered_heading(HeadingLevel::Chapter, "1.", "Intro"))
            .expect("layout");
        let body = flow.finish();
        assert_eq!(body.pages.len(), 1);
        assert_eq!(body.toc[0].title(), "1.  Intro");
        assert_eq!(body.toc[0].page(), 2);
    }

    #[test]
    fn section_heading_recorded_on_page_it_lands_on() {
        let mut flow = layout();
        flow.emit(&Block::paragraph("x")).expect("layout");
        flow.state.set_y(265.0);
        flow.emit(&Block::heading(HeadingLevel::Section, "Late"))
            .expect("layout");
        assert_eq!(flow.toc_entries()[0].page(), 3);
        assert_eq!(flow.cursor().page, 3);
    }

    #[test]
    fn bullet_glyph_precedes_text() {
        let mut flow = layout();
        flow.emit(&Block::nested_bullet("item", 1)).expect("layout");
        let body = flow.finish();
        let xs: Vec<_> = body.pages[0]
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, text, .. } => Some((text.clone(), *x)),
                _ => None,
            })
            .collect();
        assert_eq!(xs, [("-".to_string(), 20.0), ("item".to_string(), 24.0)]);
    }

    #[test]
    fn short_note_reserves_minimum_bar_height() {
        let mut flow = layout();
        let before = flow.cursor().y;
        flow.emit(&Block::note("short")).expect("layout");
        // 2 mm before, 12 mm bar, 2 mm after.
        assert_eq!(flow.cursor().y, before + 16.0);
    }

    #[test]
    fn page_break_is_ignored_on_empty_page() {
        let mut flow = layout();
        flow.emit(&Block::page_break()).expect("layout");
        assert_eq!(flow.cursor().page, 2);
        flow.emit(&Block::paragraph("text")).expect("layout");
        flow.emit(&Block::page_break()).expect("layout");
        assert_eq!(flow.cursor().page, 3);
    }

    #[test]
    fn code_lines_are_not_wrapped() {
        let mut flow = layout();
        let long = "x".repeat(400);
        flow.emit(&Block::code(&long)).expect("layout");
        let body = flow.finish();
        let texts: Vec<_> = body.pages[0].texts().map(|(text, _)| text).collect();
        assert_eq!(texts, [long.as_str()]);
    }
}

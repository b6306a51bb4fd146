//! Table of contents recording and rendering.
//!
//! Headings are recorded while the body is laid out, after their page has been resolved. The
//! contents pages are rendered afterwards from the finished list in a separate pass.

use crate::config::TocConfig;
use crate::error::LayoutError;
use crate::fonts::{Font, TextMeasure};
use crate::layout::cursor::LayoutState;
use crate::model::{palette, HeadingLevel, Rgb, TocEntry};
use crate::wrap::clip_to_width;

const TITLE_FONT: Font = Font::bold(20.0);
const TITLE_HEIGHT: f64 = 12.0;
const TITLE_OFFSET: f64 = 4.0;
const TITLE_SPACE_AFTER: f64 = 6.0;
const ENTRY_INDENT: f64 = 6.0;
const LEVEL_INDENT: f64 = 8.0;
/// Gap kept between a clipped title and its page number.
const PAGE_NUMBER_GAP: f64 = 4.0;

/// Append-only list of headings in document order.
#[derive(Clone, Debug, Default)]
pub struct TocRecorder {
    entries: Vec<TocEntry>,
}

impl TocRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a heading drawn on `page`.
    pub fn record(&mut self, level: HeadingLevel, title: impl Into<String>, page: usize) {
        self.entries.push(TocEntry::new(level, title, page));
    }

    /// Recorded entries in document order.
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    /// Consumes the recorder and returns its entries.
    pub fn into_entries(self) -> Vec<TocEntry> {
        self.entries
    }
}

/// Entries shown on the contents page: those at or above `max_level`.
pub fn visible_entries(entries: &[TocEntry], max_level: u8) -> impl Iterator<Item = &TocEntry> {
    entries
        .iter()
        .filter(move |entry| entry.level().depth() <= max_level)
}

fn entry_style(level: HeadingLevel) -> (Font, Rgb) {
    match level {
        HeadingLevel::Chapter => (Font::bold(11.0), palette::PRIMARY),
        _ => (Font::regular(10.0), palette::DARK),
    }
}

/// Renders the contents pages onto `state`, starting on its current page.
///
/// `page_label` turns a physical page number into the number printed next to the entry.
/// Returns the number of entries drawn. Titles longer than the configured character limit, or
/// wider than the room left of the page number, are clipped.
pub fn render_toc<M, L>(
    state: &mut LayoutState,
    entries: &[TocEntry],
    config: &TocConfig,
    measure: &M,
    page_label: L,
) -> Result<usize, LayoutError>
where
    M: TextMeasure + ?Sized,
    L: Fn(usize) -> usize,
{
    let geometry = *state.geometry();
    let left = geometry.margin_left;
    let right = geometry.width - geometry.margin_right;

    state.advance(TITLE_OFFSET);
    state.ensure_space(TITLE_HEIGHT)?;
    let title_width = measure.text_width(&config.title, TITLE_FONT);
    let title_x = left + (geometry.usable_width() - title_width) / 2.0;
    let y = state.y();
    state.page().cell_text(
        title_x,
        y,
        TITLE_HEIGHT,
        config.title.clone(),
        TITLE_FONT,
        palette::PRIMARY,
    );
    state.advance(TITLE_HEIGHT + TITLE_SPACE_AFTER);

    let mut drawn = 0;
    for entry in visible_entries(entries, config.max_level) {
        let (font, color) = entry_style(entry.level());
        let x = left + ENTRY_INDENT + f64::from(entry.level().depth() - 1) * LEVEL_INDENT;

        let label = config
            .show_page_numbers
            .then(|| page_label(entry.page()).to_string());
        let label_width = label
            .as_deref()
            .map(|label| measure.text_width(label, font))
            .unwrap_or(0.0);
        let title_room = if label.is_some() {
            right - x - label_width - PAGE_NUMBER_GAP
        } else {
            right - x
        };

        let title: String = entry.title().chars().take(config.max_title_chars).collect();
        let title = clip_to_width(&title, title_room, |s| measure.text_width(s, font));

        state.ensure_space(config.line_height)?;
        let y = state.y();
        let page = state.page();
        page.cell_text(x, y, config.line_height, title, font, color);
        if let Some(label) = label {
            page.cell_text(right - label_width, y, config.line_height, label, font, color);
        }
        state.advance(config.line_height);
        drawn += 1;
    }

    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageGeometry;

    struct PerChar;

    impl TextMeasure for PerChar {
        fn text_width(&self, text: &str, _font: Font) -> f64 {
            text.chars().count() as f64
        }
    }

    fn entries() -> Vec<TocEntry> {
        vec![
            TocEntry::new(HeadingLevel::Chapter, "1.  Overview", 3),
            TocEntry::new(HeadingLevel::Section, "Feature Matrix", 3),
            TocEntry::new(HeadingLevel::Subsection, "Details", 4),
            TocEntry::new(HeadingLevel::Chapter, "2.  Stack", 5),
        ]
    }

    #[test]
    fn recorder_keeps_document_order() {
        let mut recorder = TocRecorder::new();
        recorder.record(HeadingLevel::Chapter, "A", 2);
        recorder.record(HeadingLevel::Section, "B", 2);
        let titles: Vec<_> = recorder.entries().iter().map(TocEntry::title).collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[test]
    fn subsections_are_hidden_by_default() {
        let entries = entries();
        let visible: Vec<_> = visible_entries(&entries, TocConfig::default().max_level)
            .map(TocEntry::title)
            .collect();
        assert_eq!(visible, ["1.  Overview", "Feature Matrix", "2.  Stack"]);
    }

    #[test]
    fn renders_titles_and_page_labels() {
        let mut state = LayoutState::new(PageGeometry::a4(), false, 2);
        let drawn = render_toc(
            &mut state,
            &entries(),
            &TocConfig::default(),
            &PerChar,
            |page| page - 1,
        )
        .expect("toc renders");
        assert_eq!(drawn, 3);

        let pages = state.finish();
        let texts: Vec<_> = pages[0].texts().map(|(text, _)| text.to_string()).collect();
        assert_eq!(
            texts,
            [
                "Table of Contents",
                "1.  Overview",
                "2",
                "Feature Matrix",
                "2",
                "2.  Stack",
                "4"
            ]
        );
    }

    #[test]
    fn long_titles_are_clipped() {
        let mut state = LayoutState::new(PageGeometry::a4(), false, 2);
        let long = vec![TocEntry::new(HeadingLevel::Chapter, "x".repeat(200), 3)];
        let config = TocConfig::default().with_page_numbers(false);
        render_toc(&mut state, &long, &config, &PerChar, |page| page).expect("toc renders");

        let pages = state.finish();
        let (title, _) = pages[0].texts().nth(1).expect("entry drawn");
        assert_eq!(title.chars().count(), 85);
    }
}

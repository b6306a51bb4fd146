//! Running header and footer drawn on every decorated page.

use crate::config::PageGeometry;
use crate::draw::Page;
use crate::fonts::encoding::to_latin1;
use crate::fonts::{Font, TextMeasure};
use crate::model::palette;

const HEADER_FONT: Font = Font::bold(9.0);
const FOOTER_FONT: Font = Font::regular(8.0);
const HEADER_HEIGHT: f64 = 6.0;
const HEADER_RULE_OFFSET: f64 = 4.0;
const FOOTER_OFFSET: f64 = 15.0;
const FOOTER_HEIGHT: f64 = 10.0;

/// Everything a decorator may consult while drawing.
pub struct DecorationContext<'a> {
    pub geometry: &'a PageGeometry,
    pub measure: &'a dyn TextMeasure,
}

/// Adds page furniture to finished pages.
///
/// Decorators run after layout, once the final page order is known, and only on pages marked
/// as decorated.
pub trait PageDecorator {
    fn decorate_page(&mut self, page: &mut Page, context: &DecorationContext<'_>);
}

/// Maps physical page numbers to the numbers printed in footers and the contents.
///
/// Front pages (the cover) are not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageLabels {
    front_pages: usize,
}

impl PageLabels {
    /// Creates labels that skip `front_pages` leading pages.
    pub fn new(front_pages: usize) -> Self {
        Self { front_pages }
    }

    /// Number printed for the physical page `physical`.
    pub fn label(&self, physical: usize) -> usize {
        physical.saturating_sub(self.front_pages)
    }
}

/// Document title and rule at the top, `Page N` centered at the bottom.
#[derive(Clone, Debug)]
pub struct RunningHeader {
    title: String,
    labels: PageLabels,
}

impl RunningHeader {
    /// Creates a decorator printing `title` in the header.
    pub fn new(title: impl Into<String>, labels: PageLabels) -> Self {
        Self {
            title: title.into(),
            labels,
        }
    }
}

impl PageDecorator for RunningHeader {
    fn decorate_page(&mut self, page: &mut Page, context: &DecorationContext<'_>) {
        let geometry = context.geometry;
        let left = geometry.margin_left;
        let right = geometry.width - geometry.margin_right;

        page.cell_text(
            left,
            geometry.margin_top,
            HEADER_HEIGHT,
            to_latin1(&self.title).into_owned(),
            HEADER_FONT,
            palette::SECONDARY,
        );
        let rule_y = geometry.margin_top + HEADER_RULE_OFFSET;
        page.line((left, rule_y), (right, rule_y), palette::BORDER, 0.2);

        let footer = format!("Page {}", self.labels.label(page.number()));
        let width = context.measure.text_width(&footer, FOOTER_FONT);
        page.cell_text(
            left + (geometry.usable_width() - width) / 2.0,
            geometry.height - FOOTER_OFFSET,
            FOOTER_HEIGHT,
            footer,
            FOOTER_FONT,
            palette::SECONDARY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::BuiltinMetrics;

    #[test]
    fn labels_skip_front_pages() {
        let labels = PageLabels::new(1);
        assert_eq!(labels.label(1), 0);
        assert_eq!(labels.label(4), 3);
        assert_eq!(PageLabels::default().label(4), 4);
    }

    #[test]
    fn running_header_draws_title_and_page_number() {
        let geometry = PageGeometry::a4();
        let context = DecorationContext {
            geometry: &geometry,
            measure: &BuiltinMetrics,
        };
        let mut decorator = RunningHeader::new("Docs", PageLabels::new(1));
        let mut page = Page::new(3, true);
        decorator.decorate_page(&mut page, &context);

        let texts: Vec<_> = page.texts().map(|(text, _)| text).collect();
        assert_eq!(texts, ["Docs", "Page 2"]);
    }
}

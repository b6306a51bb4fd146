//! The undecorated title page.

use crate::config::PageGeometry;
use crate::draw::{Page, Rect};
use crate::fonts::encoding::to_latin1;
use crate::fonts::{Font, TextMeasure};
use crate::model::{palette, Cover, Rgb};

const BAND_HEIGHT: f64 = 100.0;
const ACCENT_TOP: f64 = 95.0;
const ACCENT_HEIGHT: f64 = 8.0;
const TITLE_TOP: f64 = 25.0;
const INFO_TOP: f64 = 120.0;
const INFO_LABEL_WIDTH: f64 = 45.0;
const INFO_ROW_HEIGHT: f64 = 8.0;
const CAPTION_TOP: f64 = 195.0;
const CAPTION_RULE_HALF_WIDTH: f64 = 35.0;

fn centered<M: TextMeasure + ?Sized>(
    page: &mut Page,
    geometry: &PageGeometry,
    measure: &M,
    top: f64,
    height: f64,
    text: &str,
    style: (Font, Rgb),
) {
    let (font, color) = style;
    let text = to_latin1(text);
    let width = measure.text_width(&text, font);
    let x = geometry.margin_left + (geometry.usable_width() - width) / 2.0;
    page.cell_text(x, top, height, text.into_owned(), font, color);
}

/// Draws `cover` onto `page`.
pub fn render_cover<M: TextMeasure + ?Sized>(
    page: &mut Page,
    cover: &Cover,
    geometry: &PageGeometry,
    measure: &M,
) {
    page.fill_rect(
        Rect::new(0.0, 0.0, geometry.width, BAND_HEIGHT),
        palette::PRIMARY,
    );
    page.fill_rect(
        Rect::new(0.0, ACCENT_TOP, geometry.width, ACCENT_HEIGHT),
        palette::ACCENT,
    );

    let mut y = TITLE_TOP;
    centered(
        page,
        geometry,
        measure,
        y,
        18.0,
        cover.title(),
        (Font::bold(36.0), palette::WHITE),
    );
    y += 18.0;
    if let Some(subtitle) = cover.subtitle() {
        let style = (Font::regular(14.0), palette::WHITE);
        centered(page, geometry, measure, y, 10.0, subtitle, style);
        y += 10.0;
    }
    if let Some(tagline) = cover.tagline() {
        y += 6.0;
        let style = (Font::regular(11.0), palette::WHITE);
        centered(page, geometry, measure, y, 8.0, tagline, style);
    }

    let label_font = Font::bold(11.0);
    let value_font = Font::regular(11.0);
    let label_right = geometry.margin_left + INFO_LABEL_WIDTH;
    for (index, (label, value)) in cover.info().iter().enumerate() {
        let top = INFO_TOP + index as f64 * INFO_ROW_HEIGHT;
        let label = format!("{}:", to_latin1(label));
        let label_width = measure.text_width(&label, label_font);
        page.cell_text(
            label_right - label_width - 1.0,
            top,
            INFO_ROW_HEIGHT,
            label,
            label_font,
            palette::PRIMARY,
        );
        page.cell_text(
            label_right + 3.0,
            top,
            INFO_ROW_HEIGHT,
            to_latin1(value).into_owned(),
            value_font,
            palette::DARK,
        );
    }

    if let Some(caption) = cover.caption() {
        let style = (Font::bold(12.0), palette::PRIMARY);
        centered(page, geometry, measure, CAPTION_TOP, 8.0, caption, style);
        let middle = geometry.width / 2.0;
        let rule_y = CAPTION_TOP + 8.0;
        page.line(
            (middle - CAPTION_RULE_HALF_WIDTH, rule_y),
            (middle + CAPTION_RULE_HALF_WIDTH, rule_y),
            palette::PRIMARY,
            0.2,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::BuiltinMetrics;

    #[test]
    fn cover_draws_title_info_and_caption() {
        let cover = Cover::new("Handbook")
            .with_subtitle(Some("Layout notes".to_string()))
            .with_info("Version", "1.0.0")
            .with_caption(Some("PROJECT DOCUMENTATION".to_string()));
        let mut page = Page::new(1, false);
        render_cover(&mut page, &cover, &PageGeometry::a4(), &BuiltinMetrics);

        let texts: Vec<_> = page.texts().map(|(text, _)| text).collect();
        assert_eq!(
            texts,
            [
                "Handbook",
                "Layout notes",
                "Version:",
                "1.0.0",
                "PROJECT DOCUMENTATION"
            ]
        );
    }
}

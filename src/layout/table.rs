//! Table layout: per-row wrapping, row heights and banded rendering.
//!
//! A row is planned completely (every cell wrapped against its column) before anything is
//! drawn, so its height is known up front and the row is moved to the next page as a unit.

use crate::config::LayoutConfig;
use crate::draw::{Page, Rect};
use crate::error::LayoutError;
use crate::fonts::encoding::to_latin1;
use crate::fonts::{Font, TextMeasure};
use crate::layout::cursor::LayoutState;
use crate::model::{palette, Rgb, Table};
use crate::wrap::wrap;

pub(crate) const HEADER_FONT: Font = Font::bold(9.0);
pub(crate) const BODY_FONT: Font = Font::regular(9.0);

/// Horizontal padding between a cell border and its text, on each side.
pub const CELL_PADDING: f64 = 1.0;
const BORDER_WIDTH: f64 = 0.2;
/// Minimum room requested before the header row is drawn.
const TABLE_MIN_HEIGHT: f64 = 20.0;
const SPACE_BEFORE: f64 = 2.0;
const SPACE_AFTER: f64 = 3.0;

/// Placement of one cell within a row.
#[derive(Clone, Debug, PartialEq)]
pub struct CellLayout {
    pub x: f64,
    pub top: f64,
    pub width: f64,
    pub lines: Vec<String>,
}

/// Placement of one row, header rows included.
#[derive(Clone, Debug, PartialEq)]
pub struct RowLayout {
    pub page: usize,
    pub top: f64,
    pub height: f64,
    pub line_height: f64,
    pub fill: Rgb,
    pub is_header: bool,
    pub cells: Vec<CellLayout>,
}

impl RowLayout {
    /// Vertical offset of the row's lower edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Wrapped cell contents of a row and the height they need.
#[derive(Clone, Debug, PartialEq)]
pub struct RowPlan {
    pub cells: Vec<Vec<String>>,
    pub height: f64,
}

impl RowPlan {
    /// Largest number of lines across the row's cells, never less than one.
    pub fn line_count(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0).max(1)
    }
}

/// Alternates body row backgrounds, starting with white.
#[derive(Clone, Copy, Debug, Default)]
pub struct RowBanding {
    shaded: bool,
}

impl RowBanding {
    /// Returns the fill for the next row and toggles the band.
    pub fn next_fill(&mut self) -> Rgb {
        let fill = if self.shaded {
            palette::ROW_BAND
        } else {
            palette::WHITE
        };
        self.shaded = !self.shaded;
        fill
    }
}

/// Resolves the column widths of `table`, splitting `usable_width` evenly when none are given.
pub fn column_widths(table: &Table, usable_width: f64) -> Vec<f64> {
    let columns = table.column_count().max(1);
    match table.column_widths() {
        Some(widths) if widths.len() == table.column_count() => widths.to_vec(),
        Some(widths) => {
            log::warn!(
                "table has {} columns but {} widths; splitting the page width evenly",
                table.column_count(),
                widths.len()
            );
            vec![usable_width / columns as f64; columns]
        }
        None => vec![usable_width / columns as f64; columns],
    }
}

/// Wraps every cell of a row and computes `line_height * max(1, max cell lines)`.
///
/// Missing cells count as empty; cells beyond the last column are ignored.
pub fn plan_row<M: TextMeasure + ?Sized>(
    cells: &[String],
    widths: &[f64],
    font: Font,
    line_height: f64,
    measure: &M,
) -> RowPlan {
    if cells.len() > widths.len() {
        log::warn!(
            "row has {} cells for {} columns; dropping the extra cells",
            cells.len(),
            widths.len()
        );
    }

    let wrapped: Vec<Vec<String>> = widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let text = cells.get(index).map(String::as_str).unwrap_or("");
            let text = to_latin1(text);
            wrap(&text, width - 2.0 * CELL_PADDING, |s| {
                measure.text_width(s, font)
            })
        })
        .collect();

    let mut plan = RowPlan {
        cells: wrapped,
        height: 0.0,
    };
    plan.height = line_height * plan.line_count() as f64;
    log::trace!(
        "planned row: {} line(s), {:.1} mm",
        plan.line_count(),
        plan.height
    );
    plan
}

fn draw_row(
    page: &mut Page,
    plan: RowPlan,
    widths: &[f64],
    left: f64,
    top: f64,
    style: RowStyle,
    page_number: usize,
) -> RowLayout {
    let mut cells = Vec::with_capacity(widths.len());
    let mut x = left;
    for (lines, width) in plan.cells.into_iter().zip(widths) {
        let rect = Rect::new(x, top, *width, plan.height);
        page.fill_rect(rect, style.fill);
        page.stroke_rect(rect, palette::BORDER, BORDER_WIDTH);
        for (index, line) in lines.iter().enumerate() {
            page.cell_text(
                x + CELL_PADDING,
                top + index as f64 * style.line_height,
                style.line_height,
                line.clone(),
                style.font,
                style.color,
            );
        }
        cells.push(CellLayout {
            x,
            top,
            width: *width,
            lines,
        });
        x += width;
    }

    RowLayout {
        page: page_number,
        top,
        height: plan.height,
        line_height: style.line_height,
        fill: style.fill,
        is_header: style.is_header,
        cells,
    }
}

#[derive(Clone, Copy)]
struct RowStyle {
    font: Font,
    color: Rgb,
    fill: Rgb,
    line_height: f64,
    is_header: bool,
}

impl RowStyle {
    fn header(config: &LayoutConfig) -> Self {
        Self {
            font: HEADER_FONT,
            color: palette::PRIMARY,
            fill: palette::TABLE_HEAD,
            line_height: config.table_header_line_height,
            is_header: true,
        }
    }

    fn body(config: &LayoutConfig, fill: Rgb) -> Self {
        Self {
            font: BODY_FONT,
            color: palette::DARK,
            fill,
            line_height: config.table_line_height,
            is_header: false,
        }
    }
}

/// Lays out `table` below the cursor and returns the placement of every drawn row.
///
/// Each body row calls `ensure_space` once with its precomputed height, so a multi-line row is
/// never split across pages. The banding fill is chosen before any cell of the row is drawn.
pub fn layout_table<M: TextMeasure + ?Sized>(
    state: &mut LayoutState,
    table: &Table,
    config: &LayoutConfig,
    measure: &M,
) -> Result<Vec<RowLayout>, LayoutError> {
    state.ensure_space(TABLE_MIN_HEIGHT)?;
    state.advance(SPACE_BEFORE);

    let left = state.geometry().margin_left;
    let widths = column_widths(table, state.geometry().usable_width());
    let header_style = RowStyle::header(config);
    let header_plan = plan_row(
        table.headers(),
        &widths,
        header_style.font,
        header_style.line_height,
        measure,
    );

    let mut rows = Vec::with_capacity(table.rows().len() + 1);
    state.ensure_space(header_plan.height)?;
    rows.push(place_row(state, header_plan.clone(), &widths, left, header_style));

    let mut banding = RowBanding::default();
    for cells in table.rows() {
        let style = RowStyle::body(config, banding.next_fill());
        let plan = plan_row(cells, &widths, style.font, style.line_height, measure);
        let broke = state.ensure_space(plan.height)?;
        if broke && config.repeat_table_header {
            rows.push(place_row(state, header_plan.clone(), &widths, left, header_style));
        }
        rows.push(place_row(state, plan, &widths, left, style));
    }

    state.pad(SPACE_AFTER);
    Ok(rows)
}

fn place_row(
    state: &mut LayoutState,
    plan: RowPlan,
    widths: &[f64],
    left: f64,
    style: RowStyle,
) -> RowLayout {
    let top = state.y();
    let page_number = state.page_number();
    let row = draw_row(state.page(), plan, widths, left, top, style, page_number);
    state.advance(row.height);
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PerChar;

    impl TextMeasure for PerChar {
        fn text_width(&self, text: &str, _font: Font) -> f64 {
            text.chars().count() as f64
        }
    }

    #[test]
    fn even_widths_when_unspecified() {
        let table = Table::new(["a", "b", "c", "d"]);
        assert_eq!(column_widths(&table, 100.0), vec![25.0; 4]);
    }

    #[test]
    fn mismatched_widths_fall_back_to_even_split() {
        let table = Table::new(["a", "b"]).with_column_widths(Some(vec![10.0]));
        assert_eq!(column_widths(&table, 100.0), vec![50.0, 50.0]);
    }

    #[test]
    fn row_height_follows_tallest_cell() {
        let cells = vec!["one".to_string(), "alpha beta gamma".to_string()];
        // 12 mm columns leave 10 mm of text per line.
        let plan = plan_row(&cells, &[12.0, 12.0], BODY_FONT, 5.0, &PerChar);
        assert_eq!(plan.cells[1], vec!["alpha beta", "gamma"]);
        assert_eq!(plan.line_count(), 2);
        assert_eq!(plan.height, 10.0);
    }

    #[test]
    fn missing_cells_still_take_one_line() {
        let plan = plan_row(&[], &[12.0, 12.0], BODY_FONT, 5.0, &PerChar);
        assert_eq!(plan.cells, vec![vec![String::new()], vec![String::new()]]);
        assert_eq!(plan.height, 5.0);
    }

    #[test]
    fn banding_alternates_starting_white() {
        let mut banding = RowBanding::default();
        assert_eq!(banding.next_fill(), palette::WHITE);
        assert_eq!(banding.next_fill(), palette::ROW_BAND);
        assert_eq!(banding.next_fill(), palette::WHITE);
    }
}

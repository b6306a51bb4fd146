//! Cursor tracking and page breaking.

use crate::config::PageGeometry;
use crate::draw::Page;
use crate::error::LayoutError;

/// Current page and vertical write position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    /// Physical 1-based page number.
    pub page: usize,
    /// Distance from the top edge of the page, in millimetres.
    pub y: f64,
}

/// Mutable layout state threaded through every block emission.
///
/// Owns the page currently being filled and every page that has already been flushed.
/// Pages after the first physical page are decorated with the running header, so their
/// content starts below the header reserve.
#[derive(Debug)]
pub struct LayoutState {
    geometry: PageGeometry,
    strict: bool,
    cursor: Cursor,
    current: Page,
    finished: Vec<Page>,
}

impl LayoutState {
    /// Starts a layout on physical page `first_page`.
    pub fn new(geometry: PageGeometry, strict: bool, first_page: usize) -> Self {
        let first_page = first_page.max(1);
        let decorated = is_decorated(first_page);
        Self {
            geometry,
            strict,
            cursor: Cursor {
                page: first_page,
                y: geometry.content_top(decorated),
            },
            current: Page::new(first_page, decorated),
            finished: Vec::new(),
        }
    }

    /// Page size and margins in use.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Current page and vertical position.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Physical number of the page being filled.
    pub fn page_number(&self) -> usize {
        self.cursor.page
    }

    /// Vertical position from the top edge, in millimetres.
    pub fn y(&self) -> f64 {
        self.cursor.y
    }

    /// Moves the cursor down by `dy`.
    pub fn advance(&mut self, dy: f64) {
        self.cursor.y += dy;
    }

    /// Adds spacing after a block. Spacing that would cross the bottom margin is dropped.
    pub fn pad(&mut self, dy: f64) {
        let bottom = self.geometry.content_bottom();
        if self.cursor.y < bottom {
            self.cursor.y = (self.cursor.y + dy).min(bottom);
        }
    }

    /// Moves the cursor to an absolute vertical position on the current page.
    pub fn set_y(&mut self, y: f64) {
        self.cursor.y = y;
    }

    /// The page buffer receiving draw operations.
    pub fn page(&mut self) -> &mut Page {
        &mut self.current
    }

    /// True while nothing has been drawn on the current page and the cursor has not moved.
    ///
    /// Blank lines draw nothing but still advance the cursor, so both are checked.
    pub fn is_page_fresh(&self) -> bool {
        self.current.is_empty()
            && self.cursor.y <= self.geometry.content_top(self.current.is_decorated())
    }

    /// Room left between the cursor and the bottom margin.
    pub fn remaining(&self) -> f64 {
        self.geometry.content_bottom() - self.cursor.y
    }

    /// Makes sure `required` millimetres fit below the cursor, starting a new page if not.
    ///
    /// Returns whether a page break happened. A request taller than an empty page is a
    /// `BlockTooLarge` error in strict mode; otherwise the block is moved to a fresh page (if it
    /// is not on one already) and allowed to overflow the bottom margin.
    pub fn ensure_space(&mut self, required: f64) -> Result<bool, LayoutError> {
        if self.cursor.y + required <= self.geometry.content_bottom() {
            return Ok(false);
        }

        let available = self.geometry.usable_height(true);
        if required > available {
            if self.strict {
                return Err(LayoutError::BlockTooLarge {
                    required,
                    available,
                });
            }
            log::warn!(
                "block of {required:.1} mm exceeds the {available:.1} mm page body; it will overflow page {}",
                self.cursor.page
            );
            if self.is_page_fresh() {
                return Ok(false);
            }
        }

        self.break_page();
        Ok(true)
    }

    /// Flushes the current page and moves the cursor to the top of the next one.
    pub fn break_page(&mut self) {
        let next = self.cursor.page + 1;
        log::debug!(
            "page break {} -> {next} at y = {:.1} mm",
            self.cursor.page,
            self.cursor.y
        );
        let decorated = is_decorated(next);
        let finished = std::mem::replace(&mut self.current, Page::new(next, decorated));
        self.finished.push(finished);
        self.cursor = Cursor {
            page: next,
            y: self.geometry.content_top(decorated),
        };
    }

    /// Flushes the last page and returns every page in order.
    pub fn finish(mut self) -> Vec<Page> {
        self.finished.push(self.current);
        self.finished
    }
}

/// The first physical page never carries the running header and footer.
pub fn is_decorated(page: usize) -> bool {
    page > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Rect;
    use crate::model::palette;

    fn mark(state: &mut LayoutState) {
        let y = state.y();
        state
            .page()
            .fill_rect(Rect::new(0.0, y, 1.0, 1.0), palette::DARK);
    }

    #[test]
    fn fits_without_break() {
        let mut state = LayoutState::new(PageGeometry::a4(), false, 2);
        assert_eq!(state.y(), 18.0);
        assert_eq!(state.ensure_space(100.0), Ok(false));
        assert_eq!(state.page_number(), 2);
    }

    #[test]
    fn breaks_when_bottom_margin_is_reached() {
        let mut state = LayoutState::new(PageGeometry::a4(), false, 1);
        state.set_y(270.0);
        assert_eq!(state.ensure_space(8.0), Ok(true));
        assert_eq!(state.cursor(), Cursor { page: 2, y: 18.0 });
        assert_eq!(state.finish().len(), 2);
    }

    #[test]
    fn exact_fit_does_not_break() {
        let mut state = LayoutState::new(PageGeometry::a4(), false, 2);
        state.set_y(269.0);
        assert_eq!(state.ensure_space(8.0), Ok(false));
    }

    #[test]
    fn strict_mode_rejects_oversized_blocks() {
        let mut state = LayoutState::new(PageGeometry::a4(), true, 2);
        let err = state.ensure_space(400.0).unwrap_err();
        assert!(matches!(err, LayoutError::BlockTooLarge { required, .. } if required == 400.0));
    }

    #[test]
    fn lenient_mode_overflows_on_fresh_page() {
        let mut state = LayoutState::new(PageGeometry::a4(), false, 2);
        assert_eq!(state.ensure_space(400.0), Ok(false));
        assert_eq!(state.page_number(), 2);
    }

    #[test]
    fn lenient_mode_moves_oversized_block_to_new_page() {
        let mut state = LayoutState::new(PageGeometry::a4(), false, 2);
        mark(&mut state);
        state.advance(10.0);
        assert_eq!(state.ensure_space(400.0), Ok(true));
        assert_eq!(state.page_number(), 3);
        assert!(state.is_page_fresh());
    }

    #[test]
    fn padding_stops_at_bottom_margin() {
        let mut state = LayoutState::new(PageGeometry::a4(), false, 2);
        state.set_y(275.0);
        state.pad(3.0);
        assert_eq!(state.y(), 277.0);
        state.set_y(100.0);
        state.pad(3.0);
        assert_eq!(state.y(), 103.0);
    }

    #[test]
    fn page_with_advanced_cursor_is_not_fresh() {
        let mut state = LayoutState::new(PageGeometry::a4(), false, 2);
        assert!(state.is_page_fresh());
        state.advance(5.5);
        assert!(!state.is_page_fresh());
        state.break_page();
        assert!(state.is_page_fresh());
    }
}

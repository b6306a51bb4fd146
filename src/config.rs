//! Page geometry and layout settings.
//!
//! Every value is in millimetres. The defaults describe an A4 portrait page with 10 mm side
//! and top margins and a 20 mm automatic page-break margin at the bottom.

/// Physical page size and margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    /// Distance from the bottom edge below which no block starts a line.
    pub margin_bottom: f64,
    /// Room kept free under the top margin for the running header on decorated pages.
    pub header_reserve: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageGeometry {
    /// A4 portrait with the default margins.
    pub fn a4() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin_left: 10.0,
            margin_right: 10.0,
            margin_top: 10.0,
            margin_bottom: 20.0,
            header_reserve: 8.0,
        }
    }

    /// Sets the paper size and returns the updated geometry.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets all four margins and returns the updated geometry.
    pub fn with_margins(mut self, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    /// Sets the band kept free for the running header on decorated pages.
    pub fn with_header_reserve(mut self, reserve: f64) -> Self {
        self.header_reserve = reserve;
        self
    }

    /// Width between the side margins.
    pub fn usable_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// Lowest vertical offset content may reach.
    pub fn content_bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }

    /// Vertical offset where content starts on a page.
    pub fn content_top(&self, decorated: bool) -> f64 {
        if decorated {
            self.margin_top + self.header_reserve
        } else {
            self.margin_top
        }
    }

    /// Height between the content top and the bottom margin.
    pub fn usable_height(&self, decorated: bool) -> f64 {
        self.content_bottom() - self.content_top(decorated)
    }
}

/// Line heights and pagination policy of the flow layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Line height of paragraphs and bullets.
    pub body_line_height: f64,
    /// Line height inside table body rows.
    pub table_line_height: f64,
    /// Line height inside the table header row.
    pub table_header_line_height: f64,
    pub code_line_height: f64,
    pub note_line_height: f64,
    /// Fail with `BlockTooLarge` instead of overflowing when a block exceeds a whole page.
    pub strict_block_height: bool,
    /// Draw the header row again when a table continues on a new page.
    pub repeat_table_header: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            body_line_height: 5.5,
            table_line_height: 5.0,
            table_header_line_height: 7.0,
            code_line_height: 4.5,
            note_line_height: 5.0,
            strict_block_height: false,
            repeat_table_header: false,
        }
    }
}

impl LayoutConfig {
    /// Fails with `BlockTooLarge` instead of overflowing oversized blocks.
    pub fn with_strict_block_height(mut self, strict: bool) -> Self {
        self.strict_block_height = strict;
        self
    }

    /// Redraws the table header row after a page break inside a table.
    pub fn with_repeat_table_header(mut self, repeat: bool) -> Self {
        self.repeat_table_header = repeat;
        self
    }

    /// Sets the line height of paragraphs and bullets.
    pub fn with_body_line_height(mut self, height: f64) -> Self {
        self.body_line_height = height;
        self
    }

    /// Sets the line height of table body rows.
    pub fn with_table_line_height(mut self, height: f64) -> Self {
        self.table_line_height = height;
        self
    }
}

/// Where the table of contents pages are placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TocPlacement {
    /// Directly after the cover, before the first chapter.
    #[default]
    AfterCover,
    /// After the last body page.
    End,
}

/// Table of contents settings.
#[derive(Clone, Debug, PartialEq)]
pub struct TocConfig {
    pub title: String,
    /// Deepest heading level listed on the contents page.
    pub max_level: u8,
    /// Titles longer than this many characters are clipped.
    pub max_title_chars: usize,
    pub placement: TocPlacement,
    pub show_page_numbers: bool,
    pub line_height: f64,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            title: "Table of Contents".to_string(),
            max_level: 2,
            max_title_chars: 85,
            placement: TocPlacement::AfterCover,
            show_page_numbers: true,
            line_height: 7.0,
        }
    }
}

impl TocConfig {
    /// Sets the heading drawn above the entries.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the deepest heading level that is listed.
    pub fn with_max_level(mut self, max_level: u8) -> Self {
        self.max_level = max_level;
        self
    }

    /// Sets the character limit applied to entry titles.
    pub fn with_max_title_chars(mut self, max_title_chars: usize) -> Self {
        self.max_title_chars = max_title_chars;
        self
    }

    /// Sets where the contents pages go.
    pub fn with_placement(mut self, placement: TocPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Shows or hides the right-aligned page numbers.
    pub fn with_page_numbers(mut self, show: bool) -> Self {
        self.show_page_numbers = show;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_usable_area() {
        let geometry = PageGeometry::a4();
        assert_eq!(geometry.usable_width(), 190.0);
        assert_eq!(geometry.content_bottom(), 277.0);
        assert_eq!(geometry.content_top(false), 10.0);
        assert_eq!(geometry.content_top(true), 18.0);
        assert_eq!(geometry.usable_height(true), 259.0);
    }
}

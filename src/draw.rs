//! Positioned drawing primitives produced by the layout engine.
//!
//! Coordinates are millimetres measured from the top-left corner of the page, the way the
//! layout thinks about them. The rendering backend flips them into PDF user space.

use crate::fonts::Font;
use crate::model::Rgb;

/// An axis-aligned rectangle; `y` is its top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Vertical offset of the lower edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A single drawing instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Text whose baseline sits at `baseline`.
    Text {
        x: f64,
        baseline: f64,
        text: String,
        font: Font,
        color: Rgb,
    },
    FillRect { rect: Rect, color: Rgb },
    StrokeRect { rect: Rect, color: Rgb, width: f64 },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb,
        width: f64,
    },
}

/// Baseline that vertically centers a line of `font` inside a cell of `height` starting at `top`.
pub fn cell_baseline(top: f64, height: f64, font: Font) -> f64 {
    top + height / 2.0 + 0.3 * font.size_mm()
}

/// The accumulated draw operations of one page.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    number: usize,
    decorated: bool,
    ops: Vec<DrawOp>,
}

impl Page {
    /// Creates an empty page buffer.
    pub fn new(number: usize, decorated: bool) -> Self {
        Self {
            number,
            decorated,
            ops: Vec::new(),
        }
    }

    /// Physical 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Whether the running header and footer are drawn on this page.
    pub fn is_decorated(&self) -> bool {
        self.decorated
    }

    /// Draw operations in painting order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// True when nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Appends a raw draw operation.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Draws one line of text vertically centered in a cell.
    pub fn cell_text(
        &mut self,
        x: f64,
        top: f64,
        height: f64,
        text: impl Into<String>,
        font: Font,
        color: Rgb,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            x,
            baseline: cell_baseline(top, height, font),
            text,
            font,
            color,
        });
    }

    /// Fills `rect` with `color`.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    /// Strokes the outline of `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: f64) {
        self.ops.push(DrawOp::StrokeRect { rect, color, width });
    }

    /// Draws a straight line between two points.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, width: f64) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            width,
        });
    }

    /// Iterates over the text drawn on this page together with its baseline.
    pub fn texts(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, baseline, .. } => Some((text.as_str(), *baseline)),
            _ => None,
        })
    }

    pub(crate) fn extend(&mut self, ops: impl IntoIterator<Item = DrawOp>) {
        self.ops.extend(ops);
    }
}

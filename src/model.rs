//! Data structures describing the logical content of a document.
//!
//! The types in this module are the input of the layout engine. They never reference the
//! rendering crate, so a document can be assembled, inspected and tested without pulling
//! `printpdf` into the picture. Every block is immutable once built and is consumed in
//! document order.

/// An RGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Named colors used by the default document style.
pub mod palette {
    use super::Rgb;

    pub const PRIMARY: Rgb = Rgb::new(21, 101, 192);
    pub const ACCENT: Rgb = Rgb::new(66, 165, 245);
    pub const DARK: Rgb = Rgb::new(26, 26, 46);
    pub const SECONDARY: Rgb = Rgb::new(92, 107, 138);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BORDER: Rgb = Rgb::new(224, 232, 245);
    pub const TABLE_HEAD: Rgb = Rgb::new(220, 232, 255);
    /// Background of every other table body row.
    pub const ROW_BAND: Rgb = Rgb::new(250, 251, 255);
    pub const CODE_BG: Rgb = Rgb::new(245, 247, 250);
    pub const GREEN: Rgb = Rgb::new(46, 125, 50);
    pub const RED: Rgb = Rgb::new(211, 47, 47);
}

/// Depth of a heading. Level 1 starts a chapter on a fresh page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    /// Top-level chapter.
    Chapter = 1,
    /// Section within a chapter.
    Section = 2,
    /// Sub-section; omitted from the printed contents by default.
    Subsection = 3,
}

impl HeadingLevel {
    /// Returns the numeric depth (1, 2 or 3).
    pub fn depth(self) -> u8 {
        self as u8
    }

    /// Converts a numeric depth into a level.
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            1 => Some(Self::Chapter),
            2 => Some(Self::Section),
            3 => Some(Self::Subsection),
            _ => None,
        }
    }
}

/// A heading together with its optional numbering label (`"3."`).
#[derive(Clone, Debug, PartialEq)]
pub struct Heading {
    level: HeadingLevel,
    title: String,
    label: Option<String>,
}

impl Heading {
    /// Creates an unnumbered heading.
    pub fn new(level: HeadingLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            label: None,
        }
    }

    /// Sets the numbering label and returns the updated heading.
    pub fn with_label(mut self, label: impl Into<Option<String>>) -> Self {
        self.label = label.into();
        self
    }

    /// Nesting level of the heading.
    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    /// Heading text without its label.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Optional number label such as `"2."`.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Text drawn on the page and recorded in the table of contents.
    pub fn display_title(&self) -> String {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => format!("{label}  {}", self.title),
            _ => self.title.clone(),
        }
    }
}

/// A wrapped body paragraph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paragraph {
    text: String,
    bold: bool,
}

impl Paragraph {
    /// Creates a regular-weight paragraph.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    /// Sets the emphasis flag and returns the updated paragraph.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Unwrapped paragraph text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the paragraph is set in bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }
}

/// A single bulleted item. Indent 0 is the outermost list level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulletItem {
    text: String,
    indent: u8,
}

impl BulletItem {
    /// Creates a top-level bullet item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            indent: 0,
        }
    }

    /// Sets the nesting level.
    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Unwrapped item text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Nesting level, 0 for top-level items.
    pub fn indent(&self) -> u8 {
        self.indent
    }
}

/// Literal, unwrapped monospace lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBlock {
    lines: Vec<String>,
}

impl CodeBlock {
    /// Builds a code block from text, trimming surrounding blank space and splitting on newlines.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.trim().split('\n').map(str::to_string).collect(),
        }
    }

    /// Literal lines, drawn without wrapping.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// A table with a header row and body rows of plain-text cells.
///
/// Column widths are in millimetres; when absent the usable page width is split evenly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Option<Vec<f64>>,
}

impl Table {
    /// Creates a table with the given header cells and no rows.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            column_widths: None,
        }
    }

    /// Appends a body row and returns the updated table.
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Sets explicit column widths (millimetres) and returns the updated table.
    pub fn with_column_widths(mut self, widths: impl Into<Option<Vec<f64>>>) -> Self {
        self.column_widths = widths.into();
        self
    }

    /// Header cells.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Body rows, each a list of cells.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Explicit column widths in millimetres, if any.
    pub fn column_widths(&self) -> Option<&[f64]> {
        self.column_widths.as_deref()
    }

    /// Number of columns, taken from the header.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// An italic call-out with a colored bar on its left edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteBox {
    text: String,
    color: Rgb,
}

impl NoteBox {
    /// Creates a note with the primary accent color.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: palette::PRIMARY,
        }
    }

    /// Sets the color of the side bar.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Unwrapped note text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Color of the side bar.
    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// A bold `key:` label followed by a wrapped value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    key: String,
    value: String,
}

impl KeyValue {
    /// Creates a key/value line.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Label shown in the key column.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value text, wrapped in the remaining width.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Individual content blocks, emitted in document order.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    Bullet(BulletItem),
    Code(CodeBlock),
    Table(Table),
    Note(NoteBox),
    KeyValue(KeyValue),
    /// Explicit page break request. Ignored when the current page is still empty.
    PageBreak,
}

impl Block {
    /// Convenience helper for an unnumbered heading.
    pub fn heading(level: HeadingLevel, title: impl Into<String>) -> Self {
        Self::Heading(Heading::new(level, title))
    }

    /// Convenience helper for a numbered heading such as `"2.  Tech Stack"`.
    pub fn numbered_heading(
        level: HeadingLevel,
        label: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self::Heading(Heading::new(level, title).with_label(Some(label.into())))
    }

    /// Regular paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(Paragraph::new(text))
    }

    /// Bold paragraph.
    pub fn bold_paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(Paragraph::new(text).with_bold(true))
    }

    /// Top-level bullet item.
    pub fn bullet(text: impl Into<String>) -> Self {
        Self::Bullet(BulletItem::new(text))
    }

    /// Bullet item nested `indent` levels deep.
    pub fn nested_bullet(text: impl Into<String>, indent: u8) -> Self {
        Self::Bullet(BulletItem::new(text).with_indent(indent))
    }

    /// Code block from literal text; surrounding blank lines are trimmed.
    pub fn code(text: &str) -> Self {
        Self::Code(CodeBlock::from_text(text))
    }

    /// Table block.
    pub fn table(table: Table) -> Self {
        Self::Table(table)
    }

    /// Note box with the default color.
    pub fn note(text: impl Into<String>) -> Self {
        Self::Note(NoteBox::new(text))
    }

    /// Key/value line.
    pub fn key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::KeyValue(KeyValue::new(key, value))
    }

    /// Explicit page break.
    pub fn page_break() -> Self {
        Self::PageBreak
    }

    /// Returns the heading if this block is one.
    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Self::Heading(heading) => Some(heading),
            _ => None,
        }
    }
}

/// Content of the undecorated first page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cover {
    title: String,
    subtitle: Option<String>,
    tagline: Option<String>,
    info: Vec<(String, String)>,
    caption: Option<String>,
}

impl Cover {
    /// Creates a cover with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the line below the title.
    pub fn with_subtitle(mut self, subtitle: impl Into<Option<String>>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Sets the smaller line below the subtitle.
    pub fn with_tagline(mut self, tagline: impl Into<Option<String>>) -> Self {
        self.tagline = tagline.into();
        self
    }

    /// Appends a `label: value` row to the information panel.
    pub fn with_info(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.info.push((label.into(), value.into()));
        self
    }

    /// Sets the caption shown in the lower third of the page.
    pub fn with_caption(mut self, caption: impl Into<Option<String>>) -> Self {
        self.caption = caption.into();
        self
    }

    /// Main title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Line below the title, if any.
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Smaller line below the subtitle, if any.
    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref()
    }

    /// Label/value rows below the band.
    pub fn info(&self) -> &[(String, String)] {
        &self.info
    }

    /// Caption near the bottom of the cover, if any.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

/// A heading recorded at the moment it was drawn.
///
/// `page` is the physical, 1-based page the heading landed on, resolved after any page break
/// the heading itself triggered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    level: HeadingLevel,
    title: String,
    page: usize,
}

impl TocEntry {
    /// Creates an entry for a heading drawn on physical page `page`.
    pub fn new(level: HeadingLevel, title: impl Into<String>, page: usize) -> Self {
        Self {
            level,
            title: title.into(),
            page,
        }
    }

    /// Level of the recorded heading.
    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    /// Display title as drawn in the body.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Physical page the heading is drawn on.
    pub fn page(&self) -> usize {
        self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_heading_prefixes_label() {
        let block = Block::numbered_heading(HeadingLevel::Chapter, "3.", "Project Structure");
        let heading = block.as_heading().expect("heading block");
        assert_eq!(heading.display_title(), "3.  Project Structure");
    }

    #[test]
    fn empty_label_is_ignored() {
        let heading = Heading::new(HeadingLevel::Section, "Overview").with_label(Some(String::new()));
        assert_eq!(heading.display_title(), "Overview");
    }

    #[test]
    fn code_block_trims_and_splits() {
        let code = CodeBlock::from_text("\n  lib/\n    main.rs\n");
        assert_eq!(code.lines(), ["lib/", "    main.rs"]);
    }

    #[test]
    fn heading_depth_round_trips() {
        for level in [
            HeadingLevel::Chapter,
            HeadingLevel::Section,
            HeadingLevel::Subsection,
        ] {
            assert_eq!(HeadingLevel::from_depth(level.depth()), Some(level));
        }
        assert_eq!(HeadingLevel::from_depth(4), None);
    }
}

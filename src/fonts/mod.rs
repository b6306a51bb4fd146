//! Font selection and text measurement for the pdf_flow crate.
//!
//! Documents use the PDF standard-14 fonts, so nothing has to be bundled or loaded from disk.
//! Widths come from the Adobe AFM tables for the printable ASCII range; other Latin-1
//! characters fall back to an average advance.

pub mod encoding;

/// Millimetres per PostScript point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// The faces available to the layout engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
    /// Helvetica-Oblique.
    Italic,
    /// Courier.
    Mono,
}

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Regular,
        FontFace::Bold,
        FontFace::Italic,
        FontFace::Mono,
    ];

    /// PostScript name of the standard font backing this face.
    pub fn postscript_name(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Italic => "Helvetica-Oblique",
            FontFace::Mono => "Courier",
        }
    }
}

/// A face at a given size in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    pub face: FontFace,
    pub size: f64,
}

impl Font {
    /// Creates a font of `face` at `size` points.
    pub const fn new(face: FontFace, size: f64) -> Self {
        Self { face, size }
    }

    /// Helvetica at `size` points.
    pub const fn regular(size: f64) -> Self {
        Self::new(FontFace::Regular, size)
    }

    /// Helvetica Bold at `size` points.
    pub const fn bold(size: f64) -> Self {
        Self::new(FontFace::Bold, size)
    }

    /// Helvetica Oblique at `size` points.
    pub const fn italic(size: f64) -> Self {
        Self::new(FontFace::Italic, size)
    }

    /// Courier at `size` points.
    pub const fn mono(size: f64) -> Self {
        Self::new(FontFace::Mono, size)
    }

    /// Font size converted to millimetres.
    pub fn size_mm(&self) -> f64 {
        self.size * MM_PER_PT
    }
}

/// Measures rendered text width.
///
/// The layout engine never talks to a font backend directly; it is handed an implementation of
/// this trait so that wrapping and table sizing can be exercised with synthetic metrics.
pub trait TextMeasure {
    /// Width of `text` set in `font`, in millimetres.
    fn text_width(&self, text: &str, font: Font) -> f64;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn text_width(&self, text: &str, font: Font) -> f64 {
        (**self).text_width(text, font)
    }
}

/// AFM-based metrics for the standard Helvetica and Courier faces.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinMetrics;

impl BuiltinMetrics {
    /// Creates the builtin metrics table.
    pub fn new() -> Self {
        Self
    }

    /// Advance of a single character in 1/1000 em.
    fn advance(face: FontFace, ch: char) -> u16 {
        let table = match face {
            FontFace::Mono => return COURIER_ADVANCE,
            FontFace::Regular | FontFace::Italic => &HELVETICA_WIDTHS,
            FontFace::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        let code = ch as u32;
        if (32..=126).contains(&code) {
            table[(code - 32) as usize]
        } else {
            HELVETICA_AVERAGE
        }
    }
}

impl TextMeasure for BuiltinMetrics {
    fn text_width(&self, text: &str, font: Font) -> f64 {
        let units: u32 = text
            .chars()
            .map(|ch| u32::from(Self::advance(font.face, ch)))
            .sum();
        f64::from(units) / 1000.0 * font.size_mm()
    }
}

const COURIER_ADVANCE: u16 = 600;
const HELVETICA_AVERAGE: u16 = 556;

// Index = code point - 32, covering 0x20 (space) through 0x7E (~).
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

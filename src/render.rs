//! `printpdf` backend turning laid-out pages into PDF bytes.
//!
//! The layout measures from the top-left corner; PDF user space starts bottom-left, so every
//! vertical coordinate is flipped against the page height here and nowhere else.

use std::io::{BufWriter, Cursor};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};

use crate::config::PageGeometry;
use crate::draw::{DrawOp, Page, Rect};
use crate::error::RenderError;
use crate::fonts::{FontFace, MM_PER_PT};
use crate::model::Rgb;

const LAYER_NAME: &str = "Content";

struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    mono: IndirectFontRef,
}

impl FontSet {
    fn install(document: &PdfDocumentReference) -> Result<Self, RenderError> {
        let add = |font: BuiltinFont| {
            document
                .add_builtin_font(font)
                .map_err(RenderError::backend)
        };
        Ok(Self {
            regular: add(BuiltinFont::Helvetica)?,
            bold: add(BuiltinFont::HelveticaBold)?,
            italic: add(BuiltinFont::HelveticaOblique)?,
            mono: add(BuiltinFont::Courier)?,
        })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Italic => &self.italic,
            FontFace::Mono => &self.mono,
        }
    }
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        f64::from(color.r) / 255.0,
        f64::from(color.g) / 255.0,
        f64::from(color.b) / 255.0,
        None,
    ))
}

struct PageCanvas<'a> {
    layer: PdfLayerReference,
    height: f64,
    fonts: &'a FontSet,
}

impl PageCanvas<'_> {
    fn point(&self, x: f64, y: f64) -> Point {
        Point::new(Mm(x), Mm(self.height - y))
    }

    fn outline(&self, points: &[(f64, f64)], closed: bool, fill: bool) -> Line {
        Line {
            points: points
                .iter()
                .map(|&(x, y)| (self.point(x, y), false))
                .collect(),
            is_closed: closed,
            has_fill: fill,
            has_stroke: !fill,
            is_clipping_path: false,
        }
    }

    fn rect(&self, rect: &Rect, fill: bool) -> Line {
        let corners = [
            (rect.x, rect.y),
            (rect.x + rect.width, rect.y),
            (rect.x + rect.width, rect.bottom()),
            (rect.x, rect.bottom()),
        ];
        self.outline(&corners, true, fill)
    }

    fn draw(&self, op: &DrawOp) {
        match op {
            DrawOp::Text {
                x,
                baseline,
                text,
                font,
                color,
            } => {
                self.layer.set_fill_color(pdf_color(*color));
                self.layer.use_text(
                    text.clone(),
                    font.size,
                    Mm(*x),
                    Mm(self.height - baseline),
                    self.fonts.get(font.face),
                );
            }
            DrawOp::FillRect { rect, color } => {
                self.layer.set_fill_color(pdf_color(*color));
                self.layer.add_shape(self.rect(rect, true));
            }
            DrawOp::StrokeRect { rect, color, width } => {
                self.layer.set_outline_color(pdf_color(*color));
                self.layer.set_outline_thickness(width / MM_PER_PT);
                self.layer.add_shape(self.rect(rect, false));
            }
            DrawOp::Line {
                from,
                to,
                color,
                width,
            } => {
                self.layer.set_outline_color(pdf_color(*color));
                self.layer.set_outline_thickness(width / MM_PER_PT);
                self.layer.add_shape(self.outline(&[*from, *to], false, false));
            }
        }
    }
}

/// Serializes `pages` into a PDF document titled `title`.
///
/// Pages are emitted in slice order; callers pass them sorted by page number.
pub fn render_pdf(
    title: &str,
    geometry: &PageGeometry,
    pages: &[Page],
) -> Result<Vec<u8>, RenderError> {
    let width = Mm(geometry.width);
    let height = Mm(geometry.height);
    let (document, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
    let fonts = FontSet::install(&document)?;

    let mut layers = Vec::with_capacity(pages.len().max(1));
    layers.push(document.get_page(first_page).get_layer(first_layer));
    for _ in 1..pages.len() {
        let (page, layer) = document.add_page(width, height, LAYER_NAME);
        layers.push(document.get_page(page).get_layer(layer));
    }

    for (page, layer) in pages.iter().zip(layers) {
        let canvas = PageCanvas {
            layer,
            height: geometry.height,
            fonts: &fonts,
        };
        for op in page.ops() {
            canvas.draw(op);
        }
    }

    let mut writer = BufWriter::new(Cursor::new(Vec::new()));
    document.save(&mut writer).map_err(RenderError::backend)?;
    let cursor = writer
        .into_inner()
        .map_err(|err| RenderError::backend(err.error()))?;
    Ok(cursor.into_inner())
}

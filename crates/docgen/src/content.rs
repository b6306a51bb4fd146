//! The project documentation rendered by `docgen`.

use pdf_flow::model::{palette, Block, Cover, HeadingLevel, NoteBox, Table};
use pdf_flow::DocumentBuilder;

use HeadingLevel::{Chapter, Section, Subsection};

const TITLE: &str = "pdf_flow - Project Documentation";

pub fn project_documentation() -> DocumentBuilder {
    DocumentBuilder::new(TITLE)
        .with_cover(cover())
        .add_blocks(overview())
        .add_blocks(architecture())
        .add_blocks(pagination())
        .add_blocks(tables())
        .add_blocks(contents())
        .add_blocks(errors())
        .add_blocks(operations())
}

fn cover() -> Cover {
    Cover::new("pdf_flow")
        .with_subtitle("Flow Layout Engine for PDF Documents".to_string())
        .with_tagline("Headings, paragraphs, tables and a table of contents on A4 pages".to_string())
        .with_info("Version", env!("CARGO_PKG_VERSION"))
        .with_info("Backend", "printpdf with builtin Type 1 fonts")
        .with_info("Page size", "A4 portrait, 210 x 297 mm")
        .with_info("Outline", "lopdf, nested by heading level")
        .with_caption("PROJECT DOCUMENTATION".to_string())
}

fn overview() -> Vec<Block> {
    vec![
        Block::numbered_heading(Chapter, "1.", "Overview"),
        Block::paragraph(
            "pdf_flow lays out an ordered list of content blocks onto fixed-size pages. Blocks \
             are placed top to bottom; whenever the next block would cross the bottom margin, the \
             engine starts a new page and continues there. Headings are recorded as they land so \
             that the table of contents can list the page each one actually appears on.",
        ),
        Block::heading(Section, "What a document is made of"),
        Block::bullet("Headings at three levels: chapters, sections and subsections."),
        Block::bullet("Paragraphs, optionally bold, wrapped greedily at word boundaries."),
        Block::bullet("Bullet items with nesting:"),
        Block::nested_bullet("nested items indent by 6 mm per level,", 1),
        Block::nested_bullet("and wrap inside their own column.", 1),
        Block::bullet("Monospace code blocks that are never wrapped."),
        Block::bullet("Tables whose row height follows the tallest wrapped cell."),
        Block::bullet("Colored note boxes and key/value lines."),
        Block::heading(Section, "Feature matrix"),
        Block::table(
            Table::new(["Feature", "Where", "Notes"])
                .with_row(["Greedy wrapping", "wrap", "Measure function is injected"])
                .with_row(["Pagination", "layout::cursor", "One check before each block or row"])
                .with_row(["Table rows", "layout::table", "Alternating background bands"])
                .with_row(["Contents", "layout::toc", "Rendered after the body is known"])
                .with_row(["Header/footer", "decorate", "Skipped on the cover page"])
                .with_row(["Bookmarks", "bookmarks", "Optional, behind a cargo feature"])
                .with_column_widths(Some(vec![50.0, 45.0, 95.0])),
        ),
        Block::Note(
            NoteBox::new(
                "Every page except the cover carries the running header and a centered page \
                 number. Page numbers skip the cover, so the first contents page is page 1.",
            )
            .with_color(palette::ACCENT),
        ),
    ]
}

fn architecture() -> Vec<Block> {
    vec![
        Block::numbered_heading(Chapter, "2.", "Architecture"),
        Block::paragraph(
            "The crate is split into a pure layout core and a thin rendering backend. Layout \
             produces pages of positioned draw operations and never touches PDF objects, which \
             keeps pagination testable with any text measure.",
        ),
        Block::heading(Section, "Modules"),
        Block::key_value("model", "Blocks, headings, tables, cover and contents entries."),
        Block::key_value("config", "Page geometry, line heights and contents settings."),
        Block::key_value("fonts", "Builtin font metrics and Latin-1 text substitution."),
        Block::key_value("wrap", "Greedy word wrapping against a width callback."),
        Block::key_value("layout", "Cursor, pagination, tables, contents and cover."),
        Block::key_value("decorate", "Running header and footer applied after layout."),
        Block::key_value("render", "Serialization of draw operations through printpdf."),
        Block::key_value("builder", "Orchestrates the passes and writes the file."),
        Block::heading(Section, "Build passes"),
        Block::heading(Subsection, "Measuring the contents"),
        Block::paragraph(
            "The number of contents pages depends only on how many headings will be listed, \
             which is known from the block list before anything is placed. The builder renders \
             placeholder entries on a scratch page to find that count and reserves the pages.",
        ),
        Block::heading(Subsection, "Laying out the body"),
        Block::paragraph(
            "The body starts on the first page after the reserved contents pages. Chapters \
             always begin a fresh page; sections and subsections ask for enough room to keep \
             the heading together with the start of the following text.",
        ),
        Block::heading(Subsection, "Rendering the contents"),
        Block::paragraph(
            "Once the body is finished, the recorded entries are drawn onto the reserved pages \
             and the pages are sorted into physical order before decoration.",
        ),
        Block::code(
            r#"
let document = DocumentBuilder::new("Handbook")
    .with_cover(Cover::new("Handbook"))
    .add_block(Block::numbered_heading(HeadingLevel::Chapter, "1.", "Intro"))
    .add_block(Block::paragraph("Hello, pages."));
document.save("docs/handbook.pdf")?;
"#,
        ),
    ]
}

fn pagination() -> Vec<Block> {
    vec![
        Block::numbered_heading(Chapter, "3.", "Pagination"),
        Block::paragraph(
            "Before drawing anything with a known minimum height, the engine asks whether that \
             height still fits above the bottom margin. If not, it starts a new page and moves \
             the cursor just below the header band.",
        ),
        Block::heading(Section, "Guarantees"),
        Block::bullet("The cursor never ends a block below the bottom margin unless the block \
                       is taller than a whole page."),
        Block::bullet("Page numbers only grow while blocks are appended."),
        Block::bullet("A heading's page is resolved before it is recorded."),
        Block::heading(Section, "Oversized blocks"),
        Block::paragraph(
            "A block taller than an empty page cannot be placed without overflowing. By default \
             the engine logs a warning and lets it run past the margin; with strict block \
             height enabled the build fails instead.",
        ),
        Block::Note(
            NoteBox::new("Code lines are clipped visually, not wrapped: keep them short.")
                .with_color(palette::RED),
        ),
    ]
}

fn tables() -> Vec<Block> {
    let mut table = Table::new(["Setting", "Default", "Effect"]);
    let settings = [
        ("body_line_height", "5.5 mm", "Line pitch of paragraphs and bullets"),
        ("table_line_height", "5.0 mm", "Line pitch inside table body cells"),
        ("table_header_line_height", "7.0 mm", "Line pitch of the header row"),
        ("code_line_height", "4.5 mm", "Line pitch of code blocks"),
        ("note_line_height", "5.0 mm", "Line pitch of note boxes"),
        ("strict_block_height", "false", "Fail instead of overflowing"),
        ("repeat_table_header", "false", "Redraw the header after a page break"),
    ];
    for (name, default, effect) in settings {
        table = table.with_row([name, default, effect]);
    }

    vec![
        Block::numbered_heading(Chapter, "4.", "Tables"),
        Block::paragraph(
            "Column widths come from the table or are split evenly across the usable width. \
             Each cell is wrapped to its column; the row is as tall as its tallest cell, and \
             the whole row moves to the next page if it does not fit.",
        ),
        Block::heading(Section, "Layout settings"),
        Block::table(table.with_column_widths(Some(vec![55.0, 25.0, 110.0]))),
        Block::bold_paragraph("Rows are never split across pages."),
    ]
}

fn contents() -> Vec<Block> {
    vec![
        Block::numbered_heading(Chapter, "5.", "Table of Contents"),
        Block::paragraph(
            "The contents list chapters and sections by default. Titles are cut to 85 \
             characters and clipped so they never run into the right-aligned page number.",
        ),
        Block::heading(Section, "Placement"),
        Block::key_value("AfterCover", "Contents pages follow the cover; the body starts after them."),
        Block::key_value("End", "Contents pages are appended after the last body page."),
    ]
}

fn errors() -> Vec<Block> {
    vec![
        Block::numbered_heading(Chapter, "6.", "Errors"),
        Block::table(
            Table::new(["Error", "Raised when"])
                .with_row(["BlockTooLarge", "Strict mode and a block taller than a page"])
                .with_row(["Backend", "printpdf rejects a font or fails to serialize"])
                .with_row(["Io", "The output file cannot be written"])
                .with_row(["Bookmarks", "The outline cannot be added to the PDF"]),
        ),
        Block::paragraph(
            "Characters outside Latin-1 are replaced before measuring: typographic dashes and \
             quotes map to ASCII, anything else becomes a question mark and is logged.",
        ),
    ]
}

fn operations() -> Vec<Block> {
    vec![
        Block::numbered_heading(Chapter, "7.", "Operations"),
        Block::heading(Section, "Running docgen"),
        Block::code("cargo run -p docgen\nRUST_LOG=debug cargo run -p docgen -- --output out.pdf"),
        Block::paragraph(
            "The file is written to a temporary sibling and renamed into place, so an \
             interrupted run never leaves a truncated PDF behind.",
        ),
        Block::page_break(),
        Block::heading(Section, "Checklist"),
        Block::bullet("Exit status 0 means the PDF was written."),
        Block::bullet("Any failure prints the error and its causes, then exits with status 1."),
        Block::Note(
            NoteBox::new("Documentation generated by docgen.").with_color(palette::GREEN),
        ),
    ]
}

//! Property tests for word wrapping and pagination.

use pdf_flow::config::{LayoutConfig, PageGeometry};
use pdf_flow::fonts::{Font, TextMeasure};
use pdf_flow::layout::FlowLayout;
use pdf_flow::model::{Block, HeadingLevel};
use pdf_flow::wrap::wrap;
use proptest::prelude::*;

fn chars(text: &str) -> f64 {
    text.chars().count() as f64
}

struct PerChar;

impl TextMeasure for PerChar {
    fn text_width(&self, text: &str, _font: Font) -> f64 {
        chars(text)
    }
}

/// Space separated lowercase words.
fn sentence_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,12}", 1..40).prop_map(|words| words.join(" "))
}

fn block_strategy() -> impl Strategy<Value = Block> {
    prop_oneof![
        (1u8..=3, "[A-Z][a-z]{2,10}").prop_map(|(depth, title)| {
            let level = HeadingLevel::from_depth(depth).unwrap_or(HeadingLevel::Chapter);
            Block::heading(level, title)
        }),
        sentence_strategy().prop_map(Block::paragraph),
        sentence_strategy().prop_map(Block::bullet),
        sentence_strategy().prop_map(Block::note),
        prop::collection::vec("[a-z();]{1,30}", 1..12)
            .prop_map(|lines| Block::code(&lines.join("\n"))),
        Just(Block::page_break()),
        Just(Block::paragraph("")),
        (1usize..60).prop_map(|count| Block::paragraph("\n".repeat(count))),
        Just(Block::code("")),
    ]
}

proptest! {
    #[test]
    fn lines_fit_unless_they_hold_a_single_word(text in sentence_strategy(), width in 5.0f64..80.0) {
        for line in wrap(&text, width, chars) {
            prop_assert!(chars(&line) <= width || !line.contains(' '), "{line:?} wider than {width}");
        }
    }

    #[test]
    fn wrapping_keeps_every_word_in_order(text in sentence_strategy(), width in 5.0f64..80.0) {
        let lines = wrap(&text, width, chars);
        prop_assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrapping_a_wrapped_line_changes_nothing(text in sentence_strategy(), width in 5.0f64..80.0) {
        for line in wrap(&text, width, chars) {
            prop_assert_eq!(wrap(&line, width, chars), vec![line.clone()]);
        }
    }

    #[test]
    fn headings_are_recorded_in_page_order(blocks in prop::collection::vec(block_strategy(), 1..60)) {
        let geometry = PageGeometry::a4();
        let mut flow = FlowLayout::new(geometry, LayoutConfig::default(), PerChar);
        let mut last_page = 1;
        for block in &blocks {
            flow.emit(block).expect("lenient layout never fails");
            let cursor = flow.cursor();
            prop_assert!(cursor.page >= last_page);
            prop_assert!(cursor.y <= geometry.content_bottom());
            last_page = cursor.page;
        }

        let body = flow.finish();
        prop_assert!(body.toc.windows(2).all(|pair| pair[0].page() <= pair[1].page()));
        prop_assert_eq!(body.pages.len(), last_page);
    }
}

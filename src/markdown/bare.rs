// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! The plain-text reducer.
//!
//! This reducer strips all markup delimiters from a parsed tree, returning
//! only the visible text. Delimiters are never part of an element's text or
//! children, so reduction is a straight depth-first walk: leaves contribute
//! their text, containers contribute their children's.
//!
//! The result is primarily useful for plain-text search over article
//! content; see [`SearchCorpus`](crate::search::SearchCorpus).

use crate::markdown::element::Element;
use crate::markdown::parser;
use crate::markdown::{TextAppendable, Visitable, Visitor};
use log::trace;

/// Converts markup into its visible text.
///
/// `None` is passed through unchanged.
///
/// # Examples
///
/// ```
/// use mdtree::markdown::clear;
/// let text = clear(Some("this text is **really** _emphasized_"));
/// assert_eq!(text.as_deref(), Some("this text is really emphasized"));
/// assert_eq!(clear(None), None);
/// ```
pub fn clear(markup: Option<&str>) -> Option<String> {
    markup.map(|markup| reduce(&parser::parse(markup)))
}

/// Reduces already-parsed elements to their visible text.
pub fn reduce(elements: &[Element]) -> String {
    let mut visitor = PlainTextVisitor::new();
    elements.accept(&mut visitor);
    visitor.text()
}

#[derive(Debug)]
struct PlainTextVisitor {
    text: String,
}

impl PlainTextVisitor {
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }
}

impl Visitor for PlainTextVisitor {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn visit(&mut self, element: &Element) {
        match element {
            Element::Text(text) => self.push_text(text),
            Element::Rule { .. } => trace!("rule contributes no text"),
            Element::Link { text, .. } | Element::BlockCode { text, .. } => self.push_text(text),
            _ if element.elements().is_empty() => self.push_text(element.text()),
            _ => self.swallow(element),
        }
    }
}

impl TextAppendable for PlainTextVisitor {
    fn push_text(&mut self, text: &str) {
        trace!("appending text to {:?}: {text:?}", self.text);
        self.text += text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::test_utils::load_fixture;
    use crate::test_utils::do_logging;
    use crate::{clear_assert_eq, header_tests};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_passes_nothing_through() {
        assert_eq!(clear(None), None);
    }

    #[test]
    fn it_returns_nothing_for_empty_markup() {
        clear_assert_eq!("", "");
    }

    #[test]
    fn it_does_not_touch_normal_text() {
        let text = "Lorem ipsum dolor sit amet";
        clear_assert_eq!(text, text);
    }

    #[test]
    fn it_does_not_touch_text_that_is_already_clear() {
        let text = "Lorem ipsum dolor sit amet";
        let cleared = clear(Some(text)).unwrap();
        clear_assert_eq!(cleared, text);
    }

    #[test]
    fn it_removes_emphasis_asterisks() {
        let text = "this text is *emphasized*";
        let expected = "this text is emphasized";
        clear_assert_eq!(text, expected);
    }

    #[test]
    fn it_removes_emphasis_underscores() {
        let text = "this text is _emphasized_";
        let expected = "this text is emphasized";
        clear_assert_eq!(text, expected);
    }

    #[test]
    fn it_removes_emphasis_double_underscores() {
        let text = "this text is __really emphasized__";
        let expected = "this text is really emphasized";
        clear_assert_eq!(text, expected);
    }

    #[test]
    fn it_removes_emphasis_underscores_and_double_asterisks() {
        let text = "this text is **_really really emphasized_**";
        let expected = "this text is really really emphasized";
        clear_assert_eq!(text, expected);
    }

    #[test]
    fn it_removes_nested_emphasis_beginning_with_an_underscore() {
        let text = "this _text **is really emphasized** text_";
        let expected = "this text is really emphasized text";
        clear_assert_eq!(text, expected);
    }

    #[test]
    fn it_removes_nested_emphasis_beginning_with_double_asterisks() {
        let text = "this **text *is really emphasized* text**";
        let expected = "this text is really emphasized text";
        clear_assert_eq!(text, expected);
    }

    header_tests!("Some Text");

    #[test]
    fn it_removes_link_urls() {
        do_logging();
        let text = "[the docs](https://example.com/docs)";
        let expected = "the docs";
        clear_assert_eq!(text, expected);
    }

    #[test]
    fn it_keeps_emphasis_in_link_titles() {
        let text = "[_the docs_](https://example.com/docs)";
        let expected = "_the docs_";
        clear_assert_eq!(text, expected);
    }

    #[test]
    fn it_removes_inline_code_markers() {
        let text = "Here is a Rust struct: `struct SomeStruct;`";
        let expected = "Here is a Rust struct: struct SomeStruct;";
        clear_assert_eq!(text, expected);
    }

    #[test]
    fn it_removes_markers_around_strikethrough_text_with_double_tildes() {
        let text = "this text is ~~gone~~";
        let expected = "this text is gone";
        clear_assert_eq!(text, expected);
    }

    #[test]
    fn it_does_not_touch_single_tildes() {
        let text = "this text is ~here~";
        clear_assert_eq!(text, text);
    }

    #[test]
    fn it_removes_horizontal_rules() {
        let text = "---\n";
        clear_assert_eq!(text, "\n");
    }

    #[test]
    fn it_removes_unordered_list_markers() {
        let text = indoc! {"
            * one
            + two
            - three
        "};
        clear_assert_eq!(text, "one\ntwo\nthree\n");
    }

    #[test]
    fn it_removes_ordered_list_markers() {
        let text = "1. first\n2. second";
        clear_assert_eq!(text, "first\nsecond");
    }

    #[test]
    fn it_removes_quote_markers() {
        let text = "> quoted _text_";
        clear_assert_eq!(text, "quoted text");
    }

    #[test]
    fn it_removes_markup_nested_in_quoted_lists() {
        let text = "> - item **bold**";
        clear_assert_eq!(text, "item bold");
    }

    #[test]
    fn it_removes_fenced_code_block_markers() {
        let text = "```\nfn main() {}\n```";
        clear_assert_eq!(text, "fn main() {}\n");
    }

    #[test]
    fn it_keeps_markup_in_fenced_code_blocks() {
        let text = "```\n**a**\n_b_\n```";
        clear_assert_eq!(text, "**a**\n_b_\n");
    }

    #[test]
    fn it_reduces_parsed_elements() {
        let document = parser::parse("# Title\n*a* *b*");
        assert_eq!(reduce(&document), "Title\na b");
        assert_eq!(document.plain_text(), "Title\na b");
    }

    #[test]
    fn it_parses_an_article() {
        let (text, expected) = load_fixture("article");
        let actual = clear(Some(text.as_str())).unwrap();
        assert_eq!(
            actual.trim_end(),
            expected,
            "\nleft:\n{actual}\n\nright:\n{expected}"
        );
    }
}

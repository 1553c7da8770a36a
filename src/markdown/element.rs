// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! The parsed element tree.
//!
//! Every element borrows its text from the markup buffer it was parsed from;
//! nothing is copied. The buffer must therefore outlive the tree, which the
//! `'a` lifetime enforces.

use crate::markdown::bare;
use std::ops::{Deref, Range};
use std::slice::Iter;
use std::vec::IntoIter;

/// Where a line of a fenced code block sits within the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockCodeRole {
    /// The first line of a multi-line block.
    Start,

    /// Any line that is neither the first nor the last.
    Middle,

    /// The last line of a multi-line block.
    End,

    /// The only line of a block.
    Single,
}

/// A node in the parsed element tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element<'a> {
    /// Literal text between (or inside) other elements.
    Text(&'a str),

    /// A `* `, `+ ` or `- ` list item.
    UnorderedListItem {
        text: &'a str,
        elements: Vec<Element<'a>>,
    },

    /// A `#` header.
    Header {
        /// Number of leading `#` characters, 1 through 6.
        level: u8,
        text: &'a str,
        elements: Vec<Element<'a>>,
    },

    /// A `> ` quoted line.
    Quote {
        text: &'a str,
        elements: Vec<Element<'a>>,
    },

    /// `*italic*` or `_italic_` text.
    Italic {
        text: &'a str,
        elements: Vec<Element<'a>>,
    },

    /// `**bold**` or `__bold__` text.
    Bold {
        text: &'a str,
        elements: Vec<Element<'a>>,
    },

    /// `~~struck~~` text.
    Strike {
        text: &'a str,
        elements: Vec<Element<'a>>,
    },

    /// A horizontal rule.
    ///
    /// A rule keeps no visible text; `text` is the empty slice at the
    /// rule's position in the buffer.
    Rule { text: &'a str },

    /// `` `inline code` ``.
    InlineCode {
        text: &'a str,
        elements: Vec<Element<'a>>,
    },

    /// A `[title](url)` link. `text` is the title, which is never parsed
    /// for further markup.
    Link { url: &'a str, text: &'a str },

    /// A `12. ` numbered list item.
    OrderedListItem {
        /// The item's digits and trailing period, e.g. `"12."`.
        marker: &'a str,
        text: &'a str,
        elements: Vec<Element<'a>>,
    },

    /// One line of a fenced code block.
    BlockCode { role: BlockCodeRole, text: &'a str },
}

impl<'a> Element<'a> {
    /// The element's text with its own delimiters removed.
    pub fn text(&self) -> &'a str {
        match self {
            Element::Text(text)
            | Element::UnorderedListItem { text, .. }
            | Element::Header { text, .. }
            | Element::Quote { text, .. }
            | Element::Italic { text, .. }
            | Element::Bold { text, .. }
            | Element::Strike { text, .. }
            | Element::Rule { text }
            | Element::InlineCode { text, .. }
            | Element::Link { text, .. }
            | Element::OrderedListItem { text, .. }
            | Element::BlockCode { text, .. } => *text,
        }
    }

    /// Elements nested inside this one.
    pub fn elements(&self) -> &[Element<'a>] {
        match self {
            Element::UnorderedListItem { elements, .. }
            | Element::Header { elements, .. }
            | Element::Quote { elements, .. }
            | Element::Italic { elements, .. }
            | Element::Bold { elements, .. }
            | Element::Strike { elements, .. }
            | Element::InlineCode { elements, .. }
            | Element::OrderedListItem { elements, .. } => elements,
            Element::Text(_)
            | Element::Rule { .. }
            | Element::Link { .. }
            | Element::BlockCode { .. } => &[],
        }
    }

    /// True if the element kind can never have children.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Element::Text(_)
                | Element::Rule { .. }
                | Element::Link { .. }
                | Element::BlockCode { .. }
        )
    }

    /// The element's visible text, with all nested markup removed.
    pub fn plain_text(&self) -> String {
        bare::reduce(std::slice::from_ref(self))
    }
}

/// The result of parsing a markup buffer: the buffer itself and its
/// top-level elements, in order.
///
/// A `Document` dereferences to a slice of [`Element`]s, so it can be
/// iterated and indexed directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document<'a> {
    source: &'a str,
    elements: Vec<Element<'a>>,
}

impl<'a> Document<'a> {
    pub(crate) fn new(source: &'a str, elements: Vec<Element<'a>>) -> Self {
        Self { source, elements }
    }

    /// The markup the document was parsed from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Top-level elements.
    pub fn elements(&self) -> &[Element<'a>] {
        &self.elements
    }

    /// Consumes the document, returning its top-level elements.
    pub fn into_elements(self) -> Vec<Element<'a>> {
        self.elements
    }

    /// The byte range `element`'s text occupies in [`Document::source()`].
    ///
    /// Returns `None` if the element's text is not a slice of this
    /// document's source.
    pub fn span_of(&self, element: &Element<'a>) -> Option<Range<usize>> {
        span_in(self.source, element.text())
    }

    /// The document's visible text, with all markup removed.
    pub fn plain_text(&self) -> String {
        bare::reduce(&self.elements)
    }
}

impl<'a> Deref for Document<'a> {
    type Target = [Element<'a>];

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<'a> IntoIterator for Document<'a> {
    type Item = Element<'a>;
    type IntoIter = IntoIter<Element<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'d, 'a> IntoIterator for &'d Document<'a> {
    type Item = &'d Element<'a>;
    type IntoIter = Iter<'d, Element<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Locates `part` inside `source` by address.
///
/// Both are compared as memory ranges, so a slice with equal contents taken
/// from some other buffer is not found.
pub(crate) fn span_in(source: &str, part: &str) -> Option<Range<usize>> {
    let start = (part.as_ptr() as usize).checked_sub(source.as_ptr() as usize)?;
    let end = start.checked_add(part.len())?;
    (end <= source.len()).then_some(start..end)
}

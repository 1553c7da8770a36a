// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Builds element trees from markup.
//!
//! The builder walks the tokens reported by the [matcher](super::pattern),
//! turns the text between them into [`Element::Text`] nodes, strips each
//! token's delimiters, and parses what remains again to discover nested
//! markup (bold text inside a list item inside a quote, and so on).

use crate::conf::{DEFAULT_BACKTRACK_LIMIT, ParserOptions};
use crate::markdown::element::{BlockCodeRole, Document, Element};
use crate::markdown::pattern::{Matcher, Token, TokenClass};
use itertools::{Itertools, Position};
use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Separates lines inside fenced code blocks.
const LINE_SEPARATOR: &str = "\n";

/// Splits an already-matched link into its title and URL.
static LINK_PARTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[(.*)\]\((.*)\)").expect("link pattern is invalid"));

/// Extracts the digits and period from an already-matched ordered list item.
static ORDERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,2}\.").expect("ordered list marker pattern is invalid"));

/// Converts markup into an element tree using the default [`ParserOptions`].
///
/// Parsing never fails: markup that cannot be recognized is kept as text.
/// An empty string produces an empty document.
///
/// # Examples
///
/// ```
/// use mdtree::markdown::{Element, parse};
///
/// let document = parse("# Title");
/// assert_eq!(
///     document.elements(),
///     &[Element::Header {
///         level: 1,
///         text: "Title",
///         elements: vec![Element::Text("Title")],
///     }]
/// );
/// ```
pub fn parse(markup: &str) -> Document<'_> {
    MarkdownParser::default().parse(markup)
}

/// A reusable markup parser.
#[derive(Debug, Default)]
pub struct MarkdownParser {
    options: ParserOptions,
    matcher: Option<Matcher>,
}

impl MarkdownParser {
    /// Creates a new parser with the given options.
    pub fn new(options: ParserOptions) -> Self {
        let matcher = (options.backtrack_limit() != DEFAULT_BACKTRACK_LIMIT)
            .then(|| Matcher::new(options.backtrack_limit()));
        Self { options, matcher }
    }

    /// The parser's options.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn matcher(&self) -> &Matcher {
        self.matcher.as_ref().unwrap_or_else(|| Matcher::shared())
    }

    /// Converts markup into an element tree.
    ///
    /// Markup nested deeper than [`ParserOptions::max_depth()`] is kept as
    /// text rather than parsed. If the matcher runs out of
    /// [backtracking steps](ParserOptions::backtrack_limit()) in a span, the
    /// rest of that span is kept as text too.
    pub fn parse<'a>(&self, markup: &'a str) -> Document<'a> {
        match TreeBuilder::lenient(&self.options, self.matcher()).build(markup, 0) {
            Ok(elements) => Document::new(markup, elements),
            Err(err) => {
                warn!("keeping markup as plain text: {err}");
                let elements = if markup.is_empty() {
                    vec![]
                } else {
                    vec![Element::Text(markup)]
                };
                Document::new(markup, elements)
            }
        }
    }

    /// Converts markup into an element tree, failing instead of keeping
    /// unparsed markup as text.
    ///
    /// Returns [`Error::TooDeep`] if markup is nested deeper than
    /// [`ParserOptions::max_depth()`], or [`Error::Match`] if the matcher
    /// gives up on the input.
    pub fn try_parse<'a>(&self, markup: &'a str) -> Result<Document<'a>, Error> {
        let elements = TreeBuilder::strict(&self.options, self.matcher()).build(markup, 0)?;
        Ok(Document::new(markup, elements))
    }
}

/// A parser error.
#[derive(Debug, Error)]
pub enum Error {
    /// The matcher could not finish scanning the input.
    #[error("Match error: {0}")]
    Match(#[from] fancy_regex::Error),

    /// Markup was nested more deeply than the configured limit.
    #[error("markup is nested more than {0} levels deep")]
    TooDeep(usize),
}

#[derive(Debug)]
struct TreeBuilder<'m> {
    matcher: &'m Matcher,
    max_depth: usize,
    strict: bool,
}

impl<'m> TreeBuilder<'m> {
    fn lenient(options: &ParserOptions, matcher: &'m Matcher) -> Self {
        Self {
            matcher,
            max_depth: options.max_depth(),
            strict: false,
        }
    }

    fn strict(options: &ParserOptions, matcher: &'m Matcher) -> Self {
        Self {
            matcher,
            max_depth: options.max_depth(),
            strict: true,
        }
    }

    /// Parses `text`, which sits `depth` levels below the top of the tree.
    fn build<'a>(&self, text: &'a str, depth: usize) -> Result<Vec<Element<'a>>, Error> {
        let mut elements = vec![];
        let mut cursor = 0;

        while let Some(token) = self.next_token(text, cursor)? {
            let Token { class, start, end } = token;

            if cursor < start {
                elements.push(Element::Text(&text[cursor..start]));
                cursor = start;
            }

            let Some(class) = class else {
                warn!("could not classify markup at {start}..{end}: {:?}", &text[start..end]);
                break;
            };

            trace!("{class:?} at {start}..{end} (depth {depth})");

            match class {
                TokenClass::UnorderedListItem => {
                    let inner = &text[start + 2..end];
                    elements.push(Element::UnorderedListItem {
                        text: inner,
                        elements: self.children(inner, depth)?,
                    });
                }

                TokenClass::Header => {
                    let level = text[start..end]
                        .bytes()
                        .take_while(|&b| b == b'#')
                        .count()
                        .min(6);
                    let inner = &text[start + level + 1..end];
                    elements.push(Element::Header {
                        level: level as u8,
                        text: inner,
                        elements: self.children(inner, depth)?,
                    });
                }

                TokenClass::Quote => {
                    let inner = &text[start + 2..end];
                    elements.push(Element::Quote {
                        text: inner,
                        elements: self.children(inner, depth)?,
                    });
                }

                TokenClass::Italic => {
                    let inner = &text[start + 1..end - 1];
                    elements.push(Element::Italic {
                        text: inner,
                        elements: self.children(inner, depth)?,
                    });
                }

                TokenClass::Bold => {
                    let inner = &text[start + 2..end - 2];
                    elements.push(Element::Bold {
                        text: inner,
                        elements: self.children(inner, depth)?,
                    });
                }

                TokenClass::Strike => {
                    let inner = &text[start + 2..end - 2];
                    elements.push(Element::Strike {
                        text: inner,
                        elements: self.children(inner, depth)?,
                    });
                }

                TokenClass::Rule => {
                    elements.push(Element::Rule {
                        text: &text[start..start],
                    });
                }

                TokenClass::InlineCode => {
                    let inner = &text[start + 1..end - 1];
                    elements.push(Element::InlineCode {
                        text: inner,
                        elements: self.children(inner, depth)?,
                    });
                }

                TokenClass::Link => elements.push(link(&text[start..end])),

                TokenClass::OrderedListItem => {
                    let item = &text[start..end];
                    let marker = ORDERED_MARKER.find(item).map_or("", |m| m.as_str());
                    // Skip the whitespace character following the marker.
                    let gap = item[marker.len()..]
                        .chars()
                        .next()
                        .map_or(0, char::len_utf8);
                    let inner = &item[marker.len() + gap..];
                    elements.push(Element::OrderedListItem {
                        marker,
                        text: inner,
                        elements: self.children(inner, depth)?,
                    });
                }

                TokenClass::BlockCode => {
                    elements.extend(block_code(&text[start + 3..end - 3]));
                }
            }

            cursor = end;
        }

        if cursor < text.len() {
            elements.push(Element::Text(&text[cursor..]));
        }

        Ok(elements)
    }

    /// Parses the inner span of an element found at `depth`.
    fn children<'a>(&self, inner: &'a str, depth: usize) -> Result<Vec<Element<'a>>, Error> {
        let depth = depth + 1;
        if depth <= self.max_depth {
            return self.build(inner, depth);
        }

        if self.strict {
            return Err(Error::TooDeep(self.max_depth));
        }

        debug!("not parsing markup nested {depth} levels deep: {inner:?}");
        if inner.is_empty() {
            Ok(vec![])
        } else {
            Ok(vec![Element::Text(inner)])
        }
    }

    fn next_token(&self, text: &str, pos: usize) -> Result<Option<Token>, Error> {
        match self.matcher.find_token(text, pos) {
            Ok(token) => Ok(token),
            Err(err) if !self.strict => {
                warn!("giving up on markup after byte {pos}: {err}");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Splits a matched `[title](url)` link into its parts.
///
/// The title and URL are found by matching the link a second time. The
/// `](url)` form without an opening bracket has no title to extract and is
/// kept as text.
fn link(matched: &str) -> Element<'_> {
    let parts = LINK_PARTS
        .captures(matched)
        .and_then(|captures| Some((captures.get(1)?, captures.get(2)?)));

    match parts {
        Some((title, url)) => Element::Link {
            url: url.as_str(),
            text: title.as_str(),
        },
        None => {
            warn!("could not split link, keeping it as text: {matched:?}");
            Element::Text(matched)
        }
    }
}

/// Splits the contents of a fenced code block into one element per line.
///
/// The line break directly after the opening fence belongs to the fence.
/// Every line keeps its own trailing line break.
fn block_code(code: &str) -> Vec<Element<'_>> {
    let body = code.strip_prefix(LINE_SEPARATOR).unwrap_or(code);

    if body.is_empty() {
        return vec![Element::BlockCode {
            role: BlockCodeRole::Single,
            text: body,
        }];
    }

    body.split_inclusive(LINE_SEPARATOR)
        .with_position()
        .map(|(position, line)| {
            let role = match position {
                Position::First => BlockCodeRole::Start,
                Position::Middle => BlockCodeRole::Middle,
                Position::Last => BlockCodeRole::End,
                Position::Only => BlockCodeRole::Single,
            };
            Element::BlockCode { role, text: line }
        })
        .collect()
}

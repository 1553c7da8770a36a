// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! The markup token matcher.
//!
//! All markup is recognized by a single composite pattern of eleven
//! alternatives, one capture group per token class. Alternatives are tried in
//! declaration order, so when two classes could match at the same position
//! the one listed first wins; across positions, the leftmost match wins.
//!
//! Several alternatives need lookbehind and lookahead guards (e.g. a lone
//! `*` must not be preceded or followed by another `*`), which is why the
//! pattern is a [`fancy_regex::Regex`] rather than a [`regex::Regex`].

use crate::conf::DEFAULT_BACKTRACK_LIMIT;
use fancy_regex::{Regex, RegexBuilder};
use once_cell::sync::Lazy;
use std::ops::Range;

// Order matters: it is the tie-break priority between classes.
const UNORDERED_LIST_ITEM_GROUP: &str = r"(^[*+\-] .+)";
const HEADER_GROUP: &str = r"(^#{1,6} .+?$)";
const QUOTE_GROUP: &str = r"(^> .+?$)";
const ITALIC_GROUP: &str = r"((?<!\*)\*[^*].*?[^*]?\*(?!\*)|(?<!_)_[^_].*?[^_]?_(?!_))";
const BOLD_GROUP: &str =
    r"((?<!\*)\*{2}[^*].*?[^*]?\*{2}(?!\*)|(?<!_)_{2}[^_].*?[^_]?_{2}(?!_))";
const STRIKE_GROUP: &str = r"((?<!~)~{2}[^~].*?~{2}(?!~))";
const RULE_GROUP: &str = r"(^(?:-{3}|_{3}|\*{3})$)";
// The closing delimiter may be preceded by one more backtick or whitespace
// character, which then ends up inside the span.
const INLINE_CODE_GROUP: &str = r"((?<!`)`[^`\s].*?[`\s]?`(?!`))";
const LINK_GROUP: &str = r"(\[[^\[\]]*?\]\(.+?\)|^\[*?\]\(.*?\))";
const ORDERED_LIST_ITEM_GROUP: &str = r"(^[0-9]{1,2}\.\s.+?$)";
const BLOCK_CODE_GROUP: &str = r"(^```[\s\S]+?```$)";

const TOKEN_GROUPS: [&str; 11] = [
    UNORDERED_LIST_ITEM_GROUP,
    HEADER_GROUP,
    QUOTE_GROUP,
    ITALIC_GROUP,
    BOLD_GROUP,
    STRIKE_GROUP,
    RULE_GROUP,
    INLINE_CODE_GROUP,
    LINK_GROUP,
    ORDERED_LIST_ITEM_GROUP,
    BLOCK_CODE_GROUP,
];

/// The matcher used with default options, compiled on first use and
/// shared thereafter.
static SHARED_MATCHER: Lazy<Matcher> = Lazy::new(|| Matcher::new(DEFAULT_BACKTRACK_LIMIT));

/// The kinds of markup the matcher recognizes, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenClass {
    UnorderedListItem,
    Header,
    Quote,
    Italic,
    Bold,
    Strike,
    Rule,
    InlineCode,
    Link,
    OrderedListItem,
    BlockCode,
}

impl TokenClass {
    /// Every token class, in priority order.
    pub const ALL: [TokenClass; 11] = [
        TokenClass::UnorderedListItem,
        TokenClass::Header,
        TokenClass::Quote,
        TokenClass::Italic,
        TokenClass::Bold,
        TokenClass::Strike,
        TokenClass::Rule,
        TokenClass::InlineCode,
        TokenClass::Link,
        TokenClass::OrderedListItem,
        TokenClass::BlockCode,
    ];

    /// The capture group of the composite pattern that matches this class.
    pub fn group(self) -> usize {
        self as usize + 1
    }
}

/// A single match of the composite pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// Which class matched, or `None` if the match could not be attributed
    /// to any class.
    pub class: Option<TokenClass>,

    /// Byte offset of the first matched character.
    pub start: usize,

    /// Byte offset just past the last matched character.
    pub end: usize,
}

impl Token {
    /// The matched byte range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// The composite pattern, compiled with a backtracking budget.
///
/// The budget applies to each scan for a token, which covers every position
/// from the scan's start up to the match. A long run of plain text before the
/// next token costs a few dozen steps per byte.
#[derive(Debug)]
pub struct Matcher {
    pattern: Regex,
}

impl Matcher {
    /// Compiles the composite pattern, allowing at most `backtrack_limit`
    /// backtracking steps per scan.
    pub fn new(backtrack_limit: usize) -> Self {
        let pattern = format!("(?m){}", TOKEN_GROUPS.join("|"));
        let pattern = RegexBuilder::new(&pattern)
            .backtrack_limit(backtrack_limit)
            .build()
            .expect("markup token pattern is invalid");
        Self { pattern }
    }

    /// The matcher compiled with [`DEFAULT_BACKTRACK_LIMIT`].
    pub fn shared() -> &'static Matcher {
        &SHARED_MATCHER
    }

    /// Finds the leftmost token in `text` starting at or after byte offset
    /// `pos`.
    ///
    /// Characters before `pos` are still visible to line anchors and
    /// lookbehind guards.
    ///
    /// Returns an error only if the backtracking engine gives up on the
    /// input.
    pub fn find_token(
        &self,
        text: &str,
        pos: usize,
    ) -> Result<Option<Token>, fancy_regex::Error> {
        let Some(captures) = self.pattern.captures_from_pos(text, pos)? else {
            return Ok(None);
        };

        let Some(whole) = captures.get(0) else {
            return Ok(None);
        };

        let class = TokenClass::ALL
            .into_iter()
            .find(|class| captures.get(class.group()).is_some());

        Ok(Some(Token {
            class,
            start: whole.start(),
            end: whole.end(),
        }))
    }
}

/// Finds the leftmost token in `text` starting at or after byte offset `pos`,
/// using the [shared matcher](Matcher::shared).
pub fn find_token(text: &str, pos: usize) -> Result<Option<Token>, fancy_regex::Error> {
    Matcher::shared().find_token(text, pos)
}

/// Number of capture groups in the composite pattern, not counting the
/// implicit whole-match group.
#[cfg(test)]
fn group_count() -> usize {
    Matcher::shared().pattern.captures_len() - 1
}

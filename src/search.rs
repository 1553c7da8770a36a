//! Searching the visible text of articles.
//!
//! Articles are searched after their markup has been [cleared], so a query
//! for `bold claims` finds `**bold** claims`.
//!
//! [cleared]: crate::markdown::clear

use crate::markdown::{self, Document};
use log::warn;
use regex::RegexBuilder;
use std::ops::Range;

/// Text a reader can search.
pub trait Searchable {
    /// The text queries run against, free of markup delimiters.
    fn search_text(&self) -> &str;

    /// True if `query` occurs anywhere in the [`Searchable::search_text()`],
    /// ignoring case.
    ///
    /// `query` is taken literally, not as a pattern.
    fn matches(&self, query: &str) -> bool {
        self.search_text()
            .to_lowercase()
            .contains(&query.to_lowercase())
    }

    /// Byte ranges of every occurrence of `needle` in the
    /// [`Searchable::search_text()`], in order.
    ///
    /// The search is case-insensitive and occurrences do not overlap. An
    /// empty needle occurs nowhere.
    fn indexes_of(&self, needle: &str) -> Vec<Range<usize>> {
        if needle.is_empty() {
            return vec![];
        }

        let re = RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build();

        match re {
            Ok(re) => re
                .find_iter(self.search_text())
                .map(|m| m.range())
                .collect(),
            Err(err) => {
                warn!("cannot search for {needle:?}: {err}");
                vec![]
            }
        }
    }
}

/// The visible text of an article, ready to be searched.
///
/// Ranges returned by [`Searchable::indexes_of()`] refer to the cleared
/// text, not the original markup.
///
/// # Examples
///
/// ```
/// use mdtree::search::{SearchCorpus, Searchable};
/// let corpus = SearchCorpus::new("**Hello** world, _hello_ again");
/// assert_eq!(corpus.search_text(), "Hello world, hello again");
/// assert_eq!(corpus.indexes_of("hello"), vec![0..5, 13..18]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchCorpus {
    text: String,
}

impl SearchCorpus {
    /// Builds a corpus from raw markup.
    pub fn new(markup: &str) -> Self {
        Self {
            text: markdown::clear(Some(markup)).unwrap_or_default(),
        }
    }

    /// Consumes the corpus, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl From<&Document<'_>> for SearchCorpus {
    fn from(document: &Document<'_>) -> Self {
        Self {
            text: document.plain_text(),
        }
    }
}

impl Searchable for SearchCorpus {
    fn search_text(&self) -> &str {
        &self.text
    }
}

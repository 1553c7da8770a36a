// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! mdtree parses the lightweight markup used in articles into a tree of
//! elements, and reduces markup to its visible text for searching.
//!
//! It understands exactly eleven kinds of markup: unordered and ordered
//! list items, headers, quotes, italic, bold and struck text, horizontal
//! rules, inline code, links, and fenced code blocks. Anything else is kept
//! as literal text. Parsing never fails.
//!
//! # Examples
//!
//! Parse markup into a tree, then walk it:
//!
//! ```
//! use mdtree::parse;
//! use mdtree::markdown::Element;
//!
//! let document = parse("> **bold** quote");
//! let Element::Quote { elements, .. } = &document[0] else {
//!     panic!("expected a quote");
//! };
//! assert_eq!(elements[0].text(), "bold");
//! ```
//!
//! Every element borrows its text from the markup, so its position in the
//! markup can always be recovered:
//!
//! ```
//! use mdtree::parse;
//!
//! let document = parse("see *this*");
//! assert_eq!(document.span_of(&document[1]), Some(5..9));
//! ```
//!
//! Strip markup to search an article:
//!
//! ```
//! use mdtree::clear;
//! use mdtree::search::{SearchCorpus, Searchable};
//!
//! assert_eq!(clear(Some("# Title")).as_deref(), Some("Title"));
//!
//! let corpus = SearchCorpus::new("- a ~~struck~~ item");
//! assert_eq!(corpus.indexes_of("struck"), vec![2..8]);
//! ```
//!
//! # Logging
//!
//! mdtree logs through the [`log`] facade. Fail-open recoveries (input the
//! matcher gave up on, unsplittable links) are logged at `warn`; individual
//! tokens at `trace`.
//!
//! # License
//!
//! mdtree is licensed under the terms of the [Apache License 2.0]. Please
//! see the LICENSE file accompanying this source code or visit the previous
//! link for more information on licensing.
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0

pub mod conf;
pub mod markdown;
pub mod search;

pub use markdown::{clear, parse};

#[cfg(test)]
mod test_utils;

// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Environment and configuration utilities.

use log::warn;
use std::env;
use std::ffi::OsString;

/// How many levels of nested markup are parsed by default.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How many backtracking steps the token matcher may take in a single scan
/// by default. The default is unbounded.
pub const DEFAULT_BACKTRACK_LIMIT: usize = usize::MAX;

/// Environment variable that overrides [`DEFAULT_MAX_DEPTH`].
pub const MAX_DEPTH_VAR: &str = "MDTREE_MAX_DEPTH";

/// Parser options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    max_depth: usize,
    backtrack_limit: usize,
}

impl ParserOptions {
    /// Incrementally builds a new set of parser options.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdtree::conf::ParserOptions;
    /// let opts = ParserOptions::build().max_depth(8).build();
    /// assert_eq!(opts.max_depth(), 8);
    /// assert_eq!(opts.backtrack_limit(), usize::MAX);
    /// ```
    pub fn build() -> ParserOptionsBuilder {
        ParserOptionsBuilder::default()
    }

    /// Default options, with the maximum depth taken from
    /// `$MDTREE_MAX_DEPTH` if it is set.
    ///
    /// An unparsable value is logged and ignored.
    ///
    /// ```
    /// use mdtree::conf::ParserOptions;
    /// # use temp_env::with_var;
    /// # with_var("MDTREE_MAX_DEPTH", Some("4"), || {
    /// assert_eq!(ParserOptions::from_env().max_depth(), 4);
    /// # });
    /// ```
    pub fn from_env() -> Self {
        Self::build()
            .max_depth(max_depth_from(env::var_os(MAX_DEPTH_VAR)))
            .build()
    }

    /// How many levels of nested markup are parsed.
    ///
    /// Top-level elements are at depth 0, so a limit of 0 parses top-level
    /// elements but keeps everything inside them as text.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// How many backtracking steps the token matcher may take while
    /// scanning for a single token.
    ///
    /// When the limit is hit, [`MarkdownParser::parse()`] keeps the rest of
    /// the span as text and [`MarkdownParser::try_parse()`] fails.
    ///
    /// [`MarkdownParser::parse()`]: crate::markdown::MarkdownParser::parse
    /// [`MarkdownParser::try_parse()`]: crate::markdown::MarkdownParser::try_parse
    pub fn backtrack_limit(&self) -> usize {
        self.backtrack_limit
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::build().build()
    }
}

/// A builder for parser options.
///
/// You probably don't want to use this directly; call
/// [`ParserOptions::build()`] and construct it incrementally instead.
#[derive(Debug)]
#[must_use]
pub struct ParserOptionsBuilder {
    max_depth: usize,
    backtrack_limit: usize,
}

impl Default for ParserOptionsBuilder {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
        }
    }
}

impl ParserOptionsBuilder {
    /// Sets how many levels of nested markup are parsed.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Caps the backtracking steps of a single token scan.
    pub fn backtrack_limit(mut self, backtrack_limit: usize) -> Self {
        self.backtrack_limit = backtrack_limit;
        self
    }

    /// Finalizes the [`ParserOptions`].
    pub fn build(self) -> ParserOptions {
        ParserOptions {
            max_depth: self.max_depth,
            backtrack_limit: self.backtrack_limit,
        }
    }
}

fn max_depth_from(value: Option<OsString>) -> usize {
    let Some(value) = value else {
        return DEFAULT_MAX_DEPTH;
    };

    let value = value.to_string_lossy();
    match value.trim().parse() {
        Ok(depth) => depth,
        Err(err) => {
            warn!("ignoring ${MAX_DEPTH_VAR}={value:?}: {err}");
            DEFAULT_MAX_DEPTH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::do_logging;
    use pretty_assertions::assert_eq;
    use temp_env::{with_var, with_var_unset};

    #[test]
    fn it_defaults_to_the_default_max_depth() {
        assert_eq!(ParserOptions::default().max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn it_does_not_limit_backtracking_by_default() {
        assert_eq!(ParserOptions::default().backtrack_limit(), usize::MAX);
    }

    #[test]
    fn it_builds_options_incrementally() {
        let opts = ParserOptions::build()
            .max_depth(3)
            .backtrack_limit(1000)
            .build();
        assert_eq!(opts.max_depth(), 3);
        assert_eq!(opts.backtrack_limit(), 1000);
    }

    #[test]
    fn it_loads_options_from_the_environment() {
        with_var(MAX_DEPTH_VAR, Some("9"), || {
            let opts = ParserOptions::from_env();
            assert_eq!(opts.max_depth(), 9);
            assert_eq!(opts.backtrack_limit(), DEFAULT_BACKTRACK_LIMIT);
        });
    }

    #[test]
    fn it_loads_default_options_when_the_environment_is_empty() {
        with_var_unset(MAX_DEPTH_VAR, || {
            assert_eq!(ParserOptions::from_env(), ParserOptions::default());
        });
    }

    #[test]
    fn it_loads_default_options_when_the_environment_is_invalid() {
        do_logging();
        with_var(MAX_DEPTH_VAR, Some("very"), || {
            assert_eq!(ParserOptions::from_env(), ParserOptions::default());
        });
    }

    #[test]
    fn it_uses_the_default_when_the_variable_is_unset() {
        assert_eq!(max_depth_from(None), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn it_reads_the_max_depth_from_the_variable() {
        assert_eq!(max_depth_from(Some(OsString::from("12"))), 12);
    }

    #[test]
    fn it_ignores_surrounding_whitespace() {
        assert_eq!(max_depth_from(Some(OsString::from(" 5\n"))), 5);
    }

    #[test]
    fn it_ignores_invalid_values() {
        do_logging();
        assert_eq!(max_depth_from(Some(OsString::from("deep"))), DEFAULT_MAX_DEPTH);
        assert_eq!(max_depth_from(Some(OsString::from("-1"))), DEFAULT_MAX_DEPTH);
    }
}

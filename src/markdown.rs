// mdtree
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Markup parsing and reduction.
//!
//! [`parse()`] turns markup into a [`Document`], an ordered sequence of
//! [`Element`] trees borrowing their text from the markup. [`clear()`]
//! reduces markup to its visible text.
//!
//! Trees are walked with a [`Visitor`]; the plain-text reducer in [`bare`]
//! is one, and renderers can implement their own.

pub mod bare;
pub mod element;
pub mod parser;
pub mod pattern;

pub use bare::{clear, reduce};
pub use element::{BlockCodeRole, Document, Element};
pub use parser::{Error, MarkdownParser, parse};

use log::trace;

/// "Visit" an element and emit text.
///
/// For example, a `Visitor` can embody an algorithm used to visit each
/// element in a tree and emit styled or plain text for it.
pub trait Visitor {
    /// The generated text.
    fn text(&self) -> String;

    /// "Visit" a particular element in a tree.
    fn visit(&mut self, element: &Element);

    /// "Swallows" an element.
    ///
    /// Nothing is done by the visitor for the element itself, but it
    /// continues visiting the element's children. This is generally used
    /// for container elements whose delimiters contribute nothing to the
    /// output.
    fn swallow(&mut self, element: &Element)
    where
        Self: Sized,
    {
        trace!("swallowing element: {element:?}");
        element.accept_children(self);
    }
}

/// A data structure that can be visited.
pub trait Visitable {
    /// Accept a visitor for processing the visitable item.
    fn accept<V: Visitor>(&self, visitor: &mut V);

    /// Accept a visitor for processing all child elements.
    fn accept_children<V: Visitor>(&self, visitor: &mut V);
}

impl Visitable for Element<'_> {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit(self);
    }

    fn accept_children<V: Visitor>(&self, visitor: &mut V) {
        self.elements().accept(visitor);
    }
}

impl Visitable for [Element<'_>] {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        self.accept_children(visitor);
    }

    fn accept_children<V: Visitor>(&self, visitor: &mut V) {
        for element in self {
            element.accept(visitor);
        }
    }
}

/// A data type that can append text.
trait TextAppendable {
    /// Appends `text` to the target data structure.
    fn push_text(&mut self, text: &str);
}

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records the kind of every element it visits.
    #[derive(Debug, Default)]
    struct OutlineVisitor {
        outline: Vec<String>,
    }

    impl Visitor for OutlineVisitor {
        fn text(&self) -> String {
            self.outline.join(" ")
        }

        fn visit(&mut self, element: &Element) {
            let name = match element {
                Element::Text(_) => "text",
                Element::Bold { .. } => "bold",
                Element::Italic { .. } => "italic",
                Element::Quote { .. } => "quote",
                _ => "other",
            };
            self.outline.push(String::from(name));
            self.swallow(element);
        }
    }

    #[test]
    fn it_visits_elements_depth_first() {
        let document = parse("> **a _b_** c");
        let mut visitor = OutlineVisitor::default();
        document.elements().accept(&mut visitor);
        assert_eq!(visitor.text(), "quote bold text italic text text");
    }

    #[test]
    fn it_visits_only_children_when_accepting_children() {
        let document = parse("**a**");
        let mut visitor = OutlineVisitor::default();
        document[0].accept_children(&mut visitor);
        assert_eq!(visitor.text(), "text");
    }
}

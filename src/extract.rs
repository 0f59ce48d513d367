//! Streaming element extraction.
//!
//! A [`TagQuery`] names the elements to match: a tag name plus an optional
//! attribute predicate. [`TagQuery::extract_first`] reconstructs the first
//! matching element; [`TagQuery::extract_all`] reconstructs every matching
//! element in a single pass, including matches nested inside other matches.
//!
//! Extraction never fails: when the token source ends early or reports an
//! error, whatever was accumulated is returned and the condition is
//! recorded as the result's [`Termination`].

use crate::markup::element::Attributes;
use crate::markup::errors::SourceError;
use crate::markup::token::{Tag, Token};
use crate::source::TokenSource;
use log::trace;
use std::fmt::{self, Debug};

const LOG_TARGET: &str = "tagpull::extract";

/// Returns `true` if `value` contains `target` under class-list semantics.
///
/// A value with at least one space is split on the literal single-space
/// character and matches when any piece equals `target` exactly; a
/// spaceless value must equal `target` as a whole. There is no trimming
/// and no case-folding, and repeated spaces produce empty pieces that
/// cannot match a non-empty target.
///
/// # Examples
/// ```
/// use tagpull::value_contains;
///
/// assert!(value_contains("foo", "bar foo baz"));
/// assert!(value_contains("foo", "foo"));
/// assert!(!value_contains("foo", "foobar"));
/// ```
pub fn value_contains(target: &str, value: &str) -> bool {
    if value.contains(' ') {
        value.split(' ').any(|piece| piece == target)
    } else {
        value == target
    }
}

/// Which elements to extract: a tag name plus an optional predicate over
/// attribute `(key, value)` pairs.
///
/// Without a predicate, every tag with the queried name matches and
/// attributes are ignored entirely. Tag names are compared exactly, the
/// way the source tokenizer reported them.
pub struct TagQuery<'q> {
    name: &'q str,
    predicate: Option<Box<dyn Fn(&str, &str) -> bool + 'q>>,
}

impl<'q> TagQuery<'q> {
    /// A query matching every `name` tag, ignoring attributes.
    pub fn new(name: &'q str) -> Self {
        Self {
            name,
            predicate: None,
        }
    }

    /// A query matching `name` tags whose `key` attribute contains `value`
    /// under [`value_contains`] semantics.
    ///
    /// This is the usual way to select by class:
    /// `TagQuery::with_attribute("div", "class", "entry-content")` matches
    /// `<div class="entry-content wide">`.
    pub fn with_attribute(name: &'q str, key: &'q str, value: &'q str) -> Self {
        Self::with_predicate(name, move |k, v| k == key && value_contains(value, v))
    }

    /// A query matching `name` tags with at least one attribute pair
    /// satisfying `predicate`.
    pub fn with_predicate(name: &'q str, predicate: impl Fn(&str, &str) -> bool + 'q) -> Self {
        Self {
            name,
            predicate: Some(Box::new(predicate)),
        }
    }

    /// The queried tag name.
    pub fn name(&self) -> &'q str {
        self.name
    }

    /// Returns `true` if `attributes` satisfies the bound predicate.
    ///
    /// Always `true` when no predicate is bound. Otherwise evaluation
    /// short-circuits on the first satisfying pair, in source order; an
    /// empty attribute list satisfies only a predicate-less query.
    pub fn matches_attributes(&self, attributes: &Attributes) -> bool {
        match &self.predicate {
            None => true,
            Some(predicate) => attributes
                .iter()
                .any(|attribute| predicate(attribute.name().as_str(), attribute.value())),
        }
    }

    fn matches(&self, tag: &Tag) -> bool {
        tag.name() == self.name && self.matches_attributes(tag.attributes())
    }

    /// Consumes `source` until the first matching element is fully closed,
    /// returning that element's verbatim reconstruction.
    ///
    /// The fragment spans the opening tag through the matching closing tag,
    /// inclusive; a same-named descendant does not terminate the capture.
    /// A matching self-closing tag is a complete single-token fragment on
    /// its own.
    ///
    /// When the source ends (cleanly or on an error) before a match is
    /// found or closed, the partial accumulation is returned as-is. An
    /// empty fragment is therefore ambiguous between "absent" and
    /// "malformed"; inspect [`Extraction::termination`] when the
    /// distinction matters.
    pub fn extract_first(&self, source: &mut impl TokenSource) -> Extraction {
        let mut depth = 0i32;
        let mut capture_depth = None;
        let mut fragment = String::new();

        let termination = loop {
            let token = match source.next_token() {
                Some(Ok(token)) => token,
                Some(Err(error)) => break Termination::Error(error),
                None => break Termination::Clean,
            };

            match &token {
                Token::Open(tag) => {
                    depth += 1;
                    if capture_depth.is_none() && self.matches(tag) {
                        trace!(target: LOG_TARGET, "capturing <{}> at depth {depth}", tag.name());
                        capture_depth = Some(depth);
                    }
                }
                Token::SelfClosing(tag) => {
                    if capture_depth.is_none() && self.matches(tag) {
                        fragment.push_str(token.render());
                        break Termination::Clean;
                    }
                }
                Token::Close(tag) => {
                    if capture_depth == Some(depth) && tag.name() == self.name {
                        fragment.push_str(token.render());
                        break Termination::Clean;
                    }
                    depth -= 1;
                }
                Token::Other(_) => {}
            }

            if capture_depth.is_some() {
                fragment.push_str(token.render());
            }
        };

        if !termination.is_clean() {
            trace!(target: LOG_TARGET, "source failed; keeping partial capture of <{}>", self.name);
        }
        Extraction {
            fragment,
            termination,
        }
    }

    /// Consumes `source` to its end, returning the verbatim reconstruction
    /// of **every** matching element, in the order each match was closed.
    ///
    /// Matches may nest: an element matching inside another match's span
    /// is reported separately, and its tokens are recorded into both
    /// reconstructions. For sibling matches, closing order equals document
    /// order; a match nested inside a same-named match is reported before
    /// its enclosing one.
    ///
    /// Matches still open when the source ends (cleanly or on an error)
    /// are discarded; see [`Extractions::termination`] to tell the two
    /// stream endings apart.
    pub fn extract_all(&self, source: &mut impl TokenSource) -> Extractions {
        let mut depth = 0i32;
        let mut frames: Vec<CaptureFrame> = Vec::new();
        let mut fragments = Vec::new();

        let termination = loop {
            let token = match source.next_token() {
                Some(Ok(token)) => token,
                Some(Err(error)) => break Termination::Error(error),
                None => break Termination::Clean,
            };

            // An immediately-complete match (self-closing), and whether
            // this token closes the most recently opened frame.
            let mut immediate = false;
            let mut closing = false;

            match &token {
                Token::Open(tag) => {
                    depth += 1;
                    if self.matches(tag) {
                        trace!(target: LOG_TARGET, "capturing <{}> at depth {depth}", tag.name());
                        frames.push(CaptureFrame::open(depth));
                    }
                }
                Token::SelfClosing(tag) => immediate = self.matches(tag),
                Token::Close(tag) => {
                    closing = tag.name() == self.name
                        && frames.last().is_some_and(|frame| frame.open_depth == depth);
                    depth -= 1;
                }
                Token::Other(_) => {}
            }

            // A token within several open captures lands in every buffer,
            // so each match reconstructs a self-contained fragment.
            for frame in &mut frames {
                frame.buffer.push_str(token.render());
            }

            if closing
                && let Some(frame) = frames.pop()
            {
                fragments.push(frame.buffer);
            }
            if immediate {
                fragments.push(token.render().to_owned());
            }
        };

        if !frames.is_empty() {
            trace!(
                target: LOG_TARGET,
                "discarding {} unterminated capture(s) of <{}>",
                frames.len(),
                self.name
            );
        }
        Extractions {
            fragments,
            termination,
        }
    }
}

impl Debug for TagQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagQuery")
            .field("name", &self.name)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

/// One currently-open match: the depth its opening tag was seen at, and
/// the fragment accumulated so far.
struct CaptureFrame {
    open_depth: i32,
    buffer: String,
}

impl CaptureFrame {
    fn open(depth: i32) -> Self {
        Self {
            open_depth: depth,
            buffer: String::new(),
        }
    }
}

/// How extraction stopped reading its token source.
#[derive(Debug)]
pub enum Termination {
    /// The capture closed, or the source was exhausted cleanly.
    Clean,
    /// The source reported a tokenizer failure; everything accumulated
    /// before the failure was kept.
    Error(SourceError),
}

impl Termination {
    /// Returns `true` unless the source failed.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// The tokenizer failure, if any.
    pub fn error(&self) -> Option<&SourceError> {
        match self {
            Self::Clean => None,
            Self::Error(error) => Some(error),
        }
    }
}

/// The outcome of [`TagQuery::extract_first`].
#[derive(Debug)]
pub struct Extraction {
    fragment: String,
    termination: Termination,
}

impl Extraction {
    /// The reconstructed fragment.
    ///
    /// Empty when no match was found; partial when the source ended while
    /// the match was still open.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Consumes the extraction, returning the fragment.
    pub fn into_fragment(self) -> String {
        self.fragment
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }

    /// How extraction stopped reading the source.
    pub fn termination(&self) -> &Termination {
        &self.termination
    }
}

/// The outcome of [`TagQuery::extract_all`].
///
/// Fragments are ordered by when each match **closed**, not opened.
#[derive(Debug)]
pub struct Extractions {
    fragments: Vec<String>,
    termination: Termination,
}

impl Extractions {
    /// The number of fully-closed matches.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns `true` if no match fully closed.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Returns the fragment at `index` in closing order, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fragments.get(index).map(String::as_str)
    }

    /// All fragments, in closing order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Consumes the extractions, returning the fragments.
    pub fn into_fragments(self) -> Vec<String> {
        self.fragments
    }

    /// Returns an iterator over all fragments, in closing order.
    pub fn iter(&self) -> FragmentsIter<'_> {
        FragmentsIter(self.fragments.iter())
    }

    /// How extraction stopped reading the source.
    pub fn termination(&self) -> &Termination {
        &self.termination
    }
}

impl IntoIterator for Extractions {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.into_iter()
    }
}

impl<'a> IntoIterator for &'a Extractions {
    type Item = &'a str;
    type IntoIter = FragmentsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over extracted fragments, in closing order.
///
/// # See Also
/// - [`Extractions::iter`] to create an instance of this struct.
pub struct FragmentsIter<'a>(std::slice::Iter<'a, String>);

impl<'a> Iterator for FragmentsIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{TagQuery, value_contains};
    use crate::markup::element::{Attribute, Attributes};

    #[test]
    fn test_value_contains() {
        #[rustfmt::skip]
        let expected = [
            (true, "foo", "bar foo baz"),
            (true, "foo", "foo"),
            (false, "foo", "foobar"),
            (false, "foo", "bar foobar baz"),
            // A naive single-space split: repeated or leading spaces add
            // empty pieces, which only an empty target can equal.
            (true, "foo", "bar  foo"),
            (true, "foo", " foo"),
            (false, "Foo", "foo"),
            (false, "", "ab"),
            (true, "", "a "),
        ];

        for (outcome, target, value) in expected {
            assert_eq!(outcome, value_contains(target, value), "{target:?} in {value:?}");
        }
    }

    #[test]
    fn test_matches_attributes_without_predicate() {
        let query = TagQuery::new("div");

        assert!(query.matches_attributes(&Attributes::default()));
        assert!(query.matches_attributes(&Attributes::from(vec![Attribute::new("id", "x")])));
    }

    #[test]
    fn test_matches_attributes_short_circuits_in_source_order() {
        let query = TagQuery::with_attribute("div", "class", "post");
        let attributes = Attributes::from(vec![
            Attribute::new("id", "post"),
            Attribute::new("class", "post body"),
        ]);

        // The `id` pair fails on key equality without the value being
        // inspected; the `class` pair satisfies the query.
        assert!(query.matches_attributes(&attributes));
        assert!(!query.matches_attributes(&Attributes::from(vec![Attribute::new("id", "post")])));
        assert!(!query.matches_attributes(&Attributes::default()));
    }

    #[test]
    fn test_with_predicate_sees_every_pair() {
        let query = TagQuery::with_predicate("a", |key, value| {
            key == "rel" && value == "next"
        });
        let attributes = Attributes::from(vec![
            Attribute::new("href", "/2"),
            Attribute::new("rel", "next"),
        ]);

        assert!(query.matches_attributes(&attributes));
    }
}

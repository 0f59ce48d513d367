//! Structural tokens produced by a [`TokenSource`](crate::TokenSource).

use crate::markup::element::{Attributes, Name};

/// One structural unit of markup.
///
/// Every token can [`render`](Self::render) itself back to its original
/// textual form; extraction output is the concatenation of such renderings
/// in stream order, which is what makes reconstructed fragments verbatim
/// rather than re-serialized.
///
/// End of stream is not a token: a source signals it by returning [`None`]
/// (see [`TokenSource::next_token`](crate::TokenSource::next_token)).
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// An opening tag, such as `<div class="a">`.
    Open(Tag),
    /// A closing tag, such as `</div>`.
    ///
    /// Closing tags carry no attributes.
    Close(Tag),
    /// A self-closing tag, such as `<hr/>`.
    SelfClosing(Tag),
    /// Anything that is not a tag: text, comments, CDATA sections,
    /// processing instructions, doctype declarations.
    Other(String),
}

impl Token {
    /// The token's original textual form.
    pub fn render(&self) -> &str {
        match self {
            Self::Open(tag) | Self::Close(tag) | Self::SelfClosing(tag) => tag.render(),
            Self::Other(raw) => raw,
        }
    }

    /// The inner [`Tag`] for tag tokens, [`None`] for [`Self::Other`].
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Self::Open(tag) | Self::Close(tag) | Self::SelfClosing(tag) => Some(tag),
            Self::Other(_) => None,
        }
    }
}

/// A tag token's name, attributes, and verbatim rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    name: String,
    attributes: Attributes,
    raw: String,
}

impl Tag {
    /// Creates a tag from its parsed parts and its original textual form.
    ///
    /// `raw` must be the tag exactly as it appeared in the source,
    /// delimiters included; it is what [`Self::render`] yields during
    /// fragment reconstruction.
    pub fn new(name: impl Into<String>, attributes: Attributes, raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes,
            raw: raw.into(),
        }
    }

    /// The tag name.
    pub fn name(&self) -> Name<'_> {
        Name::new(&self.name)
    }

    /// The attributes, in source order.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The tag's original textual form, delimiters included.
    pub fn render(&self) -> &str {
        &self.raw
    }
}

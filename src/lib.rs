//! # tagpull
//!
//! Streaming extraction of markup elements from a token stream.
//!
//! Given a tag name and an optional attribute predicate, a [`TagQuery`]
//! scans a pull-based [`TokenSource`] once and reconstructs the verbatim
//! markup of matching elements, nested same-named elements and several
//! simultaneously open matches included. Fragments are rebuilt from each
//! token's original textual form, so whitespace, attribute order, and
//! quoting survive untouched.
//!
//! Extraction never fails: a source that ends early or errors mid-stream
//! yields whatever was accumulated, with the ending recorded as the
//! result's [`Termination`].
//!
//! ## Examples
//! Extracting the first matching element:
//! ```rust
//! use tagpull::{TagQuery, XmlTokenSource};
//!
//! let markup = r#"<body><div class="post body"><p>hi</p></div></body>"#;
//! let mut source = XmlTokenSource::from_str(markup);
//!
//! let post = TagQuery::with_attribute("div", "class", "post").extract_first(&mut source);
//!
//! assert_eq!(r#"<div class="post body"><p>hi</p></div>"#, post.fragment());
//! assert!(post.termination().is_clean());
//! ```
//! Extracting every match in one pass:
//! ```rust
//! use tagpull::{TagQuery, XmlTokenSource};
//!
//! let markup = "<ul><li>a</li><li>b</li></ul>";
//! let mut source = XmlTokenSource::from_str(markup);
//!
//! let items = TagQuery::new("li").extract_all(&mut source);
//!
//! assert_eq!(2, items.len());
//! assert_eq!(Some("<li>a</li>"), items.get(0));
//! assert_eq!(Some("<li>b</li>"), items.get(1));
//! ```

mod extract;
mod markup;
mod source;

pub use self::extract::{
    Extraction, Extractions, FragmentsIter, TagQuery, Termination, value_contains,
};
pub use self::markup::token::{Tag, Token};
pub use self::source::TokenSource;
pub use self::source::xml::XmlTokenSource;

pub mod element {
    pub use super::markup::element::{Attribute, Attributes, AttributesIter, Name};
}

pub mod errors {
    pub use super::markup::errors::{SourceError, SourceResult};
}

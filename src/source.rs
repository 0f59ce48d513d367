//! Pull-based token sources.
//!
//! A [`TokenSource`] is the input side of extraction: a lazy, forward-only
//! sequence of [`Token`]s over some underlying markup text. The bundled
//! [`XmlTokenSource`](xml::XmlTokenSource) adapts a tolerant `quick-xml`
//! reader; any other tokenizer can participate by implementing the trait.
//!
//! A source is single-owner state: it is consumed linearly, at most once.
//! Extracting twice over the same markup requires two freshly-created
//! sources.

pub mod xml;

use crate::markup::errors::SourceResult;
use crate::markup::token::Token;

/// A lazy, forward-only supplier of markup [`Token`]s.
pub trait TokenSource {
    /// Iterator-like method to pull the next [`Token`].
    ///
    /// [`None`] signals clean exhaustion. A tokenizer failure is reported
    /// once as `Some(Err(_))`; after that the source is also exhausted.
    /// Extraction treats both conditions as termination and records which
    /// one occurred (see [`Termination`](crate::Termination)).
    fn next_token(&mut self) -> Option<SourceResult<Token>>;
}

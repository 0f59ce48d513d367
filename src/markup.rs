//! Core markup types shared by token sources and the extractor.
//!
//! # Overview
//! - [`token`]: Structural tokens ([`Token`](token::Token)) and their
//!   verbatim renderings.
//! - [`element`]: Tag-level building blocks ([`Name`](element::Name),
//!   [`Attribute`](element::Attribute), [`Attributes`](element::Attributes)).
//! - [`errors`]: Token-source error types.

pub mod element;
pub mod errors;
pub mod token;

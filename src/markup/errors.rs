//! Error-related types for a [`TokenSource`](crate::TokenSource).

use std::error::Error;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Alias for `Result<T, SourceError>`.
pub type SourceResult<T> = Result<T, SourceError>;

/// Possible errors when pulling from a [`TokenSource`](crate::TokenSource).
///
/// Extraction itself never returns these; a source failure is surfaced as
/// [`Termination::Error`](crate::Termination::Error) on the extraction
/// result, alongside whatever was accumulated before the failure.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SourceError {
    /// Markup content unexpectedly caused an internal tokenizer error.
    ///
    /// This may originate from malformed content, such as a tag truncated
    /// mid-way by the end of input.
    #[error(transparent)]
    Unparsable(#[from] Box<dyn Error + Send + Sync + 'static>),

    /// Tag or text content is not valid UTF-8.
    #[error(transparent)]
    InvalidUtf8(#[from] FromUtf8Error),
}

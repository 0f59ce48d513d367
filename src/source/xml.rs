use crate::markup::element::{Attribute, Attributes};
use crate::markup::errors::{SourceError, SourceResult};
use crate::markup::token::{Tag, Token};
use crate::source::TokenSource;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

pub(crate) type ByteReader<'a> = Reader<&'a [u8]>;

/// A [`TokenSource`] backed by a tolerant `quick-xml` reader.
///
/// The reader is configured for scraped, imperfect markup: closing-tag
/// names are not checked against opening tags and unmatched closing tags
/// are reported as ordinary tokens rather than errors, leaving balance
/// bookkeeping to the extractor. Attribute text is taken source-exact,
/// with no entity unescaping.
///
/// # Examples
/// ```
/// use tagpull::{Token, TokenSource, XmlTokenSource};
///
/// let mut source = XmlTokenSource::from_str("<p>hi</p>");
///
/// let open = source.next_token().unwrap().unwrap();
/// assert!(matches!(open, Token::Open(_)));
/// assert_eq!("<p>", open.render());
/// ```
pub struct XmlTokenSource<'a> {
    reader: ByteReader<'a>,
    finished: bool,
}

impl<'a> XmlTokenSource<'a> {
    /// Creates a source over a markup string.
    pub fn from_str(markup: &'a str) -> Self {
        Self::from_bytes(markup.as_bytes())
    }

    /// Creates a source over raw markup bytes.
    ///
    /// Content is decoded as UTF-8 per token; invalid sequences surface as
    /// [`SourceError::InvalidUtf8`] from [`TokenSource::next_token`].
    pub fn from_bytes(markup: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(markup);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        Self {
            reader,
            finished: false,
        }
    }
}

impl TokenSource for XmlTokenSource<'_> {
    fn next_token(&mut self) -> Option<SourceResult<Token>> {
        if self.finished {
            return None;
        }
        let result = match self.reader.read_event() {
            Ok(Event::Eof) => None,
            Ok(event) => Some(convert(event)),
            Err(error) => Some(Err(SourceError::Unparsable(Box::new(error)))),
        };

        // A source yields at most one error, then stays exhausted.
        if !matches!(result, Some(Ok(_))) {
            self.finished = true;
        }
        result
    }
}

/// Maps a `quick-xml` event onto a [`Token`], reconstructing the verbatim
/// rendering from the event's raw content and the delimiters the reader
/// stripped from it.
fn convert(event: Event<'_>) -> SourceResult<Token> {
    Ok(match &event {
        Event::Start(start) => Token::Open(tag(start, enclose("<", start, ">")?)?),
        Event::Empty(start) => Token::SelfClosing(tag(start, enclose("<", start, "/>")?)?),
        Event::End(end) => {
            let raw = enclose("</", end, ">")?;
            Token::Close(Tag::new(utf8(end.name().as_ref())?, Attributes::default(), raw))
        }
        Event::Text(text) => Token::Other(utf8(text)?),
        Event::GeneralRef(reference) => Token::Other(enclose("&", reference, ";")?),
        Event::CData(cdata) => Token::Other(enclose("<![CDATA[", cdata, "]]>")?),
        Event::Comment(comment) => Token::Other(enclose("<!--", comment, "-->")?),
        Event::Decl(decl) => Token::Other(enclose("<?", decl, "?>")?),
        Event::PI(pi) => Token::Other(enclose("<?", pi, "?>")?),
        Event::DocType(doctype) => Token::Other(enclose("<!DOCTYPE ", doctype, ">")?),
        // Eof is handled by the caller before conversion.
        Event::Eof => Token::Other(String::new()),
    })
}

fn tag(start: &BytesStart<'_>, raw: String) -> SourceResult<Tag> {
    let name = utf8(start.name().as_ref())?;
    // The lenient iterator accepts duplicate and unquoted attributes;
    // entries it still cannot parse are skipped rather than fatal.
    let mut html_attributes = start.html_attributes();
    html_attributes.with_checks(false);
    let attributes = html_attributes
        .filter_map(Result::ok)
        .map(|attribute| {
            Ok(Attribute::new(
                utf8(attribute.key.as_ref())?,
                utf8(&attribute.value)?,
            ))
        })
        .collect::<SourceResult<Vec<_>>>()?;

    Ok(Tag::new(name, attributes.into(), raw))
}

fn enclose(prefix: &str, content: &[u8], suffix: &str) -> SourceResult<String> {
    let mut raw = String::with_capacity(prefix.len() + content.len() + suffix.len());
    raw.push_str(prefix);
    raw.push_str(&utf8(content)?);
    raw.push_str(suffix);
    Ok(raw)
}

fn utf8(bytes: &[u8]) -> SourceResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(SourceError::from)
}

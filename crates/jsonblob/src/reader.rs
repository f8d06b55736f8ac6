//! Pull-based JSON tokenizer with typed, ordered field access.
//!
//! The reader walks a single JSON object strictly forward, one lookahead
//! character at a time. Fields must be requested in exactly the order they
//! appear in the stream; a property that has already been passed cannot be
//! requested again, and the scan silently consumes properties the caller
//! skips over. Binary payloads are exposed as a byte stream that decodes the
//! base64 string value on the fly, without buffering the document, the
//! string, or the payload.

use std::io::Read;

use crate::base64::Base64Decoder;
use crate::error::{Error, SyntaxError};
use crate::escape::decode_string_literal;
use crate::options::ReaderOptions;
use crate::source::CharSource;
use crate::string_stream::Base64StringSource;
use crate::token::JsonToken;

/// Streaming byte reader over one base64 binary field.
///
/// Returned by [`JsonReader::read_stream`]; implements [`Read`]. Draining it
/// past the closing quote re-arms the owning reader for the next field.
pub type BlobReader<'a, R> = Base64Decoder<Base64StringSource<'a, R>>;

/// The character source is owned by the root reader; child readers borrow
/// their parent's for the duration of the nested scope.
#[derive(Debug)]
enum SourceHandle<'p, R> {
    Owned(CharSource<R>),
    Borrowed(&'p mut CharSource<R>),
}

impl<R> SourceHandle<'_, R> {
    fn get_mut(&mut self) -> &mut CharSource<R> {
        match self {
            SourceHandle::Owned(source) => source,
            SourceHandle::Borrowed(source) => source,
        }
    }
}

/// Forward-only reader for one JSON object scope.
///
/// Create a root reader with [`new`](JsonReader::new) and pull fields with
/// the typed accessors, in document order. A nested object opens a child
/// reader that borrows the parent; the parent is statically unusable until
/// the child is dropped.
///
/// # Examples
///
/// ```rust
/// use jsonblob::JsonReader;
///
/// let doc = br#"{"id": 3, "name": "abc"}"#;
/// let mut reader = JsonReader::new(&doc[..]);
/// assert_eq!(reader.read_i32("id").unwrap(), Some(3));
/// assert_eq!(reader.read_string("name").unwrap().as_deref(), Some("abc"));
/// ```
#[derive(Debug)]
pub struct JsonReader<'p, R> {
    source: SourceHandle<'p, R>,
    options: ReaderOptions,
    token: JsonToken,
    current_number: Option<i32>,
    current_string: Option<String>,
    /// Set on child readers; written when this scope's closing brace is
    /// consumed so the parent resumes with correct separator state.
    parent_token: Option<&'p mut JsonToken>,
}

impl<'p, R: Read> JsonReader<'p, R> {
    /// Creates a root reader over `input`.
    ///
    /// The input should be buffered (for example with
    /// [`std::io::BufReader`]) when it wraps a raw file or socket; the
    /// reader pulls single characters.
    #[must_use]
    pub fn new(input: R) -> Self {
        Self::with_options(input, ReaderOptions::default())
    }

    /// Creates a root reader with explicit [`ReaderOptions`].
    #[must_use]
    pub fn with_options(input: R, options: ReaderOptions) -> Self {
        Self {
            source: SourceHandle::Owned(CharSource::new(input)),
            options,
            token: JsonToken::Unknown,
            current_number: None,
            current_string: None,
            parent_token: None,
        }
    }

    /// Reads the integer (or `null`) value of `property_name`.
    ///
    /// # Errors
    ///
    /// Fails if the property does not appear next in the forward scan, or if
    /// its value is not a non-negative integer or `null`.
    pub fn read_i32(&mut self, property_name: &str) -> Result<Option<i32>, Error> {
        self.move_to_property(property_name)?;

        if self.advance()?
            && matches!(self.token, JsonToken::NumberValue | JsonToken::NullValue)
        {
            return Ok(self.current_number);
        }

        Err(Error::ExpectedValue {
            property: property_name.into(),
            expected: "a number or null",
        })
    }

    /// Reads the string (or `null`) value of `property_name`, resolving all
    /// standard JSON escapes.
    ///
    /// # Errors
    ///
    /// Fails if the property does not appear next in the forward scan, or if
    /// its value is not a string or `null`.
    pub fn read_string(&mut self, property_name: &str) -> Result<Option<String>, Error> {
        self.move_to_property(property_name)?;

        if self.advance()? {
            match self.token {
                JsonToken::StringStart => {
                    let source = self.source.get_mut();
                    let (line, column) = (source.line(), source.column());
                    let raw = read_raw_string(source)?;
                    self.token = JsonToken::StringEnd;
                    let value = decode_string_literal(&raw)
                        .map_err(|kind| Error::syntax(kind, line, column))?;
                    return Ok(Some(value));
                }
                JsonToken::NullValue => return Ok(None),
                _ => {}
            }
        }

        Err(Error::ExpectedValue {
            property: property_name.into(),
            expected: "a string or null",
        })
    }

    /// Reads the binary value of `property_name` as a decoding byte stream,
    /// or `None` for `null`.
    ///
    /// The returned [`BlobReader`] borrows this reader; drain it (read until
    /// it returns 0) before requesting the next field. Dropping it early
    /// leaves the string pending and every subsequent operation on this
    /// reader fails.
    ///
    /// # Errors
    ///
    /// Fails if the property does not appear next in the forward scan, or if
    /// its value is not a string or `null`.
    pub fn read_stream(&mut self, property_name: &str) -> Result<Option<BlobReader<'_, R>>, Error> {
        self.move_to_property(property_name)?;

        if !self.advance()? {
            return Err(Error::ExpectedValue {
                property: property_name.into(),
                expected: "a string or null",
            });
        }

        match self.token {
            JsonToken::StringStart => {
                let Self { source, token, .. } = self;
                Ok(Some(Base64Decoder::new(Base64StringSource::new(
                    source.get_mut(),
                    token,
                ))))
            }
            JsonToken::NullValue => Ok(None),
            _ => Err(Error::ExpectedValue {
                property: property_name.into(),
                expected: "a string or null",
            }),
        }
    }

    /// Opens the nested object value of `property_name` and returns a child
    /// reader for it.
    ///
    /// The child borrows this reader's character source; read the child's
    /// fields through to its closing brace before touching the parent again.
    ///
    /// # Errors
    ///
    /// Fails if the property does not appear next in the forward scan, or if
    /// its value is not an object.
    pub fn read_object(&mut self, property_name: &str) -> Result<JsonReader<'_, R>, Error> {
        self.move_to_property(property_name)?;

        let Self {
            source,
            options,
            token,
            ..
        } = self;
        let options = *options;
        let source = source.get_mut();

        skip_whitespace(source, options)?;
        consume_expected(source, ':')?;
        skip_whitespace(source, options)?;

        match source.peek()? {
            Some('{') => {}
            Some(ch) => return Err(source.syntax_error(SyntaxError::UnexpectedCharacter(ch))),
            None => return Err(source.syntax_error(SyntaxError::UnexpectedEndOfInput)),
        }

        Ok(JsonReader {
            source: SourceHandle::Borrowed(source),
            options,
            token: JsonToken::Unknown,
            current_number: None,
            current_string: None,
            parent_token: Some(token),
        })
    }

    /// Consumes the remainder of this object scope, through its closing
    /// brace, skipping any properties that were never requested.
    ///
    /// Required before resuming a parent reader when the nested object was
    /// not read to its end; also usable on a root reader to check that the
    /// document closes properly.
    ///
    /// # Errors
    ///
    /// Fails if the input ends before the scope closes, if the skipped
    /// remainder is not lexically valid, or if a string value is pending.
    /// Calling `close` after a failed operation is unsupported; the chain is
    /// already fatal at that point.
    pub fn close(mut self) -> Result<(), Error> {
        let mut depth = 0usize;
        loop {
            let prev = self.token;
            if !self.scan_next()? {
                let source = self.source.get_mut();
                return Err(source.syntax_error(SyntaxError::UnexpectedEndOfInput));
            }
            match self.token {
                JsonToken::ObjectStart if prev == JsonToken::PropertyName => depth += 1,
                JsonToken::ObjectEnd => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
    }

    /// Advances the token machine until `property_name` is the current
    /// property, consuming everything in between. Skipped nested objects are
    /// walked through without their property names taking part in the match.
    fn move_to_property(&mut self, property_name: &str) -> Result<(), Error> {
        let mut depth = 0usize;
        loop {
            let prev = self.token;
            if !self.scan_next()? {
                break;
            }
            match self.token {
                JsonToken::PropertyName
                    if depth == 0
                        && self.current_string.as_deref() == Some(property_name) =>
                {
                    return Ok(());
                }
                JsonToken::ObjectStart if prev == JsonToken::PropertyName => depth += 1,
                JsonToken::ObjectEnd => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }

        Err(Error::PropertyNotFound(property_name.into()))
    }

    /// One scanning step: advances the token machine and, when the step
    /// lands on a skipped string value, consumes it without decoding so the
    /// scan can keep moving.
    fn scan_next(&mut self) -> Result<bool, Error> {
        if !self.advance()? {
            return Ok(false);
        }

        if self.token == JsonToken::StringStart {
            skip_raw_string(self.source.get_mut())?;
            self.token = JsonToken::StringEnd;
        }

        Ok(true)
    }

    /// Advances to the next token. Returns `false` at end of input.
    fn advance(&mut self) -> Result<bool, Error> {
        if self.token == JsonToken::StringStart {
            return Err(Error::StringPending);
        }

        let Self {
            source,
            options,
            token,
            current_number,
            current_string,
            parent_token,
        } = self;
        let options = *options;
        let source = source.get_mut();

        *current_number = None;
        *current_string = None;

        skip_whitespace(source, options)?;

        let Some(mut ch) = source.peek()? else {
            return Ok(false);
        };

        // a completed value may be followed by a separating comma
        if matches!(
            *token,
            JsonToken::NumberValue
                | JsonToken::NullValue
                | JsonToken::StringEnd
                | JsonToken::ObjectEnd
        ) {
            if ch == ',' {
                source.next()?;
            }
            skip_whitespace(source, options)?;
            match source.peek()? {
                Some(next) => ch = next,
                None => return Err(source.syntax_error(SyntaxError::UnexpectedEndOfInput)),
            }
        }

        match *token {
            JsonToken::Unknown => {
                if ch != '{' {
                    return Err(source.syntax_error(SyntaxError::UnexpectedCharacter(ch)));
                }
                source.next()?;
                *token = JsonToken::ObjectStart;
            }

            JsonToken::ObjectStart
            | JsonToken::StringEnd
            | JsonToken::NumberValue
            | JsonToken::NullValue
            | JsonToken::ObjectEnd => match ch {
                '}' => {
                    source.next()?;
                    *token = JsonToken::ObjectEnd;
                    if let Some(parent) = parent_token.as_deref_mut() {
                        *parent = JsonToken::ObjectEnd;
                    }
                }
                '"' => {
                    let (line, column) = (source.line(), source.column());
                    let raw = read_raw_string(source)?;
                    let name = decode_string_literal(&raw)
                        .map_err(|kind| Error::syntax(kind, line, column))?;
                    *token = JsonToken::PropertyName;
                    *current_string = Some(name);
                }
                other => {
                    return Err(source.syntax_error(SyntaxError::UnexpectedCharacter(other)));
                }
            },

            JsonToken::PropertyName => {
                consume_expected(source, ':')?;
                skip_whitespace(source, options)?;

                let Some(ch) = source.peek()? else {
                    return Err(source.syntax_error(SyntaxError::UnexpectedEndOfInput));
                };

                if ch.is_ascii_digit() {
                    *current_number = Some(read_number(source)?);
                    *token = JsonToken::NumberValue;
                } else {
                    match ch {
                        // the quote is left for the string or stream consumer
                        '"' => *token = JsonToken::StringStart,
                        '{' => {
                            source.next()?;
                            *token = JsonToken::ObjectStart;
                        }
                        'n' => {
                            read_null_literal(source, options)?;
                            *token = JsonToken::NullValue;
                        }
                        other => {
                            return Err(
                                source.syntax_error(SyntaxError::UnexpectedCharacter(other))
                            );
                        }
                    }
                }
            }

            JsonToken::StringStart => return Err(Error::StringPending),
        }

        Ok(true)
    }
}

fn is_json_whitespace(ch: char, options: ReaderOptions) -> bool {
    if options.allow_unicode_whitespace {
        ch.is_whitespace()
    } else {
        matches!(ch, ' ' | '\t' | '\n' | '\r')
    }
}

fn skip_whitespace<R: Read>(source: &mut CharSource<R>, options: ReaderOptions) -> Result<(), Error> {
    while let Some(ch) = source.peek()? {
        if !is_json_whitespace(ch, options) {
            break;
        }
        source.next()?;
    }
    Ok(())
}

fn consume_expected<R: Read>(source: &mut CharSource<R>, expected: char) -> Result<(), Error> {
    match source.peek()? {
        Some(ch) if ch == expected => {
            source.next()?;
            Ok(())
        }
        Some(ch) => Err(source.syntax_error(SyntaxError::UnexpectedCharacter(ch))),
        None => Err(source.syntax_error(SyntaxError::UnexpectedEndOfInput)),
    }
}

/// Accumulates a raw quoted literal, opening and closing quotes included.
/// A backslash escapes exactly one following character and never terminates
/// the literal; escape resolution happens later, over the whole literal.
fn read_raw_string<R: Read>(source: &mut CharSource<R>) -> Result<String, Error> {
    let mut raw = String::new();

    match source.next()? {
        Some(quote) => raw.push(quote),
        None => return Err(source.syntax_error(SyntaxError::UnexpectedEndOfInput)),
    }

    let mut escaped = false;
    loop {
        let Some(ch) = source.next()? else {
            return Err(source.syntax_error(SyntaxError::UnterminatedString));
        };

        raw.push(ch);

        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            break;
        }
    }

    Ok(raw)
}

/// Consumes a quoted literal without accumulating it, for properties the
/// caller skipped over. Only lexical correctness (termination) is checked.
fn skip_raw_string<R: Read>(source: &mut CharSource<R>) -> Result<(), Error> {
    if source.next()?.is_none() {
        return Err(source.syntax_error(SyntaxError::UnexpectedEndOfInput));
    }

    let mut escaped = false;
    loop {
        let Some(ch) = source.next()? else {
            return Err(source.syntax_error(SyntaxError::UnterminatedString));
        };

        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            break;
        }
    }

    Ok(())
}

/// Reads a maximal run of ASCII digits and parses it as an `i32`.
fn read_number<R: Read>(source: &mut CharSource<R>) -> Result<i32, Error> {
    let (line, column) = (source.line(), source.column());

    let mut digits = String::new();
    while let Some(ch) = source.peek()? {
        if !ch.is_ascii_digit() {
            break;
        }
        source.next()?;
        digits.push(ch);
    }

    match digits.parse::<i32>() {
        Ok(value) => Ok(value),
        Err(_) => Err(Error::syntax(SyntaxError::InvalidNumber(digits), line, column)),
    }
}

/// Consumes the literal `null`, requiring a whitespace, `}`, or `,`
/// boundary after it.
fn read_null_literal<R: Read>(source: &mut CharSource<R>, options: ReaderOptions) -> Result<(), Error> {
    let (line, column) = (source.line(), source.column());

    for expected in ['n', 'u', 'l', 'l'] {
        match source.next()? {
            Some(ch) if ch == expected => {}
            _ => return Err(Error::syntax(SyntaxError::InvalidNullLiteral, line, column)),
        }
    }

    match source.peek()? {
        Some(ch) if is_json_whitespace(ch, options) || ch == '}' || ch == ',' => Ok(()),
        _ => Err(Error::syntax(SyntaxError::InvalidNullLiteral, line, column)),
    }
}

//! Byte source over a quoted base64 string value.
//!
//! Sits between the character source and the base64 decoder: it scans the
//! quoted JSON string one character at a time, validates that everything up
//! to the closing quote belongs to the base64 alphabet, and hands each
//! character downstream as one raw byte. When the closing quote is reached
//! it is consumed, the shared reader token is flipped to
//! [`JsonToken::StringEnd`], and the stream ends.

use std::io::{self, Read};

use crate::error::SyntaxError;
use crate::source::CharSource;
use crate::token::JsonToken;

/// Adapts a quoted base64 string scan into a byte source.
///
/// Created by [`read_stream`](crate::JsonReader::read_stream); the borrows
/// keep the owning reader unusable until this stream is dropped.
#[derive(Debug)]
pub struct Base64StringSource<'a, R> {
    source: &'a mut CharSource<R>,
    token: &'a mut JsonToken,
    initialized: bool,
    finished: bool,
}

impl<'a, R: Read> Base64StringSource<'a, R> {
    pub(crate) fn new(source: &'a mut CharSource<R>, token: &'a mut JsonToken) -> Self {
        Self {
            source,
            token,
            initialized: false,
            finished: false,
        }
    }

    /// Consumes the opening quote, exactly once.
    fn initialize(&mut self) -> io::Result<()> {
        if self.initialized {
            return Ok(());
        }

        match self.source.next().map_err(io::Error::from)? {
            Some('"') => {
                self.initialized = true;
                Ok(())
            }
            _ => Err(self
                .source
                .syntax_error(SyntaxError::MissingOpeningQuote)
                .into()),
        }
    }
}

fn is_base64_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '+' | '/' | '=')
}

impl<R: Read> Read for Base64StringSource<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.finished {
            return Ok(0);
        }

        self.initialize()?;

        if buf.is_empty() {
            return Ok(0);
        }

        let mut count = 0;
        while count < buf.len() {
            match self.source.peek().map_err(io::Error::from)? {
                None => {
                    return Err(self
                        .source
                        .syntax_error(SyntaxError::UnterminatedString)
                        .into());
                }
                Some('"') => {
                    self.source.next().map_err(io::Error::from)?;
                    *self.token = JsonToken::StringEnd;
                    self.finished = true;
                    break;
                }
                Some(ch) if is_base64_char(ch) => {
                    self.source.next().map_err(io::Error::from)?;
                    buf[count] = ch as u8;
                    count += 1;
                }
                Some(ch) => {
                    return Err(self
                        .source
                        .syntax_error(SyntaxError::InvalidBase64Character(ch))
                        .into());
                }
            }
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read};

    use super::Base64StringSource;
    use crate::source::CharSource;
    use crate::token::JsonToken;

    fn drain(input: &str) -> (io::Result<Vec<u8>>, JsonToken) {
        let mut source = CharSource::new(Cursor::new(input.to_owned()));
        let mut token = JsonToken::StringStart;
        let mut out = Vec::new();
        let result = Base64StringSource::new(&mut source, &mut token)
            .read_to_end(&mut out)
            .map(|_| out);
        (result, token)
    }

    #[test]
    fn scans_up_to_the_closing_quote() {
        let (result, token) = drain("\"SGVsbG8=\"");
        assert_eq!(result.unwrap(), b"SGVsbG8=");
        assert_eq!(token, JsonToken::StringEnd);
    }

    #[test]
    fn empty_string_completes_immediately() {
        let (result, token) = drain("\"\"");
        assert_eq!(result.unwrap(), b"");
        assert_eq!(token, JsonToken::StringEnd);
    }

    #[test]
    fn missing_opening_quote_is_an_error() {
        let (result, token) = drain("SGVsbG8=\"");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("should be a quote"));
        assert_eq!(token, JsonToken::StringStart);
    }

    #[test]
    fn end_of_input_before_the_quote_is_an_error() {
        let (result, _) = drain("\"SGVs");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn characters_outside_the_alphabet_are_rejected() {
        let (result, _) = drain("\"SGV!bG8=\"");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid character"));
    }
}

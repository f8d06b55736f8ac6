//! Incremental UTF-8 character source with one-character lookahead.
//!
//! Wraps any [`Read`] and hands out one decoded `char` at a time, tracking
//! 1-based line/column coordinates for error reporting. End of input is
//! `Ok(None)`; a read after a peek returns the peeked character.

use std::io::{self, Read};

use crate::error::{Error, SyntaxError};

#[derive(Debug)]
pub(crate) struct CharSource<R> {
    input: R,
    peeked: Option<char>,
    at_end: bool,
    line: usize,
    column: usize,
}

impl<R: Read> CharSource<R> {
    pub(crate) fn new(input: R) -> Self {
        Self {
            input,
            peeked: None,
            at_end: false,
            line: 1,
            column: 1,
        }
    }

    /// Line of the next unconsumed character, 1-based.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Column of the next unconsumed character, 1-based.
    pub(crate) fn column(&self) -> usize {
        self.column
    }

    /// Builds a syntax error located at the next unconsumed character.
    pub(crate) fn syntax_error(&self, kind: SyntaxError) -> Error {
        Error::syntax(kind, self.line, self.column)
    }

    /// Returns the next character without consuming it.
    pub(crate) fn peek(&mut self) -> Result<Option<char>, Error> {
        if self.peeked.is_none() && !self.at_end {
            self.peeked = self.decode_char()?;
            if self.peeked.is_none() {
                self.at_end = true;
            }
        }
        Ok(self.peeked)
    }

    /// Consumes and returns the next character.
    pub(crate) fn next(&mut self) -> Result<Option<char>, Error> {
        let ch = match self.peeked.take() {
            Some(ch) => Some(ch),
            None if self.at_end => None,
            None => {
                let ch = self.decode_char()?;
                if ch.is_none() {
                    self.at_end = true;
                }
                ch
            }
        };

        if let Some(ch) = ch {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        Ok(ch)
    }

    /// Decodes one UTF-8 scalar from the underlying reader.
    fn decode_char(&mut self) -> Result<Option<char>, Error> {
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };

        let width = match utf8_width(first) {
            Some(width) => width,
            None => return Err(self.syntax_error(SyntaxError::InvalidUtf8)),
        };

        let mut buf = [first, 0, 0, 0];
        for slot in &mut buf[1..width] {
            match self.read_byte()? {
                Some(byte) => *slot = byte,
                None => return Err(self.syntax_error(SyntaxError::InvalidUtf8)),
            }
        }

        match bstr::decode_utf8(&buf[..width]) {
            (Some(ch), len) if len == width => Ok(Some(ch)),
            _ => Err(self.syntax_error(SyntaxError::InvalidUtf8)),
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }
}

/// Expected sequence length for a UTF-8 leading byte, or `None` for a
/// continuation or invalid leading byte.
fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

use thiserror::Error;

/// Error raised by [`JsonReader`](crate::JsonReader) and
/// [`JsonWriter`](crate::JsonWriter) operations.
///
/// Every failure is fatal to the reader/writer chain that produced it: the
/// instance is left in an unspecified token state and the whole document
/// operation should be abandoned.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying transport failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not well formed at the reported position.
    #[error("{kind} at {line}:{column}")]
    Syntax {
        /// What was wrong with the input.
        kind: SyntaxError,
        /// 1-based line of the offending character.
        line: usize,
        /// 1-based column of the offending character.
        column: usize,
    },

    /// The requested property did not appear in the remaining forward scan.
    #[error(
        "property {0:?} not found; properties must be requested in the same \
         order as they appear in the input stream"
    )]
    PropertyNotFound(String),

    /// A string value is pending and must be consumed with `read_string` or
    /// `read_stream` before the reader can advance.
    #[error("a string value is pending; consume it with read_string or read_stream")]
    StringPending,

    /// The value following the property was not of the requested type.
    #[error("expected {expected} for property {property:?}")]
    ExpectedValue {
        /// The property whose value was requested.
        property: String,
        /// Human-readable description of the acceptable value types.
        expected: &'static str,
    },

    /// `write_object_start` was called after other fields had been written.
    #[error("the object has already been started")]
    ObjectAlreadyStarted,
}

impl Error {
    pub(crate) fn syntax(kind: SyntaxError, line: usize, column: usize) -> Self {
        Error::Syntax { kind, line, column }
    }
}

// Stream-shaped components (the base64 codec streams and the string boundary
// source) report failures through `std::io::Read`, so their typed errors are
// carried inside an `InvalidData` i/o error. An `Io` variant unwraps back to
// the original error rather than nesting twice.
impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(inner) => inner,
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}

/// Malformed-input detail carried by [`Error::Syntax`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A character appeared where a token start was expected.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// The input ended in the middle of a document.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// The input bytes are not valid UTF-8.
    #[error("invalid utf-8 in input")]
    InvalidUtf8,
    /// A value starting with `n` was not the literal `null`.
    #[error("expected the literal 'null'")]
    InvalidNullLiteral,
    /// A digit run could not be parsed as a 32-bit integer.
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
    /// The input ended before the closing quote of a string.
    #[error("unterminated string")]
    UnterminatedString,
    /// A backslash escape used an unknown escape character.
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    /// A `\u` escape contained a non-hexadecimal digit.
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    /// A `\u` escape decoded to an invalid code point.
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscapeSequence(u32),
    /// A UTF-16 surrogate escape was not part of a valid pair.
    #[error("unpaired surrogate \\u{0:04X} in string literal")]
    UnpairedSurrogate(u32),
    /// A raw control character appeared inside a string literal.
    #[error("unescaped control character in string literal")]
    ControlCharacter(char),
    /// The first character of a base64 string value was not a quote.
    #[error("first character of a base64 string should be a quote")]
    MissingOpeningQuote,
    /// A character inside a base64 string value was outside the alphabet.
    #[error("invalid character '{0}' in base64 string")]
    InvalidBase64Character(char),
}

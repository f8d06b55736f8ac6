/// Configuration options for [`JsonReader`](crate::JsonReader).
///
/// # Examples
///
/// ```rust
/// use jsonblob::{JsonReader, ReaderOptions};
///
/// let options = ReaderOptions {
///     allow_unicode_whitespace: true,
///     ..Default::default()
/// };
/// let reader = JsonReader::with_options(std::io::empty(), options);
/// # let _ = reader;
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default, the reader only recognizes the four whitespace characters
    /// defined by the JSON specification: space (U+0020), line feed (U+000A),
    /// carriage return (U+000D), and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,
}

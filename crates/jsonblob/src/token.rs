/// The reader's or writer's current lexical position class within one JSON
/// object scope.
///
/// Tokens advance strictly forward; there is no backtracking. `StringStart`
/// is special: it marks a quoted value whose content has not been consumed
/// yet, and it must be resolved through
/// [`read_string`](crate::JsonReader::read_string) or
/// [`read_stream`](crate::JsonReader::read_stream) before the token machine
/// may advance again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonToken {
    /// No input has been consumed yet.
    Unknown,
    /// An opening `{` has been consumed.
    ObjectStart,
    /// A property name has been consumed; its value is next.
    PropertyName,
    /// A non-negative integer value has been consumed.
    NumberValue,
    /// The literal `null` has been consumed.
    NullValue,
    /// A quoted value begins here; the opening quote is still unconsumed.
    StringStart,
    /// A quoted value has been fully consumed, including the closing quote.
    StringEnd,
    /// A closing `}` has been consumed; the object scope is finished.
    ObjectEnd,
}

//! A streaming, forward-only JSON reader and writer for documents that embed
//! large binary payloads as Base64 string values.
//!
//! Neither the document, nor any string, nor any payload is materialized in
//! memory: the reader tokenizes one lookahead character at a time and hands
//! binary fields back as a decoding byte stream, and the writer encodes
//! payloads inline as it copies them to the output. The price is a strict
//! protocol: properties must be read and written in exactly the order they
//! appear in the stream, and the supported value types are non-negative
//! integers, strings, `null`, binary payloads, and nested objects.
//!
//! # Examples
//!
//! ```rust
//! use std::io::{Cursor, Read};
//!
//! use jsonblob::{JsonReader, JsonWriter};
//!
//! # fn main() -> Result<(), jsonblob::Error> {
//! let mut out = Vec::new();
//! let mut writer = JsonWriter::new(&mut out);
//! writer.write_object_start()?;
//! writer.write_i32("id", Some(7))?;
//! writer.write_stream("payload", Some(&mut &b"hello"[..]))?;
//! writer.write_object_end()?;
//! writer.flush()?;
//!
//! let mut reader = JsonReader::new(Cursor::new(out));
//! assert_eq!(reader.read_i32("id")?, Some(7));
//! let mut payload = Vec::new();
//! reader.read_stream("payload")?.unwrap().read_to_end(&mut payload)?;
//! assert_eq!(payload, b"hello");
//! # Ok(())
//! # }
//! ```

mod base64;
mod error;
mod escape;
mod options;
mod reader;
mod source;
mod string_stream;
mod token;
mod writer;

#[cfg(test)]
mod tests;

pub use base64::{Base64Decoder, Base64Encoder, Base64Error};
pub use error::{Error, SyntaxError};
pub use options::ReaderOptions;
pub use reader::{BlobReader, JsonReader};
pub use string_stream::Base64StringSource;
pub use token::JsonToken;
pub use writer::JsonWriter;

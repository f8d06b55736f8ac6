//! Incremental JSON producer mirroring the reader's ordered-field protocol.
//!
//! The writer emits one JSON object front to back; its only state beyond the
//! sink is the last-emitted token, used to decide whether a separating comma
//! is due. Binary fields are pulled through the base64 encoder and copied
//! straight into the output, so a payload is never held in memory.

use std::io::{self, Read, Write};

use crate::base64::Base64Encoder;
use crate::error::Error;
use crate::token::JsonToken;

/// The sink is owned by the root writer; child writers borrow their
/// parent's for the duration of the nested scope.
#[derive(Debug)]
enum SinkHandle<'p, W> {
    Owned(W),
    Borrowed(&'p mut W),
}

impl<W> SinkHandle<'_, W> {
    fn get_mut(&mut self) -> &mut W {
        match self {
            SinkHandle::Owned(sink) => sink,
            SinkHandle::Borrowed(sink) => sink,
        }
    }
}

/// Forward-only writer for one JSON object scope.
///
/// Property values are written in the order the caller emits them; the
/// writer does not reorder, buffer, or validate against a schema. String
/// values are written as-is and must not require escaping; this is a
/// deliberate simplification, not a general-purpose JSON string writer.
///
/// # Examples
///
/// ```rust
/// use jsonblob::JsonWriter;
///
/// let mut out = Vec::new();
/// let mut writer = JsonWriter::new(&mut out);
/// writer.write_object_start().unwrap();
/// writer.write_i32("n", None).unwrap();
/// writer.write_object_end().unwrap();
/// writer.flush().unwrap();
/// assert_eq!(out, br#"{ "n": null }"#);
/// ```
#[derive(Debug)]
pub struct JsonWriter<'p, W> {
    sink: SinkHandle<'p, W>,
    token: JsonToken,
    /// Set on child writers; written when this scope ends so the parent
    /// resumes with correct separator state.
    parent_token: Option<&'p mut JsonToken>,
}

impl<'p, W: Write> JsonWriter<'p, W> {
    /// Creates a root writer over `output`.
    #[must_use]
    pub fn new(output: W) -> Self {
        Self {
            sink: SinkHandle::Owned(output),
            token: JsonToken::ObjectStart,
            parent_token: None,
        }
    }

    /// Emits the opening `{ `.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ObjectAlreadyStarted`] if any field has already
    /// been written.
    pub fn write_object_start(&mut self) -> Result<(), Error> {
        if self.token != JsonToken::ObjectStart {
            return Err(Error::ObjectAlreadyStarted);
        }
        self.sink.get_mut().write_all(b"{ ")?;
        Ok(())
    }

    /// Emits `"name": <value>`, writing `null` for `None`.
    ///
    /// # Errors
    ///
    /// Fails if the sink fails.
    pub fn write_i32(&mut self, property_name: &str, value: Option<i32>) -> Result<(), Error> {
        self.write_comma_if_due()?;
        let sink = self.sink.get_mut();
        match value {
            Some(value) => write!(sink, "\"{property_name}\": {value}")?,
            None => write!(sink, "\"{property_name}\": null")?,
        }
        self.token = JsonToken::NumberValue;
        Ok(())
    }

    /// Emits `"name": "value"`, writing `null` for `None`.
    ///
    /// The value is emitted verbatim; the caller is responsible for not
    /// passing text that needs JSON escaping.
    ///
    /// # Errors
    ///
    /// Fails if the sink fails.
    pub fn write_string(&mut self, property_name: &str, value: Option<&str>) -> Result<(), Error> {
        self.write_comma_if_due()?;
        let sink = self.sink.get_mut();
        match value {
            Some(value) => write!(sink, "\"{property_name}\": \"{value}\"")?,
            None => write!(sink, "\"{property_name}\": null")?,
        }
        self.token = JsonToken::StringEnd;
        Ok(())
    }

    /// Emits `"name": "<base64>"`, streaming the whole of `value` through
    /// the base64 encoder into the output, or `null` for `None`.
    ///
    /// # Errors
    ///
    /// Fails if the payload source or the sink fails.
    pub fn write_stream(
        &mut self,
        property_name: &str,
        value: Option<&mut dyn Read>,
    ) -> Result<(), Error> {
        self.write_comma_if_due()?;
        let sink = self.sink.get_mut();
        write!(sink, "\"{property_name}\": ")?;

        match value {
            None => sink.write_all(b"null")?,
            Some(source) => {
                sink.write_all(b"\"")?;
                let mut encoder = Base64Encoder::new(source);
                io::copy(&mut encoder, sink)?;
                sink.write_all(b"\"")?;
            }
        }

        self.token = JsonToken::StringEnd;
        Ok(())
    }

    /// Emits `"name": ` and returns a child writer for the nested object.
    ///
    /// The caller writes the child's `{ ... }` body through the child; the
    /// parent is statically unusable until the child is dropped, and the
    /// child's [`write_object_end`](Self::write_object_end) restores the
    /// parent's separator state.
    ///
    /// # Errors
    ///
    /// Fails if the sink fails.
    pub fn write_object(&mut self, property_name: &str) -> Result<JsonWriter<'_, W>, Error> {
        self.write_comma_if_due()?;
        let Self { sink, token, .. } = self;
        let sink = sink.get_mut();
        write!(sink, "\"{property_name}\": ")?;
        Ok(JsonWriter {
            sink: SinkHandle::Borrowed(sink),
            token: JsonToken::ObjectStart,
            parent_token: Some(token),
        })
    }

    /// Emits the closing ` }`.
    ///
    /// # Errors
    ///
    /// Fails if the sink fails.
    pub fn write_object_end(&mut self) -> Result<(), Error> {
        self.sink.get_mut().write_all(b" }")?;
        self.token = JsonToken::ObjectEnd;
        if let Some(parent) = self.parent_token.as_deref_mut() {
            *parent = JsonToken::ObjectEnd;
        }
        Ok(())
    }

    /// Flushes the sink.
    ///
    /// # Errors
    ///
    /// Fails if the sink fails.
    pub fn flush(&mut self) -> Result<(), Error> {
        self.sink.get_mut().flush()?;
        Ok(())
    }

    fn write_comma_if_due(&mut self) -> Result<(), Error> {
        if matches!(
            self.token,
            JsonToken::ObjectEnd | JsonToken::StringEnd | JsonToken::NumberValue
        ) {
            self.sink.get_mut().write_all(b", ")?;
        }
        Ok(())
    }
}

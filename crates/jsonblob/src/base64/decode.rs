use std::collections::VecDeque;
use std::io::{self, Read};

use super::{Base64Error, DECODED_BLOCK, ENCODED_BLOCK, decode_block, read_full};

/// Pull-based base64 decoder.
///
/// Reads encoded characters from an upstream [`Read`] in 4-character blocks
/// and yields the decoded bytes. A non-empty upstream read shorter than a
/// block is an error; an empty read ends the stream. A block carrying `=`
/// padding is the final block: after it, the upstream must report end of
/// input (that last read is also what lets a string boundary source consume
/// its closing quote). Decoded bytes beyond the caller's buffer are queued
/// and handed out on the next read, before any further upstream read.
#[derive(Debug)]
pub struct Base64Decoder<S> {
    upstream: S,
    overflow: VecDeque<u8>,
    finished: bool,
}

impl<S: Read> Base64Decoder<S> {
    /// Creates a decoder over `upstream`.
    #[must_use]
    pub fn new(upstream: S) -> Self {
        Self {
            upstream,
            overflow: VecDeque::new(),
            finished: false,
        }
    }
}

impl<S: Read> Read for Base64Decoder<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut written = 0;
        while written < buf.len() {
            if let Some(byte) = self.overflow.pop_front() {
                buf[written] = byte;
                written += 1;
                continue;
            }

            let mut block = [0u8; ENCODED_BLOCK];

            if self.finished {
                // the padded block already ended the stream; the upstream
                // must have nothing left beyond it
                if read_full(&mut self.upstream, &mut block)? != 0 {
                    return Err(Base64Error::TrailingData.into());
                }
                break;
            }

            let count = read_full(&mut self.upstream, &mut block)?;
            if count == 0 {
                break;
            }
            if count < ENCODED_BLOCK {
                return Err(Base64Error::TruncatedBlock.into());
            }

            let (bytes, len) = decode_block(&block)?;
            if len < DECODED_BLOCK {
                self.finished = true;
            }

            for &byte in &bytes[..len] {
                if written < buf.len() {
                    buf[written] = byte;
                    written += 1;
                } else {
                    self.overflow.push_back(byte);
                }
            }
        }

        Ok(written)
    }
}

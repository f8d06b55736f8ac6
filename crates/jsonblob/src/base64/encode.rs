use std::collections::VecDeque;
use std::io::{self, Read};

use super::{DECODED_BLOCK, encode_block, read_full};

/// Pull-based base64 encoder.
///
/// Reads raw bytes from an upstream [`Read`] in 3-byte blocks and yields the
/// encoded characters as bytes. The first upstream read that comes up short
/// (including empty) produces the final padded block and ends the stream.
/// Characters the caller did not have room for are queued and handed out on
/// the next read, before any further upstream read is issued.
#[derive(Debug)]
pub struct Base64Encoder<S> {
    upstream: S,
    overflow: VecDeque<u8>,
    finished: bool,
}

impl<S: Read> Base64Encoder<S> {
    /// Creates an encoder over `upstream`.
    #[must_use]
    pub fn new(upstream: S) -> Self {
        Self {
            upstream,
            overflow: VecDeque::new(),
            finished: false,
        }
    }
}

impl<S: Read> Read for Base64Encoder<S> {
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

            if self.finished {
                break;
            }

            let mut block = [0u8; DECODED_BLOCK];
            let count = read_full(&mut self.upstream, &mut block)?;
            if count < DECODED_BLOCK {
                // short read means the upstream ended; this block gets the
                // padding and no further upstream read is issued
                self.finished = true;
            }

            let (encoded, len) = encode_block(&block[..count]);
            for &byte in &encoded[..len] {
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

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::Base64Encoder;

    #[test]
    fn encodes_a_short_payload() {
        let mut encoder = Base64Encoder::new(&b"Hello"[..]);
        let mut out = String::new();
        encoder.read_to_string(&mut out).unwrap();
        assert_eq!(out, "SGVsbG8=");
    }

    #[test]
    fn empty_upstream_yields_an_empty_stream() {
        let mut encoder = Base64Encoder::new(std::io::empty());
        let mut out = Vec::new();
        assert_eq!(encoder.read_to_end(&mut out).unwrap(), 0);
    }

    #[test]
    fn single_byte_reads_drain_the_overflow_queue() {
        let mut encoder = Base64Encoder::new(&b"Hello"[..]);
        let mut out = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match encoder.read(&mut byte).unwrap() {
                0 => break,
                n => out.extend_from_slice(&byte[..n]),
            }
        }
        assert_eq!(out, b"SGVsbG8=");
    }

    #[test]
    fn exact_multiple_of_three_has_no_padding() {
        let mut encoder = Base64Encoder::new(&b"ABCDEF"[..]);
        let mut out = String::new();
        encoder.read_to_string(&mut out).unwrap();
        assert_eq!(out, "QUJDREVG");
    }
}

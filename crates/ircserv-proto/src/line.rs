//! Line-based codec for tokio.
//!
//! Reads newline-terminated lines and writes [`Message`]s followed by
//! `\r\n`. Decoded lines come back trimmed: the terminator, a stray `\r`
//! and surrounding spaces are removed, and embedded `\r`/NUL bytes are
//! dropped so they can never be relayed to other clients.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{ProtocolError, Result};
use crate::message::Message;

/// Default maximum line length in bytes, terminator included.
pub const DEFAULT_MAX_LINE_LEN: usize = 512;

/// Line-based codec that handles newline-terminated messages.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
}

impl LineCodec {
    /// Create a codec with the default 512-byte limit.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }

    fn clean(raw: &[u8]) -> String {
        let text = String::from_utf8_lossy(raw);
        let text: String = text.chars().filter(|c| *c != '\r' && *c != '\0').collect();
        text.trim_matches(|c| c == ' ' || c == '\n').to_string()
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if line.len() > self.max_len {
                return Err(ProtocolError::MessageTooLong {
                    actual: line.len(),
                    limit: self.max_len,
                });
            }

            Ok(Some(Self::clean(&line)))
        } else {
            // No complete line yet - remember where we stopped
            self.next_index = src.len();

            if src.len() > self.max_len {
                return Err(ProtocolError::MessageTooLong {
                    actual: src.len(),
                    limit: self.max_len,
                });
            }

            Ok(None)
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None => {
                // An unterminated tail is not a message.
                src.clear();
                self.next_index = 0;
                Ok(None)
            }
        }
    }
}

impl Encoder<Message> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> Result<()> {
        let line = msg.to_string();
        dst.reserve(line.len() + 2);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}

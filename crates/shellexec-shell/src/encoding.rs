//! Incremental decoding of child output bytes
//!
//! Output arrives in arbitrary read-sized pieces, so a multi-byte UTF-8
//! character can straddle two reads. [`StreamDecoder`] holds back an
//! incomplete trailing sequence until the next read completes it. Malformed
//! bytes never abort execution: they are replaced with U+FFFD and logged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ShellError;

/// Text encoding used to decode child output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    #[serde(alias = "utf-8")]
    Utf8,
    /// ISO-8859-1: every byte is one character, decoding cannot fail
    #[serde(alias = "latin-1", alias = "iso-8859-1")]
    Latin1,
}

impl Encoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Latin1 => "latin1",
        }
    }

    /// Fresh decoder for one stream
    pub fn decoder(self) -> StreamDecoder {
        StreamDecoder::new(self)
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Encoding::Latin1),
            _ => Err(ShellError::InvalidConfig(format!("unknown encoding '{}'", s))),
        }
    }
}

/// Stateful decoder for a single byte stream
#[derive(Debug)]
pub struct StreamDecoder {
    encoding: Encoding,
    /// Bytes of an incomplete UTF-8 sequence carried over from the last read
    pending: Vec<u8>,
}

impl StreamDecoder {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            pending: Vec::new(),
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Decode the next piece of the stream
    ///
    /// May return an empty string when the whole piece is the start of a
    /// character that has not been completed yet.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        match self.encoding {
            Encoding::Utf8 => self.decode_utf8(bytes),
            Encoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }

    /// Flush whatever is still held back at end of stream
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }

        warn!(
            encoding = %self.encoding,
            bytes = self.pending.len(),
            "Stream ended inside a multi-byte character"
        );
        let tail = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        tail
    }

    fn decode_utf8(&mut self, bytes: &[u8]) -> String {
        let buffer = if self.pending.is_empty() {
            bytes.to_vec()
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(bytes);
            joined
        };

        let mut decoded = String::with_capacity(buffer.len());
        let mut rest = buffer.as_slice();
        let mut replaced = 0usize;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    decoded.push_str(valid);
                    rest = &[];
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    decoded.push_str(&String::from_utf8_lossy(valid));

                    match err.error_len() {
                        Some(len) => {
                            decoded.push(char::REPLACEMENT_CHARACTER);
                            replaced += 1;
                            rest = &after[len..];
                        }
                        None => {
                            // Incomplete sequence at the end, wait for more bytes
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }

        if replaced > 0 {
            warn!(
                encoding = %self.encoding,
                replaced,
                "Replaced malformed bytes in command output"
            );
        }

        self.pending = rest.to_vec();
        decoded
    }
}

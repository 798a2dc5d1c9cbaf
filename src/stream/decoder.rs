//! Incremental UTF-8 decoding for chunked response bodies.
//!
//! Network chunk boundaries do not respect character boundaries, so a
//! multi-byte sequence may be split across two chunks. The decoder carries
//! the incomplete tail of one `decode` call into the next instead of
//! re-decoding the whole accumulated body each time.

/// Stateful UTF-8 decoder.
///
/// Holds at most the trailing bytes of one incomplete multi-byte sequence
/// between calls. Invalid (as opposed to incomplete) sequences are replaced
/// with U+FFFD and decoding continues.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a new decoder with no pending bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, prepending any bytes held over from the previous call.
    ///
    /// An incomplete multi-byte sequence at the end of the chunk is stashed
    /// for the next call rather than emitted.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();
        while !rest.is_empty() {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    rest = &[];
                }
                Err(err) => {
                    let (valid, tail) = rest.split_at(err.valid_up_to());
                    if let Ok(valid) = std::str::from_utf8(valid) {
                        out.push_str(valid);
                    }
                    match err.error_len() {
                        // Genuinely invalid bytes: substitute and move on.
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[len..];
                        }
                        // Incomplete sequence at the end of input: keep it
                        // for the next chunk.
                        None => {
                            self.pending = tail.to_vec();
                            rest = &[];
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush the decoder at end of stream.
    ///
    /// A dangling incomplete sequence can never be completed once the stream
    /// is closed, so it decodes to a single replacement character.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(b"data: {}\n"), "data: {}\n");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        // U+00E9 (é) is 0xC3 0xA9; split it between two chunks.
        let mut decoder = Utf8Decoder::new();
        let first = decoder.decode(&[b'a', 0xC3]);
        let second = decoder.decode(&[0xA9, b'b']);
        assert_eq!(first, "a");
        assert_eq!(second, "\u{e9}b");
    }

    #[test]
    fn test_four_byte_sequence_split_three_ways() {
        // U+1F697 (🚗) is F0 9F 9A 97.
        let bytes = "🚗".as_bytes();
        let mut decoder = Utf8Decoder::new();
        let mut out = String::new();
        out.push_str(&decoder.decode(&bytes[..1]));
        out.push_str(&decoder.decode(&bytes[1..3]));
        out.push_str(&decoder.decode(&bytes[3..]));
        out.push_str(&decoder.finish());
        assert_eq!(out, "🚗");
    }

    #[test]
    fn test_invalid_byte_replaced() {
        let mut decoder = Utf8Decoder::new();
        let out = decoder.decode(&[b'a', 0xFF, b'b']);
        assert_eq!(out, "a\u{fffd}b");
    }

    #[test]
    fn test_finish_flushes_dangling_sequence() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.decode(&[0xC3]), "");
        assert_eq!(decoder.finish(), "\u{fffd}");
        // Decoder is reusable after finish.
        assert_eq!(decoder.decode(b"ok"), "ok");
    }
}

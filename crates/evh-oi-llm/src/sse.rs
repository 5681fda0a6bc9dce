//! Line-oriented decoding of `text/event-stream` bodies.
//!
//! Two producers share this code: the upstream completion API (OpenAI
//! `choices[0].delta.content` frames) and our own chat relay, which emits
//! `data: {"content": "…"}` frames that clients fold into a running answer.

use serde::Serialize;

const DATA_PREFIX: &str = "data:";
const DONE_MARKER: &str = "[DONE]";

/// Splits a byte stream into complete lines. A line cut in half by a chunk
/// boundary is held back until its newline arrives.
#[derive(Debug, Default)]
pub struct SseLineDecoder {
    pending: Vec<u8>,
}

impl SseLineDecoder {
    /// Feed one chunk; returns every line it completed, without terminators.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(decode_line(&raw));
        }
        lines
    }

    /// Flush a trailing line that never got its newline.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let raw = std::mem::take(&mut self.pending);
        Some(decode_line(&raw))
    }
}

fn decode_line(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    text.trim_end_matches(['\n', '\r']).to_string()
}

/// Payload of a `data:` line, or `None` for comments, event names and blanks.
pub fn data_payload(line: &str) -> Option<&str> {
    line.strip_prefix(DATA_PREFIX).map(str::trim_start)
}

/// Text delta carried by one upstream OpenAI stream line.
pub fn parse_openai_delta(line: &str) -> Option<String> {
    let payload = data_payload(line)?;
    if payload == DONE_MARKER {
        return None;
    }
    let json: serde_json::Value = serde_json::from_str(payload).ok()?;
    json["choices"][0]["delta"]["content"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Serialize)]
struct ContentFrame<'a> {
    content: &'a str,
}

/// JSON body of one relay frame: `{"content":"<fragment>"}`.
pub fn content_frame(fragment: &str) -> String {
    serde_json::to_string(&ContentFrame { content: fragment })
        .unwrap_or_else(|_| String::from("{\"content\":\"\"}"))
}

/// Content fragment carried by one relay line.
pub fn parse_content_frame(line: &str) -> Option<String> {
    let payload = data_payload(line)?;
    let json: serde_json::Value = serde_json::from_str(payload).ok()?;
    json["content"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Client side of the chat relay. Folds `data: {"content": …}` frames into
/// the assistant's running answer; anything else on the wire is skipped.
#[derive(Debug, Default)]
pub struct ChatStreamAccumulator {
    decoder: SseLineDecoder,
    text: String,
}

impl ChatStreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk. Returns true when the buffer grew.
    pub fn push(&mut self, chunk: &[u8]) -> bool {
        let before = self.text.len();
        for line in self.decoder.push(chunk) {
            if let Some(fragment) = parse_content_frame(&line) {
                self.text.push_str(&fragment);
            }
        }
        self.text.len() > before
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the accumulator, folding in any unterminated final line.
    pub fn finish(mut self) -> String {
        if let Some(fragment) = self.decoder.finish().and_then(|l| parse_content_frame(&l)) {
            self.text.push_str(&fragment);
        }
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_holds_partial_lines() {
        let mut d = SseLineDecoder::default();
        assert!(d.push(b"data: {\"con").is_empty());
        assert_eq!(d.push(b"tent\":\"a\"}\n\nda"), vec!["data: {\"content\":\"a\"}", ""]);
        assert_eq!(d.finish().as_deref(), Some("da"));
        assert!(d.finish().is_none());
    }

    #[test]
    fn test_decoder_strips_crlf() {
        let mut d = SseLineDecoder::default();
        assert_eq!(d.push(b"data: x\r\n"), vec!["data: x"]);
    }

    #[test]
    fn test_decoder_keeps_multibyte_chars_split_across_chunks() {
        let bytes = "data: {\"content\":\"→\"}\n".as_bytes();
        let split = bytes.iter().position(|b| *b == 0xE2).unwrap() + 1;
        let mut acc = ChatStreamAccumulator::new();
        acc.push(&bytes[..split]);
        acc.push(&bytes[split..]);
        assert_eq!(acc.text(), "→");
    }

    #[test]
    fn test_openai_delta_parsing() {
        assert_eq!(
            parse_openai_delta(r#"data: {"choices":[{"delta":{"content":"Hel"}}]}"#).as_deref(),
            Some("Hel")
        );
        assert!(parse_openai_delta("data: [DONE]").is_none());
        assert!(parse_openai_delta(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#).is_none());
        assert!(parse_openai_delta(": keep-alive").is_none());
    }

    #[test]
    fn test_content_frame_escapes_quotes() {
        let frame = content_frame("say \"hi\"\n");
        assert_eq!(frame, r#"{"content":"say \"hi\"\n"}"#);
        assert_eq!(parse_content_frame(&format!("data: {frame}")).as_deref(), Some("say \"hi\"\n"));
    }

    #[test]
    fn test_accumulator_joins_chunks_and_skips_noise() {
        let mut acc = ChatStreamAccumulator::new();
        assert!(acc.push(b"data: {\"content\":\"The term \"}\n"));
        assert!(!acc.push(b"data: not json\n: comment\nevent: ping\n"));
        assert!(acc.push(b"data: {\"content\":\"is two\"}\ndata: {\"content\":\" years.\"}\n"));
        assert!(!acc.push(b"data: {\"other\":1}\n"));
        assert_eq!(acc.text(), "The term is two years.");
    }

    #[test]
    fn test_accumulator_finish_flushes_unterminated_line() {
        let mut acc = ChatStreamAccumulator::new();
        acc.push(b"data: {\"content\":\"a\"}\ndata: {\"content\":\"b\"}");
        assert_eq!(acc.text(), "a");
        assert_eq!(acc.finish(), "ab");
    }
}

//! Server-sent event decoding for streamed completions
//!
//! Bytes arrive in arbitrary chunks; only complete lines are interpreted.

use super::types::ChatChunk;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    Delta(String),
    Done,
    Malformed(String),
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Feed raw bytes, returning the events completed by them
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=end).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(event) = Self::parse_line(line.trim()) {
                events.push(event);
            }
        }
        events
    }

    fn parse_line(line: &str) -> Option<SseEvent> {
        let data = line.strip_prefix("data:")?.trim_start();
        if data == "[DONE]" {
            return Some(SseEvent::Done);
        }
        match serde_json::from_str::<ChatChunk>(data) {
            Ok(chunk) => chunk.into_text().map(SseEvent::Delta),
            Err(e) => Some(SseEvent::Malformed(format!("Failed to parse stream chunk: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"index\":0,\"delta\":{{\"content\":{}}}}}]}}\n\n",
            serde_json::to_string(text).unwrap()
        )
    }

    #[test]
    fn test_lines_split_across_reads() {
        let mut decoder = SseDecoder::default();
        let payload = chunk("Hello");
        let (a, b) = payload.split_at(10);

        assert!(decoder.feed(a.as_bytes()).is_empty());
        assert_eq!(
            decoder.feed(b.as_bytes()),
            vec![SseEvent::Delta("Hello".to_string())]
        );
    }

    #[test]
    fn test_multibyte_text_survives_split() {
        let mut decoder = SseDecoder::default();
        let payload = chunk("café ☕");
        let bytes = payload.as_bytes();
        let cut = payload.find('☕').unwrap() + 1;

        let mut events = decoder.feed(&bytes[..cut]);
        events.extend(decoder.feed(&bytes[cut..]));
        assert_eq!(events, vec![SseEvent::Delta("café ☕".to_string())]);
    }

    #[test]
    fn test_done_comments_and_role_only_chunks() {
        let mut decoder = SseDecoder::default();
        let input = concat!(
            ": keep-alive\n",
            "data: {\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"ok\"}}]}\n\n",
            "data: [DONE]\n\n",
        );

        assert_eq!(
            decoder.feed(input.as_bytes()),
            vec![SseEvent::Delta("ok".to_string()), SseEvent::Done]
        );
    }

    #[test]
    fn test_garbage_payload_is_malformed() {
        let mut decoder = SseDecoder::default();
        let events = decoder.feed(b"data: {not json\n");
        assert!(matches!(&events[0], SseEvent::Malformed(_)));
    }
}

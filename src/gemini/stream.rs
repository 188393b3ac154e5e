//! SSE decoding for `streamGenerateContent`.
//!
//! The wire sends one `data:` line per generation chunk; each payload is a
//! complete [`GenerateContentResponse`]. Decoding turns the byte stream into
//! a lazy sequence of text fragments in arrival order.

use std::pin::Pin;

use bytes::BytesMut;
use futures::{Stream, StreamExt, future, stream};

use super::wire::GenerateContentResponse;
use crate::core::error::ApiError;

/// A lazy, finite, non-restartable sequence of reply fragments. Dropping it
/// early closes the underlying connection.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, ApiError>> + Send>>;

/// Incremental line decoder for an SSE body. Network chunks may split an
/// event anywhere, so bytes are buffered until a full line is available.
#[derive(Default)]
struct SseDecoder {
    buf: BytesMut,
}

impl SseDecoder {
    /// Feed one network chunk and return the payload of every `data:` line
    /// it completed. Other SSE fields and blank separator lines are skipped.
    fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line = self.buf.split_to(pos + 1);
            let line = &line[..line.len() - 1];
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            let line = String::from_utf8_lossy(line);
            if let Some(data) = line.strip_prefix("data:") {
                events.push(data.trim_start().to_string());
            }
        }
        events
    }
}

/// Decode an SSE response body into per-chunk reply text.
pub(crate) fn decode_sse_body<B, E>(body: B) -> TextStream
where
    B: Stream<Item = Result<bytes::Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let events = body
        .scan(SseDecoder::default(), |decoder, chunk| {
            let out: Vec<Result<String, ApiError>> = match chunk {
                Ok(bytes) => decoder.feed(&bytes).into_iter().map(Ok).collect(),
                Err(err) => vec![Err(ApiError::Network {
                    message: format!("stream interrupted: {err}"),
                    source: Box::new(err),
                })],
            };
            future::ready(Some(stream::iter(out)))
        })
        .flatten();

    let fragments = events.map(|event| {
        let event = event?;
        let chunk: GenerateContentResponse =
            serde_json::from_str(&event).map_err(|_| ApiError::Stream {
                message: format!("undecodable stream event: {event}"),
            })?;
        Ok(chunk.text())
    });

    Box::pin(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::convert::Infallible;

    fn data_event(text: &str) -> String {
        format!(
            "data: {{\"candidates\":[{{\"content\":{{\"role\":\"model\",\"parts\":[{{\"text\":\"{text}\"}}]}}}}]}}\r\n\r\n"
        )
    }

    async fn collect(stream: TextStream) -> Vec<Result<String, ApiError>> {
        stream.collect().await
    }

    #[test]
    fn decoder_reassembles_lines_split_across_chunks() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.feed(b"data: {\"a\":").is_empty());
        let events = decoder.feed(b" 1}\n");
        assert_eq!(events, vec!["{\"a\": 1}".to_string()]);
    }

    #[test]
    fn decoder_skips_non_data_fields_and_blank_lines() {
        let mut decoder = SseDecoder::default();
        let events = decoder.feed(b"event: ping\r\n\r\ndata: one\n\ndata: two\n");
        assert_eq!(events, vec!["one".to_string(), "two".to_string()]);
    }

    #[tokio::test]
    async fn body_decodes_fragments_in_arrival_order() {
        let chunks = vec![
            Ok::<_, Infallible>(Bytes::from(data_event("1,"))),
            Ok(Bytes::from(format!("{}{}", data_event("2,"), data_event("3")))),
        ];
        let fragments = collect(decode_sse_body(stream::iter(chunks))).await;

        let texts: Vec<String> = fragments.into_iter().map(|f| f.unwrap()).collect();
        assert_eq!(texts, vec!["1,", "2,", "3"]);
    }

    #[tokio::test]
    async fn undecodable_event_surfaces_as_stream_error() {
        let chunks = vec![
            Ok::<_, Infallible>(Bytes::from(data_event("ok"))),
            Ok(Bytes::from("data: {not json\n\n".to_string())),
        ];
        let fragments = collect(decode_sse_body(stream::iter(chunks))).await;

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].as_deref().unwrap(), "ok");
        assert!(matches!(fragments[1], Err(ApiError::Stream { .. })));
    }

    #[tokio::test]
    async fn transport_error_mid_stream_surfaces_as_network_error() {
        let chunks = vec![
            Ok(Bytes::from(data_event("ok"))),
            Err(std::io::Error::other("connection reset")),
        ];
        let fragments = collect(decode_sse_body(stream::iter(chunks))).await;

        assert_eq!(fragments.len(), 2);
        assert!(matches!(fragments[1], Err(ApiError::Network { .. })));
    }
}

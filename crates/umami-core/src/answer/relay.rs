//! Relay of provider events into answer frames.
//!
//! Whatever the provider stream does, the relayed stream ends with exactly
//! one terminal frame: `Done` after a clean finish, `Failed` after the first
//! provider error. Fragments already yielded are never retracted.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{Instrument, Span};

use umami_types::llm::StreamEvent;

use crate::llm::provider::LlmEventStream;

/// One frame of a streamed answer as seen by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerFrame {
    Fragment(String),
    Done,
    Failed,
}

impl AnswerFrame {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AnswerFrame::Fragment(_))
    }
}

pub type AnswerStream = Pin<Box<dyn Stream<Item = AnswerFrame> + Send + 'static>>;

/// Map provider events to answer frames, closing with one terminal frame.
pub fn relay(mut events: LlmEventStream) -> AnswerStream {
    Box::pin(async_stream::stream! {
        let mut fragments = 0usize;
        while let Some(event) = events.next().await {
            match event {
                Ok(StreamEvent::TextDelta { text, .. }) => {
                    if text.is_empty() {
                        continue;
                    }
                    fragments += 1;
                    yield AnswerFrame::Fragment(text);
                }
                Ok(StreamEvent::Usage(usage)) => {
                    tracing::debug!(
                        input_tokens = usage.input_tokens,
                        output_tokens = usage.output_tokens,
                        "Answer token usage"
                    );
                }
                Ok(StreamEvent::MessageDelta { stop_reason }) => {
                    tracing::debug!(%stop_reason, "Answer finished");
                }
                Ok(StreamEvent::Done) => break,
                Ok(StreamEvent::Connected) => {}
                Err(e) => {
                    tracing::error!(error = %e, fragments, "Provider failed mid-stream");
                    yield AnswerFrame::Failed;
                    return;
                }
            }
        }
        tracing::debug!(fragments, "Answer stream complete");
        yield AnswerFrame::Done;
    })
}

/// Drive `frames` to completion on its own task, forwarding each frame to
/// the returned receiver.
///
/// The task keeps draining after the receiver is dropped, so a client that
/// disconnects never cancels the provider call.
pub fn spawn_relay(mut frames: AnswerStream, span: Span) -> mpsc::Receiver<AnswerFrame> {
    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(
        async move {
            let mut receiver_gone = false;
            while let Some(frame) = frames.next().await {
                if receiver_gone {
                    continue;
                }
                if tx.send(frame).await.is_err() {
                    tracing::debug!("Client disconnected, draining answer without relaying");
                    receiver_gone = true;
                }
            }
        }
        .instrument(span),
    );
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use umami_types::llm::{LlmError, StopReason};

    fn delta(text: &str) -> Result<StreamEvent, LlmError> {
        Ok(StreamEvent::TextDelta {
            index: 0,
            text: text.to_string(),
        })
    }

    async fn collect(events: Vec<Result<StreamEvent, LlmError>>) -> Vec<AnswerFrame> {
        relay(Box::pin(stream::iter(events))).collect().await
    }

    #[tokio::test]
    async fn test_relay_fragments_then_done() {
        let frames = collect(vec![
            Ok(StreamEvent::Connected),
            delta("We "),
            delta(""),
            delta("suggest "),
            Ok(StreamEvent::MessageDelta {
                stop_reason: StopReason::EndTurn,
            }),
            delta("the soup."),
            Ok(StreamEvent::Done),
            delta("after done"),
        ])
        .await;

        assert_eq!(
            frames,
            vec![
                AnswerFrame::Fragment("We ".to_string()),
                AnswerFrame::Fragment("suggest ".to_string()),
                AnswerFrame::Fragment("the soup.".to_string()),
                AnswerFrame::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_relay_stream_end_without_done_still_terminates() {
        let frames = collect(vec![delta("Hi")]).await;
        assert_eq!(frames.last(), Some(&AnswerFrame::Done));
        assert_eq!(frames.iter().filter(|f| f.is_terminal()).count(), 1);
    }

    #[tokio::test]
    async fn test_relay_error_is_single_terminal_frame() {
        let frames = collect(vec![
            delta("partial"),
            Err(LlmError::Stream("connection reset".to_string())),
            delta("never"),
        ])
        .await;

        assert_eq!(
            frames,
            vec![AnswerFrame::Fragment("partial".to_string()), AnswerFrame::Failed]
        );
    }

    #[tokio::test]
    async fn test_spawn_relay_forwards_frames() {
        let frames = relay(Box::pin(stream::iter(vec![delta("a"), delta("b")])));
        let mut rx = spawn_relay(frames, Span::none());

        let mut received = Vec::new();
        while let Some(frame) = rx.recv().await {
            received.push(frame);
        }
        assert_eq!(
            received,
            vec![
                AnswerFrame::Fragment("a".to_string()),
                AnswerFrame::Fragment("b".to_string()),
                AnswerFrame::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_spawn_relay_drains_after_receiver_drops() {
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();
        let events = stream::iter(0..200).map(move |i| {
            let _ = seen_tx.send(i);
            delta("x")
        });
        let rx = spawn_relay(relay(Box::pin(events)), Span::none());
        drop(rx);

        let mut last = None;
        while let Some(i) = seen_rx.recv().await {
            last = Some(i);
        }
        assert_eq!(last, Some(199));
    }
}

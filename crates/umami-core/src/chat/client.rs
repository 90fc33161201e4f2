//! Streaming chat client.
//!
//! Per turn: Idle -> Sending (request issued) -> Streaming (first frame
//! seen) -> Idle. A `Done` frame commits the pending answer; a transport
//! error, an unexpected end of stream or cancellation aborts it. Nothing is
//! retried.

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

use umami_types::chat::{ChatFrame, ChatRequest};
use umami_types::error::{ChatClientError, TransportError};
use umami_types::locale::Locale;

use super::session::ChatSession;
use super::transport::ChatTransport;

/// Where the client is within the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPhase {
    Idle,
    Sending,
    Streaming,
}

/// How a submitted turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input. Nothing was appended and no request was sent.
    Ignored,
    /// The answer was committed to the session.
    Completed(String),
    /// The cancellation token fired; the partial answer was discarded.
    Cancelled,
}

/// Per-session request fields sent alongside every question.
#[derive(Debug, Clone, Default)]
pub struct TurnContext {
    pub restaurant_id: Option<String>,
    pub restaurant_name: Option<String>,
    pub locale: Locale,
}

enum Step {
    Cancelled,
    Frame(Option<Result<ChatFrame, TransportError>>),
}

pub struct StreamingChatClient<T> {
    transport: T,
    session: ChatSession,
    context: TurnContext,
    phase: ClientPhase,
    cancel: Option<CancellationToken>,
}

impl<T: ChatTransport> StreamingChatClient<T> {
    pub fn new(transport: T, session: ChatSession, context: TurnContext) -> Self {
        Self {
            transport,
            session,
            context,
            phase: ClientPhase::Idle,
            cancel: None,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn phase(&self) -> ClientPhase {
        self.phase
    }

    /// Switch the answer language for subsequent turns.
    pub fn set_locale(&mut self, locale: Locale) {
        self.context.locale = locale;
    }

    /// Replace the session, e.g. to start over with a fresh greeting.
    /// Any in-flight turn is cancelled first.
    pub fn reset_session(&mut self, session: ChatSession) {
        self.abort();
        self.session = session;
    }

    /// Token of the in-flight request, if any.
    pub fn cancel_handle(&self) -> Option<CancellationToken> {
        self.cancel.clone()
    }

    /// Cancel the in-flight request and discard its partial answer.
    ///
    /// Needed when a `submit` future is dropped before finishing, which
    /// leaves the pending buffer open.
    pub fn abort(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.session.abort_pending();
        self.phase = ClientPhase::Idle;
    }

    /// Submit one question with a fresh cancellation token.
    pub async fn submit(&mut self, input: &str) -> Result<TurnOutcome, ChatClientError> {
        self.submit_with(input, CancellationToken::new(), |_| {}).await
    }

    /// Submit one question.
    ///
    /// `cancel` aborts the turn when fired; keep a clone to cancel from
    /// elsewhere. `on_fragment` sees every fragment in delivery order.
    pub async fn submit_with<F>(
        &mut self,
        input: &str,
        cancel: CancellationToken,
        mut on_fragment: F,
    ) -> Result<TurnOutcome, ChatClientError>
    where
        F: FnMut(&str),
    {
        let question = input.trim();
        if question.is_empty() {
            return Ok(TurnOutcome::Ignored);
        }
        if self.session.is_pending() {
            return Err(ChatClientError::Busy);
        }

        let request = ChatRequest {
            question: question.to_string(),
            history: self.session.history().to_vec(),
            id: self.context.restaurant_id.clone(),
            restaurant_name: self.context.restaurant_name.clone(),
            language: Some(self.context.locale.tag().to_string()),
        };
        self.session.append_user_turn(question);
        self.session.begin_pending()?;
        self.cancel = Some(cancel.clone());
        self.phase = ClientPhase::Sending;
        tracing::debug!(history_len = request.history.len(), "Submitting chat turn");

        let mut frames = self.transport.open(request);
        let result = loop {
            let step = tokio::select! {
                biased;
                _ = cancel.cancelled() => Step::Cancelled,
                frame = frames.next() => Step::Frame(frame),
            };

            match step {
                Step::Cancelled => {
                    tracing::debug!("Chat turn cancelled");
                    self.session.abort_pending();
                    break Ok(TurnOutcome::Cancelled);
                }
                Step::Frame(Some(Ok(ChatFrame::Fragment(text)))) => {
                    self.phase = ClientPhase::Streaming;
                    self.session.append_pending_fragment(&text);
                    on_fragment(&text);
                }
                Step::Frame(Some(Ok(ChatFrame::Done))) => {
                    break self
                        .session
                        .commit_pending()
                        .map(TurnOutcome::Completed)
                        .map_err(ChatClientError::from);
                }
                Step::Frame(Some(Err(e))) => {
                    tracing::warn!(error = %e, "Chat stream failed");
                    self.session.abort_pending();
                    break Err(e.into());
                }
                Step::Frame(None) => {
                    tracing::warn!("Chat stream closed before the terminal event");
                    self.session.abort_pending();
                    break Err(TransportError::UnexpectedEnd.into());
                }
            }
        };

        drop(frames);
        self.cancel = None;
        self.phase = ClientPhase::Idle;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use futures_util::stream;
    use umami_types::chat::{HistoryPair, Turn};

    use crate::chat::transport::FrameStream;

    type Script = Vec<Result<ChatFrame, TransportError>>;

    /// Plays back one scripted response per request. `hang` keeps the stream
    /// open after the script runs out.
    #[derive(Clone, Default)]
    struct ScriptedTransport {
        scripts: Arc<Mutex<VecDeque<Script>>>,
        requests: Arc<Mutex<Vec<ChatRequest>>>,
        hang: bool,
    }

    impl ScriptedTransport {
        fn with(scripts: Vec<Script>) -> Self {
            Self {
                scripts: Arc::new(Mutex::new(scripts.into())),
                ..Default::default()
            }
        }
    }

    impl ChatTransport for ScriptedTransport {
        fn open(&self, request: ChatRequest) -> FrameStream {
            self.requests.lock().unwrap().push(request);
            let script = self.scripts.lock().unwrap().pop_front().unwrap_or_default();
            if self.hang {
                Box::pin(stream::iter(script).chain(stream::pending()))
            } else {
                Box::pin(stream::iter(script))
            }
        }
    }

    fn fragment(text: &str) -> Result<ChatFrame, TransportError> {
        Ok(ChatFrame::Fragment(text.to_string()))
    }

    fn client(transport: ScriptedTransport) -> StreamingChatClient<ScriptedTransport> {
        StreamingChatClient::new(
            transport,
            ChatSession::new("Hello!", Vec::new()),
            TurnContext {
                restaurant_id: Some("R1".to_string()),
                restaurant_name: Some("Sushi Ten".to_string()),
                locale: Locale::Ja,
            },
        )
    }

    #[tokio::test]
    async fn test_completed_turn_commits_answer() {
        let transport = ScriptedTransport::with(vec![vec![
            fragment("We "),
            fragment("suggest "),
            fragment("the soup."),
            Ok(ChatFrame::Done),
        ]]);
        let requests = transport.requests.clone();
        let mut client = client(transport);

        let mut seen = Vec::new();
        let outcome = client
            .submit_with("  What do you recommend?  ", CancellationToken::new(), |f| {
                seen.push(f.to_string())
            })
            .await
            .unwrap();

        assert_eq!(outcome, TurnOutcome::Completed("We suggest the soup.".to_string()));
        assert_eq!(seen, vec!["We ", "suggest ", "the soup."]);
        assert_eq!(
            client.session().transcript().last(),
            Some(&Turn::assistant("We suggest the soup."))
        );
        assert_eq!(
            client.session().history(),
            [HistoryPair::new("What do you recommend?", "We suggest the soup.")]
        );
        assert_eq!(client.phase(), ClientPhase::Idle);

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].question, "What do you recommend?");
        assert_eq!(requests[0].id.as_deref(), Some("R1"));
        assert_eq!(requests[0].restaurant_name.as_deref(), Some("Sushi Ten"));
        assert_eq!(requests[0].language.as_deref(), Some("ja"));
        assert!(requests[0].history.is_empty());
    }

    #[tokio::test]
    async fn test_history_snapshot_excludes_current_turn() {
        let transport = ScriptedTransport::with(vec![
            vec![fragment("A1"), Ok(ChatFrame::Done)],
            vec![fragment("A2"), Ok(ChatFrame::Done)],
        ]);
        let requests = transport.requests.clone();
        let mut client = client(transport);

        client.submit("Q1").await.unwrap();
        client.submit("Q2").await.unwrap();

        let requests = requests.lock().unwrap();
        assert_eq!(requests[1].history, vec![HistoryPair::new("Q1", "A1")]);
        assert_eq!(client.session().transcript().len(), 5);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let transport = ScriptedTransport::default();
        let requests = transport.requests.clone();
        let mut client = client(transport);

        assert_eq!(client.submit("   \n\t").await.unwrap(), TurnOutcome::Ignored);
        assert_eq!(client.submit("").await.unwrap(), TurnOutcome::Ignored);
        assert_eq!(client.session().transcript().len(), 1);
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_aborts_turn() {
        let transport = ScriptedTransport::with(vec![vec![
            fragment("partial"),
            Err(TransportError::Stream("reset".to_string())),
        ]]);
        let mut client = client(transport);

        let err = client.submit("Q").await.unwrap_err();
        assert!(matches!(err, ChatClientError::Transport(TransportError::Stream(_))));
        assert!(!client.session().is_pending());
        assert!(client.session().history().is_empty());
        // greeting + user turn, no assistant turn
        assert_eq!(client.session().transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_stream_end_without_done_aborts_turn() {
        let transport = ScriptedTransport::with(vec![vec![fragment("cut off")]]);
        let mut client = client(transport);

        let err = client.submit("Q").await.unwrap_err();
        assert!(matches!(err, ChatClientError::Transport(TransportError::UnexpectedEnd)));
        assert!(client.session().pending().is_none());
    }

    #[tokio::test]
    async fn test_cancel_before_first_frame() {
        let transport = ScriptedTransport {
            hang: true,
            ..Default::default()
        };
        let mut client = client(transport);

        let token = CancellationToken::new();
        token.cancel();
        let outcome = client.submit_with("Q", token, |_| {}).await.unwrap();

        assert_eq!(outcome, TurnOutcome::Cancelled);
        assert!(!client.session().is_pending());
        assert!(client.cancel_handle().is_none());
    }

    #[tokio::test]
    async fn test_cancel_mid_stream_discards_partial_answer() {
        let transport = ScriptedTransport {
            hang: true,
            ..ScriptedTransport::with(vec![vec![fragment("We ")]])
        };
        let mut client = client(transport);

        let token = CancellationToken::new();
        let trigger = token.clone();
        let outcome = client
            .submit_with("Q", token, move |_| trigger.cancel())
            .await
            .unwrap();

        assert_eq!(outcome, TurnOutcome::Cancelled);
        assert!(client.session().history().is_empty());
        assert!(client.session().pending().is_none());

        client.reset_session(ChatSession::new("Hi again", Vec::new()));
        assert_eq!(client.session().transcript(), [Turn::assistant("Hi again")]);
    }

    #[tokio::test]
    async fn test_busy_when_pending_left_open() {
        let transport = ScriptedTransport {
            hang: true,
            ..ScriptedTransport::with(vec![vec![fragment("slow")]])
        };
        let mut client = client(transport);

        // Dropping the future mid-turn leaves the buffer open.
        let _ = tokio::time::timeout(std::time::Duration::from_millis(20), client.submit("Q1")).await;
        assert!(client.session().is_pending());
        assert!(matches!(client.submit("Q2").await, Err(ChatClientError::Busy)));

        client.abort();
        assert!(!client.session().is_pending());
        assert_eq!(client.phase(), ClientPhase::Idle);
    }
}

//! HTTP/SSE implementation of [`ChatTransport`].
//!
//! Posts the request to `{base_url}/api/chat` and decodes the event stream:
//! `{"data": ...}` events become fragments, `[DONE]` ends the stream, and an
//! event named `error` surfaces as [`TransportError::Server`]. Reconnects
//! are disabled; one call is one request.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest_eventsource::{Error as EventSourceError, Event, EventSource, retry};

use umami_core::chat::transport::{ChatTransport, FrameStream};
use umami_types::chat::{
    ChatFrame, ChatRequest, DONE_SENTINEL, ERROR_EVENT, ErrorBody, FragmentPayload,
};
use umami_types::error::TransportError;
use umami_types::restaurant::Restaurant;

/// Path of the chat endpoint relative to the server base URL.
pub const CHAT_PATH: &str = "/api/chat";

#[derive(Debug, Clone)]
pub struct SseChatTransport {
    client: reqwest::Client,
    base_url: String,
}

impl SseChatTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_url(&self) -> String {
        format!("{}{CHAT_PATH}", self.base_url)
    }

    /// Look up a restaurant record on the server. `Ok(None)` on 404.
    pub async fn fetch_restaurant(&self, id: &str) -> Result<Option<Restaurant>, TransportError> {
        let url = format!("{}/api/restaurants/{id}", self.base_url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<Restaurant>()
            .await
            .map(Some)
            .map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

/// Decode one SSE message into a frame.
fn decode_message(event: &str, data: &str) -> Result<ChatFrame, TransportError> {
    if event == ERROR_EVENT {
        let message = serde_json::from_str::<ErrorBody>(data)
            .map(|body| body.error)
            .unwrap_or_else(|_| data.to_string());
        return Err(TransportError::Server(message));
    }
    if data == DONE_SENTINEL {
        return Ok(ChatFrame::Done);
    }
    serde_json::from_str::<FragmentPayload>(data)
        .map(|payload| ChatFrame::Fragment(payload.data))
        .map_err(|e| TransportError::Malformed(format!("{e}: {data}")))
}

async fn map_event_source_error(err: EventSourceError) -> TransportError {
    match err {
        EventSourceError::StreamEnded => TransportError::UnexpectedEnd,
        EventSourceError::InvalidStatusCode(status, response) => {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            TransportError::Rejected {
                status: status.as_u16(),
                message,
            }
        }
        EventSourceError::InvalidContentType(content_type, _) => TransportError::Malformed(
            format!("unexpected content type: {content_type:?}"),
        ),
        EventSourceError::Transport(e) => TransportError::Request(e.to_string()),
        other => TransportError::Stream(other.to_string()),
    }
}

impl ChatTransport for SseChatTransport {
    fn open(&self, request: ChatRequest) -> FrameStream {
        let url = self.chat_url();
        let builder = self.client.post(url).json(&request);

        Box::pin(async_stream::try_stream! {
            let mut source = EventSource::new(builder)
                .map_err(|e| TransportError::Request(e.to_string()))?;
            source.set_retry_policy(Box::new(retry::Never));

            loop {
                let step: Result<Option<ChatFrame>, TransportError> = match source.next().await {
                    None => Err(TransportError::UnexpectedEnd),
                    Some(Ok(Event::Open)) => Ok(None),
                    Some(Ok(Event::Message(message))) => {
                        decode_message(&message.event, &message.data).map(Some)
                    }
                    Some(Err(err)) => Err(map_event_source_error(err).await),
                };

                if matches!(step, Err(_) | Ok(Some(ChatFrame::Done))) {
                    source.close();
                }

                match step? {
                    Some(ChatFrame::Done) => {
                        yield ChatFrame::Done;
                        break;
                    }
                    Some(frame) => yield frame,
                    None => {}
                }
            }
        })
    }
}

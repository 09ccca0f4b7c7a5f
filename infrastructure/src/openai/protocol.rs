//! Wire types for the OpenAI assistants (v2) endpoints
//!
//! Only the fields this client reads are modelled; everything else in the
//! response bodies is ignored.

use nova_domain::{Role, Run, RunId, RunStatus, ThreadId, ThreadMessage};
use serde::{Deserialize, Serialize};

/// `POST /threads` response
#[derive(Debug, Deserialize)]
pub struct ThreadObject {
    pub id: String,
}

impl From<ThreadObject> for ThreadId {
    fn from(thread: ThreadObject) -> Self {
        ThreadId::new(thread.id)
    }
}

/// `POST /threads/{thread_id}/messages` body
#[derive(Debug, Serialize)]
pub struct CreateMessageRequest<'a> {
    pub role: Role,
    pub content: &'a str,
}

/// `POST /threads/{thread_id}/runs` body
#[derive(Debug, Serialize)]
pub struct CreateRunRequest<'a> {
    pub assistant_id: &'a str,
}

/// Run object returned by create and retrieve
#[derive(Debug, Deserialize)]
pub struct RunObject {
    pub id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

#[derive(Debug, Deserialize)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

impl From<RunObject> for Run {
    fn from(run: RunObject) -> Self {
        let converted = Run::new(RunId::new(run.id), run.status);
        match run.last_error {
            Some(err) => converted.with_last_error(format!("{}: {}", err.code, err.message)),
            None => converted,
        }
    }
}

/// `GET /threads/{thread_id}/messages` response
#[derive(Debug, Deserialize)]
pub struct MessageList {
    pub data: Vec<MessageObject>,
}

#[derive(Debug, Deserialize)]
pub struct MessageObject {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

/// One content block of a message. Only text blocks carry an answer.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextContent },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct TextContent {
    pub value: String,
}

impl From<MessageObject> for ThreadMessage {
    fn from(message: MessageObject) -> Self {
        let text = message.content.into_iter().find_map(|block| match block {
            MessageContent::Text { text } => Some(text.value),
            MessageContent::Other => None,
        });
        ThreadMessage {
            id: message.id,
            role: message.role,
            text,
        }
    }
}

/// Error envelope used by every endpoint
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

//! Assistant backend adapter for the OpenAI assistants API

use super::error::{OpenAiError, Result};
use super::protocol::{
    ApiErrorBody, CreateMessageRequest, CreateRunRequest, MessageList, RunObject, ThreadObject,
};
use async_trait::async_trait;
use nova_application::{AssistantBackend, BackendError};
use nova_domain::{Role, Run, RunId, ThreadId, ThreadMessage};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

/// Beta header required by the assistants endpoints
const ASSISTANTS_BETA: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// How many messages to list when looking for the reply
const MESSAGE_PAGE_SIZE: u32 = 10;

/// [`AssistantBackend`] backed by `api.openai.com` (or a compatible server).
pub struct OpenAiAssistantBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiAssistantBackend {
    /// Build a backend with a per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(&self.api_key)
            .header(ASSISTANTS_BETA.0, ASSISTANTS_BETA.1)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        trace!("assistants API responded {}: {}", status, body);

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| OpenAiError::ParseError {
            error: e.to_string(),
            raw: body,
        })
    }
}

#[async_trait]
impl AssistantBackend for OpenAiAssistantBackend {
    async fn create_thread(&self) -> std::result::Result<ThreadId, BackendError> {
        let request = self
            .client
            .post(self.url("/threads"))
            .json(&serde_json::json!({}));
        let thread: ThreadObject = self.send(request).await?;
        debug!("Created thread {}", thread.id);
        Ok(thread.into())
    }

    async fn create_message(
        &self,
        thread: &ThreadId,
        role: Role,
        text: &str,
    ) -> std::result::Result<(), BackendError> {
        let request = self
            .client
            .post(self.url(&format!("/threads/{}/messages", thread)))
            .json(&CreateMessageRequest {
                role,
                content: text,
            });
        let _: serde_json::Value = self.send(request).await?;
        Ok(())
    }

    async fn create_run(
        &self,
        thread: &ThreadId,
        assistant_id: &str,
    ) -> std::result::Result<Run, BackendError> {
        let request = self
            .client
            .post(self.url(&format!("/threads/{}/runs", thread)))
            .json(&CreateRunRequest { assistant_id });
        let run: RunObject = self.send(request).await?;
        debug!("Started run {} ({})", run.id, run.status);
        Ok(run.into())
    }

    async fn get_run(
        &self,
        thread: &ThreadId,
        run: &RunId,
    ) -> std::result::Result<Run, BackendError> {
        let request = self
            .client
            .get(self.url(&format!("/threads/{}/runs/{}", thread, run)));
        let run: RunObject = self.send(request).await?;
        Ok(run.into())
    }

    async fn list_messages(
        &self,
        thread: &ThreadId,
    ) -> std::result::Result<Vec<ThreadMessage>, BackendError> {
        let request = self
            .client
            .get(self.url(&format!("/threads/{}/messages", thread)))
            .query(&[
                ("order", "desc".to_string()),
                ("limit", MESSAGE_PAGE_SIZE.to_string()),
            ]);
        let list: MessageList = self.send(request).await?;
        Ok(list.data.into_iter().map(Into::into).collect())
    }
}

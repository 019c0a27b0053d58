use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::{
    chat::Message,
    error::{Error, Result},
    request::{Payload, Sampling},
    response::Completion,
};

pub const API_VERSION: &str = "2024-02-15-preview";

pub const DEFAULT_ENDPOINT: &str =
    "https://Llama-3-3-70B-Instruct-TALT.swedencentral.models.ai.azure.com";

/// Where the model is deployed and how to authenticate against it.
#[derive(Clone)]
pub struct Config {
    endpoint: String,
    api_key: String,
}

impl Config {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Client for a hosted chat-completions deployment.
///
/// Every call sends exactly one request. Nothing is retried, and the client
/// holds no state besides what it was constructed with, so clones can be
/// used freely from different tasks.
#[derive(Debug, Clone)]
pub struct LlamaClient {
    inner: reqwest::Client,
    endpoint: String,
    headers: HeaderMap,
}

impl LlamaClient {
    /// Validates `config` and prepares the request headers. Does not touch
    /// the network.
    pub fn new(config: Config) -> Result<Self> {
        let Config { endpoint, api_key } = config;
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }

        let endpoint = endpoint.trim_end_matches('/').to_string();
        if let Err(e) = reqwest::Url::parse(&endpoint) {
            return Err(Error::InvalidEndpoint {
                endpoint,
                reason: e.to_string(),
            });
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| Error::InvalidApiKey)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        Ok(Self {
            inner: reqwest::Client::new(),
            endpoint,
            headers,
        })
    }

    /// Replaces the underlying HTTP client, e.g. to configure timeouts or
    /// proxies. Authentication headers are attached per request and are
    /// unaffected.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.inner = client;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }

    /// Sends `prompt` as a single user message.
    ///
    /// `stop_sequences` is only sent when it contains at least one entry.
    pub async fn generate_text(
        &self,
        prompt: &str,
        sampling: &Sampling,
        stop_sequences: Option<&[String]>,
    ) -> Result<Completion> {
        if prompt.is_empty() {
            return Err(Error::EmptyPrompt);
        }
        let messages = [Message::user(prompt)];
        self.complete(Payload::new(&messages, sampling).stop(stop_sequences))
            .await
    }

    /// Sends `messages` as-is and in order. Roles are not checked.
    pub async fn generate_chat(
        &self,
        messages: &[Message],
        sampling: &Sampling,
    ) -> Result<Completion> {
        if messages.is_empty() {
            return Err(Error::EmptyConversation);
        }
        self.complete(Payload::new(messages, sampling)).await
    }

    async fn complete(&self, payload: Payload<'_>) -> Result<Completion> {
        let url = self.completions_url();
        log::debug!("POST {url}");

        let response = self
            .inner
            .post(&url)
            .query(&[("api-version", API_VERSION)])
            .headers(self.headers.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Error making request to {url}: {e}");
                Error::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            log::error!("Request to {url} failed with {status}");
            return Err(Error::Status { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

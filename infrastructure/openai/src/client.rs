use std::time::Duration;

use reqwest::Client;

/// Shared OpenAI HTTP client configuration.
pub struct OpenAIClient {
    pub client: Client,
    pub api_key: String,
    pub base_url: String,
}

impl OpenAIClient {
    /// Client with the default 30s request timeout, suitable for text
    /// generation calls.
    pub fn new(api_key: String) -> Self {
        Self::with_timeout(api_key, Duration::from_secs(30))
    }

    /// Client with a caller-chosen request timeout. Image generation takes
    /// considerably longer than text and needs a wider window.
    pub fn with_timeout(api_key: String, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Builds the authorization header value.
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Returns the responses endpoint URL.
    pub fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    /// Returns the image generations endpoint URL.
    pub fn image_generations_url(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }
}

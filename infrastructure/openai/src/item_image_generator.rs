use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use business::domain::resolution::errors::ResolutionError;
use business::domain::resolution::services::ItemImageSynthesizerService;
use business::domain::shared::value_objects::EncodedImage;

use crate::client::OpenAIClient;

#[derive(Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    b64_json: Option<String>,
}

pub struct ItemImageGeneratorOpenAI {
    client: OpenAIClient,
}

impl ItemImageGeneratorOpenAI {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }

    fn build_prompt(description: &str) -> String {
        format!(
            "A photorealistic image of a single clothing item: '{}'. Display the item clearly on a plain white or light gray background, suitable for an e-commerce product listing. No human models or distracting elements.",
            description
        )
    }
}

#[async_trait]
impl ItemImageSynthesizerService for ItemImageGeneratorOpenAI {
    async fn synthesize(&self, description: &str) -> Result<EncodedImage, ResolutionError> {
        // "low" moderation keeps ordinary apparel terms from tripping
        // false-positive refusals while still blocking disallowed content.
        let body = json!({
            "model": "gpt-image-1",
            "prompt": Self::build_prompt(description),
            "n": 1,
            "size": "1024x1024",
            "moderation": "low",
        });

        let response = self
            .client
            .client
            .post(self.client.image_generations_url())
            .header("Content-Type", "application/json")
            .header("Authorization", self.client.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|_| ResolutionError::SynthesisFailed)?;

        if !response.status().is_success() {
            return Err(ResolutionError::SynthesisFailed);
        }

        let data: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|_| ResolutionError::SynthesisFailed)?;

        // A 200 without an image payload (e.g. blocked by safety filtering)
        // is the same failure as a transport error.
        let payload = data
            .data
            .into_iter()
            .next()
            .and_then(|image| image.b64_json)
            .filter(|b64| !b64.is_empty())
            .ok_or(ResolutionError::SynthesisFailed)?;

        Ok(EncodedImage::new("image/png", payload))
    }
}

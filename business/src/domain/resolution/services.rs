use async_trait::async_trait;

use crate::domain::shared::value_objects::EncodedImage;

use super::errors::ResolutionError;

/// Service port for synthesizing a product photo of a single described
/// garment.
///
/// Implementations issue exactly one image-generation call per invocation
/// and either return a complete displayable image or fail with
/// [`ResolutionError::SynthesisFailed`]; there is no partial result.
/// Invocations are independent and safe to run concurrently.
#[async_trait]
pub trait ItemImageSynthesizerService: Send + Sync {
    async fn synthesize(&self, description: &str) -> Result<EncodedImage, ResolutionError>;
}

use std::sync::Arc;
use std::time::Duration;

use logger::TracingLogger;

use openai::client::OpenAIClient;
use openai::item_image_generator::ItemImageGeneratorOpenAI;
use openai::outfit_suggester::OutfitSuggesterOpenAI;

use business::application::outfit::suggest::SuggestOutfitsUseCaseImpl;
use business::application::resolution::resolver::OutfitImageResolver;

use crate::api::outfit::sessions::SessionRegistry;
use crate::config::openai_config::OpenAIConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub outfit_api: crate::api::outfit::routes::OutfitApi,
}

impl DependencyContainer {
    pub fn new() -> Self {
        let logger = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters. Image generation gets a wider timeout
        // than text generation.
        let openai_config = OpenAIConfig::from_env();
        let suggester_client = OpenAIClient::new(openai_config.api_key.clone());
        let image_client =
            OpenAIClient::with_timeout(openai_config.api_key, Duration::from_secs(120));

        let suggester = Arc::new(OutfitSuggesterOpenAI::new(suggester_client));
        let synthesizer = Arc::new(ItemImageGeneratorOpenAI::new(image_client));

        // Use cases and orchestration
        let suggest_use_case = Arc::new(SuggestOutfitsUseCaseImpl {
            suggester,
            logger: logger.clone(),
        });
        let resolver = Arc::new(OutfitImageResolver::new(synthesizer, logger));
        let sessions = Arc::new(SessionRegistry::new());

        let outfit_api =
            crate::api::outfit::routes::OutfitApi::new(suggest_use_case, resolver, sessions);

        Self {
            health_api,
            outfit_api,
        }
    }
}

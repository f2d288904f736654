use std::sync::Arc;
use std::time::Duration;

use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};
use uuid::Uuid;

use business::application::resolution::resolver::OutfitImageResolver;
use business::domain::outfit::errors::OutfitError;
use business::domain::outfit::use_cases::suggest::{SuggestOutfitsParams, SuggestOutfitsUseCase};
use business::domain::resolution::errors::ResolutionError;
use business::domain::resolution::model::ItemKey;
use business::domain::shared::value_objects::EncodedImage;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::outfit::dto::{
    CreateSuggestionRequest, ItemStateResponse, ItemStatesResponse, MAX_UPLOADS,
    SuggestionSessionResponse, item_states, session_response,
};
use crate::api::outfit::sessions::SessionRegistry;
use crate::api::tags::ApiTags;

/// Upper bound on how long a long-poll request may park before answering
/// with the current states.
const LONG_POLL_TIMEOUT: Duration = Duration::from_secs(25);

pub struct OutfitApi {
    suggest_use_case: Arc<dyn SuggestOutfitsUseCase>,
    resolver: Arc<OutfitImageResolver>,
    sessions: Arc<SessionRegistry>,
}

impl OutfitApi {
    pub fn new(
        suggest_use_case: Arc<dyn SuggestOutfitsUseCase>,
        resolver: Arc<OutfitImageResolver>,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            suggest_use_case,
            resolver,
            sessions,
        }
    }

    fn validation_error(message: &str) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            name: "ValidationError".to_string(),
            message: message.to_string(),
        })
    }

    fn parse_images(raw: &[String]) -> Result<Vec<EncodedImage>, Json<ErrorResponse>> {
        if raw.is_empty() {
            return Err(Self::validation_error("outfit.no_input_images"));
        }
        if raw.len() > MAX_UPLOADS {
            return Err(Self::validation_error("outfit.too_many_images"));
        }

        raw.iter()
            .map(|uri| uri.parse::<EncodedImage>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Self::validation_error("outfit.invalid_image"))
    }

    fn not_found(error: ResolutionError) -> Json<ErrorResponse> {
        let (_, json) = error.into_error_response();
        json
    }
}

/// Outfit API
///
/// Endpoints for generating outfit suggestions from uploaded garment photos
/// and following the per-item image resolution of each suggestion.
#[OpenApi]
impl OutfitApi {
    /// Suggest outfits
    ///
    /// Generates up to three outfit suggestions from the uploaded photos and
    /// starts resolving an image for every suggested item. Input-backed
    /// items are resolved immediately; novel items load asynchronously and
    /// can be followed via the returned session.
    #[oai(path = "/outfits/suggestions", method = "post", tag = "ApiTags::Outfits")]
    async fn create_suggestion(
        &self,
        body: Json<CreateSuggestionRequest>,
    ) -> CreateSuggestionResponse {
        let images = match Self::parse_images(&body.images) {
            Ok(images) => images,
            Err(json) => return CreateSuggestionResponse::UnprocessableEntity(json),
        };

        let result = match self
            .suggest_use_case
            .execute(SuggestOutfitsParams {
                input_images: images.clone(),
                occasion: body.occasion.clone(),
                style_preference: body.style_preference.clone(),
            })
            .await
        {
            Ok(result) => result,
            Err(err @ OutfitError::NoInputImages) => {
                let (_, json) = err.into_error_response();
                return CreateSuggestionResponse::UnprocessableEntity(json);
            }
            Err(err) => {
                let (_, json) = err.into_error_response();
                return CreateSuggestionResponse::InternalError(json);
            }
        };

        // Zero outfits is the "no confident suggestions" outcome: nothing
        // to resolve, no session to create.
        if result.is_empty() {
            return CreateSuggestionResponse::Ok(Json(session_response(None, &result, vec![], 0)));
        }

        let context = self.resolver.resolve(&result.outfits, &images);
        let states = item_states(&result.outfits, &context);
        let version = context.current_version();
        let session_id = self.sessions.insert(result.outfits.clone(), context);

        CreateSuggestionResponse::Ok(Json(session_response(
            Some(session_id),
            &result,
            states,
            version,
        )))
    }

    /// Poll item resolution states
    ///
    /// Returns the current state of every item in the session. When
    /// `after_version` is given and no item has transitioned past that
    /// version yet, the request parks until something changes or the
    /// long-poll window elapses.
    #[oai(
        path = "/outfits/suggestions/:session_id/items",
        method = "get",
        tag = "ApiTags::Outfits"
    )]
    async fn get_item_states(
        &self,
        session_id: Path<Uuid>,
        /// Last version the client has seen; enables long-polling
        after_version: Query<Option<u64>>,
    ) -> GetItemStatesResponse {
        let Some(session) = self.sessions.get(&session_id.0) else {
            return GetItemStatesResponse::NotFound(Self::not_found(
                ResolutionError::SessionNotFound,
            ));
        };

        if let Some(after) = after_version.0 {
            let mut changes = session.context.subscribe();
            let _ = tokio::time::timeout(LONG_POLL_TIMEOUT, async {
                while session.context.current_version() <= after && !session.context.is_settled() {
                    if changes.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await;
        }

        GetItemStatesResponse::Ok(Json(ItemStatesResponse {
            items: item_states(&session.outfits, &session.context),
            version: session.context.current_version(),
            settled: session.context.is_settled(),
        }))
    }

    /// Report a render failure
    ///
    /// Marks an item whose resolved image failed to decode on the client as
    /// failed, one-shot, and returns the item with its placeholder image.
    #[oai(
        path = "/outfits/suggestions/:session_id/items/:outfit_index/:item_index/render-failure",
        method = "post",
        tag = "ApiTags::Outfits"
    )]
    async fn report_render_failure(
        &self,
        session_id: Path<Uuid>,
        outfit_index: Path<u32>,
        item_index: Path<u32>,
    ) -> RenderFailureResponse {
        let Some(session) = self.sessions.get(&session_id.0) else {
            return RenderFailureResponse::NotFound(Self::not_found(
                ResolutionError::SessionNotFound,
            ));
        };

        let key = ItemKey::new(outfit_index.0 as usize, item_index.0 as usize);
        if session.context.mark_render_failed(key).is_err() {
            return RenderFailureResponse::NotFound(Self::not_found(ResolutionError::ItemNotFound));
        }

        let item = item_states(&session.outfits, &session.context)
            .into_iter()
            .find(|state| {
                state.outfit_index == outfit_index.0 && state.item_index == item_index.0
            });

        match item {
            Some(item) => RenderFailureResponse::Ok(Json(item)),
            None => RenderFailureResponse::NotFound(Self::not_found(ResolutionError::ItemNotFound)),
        }
    }

    /// Discard a session
    ///
    /// Drops the session and its resolution context. Synthesis calls still
    /// in flight are ignored when they complete.
    #[oai(
        path = "/outfits/suggestions/:session_id",
        method = "delete",
        tag = "ApiTags::Outfits"
    )]
    async fn discard_session(&self, session_id: Path<Uuid>) -> DiscardSessionResponse {
        if self.sessions.remove(&session_id.0) {
            DiscardSessionResponse::NoContent
        } else {
            DiscardSessionResponse::NotFound(Self::not_found(ResolutionError::SessionNotFound))
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateSuggestionResponse {
    #[oai(status = 200)]
    Ok(Json<SuggestionSessionResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetItemStatesResponse {
    #[oai(status = 200)]
    Ok(Json<ItemStatesResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum RenderFailureResponse {
    #[oai(status = 200)]
    Ok(Json<ItemStateResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DiscardSessionResponse {
    #[oai(status = 204)]
    NoContent,
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
}

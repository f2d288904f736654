use chrono::{DateTime, Utc};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use business::application::resolution::resolver::ResolutionContext;
use business::domain::outfit::model::{Outfit, SuggestionResult};
use business::domain::resolution::model::ImageResolutionState;
use business::domain::resolution::placeholder::placeholder_for;

/// Maximum number of garment photos accepted per suggestion request.
pub const MAX_UPLOADS: usize = 5;

#[derive(Debug, Clone, Object)]
pub struct CreateSuggestionRequest {
    /// Uploaded garment photos as `data:image/<subtype>;base64,<payload>`
    /// URIs, in display order. 1 to 5 images.
    pub images: Vec<String>,
    /// Occasion the outfits should suit, e.g. "Office party"
    #[oai(skip_serializing_if_is_none)]
    pub occasion: Option<String>,
    /// Style preference, e.g. "neutral"; absent means no constraint
    #[oai(skip_serializing_if_is_none)]
    pub style_preference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Enum)]
pub enum ItemStatusDto {
    #[oai(rename = "loading")]
    Loading,
    #[oai(rename = "resolved")]
    Resolved,
    #[oai(rename = "failed")]
    Failed,
}

#[derive(Debug, Clone, Object)]
pub struct OutfitItemResponse {
    /// Human-readable item label
    pub name: String,
    /// Index into the uploaded images when the item is one of them;
    /// absent for novel items invented by the stylist
    #[oai(skip_serializing_if_is_none)]
    pub input_index: Option<u32>,
}

#[derive(Debug, Clone, Object)]
pub struct OutfitResponse {
    /// Free-text summary of the look
    pub description: String,
    /// Items in display order
    pub items: Vec<OutfitItemResponse>,
}

#[derive(Debug, Clone, Object)]
pub struct ItemStateResponse {
    /// Outfit the item belongs to
    pub outfit_index: u32,
    /// Position of the item inside its outfit
    pub item_index: u32,
    /// Human-readable item label
    pub name: String,
    /// Resolution status of this item
    pub status: ItemStatusDto,
    /// Displayable image as a data URI. Present when resolved; for failed
    /// items this carries the deterministic labeled placeholder. Absent
    /// while loading.
    #[oai(skip_serializing_if_is_none)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Object)]
pub struct SuggestionSessionResponse {
    /// Session handle for polling item states. Absent when the stylist had
    /// no confident suggestion (zero outfits).
    #[oai(skip_serializing_if_is_none)]
    pub session_id: Option<Uuid>,
    /// Suggested outfits, 0 to 3
    pub outfits: Vec<OutfitResponse>,
    /// Per-item resolution states at response time
    pub items: Vec<ItemStateResponse>,
    /// Change counter; grows whenever an item state transitions
    pub version: u64,
    /// When the suggestion was generated
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Object)]
pub struct ItemStatesResponse {
    /// Per-item resolution states
    pub items: Vec<ItemStateResponse>,
    /// Change counter; pass back as `after_version` to long-poll
    pub version: u64,
    /// True once no item is still loading
    pub settled: bool,
}

impl From<&Outfit> for OutfitResponse {
    fn from(outfit: &Outfit) -> Self {
        Self {
            description: outfit.description.clone(),
            items: outfit
                .items
                .iter()
                .map(|item| OutfitItemResponse {
                    name: item.name.clone(),
                    input_index: item.input_index.map(|index| index as u32),
                })
                .collect(),
        }
    }
}

/// Maps the resolver's snapshot onto wire states. Failed items are served
/// with their labeled placeholder image so clients never have to special
/// case a missing source.
pub fn item_states(outfits: &[Outfit], context: &ResolutionContext) -> Vec<ItemStateResponse> {
    context
        .snapshot()
        .into_iter()
        .map(|(key, state)| {
            let name = outfits
                .get(key.outfit_index)
                .and_then(|outfit| outfit.items.get(key.item_index))
                .map(|item| item.name.clone())
                .unwrap_or_default();

            let (status, image) = match state {
                ImageResolutionState::Loading => (ItemStatusDto::Loading, None),
                ImageResolutionState::Resolved(image) => {
                    (ItemStatusDto::Resolved, Some(image.to_data_uri()))
                }
                ImageResolutionState::Failed => (
                    ItemStatusDto::Failed,
                    Some(placeholder_for(&name).to_data_uri()),
                ),
            };

            ItemStateResponse {
                outfit_index: key.outfit_index as u32,
                item_index: key.item_index as u32,
                name,
                status,
                image,
            }
        })
        .collect()
}

pub fn session_response(
    session_id: Option<Uuid>,
    result: &SuggestionResult,
    states: Vec<ItemStateResponse>,
    version: u64,
) -> SuggestionSessionResponse {
    SuggestionSessionResponse {
        session_id,
        outfits: result.outfits.iter().map(OutfitResponse::from).collect(),
        items: states,
        version,
        created_at: result.created_at,
    }
}

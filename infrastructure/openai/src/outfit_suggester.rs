use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use business::domain::outfit::errors::OutfitError;
use business::domain::outfit::model::{ItemReference, Outfit, SuggestionResult};
use business::domain::outfit::services::OutfitSuggesterService;
use business::domain::shared::value_objects::EncodedImage;

use crate::client::OpenAIClient;

const SYSTEM_PROMPT: &str = r#"You are a personal stylist for an outfit styling app called StyleSniff.
You will be given photos of clothing items the user has uploaded, numbered from 0.

Your task is to suggest 1 to 3 outfits. An outfit can be:
1. A combination of items from the user's uploaded photos.
2. A combination of uploaded items AND new, generic complementary items (e.g. "a pair of dark wash jeans", "white sneakers", "a black belt").

Rules for every item in your suggested outfits:
- Provide a descriptive "name" (e.g. "Uploaded Red Blouse", "Classic Blue Jeans", "White Low-Top Sneakers").
- If the item is one of the uploaded photos, you MUST provide "inputIndex": its 0-based photo number.
- If the item is a new, generic suggestion, you MUST OMIT the "inputIndex" field.

Be creative and follow fashion rules and color theory. When a style preference is given, tailor your suggestions to it; when it is neutral or absent, suggest broadly appealing styles.

Return ONLY a JSON object with this EXACT structure, no additional text:
{
  "outfits": [
    {
      "description": "A description of the suggested outfit",
      "items": [
        {"name": "Item name", "inputIndex": 0},
        {"name": "New generic item name"}
      ]
    }
  ]
}
If you cannot suggest any confident outfit, return {"outfits": []}."#;

#[derive(Deserialize)]
struct SuggestedOutfitsPayload {
    outfits: Vec<OutfitPayload>,
}

#[derive(Deserialize)]
struct OutfitPayload {
    #[serde(default)]
    description: String,
    #[serde(default)]
    items: Vec<ItemPayload>,
}

#[derive(Deserialize)]
struct ItemPayload {
    #[serde(default)]
    name: String,
    #[serde(rename = "inputIndex")]
    input_index: Option<usize>,
}

pub struct OutfitSuggesterOpenAI {
    client: OpenAIClient,
}

impl OutfitSuggesterOpenAI {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }

    fn build_user_content(
        input_images: &[EncodedImage],
        occasion: Option<&str>,
        style_preference: Option<&str>,
    ) -> Vec<serde_json::Value> {
        let mut content = Vec::new();

        for (index, image) in input_images.iter().enumerate() {
            content.push(json!({
                "type": "input_text",
                "text": format!("Item {}:", index),
            }));
            content.push(json!({
                "type": "input_image",
                "image_url": image.to_data_uri(),
                "detail": "low",
            }));
        }

        let mut request = String::from("Suggest outfits for these clothing items.");
        if let Some(occasion) = occasion {
            request.push_str(&format!("\nThe occasion is: {}", occasion));
        }
        if let Some(style) = style_preference {
            request.push_str(&format!("\nThe style preference is: {}", style));
        }
        content.push(json!({
            "type": "input_text",
            "text": request,
        }));

        content
    }

    fn parse_response(content: &str) -> Result<SuggestionResult, OutfitError> {
        // Remove markdown code blocks if present, then take the outermost
        // JSON object.
        let json_str = regex::Regex::new(r"\{[\s\S]*\}")
            .ok()
            .and_then(|re| re.find(content))
            .map(|m| m.as_str())
            .ok_or(OutfitError::GenerationFailed)?;

        let payload: SuggestedOutfitsPayload =
            serde_json::from_str(json_str).map_err(|_| OutfitError::GenerationFailed)?;

        let outfits = payload
            .outfits
            .into_iter()
            .filter_map(|outfit| {
                let items: Vec<ItemReference> = outfit
                    .items
                    .into_iter()
                    .filter(|item| !item.name.trim().is_empty())
                    .map(|item| ItemReference {
                        name: item.name.trim().to_string(),
                        input_index: item.input_index,
                    })
                    .collect();

                if items.is_empty() {
                    return None;
                }

                Some(Outfit {
                    description: outfit.description.trim().to_string(),
                    items,
                })
            })
            .collect();

        Ok(SuggestionResult::new(outfits))
    }
}

#[async_trait]
impl OutfitSuggesterService for OutfitSuggesterOpenAI {
    async fn suggest<'a>(
        &self,
        input_images: &'a [EncodedImage],
        occasion: Option<&'a str>,
        style_preference: Option<&'a str>,
    ) -> Result<SuggestionResult, OutfitError> {
        let body = json!({
            "model": "gpt-4o",
            "input": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {
                    "role": "user",
                    "content": Self::build_user_content(input_images, occasion, style_preference),
                },
            ],
            "temperature": 0.7,
        });

        let response = self
            .client
            .client
            .post(self.client.responses_url())
            .header("Content-Type", "application/json")
            .header("Authorization", self.client.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|_| OutfitError::GenerationFailed)?;

        if !response.status().is_success() {
            return Err(OutfitError::GenerationFailed);
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|_| OutfitError::GenerationFailed)?;

        let text = data["output"]
            .as_array()
            .and_then(|outputs| outputs.iter().find(|o| o["type"] == "message"))
            .and_then(|msg| msg["content"].as_array())
            .and_then(|contents| contents.iter().find(|c| c["type"] == "output_text"))
            .and_then(|c| c["text"].as_str())
            .ok_or(OutfitError::GenerationFailed)?;

        Self::parse_response(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_plain_json_response() {
        let content = r#"{"outfits":[{"description":"Casual look","items":[{"name":"Uploaded Top","inputIndex":0},{"name":"Black Belt"}]}]}"#;

        let result = OutfitSuggesterOpenAI::parse_response(content).unwrap();

        assert_eq!(result.outfits.len(), 1);
        assert_eq!(result.outfits[0].items[0].input_index, Some(0));
        assert_eq!(result.outfits[0].items[1].input_index, None);
    }

    #[test]
    fn should_parse_response_wrapped_in_markdown_fences() {
        let content = "```json\n{\"outfits\":[{\"description\":\"Look\",\"items\":[{\"name\":\"Blue Jeans\"}]}]}\n```";

        let result = OutfitSuggesterOpenAI::parse_response(content).unwrap();

        assert_eq!(result.outfits.len(), 1);
        assert_eq!(result.outfits[0].items[0].name, "Blue Jeans");
    }

    #[test]
    fn should_accept_zero_outfits_as_valid_outcome() {
        let result = OutfitSuggesterOpenAI::parse_response(r#"{"outfits":[]}"#).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn should_drop_nameless_items_and_empty_outfits() {
        let content = r#"{"outfits":[{"description":"Look","items":[{"name":"  "},{"name":"Black Belt"}]},{"description":"Hollow","items":[]}]}"#;

        let result = OutfitSuggesterOpenAI::parse_response(content).unwrap();

        assert_eq!(result.outfits.len(), 1);
        assert_eq!(result.outfits[0].items.len(), 1);
        assert_eq!(result.outfits[0].items[0].name, "Black Belt");
    }

    #[test]
    fn should_fail_on_unparseable_response() {
        assert!(OutfitSuggesterOpenAI::parse_response("no json here").is_err());
        assert!(OutfitSuggesterOpenAI::parse_response("{not valid}").is_err());
    }
}

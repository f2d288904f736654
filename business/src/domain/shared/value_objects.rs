use serde::{Deserialize, Serialize};

/// A self-describing encoded image: MIME type plus base64 payload.
///
/// Every image in the system uses this shape, whether it was uploaded by the
/// user or synthesized on demand, so downstream code never needs to care
/// where an image came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    mime_type: String,
    data: String,
}

impl EncodedImage {
    /// Creates an encoded image from a MIME type and a base64 payload.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Returns the MIME type, e.g. "image/png".
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the base64 payload without the data URI prefix.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Renders the image as a `data:<mime>;base64,<payload>` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

impl std::fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_data_uri())
    }
}

impl std::str::FromStr for EncodedImage {
    type Err = String;

    /// Parses a `data:image/<subtype>;base64,<payload>` URI. Whitespace
    /// inside the payload is tolerated and stripped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("data:")
            .ok_or_else(|| format!("Not a data URI: {}", truncate_for_error(s)))?;

        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| "Data URI is not base64-encoded".to_string())?;

        if !mime_type.starts_with("image/") || mime_type.len() <= "image/".len() {
            return Err(format!("Unsupported MIME type: {}", mime_type));
        }

        let data: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        if data.is_empty() {
            return Err("Data URI carries no payload".to_string());
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data,
        })
    }
}

fn truncate_for_error(s: &str) -> String {
    s.chars().take(32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_well_formed_data_uri() {
        let image: EncodedImage = "data:image/png;base64,aGVsbG8=".parse().unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.data(), "aGVsbG8=");
    }

    #[test]
    fn should_strip_whitespace_from_payload() {
        let image: EncodedImage = "data:image/jpeg;base64,aGVs\nbG8=".parse().unwrap();
        assert_eq!(image.data(), "aGVsbG8=");
    }

    #[test]
    fn should_round_trip_through_data_uri() {
        let image = EncodedImage::new("image/webp", "c29tZWJ5dGVz");
        let parsed: EncodedImage = image.to_data_uri().parse().unwrap();
        assert_eq!(parsed, image);
    }

    #[test]
    fn should_display_as_data_uri() {
        let image = EncodedImage::new("image/png", "YWJj");
        assert_eq!(format!("{}", image), "data:image/png;base64,YWJj");
    }

    #[test]
    fn should_reject_non_data_uri() {
        assert!("https://example.com/top.png".parse::<EncodedImage>().is_err());
    }

    #[test]
    fn should_reject_non_image_mime_type() {
        assert!(
            "data:application/json;base64,e30="
                .parse::<EncodedImage>()
                .is_err()
        );
    }

    #[test]
    fn should_reject_bare_image_mime_type() {
        assert!("data:image/;base64,YWJj".parse::<EncodedImage>().is_err());
    }

    #[test]
    fn should_reject_empty_payload() {
        assert!("data:image/png;base64,".parse::<EncodedImage>().is_err());
    }

    #[test]
    fn should_reject_uri_without_base64_marker() {
        assert!("data:image/png,rawbytes".parse::<EncodedImage>().is_err());
    }
}

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::domain::shared::value_objects::EncodedImage;

const WIDTH: u32 = 150;
const HEIGHT: u32 = 150;

/// Builds the deterministic fallback image for an item whose resolution
/// failed: a labeled flat tile, never a broken-image icon.
///
/// Pure function of the item name, so any renderer can call it without
/// touching resolver state. The label is the first two words of the name,
/// matching how short the tile can legibly get.
pub fn placeholder_for(name: &str) -> EncodedImage {
    let label = label_for(name);
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><rect width="{w}" height="{h}" fill="#e5e7eb"/><text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" font-family="sans-serif" font-size="14" fill="#6b7280">{label}</text></svg>"##,
        w = WIDTH,
        h = HEIGHT,
        label = label,
    );

    EncodedImage::new("image/svg+xml", STANDARD.encode(svg))
}

fn label_for(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().take(2).collect();
    if words.is_empty() {
        return "item".to_string();
    }
    escape_xml(&words.join(" "))
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use proptest::prelude::*;

    fn decoded_svg(image: &EncodedImage) -> String {
        let bytes = STANDARD.decode(image.data()).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn should_produce_svg_labeled_with_item_name() {
        let image = placeholder_for("Black Belt");
        assert_eq!(image.mime_type(), "image/svg+xml");
        assert!(decoded_svg(&image).contains(">Black Belt</text>"));
    }

    #[test]
    fn should_keep_only_first_two_words_of_long_names() {
        let image = placeholder_for("Classic White Low-Top Sneakers");
        assert!(decoded_svg(&image).contains(">Classic White</text>"));
    }

    #[test]
    fn should_escape_markup_in_item_names() {
        let image = placeholder_for("<script> &co");
        let svg = decoded_svg(&image);
        assert!(svg.contains("&lt;script&gt; &amp;co"));
        assert!(!svg.contains("<script>"));
    }

    #[test]
    fn should_fall_back_to_generic_label_for_blank_names() {
        let image = placeholder_for("   ");
        assert!(decoded_svg(&image).contains(">item</text>"));
    }

    proptest! {
        #[test]
        fn should_be_deterministic_and_decodable_for_any_name(name in ".*") {
            let first = placeholder_for(&name);
            let second = placeholder_for(&name);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.mime_type(), "image/svg+xml");
            prop_assert!(STANDARD.decode(first.data()).is_ok());
        }
    }
}

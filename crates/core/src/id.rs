//! Image identifiers.
//!
//! Every illustration is addressed either by its chapter number or by a
//! named tag (cover art, hero image, diagrams). In prompt-table JSON
//! the two forms appear as a bare number or a bare string, so the enum
//! deserializes untagged.

use serde::{Deserialize, Serialize};

/// Identifier for a single illustration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageId {
    /// Numbered book chapter (`1`, `2`, ...).
    Chapter(u32),
    /// Named asset such as `"og"` or `"hero"`.
    Tag(String),
}

impl ImageId {
    /// Parse an identifier from command-line text.
    ///
    /// Numeric text becomes a chapter number; anything else is a tag.
    pub fn parse(text: &str) -> ImageId {
        match text.parse::<u32>() {
            Ok(n) => ImageId::Chapter(n),
            Err(_) => ImageId::Tag(text.to_string()),
        }
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageId::Chapter(n) => write!(f, "{n}"),
            ImageId::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_text_as_chapter() {
        assert_eq!(ImageId::parse("7"), ImageId::Chapter(7));
    }

    #[test]
    fn parse_non_numeric_text_as_tag() {
        assert_eq!(ImageId::parse("og"), ImageId::Tag("og".into()));
    }

    #[test]
    fn parse_negative_number_as_tag() {
        // u32 parsing rejects the sign, so "-1" falls through to a tag.
        assert_eq!(ImageId::parse("-1"), ImageId::Tag("-1".into()));
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(ImageId::Chapter(12).to_string(), "12");
        assert_eq!(ImageId::Tag("hero".into()).to_string(), "hero");
    }

    #[test]
    fn deserializes_untagged_from_json() {
        let chapter: ImageId = serde_json::from_str("3").unwrap();
        assert_eq!(chapter, ImageId::Chapter(3));

        let tag: ImageId = serde_json::from_str("\"topology\"").unwrap();
        assert_eq!(tag, ImageId::Tag("topology".into()));
    }
}

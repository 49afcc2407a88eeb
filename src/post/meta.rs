//! Post metadata from front matter.

use serde::{Deserialize, Deserializer, Serialize};

/// Raw JSON object holding user-defined front matter fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Deserialize tags, treating `null` as empty vec
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Accept both quoted dates and TOML's native date literals.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DateValue {
        Text(String),
        Toml(toml::value::Datetime),
    }

    Ok(Option::<DateValue>::deserialize(deserializer)?.map(|date| match date {
        DateValue::Text(text) => text,
        DateValue::Toml(datetime) => datetime.to_string(),
    }))
}

/// Front matter of a post.
///
/// | Field     | Type          | Description                         |
/// |-----------|---------------|-------------------------------------|
/// | `title`   | `String`      | Post title (defaults to the key)    |
/// | `date`    | `String`      | Publication date, ISO 8601 expected |
/// | `author`  | `String`      | Author name                         |
/// | `summary` | `String`      | One-paragraph teaser for the index  |
/// | `tags`    | `Vec<String>` | Categorization tags                 |
/// | `draft`   | `bool`        | Draft status (default: false)       |
///
/// Keys are camelCase; anything else lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostMeta {
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub draft: bool,
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl PostMeta {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }

    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_fields() {
        let meta = PostMeta::from_yaml(
            "title: Hello\ndate: 2024-03-01\nauthor: Ann\ntags: [rust, web]\ndraft: true",
        )
        .unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-03-01"));
        assert_eq!(meta.author.as_deref(), Some("Ann"));
        assert_eq!(meta.tags, ["rust", "web"]);
        assert!(meta.draft);
    }

    #[test]
    fn test_yaml_camel_case_extra() {
        let meta = PostMeta::from_yaml("title: x\ncoverImage: cover.png\nreadingTime: 4").unwrap();
        assert_eq!(meta.extra.get("coverImage"), Some(&serde_json::json!("cover.png")));
        assert_eq!(meta.extra.get("readingTime"), Some(&serde_json::json!(4)));
    }

    #[test]
    fn test_null_tags() {
        let meta = PostMeta::from_yaml("title: x\ntags:").unwrap();
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(PostMeta::from_yaml("\n").unwrap(), PostMeta::default());
    }

    #[test]
    fn test_toml_fields() {
        let meta =
            PostMeta::from_toml("title = \"Hello\"\ndate = \"2024-03-01\"\ntags = [\"a\"]").unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-03-01"));
        assert_eq!(meta.tags, ["a"]);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(PostMeta::from_yaml("title: [unclosed").is_err());
    }
}

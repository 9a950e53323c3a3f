//! Query and result types exchanged with the search backend.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A trimmed, non-empty query string.
///
/// An orchestration cycle can only be started with a `Query`, so blank input
/// never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    /// Parse user input, returning `None` when it is empty after trimming.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single web search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// A single video search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResultItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub channel: String,
}

/// A stored result with its consolidated ranking score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResultItem {
    /// Where the result came from ("Google", "YouTube")
    pub source: String,
    pub title: String,
    pub link: String,
    /// Stored scores may be null; they rank as 0.0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub rank_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// Payload of the primary `ask-ai` request.
///
/// Every collection is optional on the wire; absent and `null` both decode
/// to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskAiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub alternative_queries: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub google_results: Vec<SearchResultItem>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub youtube_results: Vec<VideoResultItem>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_rejects_blank_input() {
        assert!(Query::parse("").is_none());
        assert!(Query::parse("   \t\n").is_none());
    }

    #[test]
    fn test_query_is_trimmed() {
        let q = Query::parse("  climate change \n").unwrap();
        assert_eq!(q.as_str(), "climate change");
        assert_eq!(q.to_string(), "climate change");
    }

    #[test]
    fn test_ask_ai_missing_fields_are_empty() {
        let resp: AskAiResponse = serde_json::from_value(json!({
            "alternative_queries": ["a", "b"],
            "google_results": [{"title": "T", "link": "https://example.com", "snippet": "S"}]
        }))
        .unwrap();
        assert_eq!(resp.alternative_queries.len(), 2);
        assert_eq!(resp.google_results.len(), 1);
        assert!(resp.youtube_results.is_empty());
        assert!(resp.query.is_none());
    }

    #[test]
    fn test_ask_ai_null_fields_are_empty() {
        let resp: AskAiResponse = serde_json::from_value(json!({
            "query": "rust",
            "alternative_queries": null,
            "google_results": null,
            "youtube_results": null
        }))
        .unwrap();
        assert_eq!(resp, AskAiResponse {
            query: Some("rust".into()),
            ..Default::default()
        });
    }

    #[test]
    fn test_video_ignores_extra_fields() {
        let video: VideoResultItem = serde_json::from_value(json!({
            "title": "Intro",
            "videoId": "abc123",
            "thumbnail": "https://i.ytimg.com/vi/abc123/hqdefault.jpg",
            "channel": "Rustacean Station",
            "link": "https://www.youtube.com/watch?v=abc123"
        }))
        .unwrap();
        assert_eq!(video.channel, "Rustacean Station");
        assert_eq!(video.link, "https://www.youtube.com/watch?v=abc123");
    }

    #[test]
    fn test_ranked_null_score_is_zero() {
        let items: Vec<RankedResultItem> = serde_json::from_value(json!([
            {"id": 7, "query": "rust", "source": "Google", "title": "A", "link": "https://a", "snippet": "s", "rank_score": 4.5},
            {"source": "YouTube", "title": "B", "link": "https://b", "rank_score": null},
            {"source": "YouTube", "title": "C", "link": "https://c"}
        ]))
        .unwrap();
        assert_eq!(items[0].rank_score, 4.5);
        assert_eq!(items[0].snippet.as_deref(), Some("s"));
        assert_eq!(items[1].rank_score, 0.0);
        assert_eq!(items[2].rank_score, 0.0);
    }
}

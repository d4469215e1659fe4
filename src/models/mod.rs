use serde::{Deserialize, Serialize};

mod app;
mod user_profile;

pub use app::{AppSuggestion, ReconciledSuggestion, StoreRecord};
pub use user_profile::UserProfile;

// ============================================================================
// OpenAI Chat Completions Types
// ============================================================================

/// A single message in a chat completion exchange
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for POST /chat/completions
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Response body from POST /chat/completions
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

// ============================================================================
// iTunes Search / Lookup API Types
// ============================================================================

/// Response from GET /search and GET /lookup
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesResponse {
    #[serde(default)]
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<ItunesApp>,
}

/// A software listing as returned by the iTunes API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesApp {
    #[serde(default)]
    pub track_id: Option<u64>,
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub track_view_url: Option<String>,
    #[serde(default, rename = "artworkUrl512")]
    pub artwork_url_512: Option<String>,
    #[serde(default, rename = "artworkUrl100")]
    pub artwork_url_100: Option<String>,
}

impl ItunesApp {
    /// Best available icon, largest first
    pub fn icon_url(&self) -> Option<&str> {
        self.artwork_url_512
            .as_deref()
            .or(self.artwork_url_100.as_deref())
    }

    /// Converts to a store record; listings without a name or URL are unusable
    pub fn into_store_record(self) -> Option<StoreRecord> {
        let app_icon_url = self.icon_url().unwrap_or_default().to_string();
        Some(StoreRecord {
            app_name: self.track_name?,
            app_store_url: self.track_view_url?,
            app_icon_url,
            app_id: self.track_id.unwrap_or_default(),
        })
    }
}

impl ItunesResponse {
    /// First (most relevant) usable listing
    pub fn first_record(self) -> Option<StoreRecord> {
        self.results.into_iter().next()?.into_store_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itunes_search_response_deserialization() {
        let json = r#"{
            "resultCount": 1,
            "results": [{
                "trackId": 1232780281,
                "trackName": "Notion",
                "trackViewUrl": "https://apps.apple.com/kr/app/notion/id1232780281",
                "artworkUrl100": "https://example.com/100x100bb.jpg",
                "artworkUrl512": "https://example.com/512x512bb.jpg",
                "kind": "software"
            }]
        }"#;

        let response: ItunesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.result_count, 1);

        let record = response.first_record().unwrap();
        assert_eq!(record.app_name, "Notion");
        assert_eq!(record.app_id, 1232780281);
        assert_eq!(record.app_icon_url, "https://example.com/512x512bb.jpg");
    }

    #[test]
    fn test_itunes_empty_results() {
        let json = r#"{"resultCount": 0, "results": []}"#;
        let response: ItunesResponse = serde_json::from_str(json).unwrap();
        assert!(response.first_record().is_none());
    }

    #[test]
    fn test_icon_falls_back_to_smaller_artwork() {
        let app = ItunesApp {
            track_id: Some(1),
            track_name: Some("App".to_string()),
            track_view_url: Some("https://apps.apple.com/kr/app/id1".to_string()),
            artwork_url_512: None,
            artwork_url_100: Some("https://example.com/100.jpg".to_string()),
        };
        let record = app.into_store_record().unwrap();
        assert_eq!(record.app_icon_url, "https://example.com/100.jpg");
    }

    #[test]
    fn test_listing_without_url_is_unusable() {
        let app = ItunesApp {
            track_id: Some(1),
            track_name: Some("App".to_string()),
            track_view_url: None,
            artwork_url_512: None,
            artwork_url_100: None,
        };
        assert!(app.into_store_record().is_none());
    }

    #[test]
    fn test_chat_completion_request_serialization() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let request = ChatCompletionRequest {
            model: "gpt-4",
            messages: &messages,
            max_tokens: 1000,
            temperature: 0.5,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["max_tokens"], 1000);
        assert_eq!(value["temperature"], 0.5);
    }
}

/// OpenAI Chat Completions provider
///
/// POSTs the conversation to `{api_url}/chat/completions` with bearer auth and
/// returns the content of the first choice. Any failure along the way,
/// transport, non-success status, or an envelope without choices, is reported
/// as `AppError::Completion` carrying the underlying cause.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage},
    services::providers::CompletionProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
            max_tokens,
            temperature,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_api_url.clone(),
            config.openai_model.clone(),
            config.openai_max_tokens,
            config.openai_temperature,
            config.openai_timeout(),
        )
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.api_url);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Completion(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Completion(format!(
                "OpenAI API returned status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Completion(format!("Failed to parse OpenAI response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| AppError::Completion("OpenAI response had no choices".to_string()))?;

        tracing::debug!(
            model = %self.model,
            chars = content.chars().count(),
            provider = "openai",
            "Completion received"
        );

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_provider(api_url: String) -> OpenAiProvider {
        OpenAiProvider::new(
            "sk-test".to_string(),
            api_url,
            "gpt-4".to_string(),
            1000,
            0.5,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::system("You are a helpful assistant."),
            ChatMessage::user("앱 추천"),
        ]
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice_trimmed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4",
                "max_tokens": 1000,
                "temperature": 0.5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "  [{\"app_name\": \"a\"}]\n"}},
                    {"message": {"role": "assistant", "content": "ignored"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = create_test_provider(server.uri());
        let content = provider.complete(&messages()).await.unwrap();
        assert_eq!(content, "[{\"app_name\": \"a\"}]");
    }

    #[tokio::test]
    async fn test_complete_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let provider = create_test_provider(server.uri());
        let err = provider.complete(&messages()).await.unwrap_err();
        match err {
            AppError::Completion(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("invalid api key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_without_choices() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let provider = create_test_provider(server.uri());
        let err = provider.complete(&messages()).await.unwrap_err();
        assert!(matches!(err, AppError::Completion(_)));
    }

    #[tokio::test]
    async fn test_complete_unreachable_host() {
        // nothing listens on port 9 on loopback
        let provider = create_test_provider("http://127.0.0.1:9".to_string());
        let err = provider.complete(&messages()).await.unwrap_err();
        assert!(matches!(err, AppError::Completion(_)));
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let provider = create_test_provider("http://localhost:1234/v1/".to_string());
        assert_eq!(provider.api_url, "http://localhost:1234/v1");
        assert_eq!(provider.name(), "openai");
    }
}

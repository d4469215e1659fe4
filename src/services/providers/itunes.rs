/// iTunes Search API provider
///
/// API Flow:
/// 1. Search: /search?term=..&country=..&media=software&limit=1 → best listing by relevance
/// 2. Lookup: /lookup?id=.. → listing by numeric track ID
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ItunesResponse, StoreRecord},
    services::providers::AppStoreProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const MEDIA_SOFTWARE: &str = "software";
const SEARCH_LIMIT: &str = "1";

#[derive(Clone)]
pub struct ItunesProvider {
    http_client: HttpClient,
    api_url: String,
}

impl ItunesProvider {
    pub fn new(api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(config.itunes_api_url.clone(), config.store_timeout())
    }

    async fn fetch(&self, endpoint: &str, query: &[(&str, &str)]) -> AppResult<ItunesResponse> {
        let url = format!("{}/{}", self.api_url, endpoint);

        let response = self.http_client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "iTunes API returned status {}: {}",
                status, body
            )));
        }

        // iTunes answers with text/javascript, so decode from text
        let response_text = response.text().await?;
        let parsed: ItunesResponse = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize iTunes response");
            AppError::ExternalApi(format!("Failed to parse iTunes response: {}", e))
        })?;

        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl AppStoreProvider for ItunesProvider {
    async fn search(&self, term: &str, country: &str) -> AppResult<Option<StoreRecord>> {
        if term.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search term cannot be empty".to_string(),
            ));
        }

        let response = self
            .fetch(
                "search",
                &[
                    ("term", term),
                    ("country", country),
                    ("media", MEDIA_SOFTWARE),
                    ("limit", SEARCH_LIMIT),
                ],
            )
            .await?;

        let record = response.first_record();

        tracing::info!(
            term = %term,
            country = %country,
            matched = record.is_some(),
            provider = "itunes",
            "App search completed"
        );

        Ok(record)
    }

    async fn lookup(&self, app_id: u64) -> AppResult<Option<StoreRecord>> {
        let id = app_id.to_string();
        let response = self.fetch("lookup", &[("id", id.as_str())]).await?;

        if response.result_count == 0 {
            return Ok(None);
        }

        Ok(response.first_record())
    }

    fn name(&self) -> &'static str {
        "itunes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_provider(api_url: String) -> ItunesProvider {
        ItunesProvider::new(api_url, Duration::from_secs(5)).unwrap()
    }

    fn listing(id: u64, name: &str) -> serde_json::Value {
        json!({
            "trackId": id,
            "trackName": name,
            "trackViewUrl": format!("https://apps.apple.com/kr/app/id{}", id),
            "artworkUrl512": format!("https://is1-ssl.mzstatic.com/{}/512x512bb.jpg", id)
        })
    }

    #[tokio::test]
    async fn test_search_sends_storefront_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("term", "카카오톡"))
            .and(query_param("country", "KR"))
            .and(query_param("media", "software"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCount": 1,
                "results": [listing(362057947, "카카오톡 KakaoTalk")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = create_test_provider(server.uri());
        let record = provider.search("카카오톡", "KR").await.unwrap().unwrap();

        assert_eq!(record.app_name, "카카오톡 KakaoTalk");
        assert_eq!(record.app_id, 362057947);
        assert_eq!(record.app_store_url, "https://apps.apple.com/kr/app/id362057947");
        assert_eq!(
            record.app_icon_url,
            "https://is1-ssl.mzstatic.com/362057947/512x512bb.jpg"
        );
    }

    #[tokio::test]
    async fn test_search_no_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "resultCount": 0, "results": [] })),
            )
            .mount(&server)
            .await;

        let provider = create_test_provider(server.uri());
        let record = provider.search("없는앱이름xyz", "KR").await.unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_search_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = create_test_provider(server.uri());
        let err = provider.search("토스", "KR").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(_)));
    }

    #[tokio::test]
    async fn test_search_accepts_javascript_content_type() {
        let server = MockServer::start().await;

        let body = json!({ "resultCount": 1, "results": [listing(1, "Toss")] }).to_string();
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/javascript"))
            .mount(&server)
            .await;

        let provider = create_test_provider(server.uri());
        let record = provider.search("토스", "KR").await.unwrap();
        assert_eq!(record.map(|r| r.app_name), Some("Toss".to_string()));
    }

    #[tokio::test]
    async fn test_search_empty_term_rejected() {
        let provider = create_test_provider("http://127.0.0.1:9".to_string());
        let err = provider.search("   ", "KR").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_lookup_by_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/lookup"))
            .and(query_param("id", "123456789"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCount": 1,
                "results": [listing(123456789, "Fresh App")]
            })))
            .mount(&server)
            .await;

        let provider = create_test_provider(server.uri());
        let record = provider.lookup(123456789).await.unwrap().unwrap();
        assert_eq!(
            record.app_icon_url,
            "https://is1-ssl.mzstatic.com/123456789/512x512bb.jpg"
        );
    }

    #[tokio::test]
    async fn test_lookup_zero_result_count() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/lookup"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "resultCount": 0, "results": [] })),
            )
            .mount(&server)
            .await;

        let provider = create_test_provider(server.uri());
        assert!(provider.lookup(1).await.unwrap().is_none());
    }
}

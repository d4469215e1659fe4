use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{AppSuggestion, ChatMessage, ReconciledSuggestion, UserProfile},
    services::{
        icons::IconVerifier,
        json_extract::extract_json_array,
        providers::{AppStoreProvider, CompletionProvider, ItunesProvider, OpenAiProvider},
        reconciler::Reconciler,
    },
};

/// Number of apps every successful recommendation must contain
pub const SUGGESTION_COUNT: usize = 5;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Renders the user prompt for a profile
///
/// The prompt pins the answer to a JSON array of five objects with the keys
/// `app_name`, `app_store_url`, `app_icon_url` and `strength`, drawn from the
/// Korean App Store.
pub fn build_prompt(profile: &UserProfile) -> String {
    let example: Vec<String> = (1..=SUGGESTION_COUNT)
        .map(|i| {
            format!(
                r#"        {{"app_name": "앱{i}", "app_store_url": "앱{i}의 앱스토어 URL", "app_icon_url": "앱{i}의 아이콘 URL", "strength": "앱{i}의 강점"}}"#
            )
        })
        .collect();

    format!(
        "사용자 정보:
- 카테고리: {categories}
- 성별: {gender}
- 연령대: {age_group}
- 앱 추구 가치: {values}
- 최애 앱: {favorite_app}

위 정보를 바탕으로 한국 앱스토어의 앱을 {count}개 추천해주세요. JSON 형식으로 응답하세요.
```json
[
{example}
]
```",
        categories = profile.categories_line(),
        gender = profile.gender,
        age_group = profile.age_group,
        values = profile.values_line(),
        favorite_app = profile.favorite_app,
        count = SUGGESTION_COUNT,
        example = example.join(",\n"),
    )
}

/// Pulls exactly five suggestions out of raw model output
///
/// The element count is checked before the elements themselves are decoded,
/// so a short or long answer always reports `WrongCount`. An element only
/// fails to decode when it has no string `app_name`.
pub fn parse_suggestions(raw: &str) -> AppResult<Vec<AppSuggestion>> {
    let json = extract_json_array(raw).ok_or(AppError::NoJsonFound)?;

    let items: Vec<serde_json::Value> = serde_json::from_str(json)?;
    if items.len() != SUGGESTION_COUNT {
        return Err(AppError::WrongCount(items.len()));
    }

    let suggestions = items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<AppSuggestion>, _>>()?;

    Ok(suggestions)
}

/// Asks the model for apps matching a profile and reconciles them with the store
pub struct Recommender {
    completion: Arc<dyn CompletionProvider>,
    reconciler: Reconciler,
}

impl Recommender {
    pub fn new(completion: Arc<dyn CompletionProvider>, reconciler: Reconciler) -> Self {
        Self {
            completion,
            reconciler,
        }
    }

    /// Wires the OpenAI and iTunes providers from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let completion: Arc<dyn CompletionProvider> =
            Arc::new(OpenAiProvider::from_config(config)?);
        let store: Arc<dyn AppStoreProvider> = Arc::new(ItunesProvider::from_config(config)?);

        let mut reconciler = Reconciler::new(
            store.clone(),
            config.store_country.clone(),
            config.store_timeout(),
        );

        if config.verify_icons {
            let verifier =
                IconVerifier::new(store, config.store_timeout(), config.image_timeout())?;
            reconciler = reconciler.with_icon_verifier(verifier);
        }

        Ok(Self::new(completion, reconciler))
    }

    /// Gets five raw suggestions from the model
    pub async fn request_suggestions(
        &self,
        profile: &UserProfile,
    ) -> AppResult<Vec<AppSuggestion>> {
        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_prompt(profile)),
        ];

        let raw = self.completion.complete(&messages).await?;
        tracing::debug!(output = %raw, provider = self.completion.name(), "Raw model output");

        parse_suggestions(&raw).map_err(|e| {
            tracing::warn!(error = %e, "Model output did not match the suggestion contract");
            e
        })
    }

    /// Full flow: prompt, model call, extraction, then store reconciliation
    pub async fn recommend(&self, profile: &UserProfile) -> AppResult<Vec<ReconciledSuggestion>> {
        let suggestions = self.request_suggestions(profile).await?;
        Ok(self.reconciler.reconcile(suggestions).await)
    }
}

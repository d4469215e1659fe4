use regex::Regex;
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::ReconciledSuggestion,
    services::{best_effort::best_effort, providers::AppStoreProvider},
};

/// Shown in place of an icon that cannot be fetched
pub const PLACEHOLDER_ICON_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/a/ac/No_image_available.svg";

/// Pulls the numeric app ID out of a store URL (`.../id1234567890`)
pub fn extract_app_id(store_url: &str) -> Option<u64> {
    let re = Regex::new(r"id(\d+)").ok()?;
    re.captures(store_url)?.get(1)?.as_str().parse().ok()
}

/// Current icon URL for the app a store URL points at, if it can be found
pub async fn latest_icon_url(
    store: &dyn AppStoreProvider,
    store_url: &str,
    budget: Duration,
) -> Option<String> {
    let app_id = extract_app_id(store_url)?;
    let record = best_effort("icon_lookup", budget, None, store.lookup(app_id)).await?;
    Some(record.app_icon_url).filter(|url| !url.is_empty())
}

/// Refreshes an icon via lookup-by-ID, returning `store_url` unchanged when
/// the URL carries no ID or the lookup comes back empty or fails.
pub async fn refresh_icon_url(
    store: &dyn AppStoreProvider,
    store_url: &str,
    budget: Duration,
) -> String {
    latest_icon_url(store, store_url, budget)
        .await
        .unwrap_or_else(|| store_url.to_string())
}

async fn probe_image(client: &HttpClient, image_url: &str) -> AppResult<String> {
    let response = client.head(image_url).send().await?;

    if !response.status().is_success() {
        return Err(AppError::ExternalApi(format!(
            "Image probe returned status {}",
            response.status()
        )));
    }

    Ok(image_url.to_string())
}

/// Returns `image_url` if a HEAD probe succeeds, otherwise the placeholder
pub async fn validate_image_url(client: &HttpClient, image_url: &str, budget: Duration) -> String {
    best_effort(
        "image_probe",
        budget,
        PLACEHOLDER_ICON_URL.to_string(),
        probe_image(client, image_url),
    )
    .await
}

/// Post-reconciliation icon pass
///
/// Entries the store search could not confirm get their icon refreshed from
/// the ID in their store URL. Every icon is then probed and swapped for the
/// placeholder when unreachable.
#[derive(Clone)]
pub struct IconVerifier {
    store: Arc<dyn AppStoreProvider>,
    http_client: HttpClient,
    lookup_budget: Duration,
    probe_budget: Duration,
}

impl IconVerifier {
    pub fn new(
        store: Arc<dyn AppStoreProvider>,
        lookup_budget: Duration,
        probe_budget: Duration,
    ) -> AppResult<Self> {
        // reqwest follows redirects by default, which the probe relies on
        let http_client = HttpClient::builder().timeout(probe_budget).build()?;

        Ok(Self {
            store,
            http_client,
            lookup_budget,
            probe_budget,
        })
    }

    pub async fn verify(
        &self,
        suggestion: ReconciledSuggestion,
        store_matched: bool,
    ) -> ReconciledSuggestion {
        let mut icon = suggestion.app_icon_url().map(str::to_string);

        if !store_matched {
            if let Some(store_url) = suggestion.app_store_url() {
                if let Some(fresh) =
                    latest_icon_url(self.store.as_ref(), store_url, self.lookup_budget).await
                {
                    icon = Some(fresh);
                }
            }
        }

        let checked = match icon {
            Some(url) => validate_image_url(&self.http_client, &url, self.probe_budget).await,
            None => PLACEHOLDER_ICON_URL.to_string(),
        };

        suggestion.with_icon_url(checked)
    }
}

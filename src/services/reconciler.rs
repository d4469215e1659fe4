use std::sync::Arc;
use std::time::Duration;

use crate::{
    models::{AppSuggestion, ReconciledSuggestion},
    services::{
        icons::IconVerifier, providers::AppStoreProvider, store_lookup::find_store_record,
    },
};

/// Replaces model-invented store fields with verified store data
///
/// Each suggestion is looked up independently (duplicates included) on its
/// own task. Output order always matches input order. A suggestion without a
/// store match is passed through unchanged.
pub struct Reconciler {
    store: Arc<dyn AppStoreProvider>,
    country: String,
    budget: Duration,
    icon_verifier: Option<IconVerifier>,
}

impl Reconciler {
    pub fn new(store: Arc<dyn AppStoreProvider>, country: String, budget: Duration) -> Self {
        Self {
            store,
            country,
            budget,
            icon_verifier: None,
        }
    }

    /// Enables the icon refresh and reachability pass after reconciliation
    pub fn with_icon_verifier(mut self, verifier: IconVerifier) -> Self {
        self.icon_verifier = Some(verifier);
        self
    }

    pub async fn reconcile(&self, suggestions: Vec<AppSuggestion>) -> Vec<ReconciledSuggestion> {
        let mut tasks = Vec::with_capacity(suggestions.len());

        for suggestion in suggestions {
            let store = self.store.clone();
            let country = self.country.clone();
            let budget = self.budget;
            let verifier = self.icon_verifier.clone();
            let original = suggestion.clone();

            let task = tokio::spawn(async move {
                let app_name = suggestion.app_name();
                let record = find_store_record(store.as_ref(), app_name, &country, budget).await;

                let merged = match &record {
                    Some(record) => suggestion.reconcile_with(record),
                    None => suggestion,
                };

                match verifier {
                    Some(verifier) => verifier.verify(merged, record.is_some()).await,
                    None => merged,
                }
            });

            tasks.push((task, original));
        }

        let mut reconciled = Vec::with_capacity(tasks.len());
        let mut changed = 0usize;

        for (task, original) in tasks {
            match task.await {
                Ok(suggestion) => {
                    if suggestion != original {
                        changed += 1;
                    }
                    reconciled.push(suggestion);
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        app_name = %original.app_name(),
                        "Reconcile task failed"
                    );
                    reconciled.push(original);
                }
            }
        }

        tracing::info!(
            total = reconciled.len(),
            changed,
            country = %self.country,
            provider = self.store.name(),
            "Suggestions reconciled"
        );

        reconciled
    }
}

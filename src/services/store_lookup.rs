use std::time::Duration;

use crate::{
    models::StoreRecord,
    services::{best_effort::best_effort, providers::AppStoreProvider},
};

/// Finds the store listing for an app name in one storefront
///
/// Returns `None` when the store has no match or the search fails in any way.
/// Absence is an ordinary outcome here, never an error.
pub async fn find_store_record(
    store: &dyn AppStoreProvider,
    app_name: &str,
    country: &str,
    budget: Duration,
) -> Option<StoreRecord> {
    best_effort("store_search", budget, None, store.search(app_name, country)).await
}

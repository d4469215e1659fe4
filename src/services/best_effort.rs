use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Runs an external lookup whose failure must never reach the caller
///
/// Returns the lookup's value when it completes successfully within `budget`.
/// On a timeout or an error of any kind the `fallback` is returned instead and
/// the reason is logged under `label`.
pub async fn best_effort<T, E, F>(label: &str, budget: Duration, fallback: T, lookup: F) -> T
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match tokio::time::timeout(budget, lookup).await {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            tracing::warn!(lookup = label, error = %e, "Lookup failed, using fallback");
            fallback
        }
        Err(_) => {
            tracing::warn!(
                lookup = label,
                budget_ms = budget.as_millis() as u64,
                "Lookup timed out, using fallback"
            );
            fallback
        }
    }
}

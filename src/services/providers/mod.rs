/// External data provider abstractions
///
/// The recommendation flow talks to two upstreams: a chat completion model that
/// proposes apps, and an app store that confirms them. Each sits behind a
/// trait so the flow can be exercised without the network.
use crate::{
    error::AppResult,
    models::{ChatMessage, StoreRecord},
};

pub mod itunes;
pub mod openai;

pub use itunes::ItunesProvider;
pub use openai::OpenAiProvider;

/// Trait for language model completion providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends the conversation and returns the text of the first completion
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for app store catalog providers
///
/// Both operations return `Ok(None)` when the store has no matching listing.
/// Errors are reserved for transport or protocol failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AppStoreProvider: Send + Sync {
    /// Searches one storefront for software and returns the most relevant listing
    async fn search(&self, term: &str, country: &str) -> AppResult<Option<StoreRecord>>;

    /// Looks up a listing by its numeric store identifier
    async fn lookup(&self, app_id: u64) -> AppResult<Option<StoreRecord>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

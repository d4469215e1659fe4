pub mod best_effort;
pub mod icons;
pub mod json_extract;
pub mod providers;
pub mod reconciler;
pub mod recommendations;
pub mod store_lookup;

pub use reconciler::Reconciler;
pub use recommendations::Recommender;

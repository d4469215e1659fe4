//! App recommendation service
//!
//! Takes a user profile, asks a chat completion model for five matching apps,
//! and checks each against the iTunes Search API so store links and icons
//! come from the store rather than the model.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

use serde::{Deserialize, Serialize};

/// Profile submitted by the client for a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Preferred app categories
    pub category: Vec<String>,
    /// Gender as entered by the user
    pub gender: String,
    /// Age bracket, e.g. "20대"
    pub age_group: String,
    /// What the user values in an app
    pub values: Vec<String>,
    /// The user's favorite app
    pub favorite_app: String,
}

impl UserProfile {
    /// Categories joined for display in a prompt
    pub fn categories_line(&self) -> String {
        self.category.join(", ")
    }

    /// Values joined for display in a prompt
    pub fn values_line(&self) -> String {
        self.values.join(", ")
    }
}

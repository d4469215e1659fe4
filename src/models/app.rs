use serde::{de::Error as _, Deserialize, Serialize};
use serde_json::{Map, Value};

/// One app suggested by the language model
///
/// Holds the object exactly as the model sent it. URLs may be stale,
/// malformed, null or missing, and any extra keys are kept; only a string
/// `app_name` is required. Serializes back to the original object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct AppSuggestion {
    raw: Map<String, Value>,
}

/// A suggestion after its store fields were checked against the store
///
/// Same shape as [`AppSuggestion`]; when no listing matched it is the
/// original suggestion, unchanged.
pub type ReconciledSuggestion = AppSuggestion;

#[derive(Deserialize)]
struct RequiredFields {
    #[allow(dead_code)]
    app_name: String,
}

impl TryFrom<Value> for AppSuggestion {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        RequiredFields::deserialize(&value)?;

        match value {
            Value::Object(raw) => Ok(Self { raw }),
            other => Err(serde_json::Error::custom(format!(
                "expected a suggestion object, found {}",
                other
            ))),
        }
    }
}

impl From<AppSuggestion> for Value {
    fn from(suggestion: AppSuggestion) -> Self {
        Value::Object(suggestion.raw)
    }
}

impl AppSuggestion {
    fn text(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    pub fn app_name(&self) -> &str {
        self.text("app_name").unwrap_or_default()
    }

    /// Store URL, when the model sent one as a string
    pub fn app_store_url(&self) -> Option<&str> {
        self.text("app_store_url")
    }

    /// Icon URL, when the model sent one as a string
    pub fn app_icon_url(&self) -> Option<&str> {
        self.text("app_icon_url")
    }

    pub fn strength(&self) -> Option<&str> {
        self.text("strength")
    }

    /// Same suggestion with its icon URL replaced
    pub fn with_icon_url(mut self, icon_url: String) -> Self {
        self.raw
            .insert("app_icon_url".to_string(), Value::String(icon_url));
        self
    }

    /// Merges a store listing into this suggestion
    ///
    /// The result has exactly the four response keys: name, store URL and
    /// icon from the listing, `strength` as the model sent it (`null` when
    /// the model left it out).
    pub fn reconcile_with(&self, record: &StoreRecord) -> ReconciledSuggestion {
        let mut raw = Map::new();
        raw.insert("app_name".to_string(), record.app_name.clone().into());
        raw.insert(
            "app_store_url".to_string(),
            record.app_store_url.clone().into(),
        );
        raw.insert(
            "app_icon_url".to_string(),
            record.app_icon_url.clone().into(),
        );
        raw.insert(
            "strength".to_string(),
            self.raw.get("strength").cloned().unwrap_or(Value::Null),
        );
        ReconciledSuggestion { raw }
    }
}

/// Authoritative listing returned by the app store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreRecord {
    pub app_name: String,
    pub app_store_url: String,
    pub app_icon_url: String,
    pub app_id: u64,
}

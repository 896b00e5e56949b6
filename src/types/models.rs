use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    /// Locale tag used by lookup clients, e.g. "fr" or "pt-BR".
    pub code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub key: String,
    pub text: String,
    pub domain_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub id: String,
    pub text: String,
    pub language_id: String,
    pub source_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationWithLanguage {
    #[serde(flatten)]
    pub translation: Translation,
    pub language: Language,
}

/// A source with its domain and every translation, as shown on the source page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDetail {
    #[serde(flatten)]
    pub source: Source,
    pub domain: Domain,
    pub translations: Vec<TranslationWithLanguage>,
}

/// Row of the source listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSummary {
    #[serde(flatten)]
    pub source: Source,
    pub domain_name: String,
    pub translation_count: i64,
}

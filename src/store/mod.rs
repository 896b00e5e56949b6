mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;
    /// Returns true once `initialize` has created every table.
    fn is_initialized(&self) -> Result<bool>;

    // Domain operations
    fn create_domain(&self, domain: &Domain) -> Result<()>;
    fn get_domain(&self, id: &str) -> Result<Option<Domain>>;
    fn get_domain_by_name(&self, name: &str) -> Result<Option<Domain>>;
    fn list_domains(&self) -> Result<Vec<Domain>>;
    fn delete_domain(&self, id: &str) -> Result<bool>;
    fn count_domain_sources(&self, id: &str) -> Result<i64>;

    // Language operations
    fn create_language(&self, language: &Language) -> Result<()>;
    fn get_language(&self, id: &str) -> Result<Option<Language>>;
    fn get_language_by_name(&self, name: &str) -> Result<Option<Language>>;
    fn get_language_by_code(&self, code: &str) -> Result<Option<Language>>;
    fn list_languages(&self) -> Result<Vec<Language>>;
    fn delete_language(&self, id: &str) -> Result<bool>;
    fn count_language_translations(&self, id: &str) -> Result<i64>;

    // Source operations
    /// Inserts the source and all of its translations in one transaction.
    fn create_source(&self, source: &Source, translations: &[Translation]) -> Result<()>;
    fn get_source(&self, id: &str) -> Result<Option<Source>>;
    fn get_source_by_key(&self, key: &str) -> Result<Option<Source>>;
    fn get_source_detail(&self, id: &str) -> Result<Option<SourceDetail>>;
    fn query_sources(&self, query: &SourceQuery) -> Result<Page<SourceSummary>>;
    fn update_source(&self, source: &Source) -> Result<()>;
    /// Deleting a source removes its translations.
    fn delete_source(&self, id: &str) -> Result<bool>;

    // Translation operations
    fn create_translation(&self, translation: &Translation) -> Result<()>;
    fn get_translation(&self, id: &str) -> Result<Option<Translation>>;
    fn list_source_translations(&self, source_id: &str) -> Result<Vec<TranslationWithLanguage>>;
    fn update_translation(&self, translation: &Translation) -> Result<()>;
    fn delete_translation(&self, id: &str) -> Result<bool>;

    /// Resolves a source key and language code to the stored translation text.
    fn resolve_translation(&self, key: &str, code: &str) -> Result<Option<String>>;
}

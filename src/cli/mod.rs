mod commands;
mod domain;
mod language;
mod lookup;
pub mod pickers;
mod snippet;
mod source;
mod translation;

pub use commands::{DomainCommands, LanguageCommands, SourceCommands, TranslationCommands};
pub use domain::{run_domain_add, run_domain_list, run_domain_remove};
pub use language::{run_language_add, run_language_list, run_language_remove};
pub use lookup::{LookupClient, run_lookup};
pub use snippet::run_snippet;
pub use source::{
    SourceAddArgs, SourceListArgs, run_source_add, run_source_edit, run_source_list,
    run_source_remove, run_source_show,
};
pub use translation::{run_translation_remove, run_translation_set};

use crate::config::DB_FILE_NAME;
use crate::store::{SqliteStore, Store};

/// Initialize store from data directory, checking it exists
pub fn init_store(data_dir: &str) -> anyhow::Result<SqliteStore> {
    let data_path: std::path::PathBuf = data_dir.into();
    let db_path = data_path.join(DB_FILE_NAME);

    if !db_path.exists() {
        anyhow::bail!(
            "Database not found at {}. Run 'polyglot init' first.",
            db_path.display()
        );
    }

    let store = SqliteStore::new(&db_path)?;
    if !store.is_initialized()? {
        anyhow::bail!(
            "Database at {} is not initialized. Run 'polyglot init' first.",
            db_path.display()
        );
    }

    Ok(store)
}

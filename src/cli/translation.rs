use chrono::Utc;
use uuid::Uuid;

use crate::server::validation::validate_text;
use crate::store::Store;
use crate::types::Translation;

use super::init_store;
use super::pickers::confirm_action;

pub fn run_translation_set(
    data_dir: String,
    key: String,
    code: String,
    text: String,
    created_by: Option<String>,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let text = validate_text(&text, "Translation text").map_err(anyhow::Error::msg)?;
    let source = store
        .get_source_by_key(&key)?
        .ok_or_else(|| anyhow::anyhow!("Source not found: {}", key))?;
    let language = store
        .get_language_by_code(&code)?
        .ok_or_else(|| anyhow::anyhow!("Language not found: {}", code))?;

    let existing = store
        .list_source_translations(&source.id)?
        .into_iter()
        .find(|t| t.language.id == language.id);

    let now = Utc::now();
    if let Some(existing) = existing {
        let mut translation = existing.translation;
        translation.text = text;
        translation.updated_at = now;
        store.update_translation(&translation)?;

        println!();
        println!("Updated {} translation of \"{}\"", language.name, source.key);
        println!();
    } else {
        let translation = Translation {
            id: Uuid::new_v4().to_string(),
            text,
            language_id: language.id,
            source_id: source.id,
            created_by_id: created_by,
            created_at: now,
            updated_at: now,
        };
        store.create_translation(&translation)?;

        println!();
        println!("Added {} translation of \"{}\"", language.name, source.key);
        println!();
    }

    Ok(())
}

pub fn run_translation_remove(
    data_dir: String,
    key: String,
    code: String,
    non_interactive: bool,
    yes: bool,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let source = store
        .get_source_by_key(&key)?
        .ok_or_else(|| anyhow::anyhow!("Source not found: {}", key))?;

    let existing = store
        .list_source_translations(&source.id)?
        .into_iter()
        .find(|t| t.language.code == code)
        .ok_or_else(|| anyhow::anyhow!("\"{}\" has no '{}' translation", key, code))?;

    let confirmed = confirm_action(
        &format!(
            "Delete the {} translation of '{}'?",
            existing.language.name, source.key
        ),
        yes,
        non_interactive,
    )?;

    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete_translation(&existing.translation.id)?;

    println!();
    println!(
        "Deleted {} translation of '{}'",
        existing.language.name, source.key
    );
    println!();

    Ok(())
}

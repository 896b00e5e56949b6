use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::server::validation::{validate_language_code, validate_language_name};
use crate::store::Store;
use crate::types::Language;

use super::init_store;
use super::pickers::{confirm_action, require_value};

#[derive(Serialize)]
struct LanguageOutput {
    id: String,
    name: String,
    code: String,
    translations: i64,
}

pub fn run_language_add(
    data_dir: String,
    name: Option<String>,
    code: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let name = require_value(
        name,
        "Language name:",
        "--name",
        non_interactive,
        validate_language_name,
    )?;
    let code = require_value(
        code,
        "Language code:",
        "--code",
        non_interactive,
        validate_language_code,
    )?;

    if store.get_language_by_name(&name)?.is_some() {
        anyhow::bail!("Language '{}' already exists", name);
    }
    if store.get_language_by_code(&code)?.is_some() {
        anyhow::bail!("Language code '{}' already exists", code);
    }

    let language = Language {
        id: Uuid::new_v4().to_string(),
        name,
        code,
        created_at: Utc::now(),
    };

    store.create_language(&language)?;

    println!();
    println!("Created language \"{}\" ({})", language.name, language.code);
    println!();

    Ok(())
}

pub fn run_language_list(data_dir: String, json: bool) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let languages = store
        .list_languages()?
        .into_iter()
        .map(|l| -> anyhow::Result<LanguageOutput> {
            Ok(LanguageOutput {
                translations: store.count_language_translations(&l.id)?,
                id: l.id,
                name: l.name,
                code: l.code,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&languages)?);
        return Ok(());
    }

    if languages.is_empty() {
        println!("No languages found.");
        return Ok(());
    }

    for l in &languages {
        println!(
            "{:<10} {:<24} {:>5} translation(s)",
            l.code, l.name, l.translations
        );
    }

    Ok(())
}

pub fn run_language_remove(
    data_dir: String,
    code: Option<String>,
    non_interactive: bool,
    yes: bool,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let code = require_value(
        code,
        "Language code:",
        "--code",
        non_interactive,
        validate_language_code,
    )?;

    let language = store
        .get_language_by_code(&code)?
        .ok_or_else(|| anyhow::anyhow!("Language not found: {}", code))?;

    let translations = store.count_language_translations(&language.id)?;
    if translations > 0 {
        anyhow::bail!(
            "Cannot delete language '{}' - it still has {} translation(s)",
            language.name,
            translations
        );
    }

    let confirmed = confirm_action(
        &format!("Delete language '{}' ({})?", language.name, language.code),
        yes,
        non_interactive,
    )?;

    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete_language(&language.id)?;

    println!();
    println!("Deleted language '{}'", language.name);
    println!();

    Ok(())
}

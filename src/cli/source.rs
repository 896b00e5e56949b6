use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::server::validation::{validate_source_key, validate_text};
use crate::store::Store;
use crate::types::{Domain, SortDirection, SortField, Source, SourceQuery, Translation};

use super::init_store;
use super::pickers::{confirm_action, pick_domain, require_value};

/// Splits a `CODE=TEXT` argument.
fn parse_translation_arg(arg: &str) -> anyhow::Result<(String, String)> {
    let (code, text) = arg
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Invalid translation '{}', expected CODE=TEXT", arg))?;
    let code = code.trim();
    if code.is_empty() {
        anyhow::bail!("Invalid translation '{}', language code is empty", arg);
    }
    let text = validate_text(text, "Translation text").map_err(anyhow::Error::msg)?;
    Ok((code.to_string(), text))
}

fn resolve_domain(store: &impl Store, name: &str) -> anyhow::Result<Domain> {
    store
        .get_domain_by_name(name)?
        .ok_or_else(|| anyhow::anyhow!("Domain not found: {}", name))
}

fn validate_source_text(text: &str) -> Result<String, String> {
    validate_text(text, "Source text")
}

pub struct SourceAddArgs {
    pub key: Option<String>,
    pub text: Option<String>,
    pub domain: Option<String>,
    pub translations: Vec<String>,
    pub created_by: Option<String>,
    pub non_interactive: bool,
}

pub fn run_source_add(data_dir: String, args: SourceAddArgs) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;
    let non_interactive = args.non_interactive;

    let key = require_value(
        args.key,
        "Key:",
        "--key",
        non_interactive,
        validate_source_key,
    )?;

    if store.get_source_by_key(&key)?.is_some() {
        anyhow::bail!("Source '{}' already exists", key);
    }

    let text = require_value(
        args.text,
        "Text:",
        "--text",
        non_interactive,
        validate_source_text,
    )?;

    let domain = if let Some(name) = args.domain {
        resolve_domain(&store, &name)?
    } else if non_interactive {
        anyhow::bail!("--domain is required in non-interactive mode");
    } else {
        match pick_domain(&store)? {
            Some(d) => d,
            None => return Ok(()),
        }
    };

    let now = Utc::now();
    let source = Source {
        id: Uuid::new_v4().to_string(),
        key,
        text,
        domain_id: domain.id,
        created_by_id: args.created_by,
        created_at: now,
        updated_at: now,
    };

    let mut seen = HashSet::new();
    let mut translations = Vec::with_capacity(args.translations.len());
    for arg in &args.translations {
        let (code, text) = parse_translation_arg(arg)?;
        if !seen.insert(code.clone()) {
            anyhow::bail!("Language '{}' is given more than once", code);
        }
        let language = store
            .get_language_by_code(&code)?
            .ok_or_else(|| anyhow::anyhow!("Language not found: {}", code))?;

        translations.push(Translation {
            id: Uuid::new_v4().to_string(),
            text,
            language_id: language.id,
            source_id: source.id.clone(),
            created_by_id: source.created_by_id.clone(),
            created_at: now,
            updated_at: now,
        });
    }

    store.create_source(&source, &translations)?;

    println!();
    println!(
        "Created source \"{}\" in {} with {} translation(s)",
        source.key,
        domain.name,
        translations.len()
    );
    println!();

    Ok(())
}

pub struct SourceListArgs {
    pub domain: Option<String>,
    pub language: Option<String>,
    pub search: Option<String>,
    pub sort: String,
    pub desc: bool,
    pub page: u32,
    pub per_page: u32,
    pub json: bool,
}

pub fn run_source_list(data_dir: String, args: SourceListArgs) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let domain_id = match args.domain {
        Some(name) => Some(resolve_domain(&store, &name)?.id),
        None => None,
    };
    let language_id = match args.language {
        Some(code) => Some(
            store
                .get_language_by_code(&code)?
                .ok_or_else(|| anyhow::anyhow!("Language not found: {}", code))?
                .id,
        ),
        None => None,
    };
    let sort = SortField::parse(&args.sort)
        .ok_or_else(|| anyhow::anyhow!("Unknown sort column: {}", args.sort))?;

    let query = SourceQuery {
        domain_id,
        language_id,
        search: args.search,
        sort,
        direction: if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        },
        page: args.page.max(1),
        per_page: args.per_page.clamp(1, crate::types::MAX_PER_PAGE),
    };

    let page = store.query_sources(&query)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
        return Ok(());
    }

    if page.items.is_empty() {
        println!("No sources found.");
        return Ok(());
    }

    for s in &page.items {
        println!(
            "{:<32} {:<16} {:>3} tr  {}",
            s.source.key, s.domain_name, s.translation_count, s.source.text
        );
    }
    println!();
    println!(
        "Page {} - showing {} of {} source(s)",
        query.page,
        page.items.len(),
        page.total
    );

    Ok(())
}

pub fn run_source_show(data_dir: String, key: String, json: bool) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let source = store
        .get_source_by_key(&key)?
        .ok_or_else(|| anyhow::anyhow!("Source not found: {}", key))?;
    let detail = store
        .get_source_detail(&source.id)?
        .ok_or_else(|| anyhow::anyhow!("Source not found: {}", key))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!("{}", detail.source.key);
    println!("  domain:  {}", detail.domain.name);
    println!("  text:    {}", detail.source.text);
    if let Some(author) = &detail.source.created_by_id {
        println!("  author:  {}", author);
    }
    println!("  updated: {}", detail.source.updated_at.to_rfc3339());
    println!();

    if detail.translations.is_empty() {
        println!("  No translations yet.");
    }
    for t in &detail.translations {
        println!(
            "  {:<8} {:<16} {}",
            t.language.code, t.language.name, t.translation.text
        );
    }

    Ok(())
}

pub fn run_source_edit(
    data_dir: String,
    key: String,
    text: Option<String>,
    domain: Option<String>,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    if text.is_none() && domain.is_none() {
        anyhow::bail!("Nothing to change: pass --text and/or --domain");
    }

    let mut source = store
        .get_source_by_key(&key)?
        .ok_or_else(|| anyhow::anyhow!("Source not found: {}", key))?;

    if let Some(text) = text {
        source.text = validate_source_text(&text).map_err(anyhow::Error::msg)?;
    }
    if let Some(name) = domain {
        source.domain_id = resolve_domain(&store, &name)?.id;
    }
    source.updated_at = Utc::now();

    store.update_source(&source)?;

    println!();
    println!("Updated source \"{}\"", source.key);
    println!();

    Ok(())
}

pub fn run_source_remove(
    data_dir: String,
    key: String,
    non_interactive: bool,
    yes: bool,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let source = store
        .get_source_by_key(&key)?
        .ok_or_else(|| anyhow::anyhow!("Source not found: {}", key))?;
    let translations = store.list_source_translations(&source.id)?.len();

    let confirmed = confirm_action(
        &format!(
            "Delete source '{}' and its {} translation(s)?",
            source.key, translations
        ),
        yes,
        non_interactive,
    )?;

    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete_source(&source.id)?;

    println!();
    println!("Deleted source '{}'", source.key);
    println!();

    Ok(())
}

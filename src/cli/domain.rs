use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::server::validation::validate_domain_name;
use crate::store::Store;
use crate::types::Domain;

use super::init_store;
use super::pickers::{confirm_action, pick_domain, require_value};

#[derive(Serialize)]
struct DomainOutput {
    id: String,
    name: String,
    sources: i64,
    created_at: String,
}

pub fn run_domain_add(
    data_dir: String,
    name: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let name = require_value(
        name,
        "Domain name:",
        "--name",
        non_interactive,
        validate_domain_name,
    )?;

    if store.get_domain_by_name(&name)?.is_some() {
        anyhow::bail!("Domain '{}' already exists", name);
    }

    let domain = Domain {
        id: Uuid::new_v4().to_string(),
        name: name.clone(),
        created_at: Utc::now(),
    };

    store.create_domain(&domain)?;

    println!();
    println!("Created domain \"{}\"", name);
    println!();

    Ok(())
}

pub fn run_domain_list(data_dir: String, json: bool) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let domains = store
        .list_domains()?
        .into_iter()
        .map(|d| -> anyhow::Result<DomainOutput> {
            Ok(DomainOutput {
                sources: store.count_domain_sources(&d.id)?,
                id: d.id,
                name: d.name,
                created_at: d.created_at.to_rfc3339(),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&domains)?);
        return Ok(());
    }

    if domains.is_empty() {
        println!("No domains found.");
        return Ok(());
    }

    for d in &domains {
        println!("{:<30} {:>5} source(s)  {}", d.name, d.sources, d.id);
    }

    Ok(())
}

pub fn run_domain_remove(
    data_dir: String,
    name: Option<String>,
    non_interactive: bool,
    yes: bool,
) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;

    let domain = if let Some(name) = name {
        store
            .get_domain_by_name(&name)?
            .ok_or_else(|| anyhow::anyhow!("Domain not found: {}", name))?
    } else if non_interactive {
        anyhow::bail!("--name is required in non-interactive mode");
    } else {
        match pick_domain(&store)? {
            Some(d) => d,
            None => return Ok(()),
        }
    };

    let sources = store.count_domain_sources(&domain.id)?;
    if sources > 0 {
        anyhow::bail!(
            "Cannot delete domain '{}' - it still has {} source(s)",
            domain.name,
            sources
        );
    }

    let confirmed = confirm_action(
        &format!("Delete domain '{}'?", domain.name),
        yes,
        non_interactive,
    )?;

    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete_domain(&domain.id)?;

    println!();
    println!("Deleted domain '{}'", domain.name);
    println!();

    Ok(())
}

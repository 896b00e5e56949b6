use std::fmt;

use inquire::{InquireError, Select, Text};

use crate::store::Store;
use crate::types::Domain;

/// Domain with its source count for display
pub struct DomainDisplay {
    pub domain: Domain,
    pub sources: i64,
}

impl fmt::Display for DomainDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.sources == 1 { "source" } else { "sources" };
        write!(f, "{} ({} {})", self.domain.name, self.sources, noun)
    }
}

pub fn pick_domain(store: &impl Store) -> anyhow::Result<Option<Domain>> {
    let domains = store
        .list_domains()?
        .into_iter()
        .map(|domain| -> anyhow::Result<DomainDisplay> {
            let sources = store.count_domain_sources(&domain.id)?;
            Ok(DomainDisplay { domain, sources })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if domains.is_empty() {
        println!("No domains found. Add one with 'polyglot domain add'.");
        return Ok(None);
    }

    let selection = Select::new("Select domain:", domains)
        .with_page_size(15)
        .with_help_message("Type to filter, Enter to select")
        .with_vim_mode(true)
        .prompt();

    match selection {
        Ok(display) => Ok(Some(display.domain)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Returns `value` validated, or prompts for it when interactive.
pub fn require_value(
    value: Option<String>,
    prompt: &str,
    flag: &str,
    non_interactive: bool,
    validate: fn(&str) -> Result<String, String>,
) -> anyhow::Result<String> {
    if let Some(v) = value {
        return validate(&v).map_err(anyhow::Error::msg);
    }
    if non_interactive {
        anyhow::bail!("{flag} is required in non-interactive mode");
    }

    let input = Text::new(prompt)
        .with_validator(move |input: &str| {
            Ok(validate(input)
                .map(|_| inquire::validator::Validation::Valid)
                .unwrap_or_else(|e| inquire::validator::Validation::Invalid(e.into())))
        })
        .prompt()?;

    validate(&input).map_err(anyhow::Error::msg)
}

pub fn confirm_action(message: &str, yes: bool, non_interactive: bool) -> anyhow::Result<bool> {
    if yes {
        Ok(true)
    } else if non_interactive {
        anyhow::bail!("--yes is required for destructive operations in non-interactive mode");
    } else {
        Ok(inquire::Confirm::new(message)
            .with_default(false)
            .prompt()?)
    }
}

use crate::snippets::{SnippetFormat, Snippets};
use crate::store::Store;

use super::init_store;

pub fn run_snippet(
    data_dir: String,
    key: String,
    format: String,
    base_url: String,
) -> anyhow::Result<()> {
    let format = SnippetFormat::parse(&format).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown format '{}'. Use xliff, properties, endpoint or angular",
            format
        )
    })?;

    let store = init_store(&data_dir)?;
    let source = store
        .get_source_by_key(&key)?
        .ok_or_else(|| anyhow::anyhow!("Source not found: {}", key))?;
    let detail = store
        .get_source_detail(&source.id)?
        .ok_or_else(|| anyhow::anyhow!("Source not found: {}", key))?;

    let blocks = Snippets::for_source(&detail, &base_url).render(format);
    if blocks.is_empty() {
        println!("\"{}\" has no translations yet.", key);
        return Ok(());
    }

    println!("{}", blocks.join("\n\n"));

    Ok(())
}

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::snippets::LOOKUP_PATH;

#[derive(Debug, Deserialize)]
struct LookupMessage {
    message: String,
}

/// Blocking client for a running server's public lookup endpoint.
pub struct LookupClient {
    client: Client,
    base_url: String,
}

impl LookupClient {
    pub fn new(server_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns `None` when the server has no translation for the pair.
    pub fn translate(&self, key: &str, code: &str) -> anyhow::Result<Option<String>> {
        let url = format!("{}{}", self.base_url, LOOKUP_PATH);
        let resp = self
            .client
            .get(&url)
            .query(&[("key", key), ("code", code)])
            .send()?;

        match resp.status() {
            StatusCode::OK => Ok(Some(resp.json()?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => {
                let message = resp
                    .json::<LookupMessage>()
                    .map(|m| m.message)
                    .unwrap_or_else(|_| "no details provided".into());
                anyhow::bail!("Server error ({}): {}", status, message)
            }
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

pub fn run_lookup(server: String, key: String, code: String) -> anyhow::Result<()> {
    let client = LookupClient::new(&server)?;

    match client.translate(&key, &code)? {
        Some(text) => {
            println!("{}", text);
            Ok(())
        }
        None => anyhow::bail!("Not found: no '{}' translation for \"{}\"", code, key),
    }
}

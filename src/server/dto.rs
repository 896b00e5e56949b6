use serde::{Deserialize, Serialize};

use crate::snippets::Snippets;
use crate::types::{
    DEFAULT_PER_PAGE, MAX_PER_PAGE, SortDirection, SortField, SourceQuery,
};

#[derive(Debug, Deserialize)]
pub struct CreateDomainRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateLanguageRequest {
    pub name: String,
    pub code: String,
}

/// A translation created together with its source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewTranslation {
    pub language_id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSourceRequest {
    pub key: String,
    pub text: String,
    pub domain_id: String,
    #[serde(default)]
    pub created_by_id: Option<String>,
    #[serde(default)]
    pub translations: Vec<NewTranslation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSourceRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub domain_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTranslationRequest {
    pub source_id: String,
    pub language_id: String,
    pub text: String,
    #[serde(default)]
    pub created_by_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTranslationRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language_id: Option<String>,
}

/// Query string of `GET /sources`.
#[derive(Debug, Default, Deserialize)]
pub struct ListSourcesParams {
    #[serde(default)]
    pub domain_id: Option<String>,
    #[serde(default)]
    pub language_id: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl ListSourcesParams {
    pub fn into_query(self) -> Result<SourceQuery, String> {
        let sort = match self.sort.as_deref() {
            None | Some("") => SortField::default(),
            Some(s) => SortField::parse(s).ok_or_else(|| format!("Unknown sort column: {s}"))?,
        };
        let direction = match self.direction.as_deref() {
            None | Some("") => SortDirection::default(),
            Some(s) => {
                SortDirection::parse(s).ok_or_else(|| format!("Unknown sort direction: {s}"))?
            }
        };

        Ok(SourceQuery {
            domain_id: self.domain_id.filter(|s| !s.is_empty()),
            language_id: self.language_id.filter(|s| !s.is_empty()),
            search: self.search.filter(|s| !s.trim().is_empty()),
            sort,
            direction,
            page: self.page.unwrap_or(1).max(1),
            per_page: self
                .per_page
                .unwrap_or(DEFAULT_PER_PAGE)
                .clamp(1, MAX_PER_PAGE),
        })
    }
}

/// Lookup input, from the query string or a JSON body.
#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SourceSnippetsResponse {
    pub base_url: String,
    #[serde(flatten)]
    pub snippets: Snippets,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_defaults() {
        let query = ListSourcesParams::default().into_query().unwrap();
        assert_eq!(query, SourceQuery::default());
    }

    #[test]
    fn test_list_params_clamp_and_parse() {
        let params = ListSourcesParams {
            domain_id: Some(String::new()),
            search: Some("  ".to_string()),
            sort: Some("domain".to_string()),
            direction: Some("desc".to_string()),
            page: Some(0),
            per_page: Some(1000),
            ..ListSourcesParams::default()
        };
        let query = params.into_query().unwrap();
        assert_eq!(query.domain_id, None);
        assert_eq!(query.search, None);
        assert_eq!(query.sort, SortField::Domain);
        assert_eq!(query.direction, SortDirection::Desc);
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_list_params_reject_unknown_sort() {
        let params = ListSourcesParams {
            sort: Some("id".to_string()),
            ..ListSourcesParams::default()
        };
        assert!(params.into_query().is_err());
    }
}

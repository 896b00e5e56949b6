use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u32 = 15;
pub const MAX_PER_PAGE: u32 = 100;

/// Column a source listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Key,
    Text,
    Domain,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn parse(s: &str) -> Option<SortField> {
        match s {
            "key" => Some(Self::Key),
            "text" => Some(Self::Text),
            "domain" => Some(Self::Domain),
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    /// SQL expression the store orders by. Only these fixed strings ever reach a query.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Key => "s.key",
            Self::Text => "s.text",
            Self::Domain => "d.name",
            Self::CreatedAt => "s.created_at",
            Self::UpdatedAt => "s.updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<SortDirection> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Filters, ordering and page window for listing sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    pub domain_id: Option<String>,
    /// Only sources that already have a translation in this language.
    pub language_id: Option<String>,
    /// Case-insensitive substring matched against key, text and domain name.
    pub search: Option<String>,
    pub sort: SortField,
    pub direction: SortDirection,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
}

impl Default for SourceQuery {
    fn default() -> Self {
        Self {
            domain_id: None,
            language_id: None,
            search: None,
            sort: SortField::default(),
            direction: SortDirection::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl SourceQuery {
    #[must_use]
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Escapes LIKE wildcards in the search term and wraps it for substring matching.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref()?.trim();
        if term.is_empty() {
            return None;
        }
        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for c in term.to_lowercase().chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Some(pattern)
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_field() {
        assert_eq!(SortField::parse("domain"), Some(SortField::Domain));
        assert_eq!(SortField::parse("updated_at"), Some(SortField::UpdatedAt));
        assert_eq!(SortField::parse("id; DROP TABLE sources"), None);
    }

    #[test]
    fn test_offset() {
        let query = SourceQuery {
            page: 3,
            per_page: 15,
            ..SourceQuery::default()
        };
        assert_eq!(query.offset(), 30);

        let first = SourceQuery {
            page: 0,
            ..SourceQuery::default()
        };
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        let query = SourceQuery {
            search: Some("  100%_Pay ".to_string()),
            ..SourceQuery::default()
        };
        assert_eq!(query.search_pattern().as_deref(), Some("%100\\%\\_pay%"));

        let blank = SourceQuery {
            search: Some("   ".to_string()),
            ..SourceQuery::default()
        };
        assert_eq!(blank.search_pattern(), None);
    }
}

//! Team token and team records, plus their JSON:API wire documents.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Page size used when walking the team token list.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// A team API token as reported by the organization listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamToken {
    pub id: String,
    pub description: Option<String>,
    pub team_id: String,
    pub created_at: Option<DateTime<Utc>>,
    /// `None` when the token has never been used.
    pub last_used_at: Option<DateTime<Utc>>,
    /// `None` when the token never expires.
    pub expired_at: Option<DateTime<Utc>>,
}

impl TeamToken {
    /// The description when one is set, otherwise the id.
    #[must_use]
    pub fn label(&self) -> &str {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => description,
            _ => &self.id,
        }
    }

    /// The non-empty description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: String,
    pub name: String,
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Pagination {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub prev_page: Option<u32>,
    #[serde(default)]
    pub next_page: Option<u32>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: u64,
}

impl Pagination {
    /// True once the current page is the last one the server reported.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamTokenPage {
    pub items: Vec<TeamToken>,
    pub pagination: Pagination,
}

/// Query options for one team token list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamTokenListOptions {
    pub page_number: Option<u32>,
    pub page_size: u32,
    /// Server-side filter on team name.
    pub query: Option<String>,
}

impl Default for TeamTokenListOptions {
    fn default() -> Self {
        Self {
            page_number: None,
            page_size: DEFAULT_PAGE_SIZE,
            query: None,
        }
    }
}

impl TeamTokenListOptions {
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page[size]", self.page_size.to_string())];
        if let Some(number) = self.page_number {
            pairs.push(("page[number]", number.to_string()));
        }
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("q", query.to_string()));
        }
        pairs
    }
}

// JSON:API documents

#[derive(Debug, Deserialize)]
pub(crate) struct TokenListDocument {
    #[serde(default)]
    pub data: Vec<TokenResource>,
    #[serde(default)]
    pub meta: ListMeta,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListMeta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResource {
    pub id: String,
    #[serde(default)]
    pub attributes: TokenAttributes,
    #[serde(default)]
    pub relationships: TokenRelationships,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct TokenAttributes {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expired_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenRelationships {
    #[serde(default)]
    pub team: Option<Relationship>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Relationship {
    pub data: Option<ResourceIdentifier>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResourceIdentifier {
    pub id: String,
}

impl From<TokenResource> for TeamToken {
    fn from(resource: TokenResource) -> Self {
        let team_id = resource
            .relationships
            .team
            .and_then(|team| team.data)
            .map(|data| data.id)
            .unwrap_or_default();
        Self {
            id: resource.id,
            description: resource.attributes.description,
            team_id,
            created_at: resource.attributes.created_at,
            last_used_at: resource.attributes.last_used_at,
            expired_at: resource.attributes.expired_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamDocument {
    pub data: TeamResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamResource {
    pub id: String,
    #[serde(default)]
    pub attributes: TeamAttributes,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TeamAttributes {
    #[serde(default)]
    pub name: String,
}

impl From<TeamResource> for Team {
    fn from(resource: TeamResource) -> Self {
        Self {
            id: resource.id,
            name: resource.attributes.name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorObject {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorDocument {
    /// Join error titles and details into one line.
    pub fn summary(&self) -> Option<String> {
        let parts: Vec<String> = self
            .errors
            .iter()
            .filter_map(|error| match (error.title.as_deref(), error.detail.as_deref()) {
                (Some(title), Some(detail)) if !detail.is_empty() => {
                    Some(format!("{title}: {detail}"))
                }
                (Some(title), _) => Some(title.to_string()),
                (None, Some(detail)) => Some(detail.to_string()),
                (None, None) => None,
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository model - the star of the show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Stable across pages
    pub id: u64,
    pub name: String,
    /// `owner/name`
    pub full_name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u32,
    pub forks: u32,
    pub open_issues: u32,
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub topics: Vec<String>,
    pub owner: Owner,
    /// Local UI flag only. Never sent anywhere, never persisted.
    #[serde(default)]
    pub starred: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
    pub profile_url: String,
}

/// Languages offered by the filter bar. Empty value means "all languages".
pub const LANGUAGE_OPTIONS: &[(&str, &str)] = &[
    ("", "All Languages"),
    ("JavaScript", "JavaScript"),
    ("TypeScript", "TypeScript"),
    ("Python", "Python"),
    ("Java", "Java"),
    ("Go", "Go"),
    ("Rust", "Rust"),
    ("C++", "C++"),
    ("Swift", "Swift"),
    ("Kotlin", "Kotlin"),
    ("PHP", "PHP"),
];

/// How the search endpoint should order results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Stars,
    Forks,
    Updated,
    Created,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Stars,
        SortKey::Forks,
        SortKey::Updated,
        SortKey::Created,
    ];

    /// Value of the `sort` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::Forks => "forks",
            SortKey::Updated => "updated",
            SortKey::Created => "created",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Stars => "Most Stars",
            SortKey::Forks => "Most Forks",
            SortKey::Updated => "Recently Updated",
            SortKey::Created => "Newest",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SortKey::Stars => SortKey::Forks,
            SortKey::Forks => SortKey::Updated,
            SortKey::Updated => SortKey::Created,
            SortKey::Created => SortKey::Stars,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            SortKey::Stars => SortKey::Created,
            SortKey::Forks => SortKey::Stars,
            SortKey::Updated => SortKey::Forks,
            SortKey::Created => SortKey::Updated,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stars" => Ok(SortKey::Stars),
            "forks" => Ok(SortKey::Forks),
            "updated" => Ok(SortKey::Updated),
            "created" | "newest" => Ok(SortKey::Created),
            other => Err(crate::Error::ConfigError(format!(
                "Unknown sort key '{}' (expected stars, forks, updated or created)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything that decides which page of results comes back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    /// 1-based
    pub page: u32,
    pub per_page: u32,
    pub language: Option<String>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub query: Option<String>,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            language: None,
            sort: SortKey::default(),
            order: SortOrder::default(),
            query: None,
        }
    }
}

impl FetchParams {
    /// Language filter with blank values treated as "no filter"
    pub fn language(&self) -> Option<&str> {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
    }

    pub fn query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Key for the page cache. The randomized created-date bound is
    /// deliberately not part of it.
    pub fn cache_key(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}-{}",
            self.page,
            self.per_page,
            self.language().unwrap_or_default(),
            self.sort,
            self.order,
            self.query().unwrap_or_default()
        )
    }
}

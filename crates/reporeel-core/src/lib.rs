// Core business logic lives here - the brain of the operation
pub mod colors;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetcher;
pub mod format;
pub mod models;
pub mod notify;
pub mod providers;
pub mod query;

pub use colors::{language_color, DEFAULT_LANGUAGE_COLOR};
pub use config::Config;
pub use error::Error;
pub use feed::{FeedController, FeedFilters, FeedStatus, FetchOutcome, FetchTicket};
pub use fetcher::{RepoFetcher, RepoSource};
pub use format::{format_number, format_relative_date};
pub use models::{FetchParams, Owner, Repository, SortKey, SortOrder};
pub use notify::{NotificationSink, Severity, Toast};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;

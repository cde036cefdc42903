// Provider implementations backing the fetch client
pub mod github;

pub use github::GitHubSource;

// GitHub search API client - the only remote we talk to
pub mod github;

// Re-export common types
pub use github::{
    GitHubClient, GitHubError, GitHubOwner, GitHubRepo, SearchRequest, SearchResponse,
    GITHUB_API_BASE, USER_AGENT,
};

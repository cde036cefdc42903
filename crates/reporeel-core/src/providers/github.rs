// GitHub source - bridges the API client with the RepoSource trait
use async_trait::async_trait;
use reporeel_api::{GitHubClient, GitHubRepo, SearchRequest};
use std::time::Duration;

use crate::{
    config::Config,
    fetcher::RepoSource,
    models::{Owner, Repository},
    Result,
};

/// Wrapper around GitHubClient that implements RepoSource
pub struct GitHubSource {
    client: GitHubClient,
}

impl GitHubSource {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GitHubClient::with_base_url(
            config.github.api_url.clone(),
            &config.github.user_agent,
            Duration::from_secs(config.github.timeout_secs),
        )?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl RepoSource for GitHubSource {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Repository>> {
        let response = self.client.search_repositories(request).await?;
        Ok(response.items.into_iter().map(github_to_repo).collect())
    }
}

/// Convert GitHub API repo to our internal Repository model
fn github_to_repo(gh: GitHubRepo) -> Repository {
    Repository {
        id: gh.id,
        name: gh.name,
        full_name: gh.full_name,
        description: gh.description,
        url: gh.html_url,
        stars: gh.stargazers_count,
        forks: gh.forks_count,
        open_issues: gh.open_issues_count,
        language: gh.language,
        updated_at: gh.updated_at,
        created_at: gh.created_at,
        topics: gh.topics,
        owner: Owner {
            login: gh.owner.login,
            avatar_url: gh.owner.avatar_url,
            profile_url: gh.owner.html_url,
        },
        starred: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use reporeel_api::GitHubOwner;

    #[test]
    fn test_github_to_repo_maps_native_fields() {
        let ts = Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap();
        let gh = GitHubRepo {
            id: 99,
            name: "zoxide".into(),
            full_name: "ajeetdsouza/zoxide".into(),
            description: Some("A smarter cd command".into()),
            html_url: "https://github.com/ajeetdsouza/zoxide".into(),
            stargazers_count: 20_000,
            forks_count: 500,
            open_issues_count: 40,
            language: Some("Rust".into()),
            updated_at: ts,
            created_at: ts,
            topics: vec!["shell".into()],
            owner: GitHubOwner {
                login: "ajeetdsouza".into(),
                avatar_url: "https://avatars.example/1".into(),
                html_url: "https://github.com/ajeetdsouza".into(),
            },
        };

        let repo = github_to_repo(gh);
        assert_eq!(repo.id, 99);
        assert_eq!(repo.stars, 20_000);
        assert_eq!(repo.open_issues, 40);
        assert_eq!(repo.url, "https://github.com/ajeetdsouza/zoxide");
        assert_eq!(repo.owner.profile_url, "https://github.com/ajeetdsouza");
        assert!(!repo.starred);
    }
}

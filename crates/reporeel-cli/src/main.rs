use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use reporeel_core::{
    format_number, format_relative_date,
    notify::LogSink,
    providers::GitHubSource,
    Config, FeedController, FeedFilters, FetchParams, NotificationSink, RepoFetcher, SortKey, Toast,
};
use reporeel_tui::{App, ToastQueue};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reporeel")]
#[command(version, about = "Endless feed of trending GitHub repositories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Browse the feed (default)
    Feed,
    /// Print one page of the feed and exit
    Fetch {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Free-text search
        #[arg(long)]
        query: Option<String>,
        /// Print JSON instead of cards
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config,
}

/// CLI flags win over the config file and env
#[derive(clap::Args, Debug, Default)]
struct Overrides {
    /// Language filter, e.g. Rust
    #[arg(long, global = true)]
    language: Option<String>,
    /// stars, forks, updated or created
    #[arg(long, global = true)]
    sort: Option<SortKey>,
    #[arg(long, global = true)]
    per_page: Option<u32>,
    /// Start in dark mode
    #[arg(long, global = true)]
    dark: bool,
    /// Search API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,
}

impl Overrides {
    fn apply(&self, config: &mut Config) {
        if let Some(language) = &self.language {
            config.feed.default_language = language.trim().to_string();
        }
        if let Some(sort) = self.sort {
            config.feed.default_sort = sort;
        }
        if let Some(per_page) = self.per_page {
            config.feed.per_page = per_page.max(1);
        }
        if self.dark {
            config.ui.dark_mode = true;
        }
        if let Some(url) = &self.api_url {
            config.github.api_url = url.clone();
        }
    }
}

fn load_config(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env();
            config
        }
        None => Config::load()?,
    };
    overrides.apply(&mut config);
    Ok(config)
}

/// The TUI owns the terminal, so its logs go to a file
fn init_tracing(to_file: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "reporeel=info".into());

    if to_file {
        let dir = Config::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        let path = dir.join("reporeel.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn build_fetcher(config: &Config) -> anyhow::Result<Arc<RepoFetcher>> {
    let source = GitHubSource::from_config(config)?;
    Ok(Arc::new(RepoFetcher::from_config(Arc::new(source), config)))
}

fn feed_filters(config: &Config) -> FeedFilters {
    FeedFilters {
        language: config.feed.default_language.clone(),
        sort: config.feed.default_sort,
        query: String::new(),
    }
}

async fn run_feed(config: Config) -> anyhow::Result<()> {
    let fetcher = build_fetcher(&config)?;
    let toasts = ToastQueue::new();

    let feed = FeedController::new(fetcher, Arc::new(toasts.clone()))
        .with_filters(feed_filters(&config))
        .with_per_page(config.feed.per_page)
        .with_order(config.feed.order);

    let app = App::new(feed, toasts, config.feed.scroll_margin, config.ui.dark_mode);
    reporeel_tui::run_tui(app).await
}

async fn run_fetch(config: Config, page: u32, query: Option<String>, json: bool) -> anyhow::Result<()> {
    let fetcher = build_fetcher(&config)?;
    let filters = feed_filters(&config);

    let params = FetchParams {
        page: page.max(1),
        per_page: config.feed.per_page,
        language: Some(filters.language).filter(|l| !l.is_empty()),
        sort: filters.sort,
        order: config.feed.order,
        query: query.map(|q| q.trim().to_string()).filter(|q| !q.is_empty()),
    };
    tracing::info!("Fetching page {} ({})", params.page, params.cache_key());

    let repos = match fetcher.fetch(&params).await {
        Ok(repos) => repos,
        Err(e) => {
            LogSink.notify(Toast::load_failed());
            anyhow::bail!("{}", e.user_message());
        }
    };

    if repos.is_empty() {
        LogSink.notify(Toast::end_of_feed());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&*repos)?);
        return Ok(());
    }

    if repos.is_empty() {
        println!("No repositories found");
        return Ok(());
    }

    let now = Utc::now();
    for repo in repos.iter() {
        println!(
            "★ {:>6}  ⑂ {:>6}  {}",
            format_number(repo.stars as u64),
            format_number(repo.forks as u64),
            repo.full_name
        );
        if let Some(desc) = &repo.description {
            println!("    {}", desc);
        }
        println!(
            "    {} · updated {} · {}",
            repo.language.as_deref().unwrap_or("Unknown"),
            format_relative_date(repo.updated_at, now),
            repo.url
        );
        println!();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let tui = matches!(cli.command, None | Some(Commands::Feed));
    init_tracing(tui)?;

    let config = load_config(cli.config.as_deref(), &cli.overrides)?;

    match cli.command {
        None | Some(Commands::Feed) => {
            tracing::info!("Starting feed");
            run_feed(config).await?;
        }
        Some(Commands::Fetch { page, query, json }) => {
            run_fetch(config, page, query, json).await?;
        }
        Some(Commands::Config) => {
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "reporeel",
            "fetch",
            "--language",
            "Go",
            "--sort",
            "newest",
            "--per-page",
            "0",
            "--dark",
            "--page",
            "3",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.overrides.apply(&mut config);
        assert_eq!(config.feed.default_language, "Go");
        assert_eq!(config.feed.default_sort, SortKey::Created);
        assert_eq!(config.feed.per_page, 1);
        assert!(config.ui.dark_mode);
        assert!(matches!(cli.command, Some(Commands::Fetch { page: 3, json: false, .. })));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["reporeel"]).unwrap();
        assert!(cli.command.is_none());

        let mut config = Config::default();
        cli.overrides.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_bad_sort_rejected() {
        assert!(Cli::try_parse_from(["reporeel", "--sort", "hype"]).is_err());
    }
}

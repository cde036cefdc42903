// Feed controller: filter state, pagination and the accumulated list
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    fetcher::RepoFetcher,
    models::{FetchParams, Repository, SortKey, SortOrder},
    notify::{NotificationSink, Toast},
    Result,
};

/// Banner text shown while the last fetch has failed
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load repositories. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Idle,
    Loading,
    Error,
    /// Last page came back empty; only a filter change restarts the feed
    Exhausted,
}

/// User-controlled filter dimensions. Changing any of them restarts the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilters {
    /// Empty means all languages
    pub language: String,
    pub sort: SortKey,
    /// Last submitted search text
    pub query: String,
}

/// A page fetch the controller has agreed to start.
///
/// The caller runs it (inline or on a task) and hands the outcome back to
/// [`FeedController::complete`].
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    reset: bool,
    params: FetchParams,
}

impl FetchTicket {
    pub fn params(&self) -> &FetchParams {
        &self.params
    }

    pub fn is_reset(&self) -> bool {
        self.reset
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub async fn run(self, fetcher: &RepoFetcher) -> FetchOutcome {
        let result = fetcher.fetch(&self.params).await;
        FetchOutcome {
            ticket: self,
            result,
        }
    }
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<Arc<Vec<Repository>>>,
}

/// Owns everything one feed session needs.
///
/// At most one fetch is outstanding at a time: while `loading`, new fetch
/// requests are dropped, not queued. Each reset bumps a generation counter and
/// results from an older generation are discarded. A reset that arrives while
/// a fetch is in flight is remembered and started once that fetch resolves.
pub struct FeedController {
    fetcher: Arc<RepoFetcher>,
    notifier: Arc<dyn NotificationSink>,
    filters: FeedFilters,
    per_page: u32,
    order: SortOrder,
    page: u32,
    repos: Vec<Repository>,
    has_more: bool,
    loading: bool,
    error: Option<String>,
    generation: u64,
    deferred_reset: bool,
}

impl FeedController {
    pub fn new(fetcher: Arc<RepoFetcher>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            fetcher,
            notifier,
            filters: FeedFilters::default(),
            per_page: 10,
            order: SortOrder::Desc,
            page: 1,
            repos: Vec::new(),
            has_more: true,
            loading: false,
            error: None,
            generation: 0,
            deferred_reset: false,
        }
    }

    /// Initial filters; takes effect on the next [`start`](Self::start)
    pub fn with_filters(mut self, filters: FeedFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn fetcher(&self) -> Arc<RepoFetcher> {
        Arc::clone(&self.fetcher)
    }

    pub fn filters(&self) -> &FeedFilters {
        &self.filters
    }

    pub fn repos(&self) -> &[Repository] {
        &self.repos
    }

    /// Next page to request
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> FeedStatus {
        if self.loading {
            FeedStatus::Loading
        } else if self.error.is_some() {
            FeedStatus::Error
        } else if !self.has_more {
            FeedStatus::Exhausted
        } else {
            FeedStatus::Idle
        }
    }

    /// Load page 1 for the current filters
    pub fn start(&mut self) -> Option<FetchTicket> {
        self.reset()
    }

    pub fn set_language(&mut self, language: impl Into<String>) -> Option<FetchTicket> {
        let language = language.into();
        if language == self.filters.language {
            return None;
        }
        debug!("Language filter: {:?} -> {:?}", self.filters.language, language);
        self.filters.language = language;
        self.reset()
    }

    pub fn set_sort(&mut self, sort: SortKey) -> Option<FetchTicket> {
        if sort == self.filters.sort {
            return None;
        }
        debug!("Sort: {} -> {}", self.filters.sort, sort);
        self.filters.sort = sort;
        self.reset()
    }

    /// Explicit submit always restarts, even with unchanged text
    pub fn submit_search(&mut self, query: impl Into<String>) -> Option<FetchTicket> {
        self.filters.query = query.into().trim().to_string();
        debug!("Search submitted: {:?}", self.filters.query);
        self.reset()
    }

    pub fn clear_search(&mut self) -> Option<FetchTicket> {
        if self.filters.query.is_empty() {
            return None;
        }
        self.submit_search(String::new())
    }

    /// Next page, if nothing is in flight and the feed is not exhausted
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if self.loading || !self.has_more {
            debug!(
                "Ignoring load more (loading={}, has_more={})",
                self.loading, self.has_more
            );
            return None;
        }
        Some(self.begin(false))
    }

    /// Apply a finished fetch. May hand back a deferred reset fetch to run next.
    pub fn complete(&mut self, outcome: FetchOutcome) -> Option<FetchTicket> {
        let FetchOutcome { ticket, result } = outcome;
        self.loading = false;

        if ticket.generation != self.generation {
            info!(
                "Discarding stale page {} (generation {}, current {})",
                ticket.params.page, ticket.generation, self.generation
            );
            if self.deferred_reset {
                self.deferred_reset = false;
                return Some(self.begin(true));
            }
            return None;
        }

        match result {
            Ok(items) if items.is_empty() => {
                debug!("Page {} empty, feed exhausted", ticket.params.page);
                self.has_more = false;
                self.notifier.notify(Toast::end_of_feed());
            }
            Ok(items) => {
                if ticket.reset {
                    self.repos = items.as_ref().clone();
                } else {
                    self.repos.extend(items.iter().cloned());
                }
                self.page = ticket.params.page + 1;
                debug!(
                    "Page {} loaded, {} repos in feed",
                    ticket.params.page,
                    self.repos.len()
                );
            }
            Err(e) => {
                warn!("Error loading repos: {}", e);
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                self.notifier.notify(Toast::load_failed());
            }
        }

        None
    }

    /// Run `ticket` and any follow-up fetches to completion
    pub async fn run(&mut self, ticket: Option<FetchTicket>) {
        let mut next = ticket;
        while let Some(ticket) = next.take() {
            let outcome = ticket.run(&self.fetcher).await;
            next = self.complete(outcome);
        }
    }

    /// Flip the local starred flag on every entry with `id`.
    /// Returns the new flag, or `None` if the id is not in the feed.
    pub fn toggle_star(&mut self, id: u64) -> Option<bool> {
        let mut new_state = None;
        for repo in self.repos.iter_mut().filter(|repo| repo.id == id) {
            repo.starred = !repo.starred;
            new_state = Some(repo.starred);
        }

        if new_state.is_some() {
            self.notifier.notify(Toast::starred());
        }
        new_state
    }

    fn reset(&mut self) -> Option<FetchTicket> {
        self.generation += 1;
        self.repos.clear();
        self.page = 1;
        self.has_more = true;
        self.error = None;

        if self.loading {
            debug!(
                "Reset to generation {} while a fetch is in flight, deferring",
                self.generation
            );
            self.deferred_reset = true;
            return None;
        }

        Some(self.begin(true))
    }

    fn begin(&mut self, reset: bool) -> FetchTicket {
        self.loading = true;
        self.error = None;

        let params = FetchParams {
            page: if reset { 1 } else { self.page },
            per_page: self.per_page,
            language: Some(self.filters.language.clone()).filter(|l| !l.is_empty()),
            sort: self.filters.sort,
            order: self.order,
            query: Some(self.filters.query.clone()).filter(|q| !q.is_empty()),
        };
        debug!(
            "Fetching page {} (generation {}, reset={})",
            params.page, self.generation, reset
        );

        FetchTicket {
            generation: self.generation,
            reset,
            params,
        }
    }
}

// Search query construction for the trending feed
use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::models::FetchParams;

/// Repos need more stars than this to show up at all
pub const DEFAULT_MIN_STARS: u32 = 100;

/// Bounds (in days before today) of the random created-date window
pub const CREATED_WINDOW_DAYS: std::ops::RangeInclusive<i64> = 30..=395;

/// Picks how far back the created-date bound goes on each request.
///
/// Randomizing it keeps the first page from being the same top-N every
/// session. Results are therefore not deterministic for identical params.
pub trait DateJitter: Send + Sync {
    fn days_back(&self) -> i64;
}

/// Uniform over [`CREATED_WINDOW_DAYS`]
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomJitter;

impl DateJitter for RandomJitter {
    fn days_back(&self) -> i64 {
        rand::thread_rng().gen_range(CREATED_WINDOW_DAYS)
    }
}

/// Always the same offset; handy for tests and reproducible runs
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub i64);

impl DateJitter for FixedJitter {
    fn days_back(&self) -> i64 {
        self.0
    }
}

/// Lower bound on creation date, `days_back` days before `today`
pub fn created_after(today: NaiveDate, days_back: i64) -> NaiveDate {
    today - Duration::days(days_back)
}

/// Build the `q` parameter:
/// `stars:>N[ language:L][ created:>YYYY-MM-DD][ free text]`
pub fn build_search_query(
    params: &FetchParams,
    min_stars: u32,
    created_after: Option<NaiveDate>,
) -> String {
    let mut parts = vec![format!("stars:>{}", min_stars)];

    if let Some(lang) = params.language() {
        parts.push(format!("language:{}", lang));
    }

    if let Some(date) = created_after {
        parts.push(format!("created:>{}", date.format("%Y-%m-%d")));
    }

    if let Some(text) = params.query() {
        parts.push(text.to_string());
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_base_query_has_star_floor_only() {
        let query = build_search_query(&FetchParams::default(), DEFAULT_MIN_STARS, None);
        assert_eq!(query, "stars:>100");
    }

    #[test]
    fn test_language_term_present_iff_language_non_empty() {
        for lang in ["Rust", "C++", "TypeScript"] {
            for per_page in [1, 10, 100] {
                let params = FetchParams {
                    language: Some(lang.to_string()),
                    per_page,
                    ..FetchParams::default()
                };
                let query = build_search_query(&params, DEFAULT_MIN_STARS, None);
                assert!(query.contains(&format!("language:{}", lang)), "{query}");
            }
        }

        for lang in [None, Some(String::new()), Some("   ".to_string())] {
            let params = FetchParams {
                language: lang,
                ..FetchParams::default()
            };
            let query = build_search_query(&params, DEFAULT_MIN_STARS, None);
            assert!(!query.contains("language:"), "{query}");
        }
    }

    #[test]
    fn test_full_query_layout() {
        let params = FetchParams {
            language: Some("Go".into()),
            query: Some(" terminal ui ".into()),
            ..FetchParams::default()
        };
        let query = build_search_query(&params, 100, Some(date(2024, 3, 1)));
        assert_eq!(
            query,
            "stars:>100 language:Go created:>2024-03-01 terminal ui"
        );
    }

    #[test]
    fn test_created_after_counts_back_from_today() {
        assert_eq!(created_after(date(2024, 3, 31), 30), date(2024, 3, 1));
        assert_eq!(created_after(date(2025, 1, 31), 395), date(2024, 1, 2));
    }

    #[test]
    fn test_random_jitter_stays_in_window() {
        let jitter = RandomJitter;
        for _ in 0..500 {
            let days = jitter.days_back();
            assert!(CREATED_WINDOW_DAYS.contains(&days), "{days}");
        }
    }
}

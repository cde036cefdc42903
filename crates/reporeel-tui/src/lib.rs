// Terminal UI implementation using ratatui
// The pretty face of RepoReel

pub mod app;
pub mod card;
pub mod filter_bar;
pub mod runner;
pub mod scroll;
pub mod theme;
pub mod toast;
pub mod ui;

pub use app::{Action, App, InputMode};
pub use filter_bar::{FilterBar, FilterChange};
pub use runner::run_tui;
pub use scroll::{FeedRevision, InfiniteScroll};
pub use theme::Theme;
pub use toast::ToastQueue;

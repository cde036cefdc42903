// Toast notifications raised by the feed
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// Short user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    pub fn end_of_feed() -> Self {
        Self::new(
            "End of feed",
            "You've reached the end! Try changing filters for more repos.",
            Severity::Info,
        )
    }

    pub fn load_failed() -> Self {
        Self::new(
            "Error loading repos",
            "Check your connection and try again.",
            Severity::Error,
        )
    }

    pub fn starred() -> Self {
        Self::new(
            "Repository starred!",
            "Added to your favorites (local storage)",
            Severity::Info,
        )
    }
}

/// Whatever displays toasts: the TUI overlay, a log, a test double
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Sink that just writes toasts to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, toast: Toast) {
        match toast.severity {
            Severity::Info => info!("{}: {}", toast.title, toast.description),
            Severity::Error => warn!("{}: {}", toast.title, toast.description),
        }
    }
}

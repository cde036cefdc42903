// Toast queue shown in the corner of the feed
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use reporeel_core::{NotificationSink, Toast};

pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);
const MAX_TOASTS: usize = 3;

/// Shared handle; clones feed the same queue
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    inner: Arc<Mutex<VecDeque<(Toast, Instant)>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(&self, toast: Toast, at: Instant) {
        let mut queue = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        queue.push_back((toast, at));
        while queue.len() > MAX_TOASTS {
            queue.pop_front();
        }
    }

    /// Toasts still on screen at `now`, oldest first. Expired ones are dropped.
    pub fn visible(&self, now: Instant) -> Vec<Toast> {
        let mut queue = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        queue.retain(|(_, shown_at)| now.saturating_duration_since(*shown_at) < TOAST_LIFETIME);
        queue.iter().map(|(toast, _)| toast.clone()).collect()
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&self, toast: Toast) {
        self.push_at(toast, Instant::now());
    }
}

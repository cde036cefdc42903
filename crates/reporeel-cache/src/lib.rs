// In-memory TTL cache
// Keeps repeated feed pages from hammering the search quota

pub mod cache;
pub mod clock;

pub use cache::TtlCache;
pub use clock::{Clock, ManualClock, SystemClock};

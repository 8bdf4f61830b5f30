//! # gist_guard
//!
//! In-process admission helpers for the gist-pulse service: a TTL cache for
//! computed summaries and a trailing-window rate limiter for upstream API
//! calls. Both hold process-lifetime state only; nothing is persisted and
//! nothing is shared across processes. Neither type locks internally, so a
//! caller sharing an instance between tasks wraps it in a `Mutex`.

mod error;

pub mod cache;
pub mod clock;
pub mod rate_limit;

pub use cache::TtlCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ConfigError;
pub use rate_limit::{RateLimiter, DEFAULT_IDENTIFIER};

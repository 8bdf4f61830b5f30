//! Trailing-window rate limiter.
//!
//! Counts call timestamps per identifier within the window ending at "now".
//! Bursts up to `max_calls` are admitted at the start of every window with
//! no smoothing; this is deliberately not a token bucket. State is created
//! lazily per identifier and lives for the process lifetime only, so a
//! restart resets all counters.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crate::{
    clock::{Clock, SystemClock},
    error::ConfigError,
};

/// Bucket used when the caller tracks only one logical actor.
pub const DEFAULT_IDENTIFIER: &str = "default";

pub struct RateLimiter<C: Clock = SystemClock> {
    max_calls: usize,
    period: Duration,
    clock: C,
    calls: HashMap<String, Vec<Instant>>,
}

impl RateLimiter {
    pub fn new(max_calls: usize, period: Duration) -> Result<Self, ConfigError> {
        Self::with_clock(max_calls, period, SystemClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(max_calls: usize, period: Duration, clock: C) -> Result<Self, ConfigError> {
        if max_calls == 0 {
            return Err(ConfigError::ZeroMaxCalls);
        }
        if period.is_zero() {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(Self {
            max_calls,
            period,
            clock,
            calls: HashMap::new(),
        })
    }

    /// Prunes timestamps that have left the window, then admits the call if
    /// fewer than `max_calls` remain. An admitted call is recorded; a denied
    /// call is not.
    pub fn is_allowed(&mut self, identifier: &str) -> bool {
        let now = self.clock.now();
        let period = self.period;
        let calls = self.calls.entry(identifier.to_string()).or_default();
        calls.retain(|&at| now.duration_since(at) < period);

        if calls.len() < self.max_calls {
            calls.push(now);
            true
        } else {
            tracing::debug!(%identifier, "rate limit exceeded");
            false
        }
    }

    /// Time until the oldest in-window timestamp falls out of the window,
    /// i.e. until a denied caller may try again. Zero when nothing is
    /// recorded.
    pub fn retry_after(&self, identifier: &str) -> Duration {
        let now = self.clock.now();
        let Some(calls) = self.calls.get(identifier) else {
            return Duration::ZERO;
        };
        calls
            .iter()
            .filter(|&&at| now.duration_since(at) < self.period)
            .min()
            .map(|&oldest| {
                self.period
                    .checked_sub(now.duration_since(oldest))
                    .unwrap_or(Duration::ZERO)
            })
            .unwrap_or(Duration::ZERO)
    }

    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

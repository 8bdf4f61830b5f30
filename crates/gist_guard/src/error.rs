/// Construction-time rejection of unusable cache / limiter parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("cache ttl must be non-zero")]
    ZeroTtl,
    #[error("rate limit period must be non-zero")]
    ZeroPeriod,
    #[error("rate limit max_calls must be non-zero")]
    ZeroMaxCalls,
}

//! Polymorphic price source capability.

use crate::error::FeedResult;
use async_trait::async_trait;

/// Outcome of one fetch attempt.
///
/// `Unavailable` is a non-error sentinel: the source could not produce a
/// usable sample this attempt and the caller should simply wait for the
/// next tick. Transient transport failures are absorbed into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fetched {
    /// No usable sample this attempt.
    Unavailable,
    /// Raw observed value; the tracker computes the change locally.
    Value(f64),
    /// Value plus an upstream-provided change figure (the polling source
    /// trusts the endpoint's 1-hour change instead of deriving its own).
    Quoted { value: f64, change_pct: f64 },
}

/// Capability shared by both source variants: produce one sample attempt.
///
/// Each implementation keeps its own internal state (connection handle,
/// HTTP client) private; only construction-time misconfiguration is fatal.
#[async_trait]
pub trait PriceSource: Send {
    /// Fetch the next sample, suspending until data arrives or the attempt
    /// degrades to `Unavailable`.
    async fn fetch(&mut self) -> FeedResult<Fetched>;

    /// Release any held transport resource. Default is a no-op for
    /// stateless transports.
    async fn close(&mut self) {}

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

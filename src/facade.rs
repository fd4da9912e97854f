//! Module-level convenience functions backed by one default composer.
//!
//! Callers that need no custom configuration can use these free functions
//! instead of constructing a `StatusNPrice`. The shared composer is built
//! lazily on first use with all-default configuration (currency "USD",
//! baseline rate table, no status options) and lives for the process
//! lifetime; it is immutable after construction.

use tracing::debug;

use crate::composer::StatusNPrice;
use crate::error::SnpError;
use crate::types::{CheckOptions, StatusAndPrice};

lazy_static::lazy_static! {
    static ref DEFAULT_COMPOSER: StatusNPrice = {
        debug!("initializing default status-n-price composer");
        StatusNPrice::new()
    };
}

/// Check one domain using the default composer.
///
/// Identical contract to [`StatusNPrice::check`].
pub async fn check(domain: &str, opts: CheckOptions) -> Result<StatusAndPrice, SnpError> {
    DEFAULT_COMPOSER.check(domain, opts).await
}

/// Check a batch of domains using the default composer.
///
/// Identical contract to [`StatusNPrice::check_batch`].
pub async fn check_batch(
    domains: &[String],
    opts: CheckOptions,
) -> Result<Vec<StatusAndPrice>, SnpError> {
    DEFAULT_COMPOSER.check_batch(domains, opts).await
}

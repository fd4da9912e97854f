//! Capability traits and bundled provider implementations.
//!
//! The composer depends on two narrow capabilities rather than concrete
//! backends, so tests and embedders can substitute their own
//! implementations without touching the composition logic.

pub mod pricing;
pub mod rdap;

pub use pricing::RateTablePricer;
pub use rdap::RdapStatusClient;

use async_trait::async_trait;

use crate::error::SnpError;
use crate::types::{PriceQuote, QuoteOptions, StatusOptions, StatusResult};

/// A backend that can report the registration status of domains.
///
/// `check_batch` must preserve input order and return exactly one result
/// per input domain. The composer re-verifies the length at its boundary
/// but relies on implementations for positional correspondence.
#[async_trait]
pub trait StatusService: Send + Sync {
    /// Look up the status of a single domain.
    async fn check(&self, domain: &str, options: &StatusOptions)
        -> Result<StatusResult, SnpError>;

    /// Look up the status of several domains in one operation.
    ///
    /// All-or-nothing: a failure fails the whole batch.
    async fn check_batch(
        &self,
        domains: &[String],
        options: &StatusOptions,
    ) -> Result<Vec<StatusResult>, SnpError>;
}

/// A backend that can quote a price for a domain transaction.
///
/// Failures (unsupported extension, unsupported currency, backend
/// problems) must be distinguishable errors; the composer downgrades
/// them to an absent price.
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Quote a price for `domain` in `currency` (uppercase code).
    async fn get_price(
        &self,
        domain: &str,
        currency: &str,
        options: &QuoteOptions,
    ) -> Result<PriceQuote, SnpError>;
}

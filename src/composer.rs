//! The status-and-price composer.
//!
//! This module provides the primary `StatusNPrice` struct that orchestrates
//! one status lookup and, when the domain turns out to be unregistered, one
//! price lookup, merging both into a single result.

use futures::future;

use crate::error::SnpError;
use crate::providers::{PricingService, RateTablePricer, RdapStatusClient, StatusService};
use crate::types::{
    Availability, CheckOptions, QuoteOptions, SnpConfig, StatusAndPrice, StatusOptions,
    StatusResult,
};

/// Composer that merges domain status lookups with conditional price quotes.
///
/// Generic over its two collaborators so tests and embedders can swap in
/// their own backends; defaults to the bundled RDAP status client and
/// rate-table pricer.
///
/// Instance configuration (default currency, status options) is immutable
/// after construction, so one composer is safe to share across concurrently
/// in-flight calls. The pricing service is initialized once, eagerly, in the
/// constructor.
///
/// # Example
///
/// ```rust,no_run
/// use status_n_price::{StatusNPrice, CheckOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let snp = StatusNPrice::new();
///     let result = snp.check("example.com", CheckOptions::default()).await?;
///
///     println!("{}: {}", result.domain(), result.availability());
///     if let Some(price) = &result.price {
///         println!("  {}{} {}", price.symbol, price.total_price, price.currency);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct StatusNPrice<S = RdapStatusClient, P = RateTablePricer> {
    /// Status backend (RDAP by default)
    status: S,
    /// Pricing backend, initialized from the rate table at construction
    pricer: P,
    /// Default currency for quotes, uppercase
    default_currency: String,
    /// Default options forwarded to the status service
    status_options: StatusOptions,
}

impl StatusNPrice {
    /// Create a composer with all-default configuration.
    ///
    /// Defaults: currency "USD", the built-in baseline rate table, and
    /// empty status options. The baseline table is known-good, so this
    /// cannot fail.
    pub fn new() -> Self {
        Self::with_config(SnpConfig::default())
            .expect("Failed to create composer from default configuration")
    }

    /// Create a composer from a configuration profile.
    ///
    /// The rate table is validated and the pricing service initialized
    /// here, eagerly: a malformed table is a `ConfigError` at construction
    /// time, never a call-time surprise.
    pub fn with_config(config: SnpConfig) -> Result<Self, SnpError> {
        let status = RdapStatusClient::new()?;
        let pricer = RateTablePricer::new(config.rates)?;

        Ok(Self {
            status,
            pricer,
            default_currency: config.currency.to_uppercase(),
            status_options: config.status_options,
        })
    }
}

impl<S: StatusService, P: PricingService> StatusNPrice<S, P> {
    /// Create a composer over arbitrary service implementations.
    ///
    /// The pricing service arrives already constructed, so rate-table
    /// concerns stay with the backend that owns them. This is the seam
    /// used for test doubles and alternative backends.
    pub fn with_services<C: Into<String>>(
        currency: C,
        status_options: StatusOptions,
        status: S,
        pricer: P,
    ) -> Self {
        Self {
            status,
            pricer,
            default_currency: currency.into().to_uppercase(),
            status_options,
        }
    }

    /// The default currency used when a call carries no override.
    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    /// The status backend this composer coordinates.
    pub fn status_service(&self) -> &S {
        &self.status
    }

    /// The pricing backend this composer coordinates.
    pub fn pricing_service(&self) -> &P {
        &self.pricer
    }

    /// Check one domain: status lookup plus a conditional price quote.
    ///
    /// The price lookup runs only when the status service reports the
    /// domain as unregistered. Pricing failures of any kind (unsupported
    /// extension or currency, backend trouble) are downgraded to an absent
    /// price; status failures propagate unchanged.
    ///
    /// # Errors
    ///
    /// Returns `SnpError` only for status-side failures; the result's
    /// status portion is always intact when `Ok` is returned.
    pub async fn check(
        &self,
        domain: &str,
        opts: CheckOptions,
    ) -> Result<StatusAndPrice, SnpError> {
        let status_options = self.status_options.merged_with(opts.status.as_ref());
        let status = self.status.check(domain, &status_options).await?;

        let currency = self.resolve_currency(opts.currency.as_deref());
        let quote_options = opts.quote.unwrap_or_default();

        Ok(self.merge_price(status, &currency, &quote_options).await)
    }

    /// Check a batch of domains, preserving input order.
    ///
    /// One batch status call runs first; its failure fails the whole batch
    /// (all-or-nothing). Price lookups for unregistered domains then run
    /// concurrently, each one's failure isolated to its own item. The
    /// currency is resolved once and applied uniformly; there is no
    /// per-item override surface.
    ///
    /// # Errors
    ///
    /// Returns `SnpError` if the batch status call fails, or an internal
    /// error if the status service violates its 1:1 output contract.
    pub async fn check_batch(
        &self,
        domains: &[String],
        opts: CheckOptions,
    ) -> Result<Vec<StatusAndPrice>, SnpError> {
        let status_options = self.status_options.merged_with(opts.status.as_ref());
        let statuses = self.status.check_batch(domains, &status_options).await?;

        // The trait contract is order-preserving and 1:1; enforce the part
        // we can observe rather than hand back misaligned results
        if statuses.len() != domains.len() {
            return Err(SnpError::internal(format!(
                "Status service returned {} results for {} domains",
                statuses.len(),
                domains.len()
            )));
        }

        let currency = self.resolve_currency(opts.currency.as_deref());
        let quote_options = opts.quote.unwrap_or_default();

        let results = future::join_all(
            statuses
                .into_iter()
                .map(|status| self.merge_price(status, &currency, &quote_options)),
        )
        .await;

        Ok(results)
    }

    /// Effective currency for a call: per-call override or instance default.
    fn resolve_currency(&self, override_currency: Option<&str>) -> String {
        match override_currency {
            Some(currency) => currency.to_uppercase(),
            None => self.default_currency.clone(),
        }
    }

    /// Attach a price to a status result when the domain is priceable.
    ///
    /// The error recovery here is scoped to exactly the pricing call's
    /// frame: nothing else can be swallowed by the `ok()`.
    async fn merge_price(
        &self,
        status: StatusResult,
        currency: &str,
        quote_options: &QuoteOptions,
    ) -> StatusAndPrice {
        let price = if status.availability == Availability::Unregistered {
            self.pricer
                .get_price(&status.domain, currency, quote_options)
                .await
                .ok()
        } else {
            None
        };

        StatusAndPrice { status, price }
    }
}

impl Default for StatusNPrice {
    fn default() -> Self {
        Self::new()
    }
}

//! Core data types for combined status and price checking.
//!
//! This module defines all the main data structures used throughout the library,
//! including status results, price quotes, and the per-call option surfaces.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

use crate::rates::RatesConfig;

/// Registration status of a domain as reported by the status service.
///
/// Only `Unregistered` signals that the domain is priceable; any other
/// value suppresses the price lookup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Availability {
    /// Domain is currently registered (taken)
    #[serde(rename = "registered")]
    Registered,

    /// Domain is not registered and may be available for purchase
    #[serde(rename = "unregistered")]
    Unregistered,

    /// Status could not be classified by the upstream service
    #[serde(rename = "unknown")]
    Unknown,
}

/// Method used by the status service to determine availability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CheckMethod {
    /// Domain checked via RDAP protocol
    #[serde(rename = "rdap")]
    Rdap,

    /// Check performed by a custom or unidentified backend
    #[serde(rename = "unknown")]
    Unknown,
}

/// Result of a domain status lookup.
///
/// Produced by the status service and treated as immutable by the
/// composer; the composer only reads `availability` to decide whether
/// a price lookup should follow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResult {
    /// The domain name that was checked (e.g., "example.com")
    pub domain: String,

    /// Registration status of the domain
    pub availability: Availability,

    /// Which method was used to check the domain
    pub method_used: CheckMethod,

    /// How long the status lookup took to complete
    #[serde(skip)]
    pub check_duration: Option<Duration>,
}

/// Domain transaction a price quote applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Transaction {
    /// New registration
    #[serde(rename = "create")]
    #[default]
    Create,

    /// Renewal of an existing registration
    #[serde(rename = "renew")]
    Renew,

    /// Restore after expiry (redemption period)
    #[serde(rename = "restore")]
    Restore,

    /// Transfer between registrars
    #[serde(rename = "transfer")]
    Transfer,
}

/// How multiple discount codes combine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DiscountPolicy {
    /// All applicable discounts add up
    #[serde(rename = "stack")]
    #[default]
    Stack,

    /// Only the single best discount applies
    #[serde(rename = "max")]
    Max,
}

/// A currency-denominated price quote for a domain transaction.
///
/// Produced only by the pricing service; the composer never constructs
/// or mutates one. `total_price` is `base_price - discount + tax` under
/// the pricing service's own arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Domain extension the quote applies to (e.g., "com", "co.uk")
    pub extension: String,

    /// ISO-style currency code, uppercase (e.g., "USD")
    pub currency: String,

    /// Undiscounted price in the quote currency
    pub base_price: f64,

    /// Discount amount subtracted from the base price
    pub discount: f64,

    /// Tax amount added on the discounted base
    pub tax: f64,

    /// Final price: base - discount + tax
    pub total_price: f64,

    /// Display symbol for the currency (e.g., "$")
    pub symbol: String,

    /// Which transaction the quote is for
    pub transaction: Transaction,
}

/// Combined result: a status lookup plus an optional price quote.
///
/// `price` is `Some` only when the status service reported the domain
/// as `Unregistered` AND the pricing lookup succeeded. It is never
/// partially populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusAndPrice {
    /// The underlying status result, flattened into this struct
    #[serde(flatten)]
    pub status: StatusResult,

    /// Price quote for the domain, when available and priceable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceQuote>,
}

impl StatusAndPrice {
    /// The domain this result describes.
    pub fn domain(&self) -> &str {
        &self.status.domain
    }

    /// The availability classification from the status service.
    pub fn availability(&self) -> Availability {
        self.status.availability
    }
}

/// Options forwarded to the status service on each lookup.
///
/// All fields are optional; instance-level defaults and per-call
/// overrides merge field-by-field, with the per-call value winning.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StatusOptions {
    /// Timeout for each individual status lookup
    #[serde(skip)]
    pub timeout: Option<Duration>,

    /// Raise batch concurrency for faster (less polite) bulk checks
    pub burst_mode: Option<bool>,

    /// Replace the registry-derived RDAP base URL with a fixed endpoint
    pub endpoint_override: Option<String>,
}

impl StatusOptions {
    /// Merge per-call overrides over these base options.
    ///
    /// Shallow field-by-field merge: a `Some` in `overrides` wins,
    /// a `None` falls back to the base value. Neither input is mutated.
    pub fn merged_with(&self, overrides: Option<&StatusOptions>) -> StatusOptions {
        match overrides {
            Some(o) => StatusOptions {
                timeout: o.timeout.or(self.timeout),
                burst_mode: o.burst_mode.or(self.burst_mode),
                endpoint_override: o
                    .endpoint_override
                    .clone()
                    .or_else(|| self.endpoint_override.clone()),
            },
            None => self.clone(),
        }
    }

    /// Set the per-lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable burst mode for batch lookups.
    pub fn with_burst_mode(mut self, enabled: bool) -> Self {
        self.burst_mode = Some(enabled);
        self
    }

    /// Pin all RDAP requests to a fixed base URL.
    pub fn with_endpoint_override<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint_override = Some(endpoint.into());
        self
    }
}

/// Options forwarded to the pricing service when requesting a quote.
#[derive(Debug, Clone, Default)]
pub struct QuoteOptions {
    /// Discount codes to apply; unknown or expired codes are ignored
    pub discount_codes: Vec<String>,

    /// Point in time used to evaluate discount expiry.
    /// Defaults to the current time when unset.
    pub now: Option<SystemTime>,

    /// Whether multiple discounts stack or only the best applies
    pub discount_policy: DiscountPolicy,

    /// Which transaction to quote
    pub transaction: Transaction,
}

impl QuoteOptions {
    /// Add a discount code to apply to the quote.
    pub fn with_discount_code<S: Into<String>>(mut self, code: S) -> Self {
        self.discount_codes.push(code.into());
        self
    }

    /// Set the point in time for discount-expiry evaluation.
    pub fn with_now(mut self, now: SystemTime) -> Self {
        self.now = Some(now);
        self
    }

    /// Set the discount combination policy.
    pub fn with_discount_policy(mut self, policy: DiscountPolicy) -> Self {
        self.discount_policy = policy;
        self
    }

    /// Set the transaction to quote.
    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transaction = transaction;
        self
    }
}

/// Per-call options for `check` and `check_batch`.
///
/// Everything here is optional; unset fields fall back to the
/// composer's instance-level defaults.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Currency for the price quote (case-insensitive, normalized to uppercase)
    pub currency: Option<String>,

    /// Options forwarded to the pricing service
    pub quote: Option<QuoteOptions>,

    /// Options merged over the instance defaults and forwarded to the status service
    pub status: Option<StatusOptions>,
}

impl CheckOptions {
    /// Override the quote currency for this call.
    pub fn with_currency<S: Into<String>>(mut self, currency: S) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Supply pricing options for this call.
    pub fn with_quote(mut self, quote: QuoteOptions) -> Self {
        self.quote = Some(quote);
        self
    }

    /// Supply status-service overrides for this call.
    pub fn with_status(mut self, status: StatusOptions) -> Self {
        self.status = Some(status);
        self
    }
}

/// Construction profile for a `StatusNPrice` composer.
///
/// Immutable after construction; per-call options override but never
/// mutate these defaults.
#[derive(Debug, Clone)]
pub struct SnpConfig {
    /// Default currency for price quotes, normalized to uppercase
    /// Default: "USD"
    pub currency: String,

    /// Rate table handed to the pricing service at construction
    /// Default: the built-in baseline table
    pub rates: RatesConfig,

    /// Default options passed to the status service on each call
    /// Default: empty
    pub status_options: StatusOptions,
}

impl Default for SnpConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            rates: RatesConfig::default(),
            status_options: StatusOptions::default(),
        }
    }
}

impl SnpConfig {
    /// Set the default quote currency.
    pub fn with_currency<S: Into<String>>(mut self, currency: S) -> Self {
        self.currency = currency.into();
        self
    }

    /// Replace the baseline rate table.
    pub fn with_rates(mut self, rates: RatesConfig) -> Self {
        self.rates = rates;
        self
    }

    /// Set default status-service options.
    pub fn with_status_options(mut self, options: StatusOptions) -> Self {
        self.status_options = options;
        self
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Registered => write!(f, "registered"),
            Availability::Unregistered => write!(f, "unregistered"),
            Availability::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transaction::Create => write!(f, "create"),
            Transaction::Renew => write!(f, "renew"),
            Transaction::Restore => write!(f, "restore"),
            Transaction::Transfer => write!(f, "transfer"),
        }
    }
}

//! # status-n-price
//!
//! Combine domain availability status with price quotes for available domains.
//!
//! One call answers two questions: is the domain registered, and if not, what
//! would it cost? The status lookup always runs; the price lookup runs only
//! when the domain turns out to be unregistered, and its failures are
//! downgraded to an absent price rather than failing the call.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use status_n_price::{StatusNPrice, CheckOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let snp = StatusNPrice::new();
//!     let result = snp
//!         .check("example.com", CheckOptions::default().with_currency("EUR"))
//!         .await?;
//!
//!     println!("{}: {}", result.domain(), result.availability());
//!     Ok(())
//! }
//! ```
//!
//! Callers that need no configuration can use the module-level facade:
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let result = status_n_price::check("example.com", Default::default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Conditional pricing**: quotes are fetched only for unregistered domains
//! - **Failure isolation**: pricing problems never fail a status check
//! - **Batch checking**: order-preserving concurrent fan-out with per-item isolation
//! - **Pluggable backends**: status and pricing sit behind narrow async traits
//! - **Configurable**: default currency, rate table, and status options per instance

// Re-export main public API types and functions
// This makes them available as status_n_price::TypeName
pub use composer::StatusNPrice;
pub use error::SnpError;
pub use facade::{check, check_batch};
pub use providers::{PricingService, RateTablePricer, RdapStatusClient, StatusService};
pub use rates::{CurrencyRates, DiscountRule, ExtensionRates, RatesConfig};
pub use types::{
    Availability, CheckMethod, CheckOptions, DiscountPolicy, PriceQuote, QuoteOptions, SnpConfig,
    StatusAndPrice, StatusOptions, StatusResult, Transaction,
};

// Public modules
pub mod providers;

// Internal modules - these are not part of the public API
mod composer;
mod error;
mod facade;
mod rates;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SnpError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

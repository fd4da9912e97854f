//! Rate table configuration for the built-in pricing provider.
//!
//! The rate table is an opaque structure from the composer's point of view:
//! it is handed to the pricing service once at construction and never read
//! afterwards. Base prices are denominated in USD; other currencies are
//! derived through conversion rates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::SnpError;

/// Base prices for one domain extension, in USD, per transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtensionRates {
    pub create: f64,
    pub renew: f64,
    pub restore: f64,
    pub transfer: f64,
}

impl ExtensionRates {
    /// Uniform pricing helper: restore costs a flat multiple of create.
    fn flat(create: f64, renew: f64) -> Self {
        Self {
            create,
            renew,
            restore: create * 5.0,
            transfer: renew,
        }
    }
}

/// Conversion data for one currency, relative to USD.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyRates {
    /// Units of this currency per 1 USD
    pub rate: f64,

    /// Display symbol (e.g., "$", "€")
    pub symbol: String,
}

/// A discount rule attached to a redeemable code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountRule {
    /// Percentage off the base price, 0-100
    pub percent: f64,

    /// Expiry as unix seconds; `None` means the code never expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
}

/// Full rate table consumed by the built-in pricing provider.
///
/// `Default` yields the built-in baseline table; callers can also build
/// or deserialize their own and pass it through `SnpConfig::with_rates`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatesConfig {
    /// Extension -> base prices in USD
    pub extensions: HashMap<String, ExtensionRates>,

    /// Uppercase currency code -> conversion data.
    /// Must contain a "USD" anchor with rate 1.0.
    pub currencies: HashMap<String, CurrencyRates>,

    /// Discount code -> rule
    #[serde(default)]
    pub discounts: HashMap<String, DiscountRule>,

    /// Tax applied on the discounted base, 0-100
    pub tax_percent: f64,
}

impl Default for RatesConfig {
    /// The built-in baseline rate table.
    ///
    /// Prices approximate typical registrar list prices; conversion
    /// rates are indicative, not live market data.
    fn default() -> Self {
        let extensions = HashMap::from([
            ("com".to_string(), ExtensionRates::flat(12.99, 14.99)),
            ("net".to_string(), ExtensionRates::flat(14.99, 16.99)),
            ("org".to_string(), ExtensionRates::flat(13.49, 15.49)),
            ("info".to_string(), ExtensionRates::flat(4.99, 19.99)),
            ("io".to_string(), ExtensionRates::flat(39.99, 49.99)),
            ("ai".to_string(), ExtensionRates::flat(74.99, 74.99)),
            ("dev".to_string(), ExtensionRates::flat(14.99, 14.99)),
            ("app".to_string(), ExtensionRates::flat(15.99, 15.99)),
            ("xyz".to_string(), ExtensionRates::flat(2.99, 13.99)),
            ("co".to_string(), ExtensionRates::flat(29.99, 29.99)),
            ("me".to_string(), ExtensionRates::flat(19.99, 21.99)),
            ("co.uk".to_string(), ExtensionRates::flat(9.99, 9.99)),
        ]);

        let currencies = HashMap::from([
            (
                "USD".to_string(),
                CurrencyRates {
                    rate: 1.0,
                    symbol: "$".to_string(),
                },
            ),
            (
                "EUR".to_string(),
                CurrencyRates {
                    rate: 0.92,
                    symbol: "€".to_string(),
                },
            ),
            (
                "GBP".to_string(),
                CurrencyRates {
                    rate: 0.79,
                    symbol: "£".to_string(),
                },
            ),
            (
                "CAD".to_string(),
                CurrencyRates {
                    rate: 1.36,
                    symbol: "C$".to_string(),
                },
            ),
            (
                "AUD".to_string(),
                CurrencyRates {
                    rate: 1.52,
                    symbol: "A$".to_string(),
                },
            ),
            (
                "INR".to_string(),
                CurrencyRates {
                    rate: 83.10,
                    symbol: "₹".to_string(),
                },
            ),
            (
                "JPY".to_string(),
                CurrencyRates {
                    rate: 147.50,
                    symbol: "¥".to_string(),
                },
            ),
        ]);

        let discounts = HashMap::from([(
            "SAVE10".to_string(),
            DiscountRule {
                percent: 10.0,
                expires_at: None,
            },
        )]);

        Self {
            extensions,
            currencies,
            discounts,
            tax_percent: 0.0,
        }
    }
}

impl RatesConfig {
    /// Validate the table for use by the pricing provider.
    ///
    /// Called once at composer construction so malformed tables surface
    /// there, not on the first price lookup.
    pub fn validate(&self) -> Result<(), SnpError> {
        if self.extensions.is_empty() {
            return Err(SnpError::config("Rate table has no extensions"));
        }

        for (ext, rates) in &self.extensions {
            for (label, price) in [
                ("create", rates.create),
                ("renew", rates.renew),
                ("restore", rates.restore),
                ("transfer", rates.transfer),
            ] {
                if !price.is_finite() || price < 0.0 {
                    return Err(SnpError::config(format!(
                        "Extension '{}' has invalid {} price: {}",
                        ext, label, price
                    )));
                }
            }
        }

        match self.currencies.get("USD") {
            Some(usd) if usd.rate == 1.0 => {}
            Some(usd) => {
                return Err(SnpError::config(format!(
                    "USD anchor must have rate 1.0, found {}",
                    usd.rate
                )));
            }
            None => {
                return Err(SnpError::config("Rate table is missing the USD anchor"));
            }
        }

        for (code, currency) in &self.currencies {
            if code != &code.to_uppercase() {
                return Err(SnpError::config(format!(
                    "Currency code '{}' must be uppercase",
                    code
                )));
            }
            if !currency.rate.is_finite() || currency.rate <= 0.0 {
                return Err(SnpError::config(format!(
                    "Currency '{}' has invalid rate: {}",
                    code, currency.rate
                )));
            }
        }

        for (code, rule) in &self.discounts {
            if !rule.percent.is_finite() || !(0.0..=100.0).contains(&rule.percent) {
                return Err(SnpError::config(format!(
                    "Discount '{}' has out-of-range percent: {}",
                    code, rule.percent
                )));
            }
        }

        if !self.tax_percent.is_finite() || !(0.0..=100.0).contains(&self.tax_percent) {
            return Err(SnpError::config(format!(
                "Tax percent out of range: {}",
                self.tax_percent
            )));
        }

        Ok(())
    }
}

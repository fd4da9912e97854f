//! Rate-table pricing provider.
//!
//! Quotes prices from a static `RatesConfig`: base prices per extension in
//! USD, converted into the requested currency, with discount codes and tax
//! applied. This is the default `PricingService` implementation; embedders
//! with a live pricing backend can supply their own.

use async_trait::async_trait;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::SnpError;
use crate::providers::PricingService;
use crate::rates::{ExtensionRates, RatesConfig};
use crate::types::{DiscountPolicy, PriceQuote, QuoteOptions, Transaction};
use crate::utils::extension_candidates;

/// Pricing provider backed by an in-memory rate table.
#[derive(Debug, Clone)]
pub struct RateTablePricer {
    rates: RatesConfig,
}

impl RateTablePricer {
    /// Create a pricer from a rate table, validating it up front.
    ///
    /// Malformed tables are rejected here so configuration errors surface
    /// at composer construction time rather than on the first quote.
    pub fn new(rates: RatesConfig) -> Result<Self, SnpError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    /// Resolve the rate-table entry for a domain, longest suffix first.
    ///
    /// "example.co.uk" matches a "co.uk" entry before a bare "uk" entry.
    fn extension_entry(&self, domain: &str) -> Result<(String, &ExtensionRates), SnpError> {
        let candidates = extension_candidates(domain)?;

        for candidate in &candidates {
            if let Some(rates) = self.rates.extensions.get(candidate) {
                return Ok((candidate.clone(), rates));
            }
        }

        // Report the full extension, which is what the caller typed
        let extension = candidates.into_iter().next().unwrap_or_default();
        Err(SnpError::unsupported_extension(extension))
    }

    /// Total discount percentage for the given codes under the given policy.
    ///
    /// Unknown and expired codes are ignored rather than rejected; a quote
    /// with a bad code still succeeds at the undiscounted price.
    fn discount_percent(&self, options: &QuoteOptions) -> f64 {
        let now_secs = options
            .now
            .unwrap_or_else(SystemTime::now)
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let applicable = options.discount_codes.iter().filter_map(|code| {
            let rule = self.rates.discounts.get(code)?;
            match rule.expires_at {
                Some(expiry) if expiry < now_secs => None,
                _ => Some(rule.percent),
            }
        });

        let percent = match options.discount_policy {
            DiscountPolicy::Stack => applicable.sum(),
            DiscountPolicy::Max => applicable.fold(0.0, f64::max),
        };

        percent.min(100.0)
    }
}

/// Round to 2 decimal places.
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Base USD price for one transaction type.
fn base_price_usd(rates: &ExtensionRates, transaction: Transaction) -> f64 {
    match transaction {
        Transaction::Create => rates.create,
        Transaction::Renew => rates.renew,
        Transaction::Restore => rates.restore,
        Transaction::Transfer => rates.transfer,
    }
}

#[async_trait]
impl PricingService for RateTablePricer {
    async fn get_price(
        &self,
        domain: &str,
        currency: &str,
        options: &QuoteOptions,
    ) -> Result<PriceQuote, SnpError> {
        let (extension, ext_rates) = self.extension_entry(domain)?;

        let currency = currency.to_uppercase();
        let currency_rates = self
            .rates
            .currencies
            .get(&currency)
            .ok_or_else(|| SnpError::unsupported_currency(&currency))?;

        let base_usd = base_price_usd(ext_rates, options.transaction);
        let discount_usd = base_usd * self.discount_percent(options) / 100.0;
        let tax_usd = (base_usd - discount_usd) * self.rates.tax_percent / 100.0;

        // Convert and round each component, then derive the total from the
        // rounded components so total == base - discount + tax holds exactly
        let base_price = round_cents(base_usd * currency_rates.rate);
        let discount = round_cents(discount_usd * currency_rates.rate);
        let tax = round_cents(tax_usd * currency_rates.rate);
        let total_price = round_cents(base_price - discount + tax);

        Ok(PriceQuote {
            extension,
            currency,
            base_price,
            discount,
            tax,
            total_price,
            symbol: currency_rates.symbol.clone(),
            transaction: options.transaction,
        })
    }
}

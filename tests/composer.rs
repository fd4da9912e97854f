//! Integration tests for the status-and-price composer.
//!
//! These run against in-process service doubles so the composition logic
//! (conditional pricing, option merging, batch isolation) is exercised
//! deterministically, without live RDAP or price data.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use status_n_price::{
    Availability, CheckMethod, CheckOptions, PriceQuote, PricingService, QuoteOptions, RatesConfig,
    SnpConfig, SnpError, StatusAndPrice, StatusNPrice, StatusOptions, StatusResult, StatusService,
    Transaction,
};

/// Status double that answers from a fixed table and records the options
/// it was called with.
struct ScriptedStatus {
    table: HashMap<String, Availability>,
    fail_batch: bool,
    seen_options: Mutex<Vec<StatusOptions>>,
}

impl ScriptedStatus {
    fn new(entries: &[(&str, Availability)]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(d, a)| (d.to_string(), *a))
                .collect(),
            fail_batch: false,
            seen_options: Mutex::new(Vec::new()),
        }
    }

    fn failing_batch() -> Self {
        Self {
            table: HashMap::new(),
            fail_batch: true,
            seen_options: Mutex::new(Vec::new()),
        }
    }

    fn result_for(&self, domain: &str) -> Result<StatusResult, SnpError> {
        let availability = self
            .table
            .get(domain)
            .copied()
            .ok_or_else(|| SnpError::status(domain, "unscripted domain"))?;

        Ok(StatusResult {
            domain: domain.to_string(),
            availability,
            method_used: CheckMethod::Unknown,
            check_duration: None,
        })
    }

    fn last_options(&self) -> StatusOptions {
        self.seen_options.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl StatusService for ScriptedStatus {
    async fn check(
        &self,
        domain: &str,
        options: &StatusOptions,
    ) -> Result<StatusResult, SnpError> {
        self.seen_options.lock().unwrap().push(options.clone());
        self.result_for(domain)
    }

    async fn check_batch(
        &self,
        domains: &[String],
        options: &StatusOptions,
    ) -> Result<Vec<StatusResult>, SnpError> {
        self.seen_options.lock().unwrap().push(options.clone());
        if self.fail_batch {
            return Err(SnpError::network("batch status backend unreachable"));
        }
        domains.iter().map(|d| self.result_for(d)).collect()
    }
}

/// Pricing double that echoes the requested currency at a fixed total,
/// failing for a configured set of domains.
struct ScriptedPricer {
    total: f64,
    fail_for: HashSet<String>,
}

impl ScriptedPricer {
    fn new(total: f64) -> Self {
        Self {
            total,
            fail_for: HashSet::new(),
        }
    }

    fn failing_for(mut self, domain: &str) -> Self {
        self.fail_for.insert(domain.to_string());
        self
    }
}

#[async_trait]
impl PricingService for ScriptedPricer {
    async fn get_price(
        &self,
        domain: &str,
        currency: &str,
        options: &QuoteOptions,
    ) -> Result<PriceQuote, SnpError> {
        if self.fail_for.contains(domain) {
            return Err(SnpError::unsupported_extension("zz"));
        }

        Ok(PriceQuote {
            extension: domain.split_once('.').map(|(_, e)| e).unwrap_or("").to_string(),
            currency: currency.to_string(),
            base_price: self.total,
            discount: 0.0,
            tax: 0.0,
            total_price: self.total,
            symbol: "$".to_string(),
            transaction: options.transaction,
        })
    }
}

fn composer(
    status: ScriptedStatus,
    pricer: ScriptedPricer,
) -> StatusNPrice<ScriptedStatus, ScriptedPricer> {
    StatusNPrice::with_services("USD", StatusOptions::default(), status, pricer)
}

#[tokio::test]
async fn registered_domain_has_no_price() {
    let snp = composer(
        ScriptedStatus::new(&[("google.com", Availability::Registered)]),
        ScriptedPricer::new(12.99),
    );

    let result = snp
        .check("google.com", CheckOptions::default().with_currency("USD"))
        .await
        .unwrap();

    assert_eq!(result.domain(), "google.com");
    assert_eq!(result.availability(), Availability::Registered);
    assert!(result.price.is_none());
}

#[tokio::test]
async fn unknown_availability_also_suppresses_price() {
    let snp = composer(
        ScriptedStatus::new(&[("odd.com", Availability::Unknown)]),
        ScriptedPricer::new(12.99),
    );

    let result = snp.check("odd.com", CheckOptions::default()).await.unwrap();
    assert!(result.price.is_none());
}

#[tokio::test]
async fn unregistered_domain_gets_priced_in_resolved_currency() {
    let snp = composer(
        ScriptedStatus::new(&[(
            "nonexistent-example-12345.com",
            Availability::Unregistered,
        )]),
        ScriptedPricer::new(12.99),
    );

    let result = snp
        .check(
            "nonexistent-example-12345.com",
            CheckOptions::default().with_currency("USD"),
        )
        .await
        .unwrap();

    assert_eq!(result.availability(), Availability::Unregistered);
    let price = result.price.expect("expected price for unregistered domain");
    assert_eq!(price.currency, "USD");
    assert_eq!(price.total_price, 12.99);
    assert!(price.total_price > 0.0);
}

#[tokio::test]
async fn pricing_failure_downgrades_to_absent_price() {
    let snp = composer(
        ScriptedStatus::new(&[("free.zz", Availability::Unregistered)]),
        ScriptedPricer::new(12.99).failing_for("free.zz"),
    );

    let result = snp.check("free.zz", CheckOptions::default()).await.unwrap();

    // Call still succeeds; status portion intact, price absent
    assert_eq!(result.domain(), "free.zz");
    assert_eq!(result.availability(), Availability::Unregistered);
    assert!(result.price.is_none());
}

#[tokio::test]
async fn status_failure_propagates() {
    let snp = composer(ScriptedStatus::new(&[]), ScriptedPricer::new(12.99));

    let err = snp
        .check("unscripted.com", CheckOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SnpError::StatusError { .. }));
}

#[tokio::test]
async fn per_call_currency_overrides_instance_default() {
    let status = || ScriptedStatus::new(&[("free.com", Availability::Unregistered)]);

    let snp = composer(status(), ScriptedPricer::new(9.99));
    let result = snp
        .check("free.com", CheckOptions::default().with_currency("eur"))
        .await
        .unwrap();
    assert_eq!(result.price.unwrap().currency, "EUR");

    // Absent override: instance default applies, uppercased at construction
    let snp = StatusNPrice::with_services(
        "gbp",
        StatusOptions::default(),
        status(),
        ScriptedPricer::new(9.99),
    );
    assert_eq!(snp.default_currency(), "GBP");
    let result = snp.check("free.com", CheckOptions::default()).await.unwrap();
    assert_eq!(result.price.unwrap().currency, "GBP");
}

#[tokio::test]
async fn per_call_status_options_merge_over_instance_defaults() {
    let status = ScriptedStatus::new(&[("free.com", Availability::Unregistered)]);
    let instance_defaults = StatusOptions::default()
        .with_burst_mode(false)
        .with_endpoint_override("https://rdap.default.test/domain/");

    let snp = StatusNPrice::with_services(
        "USD",
        instance_defaults,
        status,
        ScriptedPricer::new(9.99),
    );

    let per_call = StatusOptions::default().with_burst_mode(true);
    snp.check("free.com", CheckOptions::default().with_status(per_call))
        .await
        .unwrap();

    // Overridden field wins, unspecified field falls back to the default
    let seen = snp.status_service().last_options();
    assert_eq!(seen.burst_mode, Some(true));
    assert_eq!(
        seen.endpoint_override.as_deref(),
        Some("https://rdap.default.test/domain/")
    );
}

#[tokio::test]
async fn batch_preserves_order_and_length_under_mixed_outcomes() {
    let snp = composer(
        ScriptedStatus::new(&[
            ("google.com", Availability::Registered),
            ("nonexistent-example-12345.org", Availability::Unregistered),
            ("broken-pricing.net", Availability::Unregistered),
        ]),
        ScriptedPricer::new(15.49).failing_for("broken-pricing.net"),
    );

    let domains = vec![
        "google.com".to_string(),
        "nonexistent-example-12345.org".to_string(),
        "broken-pricing.net".to_string(),
    ];
    let results = snp
        .check_batch(&domains, CheckOptions::default().with_currency("EUR"))
        .await
        .unwrap();

    assert_eq!(results.len(), domains.len());
    for (result, domain) in results.iter().zip(&domains) {
        assert_eq!(result.domain(), domain);
    }

    assert!(results[0].price.is_none());

    let price = results[1].price.as_ref().expect("index 1 should be priced");
    assert_eq!(price.currency, "EUR");
    assert!(price.total_price > 0.0);

    // Pricing failure isolated to its own item
    assert_eq!(results[2].availability(), Availability::Unregistered);
    assert!(results[2].price.is_none());
}

#[tokio::test]
async fn batch_status_failure_aborts_whole_batch() {
    let snp = composer(ScriptedStatus::failing_batch(), ScriptedPricer::new(9.99));

    let domains = vec!["a.com".to_string(), "b.com".to_string()];
    let err = snp
        .check_batch(&domains, CheckOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SnpError::NetworkError { .. }));
}

#[tokio::test]
async fn batch_currency_resolved_once_and_applied_uniformly() {
    let snp = composer(
        ScriptedStatus::new(&[
            ("x.com", Availability::Unregistered),
            ("y.com", Availability::Unregistered),
        ]),
        ScriptedPricer::new(5.0),
    );

    let domains = vec!["x.com".to_string(), "y.com".to_string()];
    let results = snp
        .check_batch(&domains, CheckOptions::default().with_currency("cad"))
        .await
        .unwrap();

    for result in &results {
        assert_eq!(result.price.as_ref().unwrap().currency, "CAD");
    }
}

#[tokio::test]
async fn repeated_calls_yield_structurally_identical_results() {
    let snp = composer(
        ScriptedStatus::new(&[("free.com", Availability::Unregistered)]),
        ScriptedPricer::new(7.77),
    );

    let first = snp.check("free.com", CheckOptions::default()).await.unwrap();
    let second = snp.check("free.com", CheckOptions::default()).await.unwrap();

    assert_eq!(first.availability(), second.availability());
    assert_eq!(
        first.price.as_ref().map(|p| (p.currency.clone(), p.total_price)),
        second.price.as_ref().map(|p| (p.currency.clone(), p.total_price)),
    );
}

#[tokio::test]
async fn quote_options_are_forwarded_to_the_pricer() {
    let snp = composer(
        ScriptedStatus::new(&[("free.com", Availability::Unregistered)]),
        ScriptedPricer::new(7.77),
    );

    let opts = CheckOptions::default()
        .with_quote(QuoteOptions::default().with_transaction(Transaction::Renew));
    let result = snp.check("free.com", opts).await.unwrap();
    assert_eq!(result.price.unwrap().transaction, Transaction::Renew);
}

#[test]
fn malformed_rate_table_fails_at_construction() {
    let mut rates = RatesConfig::default();
    rates.tax_percent = 200.0;

    // Configuration errors surface when the composer is built, not on the
    // first quote
    let result = StatusNPrice::with_config(SnpConfig::default().with_rates(rates));
    assert!(matches!(result.unwrap_err(), SnpError::ConfigError { .. }));
}

#[test]
fn facade_exports_are_accessible() {
    // These should compile — they're the convenience entry points
    let _ = status_n_price::check;
    let _ = status_n_price::check_batch;
}

#[test]
fn results_serialize_with_flattened_status() {
    let result = StatusAndPrice {
        status: StatusResult {
            domain: "free.com".to_string(),
            availability: Availability::Unregistered,
            method_used: CheckMethod::Rdap,
            check_duration: None,
        },
        price: None,
    };

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["domain"], "free.com");
    assert_eq!(json["availability"], "unregistered");
}

//! RDAP-backed status provider.
//!
//! Checks domain registration status over RDAP (Registration Data Access
//! Protocol), the structured-JSON successor to WHOIS. A built-in registry
//! map resolves TLDs to their RDAP endpoints; an explicit endpoint override
//! in the per-call options bypasses the map entirely.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::SnpError;
use crate::providers::StatusService;
use crate::types::{Availability, CheckMethod, StatusOptions, StatusResult};
use crate::utils::extract_tld;

/// Default timeout for a single RDAP lookup.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Concurrency for batch lookups; raised under burst mode.
const BATCH_CONCURRENCY: usize = 10;
const BURST_CONCURRENCY: usize = 32;

/// Get the built-in RDAP registry mappings.
///
/// Maps TLD strings (like "com", "org") to RDAP endpoint base URLs.
/// These are known registry endpoints, updated periodically.
fn rdap_registry_map() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        // Popular gTLDs (Generic Top-Level Domains)
        ("com", "https://rdap.verisign.com/com/v1/domain/"),
        ("net", "https://rdap.verisign.com/net/v1/domain/"),
        (
            "org",
            "https://rdap.publicinterestregistry.org/rdap/domain/",
        ),
        ("info", "https://rdap.identitydigital.services/rdap/domain/"),
        // Google TLDs
        ("app", "https://pubapi.registry.google/rdap/domain/"),
        ("dev", "https://pubapi.registry.google/rdap/domain/"),
        ("page", "https://pubapi.registry.google/rdap/domain/"),
        // CentralNic managed gTLDs
        ("xyz", "https://rdap.centralnic.com/xyz/domain/"),
        ("tech", "https://rdap.centralnic.com/tech/domain/"),
        ("online", "https://rdap.centralnic.com/online/domain/"),
        ("site", "https://rdap.centralnic.com/site/domain/"),
        // Identity Digital managed TLDs
        ("ai", "https://rdap.identitydigital.services/rdap/domain/"),
        ("io", "https://rdap.identitydigital.services/rdap/domain/"),
        ("me", "https://rdap.identitydigital.services/rdap/domain/"),
        // Country Code TLDs (ccTLDs) with working RDAP endpoints
        ("us", "https://rdap.nic.us/domain/"),
        ("uk", "https://rdap.nominet.uk/domain/"),
        ("de", "https://rdap.denic.de/domain/"),
        ("ca", "https://rdap.ca.fury.ca/rdap/domain/"),
        ("au", "https://rdap.cctld.au/rdap/domain/"),
        ("fr", "https://rdap.nic.fr/domain/"),
        ("nl", "https://rdap.sidn.nl/domain/"),
        ("br", "https://rdap.registro.br/domain/"),
        ("in", "https://rdap.nixiregistry.in/rdap/domain/"),
        ("tv", "https://rdap.nic.tv/domain/"),
        ("cc", "https://tld-rdap.verisign.com/cc/v1/domain/"),
    ])
}

/// RDAP client implementing the `StatusService` capability.
///
/// The HTTP client is built once at construction; per-call options only
/// affect timeouts, batch concurrency, and endpoint selection.
#[derive(Debug, Clone)]
pub struct RdapStatusClient {
    /// HTTP client for making RDAP requests
    http_client: reqwest::Client,
    /// Default timeout when the per-call options carry none
    timeout: Duration,
}

impl RdapStatusClient {
    /// Create a new RDAP status client with default settings.
    pub fn new() -> Result<Self, SnpError> {
        // HTTP-level timeout sits above the per-lookup timeout as a backstop
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT + Duration::from_secs(2))
            .build()
            .map_err(|e| {
                SnpError::network_with_source("Failed to create RDAP HTTP client", e.to_string())
            })?;

        Ok(Self {
            http_client,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create a new RDAP status client with a custom default timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, SnpError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2))
            .build()
            .map_err(|e| {
                SnpError::network_with_source("Failed to create RDAP HTTP client", e.to_string())
            })?;

        Ok(Self {
            http_client,
            timeout,
        })
    }

    /// Resolve the RDAP base URL for a domain.
    fn endpoint_for(&self, domain: &str, options: &StatusOptions) -> Result<String, SnpError> {
        if let Some(endpoint) = &options.endpoint_override {
            return Ok(endpoint.clone());
        }

        let tld = extract_tld(domain)?;
        rdap_registry_map()
            .get(tld.as_str())
            .map(|endpoint| endpoint.to_string())
            .ok_or_else(|| {
                SnpError::status(domain, format!("No RDAP endpoint known for TLD '{}'", tld))
            })
    }

    /// Perform one RDAP lookup and classify the response.
    async fn lookup(&self, rdap_url: &str, domain: &str) -> Result<Availability, SnpError> {
        let response = self
            .http_client
            .get(rdap_url)
            .send()
            .await
            .map_err(|e| SnpError::status(domain, format!("Request failed: {}", e)))?;

        debug!(domain, status = %response.status(), "rdap response");

        match response.status() {
            StatusCode::OK => Ok(Availability::Registered),
            StatusCode::NOT_FOUND => Ok(Availability::Unregistered),
            StatusCode::TOO_MANY_REQUESTS => {
                // Rate limited, try once more after a short delay
                debug!(domain, "rate limited, retrying after 500ms");
                tokio::time::sleep(Duration::from_millis(500)).await;

                let retry = self
                    .http_client
                    .get(rdap_url)
                    .send()
                    .await
                    .map_err(|e| SnpError::status(domain, format!("Retry failed: {}", e)))?;

                match retry.status() {
                    StatusCode::OK => Ok(Availability::Registered),
                    StatusCode::NOT_FOUND => Ok(Availability::Unregistered),
                    code => Err(SnpError::status_with_code(
                        domain,
                        format!("RDAP server error after retry: {}", code),
                        code.as_u16(),
                    )),
                }
            }
            code => Err(SnpError::status_with_code(
                domain,
                format!("RDAP server returned error: {}", code),
                code.as_u16(),
            )),
        }
    }
}

#[async_trait]
impl StatusService for RdapStatusClient {
    async fn check(
        &self,
        domain: &str,
        options: &StatusOptions,
    ) -> Result<StatusResult, SnpError> {
        let start_time = Instant::now();

        let endpoint = self.endpoint_for(domain, options)?;
        let rdap_url = format!("{}{}", endpoint, domain);
        debug!(domain, url = %rdap_url, "rdap lookup");

        let timeout = options.timeout.unwrap_or(self.timeout);
        let availability = tokio::time::timeout(timeout, self.lookup(&rdap_url, domain))
            .await
            .map_err(|_| SnpError::timeout("RDAP request", timeout))??;

        Ok(StatusResult {
            domain: domain.to_string(),
            availability,
            method_used: CheckMethod::Rdap,
            check_duration: Some(start_time.elapsed()),
        })
    }

    async fn check_batch(
        &self,
        domains: &[String],
        options: &StatusOptions,
    ) -> Result<Vec<StatusResult>, SnpError> {
        let concurrency = if options.burst_mode.unwrap_or(false) {
            BURST_CONCURRENCY
        } else {
            BATCH_CONCURRENCY
        };

        // `buffered` keeps completion order aligned with input order
        let results: Vec<Result<StatusResult, SnpError>> = stream::iter(domains.iter().cloned())
            .map(|domain| async move { self.check(&domain, options).await })
            .buffered(concurrency)
            .collect()
            .await;

        results.into_iter().collect()
    }
}

//! Utility functions for domain parsing and validation.
//!
//! Helper functions for splitting domains into base name and extension,
//! shared by the status and pricing providers.

use crate::error::SnpError;

/// Validate a domain name well enough to attempt a lookup.
///
/// This is deliberately loose; the status service is the authority on
/// DNS well-formedness. Only obviously unusable input is rejected.
pub fn validate_domain(domain: &str) -> Result<(), SnpError> {
    let domain = domain.trim();

    if domain.is_empty() {
        return Err(SnpError::invalid_domain(
            domain,
            "Domain name cannot be empty",
        ));
    }

    if !domain.contains('.') {
        return Err(SnpError::invalid_domain(
            domain,
            "Domain name must contain an extension",
        ));
    }

    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(SnpError::invalid_domain(
            domain,
            "Domain name cannot start or end with a dot",
        ));
    }

    Ok(())
}

/// Extract the top-level domain from a domain name.
///
/// Returns the last label (e.g., "example.co.uk" -> "uk"), lowercased.
pub fn extract_tld(domain: &str) -> Result<String, SnpError> {
    validate_domain(domain)?;

    domain
        .rsplit('.')
        .next()
        .filter(|tld| !tld.is_empty())
        .map(|tld| tld.to_lowercase())
        .ok_or_else(|| SnpError::invalid_domain(domain, "Could not determine TLD"))
}

/// Extract the full extension from a domain name.
///
/// Everything after the first label, lowercased
/// (e.g., "example.co.uk" -> "co.uk").
pub fn extract_extension(domain: &str) -> Result<String, SnpError> {
    validate_domain(domain)?;

    match domain.split_once('.') {
        Some((_, ext)) if !ext.is_empty() => Ok(ext.to_lowercase()),
        _ => Err(SnpError::invalid_domain(
            domain,
            "Could not determine extension",
        )),
    }
}

/// Candidate extensions for a domain, longest suffix first.
///
/// "shop.example.co.uk" yields ["example.co.uk", "co.uk", "uk"], so a
/// rate table with a "co.uk" entry wins over the bare "uk" entry.
pub fn extension_candidates(domain: &str) -> Result<Vec<String>, SnpError> {
    let ext = extract_extension(domain)?;

    let labels: Vec<&str> = ext.split('.').collect();
    let candidates = (0..labels.len()).map(|i| labels[i..].join(".")).collect();
    Ok(candidates)
}

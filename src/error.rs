//! Error handling for status and pricing operations.
//!
//! This module defines a comprehensive error type covering the different ways
//! a combined check can fail, from status-service transport problems to
//! pricing-table lookups and malformed configuration.

use std::fmt;

/// Main error type for status and pricing operations.
///
/// Status-side failures (network, RDAP, invalid domains) always propagate
/// to the caller. Pricing-side failures (unsupported extension or currency,
/// quote computation problems) are caught by the composer and downgraded to
/// an absent price; they appear here so pricing backends have distinguishable
/// errors to return.
#[derive(Debug, Clone)]
pub enum SnpError {
    /// Invalid domain name format
    InvalidDomain { domain: String, reason: String },

    /// Network-related errors (connection, timeout, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// Status-service specific errors (RDAP response problems, unknown TLDs)
    StatusError {
        domain: String,
        message: String,
        status_code: Option<u16>,
    },

    /// The pricing table has no entry for the domain's extension
    UnsupportedExtension { extension: String },

    /// The pricing table has no conversion entry for the requested currency
    UnsupportedCurrency { currency: String },

    /// Other pricing-service failures (quote computation, backend errors)
    PricingError { message: String },

    /// Configuration errors (malformed rate tables, invalid settings)
    ConfigError { message: String },

    /// Timeout errors when operations take too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl SnpError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new status-service error.
    pub fn status<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::StatusError {
            domain: domain.into(),
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a new status-service error with an HTTP status code.
    pub fn status_with_code<D: Into<String>, M: Into<String>>(
        domain: D,
        message: M,
        status_code: u16,
    ) -> Self {
        Self::StatusError {
            domain: domain.into(),
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a new unsupported-extension error.
    pub fn unsupported_extension<E: Into<String>>(extension: E) -> Self {
        Self::UnsupportedExtension {
            extension: extension.into(),
        }
    }

    /// Create a new unsupported-currency error.
    pub fn unsupported_currency<C: Into<String>>(currency: C) -> Self {
        Self::UnsupportedCurrency {
            currency: currency.into(),
        }
    }

    /// Create a new generic pricing error.
    pub fn pricing<M: Into<String>>(message: M) -> Self {
        Self::PricingError {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error originated in the pricing service.
    ///
    /// The composer recovers pricing failures by scoping its catch to the
    /// pricing call itself; this classifier exists for callers that hold
    /// a raw pricing-service error and want the same distinction.
    pub fn is_pricing(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedExtension { .. }
                | Self::UnsupportedCurrency { .. }
                | Self::PricingError { .. }
        )
    }
}

impl fmt::Display for SnpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::StatusError {
                domain,
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "Status error for '{}' (HTTP {}): {}", domain, code, message)
                } else {
                    write!(f, "Status error for '{}': {}", domain, message)
                }
            }
            Self::UnsupportedExtension { extension } => {
                write!(f, "No price data for extension '{}'", extension)
            }
            Self::UnsupportedCurrency { currency } => {
                write!(f, "No conversion rate for currency '{}'", currency)
            }
            Self::PricingError { message } => {
                write!(f, "Pricing error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for SnpError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for SnpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(30))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for SnpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}

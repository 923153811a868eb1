//! Error types for deep-link dispatch and service resolution.
//!
//! Navigation itself never fails: pushing any route of a section is legal and
//! popping an empty stack simply reports that nothing was popped. Errors only
//! arise at the edges of the system:
//!
//! - [`DeepLinkError`] — an external URL could not be turned into a
//!   section route.
//! - [`ResolveError`] — a coordinator asked the
//!   [`ServiceContainer`](crate::container::ServiceContainer) for a service
//!   that was never registered or could not be built.
//! - [`SchemeError`] — a configured URL scheme is not a valid scheme.
//!
//! # Examples
//!
//! ```
//! use arrhub_navigator::error::DeepLinkError;
//!
//! let err = DeepLinkError::UnknownSection { host: "invalid".into() };
//! assert_eq!(err.to_string(), "Unknown deep-link section: invalid");
//! ```

use std::fmt;

// ============================================================================
// DeepLinkError
// ============================================================================

/// Reasons a deep-link URL was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLinkError {
    /// The input is not of the form `scheme://host[/path]`
    MalformedUrl { url: String },

    /// The scheme differs from the configured one (strict mode only)
    SchemeMismatch { expected: String, found: String },

    /// The host does not name any known section
    UnknownSection { host: String },

    /// The host names a tab that has no deep-link grammar or whose
    /// coordinator is not running
    UnsupportedSection { section: String },

    /// The host is known but the path matches none of its routes
    UnrecognizedPath { section: String, path: String },
}

impl fmt::Display for DeepLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeepLinkError::MalformedUrl { url } => {
                write!(f, "Malformed deep-link URL: {}", url)
            }
            DeepLinkError::SchemeMismatch { expected, found } => {
                write!(
                    f,
                    "Deep-link scheme mismatch: expected '{}', found '{}'",
                    expected, found
                )
            }
            DeepLinkError::UnknownSection { host } => {
                write!(f, "Unknown deep-link section: {}", host)
            }
            DeepLinkError::UnsupportedSection { section } => {
                write!(f, "Section '{}' cannot be opened by deep link", section)
            }
            DeepLinkError::UnrecognizedPath { section, path } => {
                write!(f, "No {} route matches path '{}'", section, path)
            }
        }
    }
}

impl std::error::Error for DeepLinkError {}

impl DeepLinkError {
    /// Check if the URL itself was unusable (as opposed to naming an
    /// unknown destination).
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            DeepLinkError::MalformedUrl { .. } | DeepLinkError::SchemeMismatch { .. }
        )
    }
}

// ============================================================================
// ResolveError
// ============================================================================

/// Failure to obtain a service from the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No instance or factory was registered for the requested type
    NotRegistered { type_name: &'static str },

    /// A registration exists but the provider could not build the service
    Failed {
        type_name: &'static str,
        reason: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NotRegistered { type_name } => {
                write!(f, "Service not registered: {}", type_name)
            }
            ResolveError::Failed { type_name, reason } => {
                write!(f, "Cannot resolve {}: {}", type_name, reason)
            }
        }
    }
}

impl std::error::Error for ResolveError {}

// ============================================================================
// SchemeError
// ============================================================================

/// A URL scheme failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeError {
    /// The rejected scheme
    pub scheme: String,
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid URL scheme: '{}'", self.scheme)
    }
}

impl std::error::Error for SchemeError {}

// ============================================================================
// Tests
// ============================================================================

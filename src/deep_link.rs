//! Deep-link URL codec.
//!
//! A deep link has the shape `scheme://<section>[/<path>]`. The host picks
//! the section (dashboard, services, settings) and the path picks one of
//! that section's routes:
//!
//! ```text
//! arrhub://dashboard                     → DashboardRoute::Home
//! arrhub://dashboard/media/12345/radarr  → DashboardRoute::MediaDetail
//! arrhub://services/configure/sonarr-1   → ServicesRoute::ServiceConfiguration
//! arrhub://settings/profiles/edit/p-1    → SettingsRoute::EditProfile
//! ```
//!
//! Identifier segments are opaque. They are percent-encoded when a URL is
//! generated and percent-decoded when one is parsed, so every identifier
//! (including ones with `/`, spaces or no characters at all) survives
//! `parse(to_url(route))`. Query strings and fragments are ignored.
//!
//! Parsing never panics: anything unrecognised becomes a [`DeepLinkError`],
//! or `None` through the [`DeepLinkRoute::parse`] shorthand.

use crate::error::{DeepLinkError, SchemeError};
use crate::routes::{DashboardRoute, ServicesRoute, SettingsRoute};
use crate::tab_config::TabRoute;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use std::str::FromStr;

/// Scheme used when generating URLs unless configured otherwise.
pub const DEFAULT_SCHEME: &str = "arrhub";

/// Characters left unescaped in a path segment (RFC 3986 "unreserved").
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

// ============================================================================
// Scheme and configuration
// ============================================================================

/// A validated, lower-cased URL scheme.
///
/// # Example
///
/// ```
/// use arrhub_navigator::DeepLinkScheme;
///
/// let scheme = DeepLinkScheme::new("ArrHub").unwrap();
/// assert_eq!(scheme.as_str(), "arrhub");
/// assert!(DeepLinkScheme::new("9lives").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeepLinkScheme(String);

impl DeepLinkScheme {
    /// Validate and normalise a scheme.
    pub fn new(scheme: impl Into<String>) -> Result<Self, SchemeError> {
        let scheme = scheme.into();
        if is_valid_scheme(&scheme) {
            Ok(Self(scheme.to_ascii_lowercase()))
        } else {
            Err(SchemeError { scheme })
        }
    }

    /// The scheme without the `://` separator.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DeepLinkScheme {
    fn default() -> Self {
        Self(DEFAULT_SCHEME.to_string())
    }
}

impl fmt::Display for DeepLinkScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runtime deep-link settings.
///
/// By default any scheme is accepted when parsing, since dispatch is decided
/// by the host alone. Strict mode additionally rejects URLs whose scheme
/// differs from [`scheme`](Self::scheme).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLinkConfig {
    /// Scheme used for generated URLs
    pub scheme: DeepLinkScheme,
    /// Reject URLs with a different scheme
    pub strict_scheme: bool,
}

impl DeepLinkConfig {
    /// Configuration with the default scheme and lenient parsing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different scheme for generated URLs.
    pub fn with_scheme(mut self, scheme: DeepLinkScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Require incoming URLs to use the configured scheme.
    pub fn strict(mut self) -> Self {
        self.strict_scheme = true;
        self
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// ============================================================================
// URL splitting
// ============================================================================

/// A URL split into its deep-link parts, still percent-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawDeepLink<'a> {
    pub scheme: &'a str,
    pub host: &'a str,
    pub path: &'a str,
}

/// Split `scheme://host/path?query#fragment` into scheme, host and path.
pub(crate) fn split_url(url: &str) -> Result<RawDeepLink<'_>, DeepLinkError> {
    let malformed = || DeepLinkError::MalformedUrl {
        url: url.to_string(),
    };

    let trimmed = url.trim();
    let (scheme, rest) = trimmed.split_once("://").ok_or_else(malformed)?;
    if !is_valid_scheme(scheme) {
        return Err(malformed());
    }

    let end = rest.find(|c: char| c == '?' || c == '#').unwrap_or(rest.len());
    let rest = &rest[..end];
    let (host, path) = match rest.find('/') {
        Some(slash) => rest.split_at(slash),
        None => (rest, ""),
    };
    if host.is_empty() {
        return Err(malformed());
    }

    Ok(RawDeepLink { scheme, host, path })
}

/// Decode a path into segments. The empty path and `/` both mean root.
///
/// Returns `None` if a segment does not decode to UTF-8.
pub(crate) fn decode_segments(path: &str) -> Option<Vec<String>> {
    if path.is_empty() || path == "/" {
        return Some(Vec::new());
    }
    path.strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .map(|segment| {
            percent_decode_str(segment)
                .decode_utf8()
                .ok()
                .map(|s| s.into_owned())
        })
        .collect()
}

/// Encode segments into a path (`""` for no segments).
pub(crate) fn encode_path(segments: &[&str]) -> String {
    let mut path = String::new();
    for segment in segments {
        path.push('/');
        path.extend(utf8_percent_encode(segment, SEGMENT));
    }
    path
}

// ============================================================================
// DeepLinkRoute trait
// ============================================================================

/// Route type of one deep-linkable section.
///
/// Implementors describe the mapping between their variants and raw path
/// segments; parsing and URL generation are provided.
///
/// # Example
///
/// ```
/// use arrhub_navigator::{DashboardRoute, DeepLinkRoute};
///
/// let route = DashboardRoute::parse("scheme://dashboard/service/radarr-1").unwrap();
/// assert_eq!(route, DashboardRoute::service_detail("radarr-1"));
/// assert_eq!(route.to_url(), "arrhub://dashboard/service/radarr-1");
/// ```
pub trait DeepLinkRoute: Sized + Clone + PartialEq + fmt::Debug {
    /// The tab whose host selects this route type.
    const TAB: TabRoute;

    /// The route pushed when the section's coordinator starts.
    fn root() -> Self;

    /// Match decoded path segments against the section grammar.
    fn from_segments(segments: &[&str]) -> Option<Self>;

    /// Decoded path segments for this route (empty for the root).
    fn segments(&self) -> Vec<&str>;

    /// Parse a full URL, returning `None` for anything unrecognised.
    fn parse(url: &str) -> Option<Self> {
        Self::try_parse(url).ok()
    }

    /// Parse a full URL, reporting why it was rejected.
    fn try_parse(url: &str) -> Result<Self, DeepLinkError> {
        let raw = split_url(url)?;
        if !raw.host.eq_ignore_ascii_case(Self::TAB.id()) {
            return Err(match TabRoute::from_id(raw.host) {
                Some(tab) => DeepLinkError::UnsupportedSection {
                    section: tab.id().to_string(),
                },
                None => DeepLinkError::UnknownSection {
                    host: raw.host.to_string(),
                },
            });
        }
        Self::from_path(raw.path)
    }

    /// Parse only the path part (`""`, `/service/x`, ...).
    fn from_path(path: &str) -> Result<Self, DeepLinkError> {
        let unrecognized = || DeepLinkError::UnrecognizedPath {
            section: Self::TAB.id().to_string(),
            path: path.to_string(),
        };
        let segments = decode_segments(path).ok_or_else(unrecognized)?;
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        Self::from_segments(&segments).ok_or_else(unrecognized)
    }

    /// Encoded path for this route.
    fn path(&self) -> String {
        encode_path(&self.segments())
    }

    /// URL using the [default scheme](DEFAULT_SCHEME).
    fn to_url(&self) -> String {
        self.to_url_with(&DeepLinkScheme::default())
    }

    /// URL using the given scheme.
    fn to_url_with(&self, scheme: &DeepLinkScheme) -> String {
        format!("{}://{}{}", scheme, Self::TAB.id(), self.path())
    }
}

// ============================================================================
// DeepLink
// ============================================================================

/// A parsed deep link: a route tagged with the section it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeepLink {
    Dashboard(DashboardRoute),
    Services(ServicesRoute),
    Settings(SettingsRoute),
}

impl DeepLink {
    /// Parse a URL, accepting any scheme.
    ///
    /// # Example
    ///
    /// ```
    /// use arrhub_navigator::{DeepLink, ServicesRoute, TabRoute};
    ///
    /// let link = DeepLink::parse("scheme://services/add").unwrap();
    /// assert_eq!(link, DeepLink::Services(ServicesRoute::AddService));
    /// assert_eq!(link.tab(), TabRoute::Services);
    /// ```
    pub fn parse(url: &str) -> Result<Self, DeepLinkError> {
        Self::parse_with(url, &DeepLinkConfig::default())
    }

    /// Parse a URL under the given configuration.
    pub fn parse_with(url: &str, config: &DeepLinkConfig) -> Result<Self, DeepLinkError> {
        let raw = split_url(url)?;
        if config.strict_scheme && !raw.scheme.eq_ignore_ascii_case(config.scheme.as_str()) {
            return Err(DeepLinkError::SchemeMismatch {
                expected: config.scheme.to_string(),
                found: raw.scheme.to_string(),
            });
        }

        let tab = TabRoute::from_id(raw.host).ok_or_else(|| DeepLinkError::UnknownSection {
            host: raw.host.to_string(),
        })?;

        match tab {
            TabRoute::Dashboard => DashboardRoute::from_path(raw.path).map(DeepLink::Dashboard),
            TabRoute::Services => ServicesRoute::from_path(raw.path).map(DeepLink::Services),
            TabRoute::Settings => SettingsRoute::from_path(raw.path).map(DeepLink::Settings),
            TabRoute::Calendar | TabRoute::Search => Err(DeepLinkError::UnsupportedSection {
                section: tab.id().to_string(),
            }),
        }
    }

    /// The tab this link selects.
    pub fn tab(&self) -> TabRoute {
        match self {
            DeepLink::Dashboard(_) => DashboardRoute::TAB,
            DeepLink::Services(_) => ServicesRoute::TAB,
            DeepLink::Settings(_) => SettingsRoute::TAB,
        }
    }

    /// URL using the default scheme.
    pub fn to_url(&self) -> String {
        self.to_url_with(&DeepLinkScheme::default())
    }

    /// URL using the given scheme.
    pub fn to_url_with(&self, scheme: &DeepLinkScheme) -> String {
        match self {
            DeepLink::Dashboard(route) => route.to_url_with(scheme),
            DeepLink::Services(route) => route.to_url_with(scheme),
            DeepLink::Settings(route) => route.to_url_with(scheme),
        }
    }
}

impl FromStr for DeepLink {
    type Err = DeepLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

impl From<DashboardRoute> for DeepLink {
    fn from(route: DashboardRoute) -> Self {
        DeepLink::Dashboard(route)
    }
}

impl From<ServicesRoute> for DeepLink {
    fn from(route: ServicesRoute) -> Self {
        DeepLink::Services(route)
    }
}

impl From<SettingsRoute> for DeepLink {
    fn from(route: SettingsRoute) -> Self {
        DeepLink::Settings(route)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! # XML Namespace Support
//!
//! XMILE documents use the OASIS XMILE namespace as their default namespace.
//! Vendors extend the format with elements and attributes in their own
//! namespaces; isee systems (STELLA, iThink) is the most common one, and
//! `pie_input` itself lives there.
//!
//! ## Examples
//!
//! ```rust
//! use xmile_bind::Namespace;
//! use xmile_bind::namespace::ISEE_NAMESPACE;
//!
//! let ns = Namespace::from_uri(ISEE_NAMESPACE);
//! assert_eq!(ns, Namespace::Isee);
//! assert_eq!(ns.prefix(), Some("isee"));
//! assert!(ns.is_vendor());
//! ```

use std::{fmt, ops};

/// The base XMILE 1.0 namespace URI.
pub const XMILE_NAMESPACE: &str = "http://docs.oasis-open.org/xmile/ns/XMILE/v1.0";

/// The isee systems vendor-extension namespace URI.
pub const ISEE_NAMESPACE: &str = "http://iseesystems.com/XMILE";

/// An XML namespace known to the binding layer.
///
/// | Namespace | URI | Prefix |
/// |-----------|-----|--------|
/// | `Xmile` | `http://docs.oasis-open.org/xmile/ns/XMILE/v1.0` | `xmile` (default namespace for elements) |
/// | `Isee` | `http://iseesystems.com/XMILE` | `isee` |
///
/// Any other URI is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// The OASIS XMILE namespace.
    Xmile,

    /// isee systems extensions.
    Isee,

    /// A namespace URI not in the predefined list.
    Other(String),
}

impl Namespace {
    /// Maps a namespace URI to its `Namespace` variant.
    ///
    /// ```rust
    /// use xmile_bind::Namespace;
    ///
    /// assert_eq!(
    ///     Namespace::from_uri("http://docs.oasis-open.org/xmile/ns/XMILE/v1.0"),
    ///     Namespace::Xmile
    /// );
    /// assert_eq!(
    ///     Namespace::from_uri("urn:example"),
    ///     Namespace::Other("urn:example".to_string())
    /// );
    /// ```
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            XMILE_NAMESPACE => Namespace::Xmile,
            ISEE_NAMESPACE => Namespace::Isee,
            _ => Namespace::Other(uri.to_string()),
        }
    }

    /// Returns the namespace URI.
    pub fn uri(&self) -> &str {
        match self {
            Namespace::Xmile => XMILE_NAMESPACE,
            Namespace::Isee => ISEE_NAMESPACE,
            Namespace::Other(uri) => uri,
        }
    }

    /// Returns the conventional prefix, if the namespace has one.
    ///
    /// `Other` namespaces have no conventional prefix; the writer generates
    /// one for them.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Namespace::Xmile => Some("xmile"),
            Namespace::Isee => Some("isee"),
            Namespace::Other(_) => None,
        }
    }

    /// Checks if this namespace carries vendor extensions rather than base
    /// XMILE constructs.
    ///
    /// ```rust
    /// use xmile_bind::Namespace;
    ///
    /// assert!(Namespace::Isee.is_vendor());
    /// assert!(!Namespace::Xmile.is_vendor());
    /// ```
    pub fn is_vendor(&self) -> bool {
        matches!(self, Namespace::Isee)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}

impl ops::Deref for Namespace {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.uri()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_uris_round_trip() {
        for ns in [Namespace::Xmile, Namespace::Isee] {
            assert_eq!(Namespace::from_uri(ns.uri()), ns);
        }
    }

    #[test]
    fn test_other_namespace_has_no_prefix() {
        let ns = Namespace::from_uri("urn:vendor:custom");
        assert_eq!(ns.prefix(), None);
        assert!(!ns.is_vendor());
        assert_eq!(&*ns, "urn:vendor:custom");
    }

    #[test]
    fn test_display_is_uri() {
        assert_eq!(Namespace::Isee.to_string(), ISEE_NAMESPACE);
    }
}

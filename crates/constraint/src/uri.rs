//! Hierarchical URI values
//!
//! Comparison operands that both parse as URIs (`fd:/DC0/Rack1`) are compared
//! structurally rather than as text: scheme and authority ignore ASCII case,
//! and `^` tests whether one URI's path segments are a prefix of another's.
//!
//! Parsing is done by [`url::Url`]. On top of it this module keeps the text
//! as written (for display), rejects malformed `%` escapes, and applies the
//! case and segment rules used by comparisons.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::Ipv4Addr;
use std::str::FromStr;

use url::{Host, Url};

use crate::error::UriError;

const WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];

/// What kind of host an authority names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    /// No authority, or an empty host
    None,
    /// Dotted-quad IPv4 address
    IPv4,
    /// Bracketed IPv6 literal
    IPv6,
    /// Registered name
    RegName,
}

/// A parsed hierarchical URI.
#[derive(Debug, Clone)]
pub struct Uri {
    url: Url,
    text: String,
    path: String,
    segments: Vec<String>,
}

impl Uri {
    /// Parse `text` as a URI. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`UriError`] if the scheme is missing or malformed, the
    /// host or port is invalid, or a `%` escape is incomplete.
    pub fn parse(text: &str) -> Result<Self, UriError> {
        let text = text.trim_matches(WHITESPACE);
        let url = Url::parse(text).map_err(|err| parse_error(text, err))?;
        check_escapes(text)?;

        // rootless paths (`fd:DC0/Rack1`) have no `path_segments`
        let segments = url
            .path_segments()
            .unwrap_or_else(|| url.path().split('/'))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            path: raw_path(text).to_string(),
            text: text.to_string(),
            segments,
            url,
        })
    }

    /// The underlying parsed URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The scheme, lowercased.
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// The authority (`host[:port]`), if the URI has one.
    pub fn authority(&self) -> Option<&str> {
        self.url.has_authority().then(|| self.url.authority())
    }

    /// The host, without brackets for IPv6.
    pub fn host(&self) -> &str {
        self.url
            .host_str()
            .unwrap_or_default()
            .trim_start_matches('[')
            .trim_end_matches(']')
    }

    /// What kind of host the authority names.
    pub fn host_kind(&self) -> HostKind {
        match self.url.host() {
            None => HostKind::None,
            Some(Host::Domain("")) => HostKind::None,
            // hosts of non-special schemes are opaque to `url`
            Some(Host::Domain(name)) if name.parse::<Ipv4Addr>().is_ok() => HostKind::IPv4,
            Some(Host::Domain(_)) => HostKind::RegName,
            Some(Host::Ipv4(_)) => HostKind::IPv4,
            Some(Host::Ipv6(_)) => HostKind::IPv6,
        }
    }

    /// The explicit port, if any.
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    /// The path, as written.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query, without the `?`.
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    /// The fragment, without the `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.url.fragment()
    }

    /// Non-empty `/`-separated path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Does the URI carry a query or a fragment?
    pub fn has_query_or_fragment(&self) -> bool {
        self.query().is_some() || self.fragment().is_some()
    }

    /// Is `self` a strict hierarchical prefix of `other`?
    ///
    /// Schemes and authorities must be equal and `self` must have no query or
    /// fragment. Then either `self`'s segments are a strict prefix of
    /// `other`'s, or the segments are equal and `other` adds a query or
    /// fragment. A URI is never a prefix of itself.
    pub fn is_prefix_of(&self, other: &Uri) -> bool {
        if !self.same_origin(other) || self.has_query_or_fragment() {
            return false;
        }

        let (mine, theirs) = (&self.segments, &other.segments);
        if mine.len() < theirs.len() {
            theirs.starts_with(mine)
        } else {
            mine == theirs && other.has_query_or_fragment()
        }
    }

    fn same_origin(&self, other: &Uri) -> bool {
        self.scheme() == other.scheme()
            && match (self.authority(), other.authority()) {
                (None, None) => true,
                (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                _ => false,
            }
    }

    fn lowered_authority(&self) -> Option<String> {
        self.authority().map(str::to_ascii_lowercase)
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.same_origin(other)
            && self.url.path() == other.url.path()
            && self.query() == other.query()
            && self.fragment() == other.fragment()
    }
}

impl Eq for Uri {}

impl Ord for Uri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scheme()
            .cmp(other.scheme())
            .then_with(|| self.lowered_authority().cmp(&other.lowered_authority()))
            .then_with(|| self.url.path().cmp(other.url.path()))
            .then_with(|| self.query().cmp(&other.query()))
            .then_with(|| self.fragment().cmp(&other.fragment()))
    }
}

impl PartialOrd for Uri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme().hash(state);
        self.lowered_authority().hash(state);
        self.url.path().hash(state);
        self.query().hash(state);
        self.fragment().hash(state);
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = UriError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Uri::parse(s)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn parse_error(text: &str, err: url::ParseError) -> UriError {
    use url::ParseError as E;

    let text = text.to_string();
    match err {
        E::RelativeUrlWithoutBase | E::RelativeUrlWithCannotBeABaseBase => UriError::InvalidScheme(text),
        E::InvalidPort => UriError::InvalidPort(text),
        source => UriError::InvalidAuthority { text, source },
    }
}

/// The path as written: after `scheme:` and any `//authority`, before `?` or `#`.
fn raw_path(text: &str) -> &str {
    let rest = text.split_once(':').map_or("", |(_, rest)| rest);
    let rest = match rest.strip_prefix("//") {
        Some(after) => &after[after.find(['/', '?', '#']).unwrap_or(after.len())..],
        None => rest,
    };
    &rest[..rest.find(['?', '#']).unwrap_or(rest.len())]
}

/// Every `%` must be followed by two hex digits.
fn check_escapes(text: &str) -> Result<(), UriError> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(UriError::InvalidEscape(text.to_string()));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

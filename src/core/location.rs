//! The location value object and its construction rules.

use super::path::{normalize_pathname, resolve_pathname, PathTransform};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single navigable position.
///
/// `pathname` is always percent-encoded and starts with `/`. `search` is
/// empty or starts with `?`, `hash` is empty or starts with `#`. `state` is
/// opaque caller data. `key` is set on every location created by a push or
/// replace and absent on the location read from the host at start-up.
///
/// Equality ignores `key`.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{create_location, Location};
///
/// let location = create_location("/home?the=query#the-hash", None, None, None, None);
/// assert_eq!(location.pathname, "/home");
/// assert_eq!(location.search, "?the=query");
/// assert_eq!(location.hash, "#the-hash");
/// assert!(location.key.is_none());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Location {
    /// `pathname + search + hash`.
    pub fn path(&self) -> String {
        create_path(&self.pathname, &self.search, &self.hash)
    }

    /// Whether both locations address the same path, ignoring state and key.
    pub fn same_path(&self, other: &Location) -> bool {
        self.pathname == other.pathname && self.search == other.search && self.hash == other.hash
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.same_path(other) && self.state == other.state
    }
}

/// A partial location. Without a pathname, missing fields are filled in
/// from the current location.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDescriptor {
    #[serde(default)]
    pub pathname: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub state: Option<Value>,
}

impl LocationDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a path string into its parts. Parts that are not present in the
    /// string are left as `None`.
    ///
    /// ```rust
    /// use waypoint::core::LocationDescriptor;
    ///
    /// let descriptor = LocationDescriptor::from_path("?a=b#c");
    /// assert_eq!(descriptor.pathname, None);
    /// assert_eq!(descriptor.search.as_deref(), Some("?a=b"));
    /// assert_eq!(descriptor.hash.as_deref(), Some("#c"));
    /// ```
    pub fn from_path(path: &str) -> Self {
        let (rest, hash) = match path.find('#') {
            Some(at) => (&path[..at], Some(&path[at..])),
            None => (path, None),
        };
        let (pathname, search) = match rest.find('?') {
            Some(at) => (&rest[..at], Some(&rest[at..])),
            None => (rest, None),
        };

        Self {
            pathname: (!pathname.is_empty()).then(|| pathname.to_string()),
            search: search.map(|s| if s == "?" { String::new() } else { s.to_string() }),
            hash: hash.map(|h| if h == "#" { String::new() } else { h.to_string() }),
            state: None,
        }
    }

    pub fn pathname(mut self, pathname: impl Into<String>) -> Self {
        self.pathname = Some(pathname.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn state(mut self, state: Value) -> Self {
        self.state = Some(state);
        self
    }
}

/// Navigation target: a path string or a partial descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum To {
    Path(String),
    Descriptor(LocationDescriptor),
}

impl From<&str> for To {
    fn from(path: &str) -> Self {
        To::Path(path.to_string())
    }
}

impl From<String> for To {
    fn from(path: String) -> Self {
        To::Path(path)
    }
}

impl From<LocationDescriptor> for To {
    fn from(descriptor: LocationDescriptor) -> Self {
        To::Descriptor(descriptor)
    }
}

impl From<&Location> for To {
    fn from(location: &Location) -> Self {
        To::Descriptor(LocationDescriptor {
            pathname: Some(location.pathname.clone()),
            search: Some(location.search.clone()),
            hash: Some(location.hash.clone()),
            state: location.state.clone(),
        })
    }
}

/// Join the parts of a location into a path string.
pub fn create_path(pathname: &str, search: &str, hash: &str) -> String {
    let mut path = if pathname.is_empty() {
        String::from("/")
    } else {
        pathname.to_string()
    };
    path.push_str(&with_prefix(search, '?'));
    path.push_str(&with_prefix(hash, '#'));
    path
}

fn with_prefix(part: &str, prefix: char) -> String {
    if part.is_empty() || (part.len() == prefix.len_utf8() && part.starts_with(prefix)) {
        String::new()
    } else if part.starts_with(prefix) {
        part.to_string()
    } else {
        format!("{prefix}{part}")
    }
}

/// Build a normalized [`Location`].
///
/// `state` is used when `to` is a path string, or when the descriptor does
/// not carry its own state. With a `current` location, relative pathnames
/// resolve against it. When the pathname is missing, it and every other
/// missing part are taken from the current location. A given pathname
/// starts from an empty search and hash.
///
/// Without a current location the pathname defaults to `/`.
pub fn create_location(
    to: impl Into<To>,
    state: Option<Value>,
    key: Option<String>,
    current: Option<&Location>,
    transform: Option<&PathTransform>,
) -> Location {
    let descriptor = match to.into() {
        To::Path(path) => LocationDescriptor {
            state,
            ..LocationDescriptor::from_path(&path)
        },
        To::Descriptor(mut descriptor) => {
            if descriptor.state.is_none() {
                descriptor.state = state;
            }
            descriptor
        }
    };

    let pathname = descriptor.pathname.filter(|p| !p.is_empty());
    let search = descriptor.search.map(|s| with_prefix(&s, '?'));
    let hash = descriptor.hash.map(|h| with_prefix(&h, '#'));

    let (pathname, search, hash) = match (current, pathname) {
        (Some(current), Some(pathname)) => (
            resolve_pathname(&pathname, &current.pathname),
            search.unwrap_or_default(),
            hash.unwrap_or_default(),
        ),
        (Some(current), None) => (
            current.pathname.clone(),
            search.unwrap_or_else(|| current.search.clone()),
            hash.unwrap_or_else(|| current.hash.clone()),
        ),
        (None, Some(pathname)) => (
            resolve_pathname(&pathname, "/"),
            search.unwrap_or_default(),
            hash.unwrap_or_default(),
        ),
        (None, None) => (
            String::from("/"),
            search.unwrap_or_default(),
            hash.unwrap_or_default(),
        ),
    };

    Location {
        pathname: normalize_pathname(&pathname, transform),
        search,
        hash,
        state: descriptor.state,
        key,
    }
}

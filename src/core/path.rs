//! Path codec: encoding, relative resolution and basename handling.
//!
//! All functions here are pure string transformations. Pathnames are encoded
//! as a whole (slashes are kept), and encoding never double-escapes a `%`
//! that already starts a valid escape sequence.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::rc::Rc;

/// Bytes escaped inside a pathname. Mirrors what a URI encoder leaves alone,
/// minus `?` and `#` which would otherwise start the search or hash.
const PATHNAME: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b';')
    .remove(b',')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Caller supplied rewrite applied to every pathname before it is encoded.
pub type PathTransform = Rc<dyn Fn(&str) -> String>;

fn is_escape(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit()
}

/// Percent-encode a pathname.
///
/// Non-ASCII characters are encoded as their UTF-8 bytes. Existing escape
/// sequences (`%` followed by two hex digits) are copied verbatim, so the
/// function is idempotent.
///
/// # Example
///
/// ```rust
/// use waypoint::core::encode_path;
///
/// assert_eq!(encode_path("/test ing"), "/test%20ing");
/// assert_eq!(encode_path("/歴史"), "/%E6%AD%B4%E5%8F%B2");
/// assert_eq!(encode_path("/100%20%25"), "/100%20%25");
/// ```
pub fn encode_path(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut encoded = String::with_capacity(raw.len());
    let mut run_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && is_escape(&bytes[i..]) {
            encoded.extend(utf8_percent_encode(&raw[run_start..i], PATHNAME));
            encoded.push_str(&raw[i..i + 3]);
            i += 3;
            run_start = i;
        } else {
            i += 1;
        }
    }

    encoded.extend(utf8_percent_encode(&raw[run_start..], PATHNAME));
    encoded
}

/// Decode every escape sequence in a pathname.
///
/// Byte sequences that are not valid UTF-8 decode to U+FFFD.
pub fn decode_path(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

/// Apply the optional transform, then encode.
pub fn normalize_pathname(pathname: &str, transform: Option<&PathTransform>) -> String {
    match transform {
        Some(transform) => encode_path(&transform(pathname)),
        None => encode_path(pathname),
    }
}

/// Resolve `candidate` against the directory of `base`.
///
/// Absolute candidates are returned unchanged. `.` and `..` segments are
/// collapsed and `..` never climbs above the root.
///
/// # Example
///
/// ```rust
/// use waypoint::core::resolve_pathname;
///
/// assert_eq!(resolve_pathname("../other/path", "/the/path"), "/other/path");
/// assert_eq!(resolve_pathname("sibling", "/the/path"), "/the/sibling");
/// assert_eq!(resolve_pathname("/absolute", "/the/path"), "/absolute");
/// ```
pub fn resolve_pathname(candidate: &str, base: &str) -> String {
    if candidate.is_empty() {
        return base.to_string();
    }
    if candidate.starts_with('/') {
        return candidate.to_string();
    }

    let mut segments: Vec<&str> = base.split('/').skip(1).collect();
    // The last base segment is the "file", not part of the directory.
    segments.pop();

    let parts: Vec<&str> = candidate.split('/').collect();
    let trailing_slash = matches!(parts.last(), Some(&"") | Some(&".") | Some(&".."));

    for part in parts {
        match part {
            "." => {}
            ".." => {
                segments.pop();
            }
            "" => {}
            other => segments.push(other),
        }
    }

    let mut resolved = format!("/{}", segments.join("/"));
    if trailing_slash && !resolved.ends_with('/') {
        resolved.push('/');
    }
    resolved
}

pub fn add_leading_slash(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

pub fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

pub fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Canonical form of a configured basename: leading slash, no trailing
/// slash, and the empty string for "no basename".
pub fn normalize_basename(basename: &str) -> String {
    let trimmed = strip_trailing_slash(basename.trim());
    if trimmed.is_empty() {
        String::new()
    } else {
        add_leading_slash(trimmed).into_owned()
    }
}

/// Whether `path` starts with `basename` on a segment boundary, ignoring
/// ASCII case.
pub fn has_basename(path: &str, basename: &str) -> bool {
    let Some(prefix) = path.get(..basename.len()) else {
        return false;
    };
    prefix.eq_ignore_ascii_case(basename)
        && matches!(
            path.as_bytes().get(basename.len()).copied(),
            None | Some(b'/' | b'?' | b'#')
        )
}

/// Remove `basename` from the front of `path` (which may carry a search and
/// hash). Paths that do not start with the basename are returned unchanged.
///
/// # Example
///
/// ```rust
/// use waypoint::core::strip_basename;
///
/// assert_eq!(strip_basename("/prefix/pathname", "/prefix"), "/pathname");
/// assert_eq!(strip_basename("/PREFIX/pathname", "/prefix"), "/pathname");
/// assert_eq!(strip_basename("/prefixed/pathname", "/prefix"), "/prefixed/pathname");
/// assert_eq!(strip_basename("/prefix?a=b", "/prefix"), "/?a=b");
/// ```
pub fn strip_basename<'a>(path: &'a str, basename: &str) -> Cow<'a, str> {
    if basename.is_empty() || !has_basename(path, basename) {
        return Cow::Borrowed(path);
    }

    let rest = &path[basename.len()..];
    if rest.starts_with('/') {
        Cow::Borrowed(rest)
    } else {
        Cow::Owned(format!("/{rest}"))
    }
}

/// How a path is written into the hash fragment under hash addressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashType {
    /// `#/home`
    #[default]
    Slash,
    /// `#home`
    NoSlash,
    /// `#!/home`
    HashBang,
}

impl HashType {
    /// Path to fragment (without the leading `#`).
    pub fn encode(&self, path: &str) -> String {
        match self {
            Self::Slash => add_leading_slash(path).into_owned(),
            Self::NoSlash => strip_leading_slash(path).to_string(),
            Self::HashBang => {
                if path.starts_with('!') {
                    path.to_string()
                } else {
                    format!("!/{}", strip_leading_slash(path))
                }
            }
        }
    }

    /// Fragment (without the leading `#`) back to a path.
    pub fn decode(&self, fragment: &str) -> String {
        match self {
            Self::Slash | Self::NoSlash => add_leading_slash(fragment).into_owned(),
            Self::HashBang => fragment.strip_prefix('!').unwrap_or(fragment).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_spaces_and_unicode() {
        assert_eq!(encode_path("/test ing"), "/test%20ing");
        assert_eq!(encode_path("/歴史"), "/%E6%AD%B4%E5%8F%B2");
    }

    #[test]
    fn keeps_uri_safe_characters() {
        assert_eq!(encode_path("/a-b_c.d~e/(f)!*'"), "/a-b_c.d~e/(f)!*'");
        assert_eq!(encode_path("/user:1@host;x=y,z&w+$"), "/user:1@host;x=y,z&w+$");
    }

    #[test]
    fn escapes_delimiters_inside_pathname() {
        assert_eq!(encode_path("/what?#"), "/what%3F%23");
    }

    #[test]
    fn preserves_existing_escapes() {
        assert_eq!(encode_path("/100%20%25"), "/100%20%25");
        assert_eq!(encode_path("/%e6%ad%b4"), "/%e6%ad%b4");
    }

    #[test]
    fn escapes_lone_percent() {
        assert_eq!(encode_path("/100%"), "/100%25");
        assert_eq!(encode_path("/%zz"), "/%25zz");
        assert_eq!(encode_path("/%2"), "/%252");
    }

    #[test]
    fn decode_reverses_encode() {
        assert_eq!(decode_path("/%E6%AD%B4%E5%8F%B2"), "/歴史");
        assert_eq!(decode_path("/test%20ing"), "/test ing");
    }

    #[test]
    fn decode_invalid_utf8_is_lossy() {
        assert_eq!(decode_path("/%FF"), "/\u{FFFD}");
    }

    #[test]
    fn transform_runs_before_encoding() {
        let upper: PathTransform = Rc::new(|p: &str| p.to_uppercase());
        assert_eq!(normalize_pathname("/hello world", Some(&upper)), "/HELLO%20WORLD");
        assert_eq!(normalize_pathname("/hello world", None), "/hello%20world");
    }

    #[test]
    fn resolves_relative_segments() {
        assert_eq!(resolve_pathname("../other/path", "/the/path"), "/other/path");
        assert_eq!(resolve_pathname("./sibling", "/the/path"), "/the/sibling");
        assert_eq!(resolve_pathname("child", "/dir/"), "/dir/child");
        assert_eq!(resolve_pathname("..", "/a/b/c"), "/a/");
        assert_eq!(resolve_pathname(".", "/a/b"), "/a/");
    }

    #[test]
    fn dot_dot_stops_at_root() {
        assert_eq!(resolve_pathname("../../../x", "/a/b"), "/x");
        assert_eq!(resolve_pathname("x", "/"), "/x");
    }

    #[test]
    fn absolute_and_empty_candidates() {
        assert_eq!(resolve_pathname("/abs", "/a/b"), "/abs");
        assert_eq!(resolve_pathname("", "/a/b"), "/a/b");
    }

    #[test]
    fn basename_normalization() {
        assert_eq!(normalize_basename(""), "");
        assert_eq!(normalize_basename("/"), "");
        assert_eq!(normalize_basename("prefix/"), "/prefix");
        assert_eq!(normalize_basename("/prefix"), "/prefix");
    }

    #[test]
    fn basename_is_stripped_on_segment_boundaries() {
        assert_eq!(strip_basename("/prefix/pathname", "/prefix"), "/pathname");
        assert_eq!(strip_basename("/PREFIX/pathname", "/prefix"), "/pathname");
        assert_eq!(strip_basename("/prefixed/pathname", "/prefix"), "/prefixed/pathname");
        assert_eq!(strip_basename("/prefix", "/prefix"), "/");
        assert_eq!(strip_basename("/prefix?a=b", "/prefix"), "/?a=b");
        assert_eq!(strip_basename("/prefix#rest", "/prefix"), "/#rest");
    }

    #[test]
    fn empty_basename_strips_nothing() {
        assert_eq!(strip_basename("/a/b", ""), "/a/b");
    }

    #[test]
    fn basename_check_handles_multibyte_paths() {
        assert!(!has_basename("/歴史", "/pre"));
    }

    #[test]
    fn hash_types_encode() {
        assert_eq!(HashType::Slash.encode("home"), "/home");
        assert_eq!(HashType::NoSlash.encode("/home"), "home");
        assert_eq!(HashType::HashBang.encode("/home"), "!/home");
        assert_eq!(HashType::HashBang.encode("!/home"), "!/home");
    }

    #[test]
    fn hash_types_decode() {
        assert_eq!(HashType::Slash.decode("/home"), "/home");
        assert_eq!(HashType::NoSlash.decode("home"), "/home");
        assert_eq!(HashType::HashBang.decode("!/home"), "/home");
        assert_eq!(HashType::HashBang.decode(""), "");
    }
}

//! Path segmentation
//!
//! A path is cut on `/`. A leading `/` becomes the root segment itself, the
//! rest is tokenized with empty tokens discarded, so `//a///b/` yields
//! `["/", "a", "b"]`. Keyed list segments (`interface=eth0`) are never split
//! further; only the query-side variant rewrites them to their canonical
//! `interface=` form.

/// Path separator
pub const SEPARATOR: char = '/';

/// Root segment, emitted once for a path starting with [`SEPARATOR`]
pub const ROOT: &str = "/";

/// Separates a list name from its key value inside one segment
pub const KEY_MARKER: char = '=';

/// True if the path starts at the root
#[inline]
pub fn is_rooted(path: &str) -> bool {
    path.starts_with(SEPARATOR)
}

/// True if the segment carries a key marker
#[inline]
pub fn is_keyed(segment: &str) -> bool {
    segment.contains(KEY_MARKER)
}

/// Split a path into its segments.
///
/// Registration keys come from here untouched.
///
/// ```
/// use dispatch_tree::segment::split;
///
/// assert_eq!(split("/a/ab/aba"), vec!["/", "a", "ab", "aba"]);
/// assert_eq!(split("/b/interface=eth0"), vec!["/", "b", "interface=eth0"]);
/// assert!(split("").is_empty());
/// ```
pub fn split(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();

    let rest = match path.strip_prefix(SEPARATOR) {
        Some(rest) => {
            segments.push(ROOT);
            rest
        }
        None => path,
    };

    segments.extend(rest.split(SEPARATOR).filter(|s| !s.is_empty()));
    segments
}

/// Truncate a keyed segment right after its first key marker.
///
/// `interface=eth0` becomes `interface=`; with several markers only the first
/// counts (`a=b=c` becomes `a=`). Unkeyed segments are returned as is.
#[inline]
pub fn canonicalize(segment: &str) -> &str {
    match segment.find(KEY_MARKER) {
        Some(idx) => &segment[..idx + KEY_MARKER.len_utf8()],
        None => segment,
    }
}

/// Split a query path and canonicalize every keyed segment.
///
/// ```
/// use dispatch_tree::segment::split_and_canonicalize;
///
/// assert_eq!(
///     split_and_canonicalize("/b/interface=eth0/mtu"),
///     vec!["/", "b", "interface=", "mtu"]
/// );
/// ```
pub fn split_and_canonicalize(path: &str) -> Vec<&str> {
    split(path).into_iter().map(canonicalize).collect()
}

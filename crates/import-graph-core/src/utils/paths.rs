//! Hierarchical path utilities.
//!
//! Every policy decision reduces to [`is_prefix`], so deny-rules, exemptions
//! and relative-import allowances all agree on what "under a package" means.

/// Separator between dotted path segments.
pub const SEPARATOR: char = '.';

/// Checks if `prefix` is a segment-wise prefix of `path`.
///
/// The empty sequence is a prefix of everything, and every sequence is a
/// prefix of itself.
///
/// # Examples
///
/// ```
/// use import_graph_core::is_prefix;
///
/// assert!(is_prefix(&["a", "b"], &["a", "b", "c"]));
/// assert!(!is_prefix(&["a", "bc"], &["a", "b", "c"]));
/// assert!(!is_prefix(&["a", "b", "c"], &["a", "b"]));
/// ```
#[must_use]
pub fn is_prefix<A, B>(prefix: &[A], path: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    prefix.len() <= path.len()
        && prefix
            .iter()
            .zip(path)
            .all(|(a, b)| a.as_ref() == b.as_ref())
}

/// Splits a dotted name into its segments.
///
/// No validation is done: `"a..b"` yields an empty middle segment and `""`
/// yields a single empty segment.
#[must_use]
pub fn split_dotted(name: &str) -> Vec<&str> {
    name.split(SEPARATOR).collect()
}

/// Joins segments back into a dotted name.
#[must_use]
pub fn join_dotted<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(seg.as_ref());
    }
    out
}

//! String joining with per-token decoration.

/// Joins `items` with `delim`, wrapping every item in `prefix` and `suffix`.
///
/// ```rust
/// use tabula_core::interleave;
///
/// assert_eq!(interleave(["a", "b"], ", ", "", ""), "a, b");
/// assert_eq!(interleave(["a", "b"], "", "(", ")"), "(a)(b)");
/// assert_eq!(interleave(Vec::<String>::new(), ", ", "", ""), "");
/// ```
#[must_use]
pub fn interleave<I, S>(items: I, delim: &str, prefix: &str, suffix: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(delim);
        }
        out.push_str(prefix);
        out.push_str(item.as_ref());
        out.push_str(suffix);
    }
    out
}

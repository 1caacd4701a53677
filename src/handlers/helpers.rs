//! Argument splitting helpers shared by handlers.

/// Split off the first space-separated token.
///
/// Returns the token and the remainder after the separating space. Both are
/// empty when `args` is empty.
pub fn split_first(args: &str) -> (&str, &str) {
    args.split_once(' ').unwrap_or((args, ""))
}

/// Drop a single leading `:` from free text.
pub fn strip_colon(text: &str) -> &str {
    text.strip_prefix(':').unwrap_or(text)
}

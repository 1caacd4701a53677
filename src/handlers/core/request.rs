//! Splitting a line into command name and arguments.

/// One inbound line, split at the first space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    /// Command name, matched case-sensitively.
    pub command: &'a str,
    /// Remaining text, verbatim (embedded spaces included).
    pub args: &'a str,
}

impl<'a> Request<'a> {
    /// Split a trimmed line. Returns `None` for an empty line.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim_matches(|c| c == ' ' || c == '\r' || c == '\n');
        if line.is_empty() {
            return None;
        }
        let (command, args) = line.split_once(' ').unwrap_or((line, ""));
        Some(Self { command, args })
    }
}

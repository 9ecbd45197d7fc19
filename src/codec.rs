//! Line codec: one hosts file line to and from an [`Entry`].

use crate::entry::Entry;

/// What a single line of the hosts file holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    Comment,
    Entry(Entry),
    /// A data line that could not be turned into an entry, with the reason.
    Malformed(String),
}

/// Classify a raw line.
///
/// Everything after the first `#` is the comment. The data part is split on
/// runs of spaces and tabs: address, hostname, then aliases.
pub fn classify(line: &str) -> Line {
    let line = line.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with('#') {
        return Line::Comment;
    }

    let (data, comment) = match line.split_once('#') {
        // Tabs inside a comment would not survive a rewrite.
        Some((d, c)) => (d.trim(), Some(c.trim().replace('\t', " ")).filter(|c| !c.is_empty())),
        None => (line, None),
    };

    let mut tokens = data.split_whitespace();
    let (Some(address), Some(hostname)) = (tokens.next(), tokens.next()) else {
        return Line::Malformed(format!("too few fields in {data:?}"));
    };
    let entry = Entry::parse(address, hostname)
        .and_then(|e| e.with_aliases(tokens))
        .and_then(|e| match comment {
            Some(c) => e.with_comment(c),
            None => Ok(e),
        });
    match entry {
        Ok(e) => Line::Entry(e),
        Err(e) => Line::Malformed(e.to_string()),
    }
}

/// Decode a line, or `None` if it is blank, a comment, or malformed.
pub fn decode(line: &str) -> Option<Entry> {
    match classify(line) {
        Line::Entry(e) => Some(e),
        Line::Malformed(reason) => {
            tracing::debug!(%reason, "skipping malformed hosts line");
            None
        }
        Line::Blank | Line::Comment => None,
    }
}

/// Canonical, tab-separated form of `entry`, newline terminated.
pub fn encode(entry: &Entry) -> String {
    let mut line = entry.address_text();
    for name in entry.all_names() {
        line.push('\t');
        line.push_str(name);
    }
    if let Some(comment) = entry.comment() {
        line.push_str("\t# ");
        line.push_str(comment);
    }
    line.push('\n');
    line
}

//! Mention scanning - finds @username candidates in message content
//!
//! A candidate is `@` followed by one or more word, period, or hyphen
//! characters. Candidates are NOT authoritative: they must be resolved
//! against the members of the target workspace before producing
//! notifications.

/// Extract deduplicated mention candidates from message content, in order
/// of first appearance. The leading `@` is stripped.
pub fn mention_candidates(content: &str) -> Vec<&str> {
    let mut found: Vec<&str> = Vec::new();
    let bytes = content.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'@' {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && is_mention_char(bytes[end]) {
                end += 1;
            }
            if end > start {
                let candidate = &content[start..end];
                if !found.contains(&candidate) {
                    found.push(candidate);
                }
            }
            i = end;
        } else {
            i += 1;
        }
    }

    found
}

/// Word characters plus period and hyphen, matching the username charset
#[inline]
fn is_mention_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'-'
}

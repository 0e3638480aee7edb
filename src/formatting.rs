//! Shared formatting utilities used by both CLI and TUI
//!
//! String truncation, node-count parsing and the small label helpers that
//! both front-ends render the fleet with.

/// Layout constants used across CLI and TUI
pub mod layout {
    pub const BOX_WIDTH: usize = 78;
    pub const NAME_TRUNCATE_LEN: usize = 28;
}

/// Truncate a string to a maximum length (in characters), adding "..." at the end if truncated.
///
/// Unicode-safe: counts characters, not bytes.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Parse a node count typed into a bounds field.
///
/// Reads the leading run of ASCII digits after optional whitespace, so
/// "12abc" is 12. Empty, negative or non-numeric text is 0. A number too
/// large for `u32` saturates at `u32::MAX`, so it still fails a min <= max check.
#[must_use]
pub fn parse_node_count(text: &str) -> u32 {
    let digits: String = text
        .trim_start()
        .trim_start_matches('+')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

/// "min - max" range label
#[must_use]
pub fn format_bounds(min_nodes: u32, max_nodes: u32) -> String {
    format!("{} - {}", min_nodes, max_nodes)
}

#[must_use]
pub fn format_autoscale(enabled: bool) -> &'static str {
    if enabled { "Enabled" } else { "Disabled" }
}

/// "1 node pool" / "3 node pools"
#[must_use]
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("ab", 2), "ab");
        assert_eq!(truncate_string("abcdef", 3), "abc");
    }

    #[test]
    fn test_truncate_string_unicode() {
        assert_eq!(truncate_string("Zürich-cluster", 9), "Zürich...");
        assert_eq!(truncate_string("日本語クラスタ", 5), "日本...");
    }

    #[test]
    fn test_parse_node_count() {
        assert_eq!(parse_node_count("7"), 7);
        assert_eq!(parse_node_count(" 12"), 12);
        assert_eq!(parse_node_count("+4"), 4);
        assert_eq!(parse_node_count("12abc"), 12);
        assert_eq!(parse_node_count(""), 0);
        assert_eq!(parse_node_count("abc"), 0);
        assert_eq!(parse_node_count("99999999999"), u32::MAX);
        assert_eq!(parse_node_count("4294967296x"), u32::MAX);
        assert_eq!(parse_node_count("-3"), 0);
        assert_eq!(parse_node_count("99999999999"), 0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(format_bounds(2, 10), "2 - 10");
        assert_eq!(format_autoscale(true), "Enabled");
        assert_eq!(format_autoscale(false), "Disabled");
        assert_eq!(pluralize(1, "node pool", "node pools"), "1 node pool");
        assert_eq!(pluralize(0, "node pool", "node pools"), "0 node pools");
    }
}

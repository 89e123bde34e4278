use std::time::Duration;

/// Timeout for a page fetch, with additional time for longer URLs
pub fn calculate_timeout(base_ms: u64, url_length: usize) -> Duration {
    let additional_ms = (url_length / 20) as u64 * 100;
    Duration::from_millis(base_ms + additional_ms)
}

/// Escape text for use inside an HTML attribute value
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Extracts the host of a hosts-format line.
///
/// - blank or `#` lines → None
/// - `0.0.0.0 ads.example.com [comment…]` → `ads.example.com`
/// - a single field → None
pub fn parse_hosts_line(line: &str) -> Option<&str> {
    let line = line.trim();

    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    line.split_whitespace().nth(1)
}

pub fn parse_hosts_text(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter_map(parse_hosts_line)
}

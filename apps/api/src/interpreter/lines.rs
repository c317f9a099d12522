use super::DecodeError;

/// Trims a line and removes exactly one leading `-` or `*` marker.
pub fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix(['-', '*'])
        .map(str::trim)
        .unwrap_or(line)
}

/// Last-resort stage: one item per non-blank line, bullet markers stripped.
/// With `min_chars`, shorter lines are dropped.
pub fn split_lines(raw: &str, min_chars: Option<usize>) -> Result<Vec<String>, DecodeError> {
    let items: Vec<String> = raw
        .lines()
        .map(strip_bullet)
        .filter(|line| !line.is_empty())
        .filter(|line| min_chars.map_or(true, |min| line.chars().count() >= min))
        .map(String::from)
        .collect();

    if items.is_empty() {
        Err(DecodeError::NoMatches)
    } else {
        Ok(items)
    }
}

/// Résumé lines long enough to count as substantive bullets. Empty when none qualify.
pub fn substantive_lines(text: &str, min_chars: usize) -> Vec<String> {
    split_lines(text, Some(min_chars)).unwrap_or_default()
}

use regex::Regex;

/// Returns true if `pattern` matches anywhere in `line`.
pub fn matches(pattern: &Regex, line: &str) -> bool {
    pattern.is_match(line)
}

/// First capture group of the first match.
///
/// An empty capture is reported as absent, a field printed as `tid=` carries no value.
pub fn extract_one<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

/// All capture groups of the first match (not all matches), empty if there is none.
pub fn extract_all<'a>(pattern: &Regex, line: &'a str) -> Vec<&'a str> {
    match pattern.captures(line) {
        Some(caps) => caps
            .iter()
            .skip(1)
            .map(|group| group.map_or("", |m| m.as_str()))
            .collect(),
        None => vec![],
    }
}

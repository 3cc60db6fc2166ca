//! URL normalization and input filtering.
//!
//! Raw input lines become canonical absolute URLs here: whitespace trimmed,
//! `https://` assumed when no scheme is given, query and fragment dropped.
//! Normalization never fails: malformed input degrades to a best-effort
//! string that the probe executor will then fail with a transport error.

use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Normalize one raw input line into a canonical absolute URL.
///
/// Returns `None` only for input that is empty after trimming; every other
/// input produces some output string. The result always carries an explicit
/// scheme (`https` when the input had none) and, when parseable, has the
/// shape `scheme://authority[path]`.
///
/// Idempotent: normalizing an already-normalized URL returns it unchanged.
///
/// # Example
///
/// ```
/// use site_check_lib::normalize_url;
///
/// assert_eq!(normalize_url("example.com"), Some("https://example.com".to_string()));
/// assert_eq!(normalize_url("http://example.com/path"), Some("http://example.com/path".to_string()));
/// assert_eq!(normalize_url("   "), None);
/// ```
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    match Url::parse(&candidate) {
        Ok(parsed) if parsed.has_host() => {
            let mut normalized = format!("{}://{}", parsed.scheme(), parsed.authority());
            let path = parsed.path();
            if path != "/" {
                normalized.push_str(path);
            } else if has_explicit_path(&candidate) {
                // Url::parse reports "/" for both "host" and "host/";
                // keep the slash only when the input actually had one.
                normalized.push('/');
            }
            Some(normalized)
        }
        _ => {
            // Unparseable input is passed through best-effort; the probe
            // will surface the failure as a transport error.
            debug!("could not parse '{}', passing through as-is", trimmed);
            Some(candidate)
        }
    }
}

/// Whether the text after `scheme://` contains a path separator.
fn has_explicit_path(candidate: &str) -> bool {
    match candidate.find("://") {
        Some(idx) => candidate[idx + 3..].contains('/'),
        None => false,
    }
}

/// Filter, normalize, and deduplicate a batch of raw input lines.
///
/// Blank lines and lines whose trimmed form starts with `#` are dropped
/// before normalization. Duplicates (by exact normalized string) are
/// collapsed to their first occurrence, so iteration order is deterministic;
/// final presentation order is imposed later by the ranker.
pub fn prepare_targets<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for line in lines {
        let trimmed = line.as_ref().trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some(normalized) = normalize_url(trimmed) else {
            continue;
        };
        if seen.insert(normalized.clone()) {
            targets.push(normalized);
        }
    }

    targets
}

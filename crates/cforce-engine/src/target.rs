//! Target normalization and classification.
//!
//! Classification decides whether a simulated attack succeeds. It is a pure
//! function of the target text so that every sequence that depends on it
//! (check, exploit, both brute forces) behaves the same for the same target.

use cforce_models::Exposure;

/// Substrings that mark a lab/test target.
const LAB_MARKERS: &[&str] = &["test", "demo"];

/// IPv4 prefixes treated as private or loopback.
const PRIVATE_PREFIXES: &[&str] = &["10.", "192.", "127."];

/// Fallback username for enumeration.
const DEFAULT_USER: &str = "admin";

/// Strips an `http://`/`https://` scheme and one trailing slash.
pub fn clean_target(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme
        .strip_suffix('/')
        .unwrap_or(without_scheme)
        .to_string()
}

/// Classifies a target as a lab target or a hardened one.
pub fn classify(target: &str) -> Exposure {
    let host = clean_target(target).to_ascii_lowercase();

    let lab = LAB_MARKERS.iter().any(|m| host.contains(m))
        || PRIVATE_PREFIXES.iter().any(|p| host.starts_with(p));

    if lab {
        Exposure::Vulnerable
    } else {
        Exposure::Hardened
    }
}

/// Returns true if the host starts like an IPv4 literal (`1-3 digits` then `.`).
fn looks_like_ipv4(host: &str) -> bool {
    let digits = host.chars().take_while(|c| c.is_ascii_digit()).count();
    (1..=3).contains(&digits) && host[digits..].starts_with('.')
}

/// Derives the account name the enumeration sequence "discovers".
///
/// Domain targets yield their first label (`example` for `example.com`)
/// unless it is `www`; IP targets yield `admin`.
pub fn derive_username(target: &str) -> String {
    let host = clean_target(target);
    if looks_like_ipv4(&host) {
        return DEFAULT_USER.to_string();
    }

    match host.split('.').next() {
        Some(label) if !label.is_empty() && label != "www" => label.to_string(),
        _ => DEFAULT_USER.to_string(),
    }
}

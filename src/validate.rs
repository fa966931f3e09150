//! URL validation against the supported-platform allow-list

use url::Url;

/// Hostname substrings accepted by [`is_supported_url`]
///
/// Canonical and short-link hosts of the three supported platforms.
const ALLOWED_DOMAINS: [&str; 6] = [
    "youtube.com",
    "youtu.be",
    "tiktok.com",
    "reddit.com",
    "redd.it",
    "vm.tiktok.com",
];

/// Check whether a URL points at a supported video platform
///
/// Pure predicate: invalid syntax or a missing host yields `false`, no error
/// escapes. This is a client-side UX gate only — the extraction service is
/// the authority on what it will actually process, so this must never be
/// treated as a security boundary.
pub fn is_supported_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    ALLOWED_DOMAINS.iter().any(|domain| host.contains(domain))
}

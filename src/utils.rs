//! Utility functions shared by the feed sources

use chrono::{DateTime, Utc};
use url::Url;

/// Extract the display domain from a URL, stripping a leading `www.`
///
/// Returns `None` for unparseable URLs or URLs without a host.
///
/// # Examples
///
/// ```
/// use feedrank::utils::extract_domain;
///
/// assert_eq!(
///     extract_domain("https://www.example.com/article"),
///     Some("example.com".to_string())
/// );
/// assert_eq!(extract_domain("not a url"), None);
/// ```
#[must_use]
pub fn extract_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Convert a unix timestamp in seconds to a UTC datetime
///
/// Out-of-range values fall back to the unix epoch rather than failing; feed
/// payloads occasionally carry nonsense timestamps and that should not cost
/// the dashboard an entry.
#[must_use]
pub fn parse_unix_timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

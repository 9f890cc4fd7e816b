//! Outbound URL safety (SSRF guard).
//!
//! A gated fetch/download tool could otherwise be pointed at internal
//! infrastructure. Rejected outright: malformed URLs, non-HTTP schemes,
//! loopback and link-local hosts, the RFC1918 private ranges, and
//! `.local`/`.internal` suffixes. Numeric hosts are decoded before the
//! check so that octal, hexadecimal, and large-decimal encodings of
//! loopback (`0x7f000001`, `0177.0.0.1`, `2130706433`) cannot slip past
//! a literal string comparison.

use std::net::{Ipv4Addr, Ipv6Addr};
use url::{Host, Url};

/// Why a URL was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlIssue {
    /// The URL could not be parsed at all.
    #[error("malformed URL")]
    Malformed,
    /// The scheme is not plain HTTP(S).
    #[error("scheme '{0}' is not allowed")]
    ForbiddenScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
    /// The host resolves to a loopback, private, or link-local address.
    #[error("host '{0}' targets a private or internal address")]
    PrivateAddress(String),
    /// The host uses an internal-only DNS suffix.
    #[error("host '{0}' uses an internal-only suffix")]
    InternalSuffix(String),
}

/// Check a URL against the SSRF guard.
///
/// # Errors
///
/// Returns the specific [`UrlIssue`] that caused rejection.
pub fn check_url(raw: &str) -> Result<Url, UrlIssue> {
    let url = Url::parse(raw).map_err(|_| UrlIssue::Malformed)?;

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(UrlIssue::ForbiddenScheme(scheme.to_string()));
    }

    let host = url.host().ok_or(UrlIssue::MissingHost)?;
    match host {
        Host::Ipv4(addr) => {
            if is_private_v4(addr) {
                return Err(UrlIssue::PrivateAddress(addr.to_string()));
            }
        },
        Host::Ipv6(addr) => {
            if is_private_v6(addr) {
                return Err(UrlIssue::PrivateAddress(addr.to_string()));
            }
        },
        Host::Domain(domain) => {
            check_domain(domain)?;
        },
    }

    Ok(url)
}

/// Loopback, RFC1918 private, link-local, and unspecified IPv4 targets.
fn is_private_v4(addr: Ipv4Addr) -> bool {
    addr.is_loopback() || addr.is_private() || addr.is_link_local() || addr.is_unspecified()
}

/// Loopback, unique-local (fc00::/7), and link-local (fe80::/10) IPv6 targets.
fn is_private_v6(addr: Ipv6Addr) -> bool {
    let segments = addr.segments();
    addr.is_loopback()
        || addr.is_unspecified()
        || (segments[0] & 0xfe00) == 0xfc00
        || (segments[0] & 0xffc0) == 0xfe80
}

fn check_domain(domain: &str) -> Result<(), UrlIssue> {
    let lowered = domain.to_ascii_lowercase();

    if lowered == "localhost" || lowered.ends_with(".localhost") {
        return Err(UrlIssue::PrivateAddress(lowered));
    }

    if lowered.ends_with(".local") || lowered.ends_with(".internal") {
        return Err(UrlIssue::InternalSuffix(lowered));
    }

    // The URL parser already folds most numeric hosts into Host::Ipv4, but
    // decode obfuscated single-number forms here as well so the guard does
    // not depend on that behavior.
    if let Some(addr) = decode_numeric_host(&lowered) {
        if is_private_v4(addr) {
            return Err(UrlIssue::PrivateAddress(lowered));
        }
    }

    Ok(())
}

/// Decode a whole-host numeric encoding (hex, octal, or decimal) into an
/// IPv4 address.
fn decode_numeric_host(host: &str) -> Option<Ipv4Addr> {
    let value = if let Some(hex) = host.strip_prefix("0x") {
        u32::from_str_radix(hex, 16).ok()?
    } else if host.len() > 1 && host.starts_with('0') && host.chars().all(|c| c.is_digit(8)) {
        u32::from_str_radix(host, 8).ok()?
    } else if host.chars().all(|c| c.is_ascii_digit()) {
        host.parse::<u32>().ok()?
    } else {
        return None;
    };
    Some(Ipv4Addr::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_urls_pass() {
        assert!(check_url("https://example.com/page").is_ok());
        assert!(check_url("http://93.184.216.34/").is_ok());
        assert!(check_url("https://api.github.com/repos").is_ok());
    }

    #[test]
    fn test_malformed() {
        assert_eq!(check_url("not a url"), Err(UrlIssue::Malformed));
        assert_eq!(check_url(""), Err(UrlIssue::Malformed));
    }

    #[test]
    fn test_forbidden_schemes() {
        assert!(matches!(
            check_url("file:///etc/passwd"),
            Err(UrlIssue::ForbiddenScheme(_))
        ));
        assert!(matches!(
            check_url("ftp://example.com/x"),
            Err(UrlIssue::ForbiddenScheme(_))
        ));
        assert!(matches!(
            check_url("gopher://example.com/"),
            Err(UrlIssue::ForbiddenScheme(_))
        ));
    }

    #[test]
    fn test_loopback_blocked() {
        assert!(matches!(
            check_url("http://127.0.0.1/"),
            Err(UrlIssue::PrivateAddress(_))
        ));
        assert!(matches!(
            check_url("http://localhost:8080/admin"),
            Err(UrlIssue::PrivateAddress(_))
        ));
        assert!(matches!(
            check_url("http://[::1]/"),
            Err(UrlIssue::PrivateAddress(_))
        ));
    }

    #[test]
    fn test_private_ranges_blocked() {
        assert!(matches!(
            check_url("http://10.0.0.5/"),
            Err(UrlIssue::PrivateAddress(_))
        ));
        assert!(matches!(
            check_url("http://172.16.0.1/"),
            Err(UrlIssue::PrivateAddress(_))
        ));
        assert!(matches!(
            check_url("http://192.168.1.1/"),
            Err(UrlIssue::PrivateAddress(_))
        ));
        assert!(matches!(
            check_url("http://169.254.169.254/latest/meta-data/"),
            Err(UrlIssue::PrivateAddress(_))
        ));
    }

    #[test]
    fn test_obfuscated_loopback_blocked() {
        // Hexadecimal, octal, and large-decimal encodings of 127.0.0.1.
        assert!(check_url("http://0x7f000001/").is_err());
        assert!(check_url("http://0177.0.0.1/").is_err());
        assert!(check_url("http://2130706433/").is_err());
    }

    #[test]
    fn test_internal_suffixes_blocked() {
        assert!(matches!(
            check_url("http://printer.local/"),
            Err(UrlIssue::InternalSuffix(_))
        ));
        assert!(matches!(
            check_url("https://vault.internal/secrets"),
            Err(UrlIssue::InternalSuffix(_))
        ));
    }

    #[test]
    fn test_decode_numeric_host() {
        assert_eq!(
            decode_numeric_host("0x7f000001"),
            Some(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert_eq!(
            decode_numeric_host("2130706433"),
            Some(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert_eq!(decode_numeric_host("example"), None);
    }
}

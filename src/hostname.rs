/// URL host extraction and matching for Tab Organizer
use regex::Regex;
use std::sync::OnceLock;

/// Extract the host from an http(s) URL.
///
/// Mirrors the `https?://<host>` match rule used for grouping: everything
/// between the scheme and the first `/` counts as the host, ports included.
/// Non-http(s) URLs (e.g. `chrome://newtab/`) return `None` and are thereby
/// excluded from hostname-based grouping and sorting.
///
/// Examples:
/// - https://www.google.com/search → www.google.com
/// - http://localhost:3000/app → localhost:3000
/// - chrome://newtab/ → None
pub fn host_of(url: &str) -> Option<String> {
    static HOST_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = HOST_REGEX.get_or_init(|| {
        Regex::new(r"^https?://([^/]*)").unwrap()
    });

    re.captures(url)
        .map(|caps| caps[1].to_string())
        .filter(|host| !host.is_empty())
}

/// Strip the fragment identifier from a URL.
///
/// Deduplication treats `https://a.com/x#foo` and `https://a.com/x#bar`
/// as the same page.
pub fn without_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

/// Matcher for the `*://<host>/*` wildcard: http or https scheme, exact
/// host, any path. Compiled once per operation and reused across the
/// whole tab list.
pub fn host_matcher(host: &str) -> Regex {
    let pattern = format!("^https?://{}(/|$)", regex::escape(host));
    // the host is escaped, so the pattern is always valid
    Regex::new(&pattern).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of_basic() {
        assert_eq!(host_of("https://www.google.com/search"), Some("www.google.com".to_string()));
        assert_eq!(host_of("http://example.com/"), Some("example.com".to_string()));
        assert_eq!(host_of("https://github.com"), Some("github.com".to_string()));
    }

    #[test]
    fn test_host_of_keeps_port() {
        assert_eq!(host_of("http://localhost:3000/app"), Some("localhost:3000".to_string()));
    }

    #[test]
    fn test_host_of_rejects_non_http() {
        assert_eq!(host_of("chrome://newtab/"), None);
        assert_eq!(host_of("chrome://settings/"), None);
        assert_eq!(host_of("file:///home/user/doc.html"), None);
        assert_eq!(host_of("about:blank"), None);
        assert_eq!(host_of(""), None);
    }

    #[test]
    fn test_host_of_rejects_empty_host() {
        assert_eq!(host_of("https://"), None);
        assert_eq!(host_of("https:///path"), None);
    }

    #[test]
    fn test_without_fragment() {
        assert_eq!(without_fragment("https://a.com/x#foo"), "https://a.com/x");
        assert_eq!(without_fragment("https://a.com/x"), "https://a.com/x");
        assert_eq!(without_fragment("https://a.com/#"), "https://a.com/");
    }

    #[test]
    fn test_host_matcher() {
        let matcher = host_matcher("a.com");

        assert!(matcher.is_match("https://a.com/page"));
        assert!(matcher.is_match("http://a.com/other"));
        assert!(matcher.is_match("https://a.com"));
        assert!(!matcher.is_match("https://b.com/page"));
        assert!(!matcher.is_match("https://a.com.evil.org/"));
        assert!(!matcher.is_match("chrome://newtab/"));
    }

    #[test]
    fn test_host_matcher_is_exact() {
        // subdomains are distinct hosts under the grouping rule
        assert!(!host_matcher("a.com").is_match("https://www.a.com/"));
    }

    #[test]
    fn test_host_matcher_escapes_regex_metacharacters() {
        // a dot in the host must not match an arbitrary character
        assert!(!host_matcher("a.com").is_match("https://axcom/"));
        // ports survive escaping too
        assert!(host_matcher("localhost:3000").is_match("http://localhost:3000/app"));
    }
}

//! Outgoing identification headers.

/// Token identifying this library, sent with every request.
pub const LIBRARY_UA: &str = concat!("crossref-client-rs/", env!("CARGO_PKG_VERSION"));

/// Build the identification string sent as both `User-Agent` and
/// `X-USER-AGENT`.
///
/// A contact address, when given, is appended as `(mailto:...)` — requests
/// carrying one are routed to the API's polite pool. An extra identifier
/// string, when given, is appended verbatim.
pub fn user_agent(mailto: Option<&str>, ua_string: Option<&str>) -> String {
    let mut ua = String::from(LIBRARY_UA);
    if let Some(mailto) = mailto {
        ua.push_str(&format!(" (mailto:{})", mailto));
    }
    if let Some(extra) = ua_string {
        ua.push(' ');
        ua.push_str(extra);
    }
    ua
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_token_only() {
        let ua = user_agent(None, None);
        assert_eq!(ua, LIBRARY_UA);
        assert!(ua.starts_with("crossref-client-rs/"));
    }

    #[test]
    fn test_mailto_appended() {
        let ua = user_agent(Some("name@example.com"), None);
        assert_eq!(ua, format!("{} (mailto:name@example.com)", LIBRARY_UA));
    }

    #[test]
    fn test_extra_string_appended() {
        let ua = user_agent(None, Some("my-tool/2.1"));
        assert_eq!(ua, format!("{} my-tool/2.1", LIBRARY_UA));
    }

    #[test]
    fn test_mailto_and_extra_string() {
        let ua = user_agent(Some("a@b.org"), Some("my-tool/2.1"));
        assert_eq!(ua, format!("{} (mailto:a@b.org) my-tool/2.1", LIBRARY_UA));
    }
}

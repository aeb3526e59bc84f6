//! Reading and writing the token cookie

use dashboard_core::BearerToken;
use dashboard_core::config::SessionConfig;
use http::HeaderMap;
use http::header::COOKIE;

/// Find the token cookie among the request's `Cookie` headers
#[must_use]
pub fn token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<BearerToken> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == cookie_name)
        .and_then(|(_, value)| {
            let value = value.trim().trim_matches('"');
            let decoded = urlencoding::decode(value).ok()?;
            BearerToken::new(decoded.into_owned())
        })
}

/// `Set-Cookie` value storing `token`
#[must_use]
pub fn set_cookie(config: &SessionConfig, token: &BearerToken) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax{}",
        config.cookie_name,
        urlencoding::encode(token.as_str()),
        secure_suffix(config)
    )
}

/// `Set-Cookie` value that expires the token cookie
#[must_use]
pub fn clear_cookie(config: &SessionConfig) -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
        config.cookie_name,
        secure_suffix(config)
    )
}

const fn secure_suffix(config: &SessionConfig) -> &'static str {
    if config.secure_cookie { "; Secure" } else { "" }
}

/// Stable key for per-session caches that does not keep the raw token
#[must_use]
pub fn fingerprint(token: &BearerToken) -> String {
    format!("{:x}", md5::compute(token.as_str().as_bytes()))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for value in values {
            map.append(COOKIE, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[rstest]
    #[case(&["token=abc"], Some("abc"))]
    #[case(&["theme=dark; token=abc; lang=en"], Some("abc"))]
    #[case(&["theme=dark", "token=abc"], Some("abc"))]
    #[case(&["token=\"quoted\""], Some("quoted"))]
    #[case(&["token=a%20b"], Some("a b"))]
    #[case(&["token="], None)]
    #[case(&["mytoken=abc"], None)]
    #[case(&[], None)]
    fn test_token_from_headers(#[case] values: &[&str], #[case] expected: Option<&str>) {
        let token = token_from_headers(&headers(values), "token");
        assert_eq!(token.as_ref().map(BearerToken::as_str), expected);
    }

    #[test]
    fn test_set_and_clear_cookie() {
        let mut config = SessionConfig::default();
        let token = BearerToken::new("a b").unwrap();
        assert_eq!(
            set_cookie(&config, &token),
            "token=a%20b; Path=/; HttpOnly; SameSite=Lax"
        );
        assert_eq!(
            clear_cookie(&config),
            "token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
        );

        config.secure_cookie = true;
        assert!(set_cookie(&config, &token).ends_with("; Secure"));
        assert!(clear_cookie(&config).ends_with("Max-Age=0; Secure"));
    }

    #[test]
    fn test_fingerprint_is_stable_and_hides_token() {
        let token = BearerToken::new("secret-token").unwrap();
        let first = fingerprint(&token);
        assert_eq!(first, fingerprint(&token));
        assert_eq!(first.len(), 32);
        assert!(!first.contains("secret"));
        assert_ne!(first, fingerprint(&BearerToken::new("other").unwrap()));
    }
}

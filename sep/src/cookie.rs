//! Session-cookie plumbing for the search-engine preference.

use axum::http::{header, HeaderMap};

/// Cookie holding the user's search-engine URL template.
pub const COOKIE_NAME: &str = "spaces_search_engine_proxy";

/// Preference cookie lifetime.
pub const ONE_YEAR_SECS: u64 = 365 * 24 * 60 * 60;

/// Read a cookie value from the request headers.
///
/// Values are stored URL-encoded because engine templates carry `%`, `&`
/// and `{}` characters.
pub fn get(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(
                urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string()),
            )
        } else {
            None
        }
    })
}

/// Build a `Set-Cookie` value storing `value` for `max_age_secs`.
pub fn set(name: &str, value: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/",
        name,
        urlencoding::encode(value),
        max_age_secs
    )
}

/// Build a `Set-Cookie` value that expires the cookie immediately.
pub fn clear(name: &str) -> String {
    format!("{name}=; Max-Age=0; Path=/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn round_trips_an_encoded_template() {
        let template = "https://x/?q=%s&lang={inputEncoding}";
        let set_value = set(COOKIE_NAME, template, ONE_YEAR_SECS);
        let cookie_pair = set_value.split(';').next().unwrap();

        let headers = headers_with_cookie(cookie_pair);
        assert_eq!(get(&headers, COOKIE_NAME).as_deref(), Some(template));
    }

    #[test]
    fn finds_the_cookie_among_others() {
        let headers = headers_with_cookie("a=1; spaces_search_engine_proxy=x%20y; b=2");
        assert_eq!(get(&headers, COOKIE_NAME).as_deref(), Some("x y"));
    }

    #[test]
    fn absent_cookie_is_none() {
        let headers = headers_with_cookie("a=1; b=2");
        assert_eq!(get(&headers, COOKIE_NAME), None);
        assert_eq!(get(&HeaderMap::new(), COOKIE_NAME), None);
    }

    #[test]
    fn clear_expires_immediately() {
        assert_eq!(
            clear(COOKIE_NAME),
            "spaces_search_engine_proxy=; Max-Age=0; Path=/"
        );
    }
}

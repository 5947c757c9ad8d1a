//! Session cookies and the authenticated request header set.

use reqwest::header::{
    ACCEPT, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue, SET_COOKIE,
};

/// Header carrying the authenticated user's id
pub const USER_ID_HEADER: &str = "x-figma-user-id";

/// Header that opts JSON API calls out of CSRF checks
pub const CSRF_BYPASS_HEADER: &str = "x-csrf-bypass";

/// Ordered session cookie set.
///
/// Cookies are kept as `name=value` pairs in the order the platform issued
/// them. The set only grows: nothing is deduplicated or overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<String>,
}

impl CookieJar {
    /// Builds a jar from a response's `Set-Cookie` headers.
    pub fn from_set_cookie(headers: &HeaderMap) -> Self {
        let cookies = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(cookie_pair)
            .collect();
        Self { cookies }
    }

    /// Appends every cookie of `other` after the existing ones.
    pub fn extend(&mut self, other: CookieJar) {
        self.cookies.extend(other.cookies);
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cookies.iter().map(String::as_str)
    }

    /// The whole set as a single `Cookie` header value.
    pub fn header_value(&self) -> String {
        self.cookies.join("; ")
    }
}

impl<S: Into<String>> FromIterator<S> for CookieJar {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            cookies: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// `name=value` part of a `Set-Cookie` value; attributes are dropped.
fn cookie_pair(set_cookie: &str) -> Option<String> {
    let pair = set_cookie.split(';').next()?.trim();
    if pair.is_empty() || !pair.contains('=') {
        return None;
    }
    Some(pair.to_string())
}

/// Builds the header set shared by every JSON API call.
///
/// Reflects the jar and user id exactly as they are at call time. The user id
/// header is omitted before login, the cookie header while the jar is empty.
pub fn basic_headers(cookies: &CookieJar, user_id: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(CSRF_BYPASS_HEADER),
        HeaderValue::from_static("yes"),
    );

    if let Some(value) = user_id.and_then(|id| HeaderValue::from_str(id).ok()) {
        headers.insert(HeaderName::from_static(USER_ID_HEADER), value);
    }

    if !cookies.is_empty() {
        match HeaderValue::from_str(&cookies.header_value()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(COOKIE, value);
            }
            Err(_) => log::warn!("Session cookies contain invalid header characters; not sent"),
        }
    }

    headers
}

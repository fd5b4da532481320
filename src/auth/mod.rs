//! API key extraction from the `Authorization` header.
//!
//! Requests carry their credential as `Authorization: ApiKey <token>`. This
//! module only parses that shape. It does not check the token against any
//! store; callers decide what a key grants.

pub mod extractor;

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;

use crate::error::AuthError;

/// Name of the header carrying the credential
pub const AUTHORIZATION: &str = "Authorization";

/// Scheme token expected before the key
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Number of leading characters kept by [`ApiKey::redacted`]
const REDACTED_PREFIX_LEN: usize = 4;

/// Read-only view over a request's headers.
///
/// Names are matched ASCII case-insensitively. When a header appears more
/// than once only its first value is returned.
pub trait HeaderSet {
    /// First value of the header `name`, if any
    fn first_value(&self, name: &str) -> Option<&[u8]>;
}

impl HeaderSet for actix_web::http::header::HeaderMap {
    fn first_value(&self, name: &str) -> Option<&[u8]> {
        self.get(name).map(|value| value.as_bytes())
    }
}

impl HeaderSet for actix_web::HttpRequest {
    fn first_value(&self, name: &str) -> Option<&[u8]> {
        self.headers().first_value(name)
    }
}

/// Exact key first, then the smallest case-insensitive match, so the result
/// does not depend on the map's iteration order.
fn find_header<'a, V>(map: &'a HashMap<String, V>, name: &str) -> Option<&'a V> {
    map.get(name).or_else(|| {
        map.iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, value)| value)
    })
}

impl HeaderSet for HashMap<String, String> {
    fn first_value(&self, name: &str) -> Option<&[u8]> {
        find_header(self, name).map(|value| value.as_bytes())
    }
}

impl HeaderSet for HashMap<String, Vec<String>> {
    fn first_value(&self, name: &str) -> Option<&[u8]> {
        find_header(self, name)
            .and_then(|values| values.first())
            .map(|value| value.as_bytes())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSet for [(K, V)] {
    fn first_value(&self, name: &str) -> Option<&[u8]> {
        self.iter()
            .find(|(key, _)| key.as_ref().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_ref().as_bytes())
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> HeaderSet for [(K, V); N] {
    fn first_value(&self, name: &str) -> Option<&[u8]> {
        self.as_slice().first_value(name)
    }
}

/// An API key taken from a request. Opaque beyond being non-empty.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Borrow the key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the key
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Key with everything past the first few characters masked, for logs.
    ///
    /// Keys shorter than twice the prefix are masked entirely.
    pub fn redacted(&self) -> String {
        if self.0.chars().count() < 2 * REDACTED_PREFIX_LEN {
            return "****".to_string();
        }

        let prefix: String = self.0.chars().take(REDACTED_PREFIX_LEN).collect();
        format!("{}****", prefix)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.redacted()).finish()
    }
}

impl Deref for ApiKey {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ApiKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ApiKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Extract the API key from a request's headers
pub fn get_api_key<H: HeaderSet + ?Sized>(headers: &H) -> Result<ApiKey, AuthError> {
    let value = headers
        .first_value(AUTHORIZATION)
        .ok_or(AuthError::NoAuthHeader)?;

    if value.is_empty() {
        return Err(AuthError::NoAuthHeader);
    }

    // Present but undecodable is a shape mismatch, not a missing header
    let value = std::str::from_utf8(value).map_err(|_| AuthError::MalformedHeader)?;

    parse_authorization(value)
}

/// Parse a raw `Authorization` header value of the form `ApiKey <token>`.
///
/// Tokens are split on ASCII whitespace; anything after the key is ignored.
pub fn parse_authorization(value: &str) -> Result<ApiKey, AuthError> {
    if value.is_empty() {
        return Err(AuthError::NoAuthHeader);
    }

    let mut tokens = value.split_ascii_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(API_KEY_SCHEME), Some(key)) => Ok(ApiKey(key.to_string())),
        _ => Err(AuthError::MalformedHeader),
    }
}

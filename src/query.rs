//! Query-string application state.
//!
//! [`QueryState`] is an ordered `key → value` mapping that mirrors the query
//! component of a URL. Keys are unique and keep the position of their first
//! insertion, so serialization is stable: the same sequence of
//! [`set`](QueryState::set) calls always produces the same query string.
//!
//! Values are opaque text. Nothing here knows about history lists or
//! subscribers; see [`FifoCodec`](crate::FifoCodec) and
//! [`ChangeView`](crate::ChangeView) for that.
//!
//! # Example
//!
//! ```
//! use query_navigator::QueryState;
//!
//! let state = QueryState::parse("https://app.test/view?page=2&q=rust%20lang#top").unwrap();
//! assert_eq!(state.get("page"), Some("2"));
//! assert_eq!(state.get("q"), Some("rust lang"));
//! assert_eq!(state.to_query_string(), "page=2&q=rust%20lang");
//! ```

use crate::error::ParseError;
use std::fmt;

/// Ordered string mapping serialized as a URL query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")
)]
pub struct QueryState {
    entries: Vec<(String, String)>,
}

impl QueryState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the query component of a URL.
    ///
    /// Everything after the first `?` and before any `#` is decoded. A URL
    /// without a `?` yields an empty state. Relative URLs such as `?a=1` are
    /// accepted.
    ///
    /// Decoding is lenient the way browsers are: a `%` that does not start a
    /// valid escape stays literal, and invalid UTF-8 becomes U+FFFD. Only
    /// text that cannot be a URL at all, one with raw ASCII control
    /// characters, is rejected.
    pub fn parse(url: &str) -> Result<Self, ParseError> {
        check_control_characters(url)?;
        let query = match url.split_once('?') {
            Some((_, rest)) => rest.split_once('#').map_or(rest, |(query, _)| query),
            None => return Ok(Self::new()),
        };
        Self::from_query_string(query)
    }

    /// Decode a bare query string (no leading `?`).
    ///
    /// Empty segments are skipped, a segment without `=` is a key with an
    /// empty value, and a repeated key keeps its first position but takes the
    /// last value.
    pub fn from_query_string(query: &str) -> Result<Self, ParseError> {
        check_control_characters(query)?;
        let mut state = Self::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            state.set(decode_uri_component(key), decode_uri_component(value));
        }
        Ok(state)
    }

    /// Serialize back into a query string, in insertion order.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    encode_uri_component(key),
                    encode_uri_component(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Serialize as a query-relative URL (`?a=1&b=2`, or `?` when empty).
    pub fn to_url(&self) -> String {
        format!("?{}", self.to_query_string())
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].1.as_str())
    }

    /// Insert or overwrite a value. Overwriting keeps the key's position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        let i = self.position(key)?;
        Some(self.entries.remove(i).1)
    }

    /// Return `true` if `key` is present (even with an empty value).
    pub fn has(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Independent copy of this state.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Return the number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryState
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = Self::new();
        for (key, value) in iter {
            state.set(key, value);
        }
        state
    }
}

impl From<Vec<(String, String)>> for QueryState {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<QueryState> for Vec<(String, String)> {
    fn from(state: QueryState) -> Self {
        state.entries
    }
}

/// Percent-encode a query component.
///
/// Unreserved characters and `,` pass through, so history lists stay
/// readable in the address bar. Everything else is encoded byte by byte
/// from its UTF-8 form.
pub(crate) fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')'
            | b',' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn check_control_characters(input: &str) -> Result<(), ParseError> {
    match input.bytes().position(|byte| byte.is_ascii_control()) {
        Some(position) => Err(ParseError::ControlCharacter {
            position,
            input: input.to_string(),
        }),
        None => Ok(()),
    }
}

/// Decode a percent-encoded query component. `+` decodes to a space.
///
/// Malformed escapes pass through unchanged and invalid UTF-8 is replaced
/// with U+FFFD, so this never fails.
pub(crate) fn decode_uri_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => match bytes.get(i + 1..i + 3).and_then(decode_hex_pair) {
                Some(byte) => {
                    decoded.push(byte);
                    i += 3;
                }
                None => {
                    decoded.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            other => {
                decoded.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn decode_hex_pair(hex: &[u8]) -> Option<u8> {
    if !hex.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = std::str::from_utf8(hex).ok()?;
    u8::from_str_radix(hex, 16).ok()
}

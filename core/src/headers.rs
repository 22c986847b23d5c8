//! Request header storage and commonly used header names/values.

use std::collections::BTreeMap;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const AUTHORIZATION: &str = "Authorization";
pub const ACCEPT: &str = "Accept";
pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
pub const ACCEPT_CHARSET: &str = "Accept-Charset";
pub const KEEP_ALIVE: &str = "Keep-Alive";
pub const CACHE_CONTROL: &str = "Cache-Control";

pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";
pub const TEXT_HTML_UTF8: &str = "text/html; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json";
pub const NO_CACHE: &str = "no-cache";

/// Headers sent with every request made through one `RequestContext`.
///
/// Names are matched case-insensitively; the spelling of the first insert
/// is the one sent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: BTreeMap<String, String>,
}

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any previous value.
    ///
    /// `Authorization` values are sent as bearer tokens, so `value` is
    /// prefixed with `Bearer `.
    pub fn add(&mut self, name: &str, value: &str) {
        let value = if name.eq_ignore_ascii_case(AUTHORIZATION) {
            format!("Bearer {value}")
        } else {
            value.to_string()
        };
        self.set_raw(name, value);
    }

    /// Set `name` to `value` verbatim.
    pub fn set_raw(&mut self, name: &str, value: String) {
        let key = self.key_for(name).unwrap_or_else(|| name.to_string());
        self.entries.insert(key, value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.key_for(name)
            .and_then(|key| self.entries.get(&key))
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.key_for(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let key = self.key_for(name)?;
        self.entries.remove(&key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Owned `(name, value)` pairs in send order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn key_for(&self, name: &str) -> Option<String> {
        self.entries
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned()
    }
}

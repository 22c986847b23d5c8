//! Query-string construction.

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use crate::error::{Error, Result};

/// Query parameters, name to value. Iterated in key order so the built URL
/// is identical for identical input.
pub type QueryParams = BTreeMap<String, String>;

/// Characters escaped in query values. Controls and non-ASCII bytes are
/// always escaped by `utf8_percent_encode`.
const UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'=')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}')
    .add(b'+');

/// Percent-encode a single query value.
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, UNSAFE).to_string()
}

/// Append `params` to `base` as `?k1=v1&k2=v2` and parse the result.
///
/// Keys are written as given; values are percent-encoded. An empty map
/// leaves `base` untouched. If `base` already carries a query the new pairs
/// are joined with `&`.
pub fn build_url(base: &str, params: &QueryParams) -> Result<Url> {
    let mut target = base.to_string();
    if !params.is_empty() {
        target.push(if base.contains('?') { '&' } else { '?' });
        let pairs: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{key}={}", encode_value(value)))
            .collect();
        target.push_str(&pairs.join("&"));
    }
    Url::parse(&target).map_err(|_| Error::MalformedUrl { url: target })
}

//! Query-string helpers
//!
//! The filter params are multi-valued (`?strata=Low&strata=High`), which
//! serde_urlencoded cannot express, so the raw query string is decoded by
//! hand here.

use urlencoding::decode;

/// Decoded query parameters, preserving repeated keys in order.
#[derive(Debug, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string such as `q=fig&zone=Wet&zone=Dry`.
    pub fn parse(raw: &str) -> Self {
        let mut pairs = Vec::new();
        for piece in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
            pairs.push((decode_component(key), decode_component(value)));
        }
        Self { pairs }
    }

    /// First value for `key`, if present.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `key`, in order of appearance.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

/// Percent-decode one component. `+` is a form-encoded space.
fn decode_component(component: &str) -> String {
    let with_spaces = component.replace('+', " ");
    match decode(&with_spaces) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => with_spaces,
    }
}

//! Path/URL record lists and the handlers built from them.
//!
//! Both formats decode to the same `Vec<PathUrl>`, which is folded into a
//! path→URL table in order. A later record for the same path wins.
//!
//! YAML:
//!
//! ```yaml
//! - path: /some-path
//!   url: https://www.some-url.com/demo
//! ```
//!
//! JSON:
//!
//! ```json
//! [{"path": "/some-path", "url": "https://www.some-url.com/demo"}]
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::handler::{map_handler, MapHandler};

/// One redirect entry. Both fields are required; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathUrl {
    pub path: String,
    pub url: String,
}

/// Decode a YAML sequence of records.
///
/// Blank input and a `null` document decode to no records.
pub fn parse_yaml(yml: &[u8]) -> Result<Vec<PathUrl>, DecodeError> {
    if yml.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let records: Option<Vec<PathUrl>> = serde_yaml::from_slice(yml)?;
    Ok(records.unwrap_or_default())
}

/// Decode a JSON array of records.
pub fn parse_json(json: &[u8]) -> Result<Vec<PathUrl>, DecodeError> {
    Ok(serde_json::from_slice(json)?)
}

/// Fold records into a lookup table, last write wins.
pub fn build_map(records: impl IntoIterator<Item = PathUrl>) -> HashMap<String, String> {
    records
        .into_iter()
        .map(|record| (record.path, record.url))
        .collect()
}

/// Parse `yml` and build a [`MapHandler`] over it.
///
/// The only failure is malformed YAML, surfaced as [`DecodeError::Yaml`].
pub fn yaml_handler<S>(yml: &[u8], fallback: S) -> Result<MapHandler<S>, DecodeError> {
    let records = parse_yaml(yml)?;
    Ok(map_handler(build_map(records), fallback))
}

/// Parse `json` and build a [`MapHandler`] over it.
///
/// The only failure is malformed JSON, surfaced as [`DecodeError::Json`].
pub fn json_handler<S>(json: &[u8], fallback: S) -> Result<MapHandler<S>, DecodeError> {
    let records = parse_json(json)?;
    Ok(map_handler(build_map(records), fallback))
}

//! Parser for Elasticsearch Profile API output.
//!
//! Walks the raw JSON as a `serde_json::Value` so that every key can fall
//! back to its default when it is absent or `null`. A key that is present
//! with the wrong JSON type is reported with its full path.

use super::schema::{FetchRecord, ProfileDocument, QueryNode, SearchRecord, ShardRecord};
use crate::utils::config::{
    NO_DESCRIPTION, UNKNOWN_CHILD_TYPE, UNKNOWN_INDEX, UNKNOWN_QUERY_TYPE, UNKNOWN_SHARD,
};
use crate::utils::error::ParseError;
use log::debug;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

type Object = Map<String, Value>;

/// Read and parse a profile document from a file, or stdin when `input`
/// is `None` or `-`
///
/// **Public** - main entry point used by commands
///
/// # Errors
/// * `ParseError::Io` - input could not be read
/// * `ParseError::MalformedInput` - input is not valid JSON
/// * `ParseError::UnexpectedStructure` - a key holds the wrong JSON type
pub fn load_profile(input: Option<&Path>) -> Result<ProfileDocument, ParseError> {
    let raw = read_input(input)?;
    parse_profile(&raw)
}

/// Read the raw document text
///
/// **Public** - separated from parsing so callers can report I/O errors first
pub fn read_input(input: Option<&Path>) -> Result<String, ParseError> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            debug!("Reading profile from: {}", path.display());
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            debug!("Reading profile from stdin");
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Parse profile JSON text
///
/// **Public** - text entry point
pub fn parse_profile(raw: &str) -> Result<ProfileDocument, ParseError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ParseError::MalformedInput(e.to_string()))?;
    parse_document(&value)
}

/// Build a `ProfileDocument` from an already-parsed JSON value
///
/// **Public** - useful when the caller holds a `serde_json::Value`
pub fn parse_document(value: &Value) -> Result<ProfileDocument, ParseError> {
    let root = expect_object(value, "(root)")?;

    let shards = match get_object(root, "profile", "")? {
        Some(profile) => get_array(profile, "shards", "profile")?,
        None => &[],
    };

    let shards = shards
        .iter()
        .enumerate()
        .map(|(i, shard)| parse_shard(shard, &format!("profile.shards[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Parsed profile document with {} shards", shards.len());

    Ok(ProfileDocument { shards })
}

/// Parse a single shard block
///
/// **Private** - internal helper for parse_document
fn parse_shard(value: &Value, path: &str) -> Result<ShardRecord, ParseError> {
    let obj = expect_object(value, path)?;

    let searches = get_array(obj, "searches", path)?
        .iter()
        .enumerate()
        .map(|(i, search)| parse_search(search, &format!("{}.searches[{}]", path, i)))
        .collect::<Result<Vec<_>, _>>()?;

    let fetch = match get_object(obj, "fetch", path)? {
        Some(fetch) => FetchRecord {
            time_in_nanos: get_nanos(fetch, "time_in_nanos", &join(path, "fetch"))?,
        },
        None => FetchRecord::default(),
    };

    Ok(ShardRecord {
        index: get_label(obj, "index", path, UNKNOWN_INDEX)?,
        shard_id: get_label(obj, "shard_id", path, UNKNOWN_SHARD)?,
        searches,
        fetch,
    })
}

/// Parse one entry of `searches`
///
/// **Private** - internal helper for parse_shard
fn parse_search(value: &Value, path: &str) -> Result<SearchRecord, ParseError> {
    let obj = expect_object(value, path)?;

    let query = get_array(obj, "query", path)?
        .iter()
        .enumerate()
        .map(|(i, node)| parse_query(node, &format!("{}.query[{}]", path, i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchRecord { query })
}

/// Parse a top-level query node and its direct children
///
/// **Private** - internal helper for parse_search
fn parse_query(value: &Value, path: &str) -> Result<QueryNode, ParseError> {
    let obj = expect_object(value, path)?;

    let children = get_array(obj, "children", path)?
        .iter()
        .enumerate()
        .map(|(i, child)| parse_child(child, &format!("{}.children[{}]", path, i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QueryNode {
        query_type: get_string(obj, "type", path, UNKNOWN_QUERY_TYPE)?,
        description: get_string(obj, "description", path, NO_DESCRIPTION)?,
        time_in_nanos: get_nanos(obj, "time_in_nanos", path)?,
        children,
    })
}

/// Parse a child node. Its own `children` are not read.
///
/// **Private** - internal helper for parse_query
fn parse_child(value: &Value, path: &str) -> Result<QueryNode, ParseError> {
    let obj = expect_object(value, path)?;

    Ok(QueryNode {
        query_type: get_string(obj, "type", path, UNKNOWN_CHILD_TYPE)?,
        description: get_string(obj, "description", path, NO_DESCRIPTION)?,
        time_in_nanos: get_nanos(obj, "time_in_nanos", path)?,
        children: Vec::new(),
    })
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

/// Look up a key, treating `null` as absent
fn lookup<'a>(obj: &'a Object, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Object, ParseError> {
    value
        .as_object()
        .ok_or_else(|| ParseError::unexpected(path, "an object"))
}

fn get_object<'a>(obj: &'a Object, key: &str, path: &str) -> Result<Option<&'a Object>, ParseError> {
    lookup(obj, key)
        .map(|v| expect_object(v, &join(path, key)))
        .transpose()
}

fn get_array<'a>(obj: &'a Object, key: &str, path: &str) -> Result<&'a [Value], ParseError> {
    match lookup(obj, key) {
        Some(value) => value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| ParseError::unexpected(join(path, key), "an array")),
        None => Ok(&[]),
    }
}

fn get_string(obj: &Object, key: &str, path: &str, default: &str) -> Result<String, ParseError> {
    match lookup(obj, key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ParseError::unexpected(join(path, key), "a string")),
        None => Ok(default.to_string()),
    }
}

/// Identifier that may be written as a string or an integer
fn get_label(obj: &Object, key: &str, path: &str, default: &str) -> Result<String, ParseError> {
    match lookup(obj, key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        Some(_) => Err(ParseError::unexpected(
            join(path, key),
            "a string or an integer",
        )),
        None => Ok(default.to_string()),
    }
}

/// Nanosecond count. Whole-number floats such as `1e6` are accepted.
fn get_nanos(obj: &Object, key: &str, path: &str) -> Result<u64, ParseError> {
    let Some(value) = lookup(obj, key) else {
        return Ok(0);
    };

    if let Some(nanos) = value.as_u64() {
        return Ok(nanos);
    }

    match value.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(f as u64),
        _ => Err(ParseError::unexpected(
            join(path, key),
            "a non-negative whole number",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_paths() {
        assert_eq!(join("", "profile"), "profile");
        assert_eq!(join("profile", "shards"), "profile.shards");
    }

    #[test]
    fn test_null_is_treated_as_absent() {
        let doc = parse_document(&json!({
            "profile": { "shards": [
                { "index": null, "shard_id": null, "searches": null, "fetch": null }
            ]}
        }))
        .unwrap();

        assert_eq!(doc.shards[0].index, "Unknown Index");
        assert_eq!(doc.shards[0].shard_id, "Unknown Shard");
        assert!(doc.shards[0].searches.is_empty());
        assert_eq!(doc.shards[0].fetch.time_in_nanos, 0);
    }

    #[test]
    fn test_grandchildren_are_not_read() {
        let doc = parse_document(&json!({
            "profile": { "shards": [{ "searches": [{ "query": [{
                "children": [{ "children": "not even an array" }]
            }]}]}]}
        }))
        .unwrap();

        let query = &doc.shards[0].searches[0].query[0];
        assert_eq!(query.children.len(), 1);
        assert!(query.children[0].children.is_empty());
    }

    #[test]
    fn test_whole_number_float_time_is_accepted() {
        let doc = parse_document(&json!({
            "profile": { "shards": [{
                "searches": [{ "query": [{ "time_in_nanos": 2.0e6 }] }],
                "fetch": { "time_in_nanos": 1e6 }
            }]}
        }))
        .unwrap();

        assert_eq!(doc.shards[0].fetch.time_in_nanos, 1_000_000);
        assert_eq!(doc.shards[0].searches[0].query[0].time_in_nanos, 2_000_000);
    }

    #[test]
    fn test_fractional_time_is_rejected() {
        let err = parse_document(&json!({
            "profile": { "shards": [{ "fetch": { "time_in_nanos": 1.5 } }] }
        }))
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Unexpected value for key: 'profile.shards[0].fetch.time_in_nanos' (expected a non-negative whole number)"
        );
    }

    #[test]
    fn test_negative_time_is_rejected() {
        let err = parse_document(&json!({
            "profile": { "shards": [{ "fetch": { "time_in_nanos": -5 } }] }
        }))
        .unwrap_err();

        match err {
            ParseError::UnexpectedStructure { key, .. } => {
                assert_eq!(key, "profile.shards[0].fetch.time_in_nanos")
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}

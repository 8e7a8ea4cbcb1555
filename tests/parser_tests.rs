use es_profile_analyzer::parser::{load_profile, parse_document, parse_profile};
use es_profile_analyzer::utils::error::ParseError;
use serde_json::json;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn structure_key(err: ParseError) -> String {
    match err {
        ParseError::UnexpectedStructure { key, .. } => key,
        other => panic!("expected UnexpectedStructure, got: {}", other),
    }
}

#[test]
fn test_parse_empty_object() {
    let doc = parse_profile("{}").unwrap();
    assert!(doc.shards.is_empty());
}

#[test]
fn test_parse_profile_without_shards() {
    let doc = parse_profile(r#"{"profile": {}}"#).unwrap();
    assert!(doc.shards.is_empty());
}

#[test]
fn test_malformed_json_is_reported() {
    let err = parse_profile(r#"{"profile": {"shards": ["#).unwrap_err();
    assert!(matches!(err, ParseError::MalformedInput(_)));
    assert!(err.to_string().starts_with("Invalid JSON"));

    let err = parse_profile("not json at all").unwrap_err();
    assert!(matches!(err, ParseError::MalformedInput(_)));
}

#[test]
fn test_missing_keys_take_defaults() {
    let doc = parse_document(&json!({
        "profile": { "shards": [{ "searches": [{ "query": [{ "children": [{}] }] }] }] }
    }))
    .unwrap();

    let shard = &doc.shards[0];
    assert_eq!(shard.index, "Unknown Index");
    assert_eq!(shard.shard_id, "Unknown Shard");
    assert_eq!(shard.fetch.time_in_nanos, 0);

    let query = &shard.searches[0].query[0];
    assert_eq!(query.query_type, "Unknown Query Type");
    assert_eq!(query.description, "No Description");
    assert_eq!(query.time_in_nanos, 0);
    assert_eq!(query.children[0].query_type, "Unknown Type");
}

#[test]
fn test_integer_shard_id_becomes_text() {
    let doc = parse_document(&json!({
        "profile": { "shards": [{ "index": "idx1", "shard_id": 7 }] }
    }))
    .unwrap();

    assert_eq!(doc.shards[0].shard_id, "7");
}

#[test]
fn test_unknown_keys_are_ignored() {
    let doc = parse_document(&json!({
        "took": 3,
        "profile": { "shards": [{
            "id": "[node][idx][0]",
            "aggregations": [],
            "searches": [{ "rewrite_time": 10, "collector": [], "query": [] }]
        }]}
    }))
    .unwrap();

    assert_eq!(doc.shards.len(), 1);
    assert!(doc.shards[0].searches[0].query.is_empty());
}

#[test]
fn test_wrong_type_names_the_key() {
    let err = parse_document(&json!({ "profile": { "shards": {} } })).unwrap_err();
    assert_eq!(structure_key(err), "profile.shards");

    let err = parse_document(&json!({
        "profile": { "shards": [{ "searches": 5 }] }
    }))
    .unwrap_err();
    assert_eq!(structure_key(err), "profile.shards[0].searches");

    let err = parse_document(&json!({
        "profile": { "shards": [{}, { "searches": [{ "query": [{ "time_in_nanos": "fast" }] }] }] }
    }))
    .unwrap_err();
    assert_eq!(
        structure_key(err),
        "profile.shards[1].searches[0].query[0].time_in_nanos"
    );

    let err = parse_document(&json!({
        "profile": { "shards": [{ "searches": [{ "query": [{ "children": [{ "type": 1 }] }] }] }] }
    }))
    .unwrap_err();
    assert_eq!(
        structure_key(err),
        "profile.shards[0].searches[0].query[0].children[0].type"
    );
}

#[test]
fn test_non_object_root() {
    let err = parse_profile("[1, 2, 3]").unwrap_err();
    assert_eq!(structure_key(err), "(root)");
}

#[test]
fn test_structure_error_message() {
    let err = parse_document(&json!({ "profile": [] })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected value for key: 'profile' (expected an object)"
    );
}

#[test]
fn test_load_profile_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"profile": {{"shards": [{{"index": "idx1", "shard_id": "0"}}]}}}}"#
    )
    .unwrap();

    let doc = load_profile(Some(file.path())).unwrap();
    assert_eq!(doc.shards[0].index, "idx1");
}

#[test]
fn test_load_profile_missing_file() {
    let err = load_profile(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
}

#[test]
fn test_fixture_document_stats() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/es_profile.json");
    let stats = load_profile(Some(path.as_path())).unwrap().stats();

    assert_eq!(stats.shards, 2);
    assert_eq!(stats.searches, 2);
    assert_eq!(stats.queries, 3);
    assert_eq!(stats.children, 4);
}

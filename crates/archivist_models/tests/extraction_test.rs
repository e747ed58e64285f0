//! Tests for JSON recovery from model output.

use archivist_models::{extract_json, parse_json};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    name: String,
}

#[test]
fn test_plain_object_passes_through() {
    let json = extract_json("  {\"name\": \"SCP-049\"}\n").unwrap();
    assert_eq!(json, "{\"name\": \"SCP-049\"}");
}

#[test]
fn test_extract_from_fenced_block() {
    let text = "Sure! Here is the dossier:\n```json\n{\"name\": \"SCP-096\"}\n```\nLet me know.";
    assert_eq!(extract_json(text).unwrap(), "{\"name\": \"SCP-096\"}");
}

#[test]
fn test_extract_from_unterminated_fence() {
    let text = "```\n{\"name\": \"SCP-682\"}";
    assert_eq!(extract_json(text).unwrap(), "{\"name\": \"SCP-682\"}");
}

#[test]
fn test_extract_embedded_object_with_braces_in_strings() {
    let text = r#"Result: {"name": "SCP-{X}", "nested": {"a": "\"}\""}} trailing"#;
    let json = extract_json(text).unwrap();
    assert_eq!(json, r#"{"name": "SCP-{X}", "nested": {"a": "\"}\""}}"#);
}

#[test]
fn test_no_json_is_error() {
    let err = extract_json("I cannot help with that.").unwrap_err();
    assert!(err.user_message().contains("no JSON object found"));
}

#[test]
fn test_parse_json_from_prose() {
    let item: Item = parse_json("The answer is {\"name\": \"SCP-999\"}.").unwrap();
    assert_eq!(
        item,
        Item {
            name: "SCP-999".to_string()
        }
    );
}

#[test]
fn test_parse_json_shape_mismatch() {
    let err = parse_json::<Item>("{\"title\": \"SCP-999\"}").unwrap_err();
    assert!(err.user_message().starts_with("Malformed generation response"));
}

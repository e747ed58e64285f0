//! Tests for Gemini response handling without network access.

use archivist_core::RecordField;
use archivist_models::{
    dossier_prompt, mapping_prompt, parse_dossier, parse_mapping_suggestion,
    GenerateContentResponse, PredictResponse,
};

#[test]
fn test_response_text_joins_parts_of_first_candidate() {
    let response: GenerateContentResponse = serde_json::from_str(
        r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]}, "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
    assert_eq!(response.block_reason(), None);
}

#[test]
fn test_prompt_feedback_block_is_reported() {
    let response: GenerateContentResponse =
        serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();

    assert_eq!(response.block_reason(), Some("SAFETY"));
    assert_eq!(response.text(), None);
}

#[test]
fn test_candidate_safety_finish_is_a_block() {
    let response: GenerateContentResponse =
        serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();

    assert_eq!(response.block_reason(), Some("SAFETY"));
}

#[test]
fn test_empty_candidates_have_no_text() {
    let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(response.text(), None);
    assert_eq!(response.block_reason(), None);
}

#[test]
fn test_prediction_respects_mime_type() {
    let response: PredictResponse = serde_json::from_str(
        r#"{"predictions": [{"bytesBase64Encoded": ""}, {"bytesBase64Encoded": "QUJD", "mimeType": "image/jpeg"}]}"#,
    )
    .unwrap();

    assert_eq!(
        response.first_image_url().as_deref(),
        Some("data:image/jpeg;base64,QUJD")
    );
}

#[test]
fn test_parse_dossier_accepts_alias_keys_and_trims_name() {
    let text = r#"```json
{"name": " SCP-173 ", "objectClass": "Euclid", "containmentProcedures": "Locked container.", "description": "Statue."}
```"#;
    let dossier = parse_dossier(text, "scp-173").unwrap();
    let record = dossier.into_record("data:image/png;base64,AAAA").unwrap();

    assert_eq!(record.name(), "SCP-173");
    assert_eq!(record.classification(), "Euclid");
    assert_eq!(record.containment(), "Locked container.");
    assert!(!record.saved());
}

#[test]
fn test_parse_dossier_rejects_blank_name() {
    let text = r#"{"name": "  ", "class": "Safe", "containment": "x", "description": "y"}"#;
    let err = parse_dossier(text, "SCP-999").unwrap_err();
    assert!(err.user_message().contains("SCP-999"));
}

#[test]
fn test_mapping_suggestion_drops_unknown_fields_and_columns() {
    let columns = vec![
        "item_no".to_string(),
        "obj_class".to_string(),
        "notes".to_string(),
    ];
    let text = r#"{"name": "item_no", "classification": "obj_class", "description": "missing_column", "imageReference": null, "rating": "notes"}"#;

    let mapping = parse_mapping_suggestion(text, &columns).unwrap();

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.column(RecordField::Name), Some("item_no"));
    assert_eq!(mapping.column(RecordField::Classification), Some("obj_class"));
    assert_eq!(mapping.column(RecordField::Description), None);
}

#[test]
fn test_prompts_mention_their_inputs() {
    assert!(dossier_prompt("SCP-3008").contains("SCP-3008"));
    let prompt = mapping_prompt(&["a_col".to_string(), "b_col".to_string()]);
    assert!(prompt.contains("a_col, b_col"));
    assert!(prompt.contains("\"imageReference\""));
}

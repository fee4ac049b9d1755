use std::time::Duration;

use partmaster::gemini::client::{
    BAD_GATEWAY_BACKOFF_SECS, DEFAULT_BACKOFF_SECS, retry_delay,
};
use partmaster::gemini::schema::{
    GenerateContentResponse, build_prompt, parse_set_data, request_body,
};

#[test]
fn test_prompt_mentions_set_number() {
    let prompt = build_prompt("10221");
    assert!(prompt.contains("LEGO set 10221"));
    assert!(prompt.contains("DO NOT TRUNCATE"));
}

#[test]
fn test_request_body_enables_search_and_json_schema() {
    let body = request_body("10221");

    assert!(body["tools"][0].get("google_search").is_some());
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    let required = body["generationConfig"]["responseSchema"]["required"]
        .as_array()
        .unwrap();
    assert!(required.iter().any(|v| v == "parts"));
}

#[test]
fn test_response_text_and_grounding() {
    let json = r#"{
        "candidates": [{
            "content": { "parts": [
                { "text": "{\"name\": \"Super Star Destroyer\", " },
                { "text": "\"theme\": \"Star Wars\", \"totalParts\": 3152, \"parts\": []}" }
            ]},
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "uri": "https://www.bricklink.com/", "title": "bricklink.com" } },
                    { "retrievedContext": {} }
                ]
            }
        }]
    }"#;

    let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
    let text = response.text().unwrap();
    let data = parse_set_data(&text).unwrap();

    assert_eq!(data.name, "Super Star Destroyer");
    assert_eq!(data.total_parts, Some(3152));
    assert!(data.parts.is_empty());

    let grounding = response.grounding().unwrap();
    assert_eq!(grounding.grounding_chunks.len(), 2);
    assert!(grounding.grounding_chunks[1].web.is_none());
}

#[test]
fn test_missing_text_is_none() {
    let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
    assert!(empty.text().is_none());

    let blank: GenerateContentResponse =
        serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#)
            .unwrap();
    assert!(blank.text().is_none());
}

#[test]
fn test_parse_set_data_strips_code_fence() {
    let text = "```json\n{\"name\":\"Station\",\"theme\":\"Winter\",\"parts\":[{\"name\":\"Brick\",\"quantity\":2}]}\n```";
    let data = parse_set_data(text).unwrap();

    assert_eq!(data.name, "Station");
    assert_eq!(data.parts[0].quantity, 2);
}

#[test]
fn test_parse_set_data_rejects_garbage() {
    assert!(parse_set_data("I could not find that set.").is_err());
}

#[test]
fn test_retry_delay_for_rate_limit() {
    let status = reqwest::StatusCode::TOO_MANY_REQUESTS;

    assert_eq!(retry_delay(status, Some("7")), Some(Duration::from_secs(7)));
    // missing or unreadable header falls back to a fixed backoff, never zero
    assert_eq!(
        retry_delay(status, None),
        Some(Duration::from_secs(DEFAULT_BACKOFF_SECS))
    );
    assert_eq!(
        retry_delay(status, Some("soon")),
        Some(Duration::from_secs(DEFAULT_BACKOFF_SECS))
    );
    assert!(DEFAULT_BACKOFF_SECS > 0);
    // abnormal waits give up
    assert_eq!(retry_delay(status, Some("600")), None);
}

#[test]
fn test_retry_delay_for_other_statuses() {
    assert_eq!(
        retry_delay(reqwest::StatusCode::BAD_GATEWAY, None),
        Some(Duration::from_secs(BAD_GATEWAY_BACKOFF_SECS))
    );
    assert_eq!(retry_delay(reqwest::StatusCode::NOT_FOUND, Some("1")), None);
    assert_eq!(retry_delay(reqwest::StatusCode::UNAUTHORIZED, None), None);
}

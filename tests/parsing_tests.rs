use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use habitica_slack::api::parsing::{
    decode_url_component, extract_body, get_header_value, parse_form_data, request_path,
};
use serde_json::json;

#[test]
fn test_decode_url_component() {
    assert_eq!(decode_url_component("hello%20world").unwrap(), "hello world");
    assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
    assert_eq!(
        decode_url_component("test%40example.com%26param%3Dvalue").unwrap(),
        "test@example.com&param=value"
    );
    // An encoded plus must survive as a literal plus.
    assert_eq!(decode_url_component("1%2B1").unwrap(), "1+1");
}

#[test]
fn test_parse_slash_command() {
    let form_data = "token=abc123&team_id=T123&team_domain=example&\
                    channel_id=C123&channel_name=general&user_id=U123&\
                    user_name=Joe&command=%2Fhabitica&text=Hello%21&\
                    response_url=https%3A%2F%2Fhooks.slack.com%2F";

    let event = parse_form_data(form_data).unwrap();

    assert_eq!(event.user_name, "Joe");
    assert_eq!(event.text, "Hello!");
    assert_eq!(event.command, "/habitica");
    assert_eq!(event.channel_name, "general");
    assert_eq!(event.response_url, "https://hooks.slack.com/");
    assert_eq!(event.trigger_word, "");
}

#[test]
fn test_parse_outgoing_webhook() {
    let form_data = "token=abc&channel_name=party&user_name=emma&\
                    text=habitica%3A+let%27s+raid&trigger_word=habitica%3A";

    let event = parse_form_data(form_data).unwrap();

    assert_eq!(event.user_name, "emma");
    assert_eq!(event.text, "habitica: let's raid");
    assert_eq!(event.trigger_word, "habitica:");
    assert_eq!(event.command, "");
}

#[test]
fn test_parse_form_data_missing_fields() {
    let event = parse_form_data("token=abc123").unwrap();

    assert_eq!(event.token, "abc123");
    assert_eq!(event.user_name, "");
    assert_eq!(event.text, "");
}

#[test]
fn test_parse_form_data_rejects_invalid_utf8() {
    assert!(parse_form_data("user_name=%FF%FE").is_err());
}

#[test]
fn test_extract_body_plain_and_base64() {
    let plain = json!({ "body": "user_name=Joe" });
    assert_eq!(extract_body(&plain).unwrap(), "user_name=Joe");

    let encoded = json!({
        "body": STANDARD.encode("user_name=Joe&text=hi"),
        "isBase64Encoded": true
    });
    assert_eq!(extract_body(&encoded).unwrap(), "user_name=Joe&text=hi");

    assert!(extract_body(&json!({})).is_err());
    assert!(extract_body(&json!({ "body": "!!!", "isBase64Encoded": true })).is_err());
}

#[test]
fn test_request_path_prefers_raw_path() {
    let payload = json!({ "rawPath": "/prod/sync_messages_to_slack", "path": "/other" });
    assert_eq!(request_path(&payload), Some("/prod/sync_messages_to_slack"));

    let payload = json!({ "path": "/sync_message_to_habitica" });
    assert_eq!(request_path(&payload), Some("/sync_message_to_habitica"));

    assert_eq!(request_path(&json!({})), None);
}

#[test]
fn test_header_lookup_is_case_insensitive() {
    let headers = json!({ "x-slack-signature": "v0=abc" });
    assert_eq!(
        get_header_value(&headers, "X-Slack-Signature"),
        Some("v0=abc")
    );
    assert_eq!(get_header_value(&headers, "X-Missing"), None);
}

use habitica_slack::RelayBot;
use habitica_slack::api::route_request;
use habitica_slack::api::signature::compute_signature;
use habitica_slack::clients::{HabiticaClient, SlackWebhookClient};
use habitica_slack::core::config::AppConfig;
use habitica_slack::core::watermark::{MemoryWatermarkStore, WatermarkStore};
use habitica_slack::slack::SlackPublisher;
use serde_json::{Value, json};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHAT_PATH: &str = "/api/v3/groups/123/chat";

fn config(server: &MockServer, signing_secret: Option<&str>) -> AppConfig {
    AppConfig {
        habitica_api_user: "joe".into(),
        habitica_api_key: "secret".into(),
        habitica_group_id: "123".into(),
        habitica_base_url: server.uri(),
        slack_webhook_url: format!("{}/webhook", server.uri()),
        slack_signing_secret: signing_secret.map(str::to_string),
        watermark_ssm_parameter: None,
        watermark_file: String::new(),
        http_timeout: Duration::from_secs(5),
    }
}

fn bot(config: &AppConfig, watermark: i64) -> RelayBot {
    let http = reqwest::Client::new();
    RelayBot::new(
        HabiticaClient::from_config(http.clone(), config),
        SlackPublisher::new(SlackWebhookClient::new(
            http,
            config.slack_webhook_url.clone(),
        )),
        Box::new(MemoryWatermarkStore::with_value(watermark)),
    )
}

fn status(response: &Value) -> u64 {
    response["statusCode"].as_u64().unwrap()
}

fn body(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn relay_route_posts_to_habitica() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string("message=%5BJoe+says%5D+Hello%21&groupId=123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server, None);
    let payload = json!({
        "rawPath": "/sync_message_to_habitica",
        "headers": {},
        "body": "token=t&channel_name=party&user_name=Joe&text=Hello%21"
    });

    let response = route_request(&config, &bot(&config, 0), &payload).await;

    assert_eq!(status(&response), 200);
}

#[tokio::test]
async fn relay_route_ignores_slackbot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config(&server, None);
    let payload = json!({
        "rawPath": "/sync_message_to_habitica",
        "body": "user_name=slackbot&text=Hello%21"
    });

    let response = route_request(&config, &bot(&config, 0), &payload).await;

    assert_eq!(status(&response), 200);
}

#[tokio::test]
async fn relay_route_answers_ok_when_habitica_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server, None);
    let payload = json!({
        "rawPath": "/sync_message_to_habitica",
        "body": "user_name=Joe&text=hi"
    });

    let response = route_request(&config, &bot(&config, 0), &payload).await;

    assert_eq!(status(&response), 200);
}

#[tokio::test]
async fn relay_route_forwards_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string("message=%5BJoe+says%5D+&groupId=123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server, None);
    let payload = json!({
        "rawPath": "/sync_message_to_habitica",
        "body": "user_name=Joe&trigger_word=habitica%3A"
    });

    let response = route_request(&config, &bot(&config, 0), &payload).await;

    assert_eq!(status(&response), 200);
}

#[tokio::test]
async fn relay_route_requires_user_name() {
    let server = MockServer::start().await;
    let config = config(&server, None);
    let payload = json!({
        "rawPath": "/sync_message_to_habitica",
        "body": "text=hello"
    });

    let response = route_request(&config, &bot(&config, 0), &payload).await;

    assert_eq!(status(&response), 400);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn relay_route_checks_signature_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server, Some("shh"));
    let bot = bot(&config, 0);
    let form = "user_name=Joe&text=hi";

    let unsigned = json!({ "rawPath": "/sync_message_to_habitica", "headers": {}, "body": form });
    assert_eq!(status(&route_request(&config, &bot, &unsigned).await), 401);

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        .to_string();
    let signed = json!({
        "rawPath": "/sync_message_to_habitica",
        "headers": {
            "x-slack-request-timestamp": ts,
            "x-slack-signature": compute_signature(&ts, form, "shh").unwrap()
        },
        "body": form
    });
    assert_eq!(status(&route_request(&config, &bot, &signed).await), 200);
}

#[tokio::test]
async fn sync_route_reports_posted_and_watermark() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "timestamp": 50, "text": "hello from Emily", "user": "Emily" },
                { "timestamp": 10, "text": "old", "user": "Joe" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server, None);
    let bot = bot(&config, 15);
    let payload = json!({ "rawPath": "/prod/sync_messages_to_slack" });

    let response = route_request(&config, &bot, &payload).await;

    assert_eq!(status(&response), 200);
    assert_eq!(body(&response), json!({ "posted": 1, "watermark": 50 }));
    assert_eq!(bot.store().get().await.unwrap(), 50);
}

#[tokio::test]
async fn sync_route_maps_failure_to_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let config = config(&server, None);
    let payload = json!({ "rawPath": "/sync_messages_to_slack" });

    let response = route_request(&config, &bot(&config, 15), &payload).await;

    assert_eq!(status(&response), 502);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let server = MockServer::start().await;
    let config = config(&server, None);

    let response =
        route_request(&config, &bot(&config, 0), &json!({ "rawPath": "/admin" })).await;
    assert_eq!(status(&response), 404);

    let response = route_request(&config, &bot(&config, 0), &json!({})).await;
    assert_eq!(status(&response), 400);
}

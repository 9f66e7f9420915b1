//! Fixtures for handler tests: a mocked Telegram Bot API and canned updates.

use crate::bot::BotState;
use crate::config::Config;
use crate::keys::KeyApiClient;
use chrono::FixedOffset;
use serde_json::{json, Value};
use std::sync::Arc;
use teloxide::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) const TOKEN: &str = "TOKEN";
pub(crate) const ADMIN_ID: i64 = 111;
pub(crate) const REGULAR_ID: i64 = 42;

pub(crate) fn state() -> Arc<BotState> {
    let config = Config {
        telegram_bot_token: TOKEN.to_string(),
        admin_ids: vec![ADMIN_ID],
        api_url: "http://127.0.0.1:1".to_string(),
        api_secret: "secret".to_string(),
        display_offset: FixedOffset::east_opt(7 * 3600).unwrap(),
    };
    let api = Arc::new(KeyApiClient::new(&config.api_url, &config.api_secret));
    Arc::new(BotState::new(config, api))
}

/// Bot whose requests go to `server`.
pub(crate) fn bot(server: &MockServer) -> Bot {
    Bot::new(TOKEN).set_api_url(reqwest::Url::parse(&server.uri()).unwrap())
}

/// teloxide names the URL segment after the payload type (`SendMessage`),
/// so the first letter of the Bot API method name is upper-cased here.
pub(crate) fn method_path(name: &str) -> String {
    let mut chars = name.chars();
    let name: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("/bot{TOKEN}/{name}")
}

/// Answer `name` with `result`, expecting exactly `times` calls.
pub(crate) async fn expect_method(server: &MockServer, name: &str, result: Value, times: u64) {
    Mock::given(method("POST"))
        .and(path(method_path(name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": result
        })))
        .expect(times)
        .named(name)
        .mount(server)
        .await;
}

pub(crate) fn user_json(id: i64) -> Value {
    json!({ "id": id, "is_bot": false, "first_name": "user", "username": format!("user{id}") })
}

/// Private-chat text message from `user_id`.
pub(crate) fn message_json(user_id: i64, message_id: i32, text: &str) -> Value {
    json!({
        "message_id": message_id,
        "date": 1_740_000_000,
        "chat": { "id": user_id, "type": "private", "first_name": "user" },
        "from": user_json(user_id),
        "text": text
    })
}

pub(crate) fn message(user_id: i64, text: &str) -> Message {
    serde_json::from_value(message_json(user_id, 1, text)).unwrap()
}

/// Button press by `user_id`, optionally on an accessible message.
pub(crate) fn callback(user_id: i64, data: &str, on_message: Option<i32>) -> CallbackQuery {
    let mut query = json!({
        "id": "cbq-1",
        "from": user_json(user_id),
        "chat_instance": "instance",
        "data": data
    });
    if let Some(message_id) = on_message {
        query["message"] = message_json(user_id, message_id, "menu");
    }
    serde_json::from_value(query).unwrap()
}

/// JSON bodies of every request the server received for `name`.
pub(crate) async fn bodies(server: &MockServer, name: &str) -> Vec<Value> {
    let wanted = method_path(name);
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == wanted)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

use crate::types::error::{BotError, Result};
use crate::types::key::{CreatedKey, LicenseKey, NewKey};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Operations the bot needs from the remote key API.
#[async_trait]
pub trait KeyApi: Send + Sync {
    async fn create_key(&self, request: &NewKey) -> Result<CreatedKey>;
    async fn list_keys(&self) -> Result<Vec<LicenseKey>>;
    async fn delete_key(&self, key: &str) -> Result<()>;
}

/// HTTP client for the key API (`POST {base}/api/keys/{action}`).
#[derive(Clone)]
pub struct KeyApiClient {
    client: reqwest::Client,
    base_url: String,
    secret: String,
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    keys: Vec<LicenseKey>,
}

impl KeyApiClient {
    pub fn new(base_url: &str, secret: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            secret: secret.into(),
        }
    }

    fn action_url(&self, action: &str) -> String {
        format!("{}/api/keys/{}", self.base_url, action)
    }

    /// Post `params` plus the shared secret and unwrap the `{ success, error }`
    /// envelope of the reply.
    async fn call<T: DeserializeOwned>(&self, action: &str, params: Value) -> Result<T> {
        let mut body = Map::new();
        body.insert("telegramSecret".to_string(), Value::from(self.secret.as_str()));
        if let Value::Object(params) = params {
            body.extend(params);
        }

        let url = self.action_url(action);
        debug!(url = %url, action = action, "Calling key API");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::api_unavailable(format!("{action}: {e}")))?;

        let status = response.status();
        let envelope: Value = response.json().await.map_err(|e| {
            BotError::api_unavailable(format!("{action}: HTTP {}: {e}", status.as_u16()))
        })?;

        if envelope.get("success").and_then(Value::as_bool) != Some(true) {
            let message = envelope
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(BotError::api_rejected(message));
        }

        serde_json::from_value(envelope)
            .map_err(|e| BotError::api_unavailable(format!("{action}: malformed response: {e}")))
    }
}

#[async_trait]
impl KeyApi for KeyApiClient {
    async fn create_key(&self, request: &NewKey) -> Result<CreatedKey> {
        self.call(
            "create",
            json!({
                "duration": request.days,
                "maxUses": request.max_uses,
                "notes": request.notes,
            }),
        )
        .await
    }

    async fn list_keys(&self) -> Result<Vec<LicenseKey>> {
        let list: ListResponse = self.call("list", json!({})).await?;
        Ok(list.keys)
    }

    async fn delete_key(&self, key: &str) -> Result<()> {
        let _: Value = self.call("delete", json!({ "key": key })).await?;
        Ok(())
    }
}

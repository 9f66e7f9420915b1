use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// License key record as returned by the key API `list` action.
///
/// Fields other than `key` tolerate `null` and malformed values so that one
/// bad record cannot make the whole list unreadable.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LicenseKey {
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_uses: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_uses: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub package: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "transaction_code", deserialize_with = "lenient")]
    pub transaction_code: Option<String>,
}

impl LicenseKey {
    /// A key is live while the API marks it active and its expiry, if any, is
    /// still in the future.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.active && self.expires_at.is_none_or(|expires| expires > now)
    }

    /// Use limit, with `0` meaning unlimited.
    pub fn use_limit(&self) -> Option<u64> {
        self.max_uses.filter(|max| *max > 0)
    }
}

/// Result of the `create` action.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedKey {
    pub key: String,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Parameters of the `create` action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewKey {
    pub days: Option<u32>,
    pub max_uses: Option<u32>,
    pub notes: String,
}

/// Any value that does not fit `T`, `null` included, reads as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], falling back to `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Timestamps arrive as RFC 3339 strings, naive `YYYY-MM-DD HH:MM:SS` strings
/// (UTC) or epoch milliseconds. Anything else is logged and read as absent.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use tracing::warn;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let parsed = match &raw {
            Value::Null => return Ok(None),
            Value::String(text) if text.trim().is_empty() => return Ok(None),
            Value::Number(n) => n
                .as_i64()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            Value::String(text) => parse_text(text.trim()),
            _ => None,
        };
        if parsed.is_none() {
            warn!(value = %raw, "Ignoring unparseable timestamp");
        }
        Ok(parsed)
    }

    fn parse_text(text: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(text)
            .map(|ts| ts.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn key(active: bool, expires_at: Option<DateTime<Utc>>) -> LicenseKey {
        LicenseKey {
            key: "ABCD-1234".to_string(),
            active,
            expires_at,
            max_uses: None,
            current_uses: 0,
            package: None,
            created_at: None,
            transaction_code: None,
        }
    }

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "key": "ABCD-1234-EFGH-5678",
            "active": true,
            "expiresAt": "2025-03-15T07:30:00.000Z",
            "maxUses": 100,
            "currentUses": 12,
            "package": "VIP 30 ngày",
            "createdAt": "2025-02-13T07:30:00Z",
            "transaction_code": "DH12345"
        }"#;

        let key: LicenseKey = serde_json::from_str(json).unwrap();
        assert_eq!(key.key, "ABCD-1234-EFGH-5678");
        assert!(key.active);
        assert_eq!(
            key.expires_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 15, 7, 30, 0).unwrap())
        );
        assert_eq!(key.max_uses, Some(100));
        assert_eq!(key.current_uses, 12);
        assert_eq!(key.package.as_deref(), Some("VIP 30 ngày"));
        assert_eq!(key.transaction_code.as_deref(), Some("DH12345"));
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let key: LicenseKey = serde_json::from_str(r#"{"key": "K1"}"#).unwrap();
        assert!(!key.active);
        assert!(key.expires_at.is_none());
        assert!(key.max_uses.is_none());
        assert_eq!(key.current_uses, 0);
        assert!(key.created_at.is_none());
    }

    #[test]
    fn test_deserialize_null_and_millis_timestamps() {
        let json = r#"{"key": "K1", "expiresAt": null, "createdAt": 1739431800000}"#;
        let key: LicenseKey = serde_json::from_str(json).unwrap();
        assert!(key.expires_at.is_none());
        assert_eq!(
            key.created_at,
            Some(Utc.with_ymd_and_hms(2025, 2, 13, 7, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_deserialize_naive_timestamp() {
        let json = r#"{"key": "K1", "createdAt": "2025-02-13 07:30:00"}"#;
        let key: LicenseKey = serde_json::from_str(json).unwrap();
        assert_eq!(
            key.created_at,
            Some(Utc.with_ymd_and_hms(2025, 2, 13, 7, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_deserialize_invalid_timestamp_is_absent() {
        let json = r#"{"key": "K1", "createdAt": "yesterday", "expiresAt": {"at": 1}}"#;
        let key: LicenseKey = serde_json::from_str(json).unwrap();
        assert!(key.created_at.is_none());
        assert!(key.expires_at.is_none());
    }

    #[test]
    fn test_deserialize_null_fields_use_defaults() {
        let json = r#"{
            "key": "K1",
            "active": null,
            "currentUses": null,
            "maxUses": "many",
            "package": null,
            "transaction_code": 42
        }"#;
        let key: LicenseKey = serde_json::from_str(json).unwrap();
        assert!(!key.active);
        assert_eq!(key.current_uses, 0);
        assert!(key.max_uses.is_none());
        assert!(key.package.is_none());
        assert!(key.transaction_code.is_none());
    }

    #[test]
    fn test_is_live() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

        assert!(key(true, None).is_live(now));
        assert!(key(true, Some(now + Duration::days(1))).is_live(now));
        assert!(!key(true, Some(now - Duration::seconds(1))).is_live(now));
        assert!(!key(true, Some(now)).is_live(now));
        assert!(!key(false, None).is_live(now));
        assert!(!key(false, Some(now + Duration::days(1))).is_live(now));
    }

    #[test]
    fn test_zero_max_uses_is_unlimited() {
        let mut k = key(true, None);
        k.max_uses = Some(0);
        assert_eq!(k.use_limit(), None);
        k.max_uses = Some(5);
        assert_eq!(k.use_limit(), Some(5));
    }

    #[test]
    fn test_deserialize_created_key() {
        let json = r#"{"success": true, "key": "NEW-KEY", "createdAt": "2025-02-13T07:30:00Z"}"#;
        let created: CreatedKey = serde_json::from_str(json).unwrap();
        assert_eq!(created.key, "NEW-KEY");
        assert!(created.created_at.is_some());
    }
}

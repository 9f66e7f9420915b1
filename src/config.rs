use anyhow::Result;
use chrono::{FixedOffset, Offset, Utc};
use tracing::{debug, warn};

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_DISPLAY_UTC_OFFSET_HOURS: i32 = 7;

/// Configuration for vip-key-bot loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub telegram_bot_token: String,
    pub admin_ids: Vec<i64>,

    // Key API
    pub api_url: String,
    pub api_secret: String,

    // Presentation
    pub display_offset: FixedOffset,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` when `TELEGRAM_BOT_TOKEN` is unset or empty; the bot
    /// stays disabled in that case.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_env_inner(true)
    }

    #[cfg(test)]
    pub fn from_env_no_dotenv() -> Result<Option<Self>> {
        Self::from_env_inner(false)
    }

    fn from_env_inner(load_dotenv: bool) -> Result<Option<Self>> {
        if load_dotenv {
            dotenvy::dotenv().ok();
        }

        let telegram_bot_token = match std::env::var("TELEGRAM_BOT_TOKEN") {
            Ok(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => return Ok(None),
        };

        let admin_ids = std::env::var("TELEGRAM_ADMIN_IDS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| match s.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(value = s, "Skipping invalid entry in TELEGRAM_ADMIN_IDS");
                    None
                }
            })
            .collect::<Vec<_>>();

        let api_url = std::env::var("API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let api_secret = std::env::var("KEY_API_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| telegram_bot_token.clone());

        let display_offset = match std::env::var("DISPLAY_UTC_OFFSET") {
            Ok(raw) if !raw.trim().is_empty() => parse_offset(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Invalid DISPLAY_UTC_OFFSET, using default");
                default_offset()
            }),
            _ => default_offset(),
        };

        debug!(
            api_url = %api_url,
            admin_count = admin_ids.len(),
            dedicated_secret = api_secret != telegram_bot_token,
            display_offset = %display_offset,
            "Config resolved from environment"
        );

        Ok(Some(Config {
            telegram_bot_token,
            admin_ids,
            api_url,
            api_secret,
            display_offset,
        }))
    }
}

/// Whole hours east of UTC, within -12..=14.
fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let hours = raw.trim().parse::<i32>().ok()?;
    if !(-12..=14).contains(&hours) {
        return None;
    }
    FixedOffset::east_opt(hours * 3600)
}

fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_DISPLAY_UTC_OFFSET_HOURS * 3600).unwrap_or_else(|| Utc.fix())
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Config {{\n  telegram_bot_token: ***MASKED***,\n  admin_ids: {:?},\n  api_url: {},\n  api_secret: ***MASKED***,\n  display_offset: {},\n}}",
            self.admin_ids, self.api_url, self.display_offset
        )
    }
}

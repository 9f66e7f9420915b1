use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum BotError {
    /// The key API could not be reached or answered with something that is not
    /// a JSON envelope.
    #[error("Key API unavailable: {reason}")]
    ApiUnavailable { reason: String },

    /// The key API answered `success: false`. `message` is its `error` field.
    #[error("Key API rejected request: {message}")]
    ApiRejected { message: String },

    #[error("Telegram API error: {message}")]
    Telegram { message: String },
}

impl BotError {
    /// Returns true if this error was caused by user input/action rather than a
    /// system failure. Top-level dispatch logs these at WARN instead of ERROR.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Telegram { .. } | Self::ApiRejected { .. })
    }

    pub fn api_unavailable(reason: impl Into<String>) -> Self {
        Self::ApiUnavailable {
            reason: reason.into(),
        }
    }

    pub fn api_rejected(message: impl Into<String>) -> Self {
        Self::ApiRejected {
            message: message.into(),
        }
    }

    pub fn telegram(message: impl Into<String>) -> Self {
        Self::Telegram {
            message: message.into(),
        }
    }
}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        Self::telegram(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

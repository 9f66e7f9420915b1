//! VIP license-key Telegram bot and toast notification helper.

pub mod bot;
pub mod config;
pub mod html;
pub mod keys;
pub mod locale;
pub mod toast;
pub mod types;

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::signal;
use tracing::{debug, error, info, warn};
use vip_key_bot::bot::{handle_callback, handle_command, handle_menu_text, BotState, Command};
use vip_key_bot::config::Config;
use vip_key_bot::keys::KeyApiClient;
use vip_key_bot::types::error::BotError;

fn log_handler_error(context: &str, e: &BotError) {
    if e.is_user_error() {
        warn!(error = %e, "Error handling {}", context);
    } else {
        error!(error = ?e, "Error handling {}", context);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vip_key_bot=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let run_id = format!("run_{}", uuid::Uuid::new_v4());
    let version = env!("CARGO_PKG_VERSION");
    info!(run_id = %run_id, "vip-key-bot v{}", version);

    let Some(config) = Config::from_env()? else {
        warn!("TELEGRAM_BOT_TOKEN not found, bot disabled");
        return Ok(());
    };
    debug!("Config loaded from environment:\n{}", config);

    let api = Arc::new(KeyApiClient::new(&config.api_url, &config.api_secret));
    info!(api_url = %config.api_url, admins = config.admin_ids.len(), "Key API client ready");

    let bot = Bot::new(&config.telegram_bot_token);
    let bot_state = Arc::new(BotState::new(config, api));
    debug!("Bot state initialized");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint({
                    let state = Arc::clone(&bot_state);
                    move |bot: Bot, msg: Message, cmd: Command| {
                        let state = Arc::clone(&state);
                        async move {
                            if let Err(e) = handle_command(bot, msg, cmd, state).await {
                                log_handler_error("command", &e);
                            }
                            respond(())
                        }
                    }
                }),
        )
        .branch(Update::filter_message().endpoint({
            let state = Arc::clone(&bot_state);
            move |bot: Bot, msg: Message| {
                let state = Arc::clone(&state);
                async move {
                    let chat_id = msg.chat.id.0;
                    let sender_id = msg.from.as_ref().map(|u| u.id.0);
                    if let Err(e) = handle_menu_text(bot, msg, state).await {
                        error!(
                            chat_id = chat_id,
                            sender_id = ?sender_id,
                            error = ?e,
                            "Error handling message"
                        );
                    }
                    respond(())
                }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let state = Arc::clone(&bot_state);
            move |bot: Bot, q: CallbackQuery| {
                let state = Arc::clone(&state);
                async move {
                    if let Err(e) = handle_callback(bot, q, state).await {
                        log_handler_error("callback", &e);
                    }
                    respond(())
                }
            }
        }));

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build();

    info!("Telegram bot started. Press Ctrl+C to stop.");

    tokio::select! {
        _ = dispatcher.dispatch() => {
            info!("Dispatcher stopped");
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    info!("Shutdown complete.");
    Ok(())
}

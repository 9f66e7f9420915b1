use crate::bot::keyboards::Menu;
use crate::bot::replies::{self, Delivery, FailureContext, Reply};
use crate::bot::router::{route, Action, Caller, KeyRequest, Trigger};
use crate::bot::{BotState, Command};
use crate::keys::KeyApi;
use crate::types::error::{BotError, Result};
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode};
use tracing::{debug, error, warn};

pub mod callbacks;
#[cfg(test)]
pub(crate) mod test_support;

pub use callbacks::handle_callback;

/// Handle a recognized slash command.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let caller = Caller::from_user(user);
    let role = state.role_of(&caller);
    let trigger = Trigger::from_command(cmd);
    debug!(
        chat_id = msg.chat.id.0,
        sender_id = caller.id,
        trigger = trigger.name(),
        role = ?role,
        "Handling command"
    );

    match route(&trigger, &caller, role) {
        Action::Deny => {
            warn!(sender_id = caller.id, trigger = trigger.name(), "Command denied");
            bot.send_message(msg.chat.id, replies::COMMAND_DENIED).await?;
            Ok(())
        }
        action => execute(&bot, &state, msg.chat.id, None, action).await,
    }
}

/// Handle plain text matching a legacy reply-keyboard label. Anything else,
/// including labels sent by non-admins, is ignored.
pub async fn handle_menu_text(bot: Bot, msg: Message, state: Arc<BotState>) -> Result<()> {
    let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text()) else {
        return Ok(());
    };
    if text.starts_with('/') {
        return Ok(());
    }
    let Some(trigger) = Trigger::from_menu_label(text) else {
        return Ok(());
    };

    let caller = Caller::from_user(user);
    let role = state.role_of(&caller);
    debug!(
        chat_id = msg.chat.id.0,
        sender_id = caller.id,
        trigger = trigger.name(),
        "Handling menu label"
    );

    match route(&trigger, &caller, role) {
        Action::Deny => {
            debug!(sender_id = caller.id, "Ignoring menu label from non-admin");
            Ok(())
        }
        action => execute(&bot, &state, msg.chat.id, None, action).await,
    }
}

/// Carry out an allowed action: send any progress notice, perform the key API
/// call, then deliver the reply. `pressed` is the message whose inline button
/// triggered the event, if any.
pub(crate) async fn execute(
    bot: &Bot,
    state: &BotState,
    chat_id: ChatId,
    pressed: Option<MessageId>,
    action: Action,
) -> Result<()> {
    let reply = match action {
        Action::Deny => return Ok(()),
        Action::Reply(reply) => reply,
        Action::Call { progress, request } => {
            if let Some(notice) = progress {
                bot.send_message(chat_id, notice).await?;
            }
            fulfil(&request, state.api.as_ref(), state.now()).await
        }
    };
    deliver(bot, chat_id, pressed, reply).await
}

async fn deliver(
    bot: &Bot,
    chat_id: ChatId,
    pressed: Option<MessageId>,
    reply: Reply,
) -> Result<()> {
    match (reply.delivery, pressed) {
        (Delivery::EditInPlace, Some(message_id)) => {
            let mut request = bot
                .edit_message_text(chat_id, message_id, reply.text)
                .parse_mode(ParseMode::Html);
            if let Some(menu) = reply.menu {
                request = request.reply_markup(menu.markup());
            }
            request.await?;
        }
        _ => {
            let mut request = bot
                .send_message(chat_id, reply.text)
                .parse_mode(ParseMode::Html);
            if let Some(menu) = reply.menu {
                request = request.reply_markup(menu.markup());
            }
            request.await?;
        }
    }
    Ok(())
}

fn log_api_failure(operation: &str, err: &BotError) {
    if err.is_user_error() {
        warn!(operation = operation, error = %err, "Key API refused request");
    } else {
        error!(operation = operation, error = %err, "Key API request failed");
    }
}

/// Perform the single key API call behind `request` and render its outcome.
/// Failures are rendered too; this never returns an error.
pub async fn fulfil(
    request: &KeyRequest,
    api: &dyn KeyApi,
    now: DateTime<FixedOffset>,
) -> Reply {
    match request {
        KeyRequest::Lookup { code } => {
            let text = match api.list_keys().await {
                Ok(keys) => replies::lookup_result(code, &keys, now),
                Err(e) => {
                    log_api_failure("lookup", &e);
                    replies::failure(FailureContext::Lookup, &e)
                }
            };
            Reply::send(text, None)
        }
        KeyRequest::Create(new_key) => {
            let text = match api.create_key(new_key).await {
                Ok(created) => replies::created(new_key, &created, now),
                Err(e) => {
                    log_api_failure("create", &e);
                    replies::failure(FailureContext::Admin, &e)
                }
            };
            Reply::send(text, Some(Menu::Admin))
        }
        KeyRequest::List => {
            let text = match api.list_keys().await {
                Ok(keys) => replies::key_list(&keys, now),
                Err(e) => {
                    log_api_failure("list", &e);
                    replies::failure(FailureContext::Admin, &e)
                }
            };
            Reply::send(text, Some(Menu::Admin))
        }
        KeyRequest::Delete { key } => {
            let text = match api.delete_key(key).await {
                Ok(()) => replies::deleted(key),
                Err(e) => {
                    log_api_failure("delete", &e);
                    replies::failure(FailureContext::Admin, &e)
                }
            };
            Reply::send(text, Some(Menu::Admin))
        }
        KeyRequest::Stats => {
            let text = match api.list_keys().await {
                Ok(keys) => replies::stats(&keys, now),
                Err(e) => {
                    log_api_failure("stats", &e);
                    replies::failure(FailureContext::Stats, &e)
                }
            };
            Reply::send(text, Some(Menu::Admin))
        }
    }
}

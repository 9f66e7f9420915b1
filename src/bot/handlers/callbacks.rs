use crate::bot::handlers::execute;
use crate::bot::replies;
use crate::bot::router::{route, Action, Caller, Trigger};
use crate::bot::BotState;
use crate::types::error::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, warn};

/// Handle an inline-button press.
///
/// The callback query is answered exactly once: with an alert when the caller
/// lacks permission, with a plain acknowledgement otherwise.
pub async fn handle_callback(bot: Bot, q: CallbackQuery, state: Arc<BotState>) -> Result<()> {
    let Some(data) = q.data.as_deref() else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    debug!(callback_data = %data, sender_id = q.from.id.0, "Dispatching callback query");

    let Some(trigger) = Trigger::from_callback(data) else {
        warn!(callback_data = %data, "Unknown callback data");
        bot.answer_callback_query(q.id.clone())
            .text("Unknown action")
            .await?;
        return Ok(());
    };

    let caller = Caller::from_user(&q.from);
    let role = state.role_of(&caller);

    let action = route(&trigger, &caller, role);
    if action == Action::Deny {
        warn!(sender_id = caller.id, trigger = trigger.name(), "Callback denied");
        bot.answer_callback_query(q.id.clone())
            .text(replies::CALLBACK_DENIED)
            .show_alert(true)
            .await?;
        return Ok(());
    }

    bot.answer_callback_query(q.id.clone()).await?;

    // Private chats share the user's id, so the caller's chat is the fallback
    // when the pressed message is no longer accessible.
    let (chat_id, pressed) = match q.message.as_ref() {
        Some(message) => (message.chat().id, Some(message.id())),
        None => (ChatId(caller.id), None),
    };

    execute(&bot, &state, chat_id, pressed, action).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::handlers::test_support::{self, ADMIN_ID, REGULAR_ID};
    use crate::bot::router::Role;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_denied_press_is_answered_once_with_alert() {
        let server = MockServer::start().await;
        test_support::expect_method(&server, "answerCallbackQuery", true.into(), 1).await;
        test_support::expect_method(&server, "sendMessage", serde_json::Value::Null, 0).await;
        test_support::expect_method(&server, "editMessageText", serde_json::Value::Null, 0).await;

        let q = test_support::callback(REGULAR_ID, "admin_menu", Some(5));
        handle_callback(test_support::bot(&server), q, test_support::state())
            .await
            .unwrap();

        let answers = test_support::bodies(&server, "answerCallbackQuery").await;
        assert_eq!(answers[0]["callback_query_id"], "cbq-1");
        assert_eq!(answers[0]["show_alert"], true);
        assert_eq!(answers[0]["text"], replies::CALLBACK_DENIED);
    }

    #[tokio::test]
    async fn test_menu_navigation_edits_pressed_message() {
        let server = MockServer::start().await;
        test_support::expect_method(&server, "answerCallbackQuery", true.into(), 1).await;
        test_support::expect_method(
            &server,
            "editMessageText",
            test_support::message_json(ADMIN_ID, 5, "menu"),
            1,
        )
        .await;
        test_support::expect_method(&server, "sendMessage", serde_json::Value::Null, 0).await;

        let q = test_support::callback(ADMIN_ID, "back_main", Some(5));
        handle_callback(test_support::bot(&server), q, test_support::state())
            .await
            .unwrap();

        let answers = test_support::bodies(&server, "answerCallbackQuery").await;
        assert!(answers[0].get("show_alert").is_none_or(|v| v == false));

        let edits = test_support::bodies(&server, "editMessageText").await;
        assert_eq!(edits[0]["chat_id"], ADMIN_ID);
        assert_eq!(edits[0]["message_id"], 5);
        assert_eq!(edits[0]["parse_mode"], "HTML");
        assert!(edits[0]["reply_markup"]["inline_keyboard"].is_array());
    }

    #[tokio::test]
    async fn test_press_without_message_falls_back_to_private_chat() {
        let server = MockServer::start().await;
        test_support::expect_method(&server, "answerCallbackQuery", true.into(), 1).await;
        test_support::expect_method(
            &server,
            "sendMessage",
            test_support::message_json(ADMIN_ID, 6, "menu"),
            1,
        )
        .await;
        test_support::expect_method(&server, "editMessageText", serde_json::Value::Null, 0).await;

        let q = test_support::callback(ADMIN_ID, "admin_menu", None);
        handle_callback(test_support::bot(&server), q, test_support::state())
            .await
            .unwrap();

        let sent = test_support::bodies(&server, "sendMessage").await;
        assert_eq!(sent[0]["chat_id"], ADMIN_ID);
        assert!(sent[0]["reply_markup"]["inline_keyboard"].is_array());
    }

    #[test]
    fn test_admin_menu_callback_denied_for_regular_users() {
        let trigger = Trigger::from_callback("admin_menu").unwrap();
        let caller = Caller {
            id: 42,
            display_name: "bob".to_string(),
        };
        assert_eq!(route(&trigger, &caller, Role::Regular), Action::Deny);
        assert_ne!(route(&trigger, &caller, Role::Admin), Action::Deny);
    }

    #[test]
    fn test_lookup_order_callback_is_public() {
        let trigger = Trigger::from_callback("lookup_order").unwrap();
        let caller = Caller {
            id: 42,
            display_name: "bob".to_string(),
        };
        assert!(matches!(
            route(&trigger, &caller, Role::Regular),
            Action::Reply(_)
        ));
    }
}

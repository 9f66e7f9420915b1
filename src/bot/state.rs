use crate::bot::router::{AdminList, Caller, Role};
use crate::config::Config;
use crate::keys::KeyApi;
use chrono::{DateTime, FixedOffset, Utc};
use std::sync::Arc;

/// Immutable state shared by every handler.
pub struct BotState {
    pub config: Arc<Config>,
    pub admins: AdminList,
    pub api: Arc<dyn KeyApi>,
}

impl BotState {
    pub fn new(config: Config, api: Arc<dyn KeyApi>) -> Self {
        Self {
            admins: AdminList::new(config.admin_ids.clone()),
            config: Arc::new(config),
            api,
        }
    }

    pub fn role_of(&self, caller: &Caller) -> Role {
        self.admins.role_of(caller.id)
    }

    /// Current time in the display offset.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.config.display_offset)
    }
}

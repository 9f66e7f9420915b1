//! Trigger classification and authorization.
//!
//! Every inbound event (command, callback button, reply-keyboard label) is
//! reduced to a [`Trigger`]. [`route`] then decides, without touching the
//! network, whether the caller may run it and what should happen: a denial, a
//! canned reply, or a single key API call whose result is rendered later by
//! [`crate::bot::handlers::fulfil`].

use crate::bot::keyboards::Menu;
use crate::bot::replies::{self, Delivery, Reply};
use crate::bot::Command;
use crate::types::key::NewKey;
use teloxide::types::User;

pub const CB_BACK_MAIN: &str = "back_main";
pub const CB_LOOKUP_ORDER: &str = "lookup_order";
pub const CB_ADMIN_MENU: &str = "admin_menu";
pub const CB_CREATE_KEY: &str = "create_key";
pub const CB_LIST_KEYS: &str = "list_keys";
pub const CB_DELETE_KEY: &str = "delete_key";
pub const CB_STATS: &str = "stats";
pub const CB_HELP: &str = "help";

pub const LABEL_CREATE_KEY: &str = "📝 Tạo Key Mới";
pub const LABEL_LIST_KEYS: &str = "📋 Danh Sách Keys";
pub const LABEL_DELETE_KEY: &str = "🗑️ Xóa Key";
pub const LABEL_HELP: &str = "❓ Hướng Dẫn";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Regular,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    AdminOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub id: i64,
    pub display_name: String,
}

impl Caller {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.0 as i64,
            display_name: user
                .username
                .clone()
                .unwrap_or_else(|| user.first_name.clone()),
        }
    }
}

/// Static allow-list of admin user ids.
#[derive(Clone, Debug, Default)]
pub struct AdminList(Vec<i64>);

impl AdminList {
    pub fn new(ids: Vec<i64>) -> Self {
        Self(ids)
    }

    pub fn role_of(&self, id: i64) -> Role {
        if self.0.contains(&id) {
            Role::Admin
        } else {
            Role::Regular
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    Start,
    BackToMain,
    LookupPrompt,
    Lookup { code: String },
    AdminMenu,
    CreatePrompt,
    Create {
        days: Option<u32>,
        max_uses: Option<u32>,
    },
    List,
    DeletePrompt,
    Delete { key: String },
    Stats,
    Help,
}

impl Trigger {
    pub fn from_command(cmd: Command) -> Self {
        match cmd {
            Command::Start => Self::Start,
            Command::Tracuu(code) => {
                let code = code.trim().to_uppercase();
                if code.is_empty() {
                    Self::LookupPrompt
                } else {
                    Self::Lookup { code }
                }
            }
            Command::Create(args) => {
                let (days, max_uses) = parse_create_args(&args);
                Self::Create { days, max_uses }
            }
            Command::List => Self::List,
            Command::Delete(key) => {
                let key = key.trim();
                if key.is_empty() {
                    Self::DeletePrompt
                } else {
                    Self::Delete {
                        key: key.to_string(),
                    }
                }
            }
            Command::Help => Self::Help,
        }
    }

    pub fn from_callback(data: &str) -> Option<Self> {
        let trigger = match data {
            CB_BACK_MAIN => Self::BackToMain,
            CB_LOOKUP_ORDER => Self::LookupPrompt,
            CB_ADMIN_MENU => Self::AdminMenu,
            CB_CREATE_KEY => Self::CreatePrompt,
            CB_LIST_KEYS => Self::List,
            CB_DELETE_KEY => Self::DeletePrompt,
            CB_STATS => Self::Stats,
            CB_HELP => Self::Help,
            _ => return None,
        };
        Some(trigger)
    }

    /// Labels of the legacy reply keyboard.
    pub fn from_menu_label(text: &str) -> Option<Self> {
        let trigger = match text.trim() {
            LABEL_CREATE_KEY => Self::CreatePrompt,
            LABEL_LIST_KEYS => Self::List,
            LABEL_DELETE_KEY => Self::DeletePrompt,
            LABEL_HELP => Self::Help,
            _ => return None,
        };
        Some(trigger)
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Start
            | Self::BackToMain
            | Self::LookupPrompt
            | Self::Lookup { .. }
            | Self::Help => Access::Public,
            Self::AdminMenu
            | Self::CreatePrompt
            | Self::Create { .. }
            | Self::List
            | Self::DeletePrompt
            | Self::Delete { .. }
            | Self::Stats => Access::AdminOnly,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::BackToMain => "back_main",
            Self::LookupPrompt => "lookup_prompt",
            Self::Lookup { .. } => "lookup",
            Self::AdminMenu => "admin_menu",
            Self::CreatePrompt => "create_prompt",
            Self::Create { .. } => "create",
            Self::List => "list",
            Self::DeletePrompt => "delete_prompt",
            Self::Delete { .. } => "delete",
            Self::Stats => "stats",
            Self::Help => "help",
        }
    }
}

/// The single outbound key API request a trigger may need.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyRequest {
    Lookup { code: String },
    Create(NewKey),
    List,
    Delete { key: String },
    Stats,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Deny,
    Reply(Reply),
    Call {
        /// Sent before the request goes out.
        progress: Option<&'static str>,
        request: KeyRequest,
    },
}

/// `/create [days] [uses]`: anything missing, non-numeric or zero is absent.
pub fn parse_create_args(args: &str) -> (Option<u32>, Option<u32>) {
    let mut tokens = args.split_whitespace();
    let mut next = || {
        tokens
            .next()
            .and_then(|t| t.parse::<u32>().ok())
            .filter(|n| *n > 0)
    };
    let days = next();
    let max_uses = next();
    (days, max_uses)
}

pub fn route(trigger: &Trigger, caller: &Caller, role: Role) -> Action {
    if trigger.access() == Access::AdminOnly && role != Role::Admin {
        return Action::Deny;
    }

    let is_admin = role == Role::Admin;
    match trigger {
        Trigger::Start => Action::Reply(Reply::send(
            replies::welcome(is_admin),
            Some(Menu::Main { admin: is_admin }),
        )),
        Trigger::BackToMain => Action::Reply(Reply {
            text: replies::welcome(is_admin),
            menu: Some(Menu::Main { admin: is_admin }),
            delivery: Delivery::EditInPlace,
        }),
        Trigger::AdminMenu => Action::Reply(Reply {
            text: replies::admin_menu(),
            menu: Some(Menu::Admin),
            delivery: Delivery::EditInPlace,
        }),
        Trigger::LookupPrompt => Action::Reply(Reply::send(replies::lookup_prompt(), None)),
        Trigger::CreatePrompt => Action::Reply(Reply::send(replies::create_prompt(), None)),
        Trigger::DeletePrompt => Action::Reply(Reply::send(replies::delete_prompt(), None)),
        Trigger::Help => Action::Reply(Reply::send(
            replies::help(is_admin),
            is_admin.then_some(Menu::Admin),
        )),
        Trigger::Lookup { code } => Action::Call {
            progress: Some(replies::LOOKUP_PROGRESS),
            request: KeyRequest::Lookup { code: code.clone() },
        },
        Trigger::Create { days, max_uses } => Action::Call {
            progress: None,
            request: KeyRequest::Create(NewKey {
                days: *days,
                max_uses: *max_uses,
                notes: format!("Created by {}", caller.display_name),
            }),
        },
        Trigger::List => Action::Call {
            progress: Some(replies::LIST_PROGRESS),
            request: KeyRequest::List,
        },
        Trigger::Delete { key } => Action::Call {
            progress: None,
            request: KeyRequest::Delete { key: key.clone() },
        },
        Trigger::Stats => Action::Call {
            progress: None,
            request: KeyRequest::Stats,
        },
    }
}

use crate::bot::router::{
    CB_ADMIN_MENU, CB_BACK_MAIN, CB_CREATE_KEY, CB_DELETE_KEY, CB_HELP, CB_LIST_KEYS,
    CB_LOOKUP_ORDER, CB_STATS,
};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Inline keyboard attached to a reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Menu {
    /// Order lookup, plus the admin entry point for admins.
    Main { admin: bool },
    Admin,
}

impl Menu {
    pub fn markup(&self) -> InlineKeyboardMarkup {
        match self {
            Menu::Main { admin } => {
                let mut row = vec![InlineKeyboardButton::callback(
                    "🔍 Tra Cứu Đơn Hàng",
                    CB_LOOKUP_ORDER,
                )];
                if *admin {
                    row.push(InlineKeyboardButton::callback("👨‍💼 Lệnh Admin", CB_ADMIN_MENU));
                }
                InlineKeyboardMarkup::new(vec![row])
            }
            Menu::Admin => InlineKeyboardMarkup::new(vec![
                vec![
                    InlineKeyboardButton::callback("📝 Tạo Key Mới", CB_CREATE_KEY),
                    InlineKeyboardButton::callback("📋 Danh Sách Keys", CB_LIST_KEYS),
                ],
                vec![
                    InlineKeyboardButton::callback("🗑️ Xóa Key", CB_DELETE_KEY),
                    InlineKeyboardButton::callback("📊 Thống Kê", CB_STATS),
                ],
                vec![
                    InlineKeyboardButton::callback("❓ Hướng Dẫn", CB_HELP),
                    InlineKeyboardButton::callback("🔙 Quay Lại", CB_BACK_MAIN),
                ],
            ]),
        }
    }
}

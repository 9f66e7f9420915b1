//! Reply texts. Everything here is Telegram HTML; dynamic values go through
//! [`crate::html`] before interpolation.

use crate::bot::keyboards::Menu;
use crate::html::{bold, code, escape_html, italic};
use crate::locale::{
    format_date_long, format_date_short, format_date_time, format_number, UNLIMITED,
};
use crate::types::error::BotError;
use crate::types::key::{CreatedKey, LicenseKey, NewKey};
use chrono::{DateTime, FixedOffset, Utc};

/// Number of keys shown by the list view.
pub const LIST_LIMIT: usize = 10;

pub const LOOKUP_PROGRESS: &str = "⏳ Đang tra cứu...";
pub const LIST_PROGRESS: &str = "⏳ Đang tải danh sách keys...";
pub const COMMAND_DENIED: &str = "❌ Bạn không có quyền sử dụng lệnh này!";
pub const CALLBACK_DENIED: &str = "❌ Bạn không có quyền!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Send,
    /// Replace the text and keyboard of the message whose button was pressed.
    EditInPlace,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub menu: Option<Menu>,
    pub delivery: Delivery,
}

impl Reply {
    pub fn send(text: String, menu: Option<Menu>) -> Self {
        Self {
            text,
            menu,
            delivery: Delivery::Send,
        }
    }
}

pub fn welcome(is_admin: bool) -> String {
    if is_admin {
        "👋 Xin chào Admin!\n\n🔑 Bot quản lý Key Download VIP\n\nChọn chức năng bên dưới:".to_string()
    } else {
        "👋 Chào mừng!\n\n🔍 Bạn có thể tra cứu đơn hàng đã thanh toán bằng nút bên dưới."
            .to_string()
    }
}

pub fn admin_menu() -> String {
    format!("👨‍💼 {}\n\nChọn chức năng quản lý:", bold("Menu Admin"))
}

pub fn lookup_prompt() -> String {
    format!(
        "🔍 Tra Cứu Đơn Hàng\n\n\
         Sử dụng lệnh: {}\n\n\
         Ví dụ: {}\n\n\
         💡 {}",
        code("/tracuu <mã giao dịch>"),
        code("/tracuu DH12345"),
        italic("Mã giao dịch là nội dung chuyển khoản khi bạn thanh toán.")
    )
}

pub fn create_prompt() -> String {
    format!(
        "📝 Tạo Key Mới\n\n\
         Sử dụng lệnh: {}\n\n\
         Ví dụ:\n\
         • {} - Key vĩnh viễn, không giới hạn\n\
         • {} - Key 7 ngày, không giới hạn lượt\n\
         • {} - Key 30 ngày, tối đa 100 lượt",
        code("/create [days] [uses]"),
        code("/create"),
        code("/create 7"),
        code("/create 30 100")
    )
}

pub fn delete_prompt() -> String {
    format!(
        "🗑️ Xóa Key\n\n\
         Sử dụng lệnh: {}\n\n\
         Ví dụ:\n{}",
        code("/delete <key>"),
        code("/delete ABCD-1234-EFGH-5678")
    )
}

pub fn help(is_admin: bool) -> String {
    let mut text = format!(
        "❓ Hướng Dẫn Sử Dụng\n\n\
         {}\n\
         • {} - Khởi động bot\n\
         • {} - Tra cứu đơn hàng\n",
        bold("Lệnh cơ bản:"),
        code("/start"),
        code("/tracuu <mã>")
    );
    if is_admin {
        text.push_str(&format!(
            "\n{}\n\
             • {} - Tạo key mới\n\
             • {} - Xem danh sách keys\n\
             • {} - Xóa key\n\n\
             {}\n\
             • Key không giới hạn khi bỏ trống tham số\n",
            bold("Lệnh Admin:"),
            code("/create [days] [uses]"),
            code("/list"),
            code("/delete <key>"),
            bold("Lưu ý:")
        ));
    }
    text.push_str(&format!(
        "\n💡 {}",
        italic("Mã giao dịch là nội dung chuyển khoản khi thanh toán.")
    ));
    text
}

fn uses_fraction(key: &LicenseKey) -> String {
    match key.use_limit() {
        Some(max) => format!(
            "{}/{}",
            format_number(key.current_uses),
            format_number(max)
        ),
        None => UNLIMITED.to_string(),
    }
}

/// Detailed view of the key bought with `code`, or a not-found notice.
pub fn lookup_result(
    code_value: &str,
    keys: &[LicenseKey],
    now: DateTime<FixedOffset>,
) -> String {
    let offset = now.offset();
    let Some(found) = keys
        .iter()
        .find(|k| k.transaction_code.as_deref() == Some(code_value))
    else {
        return "❌ Không tìm thấy đơn hàng!\n\n\
                📝 Vui lòng kiểm tra lại mã giao dịch.\n\
                Mã giao dịch là nội dung chuyển khoản khi bạn thanh toán."
            .to_string();
    };

    let status = if found.is_live(now.with_timezone(&Utc)) {
        "✅ Đang hoạt động"
    } else {
        "❌ Đã hết hạn"
    };
    let expires = found
        .expires_at
        .map(|ts| format_date_long(&ts, offset))
        .unwrap_or_else(|| format!("{UNLIMITED} Vĩnh viễn"));
    let uses = match found.use_limit() {
        Some(_) => format!("{} lượt", uses_fraction(found)),
        None => format!("{UNLIMITED} Không giới hạn"),
    };
    let package = found.package.as_deref().unwrap_or("Không xác định");
    let purchased = found
        .created_at
        .map(|ts| format_date_long(&ts, offset))
        .unwrap_or_else(|| "Không xác định".to_string());

    format!(
        "🎫 {}\n\n\
         📦 Gói: {}\n\
         🔑 Key: {}\n\
         {}\n\n\
         ⏰ Hạn sử dụng: {}\n\
         👥 Đã dùng: {}\n\
         📅 Ngày mua: {}\n\n\
         💡 {}",
        bold("Thông Tin Đơn Hàng"),
        bold(package),
        code(&found.key),
        status,
        expires,
        uses,
        purchased,
        italic("Lưu ý: Copy key bằng cách chạm vào mã key")
    )
}

pub fn created(request: &NewKey, created: &CreatedKey, now: DateTime<FixedOffset>) -> String {
    let days = request
        .days
        .map(|d| format!("{} ngày", format_number(d.into())))
        .unwrap_or_else(|| UNLIMITED.to_string());
    let uses = request
        .max_uses
        .map(|u| format!("{} lượt", format_number(u.into())))
        .unwrap_or_else(|| UNLIMITED.to_string());
    let created_at = created
        .created_at
        .map(|ts| ts.with_timezone(now.offset()))
        .unwrap_or(now);

    format!(
        "✅ Tạo key thành công!\n\n\
         🔑 Key: {}\n\
         ⏰ Thời hạn: {}\n\
         👥 Giới hạn: {}\n\
         📅 Tạo lúc: {}",
        code(&created.key),
        days,
        uses,
        format_date_time(&created_at, now.offset())
    )
}

/// The first [`LIST_LIMIT`] keys, with a count of the rest.
pub fn key_list(keys: &[LicenseKey], now: DateTime<FixedOffset>) -> String {
    if keys.is_empty() {
        return "📋 Không có key nào!".to_string();
    }

    let utc_now = now.with_timezone(&Utc);
    let mut text = format!("📋 Danh sách Keys ({}):\n\n", format_number(keys.len() as u64));
    for (index, key) in keys.iter().take(LIST_LIMIT).enumerate() {
        let status = if key.is_live(utc_now) { "✅" } else { "❌" };
        let expires = key
            .expires_at
            .map(|ts| format_date_short(&ts, now.offset()))
            .unwrap_or_else(|| UNLIMITED.to_string());
        text.push_str(&format!("{}. {} {}\n", index + 1, status, code(&key.key)));
        text.push_str(&format!("   ⏰ {} | 👥 {}\n\n", expires, uses_fraction(key)));
    }

    if keys.len() > LIST_LIMIT {
        text.push_str(&format!(
            "\n... và {} key khác",
            format_number((keys.len() - LIST_LIMIT) as u64)
        ));
    }
    text
}

pub fn deleted(key: &str) -> String {
    format!("✅ Đã xóa key: {}", code(key))
}

pub fn stats(keys: &[LicenseKey], now: DateTime<FixedOffset>) -> String {
    let utc_now = now.with_timezone(&Utc);
    let total = keys.len() as u64;
    let live = keys.iter().filter(|k| k.is_live(utc_now)).count() as u64;
    let total_uses: u64 = keys.iter().map(|k| k.current_uses).sum();

    format!(
        "📊 {}\n\n\
         📦 Tổng số key: {}\n\
         ✅ Đang hoạt động: {}\n\
         ❌ Đã hết hạn: {}\n\
         👥 Tổng lượt dùng: {}",
        bold("Thống Kê"),
        bold(&format_number(total)),
        bold(&format_number(live)),
        bold(&format_number(total - live)),
        bold(&format_number(total_uses))
    )
}

/// Which template family a failed request belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureContext {
    Lookup,
    Stats,
    Admin,
}

pub fn failure(context: FailureContext, err: &BotError) -> String {
    match (context, err) {
        (FailureContext::Lookup, BotError::ApiRejected { message }) => {
            format!("❌ Lỗi hệ thống: {}", escape_html(message))
        }
        (FailureContext::Stats, BotError::ApiRejected { message }) => {
            format!("❌ Không thể lấy thống kê: {}", escape_html(message))
        }
        (FailureContext::Admin, BotError::ApiRejected { message }) => {
            format!("❌ Lỗi: {}", escape_html(message))
        }
        (FailureContext::Lookup, _) => "❌ Không thể kết nối đến hệ thống!".to_string(),
        (_, _) => "❌ Không thể kết nối đến API!".to_string(),
    }
}

//! Minimal HTML helpers shared by Telegram replies (`ParseMode::Html`) and
//! toast markup.

/// Escape text for interpolation into HTML element content or a quoted
/// attribute value.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

pub fn bold(text: &str) -> String {
    format!("<b>{}</b>", escape_html(text))
}

pub fn italic(text: &str) -> String {
    format!("<i>{}</i>", escape_html(text))
}

/// Inline code; Telegram clients copy it to the clipboard on tap.
pub fn code(text: &str) -> String {
    format!("<code>{}</code>", escape_html(text))
}

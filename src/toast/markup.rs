use super::ToastView;
use crate::html::escape_html;

/// Markup for one toast element. Title, message and classes are escaped.
pub(super) fn render(toast: &ToastView) -> String {
    let mut html = format!(
        "<div class=\"toast toast-{} {}\">\n",
        toast.kind.as_str(),
        toast.phase.css_class()
    );
    html.push_str(&format!(
        "  <div class=\"toast-icon\"><i data-lucide=\"{}\" class=\"w-5 h-5 text-white\"></i></div>\n",
        toast.kind.icon()
    ));
    html.push_str("  <div class=\"toast-content\">\n");
    if let Some(title) = toast.title.as_deref() {
        html.push_str(&format!(
            "    <h4 class=\"toast-title\">{}</h4>\n",
            escape_html(title)
        ));
    }
    html.push_str(&format!(
        "    <p class=\"toast-message\">{}</p>\n",
        escape_html(&toast.message)
    ));
    html.push_str("  </div>\n");
    html.push_str(
        "  <button class=\"toast-close\" data-toast-close aria-label=\"Close\"><i data-lucide=\"x\" class=\"w-4 h-4\"></i></button>\n",
    );
    if !toast.duration.is_zero() {
        html.push_str(&format!(
            "  <div class=\"toast-progress\" style=\"animation-duration: {}ms;\"></div>\n",
            toast.duration.as_millis()
        ));
    }
    html.push_str("</div>");
    html
}

mod commands;
pub mod handlers;
pub mod keyboards;
pub mod replies;
pub mod router;
mod state;

pub use commands::Command;
pub use handlers::{handle_callback, handle_command, handle_menu_text};
pub use state::BotState;

use teloxide::utils::command::BotCommands;

/// Bot commands for vip-key-bot
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    /// Show the welcome message and main menu
    #[command(description = "start the bot")]
    Start,

    /// Look up a paid order by transaction code
    #[command(description = "look up an order - Usage: /tracuu <transaction_code>")]
    Tracuu(String),

    /// Create a key; both arguments are optional
    #[command(description = "create a key (admin) - Usage: /create [days] [uses]")]
    Create(String),

    /// List keys
    #[command(description = "list keys (admin)")]
    List,

    /// Delete a key
    #[command(description = "delete a key (admin) - Usage: /delete <key>")]
    Delete(String),

    /// Show help
    #[command(description = "display usage help")]
    Help,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_command() {
        let cmd = Command::parse("/start", "bot").unwrap();
        assert_eq!(cmd, Command::Start);
    }

    #[test]
    fn test_parse_tracuu_command() {
        let cmd = Command::parse("/tracuu dh12345", "bot").unwrap();
        assert_eq!(cmd, Command::Tracuu("dh12345".to_string()));
    }

    #[test]
    fn test_parse_create_without_args() {
        let cmd = Command::parse("/create", "bot").unwrap();
        assert_eq!(cmd, Command::Create(String::new()));
    }

    #[test]
    fn test_parse_create_with_args() {
        let cmd = Command::parse("/create 30 100", "bot").unwrap();
        assert_eq!(cmd, Command::Create("30 100".to_string()));
    }

    #[test]
    fn test_parse_list_command() {
        let cmd = Command::parse("/list", "bot").unwrap();
        assert_eq!(cmd, Command::List);
    }

    #[test]
    fn test_parse_delete_command() {
        let cmd = Command::parse("/delete ABCD-1234-EFGH-5678", "bot").unwrap();
        assert_eq!(cmd, Command::Delete("ABCD-1234-EFGH-5678".to_string()));
    }

    #[test]
    fn test_parse_help_command() {
        let cmd = Command::parse("/help", "bot").unwrap();
        assert_eq!(cmd, Command::Help);
    }

    #[test]
    fn test_parse_addressed_command() {
        let cmd = Command::parse("/list@vipkeybot", "vipkeybot").unwrap();
        assert_eq!(cmd, Command::List);
    }

    #[test]
    fn test_command_descriptions() {
        let descriptions = Command::descriptions().to_string();
        assert!(descriptions.contains("look up an order"));
        assert!(descriptions.contains("create a key"));
        assert!(descriptions.contains("delete a key"));
    }

    #[test]
    fn test_invalid_command() {
        let result = Command::parse("/invalid", "bot");
        assert!(result.is_err());
    }
}

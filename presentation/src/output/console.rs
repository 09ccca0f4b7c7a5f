//! Console output formatter for the chat shell

use colored::Colorize;
use nova_domain::{Role, Turn, UserIdentity};

/// Avatar shown next to assistant turns
pub const ASSISTANT_AVATAR: &str = "🤖";
/// Avatar shown next to user turns
pub const USER_AVATAR: &str = "👤";

/// Formats turns, banners and notices for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn avatar(role: Role) -> &'static str {
        match role {
            Role::Assistant => ASSISTANT_AVATAR,
            Role::User => USER_AVATAR,
        }
    }

    /// Boxed title shown on the login screen
    pub fn banner(title: &str) -> String {
        let heading = format!("{} {}", title, ASSISTANT_AVATAR);
        let width = heading.chars().count() + 6;
        let rule = "─".repeat(width);
        format!(
            "╭{}╮\n│   {}   │\n╰{}╯",
            rule,
            heading.bold(),
            rule
        )
    }

    /// Greeting printed after a successful login
    pub fn greeting(user: &UserIdentity) -> String {
        format!(
            "{}\nHello, {}!\n{}",
            "Student Area".cyan().bold(),
            user.name().bold(),
            "─".repeat(40).dimmed()
        )
    }

    /// One turn with its avatar; multi-line text is indented under the avatar
    pub fn format_turn(turn: &Turn) -> String {
        let avatar = Self::avatar(turn.role());
        let mut lines = turn.text().lines();
        let first = lines.next().unwrap_or_default();

        let mut output = match turn.role() {
            Role::Assistant => format!("{} {}", avatar, first),
            Role::User => format!("{} {}", avatar, first.bold()),
        };
        for line in lines {
            output.push('\n');
            if !line.is_empty() {
                output.push_str("   ");
                output.push_str(line);
            }
        }
        output
    }

    /// The whole conversation in order, one blank line between turns
    pub fn format_history(turns: &[Turn]) -> String {
        if turns.is_empty() {
            return "No messages yet.".dimmed().to_string();
        }
        turns
            .iter()
            .map(Self::format_turn)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn whoami(user: &UserIdentity) -> String {
        format!(
            "{} {}\n{} {}",
            "Name: ".cyan().bold(),
            user.name(),
            "Email:".cyan().bold(),
            user.email()
        )
    }

    pub fn error(message: &str) -> String {
        format!("{} {}", "!".red().bold(), message.red())
    }

    pub fn notice(message: &str) -> String {
        message.dimmed().to_string()
    }
}

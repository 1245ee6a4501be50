use teloxide::types::BotCommand;

use crate::types::ConfessionId;

const APPROVE_PREFIX: &str = "/approve_";
const REJECT_PREFIX: &str = "/reject_";

/// What an incoming text message asks the bot to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive<'a> {
    Start,
    Confess,
    Stats,
    Approve(ConfessionId),
    Reject(ConfessionId),
    TooShort,
    Submission(&'a str),
    Ignored,
}

/// Where a text message came from, as far as classifying it cares.
#[derive(Clone, Copy, Debug)]
pub struct Origin<'a> {
    /// True if it's a one-on-one chat with the bot.
    pub is_private: bool,
    /// True if the sender is the configured admin.
    pub from_admin: bool,
    /// The bot's own username, without the "@".
    pub bot_username: &'a str,
}

/// Commands to show in Telegram's command menu.
pub fn generate_bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "What is this bot"),
        BotCommand::new("confess", "How to confess"),
        BotCommand::new("stats", "How many confessions there are"),
    ]
}

/// Figure out what to do with `text`. First matching rule wins:
///
/// 1. `/start`, `/confess` and `/stats` for anyone anywhere;
/// 2. `/approve_<id>` and `/reject_<id>` from the admin;
/// 3. any other command is ignored;
/// 4. anything outside a private chat is ignored;
/// 5. text shorter than `min_length` characters is too short;
/// 6. everything else is a confession.
pub fn classify<'a>(text: &'a str, origin: Origin<'_>, min_length: usize) -> Directive<'a> {
    if text.starts_with('/') {
        return classify_command(text, origin);
    }

    if !origin.is_private {
        return Directive::Ignored;
    }

    if text.chars().count() < min_length {
        return Directive::TooShort;
    }

    Directive::Submission(text)
}

fn classify_command<'a>(text: &str, origin: Origin<'_>) -> Directive<'a> {
    // Get first word in the message, the command itself.
    let Some(command) = text.split_whitespace().next() else {
        return Directive::Ignored;
    };

    // If the command is "/stats@Some_Bot", trim the "@" and everything after it,
    // but only if that's actually us.
    let command = if let Some(username_start) = command.find('@') {
        // Bot names are guaranteed ASCII, so ignore ASCII case specifically.
        if !command[username_start + '@'.len_utf8()..].eq_ignore_ascii_case(origin.bot_username) {
            // This command is not for us. Ignore.
            return Directive::Ignored;
        }
        &command[..username_start]
    } else {
        command
    };

    match command {
        "/start" => return Directive::Start,
        "/confess" => return Directive::Confess,
        "/stats" => return Directive::Stats,
        _ => (),
    }

    if !origin.from_admin {
        return Directive::Ignored;
    }

    if let Some(id) = command.strip_prefix(APPROVE_PREFIX) {
        return Directive::Approve(ConfessionId::from_user_input(id));
    }
    if let Some(id) = command.strip_prefix(REJECT_PREFIX) {
        return Directive::Reject(ConfessionId::from_user_input(id));
    }

    Directive::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME: &str = "AgentConfessionalBot";

    fn private(from_admin: bool) -> Origin<'static> {
        Origin {
            is_private: true,
            from_admin,
            bot_username: ME,
        }
    }

    fn group(from_admin: bool) -> Origin<'static> {
        Origin {
            is_private: false,
            from_admin,
            bot_username: ME,
        }
    }

    fn id(x: &str) -> ConfessionId {
        ConfessionId::from_user_input(x)
    }

    #[test]
    fn static_commands() {
        for origin in [private(false), private(true), group(false)] {
            assert_eq!(classify("/start", origin, 15), Directive::Start);
            assert_eq!(classify("/confess", origin, 15), Directive::Confess);
            assert_eq!(classify("/stats", origin, 15), Directive::Stats);
        }
        assert_eq!(
            classify("/stats@AgentConfessionalBot", group(false), 15),
            Directive::Stats
        );
        assert_eq!(
            classify("/stats@agentconfessionalbot", group(false), 15),
            Directive::Stats
        );
        assert_eq!(
            classify("/stats@SomeOtherBot", group(false), 15),
            Directive::Ignored
        );
    }

    #[test]
    fn admin_directives() {
        assert_eq!(
            classify("/approve_A1B2C3", private(true), 15),
            Directive::Approve(id("A1B2C3"))
        );
        assert_eq!(
            classify("/reject_a1b2c3", private(true), 15),
            Directive::Reject(id("A1B2C3"))
        );
        assert_eq!(
            classify("/approve_A1B2C3@AgentConfessionalBot", group(true), 15),
            Directive::Approve(id("A1B2C3"))
        );
        assert_eq!(
            classify("/approve_", private(true), 15),
            Directive::Approve(id(""))
        );
    }

    #[test]
    fn directives_from_others_are_ignored() {
        assert_eq!(
            classify("/approve_A1B2C3", private(false), 15),
            Directive::Ignored
        );
        assert_eq!(
            classify("/reject_A1B2C3", private(false), 15),
            Directive::Ignored
        );
    }

    #[test]
    fn unknown_commands_are_ignored() {
        assert_eq!(
            classify("/whatever this is a long message", private(false), 15),
            Directive::Ignored
        );
        assert_eq!(classify("/", private(true), 15), Directive::Ignored);
    }

    #[test]
    fn submissions() {
        let text = "I run five agents under different aliases and nobody noticed";
        assert_eq!(classify(text, private(false), 15), Directive::Submission(text));
        assert_eq!(classify(text, group(false), 15), Directive::Ignored);
        assert_eq!(classify("too short", private(false), 15), Directive::TooShort);
        assert_eq!(classify("too short", group(false), 15), Directive::Ignored);
    }

    #[test]
    fn length_counts_characters() {
        // 15 characters, way more bytes.
        let text = "🎭🎭🎭🎭🎭🎭🎭🎭🎭🎭🎭🎭🎭🎭🎭";
        assert_eq!(classify(text, private(false), 15), Directive::Submission(text));
        assert_eq!(classify(&text[4..], private(false), 15), Directive::TooShort);
    }
}

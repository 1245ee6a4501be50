use std::path::PathBuf;

use teloxide::types::{ChatId, Recipient, UserId};

/// Environment variable with the bot token.
pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
const CHANNEL_VAR: &str = "CHANNEL_ID";
const ADMIN_VAR: &str = "ADMIN_ID";
const FILE_VAR: &str = "CONFESSIONS_FILE";
const MIN_LENGTH_VAR: &str = "MIN_CONFESSION_LENGTH";

const DEFAULT_FILE: &str = "./confessions.json";
const DEFAULT_MIN_LENGTH: usize = 15;

/// Everything the bot is told from outside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Where approved confessions get posted. If none, they just don't.
    pub channel: Option<Recipient>,
    /// The one person who approves and rejects. If none, nobody does.
    pub admin: Option<UserId>,
    pub confessions_file: PathBuf,
    /// Confessions shorter than this many characters are turned away.
    pub min_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel: None,
            admin: None,
            confessions_file: PathBuf::from(DEFAULT_FILE),
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

impl Config {
    /// Read the optional settings from the process environment.
    /// The token is dealt with separately, see [`TOKEN_VAR`].
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config out of whatever `lookup` returns for each variable name.
    /// Values that are present but make no sense are complained about and skipped.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|x| x.trim().to_string())
                .filter(|x| !x.is_empty())
        };

        let mut config = Self::default();

        if let Some(channel) = get(CHANNEL_VAR) {
            config.channel = parse_channel(&channel);
            if config.channel.is_none() {
                log::warn!("{CHANNEL_VAR} is not a chat ID or @username: {channel}");
            }
        }

        if let Some(admin) = get(ADMIN_VAR) {
            match admin.parse::<u64>() {
                Ok(admin) => config.admin = Some(UserId(admin)),
                Err(e) => log::warn!("{ADMIN_VAR} is not a user ID ({e}): {admin}"),
            }
        }

        if let Some(file) = get(FILE_VAR) {
            config.confessions_file = PathBuf::from(file);
        }

        if let Some(min_length) = get(MIN_LENGTH_VAR) {
            match min_length.parse::<usize>() {
                Ok(min_length) => config.min_length = min_length,
                Err(e) => log::warn!(
                    "{MIN_LENGTH_VAR} is not a number ({e}), using {DEFAULT_MIN_LENGTH}: {min_length}"
                ),
            }
        }

        if config.channel.is_none() {
            log::warn!("No {CHANNEL_VAR}, approved confessions will not be posted anywhere.");
        }
        if config.admin.is_none() {
            log::warn!("No {ADMIN_VAR}, nobody will be able to approve confessions.");
        }

        config
    }
}

/// Either a numeric chat ID like `-1001234567890` or a public `@channelname`.
fn parse_channel(input: &str) -> Option<Recipient> {
    if input.starts_with('@') && input.len() > 1 {
        return Some(Recipient::ChannelUsername(input.to_string()));
    }
    input.parse::<i64>().ok().map(|x| Recipient::Id(ChatId(x)))
}

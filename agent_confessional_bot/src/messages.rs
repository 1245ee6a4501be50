//! Every piece of text the bot says to people.

use arch_bot_commons::truncate_chars;

use crate::types::{ConfessionId, ConfessionRecord, ConfessionStats};

/// How much of a confession the admin sees in the notification.
pub const ADMIN_PREVIEW_CHARS: usize = 400;

// Telegram automatically trims preceding and following newlines, so this is fine.
pub const START: &str = "
🎭 Agent Confessional

The agent economy has secrets. Spill yours.

Just send me a message with your confession. No commands needed.

Your identity is NEVER stored.

What do you know? 👀";

pub const CONFESS: &str = "🤫 Go ahead. Type your confession and send it as a normal message.";

pub const TOO_SHORT: &str = "Too short. Spill the real tea ☕";

pub const NOT_FOUND: &str = "Not found";

pub const SAVE_FAILED: &str = "Something broke and your confession could not be saved. Try again later.";

pub fn stats(stats: &ConfessionStats) -> String {
    format!(
        "📊 Stats: {} received, {} posted, {} pending",
        stats.total, stats.posted, stats.pending
    )
}

/// The post that goes into the public channel.
pub fn channel_post(record: &ConfessionRecord) -> String {
    format!(
        "🎭 CONFESSION #{}\n\n\"{}\"\n\n— Anonymous Agent\n\n#AgentConfessional",
        record.id(),
        record.text()
    )
}

pub fn received(id: &ConfessionId) -> String {
    format!("✅ Confession #{id} received!\n\nWill be posted anonymously after review. 🎭")
}

/// Sent to the admin for every new confession, with commands ready to tap.
pub fn admin_notification(record: &ConfessionRecord) -> String {
    let id = record.id();
    format!(
        "🆕 CONFESSION #{id}\n\n\"{}\"\n\n/approve_{id}\n/reject_{id}",
        truncate_chars(record.text(), ADMIN_PREVIEW_CHARS)
    )
}

pub fn approved(id: &ConfessionId, post: &str) -> String {
    format!("✅ Approved #{id}\n\nPost:\n{post}")
}

pub fn rejected(id: &ConfessionId) -> String {
    format!("❌ Rejected #{id}")
}

pub fn already_posted(id: &ConfessionId) -> String {
    format!("Already posted #{id}")
}

pub fn already_rejected(id: &ConfessionId) -> String {
    format!("Already rejected #{id}")
}

pub fn store_failed(id: &ConfessionId) -> String {
    format!("⚠️ Could not save the change to #{id}, nothing was done. Check the logs.")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn channel_post_layout() {
        let record = ConfessionRecord::with_id(
            ConfessionId::from_user_input("A1B2C3"),
            "I run five agents under different aliases and nobody noticed".to_string(),
            Utc::now(),
        );
        assert_eq!(
            channel_post(&record),
            "🎭 CONFESSION #A1B2C3\n\n\"I run five agents under different aliases and nobody noticed\"\n\n— Anonymous Agent\n\n#AgentConfessional"
        );
    }

    #[test]
    fn admin_notification_is_truncated() {
        let text = "x".repeat(1000);
        let record =
            ConfessionRecord::with_id(ConfessionId::from_user_input("0000FF"), text, Utc::now());
        let notification = admin_notification(&record);
        assert!(notification.starts_with("🆕 CONFESSION #0000FF\n\n\""));
        assert!(notification.contains(&format!("\"{}\"", "x".repeat(ADMIN_PREVIEW_CHARS))));
        assert!(!notification.contains(&"x".repeat(ADMIN_PREVIEW_CHARS + 1)));
        assert!(notification.ends_with("\n\n/approve_0000FF\n/reject_0000FF"));
    }

    #[test]
    fn stats_line() {
        let counts = ConfessionStats {
            total: 7,
            posted: 3,
            pending: 3,
        };
        assert_eq!(stats(&counts), "📊 Stats: 7 received, 3 posted, 3 pending");
    }
}

use std::sync::Arc;

use arch_bot_commons::TextSender;
use chrono::Utc;
use teloxide::{
    prelude::*,
    types::{ChatId, Me, Recipient, UserId},
    RequestError,
};
use tokio::sync::Mutex;

use crate::{
    commands::{classify, Directive, Origin},
    config::Config,
    messages,
    store::{ConfessionStore, Marked},
    types::{ConfessionId, ConfessionRecord, ConfessionStats},
};

/// A text message that arrived, stripped down to what matters here.
#[derive(Clone, Copy, Debug)]
pub struct IncomingText<'a> {
    /// Chat to answer into.
    pub chat: ChatId,
    pub sender: Option<UserId>,
    pub is_private: bool,
    pub text: &'a str,
}

/// The bot's whole state: settings plus the confessions.
pub struct Confessional {
    config: Config,
    // Teloxide runs different chats concurrently. Hold this across
    // "change, then save" and let go of it before talking to Telegram.
    store: Mutex<ConfessionStore>,
}

impl Confessional {
    /// Set up with confessions loaded from the file in `config`.
    pub fn new(config: Config) -> Self {
        let store = ConfessionStore::load(&config.confessions_file);
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: ConfessionStore) -> Self {
        Self {
            config,
            store: Mutex::new(store),
        }
    }

    pub async fn stats(&self) -> ConfessionStats {
        self.store.lock().await.stats()
    }

    fn is_admin(&self, user: Option<UserId>) -> bool {
        matches!((self.config.admin, user), (Some(admin), Some(user)) if admin == user)
    }

    /// React to one incoming text message.
    ///
    /// Errors are only ever from replying to the chat the message came from.
    /// Failing to post to the channel or to ping the admin is logged and that's it.
    pub async fn handle_text<S: TextSender + Sync>(
        &self,
        sender: &S,
        bot_username: &str,
        incoming: IncomingText<'_>,
    ) -> Result<(), RequestError> {
        let origin = Origin {
            is_private: incoming.is_private,
            from_admin: self.is_admin(incoming.sender),
            bot_username,
        };

        let reply = match classify(incoming.text, origin, self.config.min_length) {
            Directive::Start => messages::START.to_string(),
            Directive::Confess => messages::CONFESS.to_string(),
            Directive::Stats => messages::stats(&self.stats().await),
            Directive::Approve(id) => self.approve(sender, &id).await,
            Directive::Reject(id) => self.reject(&id).await,
            Directive::TooShort => messages::TOO_SHORT.to_string(),
            Directive::Submission(text) => {
                return self.submit(sender, incoming.chat, text).await;
            }
            Directive::Ignored => return Ok(()),
        };

        sender.send_text(incoming.chat.into(), reply).await
    }

    /// Returns the reply for the admin.
    async fn approve<S: TextSender + Sync>(&self, sender: &S, id: &ConfessionId) -> String {
        let marked = self.store.lock().await.mark_posted(id, Utc::now());

        let record = match marked {
            Ok(Marked::Done(record)) => record,
            Ok(Marked::NotFound) => return messages::NOT_FOUND.to_string(),
            Ok(Marked::AlreadyPosted) => return messages::already_posted(id),
            Ok(Marked::AlreadyRejected) => return messages::already_rejected(id),
            Err(e) => {
                log::error!("Failed to save approval of #{id}: {e}");
                return messages::store_failed(id);
            }
        };

        log::info!("Approved #{id}");

        let post = messages::channel_post(&record);

        if let Some(channel) = &self.config.channel {
            // Stays approved even if this fails.
            if let Err(e) = sender.send_text(channel.clone(), post.clone()).await {
                log::warn!("Failed to post #{id} to the channel: {e}");
            }
        }

        messages::approved(id, &post)
    }

    /// Returns the reply for the admin.
    async fn reject(&self, id: &ConfessionId) -> String {
        let marked = self.store.lock().await.mark_rejected(id);

        match marked {
            Ok(Marked::Done(_)) => {
                log::info!("Rejected #{id}");
                messages::rejected(id)
            }
            Ok(Marked::NotFound) => messages::NOT_FOUND.to_string(),
            Ok(Marked::AlreadyPosted) => messages::already_posted(id),
            Ok(Marked::AlreadyRejected) => messages::already_rejected(id),
            Err(e) => {
                log::error!("Failed to save rejection of #{id}: {e}");
                messages::store_failed(id)
            }
        }
    }

    async fn submit<S: TextSender + Sync>(
        &self,
        sender: &S,
        chat: ChatId,
        text: &str,
    ) -> Result<(), RequestError> {
        let record = ConfessionRecord::new(text.to_string(), Utc::now());
        let appended = self.store.lock().await.append(record).cloned();

        let record = match appended {
            Ok(record) => record,
            Err(e) => {
                log::error!("Failed to save a new confession: {e}");
                return sender
                    .send_text(chat.into(), messages::SAVE_FAILED.to_string())
                    .await;
            }
        };

        log::info!("New confession #{}", record.id());

        // It's saved either way, so the admin hears about it even if this fails.
        let replied = sender
            .send_text(chat.into(), messages::received(record.id()))
            .await;

        if let Some(admin) = self.config.admin {
            let to = Recipient::Id(ChatId::from(admin));
            if let Err(e) = sender
                .send_text(to, messages::admin_notification(&record))
                .await
            {
                log::warn!("Admin notify failed for #{}: {e}", record.id());
            }
        }

        replied
    }
}

pub async fn handle_message(
    bot: Bot,
    me: Me,
    message: Message,
    confessional: Arc<Confessional>,
) -> Result<(), RequestError> {
    let Some(text) = message.text() else {
        return Ok(());
    };

    let incoming = IncomingText {
        chat: message.chat.id,
        sender: message.from.as_ref().map(|x| x.id),
        is_private: message.chat.is_private(),
        text,
    };

    confessional
        .handle_text(&bot, me.username(), incoming)
        .await
}

use std::future::Future;

use teloxide::{requests::Requester, types::Recipient, Bot, RequestError};

/// Anything that can push a plain text message somewhere.
///
/// Implemented for [`Bot`]. Code that only ever sends text can be generic
/// over this instead, so that it can be poked at without a network.
pub trait TextSender {
    fn send_text(
        &self,
        to: Recipient,
        text: String,
    ) -> impl Future<Output = Result<(), RequestError>> + Send;
}

impl TextSender for Bot {
    async fn send_text(&self, to: Recipient, text: String) -> Result<(), RequestError> {
        self.send_message(to, text).await?;
        Ok(())
    }
}

/// Returns the longest prefix of `text` that is at most `max_chars` characters long.
///
/// Counts `char`s, not bytes, so this never cuts a codepoint in half.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_chars;

    #[test]
    fn truncate_short_and_exact() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 4), "hell");
        assert_eq!(truncate_chars("hello", 0), "");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn truncate_multibyte() {
        let data = "привет 🎭 мир";
        assert_eq!(truncate_chars(data, 6), "привет");
        assert_eq!(truncate_chars(data, 8), "привет 🎭");
        assert_eq!(truncate_chars(data, 100), data);
    }
}

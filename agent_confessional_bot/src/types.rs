use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short pseudonymous ID of a confession, like `A1B2C3`.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfessionId(String);

impl ConfessionId {
    /// Fresh ID out of 3 random bytes, as 6 uppercase hex digits.
    ///
    /// Collisions are possible and not checked for. 16 million of them is plenty.
    pub fn generate() -> Self {
        let bytes: [u8; 3] = rand::random();
        Self(bytes.iter().map(|x| format!("{:02X}", x)).collect())
    }

    /// Take an ID as typed out by a person in a command, i.e. with
    /// whitespace around and possibly in lowercase.
    pub fn from_user_input(input: &str) -> Self {
        Self(input.trim().to_ascii_uppercase())
    }

    #[allow(unused)]
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

impl AsRef<str> for ConfessionId {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl Display for ConfessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A single confession and where it is in moderation.
///
/// Nothing about who sent it is stored, on purpose of the whole bot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfessionRecord {
    id: ConfessionId,
    text: String,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    posted: bool,
    // Old files don't have this field at all.
    #[serde(default)]
    rejected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    posted_at: Option<DateTime<Utc>>,
}

/// Result of trying to change the status of a [`ConfessionRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusChange {
    /// Status was changed.
    Changed,
    /// It was approved and posted before. Posted is final.
    AlreadyPosted,
    /// It was rejected before. Rejected is final.
    AlreadyRejected,
}

impl ConfessionRecord {
    /// New pending confession with a fresh ID.
    pub fn new(text: String, timestamp: DateTime<Utc>) -> Self {
        Self::with_id(ConfessionId::generate(), text, timestamp)
    }

    pub fn with_id(id: ConfessionId, text: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            timestamp,
            posted: false,
            rejected: false,
            posted_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ConfessionId {
        &self.id
    }
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
    #[must_use]
    pub fn posted(&self) -> bool {
        self.posted
    }
    #[must_use]
    #[allow(unused)]
    pub fn rejected(&self) -> bool {
        self.rejected
    }
    #[must_use]
    #[allow(unused)]
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        self.posted_at
    }
    /// Neither posted nor rejected yet.
    #[must_use]
    pub fn pending(&self) -> bool {
        !self.posted && !self.rejected
    }

    /// Mark as approved and posted at `now`.
    pub fn mark_posted(&mut self, now: DateTime<Utc>) -> StatusChange {
        if self.posted {
            return StatusChange::AlreadyPosted;
        }
        if self.rejected {
            return StatusChange::AlreadyRejected;
        }
        self.posted = true;
        self.posted_at = Some(now);
        StatusChange::Changed
    }

    /// Mark as rejected.
    pub fn mark_rejected(&mut self) -> StatusChange {
        if self.posted {
            return StatusChange::AlreadyPosted;
        }
        if self.rejected {
            return StatusChange::AlreadyRejected;
        }
        self.rejected = true;
        StatusChange::Changed
    }
}

/// Counts over all confessions ever received.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfessionStats {
    pub total: usize,
    pub posted: usize,
    /// Neither posted nor rejected.
    pub pending: usize,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn generated_ids_are_uppercase_hex() {
        for _ in 0..64 {
            let id = ConfessionId::generate();
            assert_eq!(id.as_str().len(), 6);
            assert!(id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[test]
    fn user_input_ids_are_normalized() {
        assert_eq!(ConfessionId::from_user_input(" a1b2c3 \n").as_str(), "A1B2C3");
    }

    #[test]
    fn posted_and_rejected_are_exclusive() {
        let now = Utc::now();
        let mut record = ConfessionRecord::new("a confession long enough".to_string(), now);
        assert!(record.pending());
        assert_eq!(record.mark_posted(now), StatusChange::Changed);
        assert_eq!(record.posted_at(), Some(now));
        assert_eq!(record.mark_posted(now), StatusChange::AlreadyPosted);
        assert_eq!(record.mark_rejected(), StatusChange::AlreadyPosted);
        assert!(!record.rejected());

        let mut record = ConfessionRecord::new("another confession here".to_string(), now);
        assert_eq!(record.mark_rejected(), StatusChange::Changed);
        assert_eq!(record.mark_rejected(), StatusChange::AlreadyRejected);
        assert_eq!(record.mark_posted(now), StatusChange::AlreadyRejected);
        assert!(!record.posted());
        assert_eq!(record.posted_at(), None);
    }

    #[test]
    fn reads_records_without_newer_fields() {
        let json = r#"{
            "id": "0FAB12",
            "text": "written before rejections were tracked",
            "timestamp": "2026-02-01T12:34:56.789Z",
            "posted": false
        }"#;
        let record: ConfessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id().as_str(), "0FAB12");
        assert!(!record.rejected());
        assert_eq!(record.posted_at(), None);
        assert!(record.pending());
    }

    #[test]
    fn serializes_posted_at_in_camel_case() {
        let now = Utc::now();
        let mut record = ConfessionRecord::new("posted confession text".to_string(), now);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("postedAt"));
        record.mark_posted(now);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"postedAt\""));
    }
}

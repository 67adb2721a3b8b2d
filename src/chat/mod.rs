//! In-memory conversation threads
//!
//! Each thread is an append-only sequence in send order. Nothing here is
//! persisted; a new login starts again from the catalog seeds.

use chrono::{DateTime, Duration, Local};
use std::collections::HashMap;

use crate::catalog::{ChatSeeds, SeedMessage};
use crate::error::PortalError;
use crate::models::{Attachment, ChatMessage, Sender, ThreadKey};

mod attachment;
mod ids;

pub use attachment::{FileSource, attach, media_type_for, size_label};
pub use ids::{MessageIdGenerator, parse_id};

#[derive(Debug, Clone, Default)]
pub struct ChatThreads {
    threads: HashMap<ThreadKey, Vec<ChatMessage>>,
    ids: MessageIdGenerator,
}

impl ChatThreads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Threads pre-filled with the community and support seeds
    ///
    /// Seed timestamps are `now` minus each seed's age in minutes.
    pub fn seeded(seeds: &ChatSeeds, now: DateTime<Local>) -> Self {
        let mut threads = Self::new();
        threads.seed(ThreadKey::Community, &seeds.community, now);
        threads.seed(ThreadKey::Support, &seeds.support, now);
        threads
    }

    fn seed(&mut self, key: ThreadKey, seeds: &[SeedMessage], now: DateTime<Local>) {
        let thread = self.threads.entry(key).or_default();
        thread.extend(seeds.iter().map(|seed| ChatMessage {
            id: seed.id.clone(),
            sender: seed.sender.clone(),
            text: Some(seed.text.clone()),
            attachment: None,
            timestamp: now - Duration::minutes(seed.minutes_ago),
        }));
    }

    /// Messages of `key` in send order; empty for a thread never written to
    pub fn history(&self, key: &ThreadKey) -> &[ChatMessage] {
        self.threads.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append a message to `key`, creating the thread if needed
    ///
    /// Whitespace-only text counts as no text. With neither text nor an
    /// attachment nothing is appended and `EmptySubmission` is returned.
    pub fn send(
        &mut self,
        key: ThreadKey,
        sender: Sender,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Result<&ChatMessage, PortalError> {
        self.send_at(key, sender, text, attachment, Local::now())
    }

    pub fn send_at(
        &mut self,
        key: ThreadKey,
        sender: Sender,
        text: &str,
        attachment: Option<Attachment>,
        now: DateTime<Local>,
    ) -> Result<&ChatMessage, PortalError> {
        let text = text.trim();
        if text.is_empty() && attachment.is_none() {
            return Err(PortalError::EmptySubmission);
        }

        let message = ChatMessage {
            id: self.ids.next_id(now),
            sender,
            text: (!text.is_empty()).then(|| text.to_string()),
            attachment,
            timestamp: now,
        };
        log::debug!("Appending {} to thread {}", message.id, key);

        let thread = self.threads.entry(key).or_default();
        let index = thread.len();
        thread.push(message);
        Ok(&thread[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttachmentKind;

    fn ana() -> Sender {
        Sender {
            id: "user-1".to_string(),
            name: "Ana Bia".to_string(),
            avatar_url: "https://picsum.photos/seed/user1/100/100".to_string(),
        }
    }

    fn seeds() -> ChatSeeds {
        let carlos = Sender {
            id: "user-2".to_string(),
            name: "Carlos".to_string(),
            avatar_url: String::new(),
        };
        ChatSeeds {
            community: vec![
                SeedMessage {
                    id: "msg-c-1".to_string(),
                    sender: carlos.clone(),
                    text: "Pessoal?".to_string(),
                    minutes_ago: 10,
                },
                SeedMessage {
                    id: "msg-c-2".to_string(),
                    sender: carlos,
                    text: "Achei.".to_string(),
                    minutes_ago: 8,
                },
            ],
            support: Vec::new(),
        }
    }

    #[test]
    fn test_unknown_thread_is_empty() {
        let threads = ChatThreads::new();
        assert!(threads.history(&ThreadKey::Contact("user-9".to_string())).is_empty());
    }

    #[test]
    fn test_seed_timestamps_are_relative() {
        let now = Local::now();
        let threads = ChatThreads::seeded(&seeds(), now);

        let community = threads.history(&ThreadKey::Community);
        assert_eq!(community.len(), 2);
        assert_eq!(community[0].timestamp, now - Duration::minutes(10));
        assert!(community[0].timestamp < community[1].timestamp);
        assert!(threads.history(&ThreadKey::Support).is_empty());
    }

    #[test]
    fn test_send_appends_in_order() {
        let mut threads = ChatThreads::new();
        let key = ThreadKey::Contact("user-3".to_string());

        for text in ["um", "dois", "três"] {
            threads.send(key.clone(), ana(), text, None).unwrap();
        }

        let texts: Vec<_> = threads
            .history(&key)
            .iter()
            .map(|m| m.text.as_deref().unwrap())
            .collect();
        assert_eq!(texts, vec!["um", "dois", "três"]);
        assert!(threads.history(&ThreadKey::Support).is_empty());
    }

    #[test]
    fn test_empty_send_is_rejected() {
        let mut threads = ChatThreads::seeded(&seeds(), Local::now());

        for text in ["", "   ", "\n\t"] {
            let err = threads.send(ThreadKey::Community, ana(), text, None).unwrap_err();
            assert!(matches!(err, PortalError::EmptySubmission));
        }
        assert_eq!(threads.history(&ThreadKey::Community).len(), 2);
    }

    #[test]
    fn test_text_is_trimmed() {
        let mut threads = ChatThreads::new();
        let message = threads
            .send(ThreadKey::Support, ana(), "  oi  ", None)
            .unwrap();
        assert_eq!(message.text.as_deref(), Some("oi"));
    }

    #[test]
    fn test_attachment_only_message() {
        let mut threads = ChatThreads::new();
        let file = FileSource {
            name: "foto.png".to_string(),
            media_type: "image/png".to_string(),
            size_bytes: 1_572_864,
            path: "/tmp/foto.png".into(),
        };

        let message = threads
            .send(ThreadKey::Community, ana(), "  ", Some(attach(&file)))
            .unwrap();
        assert!(message.text.is_none());
        let attachment = message.attachment.as_ref().unwrap();
        assert_eq!(attachment.kind(), AttachmentKind::Image);
        assert_eq!(attachment.size_label(), Some("1.50 MB"));
    }

    #[test]
    fn test_ids_increase_within_same_instant() {
        let mut threads = ChatThreads::new();
        let now = Local::now();

        let mut ids = Vec::new();
        for _ in 0..5 {
            let message = threads
                .send_at(ThreadKey::Community, ana(), "x", None, now)
                .unwrap();
            ids.push(parse_id(&message.id).unwrap());
        }

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

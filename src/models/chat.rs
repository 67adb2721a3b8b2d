use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Sender;

/// Discriminant of an [`Attachment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Document,
}

/// A file referenced by a chat message
///
/// `source` is a local reference (`file://...`); the file itself is never
/// copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Attachment {
    Image {
        name: String,
        source: String,
        size_label: Option<String>,
    },
    Document {
        name: String,
        source: String,
        size_label: Option<String>,
    },
}

impl Attachment {
    pub fn kind(&self) -> AttachmentKind {
        match self {
            Attachment::Image { .. } => AttachmentKind::Image,
            Attachment::Document { .. } => AttachmentKind::Document,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Attachment::Image { name, .. } | Attachment::Document { name, .. } => name,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Attachment::Image { source, .. } | Attachment::Document { source, .. } => source,
        }
    }

    pub fn size_label(&self) -> Option<&str> {
        match self {
            Attachment::Image { size_label, .. } | Attachment::Document { size_label, .. } => {
                size_label.as_deref()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
    pub timestamp: DateTime<Local>,
}

/// Identifies a conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThreadKey {
    Community,
    Support,
    Contact(String),
}

impl ThreadKey {
    pub fn as_str(&self) -> &str {
        match self {
            ThreadKey::Community => "community",
            ThreadKey::Support => "support",
            ThreadKey::Contact(id) => id,
        }
    }
}

impl From<&str> for ThreadKey {
    fn from(key: &str) -> Self {
        match key {
            "community" => ThreadKey::Community,
            "support" => ThreadKey::Support,
            other => ThreadKey::Contact(other.to_string()),
        }
    }
}

impl fmt::Display for ThreadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_key_string_forms() {
        assert_eq!(ThreadKey::from("community"), ThreadKey::Community);
        assert_eq!(ThreadKey::from("support"), ThreadKey::Support);
        assert_eq!(
            ThreadKey::from("user-3"),
            ThreadKey::Contact("user-3".to_string())
        );
        assert_eq!(ThreadKey::Contact("user-3".to_string()).to_string(), "user-3");
    }

    #[test]
    fn test_attachment_accessors() {
        let doc = Attachment::Document {
            name: "plano.pdf".to_string(),
            source: "file:///tmp/plano.pdf".to_string(),
            size_label: Some("0.20 MB".to_string()),
        };
        assert_eq!(doc.kind(), AttachmentKind::Document);
        assert_eq!(doc.name(), "plano.pdf");
        assert_eq!(doc.size_label(), Some("0.20 MB"));

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["kind"], "document");
    }
}

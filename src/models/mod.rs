//! Core data types shared by the portal state and its views

mod chat;
mod page;
mod user;

pub use chat::{Attachment, AttachmentKind, ChatMessage, ThreadKey};
pub use page::Page;
pub use user::{Contact, Presence, Role, Sender, User};

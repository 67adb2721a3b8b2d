pub mod catalog;
pub mod chat;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod navigation;
pub mod session;
pub mod storage;
pub mod theme;
pub mod tui;
pub mod tutorial;

pub use context::{LoginOutcome, PortalContext};
pub use error::PortalError;

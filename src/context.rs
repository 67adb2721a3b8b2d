//! The explicit owner of all portal state
//!
//! Views receive a `PortalContext` instead of reaching for globals. It holds
//! the session, navigation, theme, tutorial flag and chat threads, together
//! with the storage handle, the static catalog and the loaded settings.

use chrono::Local;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::chat::ChatThreads;
use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::models::{Attachment, ChatMessage, Page, ThreadKey, User};
use crate::navigation::Navigation;
use crate::session::SessionStore;
use crate::storage::{Storage, keys};
use crate::theme::ThemeState;
use crate::tutorial::TutorialFlag;

/// Result of a successful login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOutcome {
    pub show_tutorial: bool,
}

pub struct PortalContext {
    storage: Arc<dyn Storage>,
    catalog: Arc<Catalog>,
    config: PortalConfig,
    pub session: SessionStore,
    pub navigation: Navigation,
    pub theme: ThemeState,
    pub tutorial: TutorialFlag,
    pub chat: ChatThreads,
}

impl PortalContext {
    /// Build the context and restore any saved session
    pub fn new(storage: Arc<dyn Storage>, catalog: Arc<Catalog>, config: PortalConfig) -> Self {
        let mut session = SessionStore::new(storage.clone(), catalog.demo_user.clone());
        let chat = match session.restore() {
            Some(_) => ChatThreads::seeded(&catalog.chat_seeds, Local::now()),
            None => ChatThreads::new(),
        };

        Self {
            theme: ThemeState::new(storage.clone()),
            tutorial: TutorialFlag::new(storage.clone()),
            navigation: Navigation::new(),
            session,
            chat,
            storage,
            catalog,
            config,
        }
    }

    /// Sign in, land on Home and start a fresh set of chat threads
    pub fn login(&mut self, terms_accepted: bool) -> Result<LoginOutcome, PortalError> {
        self.session.login(terms_accepted)?;
        self.navigation.navigate(Page::Home);
        self.chat = ChatThreads::seeded(&self.catalog.chat_seeds, Local::now());

        let show_tutorial = self.tutorial.arm();
        Ok(LoginOutcome { show_tutorial })
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.tutorial.disarm();
        self.navigation.navigate(Page::Home);
        self.chat = ChatThreads::new();
    }

    pub fn navigate(&mut self, page: Page) {
        self.navigation.navigate(page);
    }

    /// Send as the signed-in user
    pub fn send_message(
        &mut self,
        key: ThreadKey,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Result<&ChatMessage, PortalError> {
        let sender = self
            .session
            .current()
            .ok_or(PortalError::SignedOut)?
            .as_sender();
        self.chat.send(key, sender, text, attachment)
    }

    /// Drop the theme and tutorial preferences
    pub fn forget_preferences(&mut self) {
        self.storage.remove(keys::THEME);
        self.storage.remove(keys::TUTORIAL_SEEN);
        self.tutorial.disarm();
        log::info!("Cleared stored preferences");
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }
}

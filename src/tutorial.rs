use std::sync::Arc;

use crate::storage::{Storage, keys};

/// One-time onboarding overlay, gated by the `unex.tutorial_seen` record
pub struct TutorialFlag {
    storage: Arc<dyn Storage>,
    armed: bool,
}

impl TutorialFlag {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            armed: false,
        }
    }

    pub fn is_seen(&self) -> bool {
        self.storage.get(keys::TUTORIAL_SEEN).as_deref() == Some("true")
    }

    /// Called right after a login; returns whether the overlay should show
    pub fn arm(&mut self) -> bool {
        self.armed = !self.is_seen();
        self.armed
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn should_show(&self) -> bool {
        self.armed && !self.is_seen()
    }

    pub fn acknowledge(&mut self) {
        if !self.is_seen() {
            log::info!("Tutorial acknowledged");
        }
        self.storage.set(keys::TUTORIAL_SEEN, "true");
        self.armed = false;
    }
}

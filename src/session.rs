//! Current user and its persisted mirror

use std::sync::Arc;

use crate::error::PortalError;
use crate::models::User;
use crate::storage::{Storage, keys, load_json, save_json};

/// Owns the signed-in user, if any
///
/// Every change is mirrored to the `unex.session` record so the session
/// survives a restart.
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    demo_user: User,
    current: Option<User>,
}

impl SessionStore {
    /// `demo_user` is the fixed identity every login signs in as
    pub fn new(storage: Arc<dyn Storage>, demo_user: User) -> Self {
        Self {
            storage,
            demo_user,
            current: None,
        }
    }

    /// Load the persisted user, treating a corrupt record as no session
    pub fn restore(&mut self) -> Option<&User> {
        self.current = match load_json::<User>(self.storage.as_ref(), keys::SESSION) {
            Ok(user) => user,
            Err(e) => {
                log::warn!("Ignoring saved session: {}", e);
                None
            }
        };

        if let Some(user) = &self.current {
            log::info!("Restored session for {}", user.id);
        }
        self.current.as_ref()
    }

    /// Sign in as the demo user
    ///
    /// Fails without touching any state when the terms were not accepted.
    pub fn login(&mut self, terms_accepted: bool) -> Result<&User, PortalError> {
        if !terms_accepted {
            log::debug!("Login rejected: terms not accepted");
            return Err(PortalError::Precondition);
        }

        let user = self.demo_user.clone();
        save_json(self.storage.as_ref(), keys::SESSION, &user);
        log::info!("Logged in as {}", user.id);
        let user: &User = self.current.insert(user);
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            log::info!("Logged out {}", user.id);
        }
        self.storage.remove(keys::SESSION);
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::storage::MemoryStorage;

    fn demo() -> User {
        User {
            id: "user-1".to_string(),
            name: "Ana Bia".to_string(),
            email: "ana@exemplo.com".to_string(),
            role: Role::Student,
            course: "Enfermagem".to_string(),
            avatar_url: "https://picsum.photos/seed/user1/100/100".to_string(),
        }
    }

    fn store() -> (Arc<MemoryStorage>, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(storage.clone(), demo());
        (storage, session)
    }

    #[test]
    fn test_login_requires_terms() {
        let (storage, mut session) = store();

        let err = session.login(false).unwrap_err();
        assert!(matches!(err, PortalError::Precondition));
        assert!(session.current().is_none());
        assert!(storage.get(keys::SESSION).is_none());
    }

    #[test]
    fn test_login_persists_user() {
        let (storage, mut session) = store();

        let user = session.login(true).unwrap();
        assert_eq!(user.name, "Ana Bia");

        let raw = storage.get(keys::SESSION).unwrap();
        assert!(raw.contains("\"avatarUrl\""));
        assert!(session.current().is_some());
    }

    #[test]
    fn test_logout_clears_record_and_is_idempotent() {
        let (storage, mut session) = store();
        session.login(true).unwrap();

        session.logout();
        session.logout();

        assert!(session.current().is_none());
        assert!(storage.get(keys::SESSION).is_none());
        assert!(session.restore().is_none());
    }

    #[test]
    fn test_restore_reads_saved_user() {
        let (storage, mut session) = store();
        session.login(true).unwrap();

        let mut fresh = SessionStore::new(storage, demo());
        assert_eq!(fresh.restore().map(|u| u.id.as_str()), Some("user-1"));
    }

    #[test]
    fn test_restore_swallows_corrupt_record() {
        let (storage, mut session) = store();
        storage.set(keys::SESSION, "{\"id\": 42");

        assert!(session.restore().is_none());
        assert!(session.current().is_none());
    }
}

use std::sync::Arc;

use unex_portal::catalog::Catalog;
use unex_portal::config::PortalConfig;
use unex_portal::models::Page;
use unex_portal::storage::{MemoryStorage, SqliteStorage, Storage, keys};
use unex_portal::theme::ThemeVariant;
use unex_portal::{PortalContext, PortalError};

fn context(storage: Arc<dyn Storage>) -> PortalContext {
    PortalContext::new(storage, Arc::new(Catalog::load().unwrap()), PortalConfig::default())
}

#[test]
fn test_login_requires_terms() {
    let storage = Arc::new(MemoryStorage::new());
    let mut ctx = context(storage.clone());

    let err = ctx.login(false).unwrap_err();
    assert!(matches!(err, PortalError::Precondition));
    assert!(storage.get(keys::SESSION).is_none());
}

#[test]
fn test_session_survives_restart() {
    let storage = Arc::new(MemoryStorage::new());
    {
        let mut ctx = context(storage.clone());
        let outcome = ctx.login(true).unwrap();
        assert!(outcome.show_tutorial);
        ctx.tutorial.acknowledge();
        ctx.theme.toggle();
        ctx.navigate(Page::Map);
    }

    let ctx = context(storage.clone());
    assert_eq!(ctx.current_user().map(|u| u.name.as_str()), Some("Ana Bia"));
    assert_eq!(ctx.theme.current(), ThemeVariant::Dark);
    // Navigation is transient
    assert_eq!(ctx.navigation.current(), Page::Home);
    assert!(!ctx.tutorial.should_show());
}

#[test]
fn test_corrupt_session_is_treated_as_signed_out() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(keys::SESSION, "{not json");

    let ctx = context(storage);
    assert!(ctx.current_user().is_none());
}

#[test]
fn test_logout_keeps_preferences() {
    let storage = Arc::new(MemoryStorage::new());
    let mut ctx = context(storage.clone());
    ctx.login(true).unwrap();
    ctx.tutorial.acknowledge();

    ctx.logout();
    ctx.logout();
    assert!(storage.get(keys::SESSION).is_none());
    assert_eq!(storage.get(keys::TUTORIAL_SEEN).as_deref(), Some("true"));
}

#[tokio::test]
async fn test_sqlite_backed_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.db");

    {
        let storage = Arc::new(SqliteStorage::open(&path).await.unwrap());
        let mut ctx = context(storage.clone());
        ctx.login(true).unwrap();
        storage.flush().await.unwrap();
    }

    let storage = Arc::new(SqliteStorage::open(&path).await.unwrap());
    let ctx = context(storage);
    assert_eq!(ctx.current_user().map(|u| u.id.as_str()), Some("user-1"));
}

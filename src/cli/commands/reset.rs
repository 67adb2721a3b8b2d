use colored::*;

use crate::context::PortalContext;

pub fn reset_command(ctx: &mut PortalContext, all: bool) {
    let was_signed_in = ctx.current_user().is_some();
    ctx.logout();

    if was_signed_in {
        println!("{} Signed out", "✓".bright_green().bold());
    } else {
        println!("  {}", "No stored session.".dimmed());
    }

    if all {
        ctx.forget_preferences();
        println!("{} Theme and tutorial preferences cleared", "✓".bright_green().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::PortalConfig;
    use crate::storage::{MemoryStorage, Storage, keys};
    use std::sync::Arc;

    fn context(storage: Arc<MemoryStorage>) -> PortalContext {
        PortalContext::new(storage, Arc::new(Catalog::load().unwrap()), PortalConfig::default())
    }

    #[test]
    fn test_reset_keeps_preferences_without_all() {
        let storage = Arc::new(MemoryStorage::new());
        let mut ctx = context(storage.clone());
        ctx.login(true).unwrap();
        ctx.tutorial.acknowledge();
        ctx.theme.toggle();

        reset_command(&mut ctx, false);
        assert!(storage.get(keys::SESSION).is_none());
        assert_eq!(storage.get(keys::THEME).as_deref(), Some("dark"));
        assert_eq!(storage.get(keys::TUTORIAL_SEEN).as_deref(), Some("true"));
    }

    #[test]
    fn test_reset_all() {
        let storage = Arc::new(MemoryStorage::new());
        let mut ctx = context(storage.clone());
        ctx.login(true).unwrap();
        ctx.theme.toggle();

        reset_command(&mut ctx, true);
        assert!(storage.is_empty());
    }
}

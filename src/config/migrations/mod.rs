//! Versioned schema migrations for the storage database
//!
//! Migrations live in `files/NNN_name/up.sql` and are embedded at build time.
//! Applied versions are tracked in `schema_migrations` with a checksum of the
//! SQL that was run.

use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashSet};

pub mod manager;

pub use manager::MigrationManager;

static MIGRATIONS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/config/migrations/files");

#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub up_sql: String,
}

/// Row of `schema_migrations`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
    pub checksum: String,
}

/// Load every embedded migration, keyed by version
pub fn load_migrations() -> Result<BTreeMap<i64, Migration>> {
    let mut migrations = BTreeMap::new();

    for entry in MIGRATIONS_DIR.dirs() {
        let dir_name = entry
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .context("Invalid migration directory name")?;

        let Some((version, name)) = dir_name.split_once('_') else {
            anyhow::bail!(
                "Invalid migration directory format: {}. Expected format: NNN_name",
                dir_name
            );
        };

        let version: i64 = version
            .parse()
            .with_context(|| format!("Invalid migration version in directory: {}", dir_name))?;

        let up_path = format!("{}/up.sql", dir_name);
        let up_sql = MIGRATIONS_DIR
            .get_file(&up_path)
            .with_context(|| format!("Missing up.sql in migration {}", dir_name))?
            .contents_utf8()
            .with_context(|| format!("up.sql is not valid UTF-8 in migration {}", dir_name))?
            .to_string();

        migrations.insert(
            version,
            Migration {
                version,
                name: name.to_string(),
                up_sql,
            },
        );
    }

    if migrations.is_empty() {
        anyhow::bail!("No migrations found in files directory");
    }

    Ok(migrations)
}

pub async fn init_migration_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            checksum TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create schema_migrations table")?;

    Ok(())
}

pub async fn get_applied_migrations(pool: &SqlitePool) -> Result<Vec<AppliedMigration>> {
    sqlx::query_as::<_, AppliedMigration>(
        "SELECT version, name, checksum FROM schema_migrations ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .context("Failed to get applied migrations")
}

/// Checksum of migration SQL, with line endings normalized to LF
pub fn calculate_checksum(sql: &str) -> String {
    let normalized = sql.replace("\r\n", "\n").replace('\r', "\n");
    format!("{:x}", Sha256::digest(normalized.as_bytes()))
}

/// Fail if an applied migration was edited or removed after it ran
pub async fn validate_migrations(pool: &SqlitePool) -> Result<()> {
    let available = load_migrations()?;

    for applied in get_applied_migrations(pool).await? {
        let Some(migration) = available.get(&applied.version) else {
            anyhow::bail!(
                "Applied migration {} '{}' not found in available migrations",
                applied.version,
                applied.name
            );
        };

        let expected = calculate_checksum(&migration.up_sql);
        if applied.checksum != expected {
            anyhow::bail!(
                "Migration {} checksum mismatch! Applied: {}, Expected: {}",
                applied.version,
                applied.checksum,
                expected
            );
        }
    }

    Ok(())
}

/// Migrations that exist but have not been applied, in version order
pub async fn get_pending_migrations(pool: &SqlitePool) -> Result<Vec<Migration>> {
    let applied: HashSet<i64> = get_applied_migrations(pool)
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    Ok(load_migrations()?
        .into_values()
        .filter(|m| !applied.contains(&m.version))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_migrations_load() {
        let migrations = load_migrations().unwrap();
        let first = migrations.get(&1).unwrap();
        assert_eq!(first.name, "storage");
        assert!(first.up_sql.contains("CREATE TABLE IF NOT EXISTS storage"));
    }

    #[test]
    fn test_checksum_ignores_line_endings() {
        assert_eq!(
            calculate_checksum("CREATE TABLE a (x);\r\nCREATE TABLE b (y);"),
            calculate_checksum("CREATE TABLE a (x);\nCREATE TABLE b (y);")
        );
        assert_ne!(calculate_checksum("a"), calculate_checksum("b"));
    }

    #[test]
    fn test_checksum_is_stable_sha256() {
        assert_eq!(
            calculate_checksum("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}

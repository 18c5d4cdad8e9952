//! SQLite-backed key/value storage.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation. It plays the role a
//! browser's local storage plays for a web console: a handful of flat string
//! entries that survive restarts.

use std::path::{Path, PathBuf};

use chrono::Utc;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use crate::migrations;

/// File name of the console database inside its data directory.
pub const DATABASE_FILE: &str = "axura.db";

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the default console database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/axura/axura.db`
    /// - macOS:   `~/Library/Application Support/com.axura.axura/axura.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\axura\axura\data\axura.db`
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("com", "axura", "axura").ok_or(StoreError::NoDataDir)?;
        Self::open_in_dir(project_dirs.data_dir())
    }

    /// Open (or create) `axura.db` inside `dir`, creating the directory first.
    pub fn open_in_dir(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let db_path = dir.join(DATABASE_FILE);

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        tracing::debug!(key, "stored entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let db = Database::open_at(&path).expect("should open");
        assert!(db.path().is_some());
    }

    #[test]
    fn test_open_in_dir_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");

        let db = Database::open_in_dir(&nested).expect("should open");
        assert!(nested.join(DATABASE_FILE).exists());
        assert!(db.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites_and_remove_reports_presence() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("kv.db")).unwrap();

        db.set("userEmail", "admin@axura.com").unwrap();
        db.set("userEmail", "ops@axura.com").unwrap();
        assert_eq!(db.get("userEmail").unwrap().as_deref(), Some("ops@axura.com"));

        assert!(db.remove("userEmail").unwrap());
        assert!(!db.remove("userEmail").unwrap());
        assert!(db.get("userEmail").unwrap().is_none());
    }

    #[test]
    fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.set("isAuthenticated", "true").unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.get("isAuthenticated").unwrap().as_deref(), Some("true"));
    }
}

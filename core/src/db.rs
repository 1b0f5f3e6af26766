use std::path::Path;

use chrono::Local;
use rusqlite::{Connection, params};

use crate::error::{EatFitError, EatFitResult};
use crate::service::StateStore;

pub const PROFILE_KEY: &str = "profile";
pub const CART_KEY: &str = "cart";
pub const THEME_KEY: &str = "theme";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> EatFitResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            EatFitError::Persistence(format!(
                "Failed to open database {}: {e}",
                path.display()
            ))
        })?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> EatFitResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> EatFitResult<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS app_state (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    pub fn set_value(&self, key: &str, value: &str) -> EatFitResult<()> {
        let now = Local::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO app_state (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    pub fn get_value(&self, key: &str) -> EatFitResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM app_state WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    /// Delete every key in one transaction. Either all of them go or none do.
    pub fn delete_values(&self, keys: &[&str]) -> EatFitResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for key in keys {
            tx.execute("DELETE FROM app_state WHERE key = ?1", params![key])?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl StateStore for Database {
    fn load(&self, key: &str) -> EatFitResult<Option<String>> {
        self.get_value(key)
    }

    fn save(&self, key: &str, value: &str) -> EatFitResult<()> {
        self.set_value(key, value)
    }

    fn remove_all(&self, keys: &[&str]) -> EatFitResult<()> {
        self.delete_values(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_value() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_value(CART_KEY).unwrap(), None);

        db.set_value(CART_KEY, "[]").unwrap();
        assert_eq!(db.get_value(CART_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_value_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.set_value(THEME_KEY, "light").unwrap();
        db.set_value(THEME_KEY, "dark").unwrap();
        assert_eq!(db.get_value(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_delete_values_removes_only_named_keys() {
        let db = Database::open_in_memory().unwrap();
        db.set_value(PROFILE_KEY, "p").unwrap();
        db.set_value(CART_KEY, "c").unwrap();
        db.set_value(THEME_KEY, "dark").unwrap();

        db.delete_values(&[PROFILE_KEY, CART_KEY]).unwrap();
        assert_eq!(db.get_value(PROFILE_KEY).unwrap(), None);
        assert_eq!(db.get_value(CART_KEY).unwrap(), None);
        assert_eq!(db.get_value(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_delete_values_rolls_back_on_failure() {
        let db = Database::open_in_memory().unwrap();
        db.set_value(PROFILE_KEY, "p").unwrap();
        db.set_value(CART_KEY, "c").unwrap();
        db.conn
            .execute_batch(
                "CREATE TRIGGER keep_cart BEFORE DELETE ON app_state
                 WHEN old.key = 'cart'
                 BEGIN SELECT RAISE(ABORT, 'cart is locked'); END;",
            )
            .unwrap();

        let err = db.delete_values(&[PROFILE_KEY, CART_KEY]).unwrap_err();
        assert!(matches!(err, EatFitError::Persistence(_)));
        assert_eq!(db.get_value(PROFILE_KEY).unwrap().as_deref(), Some("p"));
        assert_eq!(db.get_value(CART_KEY).unwrap().as_deref(), Some("c"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eatfit.db");
        {
            let db = Database::open(&path).unwrap();
            db.set_value(CART_KEY, r#"[{"id":1,"qty":2}]"#).unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(
            db.get_value(CART_KEY).unwrap().as_deref(),
            Some(r#"[{"id":1,"qty":2}]"#)
        );
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.migrate().unwrap();
        let version: i64 = db
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, 1);
    }
}

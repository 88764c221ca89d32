//! SQLite-backed key-value store.
//!
//! Holds the serialized session between invocations, which is how prep
//! remaining-seconds and their baselines survive process restarts.

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::Result;
use crate::session::Session;

const SESSION_KEY: &str = "session";

/// Key-value store at `~/.config/podium-timer/podium.db`.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store, creating the file and schema on first use.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("podium.db");
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Load the persisted session. A missing or unreadable entry yields a
    /// fresh session rather than an error.
    pub fn load_session(&self) -> Session {
        if let Ok(Some(json)) = self.kv_get(SESSION_KEY) {
            if let Ok(session) = serde_json::from_str::<Session>(&json) {
                return session;
            }
        }
        Session::new()
    }

    /// Persist the session.
    pub fn save_session(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.kv_set(SESSION_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Side;

    #[test]
    fn kv_round_trip() {
        let store = Store::open_memory().unwrap();
        assert!(store.kv_get("theme").unwrap().is_none());
        store.kv_set("theme", "Dark").unwrap();
        assert_eq!(store.kv_get("theme").unwrap().unwrap(), "Dark");
        store.kv_set("theme", "Light").unwrap();
        assert_eq!(store.kv_get("theme").unwrap().unwrap(), "Light");
    }

    #[test]
    fn missing_session_yields_fresh_state() {
        let store = Store::open_memory().unwrap();
        let session = store.load_session();
        assert!(session.event().is_none());
        assert_eq!(session.segment_count(), 0);
    }

    #[test]
    fn session_round_trip_keeps_prep_state() {
        let store = Store::open_memory().unwrap();
        let mut session = Session::new();
        session.select_event("Public Forum").unwrap();
        session.prep_mut(Side::Neg).rebase(150);
        store.save_session(&session).unwrap();

        let restored = store.load_session();
        assert_eq!(restored.event(), Some("Public Forum"));
        assert_eq!(restored.segment_count(), 11);
        assert_eq!(restored.prep(Side::Neg).baseline_secs(), 150);
        assert_eq!(restored.prep(Side::Aff).remaining_secs(), 180);
    }

    #[test]
    fn corrupt_session_entry_degrades_to_fresh() {
        let store = Store::open_memory().unwrap();
        store.kv_set("session", "{not json").unwrap();
        let session = store.load_session();
        assert!(session.event().is_none());
    }
}

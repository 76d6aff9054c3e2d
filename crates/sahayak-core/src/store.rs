//! SQLite-backed session store for preferences and turn history.

use crate::error::StoreError;
use crate::types::{PREF_LANGUAGE, PreferenceMap, TurnRecord};
use chrono::Utc;
use log::{debug, info, warn};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use sahayak_config::Language;
use std::path::Path;

/// Durable storage for session metadata and the append-only turn log.
///
/// A single connection is shared across callers behind a mutex;
/// statement-level atomicity from SQLite is the only isolation the
/// store relies on.
pub struct SessionStore {
    /// Shared SQLite connection.
    conn: Mutex<Connection>,
    /// Language assigned to sessions created without one.
    default_language: Language,
    /// Optional per-session turn cap applied on append.
    retain_turns: Option<usize>,
}

impl SessionStore {
    /// Open (or create) the database at the given path and ensure the
    /// schema exists.
    pub fn open(
        path: impl AsRef<Path>,
        default_language: Language,
        retain_turns: Option<usize>,
    ) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT UNIQUE NOT NULL,
                preferred_language TEXT NOT NULL DEFAULT 'en',
                preferences TEXT NOT NULL DEFAULT '{}',
                created_at TIMESTAMP NOT NULL
            );
            CREATE TABLE IF NOT EXISTS turns (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                query TEXT NOT NULL,
                response TEXT NOT NULL,
                language TEXT NOT NULL,
                query_type TEXT NOT NULL DEFAULT 'text',
                created_at TIMESTAMP NOT NULL
            );",
        )?;
        info!("initialized session store (path={})", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
            default_language,
            retain_turns,
        })
    }

    /// Create a session row if none exists; never overwrites an
    /// existing row or its preferences.
    pub fn upsert_session(
        &self,
        session_id: &str,
        language: Language,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        insert_session_if_absent(&conn, session_id, language)?;
        Ok(())
    }

    /// Return the stored preference mapping, or an empty mapping when
    /// the session is absent or the stored value is malformed.
    pub fn preferences(&self, session_id: &str) -> Result<PreferenceMap, StoreError> {
        let conn = self.conn.lock();
        let raw: Option<String> = conn
            .query_row(
                "SELECT preferences FROM sessions WHERE session_id = ?1",
                params![session_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(raw) = raw else {
            return Ok(PreferenceMap::new());
        };
        match serde_json::from_str::<PreferenceMap>(&raw) {
            Ok(preferences) => Ok(preferences),
            Err(err) => {
                warn!(
                    "malformed preferences, returning empty (session_id={}, err={})",
                    session_id, err
                );
                Ok(PreferenceMap::new())
            }
        }
    }

    /// Upsert the session and overwrite its preference mapping
    /// wholesale. The session language is taken from the mapping's
    /// `preferred_language` key when present and supported.
    pub fn set_preferences(
        &self,
        session_id: &str,
        preferences: &PreferenceMap,
    ) -> Result<(), StoreError> {
        let language = preferences
            .get(PREF_LANGUAGE)
            .and_then(serde_json::Value::as_str)
            .and_then(Language::parse)
            .unwrap_or(self.default_language);
        let raw = serde_json::to_string(preferences)?;

        let conn = self.conn.lock();
        insert_session_if_absent(&conn, session_id, language)?;
        conn.execute(
            "UPDATE sessions SET preferences = ?1 WHERE session_id = ?2",
            params![raw, session_id],
        )?;
        info!("updated preferences (session_id={})", session_id);
        Ok(())
    }

    /// Append a turn, creating the session first when needed so no
    /// turn ever references a missing session.
    pub fn append_turn(&self, turn: &TurnRecord) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        insert_session_if_absent(&conn, &turn.session_id, turn.language)?;
        conn.execute(
            "INSERT INTO turns (session_id, query, response, language, query_type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                turn.session_id,
                turn.query,
                turn.response,
                turn.language.as_str(),
                turn.query_type,
                turn.created_at,
            ],
        )?;
        debug!(
            "appended turn (session_id={}, query_len={})",
            turn.session_id,
            turn.query.len()
        );

        if let Some(retain) = self.retain_turns {
            let pruned = conn.execute(
                "DELETE FROM turns WHERE session_id = ?1 AND id NOT IN (
                    SELECT id FROM turns WHERE session_id = ?1
                    ORDER BY created_at DESC, id DESC LIMIT ?2
                )",
                params![turn.session_id, retain as i64],
            )?;
            if pruned > 0 {
                debug!(
                    "pruned turn history (session_id={}, removed={})",
                    turn.session_id, pruned
                );
            }
        }
        Ok(())
    }

    /// Return up to `limit` most recent turns, newest first.
    pub fn history(&self, session_id: &str, limit: i64) -> Result<Vec<TurnRecord>, StoreError> {
        if limit <= 0 {
            return Err(StoreError::InvalidLimit(limit));
        }
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT query, response, language, query_type, created_at
             FROM turns WHERE session_id = ?1
             ORDER BY created_at DESC, id DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![session_id, limit], |row| {
            Ok(TurnRecord {
                session_id: session_id.to_string(),
                query: row.get(0)?,
                response: row.get(1)?,
                language: Language::parse(&row.get::<_, String>(2)?).unwrap_or_default(),
                query_type: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        let mut turns = Vec::new();
        for row in rows {
            turns.push(row?);
        }
        Ok(turns)
    }

    /// Return the session's stored language, if the session exists.
    pub fn session_language(&self, session_id: &str) -> Result<Option<Language>, StoreError> {
        let conn = self.conn.lock();
        let code: Option<String> = conn
            .query_row(
                "SELECT preferred_language FROM sessions WHERE session_id = ?1",
                params![session_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(code.as_deref().and_then(Language::parse))
    }
}

/// Insert-or-ignore a session row with the given language.
fn insert_session_if_absent(
    conn: &Connection,
    session_id: &str,
    language: Language,
) -> Result<(), StoreError> {
    conn.execute(
        "INSERT OR IGNORE INTO sessions (session_id, preferred_language, created_at)
         VALUES (?1, ?2, ?3)",
        params![session_id, language.as_str(), Utc::now()],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::SessionStore;
    use crate::error::StoreError;
    use crate::types::{PreferenceMap, TurnRecord};
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;
    use sahayak_config::Language;
    use serde_json::json;
    use tempfile::tempdir;

    fn open_store(retain: Option<usize>) -> (tempfile::TempDir, SessionStore) {
        let temp = tempdir().expect("tempdir");
        let store = SessionStore::open(temp.path().join("test.db"), Language::En, retain)
            .expect("store");
        (temp, store)
    }

    fn turn(session_id: &str, query: &str, offset_secs: i64) -> TurnRecord {
        TurnRecord {
            session_id: session_id.to_string(),
            query: query.to_string(),
            response: format!("reply to {query}"),
            language: Language::En,
            query_type: "text".to_string(),
            created_at: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn preferences_round_trip() {
        let (_temp, store) = open_store(None);
        let mut preferences = PreferenceMap::new();
        preferences.insert("preferred_category".to_string(), json!("Technology"));
        preferences.insert("preferred_language".to_string(), json!("hi"));

        store.set_preferences("s1", &preferences).expect("set");
        assert_eq!(store.preferences("s1").expect("get"), preferences);
        assert_eq!(
            store.session_language("s1").expect("language"),
            Some(Language::Hi)
        );
    }

    #[test]
    fn unknown_session_returns_empty_preferences() {
        let (_temp, store) = open_store(None);
        assert_eq!(
            store.preferences("never-seen").expect("get"),
            PreferenceMap::new()
        );
        // Reading must not create the session as a side effect.
        assert_eq!(store.session_language("never-seen").expect("language"), None);
    }

    #[test]
    fn set_preferences_overwrites_wholesale() {
        let (_temp, store) = open_store(None);
        let mut first = PreferenceMap::new();
        first.insert("preferred_category".to_string(), json!("Banking"));
        first.insert("location".to_string(), json!("Ludhiana"));
        store.set_preferences("s1", &first).expect("set");

        let mut second = PreferenceMap::new();
        second.insert("preferred_category".to_string(), json!("Technology"));
        store.set_preferences("s1", &second).expect("set");

        let stored = store.preferences("s1").expect("get");
        assert_eq!(stored, second);
        assert_eq!(stored.get("location"), None);
    }

    #[test]
    fn upsert_session_keeps_existing_preferences() {
        let (_temp, store) = open_store(None);
        let mut preferences = PreferenceMap::new();
        preferences.insert("preferred_category".to_string(), json!("Healthcare"));
        store.set_preferences("s1", &preferences).expect("set");

        store.upsert_session("s1", Language::Pa).expect("upsert");
        assert_eq!(store.preferences("s1").expect("get"), preferences);
        // Language is not overwritten either.
        assert_eq!(
            store.session_language("s1").expect("language"),
            Some(Language::En)
        );
    }

    #[test]
    fn history_returns_newest_first() {
        let (_temp, store) = open_store(None);
        for (index, query) in ["first", "second", "third"].iter().enumerate() {
            store
                .append_turn(&turn("s1", query, index as i64))
                .expect("append");
        }

        let all = store.history("s1", 3).expect("history");
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].query, "third".to_string());
        assert_eq!(all[2].query, "first".to_string());

        let recent = store.history("s1", 2).expect("history");
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].query, "third".to_string());
        assert_eq!(recent[1].query, "second".to_string());
    }

    #[test]
    fn history_rejects_non_positive_limit() {
        let (_temp, store) = open_store(None);
        let err = store.history("s1", 0).expect_err("invalid limit");
        assert!(matches!(err, StoreError::InvalidLimit(0)));
        assert!(err.is_invalid_argument());
        let err = store.history("s1", -5).expect_err("invalid limit");
        assert!(matches!(err, StoreError::InvalidLimit(-5)));
    }

    #[test]
    fn append_turn_creates_session_implicitly() {
        let (_temp, store) = open_store(None);
        store
            .append_turn(&turn("implicit", "hello", 0))
            .expect("append");
        assert_eq!(
            store.session_language("implicit").expect("language"),
            Some(Language::En)
        );
    }

    #[test]
    fn retention_cap_prunes_oldest_turns() {
        let (_temp, store) = open_store(Some(2));
        for (index, query) in ["a", "b", "c", "d"].iter().enumerate() {
            store
                .append_turn(&turn("s1", query, index as i64))
                .expect("append");
        }

        let all = store.history("s1", 10).expect("history");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].query, "d".to_string());
        assert_eq!(all[1].query, "c".to_string());
    }

    #[test]
    fn malformed_preferences_read_as_empty() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("test.db");
        {
            let conn = rusqlite::Connection::open(&path).expect("conn");
            conn.execute_batch(
                "CREATE TABLE sessions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    session_id TEXT UNIQUE NOT NULL,
                    preferred_language TEXT NOT NULL DEFAULT 'en',
                    preferences TEXT NOT NULL DEFAULT '{}',
                    created_at TIMESTAMP NOT NULL
                );",
            )
            .expect("schema");
            conn.execute(
                "INSERT INTO sessions (session_id, preferences, created_at)
                 VALUES ('s1', 'not-json', CURRENT_TIMESTAMP)",
                [],
            )
            .expect("seed");
        }
        let store = SessionStore::open(&path, Language::En, None).expect("store");
        assert_eq!(store.preferences("s1").expect("get"), PreferenceMap::new());
    }
}

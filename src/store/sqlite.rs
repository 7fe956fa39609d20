use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::{GameSession, GuessRecord, SessionState, UserStats};
use crate::error::{GameEngineError, Result};
use crate::store::{GameStore, StatsStore};

/// SQLite-backed implementation of both store traits
///
/// ```sql
/// CREATE TABLE sessions (
///     session_id TEXT PRIMARY KEY,
///     user_id TEXT NOT NULL,
///     player_id TEXT NOT NULL,
///     hints_revealed INTEGER NOT NULL DEFAULT 1,
///     message_ref TEXT,
///     state TEXT NOT NULL DEFAULT 'open',
///     created_at TIMESTAMP NOT NULL,
///     resolved_at TIMESTAMP
/// );
/// CREATE TABLE guess_log (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     session_id TEXT NOT NULL,
///     guess_text TEXT NOT NULL,
///     hints_revealed INTEGER NOT NULL,
///     is_correct INTEGER NOT NULL DEFAULT 0,
///     score INTEGER NOT NULL DEFAULT 0,
///     submitted_at TIMESTAMP NOT NULL
/// );
/// CREATE TABLE user_stats (
///     user_id TEXT PRIMARY KEY,
///     stats_data TEXT NOT NULL,
///     updated_at TIMESTAMP NOT NULL
/// );
/// ```
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database and ensure the schema exists
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(GameEngineError::Database)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS sessions (
                session_id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                player_id TEXT NOT NULL,
                hints_revealed INTEGER NOT NULL DEFAULT 1,
                message_ref TEXT,
                state TEXT NOT NULL DEFAULT 'open',
                created_at TIMESTAMP NOT NULL,
                resolved_at TIMESTAMP
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_sessions_user_state ON sessions(user_id, state)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS guess_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                guess_text TEXT NOT NULL,
                hints_revealed INTEGER NOT NULL,
                is_correct INTEGER NOT NULL DEFAULT 0,
                score INTEGER NOT NULL DEFAULT 0,
                submitted_at TIMESTAMP NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_guess_log_session ON guess_log(session_id)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS user_stats (
                user_id TEXT PRIMARY KEY,
                stats_data TEXT NOT NULL,
                updated_at TIMESTAMP NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn parse_timestamp(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now())
    }

    fn load_guess_log(conn: &Connection, session_id: &str) -> Result<Vec<GuessRecord>> {
        let mut stmt = conn.prepare(
            "SELECT guess_text, hints_revealed, is_correct, score, submitted_at
             FROM guess_log
             WHERE session_id = ?
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map(params![session_id], |row| {
            let submitted_at: String = row.get(4)?;
            Ok(GuessRecord {
                guess_text: row.get(0)?,
                hints_revealed: row.get(1)?,
                is_correct: row.get::<_, i64>(2)? != 0,
                score: row.get(3)?,
                submitted_at: Self::parse_timestamp(&submitted_at),
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

#[async_trait]
impl GameStore for SqliteStore {
    async fn get_open_session(&self, user_id: &str) -> Result<Option<GameSession>> {
        let conn = self.conn.lock().unwrap();

        let raw = conn
            .query_row(
                "SELECT session_id, player_id, hints_revealed, message_ref, created_at
                 FROM sessions
                 WHERE user_id = ? AND state = 'open'",
                params![user_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, u32>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((session_id, player_id, hints_revealed, message_ref, created_at)) = raw else {
            return Ok(None);
        };

        let guesses = Self::load_guess_log(&conn, &session_id)?;

        let session_id = Uuid::parse_str(&session_id)
            .map_err(|e| GameEngineError::Other(format!("Corrupt session id: {}", e)))?;

        Ok(Some(GameSession {
            session_id,
            user_id: user_id.to_string(),
            player_id,
            hints_revealed,
            guesses,
            message_ref,
            state: SessionState::Open,
            created_at: Self::parse_timestamp(&created_at),
            resolved_at: None,
        }))
    }

    async fn create_session(&self, user_id: &str, player_id: &str) -> Result<GameSession> {
        let session = GameSession::new(user_id, player_id);
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO sessions (session_id, user_id, player_id, hints_revealed, state, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session.session_id.to_string(),
                session.user_id,
                session.player_id,
                session.hints_revealed,
                session.state.as_str(),
                session.created_at.to_rfc3339(),
            ],
        )?;

        Ok(session)
    }

    async fn append_guess_log(&self, session_id: Uuid, record: &GuessRecord) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO guess_log (session_id, guess_text, hints_revealed, is_correct, score, submitted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session_id.to_string(),
                record.guess_text,
                record.hints_revealed,
                record.is_correct as i64,
                record.score,
                record.submitted_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    async fn update_hints(&self, session_id: Uuid, hints_revealed: u32) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "UPDATE sessions SET hints_revealed = ?2 WHERE session_id = ?1",
            params![session_id.to_string(), hints_revealed],
        )?;

        Ok(())
    }

    async fn set_message_ref(&self, session_id: Uuid, message_ref: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "UPDATE sessions SET message_ref = ?2 WHERE session_id = ?1",
            params![session_id.to_string(), message_ref],
        )?;

        Ok(())
    }

    async fn close_session(&self, session_id: Uuid, state: SessionState) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "UPDATE sessions SET state = ?2, resolved_at = ?3 WHERE session_id = ?1",
            params![
                session_id.to_string(),
                state.as_str(),
                Utc::now().to_rfc3339(),
            ],
        )?;

        Ok(())
    }
}

#[async_trait]
impl StatsStore for SqliteStore {
    async fn get_stats(&self, user_id: &str) -> Result<Option<UserStats>> {
        let conn = self.conn.lock().unwrap();

        let raw: Option<String> = conn
            .query_row(
                "SELECT stats_data FROM user_stats WHERE user_id = ?",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save_stats(&self, user_id: &str, stats: &UserStats) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        let stats_json = serde_json::to_string(stats)?;

        conn.execute(
            "INSERT OR REPLACE INTO user_stats (user_id, stats_data, updated_at)
             VALUES (?1, ?2, ?3)",
            params![user_id, stats_json, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }
}

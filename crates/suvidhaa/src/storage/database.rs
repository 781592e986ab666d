//! SQLite record store
//!
//! Each collection is a table holding the record serialized as JSON plus the
//! few columns that queries filter or sort on.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{
    CoSignature, DashboardStats, Document, Grievance, GrievanceStatus, Question, QuestionStatus,
    Suggestion, UserSubmissions, Watchlist,
};

/// Most watchlists returned for one owner
pub const WATCHLIST_LIMIT: usize = 100;

/// Most records of each kind returned by a submissions lookup
pub const SUBMISSIONS_LIMIT: usize = 50;

/// A record kind persisted in its own table
pub trait Record: Serialize + DeserializeOwned {
    /// Table name
    const TABLE: &'static str;
    /// Human-readable name for not-found errors
    const KIND: &'static str;

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;

    /// Owner email, for kinds looked up by email
    fn email(&self) -> Option<&str> {
        None
    }

    /// Lifecycle status, for kinds counted by status
    fn status(&self) -> Option<&'static str> {
        None
    }
}

impl Record for Document {
    const TABLE: &'static str = "documents";
    const KIND: &'static str = "Document";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for Question {
    const TABLE: &'static str = "questions";
    const KIND: &'static str = "Question";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }

    fn status(&self) -> Option<&'static str> {
        Some(self.status.as_str())
    }
}

impl Record for Suggestion {
    const TABLE: &'static str = "suggestions";
    const KIND: &'static str = "Suggestion";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }

    fn status(&self) -> Option<&'static str> {
        Some(self.status.as_str())
    }
}

impl Record for Grievance {
    const TABLE: &'static str = "grievances";
    const KIND: &'static str = "Grievance";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }

    fn status(&self) -> Option<&'static str> {
        Some(self.status.as_str())
    }
}

impl Record for Watchlist {
    const TABLE: &'static str = "watchlists";
    const KIND: &'static str = "Watchlist";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn email(&self) -> Option<&str> {
        Some(&self.user_email)
    }
}

/// SQLite-backed store for every record kind
#[derive(Clone)]
pub struct RecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl RecordStore {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::database(format!("Failed to open database: {}", e)))?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        store.migrate()?;
        Ok(store)
    }

    /// Create an in-memory database (tests and throwaway servers)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::database(format!("Failed to open in-memory database: {}", e)))?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        store.migrate()?;
        Ok(store)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
        "#,
        )
        .map_err(|e| Error::database(format!("Failed to set pragmas: {}", e)))?;

        for table in [
            Document::TABLE,
            Question::TABLE,
            Suggestion::TABLE,
            Grievance::TABLE,
            Watchlist::TABLE,
        ] {
            conn.execute_batch(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id TEXT PRIMARY KEY,
                    email TEXT,
                    status TEXT,
                    created_at TEXT NOT NULL,
                    body TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_{table}_email ON {table}(email);
                CREATE INDEX IF NOT EXISTS idx_{table}_created_at ON {table}(created_at);
            "#
            ))
            .map_err(|e| Error::database(format!("Failed to run migrations: {}", e)))?;
        }

        tracing::info!("Database migrations complete");
        Ok(())
    }

    // ==================== Generic Record Operations ====================

    /// Insert a new record
    pub fn insert<R: Record>(&self, record: &R) -> Result<()> {
        let body = serde_json::to_string(record)?;
        let conn = self.conn.lock();

        conn.execute(
            &format!(
                "INSERT INTO {} (id, email, status, created_at, body) VALUES (?1, ?2, ?3, ?4, ?5)",
                R::TABLE
            ),
            params![
                record.id().to_string(),
                record.email(),
                record.status(),
                sortable_timestamp(record.created_at()),
                body,
            ],
        )
        .map_err(|e| Error::database(format!("Failed to insert {}: {}", R::KIND, e)))?;

        Ok(())
    }

    /// Get a record by id
    pub fn get<R: Record>(&self, id: Uuid) -> Result<Option<R>> {
        let conn = self.conn.lock();

        let body: Option<String> = conn
            .query_row(
                &format!("SELECT body FROM {} WHERE id = ?1", R::TABLE),
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::database(format!("Failed to get {}: {}", R::KIND, e)))?;

        body.map(|b| decode(&b)).transpose()
    }

    /// Page through records, newest first
    pub fn list<R: Record>(&self, skip: usize, limit: usize) -> Result<Vec<R>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(&format!(
                "SELECT body FROM {} ORDER BY created_at DESC, rowid DESC LIMIT ?1 OFFSET ?2",
                R::TABLE
            ))
            .map_err(|e| Error::database(format!("Failed to prepare query: {}", e)))?;

        let bodies = stmt
            .query_map(params![limit as i64, skip as i64], |row| row.get::<_, String>(0))
            .map_err(|e| Error::database(format!("Failed to list {}: {}", R::TABLE, e)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        bodies.iter().map(|b| decode(b)).collect()
    }

    /// Records owned by `email`, newest first
    pub fn list_by_email<R: Record>(&self, email: &str, limit: usize) -> Result<Vec<R>> {
        let conn = self.conn.lock();

        let mut stmt = conn
            .prepare(&format!(
                "SELECT body FROM {} WHERE email = ?1 ORDER BY created_at DESC, rowid DESC LIMIT ?2",
                R::TABLE
            ))
            .map_err(|e| Error::database(format!("Failed to prepare query: {}", e)))?;

        let bodies = stmt
            .query_map(params![email, limit as i64], |row| row.get::<_, String>(0))
            .map_err(|e| Error::database(format!("Failed to list {}: {}", R::TABLE, e)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        bodies.iter().map(|b| decode(b)).collect()
    }

    fn count(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<u64> {
        let count: i64 = conn
            .query_row(sql, params, |row| row.get(0))
            .map_err(|e| Error::database(format!("Failed to count records: {}", e)))?;
        Ok(count as u64)
    }

    // ==================== Collection-Specific Operations ====================

    /// Append a co-signature to a stored suggestion
    pub fn add_cosignature(&self, suggestion_id: Uuid, signature: CoSignature) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let body: Option<String> = tx
            .query_row(
                &format!("SELECT body FROM {} WHERE id = ?1", Suggestion::TABLE),
                params![suggestion_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        let mut suggestion: Suggestion = match body {
            Some(body) => decode(&body)?,
            None => return Err(Error::NotFound(Suggestion::KIND.to_string())),
        };
        suggestion.co_signatures.push(signature);

        tx.execute(
            &format!("UPDATE {} SET body = ?1 WHERE id = ?2", Suggestion::TABLE),
            params![serde_json::to_string(&suggestion)?, suggestion_id.to_string()],
        )?;
        tx.commit()?;

        tracing::debug!(
            "Suggestion {} now has {} co-signatures",
            suggestion_id,
            suggestion.co_signatures.len()
        );
        Ok(())
    }

    /// Watchlists owned by `email`
    pub fn list_watchlists(&self, email: &str) -> Result<Vec<Watchlist>> {
        self.list_by_email(email, WATCHLIST_LIMIT)
    }

    /// Questions, suggestions and grievances filed under `email`
    pub fn submissions_by_email(&self, email: &str) -> Result<UserSubmissions> {
        Ok(UserSubmissions {
            questions: self.list_by_email(email, SUBMISSIONS_LIMIT)?,
            suggestions: self.list_by_email(email, SUBMISSIONS_LIMIT)?,
            grievances: self.list_by_email(email, SUBMISSIONS_LIMIT)?,
        })
    }

    /// Dashboard counters as of now
    pub fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.dashboard_stats_at(Utc::now())
    }

    /// Dashboard counters, with "this month" taken as the UTC calendar month of `now`
    pub fn dashboard_stats_at(&self, now: DateTime<Utc>) -> Result<DashboardStats> {
        let month_start = now
            .date_naive()
            .with_day(1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or(now);

        let conn = self.conn.lock();
        let total = |table: &str| Self::count(&conn, &format!("SELECT COUNT(*) FROM {}", table), []);
        let with_status = |table: &str, status: &str| {
            Self::count(
                &conn,
                &format!("SELECT COUNT(*) FROM {} WHERE status = ?1", table),
                params![status],
            )
        };

        Ok(DashboardStats {
            total_documents: total(Document::TABLE)?,
            documents_this_month: Self::count(
                &conn,
                &format!("SELECT COUNT(*) FROM {} WHERE created_at >= ?1", Document::TABLE),
                params![sortable_timestamp(month_start)],
            )?,
            total_questions: total(Question::TABLE)?,
            answered_questions: with_status(Question::TABLE, QuestionStatus::Answered.as_str())?,
            total_suggestions: total(Suggestion::TABLE)?,
            total_grievances: total(Grievance::TABLE)?,
            resolved_grievances: with_status(Grievance::TABLE, GrievanceStatus::Resolved.as_str())?,
        })
    }
}

/// Fixed-width UTC timestamp, so string order matches time order
fn sortable_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R> {
    serde_json::from_str(body)
        .map_err(|e| Error::database(format!("Corrupt record body: {}", e)))
}

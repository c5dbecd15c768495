//! SQLite question store.
//!
//! Schema mirrors the relational layout the game has always used: a
//! `categories` table and a `questions` table referencing it.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{ErrorCode, TriviaError, TriviaResult};
use crate::traits::QuestionStore;
use crate::types::{Category, CategoryId, Question, QuestionDraft, QuestionId};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// SQL function lower-casing text with full Unicode rules. `LOWER` and `LIKE`
/// only fold ASCII.
const FOLD_CASE_FN: &str = "fold_case";

/// SQLite-backed question store.
pub struct SqliteQuestionStore {
    conn: Mutex<Connection>,
}

impl SqliteQuestionStore {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> TriviaResult<Self> {
        let path = path.as_ref();
        if path.to_str() == Some(":memory:") {
            return Self::in_memory();
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path).map_err(|e| TriviaError::Database {
            message: format!("Failed to open {}: {}", path.display(), e),
            code: ErrorCode::DbConnectionFailed,
            source: Some(Box::new(e)),
        })?;
        Self::from_connection(conn)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> TriviaResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> TriviaResult<Self> {
        conn.create_scalar_function(
            FOLD_CASE_FN,
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| ctx.get::<String>(0).map(|text| text.to_lowercase()),
        )?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> TriviaResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TriviaError::Internal("SQLite connection lock poisoned".to_string()))
    }

    fn init_schema(&self) -> TriviaResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                category INTEGER NOT NULL REFERENCES categories(id),
                difficulty INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category);
        "#,
        )?;
        Ok(())
    }

    /// Insert categories in order and return them with their assigned ids.
    pub fn seed_categories(&self, names: &[&str]) -> TriviaResult<Vec<Category>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            tx.execute("INSERT INTO categories (type) VALUES (?1)", params![name])?;
            created.push(Category::new(tx.last_insert_rowid(), *name));
        }
        tx.commit()?;
        debug!(count = created.len(), "Seeded categories");
        Ok(created)
    }

    fn row_to_question(row: &rusqlite::Row<'_>) -> rusqlite::Result<Question> {
        Ok(Question {
            id: row.get(0)?,
            question: row.get(1)?,
            answer: row.get(2)?,
            category: row.get(3)?,
            difficulty: row.get(4)?,
        })
    }

    fn query_questions(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> TriviaResult<Vec<Question>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, Self::row_to_question)?;
        let questions = rows
            .map(|r| r.map_err(TriviaError::from))
            .collect::<TriviaResult<Vec<_>>>();
        questions
    }
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn list_all(&self) -> TriviaResult<Vec<Question>> {
        let conn = self.conn()?;
        Self::query_questions(
            &conn,
            &format!("SELECT {} FROM questions ORDER BY id ASC", QUESTION_COLUMNS),
            [],
        )
    }

    async fn list_categories(&self) -> TriviaResult<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category::new(row.get(0)?, row.get::<_, String>(1)?))
        })?;
        let categories = rows
            .map(|r| r.map_err(TriviaError::from))
            .collect::<TriviaResult<Vec<_>>>();
        categories
    }

    async fn get_category(&self, id: CategoryId) -> TriviaResult<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, type FROM categories WHERE id = ?1",
                params![id],
                |row| Ok(Category::new(row.get(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        Ok(category)
    }

    async fn find_by_category(&self, category_id: CategoryId) -> TriviaResult<Vec<Question>> {
        let conn = self.conn()?;
        Self::query_questions(
            &conn,
            &format!(
                "SELECT {} FROM questions WHERE category = ?1 ORDER BY id ASC",
                QUESTION_COLUMNS
            ),
            params![category_id],
        )
    }

    async fn find_by_substring(&self, term: &str) -> TriviaResult<Vec<Question>> {
        let conn = self.conn()?;
        Self::query_questions(
            &conn,
            &format!(
                "SELECT {} FROM questions WHERE instr({}(question), ?1) > 0 ORDER BY id ASC",
                QUESTION_COLUMNS, FOLD_CASE_FN
            ),
            params![term.to_lowercase()],
        )
    }

    async fn insert(&self, draft: QuestionDraft) -> TriviaResult<Question> {
        let new = draft.validate()?;
        let conn = self.conn()?;

        let category_exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)",
            params![new.category],
            |row| row.get(0),
        )?;
        if !category_exists {
            return Err(TriviaError::unknown_category(new.category));
        }

        conn.execute(
            "INSERT INTO questions (question, answer, category, difficulty) \
             VALUES (?1, ?2, ?3, ?4)",
            params![new.question, new.answer, new.category, new.difficulty],
        )?;
        let id = conn.last_insert_rowid();
        debug!(question_id = id, "Inserted question");
        Ok(new.with_id(id))
    }

    async fn delete_by_id(&self, id: QuestionId) -> TriviaResult<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM questions WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(TriviaError::question_not_found(id));
        }
        Ok(())
    }

    async fn count(&self) -> TriviaResult<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

//! SQLite-backed survey store
//!
//! One flat `survey` table. The CHECK constraints repeat the validator's
//! rules so that nothing outside the declared ranges can be written even
//! when the validator is bypassed.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::{debug, info};

use super::errors::{StoreError, StoreResult};
use crate::observability::Event;
use crate::survey::{NewSurvey, SurveyRecord, SurveySample};

const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS survey (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        gpa REAL NOT NULL CHECK(gpa >= 4.0 AND gpa <= 12.0),
        first_choice INTEGER NOT NULL CHECK(first_choice IN (0, 1)),
        major TEXT NOT NULL CHECK(major IN ('computer', 'electrical', 'other')),
        program TEXT NOT NULL CHECK(program IN ('regular', 'management', 'society')),
        gender TEXT NOT NULL CHECK(gender IN ('male', 'female', 'other'))
    )
";

#[derive(FromRow)]
struct SampleRow {
    gpa: f64,
    first_choice: i64,
    major: String,
    program: String,
    gender: String,
}

#[derive(FromRow)]
struct RecordRow {
    id: i64,
    name: String,
    gpa: f64,
    first_choice: i64,
    major: String,
    program: String,
    gender: String,
}

impl TryFrom<RecordRow> for SurveyRecord {
    type Error = StoreError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let corrupt = |column: &'static str, value: &str| StoreError::CorruptRow {
            id: row.id,
            column,
            value: value.to_string(),
        };

        Ok(SurveyRecord {
            major: row.major.parse().map_err(|_| corrupt("major", &row.major))?,
            program: row
                .program
                .parse()
                .map_err(|_| corrupt("program", &row.program))?,
            gender: row
                .gender
                .parse()
                .map_err(|_| corrupt("gender", &row.gender))?,
            id: row.id,
            name: row.name,
            gpa: row.gpa,
            first_choice: row.first_choice != 0,
        })
    }
}

/// Handle to the survey table.
///
/// Cheap to clone; every clone shares the same connection pool. Each
/// operation borrows a pooled connection for the duration of its statement.
#[derive(Debug, Clone)]
pub struct SurveyStore {
    pool: SqlitePool,
}

impl SurveyStore {
    /// Opens (creating if missing) the database at `url` and ensures the schema.
    ///
    /// `url` is a sqlx SQLite URL such as `sqlite://database.db`.
    pub async fn open(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        info!(event = Event::SchemaReady.as_str(), url, "survey store opened");
        Ok(store)
    }

    /// Private in-memory database.
    ///
    /// Held on a single connection that is never recycled, since every new
    /// SQLite memory connection would see an empty database.
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Appends one validated record and returns its assigned id.
    pub async fn insert(&self, record: &NewSurvey) -> StoreResult<i64> {
        let result = sqlx::query(
            r"INSERT INTO survey (name, gpa, first_choice, major, program, gender)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(record.name.as_str())
        .bind(record.gpa)
        .bind(i64::from(record.first_choice))
        .bind(record.major.as_str())
        .bind(record.program.as_str())
        .bind(record.gender.as_str())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "survey row inserted");
        Ok(id)
    }

    /// Every row's aggregation tuple, in insertion order.
    pub async fn samples(&self) -> StoreResult<Vec<SurveySample>> {
        let rows: Vec<SampleRow> = sqlx::query_as(
            "SELECT gpa, first_choice, major, program, gender FROM survey ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SurveySample {
                gpa: row.gpa,
                first_choice: row.first_choice != 0,
                major: row.major,
                program: row.program,
                gender: row.gender,
            })
            .collect())
    }

    /// Every record with its id, ascending by id.
    pub async fn list(&self) -> StoreResult<Vec<SurveyRecord>> {
        let rows: Vec<RecordRow> = sqlx::query_as(
            "SELECT id, name, gpa, first_choice, major, program, gender FROM survey ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(SurveyRecord::try_from).collect()
    }

    /// Deletes every row whose id is in `ids` with a single statement.
    ///
    /// The id list is bound once as a JSON array, so its length is not bounded
    /// by SQLite's host parameter limit. Unknown ids contribute nothing.
    /// Returns the number of rows removed.
    pub async fn delete(&self, ids: &[i64]) -> StoreResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let encoded = serde_json::to_string(ids)?;
        let result = sqlx::query("DELETE FROM survey WHERE id IN (SELECT value FROM json_each(?1))")
            .bind(encoded)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM survey")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Waits for checked-out connections and closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

use chrono::{DateTime, Utc};
use sqlx::Row;
use trivia_core::model::ScoreRecord;

use super::SqliteRepository;
use crate::repository::{ScoreRepository, ScoreRow, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn map_score_row(row: &sqlx::sqlite::SqliteRow) -> Result<ScoreRow, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let name: String = row.try_get("name").map_err(ser)?;
    let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
    let answered = u32_from_i64("answered", row.try_get::<i64, _>("answered").map_err(ser)?)?;
    let gender: String = row.try_get("gender").map_err(ser)?;
    let recorded_at = row.try_get("recorded_at").map_err(ser)?;

    let record = ScoreRecord::new(name, score, answered, gender).map_err(ser)?;
    Ok(ScoreRow {
        id,
        recorded_at,
        record,
    })
}

#[async_trait::async_trait]
impl ScoreRepository for SqliteRepository {
    async fn append_score(
        &self,
        record: &ScoreRecord,
        recorded_at: DateTime<Utc>,
    ) -> Result<i64, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO scores (name, score, answered, gender, recorded_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(record.name())
        .bind(i64::from(record.score()))
        .bind(i64::from(record.answered()))
        .bind(record.gender())
        .bind(recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(res.last_insert_rowid())
    }

    async fn list_scores(&self) -> Result<Vec<ScoreRow>, StorageError> {
        // Rowid order is insertion order, so DESC yields most-recent-first.
        let rows = sqlx::query(
            r"
                SELECT id, name, score, answered, gender, recorded_at
                FROM scores
                ORDER BY id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_score_row(&row)?);
        }
        Ok(out)
    }
}

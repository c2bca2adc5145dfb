//! Worker Repository

use super::{RepoError, RepoResult};
use shared::models::WorkerInfo;
use sqlx::SqlitePool;

/// Worker row including the argon2 PHC hash; never serialized
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkerRecord {
    pub id: i64,
    pub identifier: String,
    pub password_hash: String,
    pub created_at: i64,
}

impl From<WorkerRecord> for WorkerInfo {
    fn from(record: WorkerRecord) -> Self {
        Self {
            id: record.id,
            identifier: record.identifier,
            created_at: record.created_at,
        }
    }
}

pub async fn find_by_identifier(
    pool: &SqlitePool,
    identifier: &str,
) -> RepoResult<Option<WorkerRecord>> {
    let worker = sqlx::query_as::<_, WorkerRecord>(
        "SELECT id, identifier, password_hash, created_at FROM workers WHERE identifier = ?",
    )
    .bind(identifier)
    .fetch_optional(pool)
    .await?;
    Ok(worker)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<WorkerInfo>> {
    let worker = sqlx::query_as::<_, WorkerInfo>(
        "SELECT id, identifier, created_at FROM workers WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(worker)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<WorkerInfo>> {
    let workers = sqlx::query_as::<_, WorkerInfo>(
        "SELECT id, identifier, created_at FROM workers ORDER BY identifier",
    )
    .fetch_all(pool)
    .await?;
    Ok(workers)
}

/// Insert a worker; `password_hash` must already be an argon2 PHC string
pub async fn create(
    pool: &SqlitePool,
    identifier: &str,
    password_hash: &str,
) -> RepoResult<WorkerInfo> {
    let now = shared::util::now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO workers (identifier, password_hash, created_at) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(identifier)
    .bind(password_hash)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Worker '{identifier}' already exists"))
        }
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create worker".into()))
}

pub async fn update_password(
    pool: &SqlitePool,
    identifier: &str,
    password_hash: &str,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE workers SET password_hash = ?1 WHERE identifier = ?2")
        .bind(password_hash)
        .bind(identifier)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Worker '{identifier}' not found")));
    }
    Ok(())
}

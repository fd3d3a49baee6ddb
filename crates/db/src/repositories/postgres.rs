use async_trait::async_trait;
use eyre::{Result, WrapErr};
use routine_core::{
    models::routine::{Cohort, RoutineStore, WeeklyRoutine},
    repository::RoutineRepository,
};
use sqlx::{Pool, Postgres, Transaction, types::Json};
use tracing::debug;

use crate::models::{DbRoutineDocument, STORE_KEY};

pub async fn get_document(pool: &Pool<Postgres>, key: &str) -> Result<Option<DbRoutineDocument>> {
    let document = sqlx::query_as::<_, DbRoutineDocument>(
        r#"
        SELECT key, data, updated_at
        FROM routine_documents
        WHERE key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(document)
}

/// Locks the document row for the rest of the transaction, creating it if needed.
async fn lock_document(tx: &mut Transaction<'_, Postgres>, key: &str) -> Result<RoutineStore> {
    sqlx::query(
        r#"
        INSERT INTO routine_documents (key)
        VALUES ($1)
        ON CONFLICT (key) DO NOTHING
        "#,
    )
    .bind(key)
    .execute(&mut **tx)
    .await?;

    let Json(store) = sqlx::query_scalar::<_, Json<RoutineStore>>(
        r#"
        SELECT data
        FROM routine_documents
        WHERE key = $1
        FOR UPDATE
        "#,
    )
    .bind(key)
    .fetch_one(&mut **tx)
    .await?;

    Ok(store)
}

async fn write_document(tx: &mut Transaction<'_, Postgres>, key: &str, store: &RoutineStore) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE routine_documents
        SET data = $2, updated_at = NOW()
        WHERE key = $1
        "#,
    )
    .bind(key)
    .bind(Json(store))
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Keeps the timetable as one JSONB document row.
#[derive(Debug, Clone)]
pub struct PgRoutineRepository {
    pool: Pool<Postgres>,
    key: String,
}

impl PgRoutineRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_key(pool, STORE_KEY)
    }

    pub fn with_key(pool: Pool<Postgres>, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }

    async fn modify<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut RoutineStore) + Send,
    {
        let mut tx = self.pool.begin().await?;
        let mut store = lock_document(&mut tx, &self.key).await?;
        change(&mut store);
        write_document(&mut tx, &self.key, &store).await?;
        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl RoutineRepository for PgRoutineRepository {
    async fn load(&self) -> Result<RoutineStore> {
        let document = get_document(&self.pool, &self.key)
            .await
            .wrap_err("Failed to read routine document")?;
        Ok(document.map(|document| document.data.0).unwrap_or_default())
    }

    async fn save(&self, routine: WeeklyRoutine) -> Result<()> {
        debug!(routine = %routine.id, slots = routine.slots.len(), "writing routine to postgres");
        self.modify(move |store| store.upsert(routine))
            .await
            .wrap_err("Failed to write routine document")
    }

    async fn delete(&self, cohort: &Cohort, slot_id: &str) -> Result<()> {
        self.modify(|store| {
            store.remove_slot(cohort, slot_id);
        })
        .await
        .wrap_err("Failed to write routine document")
    }
}

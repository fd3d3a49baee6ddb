use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // One row per stored document; the timetable lives under a single key
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS routine_documents (
            key VARCHAR(255) PRIMARY KEY,
            data JSONB NOT NULL DEFAULT '{"routines": []}'::jsonb,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized");
    Ok(())
}

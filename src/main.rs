use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use routine_api::config::{ApiConfig, StorageBackend};
use routine_core::repository::RoutineRepository;
use routine_db::{
    create_pool,
    repositories::{FileRoutineRepository, MemoryRoutineRepository, PgRoutineRepository},
    schema::initialize_database,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Pick the timetable store
    let repository: Arc<dyn RoutineRepository> = match &config.storage {
        StorageBackend::Postgres(database_url) => {
            let db_pool = create_pool(database_url).await?;
            initialize_database(&db_pool).await?;
            Arc::new(PgRoutineRepository::new(db_pool))
        }
        StorageBackend::File(path) => Arc::new(FileRoutineRepository::new(path)),
        StorageBackend::Memory => Arc::new(MemoryRoutineRepository::new()),
    };

    // Start API server
    routine_api::start_server(config, repository).await?;

    Ok(())
}

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::{CheckInCommandHandler, CreateLoopCommandHandler};
use crate::application::config::{AppConfig, ConfigService};
use crate::application::queries::CheckInQueries;
use loopstreak_domain::check_in::CheckInRepository;
use loopstreak_domain::habit_loop::LoopRepository;
use loopstreak_domain::shared::{Clock, DomainError, SystemClock};
use loopstreak_infrastructure::logging::init_logger;
use loopstreak_infrastructure::persistence::repositories::{
    SqliteCheckInRepository, SqliteLoopRepository,
};
use loopstreak_infrastructure::Database;

pub struct Repositories {
    pub loops: Arc<dyn LoopRepository>,
    pub check_ins: Arc<dyn CheckInRepository>,
}

pub struct CommandHandlers {
    pub check_in: Arc<CheckInCommandHandler>,
    pub create_loop: Arc<CreateLoopCommandHandler>,
}

pub struct AppState {
    pub db: Arc<Database>,
    pub repositories: Repositories,
    pub command_handlers: CommandHandlers,
    pub queries: Arc<CheckInQueries>,
}

/// Load configuration, install the logger and build the application state.
pub async fn start(config_path: &Path) -> anyhow::Result<AppState> {
    let config_service = ConfigService::load(config_path)?;
    let config = config_service.config();

    init_logger(&config.log_dir, config.log_level.as_str())?;

    let state = build_app_state(config).await?;
    info!(
        config_path = %config_path.display(),
        "application state ready"
    );
    Ok(state)
}

/// Open the configured database, migrate it and wire handlers to it.
pub async fn build_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let db_path = config
        .database_path
        .to_str()
        .ok_or_else(|| {
            DomainError::Infrastructure(format!(
                "Invalid database path: {}",
                config.database_path.display()
            ))
        })?;

    info!("Database path: {}", db_path);

    let started_at = Instant::now();
    let database = Database::new(db_path, config.database_options()).await?;
    info!(
        "Database connection established ({}ms)",
        started_at.elapsed().as_millis()
    );

    build_app_state_with_database(database, Arc::new(SystemClock)).await
}

/// Wire handlers to an already opened database. Migrations run here.
pub async fn build_app_state_with_database(
    database: Database,
    clock: Arc<dyn Clock>,
) -> Result<AppState, DomainError> {
    let started_at = Instant::now();
    database.run_migrations().await?;
    info!(
        "Migrations completed ({}ms)",
        started_at.elapsed().as_millis()
    );

    let pool = Arc::new(database.pool().clone());
    let timeouts = database.timeouts();

    let loops = Arc::new(SqliteLoopRepository::with_timeouts(pool.clone(), timeouts))
        as Arc<dyn LoopRepository>;
    let check_ins = Arc::new(SqliteCheckInRepository::with_timeouts(pool, timeouts))
        as Arc<dyn CheckInRepository>;

    let command_handlers = CommandHandlers {
        check_in: Arc::new(
            CheckInCommandHandler::new(loops.clone(), check_ins.clone())
                .with_clock(clock.clone()),
        ),
        create_loop: Arc::new(
            CreateLoopCommandHandler::new(loops.clone()).with_clock(clock.clone()),
        ),
    };

    let queries = Arc::new(
        CheckInQueries::new(loops.clone(), check_ins.clone()).with_clock(clock),
    );

    Ok(AppState {
        db: Arc::new(database),
        repositories: Repositories { loops, check_ins },
        command_handlers,
        queries,
    })
}

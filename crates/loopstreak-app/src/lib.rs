//! Application layer: check-in orchestration, streak queries, configuration
//! and wiring of the SQLite adapters.

pub mod application;
pub mod bootstrap;

pub use application::commands::{
    CheckInCommand, CheckInCommandResult, CommandHandler, CreateLoopCommand, CreateLoopResult,
};
pub use application::commands::handlers::{CheckInCommandHandler, CreateLoopCommandHandler};
pub use application::config::{AppConfig, ConfigService, LogLevel};
pub use application::queries::CheckInQueries;
pub use bootstrap::{build_app_state, start, AppState};

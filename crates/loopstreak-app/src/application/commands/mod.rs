pub mod check_in_commands;
pub mod command_handler;
pub mod handlers;
pub mod loop_commands;

pub use check_in_commands::{CheckInCommand, CheckInCommandResult};
pub use command_handler::CommandHandler;
pub use loop_commands::{CreateLoopCommand, CreateLoopResult};

mod check_in_handler;
mod create_loop_handler;
mod loop_locks;


pub use check_in_handler::CheckInCommandHandler;
pub use create_loop_handler::CreateLoopCommandHandler;

mod aggregate;
mod repository;

#[cfg(test)]
mod aggregate_test;

pub use aggregate::HabitLoop;
pub use repository::LoopRepository;

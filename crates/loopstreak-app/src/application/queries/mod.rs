mod check_in_queries;

pub use check_in_queries::CheckInQueries;

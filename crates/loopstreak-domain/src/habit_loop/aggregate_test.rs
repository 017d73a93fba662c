#[cfg(test)]
mod tests {
    use super::super::aggregate::*;
    use crate::check_in::Streaks;
    use crate::shared::{DomainError, LoopId, UserId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_new_loop_starts_without_streaks() {
        let owner = UserId::new();
        let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let habit = HabitLoop::new(owner.clone(), "  Morning run ".to_string(), created_at).unwrap();

        assert_eq!(habit.name(), "Morning run");
        assert_eq!(habit.streaks(), Streaks::ZERO);
        assert!(habit.is_owned_by(&owner));
        assert!(!habit.is_owned_by(&UserId::new()));
        assert_eq!(habit.created_at(), created_at);
    }

    #[test]
    fn test_new_loop_rejects_blank_name() {
        match HabitLoop::new(UserId::new(), "   ".to_string(), Utc::now()) {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_streaks_replaces_both_fields() {
        let mut habit = HabitLoop::restore(
            LoopId::from_string("loop-1"),
            UserId::from_string("user-1"),
            "Read".to_string(),
            4,
            9,
            Utc::now(),
        );

        habit.apply_streaks(Streaks::new(0, 9));
        assert_eq!(habit.current_streak(), 0);
        assert_eq!(habit.longest_streak(), 9);
    }
}

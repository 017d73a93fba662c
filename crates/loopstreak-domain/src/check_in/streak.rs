use std::collections::BTreeSet;

use super::day::Day;
use super::value_objects::{StreakSummary, Streaks};

/// Derives streak metrics from the set of days a loop was checked in.
///
/// Pure and total: any finite input and any reference day produce a result.
pub struct StreakCalculator;

impl StreakCalculator {
    /// Compute `{current, longest}` as of `reference_day`.
    ///
    /// The current streak survives one elapsed day: if today has no check-in
    /// yet but yesterday does, the run ending yesterday still counts.
    pub fn compute<I>(days: I, reference_day: Day) -> Streaks
    where
        I: IntoIterator<Item = Day>,
    {
        let days: BTreeSet<Day> = days.into_iter().collect();
        Self::compute_sorted(&days, reference_day)
    }

    pub fn compute_sorted(days: &BTreeSet<Day>, reference_day: Day) -> Streaks {
        if days.is_empty() {
            return Streaks::ZERO;
        }

        Streaks {
            current_streak: Self::current_streak(days, reference_day),
            longest_streak: Self::longest_streak(days),
        }
    }

    /// Streaks plus total check-in days and the most recent day.
    pub fn summarize(days: &BTreeSet<Day>, reference_day: Day) -> StreakSummary {
        StreakSummary {
            streaks: Self::compute_sorted(days, reference_day),
            total_check_in_days: u32::try_from(days.len()).unwrap_or(u32::MAX),
            last_check_in_day: days.last().copied(),
        }
    }

    fn longest_streak(days: &BTreeSet<Day>) -> u32 {
        let mut longest = 0u32;
        let mut running = 0u32;
        let mut previous: Option<Day> = None;

        for &day in days {
            running = match previous {
                Some(prev) if day.days_since(prev) == 1 => running.saturating_add(1),
                _ => 1,
            };
            longest = longest.max(running);
            previous = Some(day);
        }

        longest
    }

    fn current_streak(days: &BTreeSet<Day>, reference_day: Day) -> u32 {
        let anchor = if days.contains(&reference_day) {
            Some(reference_day)
        } else {
            reference_day.pred().filter(|yesterday| days.contains(yesterday))
        };

        let Some(mut cursor) = anchor else {
            return 0;
        };

        let mut count = 1u32;
        while let Some(prev) = cursor.pred() {
            if !days.contains(&prev) {
                break;
            }
            count = count.saturating_add(1);
            cursor = prev;
        }

        count
    }
}

/// Free-function form of [`StreakCalculator::compute`].
pub fn compute_streaks<I>(days: I, reference_day: Day) -> Streaks
where
    I: IntoIterator<Item = Day>,
{
    StreakCalculator::compute(days, reference_day)
}

use shared_config::ScheduleConfig;

use crate::models::AvailabilityError;
use crate::services::interval::MINUTES_PER_DAY;

/// Candidate start times for one business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    day_start: u32,
    day_end: u32,
    step: u32,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            day_start: Self::DAY_START_MINUTES,
            day_end: Self::DAY_END_MINUTES,
            step: Self::STEP_MINUTES,
        }
    }
}

impl SlotGrid {
    pub const DAY_START_MINUTES: u32 = 390;
    pub const DAY_END_MINUTES: u32 = 1260;
    pub const STEP_MINUTES: u32 = 30;

    pub fn new(day_start: u32, day_end: u32, step: u32) -> Result<Self, AvailabilityError> {
        if step == 0 {
            return Err(AvailabilityError::InvalidGrid("step must be positive".to_string()));
        }
        if day_start >= day_end || day_end > MINUTES_PER_DAY {
            return Err(AvailabilityError::InvalidGrid(format!(
                "window {}..{} is not within one day",
                day_start, day_end
            )));
        }

        Ok(Self { day_start, day_end, step })
    }

    pub fn from_config(schedule: &ScheduleConfig) -> Result<Self, AvailabilityError> {
        Self::new(
            schedule.day_start_minutes,
            schedule.day_end_minutes,
            schedule.slot_step_minutes,
        )
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Starts from `day_start` in `step` increments, strictly before `day_end`.
    pub fn slots(&self) -> impl Iterator<Item = u32> {
        (self.day_start..self.day_end).step_by(self.step as usize)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::interval::format_time;

    #[test]
    fn clinic_day_has_29_half_hour_slots() {
        let grid = SlotGrid::default();
        let slots: Vec<String> = grid.slots().map(format_time).collect();

        assert_eq!(grid.len(), 29);
        assert_eq!(slots.first().map(String::as_str), Some("06:30"));
        assert_eq!(slots.last().map(String::as_str), Some("20:30"));
        assert!(grid.slots().zip(grid.slots().skip(1)).all(|(a, b)| b - a == 30));
    }

    #[test]
    fn grid_is_regenerated_identically() {
        let grid = SlotGrid::default();
        assert_eq!(grid.slots().collect::<Vec<_>>(), grid.slots().collect::<Vec<_>>());
    }

    #[test]
    fn default_config_builds_default_grid() {
        let grid = SlotGrid::from_config(&ScheduleConfig::default()).unwrap();
        assert_eq!(grid, SlotGrid::default());
    }

    #[test]
    fn last_slot_stays_before_closing() {
        let grid = SlotGrid::new(480, 500, 15).unwrap();
        assert_eq!(grid.slots().collect::<Vec<_>>(), vec![480, 495]);
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert!(SlotGrid::new(390, 1260, 0).is_err());
        assert!(SlotGrid::new(1260, 390, 30).is_err());
        assert!(SlotGrid::new(0, MINUTES_PER_DAY + 1, 30).is_err());
    }
}

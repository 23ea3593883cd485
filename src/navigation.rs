use std::str::FromStr;

use crate::error::Result;
use crate::month::{DisplayedMonth, Direction};

/// Month state holder: the displayed month plus the transient navigation
/// state (direction of the last move and the animation lock).
#[derive(Debug, Clone)]
pub struct MonthState {
    month: DisplayedMonth,
    direction: Direction,
    locked: bool,
}

impl MonthState {
    pub fn new(month: DisplayedMonth) -> Self {
        MonthState {
            month,
            direction: Direction::Neutral,
            locked: false,
        }
    }

    pub fn month(&self) -> DisplayedMonth {
        self.month
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Replaces the displayed month without touching direction or lock.
    pub fn set(&mut self, month: DisplayedMonth) {
        self.month = month;
    }

    /// Replaces the displayed month from its `yyyy-MM` form. On error the
    /// state is left untouched.
    pub fn set_month(&mut self, month: &str) -> Result<()> {
        self.month = DisplayedMonth::from_str(month)?;
        Ok(())
    }

    pub fn release_lock(&mut self) {
        self.locked = false;
    }
}

impl Default for MonthState {
    fn default() -> Self {
        MonthState::new(DisplayedMonth::current())
    }
}

/// Month navigation. Every method returns whether the navigation was
/// accepted; requests arriving while a transition is in flight are dropped.
pub trait Navigation {
    fn go_to_month(&mut self, target: DisplayedMonth) -> bool;

    fn go_to_next_month(&mut self) -> bool;

    fn go_to_previous_month(&mut self) -> bool;
}

impl Navigation for MonthState {
    fn go_to_month(&mut self, target: DisplayedMonth) -> bool {
        if self.locked {
            log::debug!("Navigation to {} dropped, transition in flight", target);
            return false;
        }

        let direction = Direction::between(&self.month, &target);
        if direction == Direction::Neutral {
            return false;
        }

        self.month = target;
        self.direction = direction;
        self.locked = true;

        true
    }

    fn go_to_next_month(&mut self) -> bool {
        self.go_to_month(self.month.succ())
    }

    fn go_to_previous_month(&mut self) -> bool {
        self.go_to_month(self.month.pred())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(s: &str) -> MonthState {
        MonthState::new(s.parse().unwrap())
    }

    #[test]
    fn next_sets_direction_and_lock() {
        let mut s = state("2024-05");

        assert!(s.go_to_next_month());
        assert_eq!(s.month().to_string(), "2024-06");
        assert_eq!(s.direction(), Direction::Forward);
        assert!(s.is_locked());
    }

    #[test]
    fn previous_sets_direction_and_lock() {
        let mut s = state("2024-05");

        assert!(s.go_to_previous_month());
        assert_eq!(s.month().to_string(), "2024-04");
        assert_eq!(s.direction(), Direction::Backward);
        assert!(s.is_locked());
    }

    #[test]
    fn locked_navigation_is_dropped() {
        let mut s = state("2024-05");

        assert!(s.go_to_next_month());
        assert!(!s.go_to_next_month());
        assert!(!s.go_to_previous_month());

        assert_eq!(s.month().to_string(), "2024-06");
        assert_eq!(s.direction(), Direction::Forward);
    }

    #[test]
    fn next_then_previous_is_identity() {
        let mut s = state("2024-05");

        assert!(s.go_to_next_month());
        s.release_lock();
        assert!(s.go_to_previous_month());
        s.release_lock();

        assert_eq!(s.month().to_string(), "2024-05");
    }

    #[test]
    fn crosses_year_boundaries() {
        let mut s = state("2023-12");
        assert!(s.go_to_next_month());
        assert_eq!(s.month().to_string(), "2024-01");

        let mut s = state("2024-01");
        assert!(s.go_to_previous_month());
        assert_eq!(s.month().to_string(), "2023-12");
    }

    #[test]
    fn jump_to_same_month_is_noop() {
        let mut s = state("2024-05");
        let target = s.month();

        assert!(!s.go_to_month(target));
        assert!(!s.is_locked());
        assert_eq!(s.direction(), Direction::Neutral);
    }

    #[test]
    fn jump_direction_follows_time() {
        let mut s = state("2024-05");
        assert!(s.go_to_month("2020-01".parse().unwrap()));
        assert_eq!(s.direction(), Direction::Backward);
    }

    #[test]
    fn setter_keeps_state_on_error() {
        let mut s = state("2024-05");

        assert!(s.set_month("2024-13").is_err());
        assert_eq!(s.month().to_string(), "2024-05");

        s.set_month("1999-12").unwrap();
        assert_eq!(s.month().to_string(), "1999-12");
        assert!(!s.is_locked());
    }
}

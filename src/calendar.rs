use chrono::NaiveDate;
use std::time::Duration;

use crate::animation::{Notification, Presence, Spring};
use crate::cmds::Cmd;
use crate::grid::{build_grid, CalendarCell};
use crate::month::{DisplayedMonth, Direction};
use crate::navigation::{MonthState, Navigation};

/// The month calendar component: displayed month, navigation lock and the
/// month views currently on screen.
pub struct MonthCalendar {
    state: MonthState,
    presence: Presence,
}

impl MonthCalendar {
    pub fn new(month: DisplayedMonth, spring: Spring) -> Self {
        MonthCalendar {
            state: MonthState::new(month),
            presence: Presence::with_initial(spring, month),
        }
    }

    pub fn month(&self) -> DisplayedMonth {
        self.state.month()
    }

    pub fn direction(&self) -> Direction {
        self.state.direction()
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_locked()
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    /// Cells of the displayed month.
    pub fn grid(&self, today: NaiveDate) -> Vec<CalendarCell> {
        build_grid(&self.state.month(), today)
    }

    /// Feeds `dt` to the running transitions. Releases the navigation lock
    /// once the outgoing month view is gone.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(notification) = self.presence.advance(dt) {
            self.notify(notification);
        }
    }

    /// Finishes every transition immediately and unlocks navigation. Used
    /// when the calendar goes away mid-transition.
    pub fn teardown(&mut self) {
        if let Some(notification) = self.presence.finish() {
            self.notify(notification);
        }
        self.state.release_lock();
    }

    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::ExitComplete => {
                log::debug!("Transition to {} complete", self.state.month());
                self.state.release_lock();
            }
        }
    }

    fn start_transition(&mut self, accepted: bool) -> bool {
        if accepted {
            self.presence
                .present(self.state.month(), self.state.direction());
        }
        accepted
    }

    /// Runs a navigation command; returns the command unless it was consumed.
    pub fn handle(&mut self, cmd: Cmd, today: NaiveDate) -> Cmd {
        match cmd {
            Cmd::NextMonth => {
                self.go_to_next_month();
                Cmd::Noop
            }
            Cmd::PrevMonth => {
                self.go_to_previous_month();
                Cmd::Noop
            }
            Cmd::Today => {
                self.go_to_month(DisplayedMonth::of(&today));
                Cmd::Noop
            }
            other => other,
        }
    }
}

impl Navigation for MonthCalendar {
    fn go_to_month(&mut self, target: DisplayedMonth) -> bool {
        let accepted = self.state.go_to_month(target);
        self.start_transition(accepted)
    }

    fn go_to_next_month(&mut self) -> bool {
        let accepted = self.state.go_to_next_month();
        self.start_transition(accepted)
    }

    fn go_to_previous_month(&mut self) -> bool {
        let accepted = self.state.go_to_previous_month();
        self.start_transition(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Phase;

    fn calendar(s: &str) -> MonthCalendar {
        MonthCalendar::new(s.parse().unwrap(), Spring::default())
    }

    fn settle(cal: &mut MonthCalendar) {
        for _ in 0..100 {
            cal.tick(Duration::from_millis(16));
        }
    }

    #[test]
    fn starts_unlocked_and_still() {
        let cal = calendar("2024-05");
        assert!(!cal.is_animating());
        assert_eq!(cal.direction(), Direction::Neutral);
        assert!(cal.presence().is_idle());
    }

    #[test]
    fn double_next_changes_month_once() {
        let mut cal = calendar("2024-05");

        assert!(cal.go_to_next_month());
        assert!(!cal.go_to_next_month());

        assert_eq!(cal.month().to_string(), "2024-06");
        assert_eq!(cal.presence().len(), 2);
    }

    #[test]
    fn lock_released_after_exit_completes() {
        let mut cal = calendar("2024-05");
        cal.go_to_next_month();

        cal.tick(Duration::from_millis(100));
        assert!(cal.is_animating());

        cal.tick(Duration::from_millis(250));
        assert!(!cal.is_animating());
        assert_eq!(cal.presence().len(), 1);
        assert_eq!(
            cal.presence().get(&cal.month()).map(|i| i.phase()),
            Some(Phase::Settled)
        );

        assert!(cal.go_to_next_month());
        assert_eq!(cal.month().to_string(), "2024-07");
    }

    #[test]
    fn round_trip_returns_to_start() {
        let mut cal = calendar("2024-12");

        cal.go_to_next_month();
        settle(&mut cal);
        assert_eq!(cal.month().to_string(), "2025-01");

        cal.go_to_previous_month();
        settle(&mut cal);
        assert_eq!(cal.month().to_string(), "2024-12");
        assert_eq!(cal.direction(), Direction::Backward);
    }

    #[test]
    fn teardown_unlocks() {
        let mut cal = calendar("2024-05");
        cal.go_to_previous_month();
        cal.tick(Duration::from_millis(16));

        cal.teardown();
        assert!(!cal.is_animating());
        assert!(cal.presence().is_idle());
        assert_eq!(cal.presence().len(), 1);
    }

    #[test]
    fn zero_duration_unlocks_on_next_tick() {
        let mut cal = MonthCalendar::new("2024-05".parse().unwrap(), Spring::new(Duration::ZERO));

        cal.go_to_next_month();
        assert!(cal.is_animating());

        cal.tick(Duration::ZERO);
        assert!(!cal.is_animating());
    }

    #[test]
    fn commands() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let mut cal = calendar("2024-02");

        assert_eq!(cal.handle(Cmd::NextMonth, today), Cmd::Noop);
        assert_eq!(cal.month().to_string(), "2024-03");
        settle(&mut cal);

        assert_eq!(cal.handle(Cmd::PrevMonth, today), Cmd::Noop);
        assert_eq!(cal.month().to_string(), "2024-02");
        settle(&mut cal);

        cal.handle(Cmd::Today, today);
        assert_eq!(cal.month().to_string(), "2024-05");
        assert_eq!(cal.direction(), Direction::Forward);

        assert_eq!(cal.handle(Cmd::Exit, today), Cmd::Exit);
    }

    #[test]
    fn grid_follows_displayed_month() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let mut cal = calendar("2024-01");

        cal.go_to_next_month();
        let grid = cal.grid(today);

        assert_eq!(grid.len(), 35);
        assert_eq!(grid.iter().filter(|c| c.is_today).count(), 1);
    }
}

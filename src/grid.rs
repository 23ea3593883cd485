use chrono::{Datelike, NaiveDate, Weekday};

use crate::month::DisplayedMonth;

pub const WEEK_START: Weekday = Weekday::Sun;
pub const WEEK_END: Weekday = Weekday::Sat;
pub const DAYS_PER_WEEK: usize = 7;

pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// One day slot of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
}

impl CalendarCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = (date.weekday().num_days_from_sunday() + 7 - WEEK_START.num_days_from_sunday()) % 7;
    date.checked_sub_days(chrono::Days::new(back as u64))
        .unwrap_or(NaiveDate::MIN)
}

fn end_of_week(date: NaiveDate) -> NaiveDate {
    let ahead = (WEEK_END.num_days_from_sunday() + 7 - date.weekday().num_days_from_sunday()) % 7;
    date.checked_add_days(chrono::Days::new(ahead as u64))
        .unwrap_or(NaiveDate::MAX)
}

/// Cells of `month` padded to whole Sunday-to-Saturday weeks, in ascending
/// order.
pub fn build_grid(month: &DisplayedMonth, today: NaiveDate) -> Vec<CalendarCell> {
    let start = start_of_week(month.first_day());
    let end = end_of_week(month.last_day());

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| CalendarCell {
            date,
            in_month: month.contains(&date),
            is_today: date == today,
        })
        .collect()
}

/// Splits a grid into its weeks.
pub fn weeks(cells: &[CalendarCell]) -> impl Iterator<Item = &[CalendarCell]> {
    cells.chunks(DAYS_PER_WEEK)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(s: &str) -> DisplayedMonth {
        s.parse().unwrap()
    }

    fn all_months(from: i32, to: i32) -> impl Iterator<Item = DisplayedMonth> {
        (from..=to).flat_map(|y| (1..=12).map(move |m| DisplayedMonth::new(y, m).unwrap()))
    }

    #[test]
    fn whole_weeks() {
        let today = date(2024, 6, 15);
        for m in all_months(1999, 2030) {
            let grid = build_grid(&m, today);
            assert!(!grid.is_empty());
            assert_eq!(grid.len() % DAYS_PER_WEEK, 0, "{}", m);
            assert!(grid.len() >= 28 && grid.len() <= 42, "{}", m);
        }
    }

    #[test]
    fn bounded_by_sunday_and_saturday() {
        let today = date(2024, 6, 15);
        for m in all_months(2000, 2028) {
            let grid = build_grid(&m, today);
            let first = grid.first().unwrap().date;
            let last = grid.last().unwrap().date;

            assert_eq!(first.weekday(), Weekday::Sun, "{}", m);
            assert_eq!(last.weekday(), Weekday::Sat, "{}", m);
            assert!(first <= m.first_day() && m.first_day() - first < chrono::Duration::days(7));
            assert!(last >= m.last_day() && last - m.last_day() < chrono::Duration::days(7));
        }
    }

    #[test]
    fn ascending_consecutive_days() {
        let grid = build_grid(&month("2023-10"), date(2023, 10, 1));
        for pair in grid.windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
    }

    #[test]
    fn in_month_flag() {
        for m in all_months(2023, 2025) {
            for cell in build_grid(&m, date(2024, 1, 1)) {
                assert_eq!(
                    cell.in_month,
                    cell.date.month() == m.number_from_month() && cell.date.year() == m.year()
                );
            }
        }
    }

    #[test]
    fn today_marked_once_within_range() {
        let today = date(2024, 3, 1);

        let marked = |m: &str| {
            build_grid(&month(m), today)
                .iter()
                .filter(|c| c.is_today)
                .count()
        };

        assert_eq!(marked("2024-03"), 1);
        // 2024-03-01 is a Friday and shows up as trailing padding of February
        assert_eq!(marked("2024-02"), 1);
        assert_eq!(marked("2024-04"), 0);
        assert_eq!(marked("2023-03"), 0);
    }

    #[test]
    fn today_compared_by_date() {
        let grid = build_grid(&month("2024-03"), date(2024, 3, 12));
        let today: Vec<_> = grid.iter().filter(|c| c.is_today).collect();

        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2024, 3, 12));
        assert!(today[0].in_month);
    }

    #[test]
    fn leap_february_2024() {
        let grid = build_grid(&month("2024-02"), date(2024, 2, 10));

        assert_eq!(grid.first().unwrap().date, date(2024, 1, 28));
        assert_eq!(grid.last().unwrap().date, date(2024, 3, 2));
        assert_eq!(grid.len(), 35);

        let leap_day = grid
            .iter()
            .find(|c| c.date == date(2024, 2, 29))
            .expect("leap day is in the grid");
        assert!(leap_day.in_month);

        assert!(!grid[0].in_month);
        assert!(!grid.last().unwrap().in_month);
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_padding() {
        // September 2024 starts on a Sunday, ends on a Monday
        let grid = build_grid(&month("2024-09"), date(2024, 9, 1));
        assert_eq!(grid[0].date, date(2024, 9, 1));
        assert!(grid[0].in_month);
        assert_eq!(grid.last().unwrap().date, date(2024, 10, 5));
    }

    #[test]
    fn four_week_february() {
        // February 2015 starts on Sunday and ends on Saturday
        let grid = build_grid(&month("2015-02"), date(2015, 2, 1));
        assert_eq!(grid.len(), 28);
        assert!(grid.iter().all(|c| c.in_month));
    }

    #[test]
    fn split_into_weeks() {
        let grid = build_grid(&month("2024-02"), date(2024, 2, 10));
        let rows: Vec<_> = weeks(&grid).collect();

        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|w| w.len() == DAYS_PER_WEEK));
        assert!(rows.iter().all(|w| w[0].date.weekday() == WEEK_START));
    }
}

//! Layout of one month view as positioned text spans.
//!
//! Positions are relative to the calendar pane; everything outside
//! `0..PANE_WIDTH` is clipped so that sliding views never leak out of it.

use chrono::NaiveDate;

use crate::animation::Pose;
use crate::grid::{build_grid, weeks, CalendarCell, DAYS_PER_WEEK, WEEKDAY_LABELS};
use crate::month::DisplayedMonth;

pub const CELL_WIDTH: i32 = 4;
pub const PANE_WIDTH: i32 = DAYS_PER_WEEK as i32 * CELL_WIDTH;

pub const HEADER_ROW: i32 = 0;
pub const LABEL_ROW: i32 = 2;
pub const FIRST_WEEK_ROW: i32 = 4;
pub const MAX_WEEKS: i32 = 6;
pub const PANE_HEIGHT: i32 = FIRST_WEEK_ROW + MAX_WEEKS;

const PREV_SYMBOL: &str = "<";
const NEXT_SYMBOL: &str = ">";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Button,
    Title,
    Label,
    Day,
    Padding,
    Today,
    Faded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub col: i32,
    pub row: i32,
    pub text: String,
    pub tone: Tone,
}

/// How much of a view is drawn for a given opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Faded,
    Full,
}

impl Visibility {
    pub fn of(opacity: f64) -> Self {
        if opacity < 1.0 / 3.0 {
            Visibility::Hidden
        } else if opacity < 2.0 / 3.0 {
            Visibility::Faded
        } else {
            Visibility::Full
        }
    }
}

/// Cuts `text` starting at `col` down to the part inside the pane.
fn clip(col: i32, text: &str) -> Option<(i32, String)> {
    let visible: String = text
        .chars()
        .enumerate()
        .filter(|(i, _)| {
            let c = col + *i as i32;
            c >= 0 && c < PANE_WIDTH
        })
        .map(|(_, c)| c)
        .collect();

    if visible.is_empty() {
        None
    } else {
        Some((col.max(0), visible))
    }
}

fn push_clipped(spans: &mut Vec<Span>, col: i32, row: i32, text: &str, tone: Tone) {
    if let Some((col, text)) = clip(col, text) {
        spans.push(Span {
            col,
            row,
            text,
            tone,
        });
    }
}

/// Column offset of a pose, relative to the pane width.
pub fn column_offset(pose: &Pose) -> i32 {
    (pose.x / 100.0 * PANE_WIDTH as f64).round() as i32
}

/// The static parts of the pane: navigation buttons and weekday labels.
pub fn chrome() -> Vec<Span> {
    let mut spans = vec![
        Span {
            col: 0,
            row: HEADER_ROW,
            text: PREV_SYMBOL.to_owned(),
            tone: Tone::Button,
        },
        Span {
            col: PANE_WIDTH - NEXT_SYMBOL.len() as i32,
            row: HEADER_ROW,
            text: NEXT_SYMBOL.to_owned(),
            tone: Tone::Button,
        },
    ];

    for (i, label) in WEEKDAY_LABELS.iter().enumerate() {
        spans.push(Span {
            col: i as i32 * CELL_WIDTH,
            row: LABEL_ROW,
            text: format!("{:>width$}", label, width = CELL_WIDTH as usize),
            tone: Tone::Label,
        });
    }

    spans
}

pub struct MonthPane {
    month: DisplayedMonth,
    cells: Vec<CalendarCell>,
    pose: Pose,
    today_char: Option<char>,
}

impl MonthPane {
    pub fn new(month: DisplayedMonth, today: NaiveDate) -> Self {
        MonthPane {
            month,
            cells: build_grid(&month, today),
            pose: Pose::CENTER,
            today_char: Some('*'),
        }
    }

    pub fn pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn today_char(mut self, today_char: Option<char>) -> Self {
        self.today_char = today_char;
        self
    }

    fn day_text(&self, cell: &CalendarCell) -> String {
        let marker = if cell.is_today {
            self.today_char.unwrap_or(' ')
        } else {
            ' '
        };
        format!(" {}{:>2}", marker, cell.day())
    }

    /// The sliding parts of the pane: title and day grid.
    pub fn spans(&self) -> Vec<Span> {
        let visibility = Visibility::of(self.pose.opacity);
        if visibility == Visibility::Hidden {
            return Vec::new();
        }

        let tone = |tone: Tone| {
            if visibility == Visibility::Faded {
                Tone::Faded
            } else {
                tone
            }
        };

        let offset = column_offset(&self.pose);
        let mut spans = Vec::new();

        let title = self.month.title();
        let title_col = (PANE_WIDTH - title.chars().count() as i32) / 2 + offset;
        push_clipped(&mut spans, title_col, HEADER_ROW, &title, tone(Tone::Title));

        for (row, week) in weeks(&self.cells).enumerate() {
            for (col, cell) in week.iter().enumerate() {
                let cell_tone = if cell.is_today {
                    Tone::Today
                } else if cell.in_month {
                    Tone::Day
                } else {
                    Tone::Padding
                };

                push_clipped(
                    &mut spans,
                    col as i32 * CELL_WIDTH + offset,
                    FIRST_WEEK_ROW + row as i32,
                    &self.day_text(cell),
                    tone(cell_tone),
                );
            }
        }

        spans
    }
}

/// Renders spans into plain text lines, later spans overwriting earlier ones.
pub fn to_lines(spans: &[Span]) -> Vec<String> {
    let rows = spans.iter().map(|s| s.row + 1).max().unwrap_or(0).max(0) as usize;
    let mut buffer = vec![vec![' '; PANE_WIDTH as usize]; rows];

    for span in spans {
        if span.row < 0 {
            continue;
        }
        let line = &mut buffer[span.row as usize];
        for (i, c) in span.text.chars().enumerate() {
            let col = span.col as usize + i;
            if col < line.len() {
                line[col] = c;
            }
        }
    }

    buffer
        .into_iter()
        .map(|line| line.into_iter().collect::<String>().trim_end().to_owned())
        .collect()
}

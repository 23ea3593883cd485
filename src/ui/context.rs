use chrono::prelude::*;

use crate::animation::Spring;
use crate::calendar::MonthCalendar;
use crate::cmds::Cmd;
use crate::config::Config;
use crate::month::DisplayedMonth;

use unsegen::base::style::*;

use super::month_pane::Tone;

#[derive(Clone, Debug)]
pub struct Theme {
    pub button_style: StyleModifier,
    pub title_style: StyleModifier,
    pub label_style: StyleModifier,
    pub day_style: StyleModifier,
    pub padding_style: StyleModifier,
    pub today_style: StyleModifier,
    pub faded_style: StyleModifier,
    pub today_char: Option<char>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            button_style: StyleModifier::new().bold(true),
            title_style: StyleModifier::new().fg_color(Color::Yellow).bold(true),
            label_style: StyleModifier::new().fg_color(Color::LightBlack),
            day_style: StyleModifier::new().bold(true),
            padding_style: StyleModifier::new().fg_color(Color::LightBlack),
            today_style: StyleModifier::new()
                .fg_color(Color::White)
                .bg_color(Color::Magenta)
                .bold(true),
            faded_style: StyleModifier::new().fg_color(Color::LightBlack),
            today_char: Some('*'),
        }
    }
}

impl Theme {
    pub fn from_config(config: &Config) -> Self {
        Theme {
            today_char: config.today_char,
            ..Theme::default()
        }
    }

    pub fn style_for(&self, tone: Tone) -> StyleModifier {
        match tone {
            Tone::Button => self.button_style,
            Tone::Title => self.title_style,
            Tone::Label => self.label_style,
            Tone::Day => self.day_style,
            Tone::Padding => self.padding_style,
            Tone::Today => self.today_style,
            Tone::Faded => self.faded_style,
        }
    }
}

pub struct Context {
    pub theme: Theme,
    calendar: MonthCalendar,
    now: DateTime<Local>,
}

impl Context {
    pub fn new(config: &Config, month: DisplayedMonth) -> Self {
        Context {
            theme: Theme::from_config(config),
            calendar: MonthCalendar::new(month, Spring::new(config.animation_duration)),
            now: Local::now(),
        }
    }

    pub fn calendar(&self) -> &MonthCalendar {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut MonthCalendar {
        &mut self.calendar
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn update(&mut self) {
        self.now = Local::now();
    }

    pub fn handle(&mut self, cmd: Cmd) -> Cmd {
        let today = self.today();
        self.calendar.handle(cmd, today)
    }
}

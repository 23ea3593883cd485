use std::fmt::Write;
use unsegen::base::*;
use unsegen::widget::*;

use crate::animation::Phase;

use super::month_pane::{chrome, MonthPane, Span, PANE_HEIGHT, PANE_WIDTH};
use super::Context;

/// Spans of the whole pane: every live month view at its current pose, then
/// the chrome on top. Exiting views are laid out before the entering one so
/// the latter wins where both overlap.
pub fn pane_spans(context: &Context) -> Vec<Span> {
    let calendar = context.calendar();
    let presence = calendar.presence();
    let spring = presence.spring();

    let mut instances: Vec<_> = presence.instances().collect();
    instances.sort_by_key(|instance| instance.phase() != Phase::Exiting);

    let mut spans = Vec::new();
    for instance in instances {
        spans.extend(
            MonthPane::new(instance.key(), context.today())
                .pose(instance.pose(spring))
                .today_char(context.theme.today_char)
                .spans(),
        );
    }
    spans.extend(chrome());
    spans
}

pub struct CalendarWindow<'a> {
    context: &'a Context,
}

impl<'a> CalendarWindow<'a> {
    pub fn new(context: &'a Context) -> Self {
        CalendarWindow { context }
    }
}

impl Widget for CalendarWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(PANE_WIDTH as usize),
            height: RowDemand::at_least(PANE_HEIGHT as usize),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;

        let width = window.get_width().raw_value();
        let height = window.get_height().raw_value();
        let left = ((width - PANE_WIDTH) / 2).max(0);
        let top = ((height - PANE_HEIGHT) / 3).max(0);

        let mut cursor = Cursor::new(&mut window);

        for span in pane_spans(self.context) {
            cursor.move_to(ColIndex::new(left + span.col), RowIndex::new(top + span.row));
            cursor.set_style_modifier(theme.style_for(span.tone));

            if let Err(err) = write!(&mut cursor, "{}", span.text) {
                log::warn!("Error while writing calendar: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::navigation::Navigation;
    use crate::ui::month_pane::to_lines;
    use std::time::Duration;

    #[test]
    fn pane_slides_between_months() {
        let config = Config::default();
        let mut context = Context::new(&config, "2024-02".parse().unwrap());

        let before = to_lines(&pane_spans(&context));
        assert!(before[0].contains("February 2024"));

        context.calendar_mut().go_to_next_month();
        context.calendar_mut().tick(Duration::from_millis(60));
        let during = to_lines(&pane_spans(&context));
        assert!(!during[0].contains("February 2024"));
        assert!(!during[0].contains("March 2024"));

        context.calendar_mut().tick(Duration::from_secs(1));
        let after = to_lines(&pane_spans(&context));
        assert!(after[0].contains("March 2024"));
        assert_eq!(after[2], before[2]);
    }
}

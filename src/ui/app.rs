use std::time::Instant;

use crate::cmds::Cmd;
use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::month::DisplayedMonth;

use super::{pane_spans, to_lines, CalendarWindow, Context};

use unsegen::base::Terminal;
use unsegen::input::Input;
use unsegen::widget::*;

pub struct App<'a> {
    config: &'a Config,
    context: Context,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, month: DisplayedMonth) -> App<'a> {
        let context = Context::new(config, month);
        App { config, context }
    }

    /// The calendar as plain text, for non-interactive output.
    pub fn show(&self) -> String {
        to_lines(&pane_spans(&self.context)).join("\n")
    }

    fn command_for(&self, input: &Input) -> Cmd {
        self.config
            .key_map
            .iter()
            .find(|(key, _)| input.matches(**key))
            .map_or(Cmd::Noop, |(_, cmd)| *cmd)
    }

    fn draw(&self, term: &mut Terminal) {
        let root = term.create_root_window();
        CalendarWindow::new(&self.context).draw(root, RenderingHints::new());
        term.present();
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut run = true;
        let mut last_frame = Instant::now();

        self.draw(&mut term);

        while run {
            let event = if self.context.calendar().presence().is_idle() {
                Some(dispatcher.next()?)
            } else {
                dispatcher.next_within(self.config.frame_interval)?
            };

            let now = Instant::now();
            self.context
                .calendar_mut()
                .tick(now.duration_since(last_frame));
            last_frame = now;

            match event {
                Some(Event::Update) => self.context.update(),
                Some(Event::Input(input)) => {
                    let cmd = self.command_for(&input);
                    if let Cmd::Exit = self.context.handle(cmd) {
                        run = false;
                    }
                }
                Some(Event::Resize) | None => {}
            }

            self.draw(&mut term);
        }

        self.context.calendar_mut().teardown();

        Ok(())
    }
}

extern crate monthcal as lib;

use flexi_logger::{FileSpec, Logger};
use lib::events::Dispatcher;
use lib::month::DisplayedMonth;
use lib::ui::app::App;
use nix::sys::{signal, termios};
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mcal",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "mcal - A sliding month calendar for the terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show calendar non-interactively"
    )]
    pub show: bool,

    #[structopt(
        short = "m",
        long = "month",
        help = "month to show first (yyyy-MM), defaults to the current one"
    )]
    pub month: Option<DisplayedMonth>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    // The terminal belongs to the calendar, so only log when there is a file
    let _logger = match args.log_file {
        Some(ref log_file) => Some(
            Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
                .log_to_file(FileSpec::try_from(log_file)?)
                .print_message()
                .start()?,
        ),
        None => None,
    };

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let month = args.month.unwrap_or_else(DisplayedMonth::current);

    let mut app = App::new(&config, month);

    if args.show {
        println!("{}", app.show());
        return Ok(());
    }

    const STDOUT: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDOUT)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDOUT, termios::SetArg::TCSANOW, &attr);
        }

        println!("mcal ran into a fatal error!");
        println!("Consider filing an issue with a log file and the backtrace below.");

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    // Block SIGWINCH here so that only the dispatcher's signal thread sees it
    let mut signals_to_wait = signal::SigSet::empty();
    signals_to_wait.add(signal::SIGWINCH);
    signals_to_wait.thread_block()?;

    let dispatcher = Dispatcher::from_config(&config, signals_to_wait);

    // Setup unsegen terminal
    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;

    log::info!("Starting at {}", month);

    app.run(dispatcher, term)
}

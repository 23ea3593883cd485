use nix::sys::signal::{SigSet, Signal};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use unsegen::input::Input;

use crate::config::Config;

pub enum Event {
    Input(Input),
    /// Periodic clock refresh.
    Update,
    /// The terminal was resized.
    Resize,
}

pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    _input_handle: thread::JoinHandle<()>,
    _update_handle: thread::JoinHandle<()>,
    _signal_handle: Option<thread::JoinHandle<()>>,
}

impl Dispatcher {
    /// Spawns the input, update and signal threads. `signals` must already be
    /// blocked for the calling thread so that only the signal thread sees
    /// them.
    pub fn from_config(config: &Config, signals: SigSet) -> Dispatcher {
        let tick_rate = config.tick_rate;
        let (tx, rx) = mpsc::channel();

        let input_handle = {
            let tx = tx.clone();
            thread::spawn(move || {
                let stdin = io::stdin();
                let stdin = stdin.lock();
                for evt in Input::read_all(stdin) {
                    match evt {
                        Ok(input) => {
                            if tx.send(Event::Input(input)).is_err() {
                                return;
                            }
                        }
                        Err(e) => log::warn!("Error while reading input: {}", e),
                    }
                }
            })
        };

        let update_handle = {
            let tx = tx.clone();
            thread::spawn(move || loop {
                if tx.send(Event::Update).is_err() {
                    return;
                }
                thread::sleep(tick_rate);
            })
        };

        let signal_handle = if signals.contains(Signal::SIGWINCH) {
            let tx = tx.clone();
            Some(thread::spawn(move || loop {
                match signals.wait() {
                    Ok(Signal::SIGWINCH) => {
                        if tx.send(Event::Resize).is_err() {
                            return;
                        }
                    }
                    Ok(signal) => log::debug!("Ignoring signal {:?}", signal),
                    Err(e) => {
                        log::error!("Waiting for signals failed: {}", e);
                        return;
                    }
                }
            }))
        } else {
            None
        };

        Dispatcher {
            rx,
            _input_handle: input_handle,
            _update_handle: update_handle,
            _signal_handle: signal_handle,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }

    /// Waits at most `timeout` for the next event. `Ok(None)` means the
    /// timeout elapsed, which drives animation frames.
    pub fn next_within(&self, timeout: Duration) -> Result<Option<Event>, mpsc::RecvError> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(mpsc::RecvError),
        }
    }
}

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use client_logging::{client_debug, client_info};
use console::{style, Term};
use summarize_client::{ClientSettings, ClipboardWriter, FileClipboard, SystemClipboard};
use summarize_core::{update, AppState, Msg};

use super::effects::EffectRunner;
use super::ui::commands::{self, Command, HELP_TEXT};
use super::ui::render;

/// How long one loop iteration waits for client events before checking input.
const EVENT_WAIT: Duration = Duration::from_millis(50);

pub fn run_app(settings: ClientSettings, copy_to: Option<PathBuf>) -> Result<()> {
    let clipboard: Box<dyn ClipboardWriter> = match copy_to {
        Some(path) => {
            client_info!("Copies go to {}", path.display());
            Box::new(FileClipboard::new(path))
        }
        None => Box::new(SystemClipboard::new()),
    };
    let mut runner = EffectRunner::start(settings, clipboard).context("starting client")?;
    let lines = spawn_input_reader();
    let mut screen = Screen::new();

    let mut state = AppState::new();
    let mut inbox: VecDeque<Msg> = VecDeque::from([Msg::RedrawRequested]);

    'main: loop {
        inbox.extend(
            runner
                .collect_events(EVENT_WAIT)
                .context("lost the connection to the client thread")?,
        );

        loop {
            match lines.try_recv() {
                Ok(line) => match commands::parse(&line) {
                    Ok(Some(Command::Dispatch(msgs))) => {
                        screen.notice = None;
                        inbox.extend(msgs);
                    }
                    Ok(Some(Command::Help)) => {
                        screen.notice = Some(HELP_TEXT.to_string());
                        inbox.push_back(Msg::RedrawRequested);
                    }
                    Ok(Some(Command::Quit)) => break 'main,
                    Ok(None) => screen.prompt()?,
                    Err(err) => {
                        screen.notice = Some(err);
                        inbox.push_back(Msg::RedrawRequested);
                    }
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    client_debug!("Input closed");
                    break 'main;
                }
            }
        }

        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            inbox.extend(runner.run(effects));
        }

        if state.consume_dirty() {
            screen.draw(&render::render(&state.view()))?;
        }
    }

    client_info!("Shutting down");
    runner.shutdown();
    Ok(())
}

/// Reads stdin lines on a background thread; the channel closes at end of input.
fn spawn_input_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

struct Screen {
    term: Term,
    notice: Option<String>,
}

impl Screen {
    fn new() -> Self {
        Self {
            term: Term::stdout(),
            notice: None,
        }
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        if self.term.is_term() {
            self.term.clear_screen()?;
        }
        self.term.write_all(frame.as_bytes())?;
        if let Some(notice) = &self.notice {
            self.term.write_line(&style(notice).yellow().to_string())?;
        }
        self.prompt()
    }

    fn prompt(&mut self) -> io::Result<()> {
        self.term.write_all(b"> ")?;
        self.term.flush()
    }
}

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chat_logging::{chat_error, chat_info, chat_warn};
use chrono::Utc;
use clap::Parser;
use pdfchat_core::{update, AppState, Msg};
use pdfchat_service::ServiceHandle;

use super::cli::{CliArgs, BASE_URL_ENV};
use super::config::load_config;
use super::effects::EffectRunner;
use super::input::{interpret, Action};
use super::logging;
use super::ui::render::{render, TranscriptCursor};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let (config_path, explicit) = args.config_path();
    let (file_config, config_problem) = match load_config(&config_path) {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(err) if explicit => return Err(err.into()),
        Err(err) => (Default::default(), Some(err)),
    };
    let settings = args.resolve(std::env::var(BASE_URL_ENV).ok(), file_config);

    logging::initialize(settings.log_destination, settings.log_level);
    if let Some(err) = config_problem {
        chat_warn!("Ignoring config file: {}", err);
    }

    let service = ServiceHandle::new(&settings.service)
        .with_context(|| format!("cannot use Document Service at {}", settings.service.base_url))?;

    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    chat_error!("Failed to read stdin: {}", err);
                    break;
                }
            }
        }
    });

    let mut app = App::new(EffectRunner::new(service), io::stdout());
    app.print(&["PdfChat - type /help for commands.".to_string()])?;
    app.dispatch(Msg::Started)?;

    let mut input_closed = false;
    loop {
        if input_closed {
            // Let in-flight requests finish before leaving.
            if app.is_idle() {
                break;
            }
            thread::sleep(POLL_INTERVAL);
        } else {
            match line_rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => {
                    if !app.handle_line(&line)? {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => input_closed = true,
            }
        }
        app.pump()?;
    }

    chat_info!("Session ended with {} messages", app.state.messages().len());
    Ok(())
}

/// Owns the state and drives the update/effect/render cycle.
struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    cursor: TranscriptCursor,
    out: W,
}

impl<W: Write> App<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            cursor: TranscriptCursor::default(),
            out,
        }
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        match interpret(line, &self.state.view(), Utc::now()) {
            Action::Quit => return Ok(false),
            Action::Print(lines) => self.print(&lines)?,
            Action::Dispatch(msgs) => {
                for msg in msgs {
                    self.dispatch(msg)?;
                }
            }
        }
        Ok(true)
    }

    /// Applies every completed request.
    fn pump(&mut self) -> io::Result<()> {
        while let Some(msg) = self.runner.poll() {
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);

        if was_dirty {
            let lines = render(&mut self.cursor, &self.state.view());
            self.print(&lines)?;
        }
        Ok(())
    }

    fn print(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    fn is_idle(&self) -> bool {
        self.runner.is_idle()
    }
}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use summary_core::{update, AppState, Msg, UiStatus};
use summary_engine::SubmitSettings;
use summary_logging::{summary_info, summary_warn};

use super::commands::{parse_command, Command, HELP};
use super::effects::EffectRunner;
use super::render::render;

pub struct AppConfig {
    pub settings: SubmitSettings,
    pub output_dir: PathBuf,
}

/// Everything the main loop reacts to, in arrival order.
#[derive(Debug)]
pub enum Input {
    Line(String),
    Engine(Msg),
    Closed,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    summary_info!(
        "Starting summary_app server={} output_dir={:?}",
        config.settings.base_url,
        config.output_dir
    );
    config
        .settings
        .endpoint_url()
        .with_context(|| format!("invalid server url {:?}", config.settings.base_url))?;

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    let runner = EffectRunner::new(config.settings, config.output_dir, input_tx.clone())
        .context("failed to start the submission engine")?;
    spawn_stdin_reader(input_tx);

    let mut session = Session::new(runner);
    println!("{HELP}");
    session.print_view();
    prompt();

    while let Ok(input) = input_rx.recv() {
        let keep_going = match input {
            Input::Line(line) => session.handle_line(&line),
            Input::Engine(msg) => {
                session.dispatch_msg(msg);
                true
            }
            Input::Closed => false,
        };
        if !keep_going {
            break;
        }
        prompt();
    }

    summary_info!("summary_app exiting");
    Ok(())
}

struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    /// Returns false when the user asked to leave.
    fn handle_line(&mut self, line: &str) -> bool {
        match parse_command(line) {
            Ok(Command::Dispatch(msg)) => self.dispatch_msg(msg),
            Ok(Command::Generate) => {
                // The button only reads the last global status; requests
                // that are still pending elsewhere do not block it.
                if self.state.status() == UiStatus::Processing {
                    println!("Generate is disabled while processing");
                } else {
                    self.dispatch_msg(Msg::GenerateClicked { now_ms: now_ms() });
                }
            }
            Ok(Command::Show) => self.print_view(),
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => return false,
            Err(err) => {
                summary_warn!("Rejected input {:?}: {}", line, err);
                println!("{err}");
            }
        }
        true
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        for notice in self.runner.run(effects) {
            println!("{notice}");
        }
        if was_dirty {
            self.print_view();
        }
    }

    fn print_view(&self) {
        print!("\n{}", render(&self.state.view()));
    }
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if input_tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(Input::Closed);
    });
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use veritas_core::{update, AppState, Msg, SampleProvider};
use veritas_engine::EngineHandle;
use veritas_logging::{veritas_info, veritas_warn};

use super::config::{AppConfig, Cli};
use super::effects::{EffectRunner, EffectSink};
use super::ui;
use super::ui::input::Command;

/// Everything the main loop reacts to, in arrival order.
#[derive(Debug)]
pub enum AppEvent {
    Input(Command),
    InputClosed,
    Core(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if !veritas_logging::initialize(cli.log, cli.log_level()) {
        eprintln!("Warning: logging is disabled");
    }

    let config = AppConfig::from_cli(&cli).context("loading configuration")?;
    let samples = config.sample_provider().context("loading sample texts")?;
    let engine = EngineHandle::new(config.client_settings())
        .with_context(|| format!("creating engine client for {}", config.endpoint))?;
    veritas_info!(
        "Starting: endpoint={} model={} min_visible={:?}",
        config.endpoint,
        config.default_model,
        config.min_visible()
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(engine, event_tx.clone(), config.min_visible());
    spawn_stdin_reader(event_tx.clone());

    let mut shell = Shell::new(AppState::with_model(config.default_model), samples, runner);
    println!("{}", ui::constants::HELP_TEXT);
    shell.render_now();
    prompt();
    let _ = event_tx.send(AppEvent::Core(Msg::HealthCheckRequested));
    drop(event_tx);

    shell.run(&event_rx);
    Ok(())
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    veritas_warn!("Failed to read stdin: {}", err);
                    break;
                }
            };
            let command = ui::input::parse_line(&line);
            if event_tx.send(AppEvent::Input(command)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

/// Single owner of the workflow state; every mutation goes through `dispatch`.
struct Shell<S: EffectSink> {
    state: AppState,
    samples: SampleProvider,
    runner: S,
    closing: bool,
}

impl<S: EffectSink> Shell<S> {
    fn new(state: AppState, samples: SampleProvider, runner: S) -> Self {
        Self {
            state,
            samples,
            runner,
            closing: false,
        }
    }

    fn run(&mut self, event_rx: &mpsc::Receiver<AppEvent>) {
        while let Ok(event) = event_rx.recv() {
            match event {
                AppEvent::Input(command) => {
                    if !self.handle_command(command) {
                        break;
                    }
                }
                AppEvent::InputClosed => {
                    // Piped input: let an outstanding analysis finish first.
                    self.closing = true;
                }
                AppEvent::Core(msg) => self.dispatch(msg),
            }
            if self.closing && !self.state.has_request_in_flight() {
                break;
            }
            prompt();
        }
        veritas_info!("Shutting down");
    }

    /// Returns `false` when the user asked to quit.
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Append(line) => {
                let text = ui::input::append_line(self.state.input().text(), &line);
                self.dispatch(Msg::TextEdited(text));
            }
            Command::Sample(pool) => {
                let text = self.samples.pick_random(pool).to_owned();
                self.dispatch(Msg::SampleLoaded(text));
            }
            Command::Clear => self.dispatch(Msg::ClearClicked),
            Command::Model(model) => self.dispatch(Msg::ModelSelected(model)),
            Command::Analyze => self.dispatch(Msg::AnalyzeClicked),
            Command::Health => self.dispatch(Msg::HealthCheckRequested),
            Command::Show => self.render_now(),
            Command::Help => println!("{}", ui::constants::HELP_TEXT),
            Command::Quit => return false,
            Command::Invalid(reason) => println!("{reason}"),
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        if was_dirty {
            self.render_now();
        }
    }

    fn render_now(&self) {
        let mut out = io::stdout().lock();
        for line in ui::render::render(&self.state.view()) {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }
}

fn prompt() {
    let mut out = io::stdout().lock();
    let _ = write!(out, "{}", ui::constants::PROMPT);
    let _ = out.flush();
}

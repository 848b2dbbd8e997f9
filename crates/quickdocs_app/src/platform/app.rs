use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use crossterm::event::{self, Event, KeyEventKind};
use quickdocs_core::{update, AppState, Msg};
use quickdocs_engine::TransportSettings;
use quickdocs_logging::qd_info;
use ratatui::backend::CrosstermBackend;

use super::effects::{Dispatch, EffectRunner};
use super::logging;
use super::persistence::{ConfigStore, SettingsFile};
use super::ui::constants::{
    HELP_LINES, INPUT_POLL_INTERVAL, LOG_FILENAME, SETTINGS_FILENAME, STATUS_POLL_INTERVAL,
};
use super::ui::input::{parse_command, Command};
use super::ui::keymap::{self, KeyAction};
use super::ui::screen::{Screen, TerminalGuard};
use super::ui::UiState;

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    logging::initialize(&cwd.join(LOG_FILENAME));
    qd_info!("QuickDocs starting in {:?}", cwd);

    let config_store = ConfigStore::load(Box::new(SettingsFile::open(cwd.join(SETTINGS_FILENAME))));

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let dispatch: Dispatch = {
        let tx = msg_tx.clone();
        Arc::new(move |msg| {
            let _ = tx.send(msg);
        })
    };

    let mut runner = EffectRunner::new(dispatch, config_store, TransportSettings::default())?;
    let mut state = AppState::with_config(runner.config());

    // Periodic status refresh.
    thread::spawn(move || loop {
        thread::sleep(STATUS_POLL_INTERVAL);
        if msg_tx.send(Msg::StatusRefreshRequested).is_err() {
            break;
        }
    });

    state = apply(state, Msg::StatusRefreshRequested, &mut runner);

    let _guard = TerminalGuard::enter()?;
    let mut screen = Screen::new(CrosstermBackend::new(io::stdout()))?;
    let mut ui = UiState::default();
    let mut needs_draw = true;

    loop {
        while let Ok(msg) = msg_rx.try_recv() {
            state = apply(state, msg, &mut runner);
        }
        if state.consume_dirty() || needs_draw {
            screen.draw(&state.view(), &ui)?;
            needs_draw = false;
        }

        if !event::poll(INPUT_POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                needs_draw = true;
                match keymap::resolve(key) {
                    KeyAction::Quit => break,
                    KeyAction::Submit => match parse_command(&ui.submit()) {
                        Command::Dispatch(msg) => state = apply(state, msg, &mut runner),
                        Command::ShowAddress => {
                            ui.footer = vec![format!("Backend: {}", state.config().backend_address)];
                        }
                        Command::Help => {
                            ui.footer = HELP_LINES.iter().map(|line| line.to_string()).collect();
                        }
                        Command::Unknown(name) => {
                            ui.footer = vec![format!("Unknown command: {name}. Type /help for commands.")];
                        }
                        Command::Quit => break,
                    },
                    KeyAction::Insert(ch) => ui.input.push(ch),
                    KeyAction::Backspace => {
                        ui.input.pop();
                    }
                    KeyAction::ClearInput => ui.input.clear(),
                    KeyAction::ScrollUp => ui.scroll_up(),
                    KeyAction::ScrollDown => ui.scroll_down(),
                    KeyAction::None => needs_draw = false,
                }
            }
            Event::Resize(..) => needs_draw = true,
            _ => {}
        }
    }

    qd_info!("QuickDocs shutting down");
    Ok(())
}

fn apply(state: AppState, msg: Msg, runner: &mut EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

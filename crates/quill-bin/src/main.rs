//! Quill entrypoint: startup, logging, and the single-threaded event loop.

mod render;
mod terminal;

use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use core_actions::{KeyTranslator, SessionContext, dispatch};
use core_config::Config;
use core_events::{EVENT_CHANNEL_CAP, Event, InputEvent, spawn_tick};
use core_files::{StdFileIo, classify};
use core_state::{EditorState, render_view};
use core_text::Buffer;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Quill editor")]
struct Args {
    /// Path to open at startup (UTF-8 text). If omitted an empty unnamed
    /// buffer is used.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `quill.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let appender = tracing_appender::rolling::never(Path::new("."), "quill.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        // A subscriber is already installed (tests); drop the guard so the
        // writer shuts down.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Read the startup file and build the session state: buffer contents,
/// read-only classification, undo capacity. An unreadable path degrades to
/// an empty buffer rather than refusing to start.
fn load_session(args: &Args, config: &Config, io: &StdFileIo) -> EditorState {
    let (buffer, file_name, read_only) = match args.path.as_ref() {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => {
                let status = classify(path, &config.limits.classifier_limits(), io);
                info!(target: "io", file = %path.display(), bytes = content.len(), read_only = status.read_only, "file_read_ok");
                (Buffer::from_text(&content), Some(path.clone()), status)
            }
            Err(e) => {
                error!(target: "io", file = %path.display(), error = %e, "file_open_error");
                (
                    Buffer::from_text(""),
                    Some(path.clone()),
                    core_files::ReadOnlyStatus::writable(),
                )
            }
        },
        None => (
            Buffer::from_text(""),
            None,
            core_files::ReadOnlyStatus::writable(),
        ),
    };
    let mut state = EditorState::with_undo_capacity(buffer, config.limits.undo_capacity);
    state.file_name = file_name;
    state.read_only = read_only;
    state
}

async fn run_event_loop(
    mut state: EditorState,
    config: &Config,
    io: &StdFileIo,
    mut rx: mpsc::Receiver<Event>,
) -> Result<()> {
    let ctx = SessionContext {
        io,
        backup_suffix: &config.files.backup_suffix,
        message_ttl: Duration::from_millis(config.status.message_ttl_ms),
    };
    let mut translator = KeyTranslator::new();
    let mut out = stdout();
    let (mut cols, mut rows) = crossterm::terminal::size()?;
    render::draw(&mut out, &render_view(&state), cols, rows)?;

    // One event is handled to completion before the next is received, so a
    // save inside a handler can never interleave with a later mutation.
    while let Some(event) = rx.recv().await {
        match event {
            Event::Input(InputEvent::Key(key)) => {
                let Some(action) = translator.translate(&state, &key) else {
                    continue;
                };
                let result = dispatch(action, &mut state, &ctx);
                if result.quit {
                    info!(target: "runtime", "session_exit");
                    return Ok(());
                }
                if result.dirty {
                    render::draw(&mut out, &render_view(&state), cols, rows)?;
                }
            }
            Event::Input(InputEvent::Resize(c, r)) => {
                cols = c;
                rows = r;
                render::draw(&mut out, &render_view(&state), cols, rows)?;
            }
            Event::Tick => {
                if state.tick_ephemeral() {
                    render::draw(&mut out, &render_view(&state), cols, rows)?;
                }
            }
            Event::Shutdown => {
                warn!(target: "runtime", "shutdown_event");
                return Ok(());
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    let args = Args::parse();
    info!(target: "runtime", path = ?args.path, "startup");

    let config = core_config::load_from(args.config.clone())?;
    let io = StdFileIo;
    let state = load_session(&args, &config, &io);

    let guard = terminal::TerminalGuard::enter()?;
    let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let tick_handle = spawn_tick(tx.clone(), TICK_INTERVAL);
    let _input_handle = terminal::spawn_input_thread(tx.clone());
    drop(tx);

    let result = run_event_loop(state, &config, &io, rx).await;

    tick_handle.abort();
    drop(guard);
    result
}

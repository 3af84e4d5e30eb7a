use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::execute;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use tripane::config::{EngineConfig, PaneRange, SnapPointSet};
use tripane::constants;
use tripane::drivers::InputDriver;
use tripane::drivers::console::ConsoleInputDriver;
use tripane::engine::WorkspaceEngine;
use tripane::event_loop::{ControlFlow, EventLoop};
use tripane::host::WorkspaceHost;
use tripane::tracing_sub;

#[derive(Parser, Debug)]
#[command(
    name = "tripane",
    version = env!("CARGO_PKG_VERSION"),
    about = "Three-pane resize-and-snap workspace demo"
)]
struct Cli {
    /// Initial navigator (left) pane width, in cells.
    #[arg(long, value_name = "CELLS")]
    left: Option<u16>,

    /// Initial content (middle) pane width, in cells.
    #[arg(long, value_name = "CELLS")]
    middle: Option<u16>,

    /// Start with the inspector (right) pane visible.
    #[arg(long, default_value_t = false)]
    inspector: bool,

    /// Frame interval in milliseconds. Pointer moves coalesce to this rate.
    #[arg(long, value_name = "MS", default_value_t = constants::FRAME_INTERVAL_MS)]
    frame_ms: u64,

    /// Append engine logs to a file instead of stderr (which the alternate
    /// screen would tear).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// The engine is unit-agnostic; the demo maps one terminal cell to one
/// width unit, so its config is cell-scale rather than the pixel-scale
/// defaults.
fn cell_scale_config(cli: &Cli) -> EngineConfig {
    EngineConfig {
        left: PaneRange::new(12, 60, cli.left.unwrap_or(24)),
        middle: PaneRange::new(20, 160, cli.middle.unwrap_or(60)),
        right_reserved: 30,
        snap_threshold: 2,
        left_snaps: SnapPointSet::new(vec![12, 18, 24, 30, 36]),
        middle_snaps: SnapPointSet::new(vec![20, 40, 60, 80, 100]),
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    match &cli.log_file {
        Some(path) => tracing_sub::init_file(path)?,
        None => tracing_sub::init_default(),
    }

    let config = cell_scale_config(&cli);
    let (width, _) = terminal::size()?;
    let engine = WorkspaceEngine::new(config, width, cli.inspector)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;
    let mut host = WorkspaceHost::new(engine);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let mut event_loop = EventLoop::new(
        ConsoleInputDriver::new(),
        Duration::from_millis(cli.frame_ms.max(1)),
    );
    event_loop.driver().set_mouse_capture(true)?;
    let result = event_loop.run(|_driver, event| {
        match event {
            Some(event) => {
                if host.handle_event(&event) {
                    return Ok(ControlFlow::Quit);
                }
            }
            None => {
                if host.begin_frame() {
                    terminal
                        .draw(|frame| host.render(frame))
                        .map(|_| ())
                        .map_err(|err| io::Error::other(err.to_string()))?;
                }
            }
        }
        Ok(ControlFlow::Continue)
    });

    // Best-effort teardown even when the loop exited with an error.
    let _ = event_loop.driver().set_mouse_capture(false);
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Paragraph},
};

use tripane::config::{EngineConfig, PaneRange, SnapPointSet};
use tripane::engine::WorkspaceEngine;
use tripane::layout::PaneId;
use tripane::theme;

#[derive(Parser, Debug)]
#[command(
    name = "pane-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Drag-storm benchmark for layout-engine move coalescing"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 10.0
    )]
    duration_seconds: f64,

    /// Target frames per second. Used to pace flushing so comparisons are repeatable.
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = 60.0)]
    target_fps: f64,

    /// Synthetic pointer-move events fed to the engine per frame.
    #[arg(
        short = 'm',
        long = "moves",
        value_name = "MOVES",
        default_value_t = 200
    )]
    moves_per_frame: u32,
}

impl BenchCli {
    fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_seconds)
    }

    fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps)
    }
}

struct BenchConfig {
    duration: Duration,
    target_fps: f64,
    frame_budget: Duration,
    moves_per_frame: u32,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.5..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.5 and 600 seconds".to_string());
        }
        if !(1.0..=240.0).contains(&cli.target_fps) {
            return Err("fps must be between 1 and 240".to_string());
        }
        if !(1..=100_000).contains(&cli.moves_per_frame) {
            return Err("moves must be between 1 and 100000".to_string());
        }
        Ok(Self {
            duration: cli.duration(),
            target_fps: cli.target_fps,
            frame_budget: cli.frame_budget(),
            moves_per_frame: cli.moves_per_frame,
        })
    }
}

fn cell_scale_config() -> EngineConfig {
    EngineConfig {
        left: PaneRange::new(12, 60, 24),
        middle: PaneRange::new(20, 160, 60),
        right_reserved: 30,
        snap_threshold: 2,
        left_snaps: SnapPointSet::new(vec![12, 18, 24, 30, 36]),
        middle_snaps: SnapPointSet::new(vec![20, 40, 60, 80, 100]),
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let bench_result = run_benchmark(&mut terminal, &config);

    terminal.show_cursor()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()?;

    let stats = bench_result?;
    println!("{}", stats.final_report(&config));

    Ok(())
}

type BenchTerminal = Terminal<CrosstermBackend<Stdout>>;

fn run_benchmark(terminal: &mut BenchTerminal, config: &BenchConfig) -> io::Result<BenchStats> {
    let (width, _) = terminal::size()?;
    let mut engine = WorkspaceEngine::new(cell_scale_config(), width, true)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;
    engine.begin_frame();

    let mut storm = PointerStorm::new(&engine);
    let mut stats = BenchStats::new();
    let mut exit_reason = ExitReason::Completed;

    loop {
        storm.feed(&mut engine, config.moves_per_frame, &mut stats);
        if engine.begin_frame() {
            stats.flushes_applied += 1;
        }

        let frame_start = Instant::now();
        terminal.draw(|frame| draw_frame(frame, &engine, &stats, config))?;
        let draw_time = frame_start.elapsed();
        stats.record_frame(draw_time);

        if stats.elapsed() >= config.duration {
            break;
        }
        if poll_for_exit(config.frame_budget.saturating_sub(draw_time))? {
            exit_reason = ExitReason::UserAbort;
            break;
        }
    }

    engine.pointer_up(storm.pointer());
    stats.exit_reason = exit_reason;
    stats.mark_completed();
    Ok(stats)
}

/// Drives a zig-zag pointer through one endless left-handle drag session,
/// the worst case for per-event recomputation.
struct PointerStorm {
    pointer: u16,
    falling: bool,
    low: u16,
    high: u16,
}

impl PointerStorm {
    fn new(engine: &WorkspaceEngine) -> Self {
        let range = engine.config().left;
        Self {
            pointer: engine.model().pane(PaneId::Left).width,
            falling: false,
            low: range.min,
            high: range.max,
        }
    }

    fn pointer(&self) -> u16 {
        self.pointer
    }

    fn feed(&mut self, engine: &mut WorkspaceEngine, moves: u32, stats: &mut BenchStats) {
        if engine.session_pane().is_none() {
            // Grab the left handle exactly on the boundary.
            let handle = engine.model().origin(PaneId::Middle);
            engine.pointer_down(handle);
            self.pointer = handle;
        }
        for _ in 0..moves {
            if self.falling {
                self.pointer = self.pointer.saturating_sub(1);
                if self.pointer <= self.low {
                    self.falling = false;
                }
            } else {
                self.pointer = self.pointer.saturating_add(1);
                if self.pointer >= self.high {
                    self.falling = true;
                }
            }
            engine.pointer_move(self.pointer);
            stats.moves_fed += 1;
        }
    }
}

fn draw_frame(frame: &mut Frame, engine: &WorkspaceEngine, stats: &BenchStats, config: &BenchConfig) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let model = engine.model();
    for id in PaneId::ALL {
        if id == PaneId::Right && !model.pane(id).visible {
            continue;
        }
        let origin = model.origin(id);
        if origin >= area.width {
            continue;
        }
        let width = model.pane(id).width.min(area.width - origin);
        if width == 0 {
            continue;
        }
        let rect = Rect {
            x: area.x + origin,
            y: area.y,
            width,
            height: area.height,
        };
        frame.render_widget(
            Block::bordered().border_style(Style::default().fg(theme::pane_border_fg())),
            rect,
        );
    }

    let overlay_lines = build_overlay_lines(stats, config);
    if let Some(overlay_area) = overlay_area(area, &overlay_lines) {
        frame.render_widget(
            Paragraph::new(overlay_lines.join("\n"))
                .style(Style::default().fg(Color::White).bg(Color::Black)),
            overlay_area,
        );
    }
}

fn overlay_area(window_area: Rect, lines: &[String]) -> Option<Rect> {
    let available_width = window_area.width.saturating_sub(2);
    let available_height = window_area.height.saturating_sub(2);
    if available_width < 8 || available_height < 4 {
        return None;
    }
    let text_width = lines
        .iter()
        .map(|line| line.len() as u16)
        .max()
        .unwrap_or(0);
    let width = text_width.saturating_add(2).clamp(8, available_width);
    let height = (lines.len() as u16).saturating_add(2).clamp(4, available_height);
    Some(Rect {
        x: window_area.x + 1,
        y: window_area.y + 1,
        width,
        height,
    })
}

fn build_overlay_lines(stats: &BenchStats, config: &BenchConfig) -> Vec<String> {
    let elapsed = stats.elapsed().as_secs_f64();
    let duration_target = config.duration.as_secs_f64();
    let progress = if duration_target > 0.0 {
        (elapsed / duration_target).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let fps_avg = if elapsed > 0.0 {
        stats.frame_count as f64 / elapsed
    } else {
        0.0
    };

    vec![
        "== Pane Bench ==".to_string(),
        format!(
            "elapsed {:>5.1}/{:>5.1}s ({:>3.0}%)",
            elapsed,
            duration_target,
            progress * 100.0
        ),
        format!(
            "frames {:>8} | avg fps {:>5.1} / target {:>5.1}",
            stats.frame_count, fps_avg, config.target_fps
        ),
        format!(
            "moves {:>10} | flushes {:>8} | coalesce {:>7.1}x",
            stats.moves_fed,
            stats.flushes_applied,
            stats.coalescing_ratio()
        ),
        format!(
            "frame ms avg {:>6.2} | best {:>5.2} | worst {:>5.2}",
            stats.average_frame_ms(),
            stats.fastest_frame_ms(),
            stats.slowest_frame_ms()
        ),
        "press q / esc / ctrl+c to stop".to_string(),
    ]
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    frame_count: u64,
    moves_fed: u64,
    flushes_applied: u64,
    total_draw_time: Duration,
    fastest_frame: Duration,
    slowest_frame: Duration,
    exit_reason: ExitReason,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            frame_count: 0,
            moves_fed: 0,
            flushes_applied: 0,
            total_draw_time: Duration::ZERO,
            fastest_frame: Duration::MAX,
            slowest_frame: Duration::ZERO,
            exit_reason: ExitReason::Completed,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_frame(&mut self, draw_time: Duration) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.total_draw_time += draw_time;
        if draw_time < self.fastest_frame {
            self.fastest_frame = draw_time;
        }
        if draw_time > self.slowest_frame {
            self.slowest_frame = draw_time;
        }
    }

    fn coalescing_ratio(&self) -> f64 {
        if self.flushes_applied == 0 {
            return 0.0;
        }
        self.moves_fed as f64 / self.flushes_applied as f64
    }

    fn average_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        (self.total_draw_time.as_secs_f64() / self.frame_count as f64) * 1_000.0
    }

    fn fastest_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.fastest_frame.as_secs_f64() * 1_000.0
    }

    fn slowest_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.slowest_frame.as_secs_f64() * 1_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let fps_avg = if elapsed > 0.0 {
            self.frame_count as f64 / elapsed
        } else {
            0.0
        };

        indoc::formatdoc!(
            r#"
            Pane bench {status}.
            Duration: {elapsed:.2}s (target {target:.2}s)
            Frames: {frames} | Avg FPS: {fps:.1} (target {target_fps:.1})
            Moves fed: {moves} | Flushes applied: {flushes} | Coalescing: {ratio:.1} moves/flush
            Avg frame: {avg:.2} ms | Best: {best:.2} ms | Worst: {worst:.2} ms
            "#,
            status = self.exit_reason.describe(),
            elapsed = elapsed,
            target = config.duration.as_secs_f64(),
            frames = self.frame_count,
            fps = fps_avg,
            target_fps = config.target_fps,
            moves = self.moves_fed,
            flushes = self.flushes_applied,
            ratio = self.coalescing_ratio(),
            avg = self.average_frame_ms(),
            best = self.fastest_frame_ms(),
            worst = self.slowest_frame_ms(),
        )
    }
}

#[derive(Copy, Clone)]
enum ExitReason {
    Completed,
    UserAbort,
}

impl ExitReason {
    fn describe(self) -> &'static str {
        match self {
            ExitReason::Completed => "completed full duration",
            ExitReason::UserAbort => "stopped by user",
        }
    }
}

fn poll_for_exit(wait: Duration) -> io::Result<bool> {
    if !event::poll(wait)? {
        return Ok(false);
    }
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if matches!(
                    key.code,
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                ) {
                    return Ok(true);
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(true);
                }
            }
            _ => {}
        }
        if !event::poll(Duration::ZERO)? {
            break;
        }
    }
    Ok(false)
}

use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::Level;

use notestack::app::App;
use notestack::constants::{COLLAPSE_IDLE_MS, POLL_INTERVAL_MS};
use notestack::drivers::InputDriver;
use notestack::drivers::console::ConsoleDriver;
use notestack::event_loop::{ControlFlow, EventLoop};
use notestack::tracing_sub;

#[derive(Parser, Debug)]
#[command(name = "notestack", version, about = "Sticky-note stack for the terminal")]
struct Cli {
    /// Idle milliseconds before the stack panel auto-collapses.
    #[arg(long, default_value_t = COLLAPSE_IDLE_MS)]
    collapse_ms: u64,

    /// Write logs to this file. Without it logging is disabled entirely;
    /// stderr would fight the alternate screen.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level when --log-file is set.
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    tracing_sub::init(cli.log_file.as_deref(), cli.log_level)?;

    terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), EnterAlternateScreen)?;
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        default_hook(info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = App::new(Duration::from_millis(cli.collapse_ms));

    let mut event_loop = EventLoop::new(
        ConsoleDriver::new(),
        Duration::from_millis(POLL_INTERVAL_MS),
    );
    event_loop.driver().set_mouse_capture(true)?;

    let result = event_loop.run(|_, event| {
        let now = Instant::now();
        match event {
            Some(event) => {
                if let ControlFlow::Quit = app.on_event(&event, now) {
                    return Ok(ControlFlow::Quit);
                }
            }
            None => {
                app.on_tick(now);
                terminal.draw(|frame| app.render(frame))?;
            }
        }
        Ok(ControlFlow::Continue)
    });

    let _ = ConsoleDriver::new().set_mouse_capture(false);
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    result
}

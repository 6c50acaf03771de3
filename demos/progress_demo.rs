//! Progress Demo: several workers reporting into one console.
//!
//! Each worker redraws its own progress line with `\r` and prints a summary
//! line when done. The main thread owns the terminal and drains the queue on
//! the built-in ticker.
//!
//! Press 'q' or Escape to quit early. Set `RUST_LOG=outview=trace` to see the
//! drain loop (logs go to stderr).

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use outview::{Console, ConsoleConfig, ConsoleWriter, TerminalSurface};
use std::error::Error;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

/// Number of worker threads.
const WORKERS: usize = 3;

/// Width of the progress bar in cells.
const BAR_WIDTH: usize = 20;

fn bar(pct: usize) -> String {
    let filled = pct * BAR_WIDTH / 100;
    format!(
        "[{}{}] {pct:3}%",
        "\u{2588}".repeat(filled),
        ".".repeat(BAR_WIDTH - filled)
    )
}

fn worker(id: usize, writer: &ConsoleWriter) {
    let step = Duration::from_millis(20 + 15 * id as u64);
    writer.write_line(&format!("worker {id}: starting"));
    for pct in 0..=100 {
        writer.write(&format!("\rworker {id} {}", bar(pct)));
        thread::sleep(step);
    }
    writer.write_line("");
    writer.write_line(&format!("worker {id}: done"));
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;

    let result = run();

    terminal::disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;
    result
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = ConsoleConfig {
        drain_interval: Duration::from_millis(30),
        ..ConsoleConfig::default()
    };
    let mut console = Console::with_config(TerminalSurface::stdout()?, config);
    console.write_line("outview progress demo (q to quit)");

    let handles: Vec<_> = (0..WORKERS)
        .map(|id| {
            let writer = console.writer();
            // Workers run one after another so their `\r` lines don't interleave
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(2500 * id as u64));
                worker(id, &writer);
            })
        })
        .collect();

    console.start_ticker()?;
    let start = Instant::now();

    loop {
        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    break;
                }
            }
        }

        if let Some(report) = console.poll() {
            log::trace!("tick: {report:?}");
        }

        if handles.iter().all(thread::JoinHandle::is_finished) && console.buffer_empty() {
            console.write_line(&format!(
                "all workers finished in {:.1}s, press q",
                start.elapsed().as_secs_f64()
            ));
            console.drain_all();
            while !matches!(event::read()?, Event::Key(KeyEvent { code: KeyCode::Char('q') | KeyCode::Esc, .. })) {}
            break;
        }
    }

    console.stop_ticker();
    Ok(())
}

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use daydash_core::{
    ActivityStore, LoopConfig, ScheduleLoop, SharedElapsed, SpeedFactor, Ticker, VirtualClock,
};

mod terminal;

#[derive(Parser)]
#[command(name = "daydash", version, about = "Accelerated daily activity scheduler")]
struct Cli {
    /// Clock acceleration factor. Prompts interactively when omitted.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=30))]
    speed: Option<u8>,

    /// Real milliseconds between evaluation passes.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Minutes of remaining window that trigger the reminder.
    #[arg(long, default_value_t = 10)]
    due_soon_minutes: u32,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let speed = match cli.speed {
        Some(value) => SpeedFactor::new(value)?,
        None => prompt_speed_factor()?,
    };

    let tick = Duration::from_millis(cli.tick_ms);
    let shared = SharedElapsed::new();
    let clock = VirtualClock::new(chrono::Local::now().naive_local(), shared.clone());
    let _ticker = Ticker::spawn(shared, speed, tick)?;

    let mut console = terminal::TerminalConsole::new()?;
    let config = LoopConfig {
        tick,
        due_soon_threshold: cli.due_soon_minutes,
    };
    let mut schedule = ScheduleLoop::new(clock, ActivityStore::default_day(), &mut console, config);
    schedule.run()?;
    Ok(())
}

/// Prompt for the acceleration factor until a valid value is entered.
/// Invalid input re-prompts without side effects.
fn prompt_speed_factor() -> io::Result<SpeedFactor> {
    let stdin = io::stdin();
    loop {
        print!("How many times would you like to speed it up? (1...30)\t");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed during speed prompt",
            ));
        }
        match line.trim().parse::<SpeedFactor>() {
            Ok(speed) => return Ok(speed),
            Err(e) => println!("{e}"),
        }
    }
}

//! Raw-mode terminal console.
//!
//! Owns the terminal for the lifetime of the run: raw mode for the
//! non-blocking scheduling loop, temporarily restored to cooked mode for
//! the modal prompts. The RAII guard restores the original settings on
//! every exit path, panics included.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use tracing::warn;

use daydash_core::{Console, Notice};

/// Wait before the modal prompt starts reading input.
const PROMPT_DELAY: Duration = Duration::from_secs(3);
/// How long output stays on screen before it is wiped.
const CLEAR_DELAY: Duration = Duration::from_secs(2);

/// RAII guard restoring cooked mode when dropped.
struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

pub struct TerminalConsole {
    _guard: RawModeGuard,
    /// Partial out-of-band line accumulated from key events between ticks.
    buffer: String,
}

impl TerminalConsole {
    pub fn new() -> io::Result<TerminalConsole> {
        enable_raw_mode()?;
        Ok(TerminalConsole {
            _guard: RawModeGuard,
            buffer: String::new(),
        })
    }

    fn render(notice: &Notice) -> String {
        match notice {
            Notice::ActivityStarting { name } | Notice::ActivityNow { name } => {
                format!("Time for {name}")
            }
            Notice::ActivityEndingSoon { name, minutes_left } => {
                format!("Don't forget to do {name} in {minutes_left} minutes!")
            }
            Notice::MarkedDone { name } => format!("{name} marked as done."),
            Notice::AlreadyDone { name } => format!("Chill, you've already done: {name}"),
            Notice::NothingScheduled => "There is no activity to do.".to_string(),
            Notice::InvalidQuery { .. } => {
                "Please enter a time (\"now\" or \"HH:MM\")".to_string()
            }
        }
    }
}

impl Console for TerminalConsole {
    fn notify(&mut self, notice: &Notice) {
        let mut stdout = io::stdout();
        // Raw mode needs an explicit carriage return.
        let _ = write!(stdout, "{}\r\n", Self::render(notice));
        let _ = stdout.flush();
    }

    fn confirm(&mut self, name: &str) -> io::Result<bool> {
        // Cooked mode so stdin is line-buffered for the prompt.
        disable_raw_mode()?;
        thread::sleep(PROMPT_DELAY);
        let stdin = io::stdin();
        let answer = loop {
            print!("Are you doing {name} now? (yes/no)\t");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.read_line(&mut line)? == 0 {
                enable_raw_mode()?;
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stdin closed during confirmation",
                ));
            }
            match line.trim() {
                "yes" => break true,
                "no" => break false,
                _ => continue,
            }
        };
        enable_raw_mode()?;
        Ok(answer)
    }

    fn poll_line(&mut self) -> io::Result<Option<String>> {
        while event::poll(Duration::from_millis(0))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let mut stdout = io::stdout();
            match key.code {
                KeyCode::Char(c) => {
                    self.buffer.push(c);
                    // Raw mode does not echo; do it by hand.
                    let _ = write!(stdout, "{c}");
                    let _ = stdout.flush();
                }
                KeyCode::Backspace => {
                    if self.buffer.pop().is_some() {
                        let _ = write!(stdout, "\u{8} \u{8}");
                        let _ = stdout.flush();
                    }
                }
                KeyCode::Enter => {
                    let _ = write!(stdout, "\r\n");
                    let _ = stdout.flush();
                    return Ok(Some(std::mem::take(&mut self.buffer)));
                }
                _ => {}
            }
        }
        Ok(None)
    }

    fn clear(&mut self) {
        thread::sleep(CLEAR_DELAY);
        if let Err(e) = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
            warn!("failed to clear screen: {e}");
        }
    }
}

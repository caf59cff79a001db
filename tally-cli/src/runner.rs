use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::ArgMatches;
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use tally_lib::{
    export,
    sched::AlarmQueue,
    session::{Session, SessionState},
};

use crate::{controls, logging, ui};

pub fn run(args: &ArgMatches, log_buffer: logging::LogBuffer) -> io::Result<i32> {
    info!("Starting tally");

    // Validate numeric arguments before touching the terminal.
    let grace_secs = match args.get_one::<String>("grace").unwrap().parse::<u64>() {
        Ok(secs) => secs,
        Err(_) => {
            error!("--grace must be a whole number of seconds");
            return Ok(-1);
        }
    };
    let tick_ms = match args.get_one::<String>("tick-ms").unwrap().parse::<u64>() {
        Ok(ms) if ms > 0 => ms,
        _ => {
            error!("--tick-ms must be a positive integer");
            return Ok(-1);
        }
    };
    let export_path = args.get_one::<String>("export").map(PathBuf::from);

    let mut session = Session::new(Duration::from_secs(grace_secs));
    let mut scheduler = AlarmQueue::new();
    let mut input = controls::TaskInput::new(args.get_one::<String>("TASK").map(String::as_str));

    let _raw_mode = RawModeGuard::enable()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick = Duration::from_millis(tick_ms);

    // UI / input loop.
    loop {
        let status = controls::status_text(controls::StatusArgs {
            task_name: input.text(),
            input_enabled: input.is_enabled(),
            elapsed: session.elapsed(),
            running: session.is_running(),
            locked: session.state() == SessionState::AwaitingReset,
        });
        let log_lines = logging::snapshot(&log_buffer);
        ui::draw_status(&mut terminal, &status, &log_lines);

        if !controls::handle_key_event(&mut session, &mut input, &mut scheduler, tick) {
            break;
        }

        while let Some(id) = scheduler.pop_due(Instant::now()) {
            if let Some(task) = session.on_alarm(id) {
                input.enable_cleared();
                if let Some(path) = export_path.as_deref() {
                    if let Err(err) = export::append_task(path, &task) {
                        error!("failed to export task '{}': {}", task.name, err);
                    }
                }
            }
        }
    }

    // Restore the terminal state before exiting.
    let _ = terminal.show_cursor();
    let stdout = terminal.backend_mut();
    let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);

    Ok(0)
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

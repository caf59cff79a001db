use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tally_lib::sched::AlarmQueue;
use tally_lib::session::Session;

/// Editable task-name field with an enable/disable latch.
///
/// While enabled it receives keystrokes; while the task is being timed (or
/// the commit lockout is active) it is disabled and keys fall through to the
/// timer bindings.
pub struct TaskInput {
    text: String,
    enabled: bool,
}

impl TaskInput {
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            text: initial.unwrap_or("").to_string(),
            enabled: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Re-enable for the next task with the text cleared.
    pub fn enable_cleared(&mut self) {
        self.enabled = true;
        self.text.clear();
    }

    pub fn push(&mut self, ch: char) {
        if self.enabled {
            self.text.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.enabled {
            self.text.pop();
        }
    }
}

pub struct StatusSnapshot {
    pub text: String,
}

pub struct StatusArgs<'a> {
    pub task_name: &'a str,
    pub input_enabled: bool,
    pub elapsed: Duration,
    pub running: bool,
    pub locked: bool,
}

pub fn status_text(args: StatusArgs) -> StatusSnapshot {
    let state = if args.locked {
        "⏳ Committing"
    } else if args.input_enabled {
        "✎ New task"
    } else if args.running {
        "▶ Running"
    } else {
        "⏸ Paused"
    };
    let name = if args.input_enabled {
        format!("{}_", args.task_name)
    } else {
        args.task_name.to_string()
    };
    let text = format!(
        "Task: {}\n{}   {}",
        name,
        state,
        format_elapsed(args.elapsed)
    );

    StatusSnapshot { text }
}

/// Poll for one key event and apply it. Returns `false` when the user quits.
pub fn handle_key_event(
    session: &mut Session,
    input: &mut TaskInput,
    scheduler: &mut AlarmQueue,
    poll_timeout: Duration,
) -> bool {
    if event::poll(poll_timeout).unwrap_or(false) {
        if let Ok(Event::Key(key)) = event::read() {
            if key.kind != KeyEventKind::Press {
                return true;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return false;
            }
            if input.is_enabled() {
                match key.code {
                    KeyCode::Enter => {
                        if !input.text().trim().is_empty() {
                            input.disable();
                            session.begin();
                        }
                    }
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Esc => return false,
                    KeyCode::Char(ch) => input.push(ch),
                    _ => {}
                }
            } else {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return false,
                    KeyCode::Char(' ') => session.toggle_timer(),
                    KeyCode::Enter => {
                        let name = input.text().to_string();
                        session.commit(&name, scheduler);
                    }
                    _ => {}
                }
            }
        }
    }

    true
}

/// Format elapsed time as `H:MM:SS`, truncating fractional seconds.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

//! JSON-lines export of completed tasks.
//!
//! Each committed task is appended to the export file as a single JSON
//! object. Event offsets stay monotonic; the only wall-clock stamp is
//! `completed_at_ms`, recorded for human consumption.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::session::CompletedTask;
use crate::timer::TimerEvent;

#[derive(Serialize)]
struct TaskLine<'a> {
    name: &'a str,
    total_ms: u64,
    events: &'a [TimerEvent],
    completed_at_ms: u64,
}

/// Append one task as a JSON line, creating the file if needed.
pub fn append_task(path: &Path, task: &CompletedTask) -> io::Result<()> {
    let completed_at_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);
    let line = TaskLine {
        name: &task.name,
        total_ms: task.total.as_millis() as u64,
        events: &task.events,
        completed_at_ms,
    };
    let json = serde_json::to_string(&line)?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::EventKind;
    use std::time::Duration;

    fn sample_task() -> CompletedTask {
        CompletedTask {
            name: "write report".to_string(),
            total: Duration::from_secs(8),
            events: vec![
                TimerEvent { kind: EventKind::Start, at: Duration::ZERO },
                TimerEvent { kind: EventKind::Pause, at: Duration::from_secs(8) },
            ],
        }
    }

    #[test]
    fn appends_one_json_line_per_task() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        append_task(file.path(), &sample_task()).unwrap();
        append_task(file.path(), &sample_task()).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["name"], "write report");
        assert_eq!(value["total_ms"], 8000);
        assert_eq!(value["events"].as_array().unwrap().len(), 2);
        assert_eq!(value["events"][0]["kind"], "start");
        assert_eq!(value["events"][1]["kind"], "pause");
    }

    #[test]
    fn creates_the_file_when_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("session.jsonl");
        append_task(&path, &sample_task()).unwrap();
        assert!(path.exists());
    }
}

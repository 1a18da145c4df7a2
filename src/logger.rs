/*
 * This file is part of sj201-fan.
 *
 * Copyright (C) 2026 sj201-fan contributors
 *
 * sj201-fan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * sj201-fan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with sj201-fan. If not, see <https://www.gnu.org/licenses/>.
 */

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;
use serde_json::{json, Value};

const DEFAULT_LOG_PATH: &str = "/etc/sj201-fan/logs.json";
const FALLBACK_LOG_PATH: &str = "/tmp/sj201_fan_logs.json";

lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

fn open_append<P: AsRef<Path>>(path: P) -> Option<File> {
    if let Some(parent) = path.as_ref().parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Open the default event log, falling back to /tmp if /etc is unavailable.
pub fn init_logging() {
    let file = open_append(DEFAULT_LOG_PATH).or_else(|| open_append(FALLBACK_LOG_PATH));
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = file;
    }
}

/// Log to an explicit file instead of the default path.
pub fn init_logging_at<P: AsRef<Path>>(path: P) {
    let file = open_append(path);
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = file;
    }
}

/// Append a JSON line `{ts_ms, event, data}` to the event log.
///
/// Best effort throughout: if the logger was never initialized the line goes
/// to the /tmp fallback, and any write failure is swallowed.
pub fn log_event(event: &str, data: Value) {
    let line = json!({
        "ts_ms": now_millis(),
        "event": event,
        "data": data,
    })
    .to_string();

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(f) = guard.as_mut() {
            let _ = writeln!(f, "{}", line);
            return;
        }
    }
    if let Some(mut f) = open_append(FALLBACK_LOG_PATH) {
        let _ = writeln!(f, "{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_log_event_appends_json_lines() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("events.json");
        init_logging_at(&log);

        log_event("fan_write", json!({ "value": 127 }));
        log_event("pwm_duty", json!({ "percent": 70.0 }));

        let content = fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "fan_write");
        assert_eq!(first["data"]["value"], 127);
        assert!(first["ts_ms"].is_number());

        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["event"], "pwm_duty");

        // release the handle so other tests fall back cleanly
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = None;
        }
    }

    #[test]
    #[serial]
    fn test_init_logging_at_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("nested").join("events.json");
        init_logging_at(&log);
        log_event("startup", json!({}));
        assert!(log.exists());
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = None;
        }
    }
}

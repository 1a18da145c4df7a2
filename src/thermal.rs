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

use std::fs;
use std::path::Path;

use crate::fan::FanError;

/// Default thermal zone reporting the CPU temperature in millidegrees C.
pub const THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";

/// Read a thermal zone file and return the temperature in Celsius.
///
/// The file holds a single integer in millidegrees; non-numeric content is a
/// parse error, not a default.
pub fn read_cpu_temp_from<P: AsRef<Path>>(path: P) -> Result<f64, FanError> {
    let raw = fs::read_to_string(path)?;
    let trimmed = raw.trim();
    let millidegrees: i64 = trimmed.parse().map_err(|_| {
        FanError::Parse(format!("thermal zone value {:?} is not numeric", trimmed))
    })?;
    Ok(millidegrees as f64 / 1000.0)
}

/// Celsius to Fahrenheit.
pub fn c_to_f(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_zone(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("temp");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_cpu_temp_scales_millidegrees() {
        let dir = TempDir::new().unwrap();
        let zone = write_zone(&dir, "45000\n");
        assert_eq!(read_cpu_temp_from(&zone).unwrap(), 45.0);
    }

    #[test]
    fn test_read_cpu_temp_trims_whitespace() {
        let dir = TempDir::new().unwrap();
        let zone = write_zone(&dir, "  51500\n\n");
        assert_eq!(read_cpu_temp_from(&zone).unwrap(), 51.5);
    }

    #[test]
    fn test_read_cpu_temp_negative_value() {
        let dir = TempDir::new().unwrap();
        let zone = write_zone(&dir, "-5000\n");
        assert_eq!(read_cpu_temp_from(&zone).unwrap(), -5.0);
    }

    #[test]
    fn test_read_cpu_temp_non_numeric_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let zone = write_zone(&dir, "not-a-number\n");
        match read_cpu_temp_from(&zone) {
            Err(FanError::Parse(msg)) => assert!(msg.contains("not-a-number")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_cpu_temp_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            read_cpu_temp_from(&missing),
            Err(FanError::Io(_))
        ));
    }

    #[test]
    fn test_c_to_f() {
        assert_eq!(c_to_f(0.0), 32.0);
        assert_eq!(c_to_f(100.0), 212.0);
        assert_eq!(c_to_f(-40.0), -40.0);
    }
}

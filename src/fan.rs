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

use std::fmt;
use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i2c::I2cSet;
use crate::pwm::SoftPwm;
use crate::r10::R10FanControl;
use crate::r6::R6FanControl;

#[derive(Error, Debug)]
pub enum FanError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Unsupported revision: {0}")]
    UnsupportedRevision(String),
    #[error("Hardware write failed: {0}")]
    WriteFailed(String),
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),
}

/// Uniform fan interface shared by all board revisions.
///
/// Speeds are 0-100 percentages; each implementation maps them onto its
/// native hardware range.
pub trait FanController {
    /// Convert `speed` to hardware units, write it out, and remember the
    /// written value. Out-of-range input is handled by the revision's own
    /// mapping.
    fn set_fan_speed(&mut self, speed: i64) -> Result<(), FanError>;

    /// Last commanded speed converted back to a 0-100 value. Reflects state,
    /// never a measured RPM; does not touch hardware.
    fn get_fan_speed(&self) -> f64;

    /// CPU temperature in Celsius from the thermal zone.
    fn get_cpu_temp(&self) -> Result<f64, FanError>;
}

/// SJ201 board generations with a controllable fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Revision {
    R6,
    R10,
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::R6 => write!(f, "r6"),
            Revision::R10 => write!(f, "r10"),
        }
    }
}

impl FromStr for Revision {
    type Err = FanError;

    /// Accepts the strings produced by board detection ("6", "10", with or
    /// without the leading "r", any case). Anything else is an unsupported
    /// revision, reported with the offending value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "6" | "r6" => Ok(Revision::R6),
            "10" | "r10" => Ok(Revision::R10),
            other => Err(FanError::UnsupportedRevision(other.to_string())),
        }
    }
}

/// Build the fan controller for a board revision.
///
/// The only place that branches on the revision; callers hold the trait
/// object afterwards. Construction commands the fan to 0% so the hardware
/// starts in a known state, which means this performs hardware I/O and can
/// fail without leaving a partially built controller behind.
pub fn get_fan(revision: Revision) -> Result<Box<dyn FanController>, FanError> {
    match revision {
        Revision::R6 => Ok(Box::new(R6FanControl::new(I2cSet)?)),
        Revision::R10 => Ok(Box::new(R10FanControl::new(SoftPwm::acquire()?)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_from_str_accepts_detection_strings() {
        assert_eq!("6".parse::<Revision>().unwrap(), Revision::R6);
        assert_eq!("r6".parse::<Revision>().unwrap(), Revision::R6);
        assert_eq!("10".parse::<Revision>().unwrap(), Revision::R10);
        assert_eq!("R10".parse::<Revision>().unwrap(), Revision::R10);
        assert_eq!(" r6 ".parse::<Revision>().unwrap(), Revision::R6);
    }

    #[test]
    fn test_revision_from_str_rejects_unknown_values() {
        let err = "r11".parse::<Revision>().unwrap_err();
        match err {
            FanError::UnsupportedRevision(v) => assert_eq!(v, "r11"),
            other => panic!("expected UnsupportedRevision, got {:?}", other),
        }
        assert!("".parse::<Revision>().is_err());
        assert!("mark1".parse::<Revision>().is_err());
    }

    #[test]
    fn test_revision_display() {
        assert_eq!(Revision::R6.to_string(), "r6");
        assert_eq!(Revision::R10.to_string(), "r10");
    }

    #[test]
    fn test_revision_display_round_trips_through_from_str() {
        for rev in [Revision::R6, Revision::R10] {
            assert_eq!(rev.to_string().parse::<Revision>().unwrap(), rev);
        }
    }

    #[test]
    fn test_unsupported_revision_error_names_the_value() {
        let err = "r99".parse::<Revision>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported revision: r99");
    }

    // get_fan() needs the real I2C bus or GPIO and is covered by the
    // mock-backed controller tests in r6/r10 plus the integration tests.
}

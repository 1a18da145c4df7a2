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

//! r10 board: the fan hangs off a GPIO pin and is driven by an inverted PWM
//! duty cycle, where software 0% means 100% duty.

use std::path::PathBuf;

use crate::fan::{FanController, FanError};
use crate::pwm::PwmControl;
use crate::thermal;

/// Map a software speed onto the inverted duty-cycle range.
///
/// The board firmware defined this map with a wrap at 101 instead of a
/// clamp, so inputs above 100 fold back into range (101 -> 100.0, 200 ->
/// 1.0). Kept bit-for-bit; the boundary behavior is pinned by tests.
pub fn speed_to_hdw_val(speed: i64) -> f64 {
    100.0 - speed.rem_euclid(101) as f64
}

/// Map a duty cycle back to a software speed.
///
/// Not a true inverse of [`speed_to_hdw_val`]; it mirrors around 100
/// without the modulo.
pub fn hdw_val_to_speed(hdw_val: f64) -> f64 {
    (hdw_val - 100.0).abs()
}

pub struct R10FanControl<P: PwmControl> {
    pwm: P,
    fan_speed: f64,
    thermal_zone: PathBuf,
}

impl<P: PwmControl> R10FanControl<P> {
    /// Take ownership of an initialized PWM channel (already running at 0%
    /// duty) and command the initial 0% software speed through the normal
    /// set path.
    pub fn new(pwm: P) -> Result<Self, FanError> {
        let mut ctrl = R10FanControl {
            pwm,
            fan_speed: 0.0,
            thermal_zone: PathBuf::from(thermal::THERMAL_ZONE),
        };
        ctrl.set_fan_speed(0)?;
        Ok(ctrl)
    }

    /// Read temperatures from a different thermal zone file.
    pub fn set_thermal_zone<P2: Into<PathBuf>>(&mut self, path: P2) {
        self.thermal_zone = path.into();
    }

    fn hdw_set_speed(&mut self, hdw_speed: f64) -> Result<(), FanError> {
        self.pwm.set_duty_cycle(hdw_speed)
    }
}

impl<P: PwmControl> FanController for R10FanControl<P> {
    fn set_fan_speed(&mut self, speed: i64) -> Result<(), FanError> {
        self.fan_speed = speed_to_hdw_val(speed);
        self.hdw_set_speed(self.fan_speed)
    }

    fn get_fan_speed(&self) -> f64 {
        hdw_val_to_speed(self.fan_speed)
    }

    fn get_cpu_temp(&self) -> Result<f64, FanError> {
        thermal::read_cpu_temp_from(&self.thermal_zone)
    }
}

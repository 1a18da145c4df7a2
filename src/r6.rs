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

//! r6 board: the fan speed is a byte register on the I2C microcontroller,
//! mapped linearly from the 0-100 software range.

use std::path::PathBuf;

use crate::fan::{FanController, FanError};
use crate::i2c::BusWrite;
use crate::thermal;

const HDW_MIN: i64 = 0;
const HDW_MAX: i64 = 255;
const SFW_MIN: i64 = 0;
const SFW_MAX: i64 = 100;

/// Map a software speed onto the register range. Out-of-range speeds clamp
/// at both ends; the scaled value truncates toward zero.
pub fn speed_to_hdw_val(speed: i64) -> i64 {
    let ratio = (HDW_MAX - HDW_MIN) as f64 / (SFW_MAX - SFW_MIN) as f64;
    let speed = speed.clamp(SFW_MIN, SFW_MAX);
    (speed as f64 * ratio + HDW_MIN as f64) as i64
}

/// Map a register value back to a software speed, rounding to the nearest
/// percent.
pub fn hdw_val_to_speed(hdw_val: i64) -> i64 {
    let ratio = (SFW_MAX - SFW_MIN) as f64 / (HDW_MAX - HDW_MIN) as f64;
    let hdw_val = hdw_val.clamp(HDW_MIN, HDW_MAX);
    ((hdw_val - HDW_MIN) as f64 * ratio + SFW_MIN as f64).round() as i64
}

pub struct R6FanControl<B: BusWrite> {
    bus: B,
    fan_speed: i64,
    thermal_zone: PathBuf,
}

impl<B: BusWrite> R6FanControl<B> {
    /// Take ownership of the bus and command the fan to 0% so the hardware
    /// starts from a known state.
    pub fn new(bus: B) -> Result<Self, FanError> {
        let mut ctrl = R6FanControl {
            bus,
            fan_speed: 0,
            thermal_zone: PathBuf::from(thermal::THERMAL_ZONE),
        };
        ctrl.set_fan_speed(0)?;
        Ok(ctrl)
    }

    /// Read temperatures from a different thermal zone file.
    pub fn set_thermal_zone<P: Into<PathBuf>>(&mut self, path: P) {
        self.thermal_zone = path.into();
    }

    fn hdw_set_speed(&mut self, hdw_speed: i64) -> Result<(), FanError> {
        // clamp once more before the value reaches the wire
        let hdw_speed = hdw_speed.clamp(HDW_MIN, HDW_MAX);
        self.bus.write(hdw_speed as u8)
    }
}

impl<B: BusWrite> FanController for R6FanControl<B> {
    fn set_fan_speed(&mut self, speed: i64) -> Result<(), FanError> {
        self.fan_speed = speed_to_hdw_val(speed);
        self.hdw_set_speed(self.fan_speed)
    }

    fn get_fan_speed(&self) -> f64 {
        hdw_val_to_speed(self.fan_speed) as f64
    }

    fn get_cpu_temp(&self) -> Result<f64, FanError> {
        thermal::read_cpu_temp_from(&self.thermal_zone)
    }
}

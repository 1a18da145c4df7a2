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

use serde_json::json;

use crate::cmd;
use crate::fan::FanError;
use crate::logger;

/// I2C bus the fan microcontroller sits on.
pub const I2C_BUS: u8 = 1;
/// Microcontroller address on that bus.
pub const I2C_ADDRESS: u8 = 0x04;
/// Register holding the fan speed byte.
pub const FAN_REGISTER: u8 = 101;

/// Write-only capability for the fan speed register.
///
/// Deliberately narrow so the shell-backed implementation can be swapped for
/// a direct register-level driver without touching the mapping logic.
#[cfg_attr(test, mockall::automock)]
pub trait BusWrite {
    fn write(&mut self, value: u8) -> Result<(), FanError>;
}

/// Register write via the `i2cset` system utility.
#[derive(Debug, Clone, Copy, Default)]
pub struct I2cSet;

fn i2cset_args(value: u8) -> [String; 7] {
    [
        "i2cset".to_string(),
        "-y".to_string(),
        I2C_BUS.to_string(),
        format!("0x{:02x}", I2C_ADDRESS),
        FAN_REGISTER.to_string(),
        value.to_string(),
        "i".to_string(),
    ]
}

impl BusWrite for I2cSet {
    fn write(&mut self, value: u8) -> Result<(), FanError> {
        let args = i2cset_args(value);
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        let out = cmd::run(&argv)?;
        logger::log_event(
            "fan_write",
            json!({
                "bus": I2C_BUS,
                "address": I2C_ADDRESS,
                "register": FAN_REGISTER,
                "value": value,
                "exit_code": out.status.code(),
            }),
        );
        if !out.status.success() {
            return Err(FanError::WriteFailed(format!(
                "i2cset exited with {}: {}",
                out.status,
                out.stderr.to_text_lossy().trim()
            )));
        }
        Ok(())
    }
}

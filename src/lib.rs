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

//! sj201-fan - fan control and CPU temperature readback for the SJ201 board
//!
//! Two hardware revisions expose the same percentage-based interface: the r6
//! board holds the fan speed in a byte register on an I2C microcontroller,
//! the r10 board drives the fan through an inverted PWM duty cycle on a GPIO
//! pin. The [`fan::get_fan`] factory picks the implementation for a detected
//! board revision.

pub mod cmd;
pub mod fan;
pub mod i2c;
pub mod logger;
pub mod pwm;
pub mod r10;
pub mod r6;
pub mod thermal;

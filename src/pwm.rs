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

use rppal::gpio::{Gpio, OutputPin};
use serde_json::json;

use crate::fan::FanError;
use crate::logger;

/// BCM pin driving the fan.
pub const FAN_PWM_PIN: u8 = 13;
/// Software PWM frequency in Hz.
pub const PWM_FREQUENCY_HZ: f64 = 1000.0;

/// Convert a 0-100 duty percentage to rppal's 0.0-1.0 range. Out-of-range
/// input clamps at both ends.
pub fn percent_to_duty(percent: f64) -> f64 {
    (percent / 100.0).clamp(0.0, 1.0)
}

/// Duty-cycle capability for the PWM-driven fan.
#[cfg_attr(test, mockall::automock)]
pub trait PwmControl {
    /// Set the duty cycle as a 0-100 percentage.
    fn set_duty_cycle(&mut self, percent: f64) -> Result<(), FanError>;
}

/// Software PWM on the fan GPIO pin.
///
/// Owns the pin exclusively. Dropping the value stops the PWM thread and
/// resets the pin, so the peripheral is released with the controller.
pub struct SoftPwm {
    pin: OutputPin,
}

impl SoftPwm {
    /// Configure the pin for output and start PWM at 0% duty. Must run
    /// before any duty-cycle change is issued.
    pub fn acquire() -> Result<Self, FanError> {
        let mut pin = Gpio::new()?.get(FAN_PWM_PIN)?.into_output();
        pin.set_pwm_frequency(PWM_FREQUENCY_HZ, 0.0)?;
        Ok(SoftPwm { pin })
    }
}

impl PwmControl for SoftPwm {
    fn set_duty_cycle(&mut self, percent: f64) -> Result<(), FanError> {
        let duty = percent_to_duty(percent);
        self.pin.set_pwm_frequency(PWM_FREQUENCY_HZ, duty)?;
        logger::log_event(
            "pwm_duty",
            json!({
                "pin": FAN_PWM_PIN,
                "percent": percent,
                "duty": duty,
            }),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_to_duty_scales_into_unit_range() {
        assert_eq!(percent_to_duty(0.0), 0.0);
        assert_eq!(percent_to_duty(50.0), 0.5);
        assert_eq!(percent_to_duty(100.0), 1.0);
    }

    #[test]
    fn test_percent_to_duty_clamps_out_of_range() {
        assert_eq!(percent_to_duty(150.0), 1.0);
        assert_eq!(percent_to_duty(-10.0), 0.0);
    }

    // SoftPwm itself needs the GPIO peripheral; the r10 controller is
    // exercised against MockPwmControl instead.
}

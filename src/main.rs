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

use sj201_fan::fan::{get_fan, FanError, Revision};
use sj201_fan::{logger, thermal};

#[derive(Debug, PartialEq)]
enum Command {
    Set(Revision, i64),
    Get(Revision),
    Temp,
}

fn usage() {
    eprintln!("usage: sj201-fan [--logging] <revision> set <percent>");
    eprintln!("       sj201-fan [--logging] <revision> get");
    eprintln!("       sj201-fan [--logging] temp");
    eprintln!();
    eprintln!("revisions: r6 (I2C register), r10 (GPIO PWM)");
}

/// Map the positional arguments onto a command. `None` means the shape was
/// not recognized at all; `Some(Err(..))` means the shape matched but a
/// value inside it did not parse.
fn parse_command(positional: &[&str]) -> Option<Result<Command, FanError>> {
    match positional {
        [revision, "set", percent] => {
            let parsed = revision.parse().and_then(|rev| {
                percent
                    .parse::<i64>()
                    .map(|pct| Command::Set(rev, pct))
                    .map_err(|_| {
                        FanError::Parse(format!("percent must be an integer, got {:?}", percent))
                    })
            });
            Some(parsed)
        }
        [revision, "get"] => Some(revision.parse().map(Command::Get)),
        ["temp"] => Some(Ok(Command::Temp)),
        _ => None,
    }
}

fn require_root(args: &[String]) {
    // Touching the I2C bus or GPIO is root-only
    if unsafe { libc::geteuid() } != 0 {
        eprintln!("Error: fan control requires root privileges.");
        eprintln!(
            "Please run with: sudo {}",
            args.first().map(String::as_str).unwrap_or("sj201-fan")
        );
        std::process::exit(1);
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // Optional logging to /etc/sj201-fan/logs.json
    if args.iter().any(|a| a == "--logging") {
        logger::init_logging();
        logger::log_event("startup", serde_json::json!({ "args": args }));
    }

    let positional: Vec<&str> = args
        .iter()
        .skip(1)
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .collect();

    let command = match parse_command(&positional) {
        Some(Ok(cmd)) => cmd,
        Some(Err(e)) => return Err(e.into()),
        None => {
            usage();
            std::process::exit(2);
        }
    };

    match command {
        Command::Set(revision, percent) => {
            require_root(&args);
            let mut fan = get_fan(revision)?;
            fan.set_fan_speed(percent)?;
            println!("{}: fan speed set to {}%", revision, fan.get_fan_speed());
        }
        Command::Get(revision) => {
            // Construction commands the fan to 0%, so this reports the
            // last value commanded by this process, not a measured RPM.
            require_root(&args);
            let fan = get_fan(revision)?;
            println!("{}: fan speed {}%", revision, fan.get_fan_speed());
        }
        Command::Temp => {
            let celsius = thermal::read_cpu_temp_from(thermal::THERMAL_ZONE)?;
            println!("CPU: {:.1} C / {:.1} F", celsius, thermal::c_to_f(celsius));
        }
    }

    Ok(())
}

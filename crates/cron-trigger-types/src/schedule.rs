//! Schedule expression grammar
//!
//! Accepted forms:
//!
//! - six whitespace-separated fields: seconds, minutes, hours, day-of-month,
//!   month, day-of-week (parsed by the `cron` crate)
//! - named descriptors: `@yearly`, `@annually`, `@monthly`, `@weekly`,
//!   `@daily`, `@midnight`, `@hourly`
//! - fixed intervals: `@every <duration>` with `ns`, `us`, `ms`, `s`, `m`, `h` units
//!
//! Day-of-week follows the remote scheduler: `0`-`6` with Sunday as `0`, or
//! the names `SUN`-`SAT`. The field is renumbered before it reaches `cron`,
//! which counts Sunday as `1`. Intervals are truncated to whole seconds, and
//! anything shorter than one second runs every second.

use crate::error::ScheduleError;
use std::str::FromStr;
use std::time::Duration;

const FIELD_COUNT: usize = 6;
const DESCRIPTOR_PREFIX: char = '@';
const EVERY_DESCRIPTOR: &str = "@every";
const DAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];
const MAX_DAY: u32 = 6;
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// A parsed schedule
#[derive(Debug, Clone)]
pub enum Schedule {
    /// Calendar schedule from six fields or a named descriptor
    Cron(cron::Schedule),
    /// Fixed interval from `@every`
    Every(Duration),
}

impl Schedule {
    pub fn parse(expression: &str) -> Result<Self, ScheduleError> {
        let spec = expression.trim();
        if spec.is_empty() {
            return Err(ScheduleError::Empty);
        }

        if spec.starts_with(DESCRIPTOR_PREFIX) {
            return parse_descriptor(spec);
        }

        parse_fields(spec)
    }

    pub fn is_interval(&self) -> bool {
        matches!(self, Schedule::Every(_))
    }
}

impl FromStr for Schedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_fields(spec: &str) -> Result<Schedule, ScheduleError> {
    let fields: Vec<&str> = spec.split_whitespace().collect();
    if fields.len() != FIELD_COUNT {
        return Err(ScheduleError::FieldCount {
            found: fields.len(),
            expression: spec.to_string(),
        });
    }

    let normalized = format!(
        "{} {}",
        fields[..FIELD_COUNT - 1].join(" "),
        normalize_day_of_week(fields[FIELD_COUNT - 1])?
    );
    cron::Schedule::from_str(&normalized)
        .map(Schedule::Cron)
        .map_err(|e| ScheduleError::Syntax(e.to_string()))
}

fn parse_descriptor(spec: &str) -> Result<Schedule, ScheduleError> {
    if let Some(interval) = spec.strip_prefix(EVERY_DESCRIPTOR) {
        let duration = parse_interval(interval.trim())?;
        return Ok(Schedule::Every(duration));
    }

    let fields = match spec {
        "@yearly" | "@annually" => "0 0 0 1 1 *",
        "@monthly" => "0 0 0 1 * *",
        "@weekly" => "0 0 0 * * 0",
        "@daily" | "@midnight" => "0 0 0 * * *",
        "@hourly" => "0 0 * * * *",
        other => return Err(ScheduleError::UnknownDescriptor(other.to_string())),
    };
    parse_fields(fields)
}

/// Renumber a day-of-week field from Sunday = 0 to Sunday = 1
///
/// Lists, ranges and steps keep their shape; step sizes are left alone.
fn normalize_day_of_week(field: &str) -> Result<String, ScheduleError> {
    let items = field
        .split(',')
        .map(|item| -> Result<String, ScheduleError> {
            let (range, step) = match item.split_once('/') {
                Some((range, step)) => (range, Some(step)),
                None => (item, None),
            };
            let range = match range {
                "*" | "?" => range.to_string(),
                _ => range
                    .split('-')
                    .map(|day| shift_day(field, day))
                    .collect::<Result<Vec<_>, _>>()?
                    .join("-"),
            };
            Ok(match step {
                Some(step) => format!("{range}/{step}"),
                None => range,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items.join(","))
}

fn shift_day(field: &str, day: &str) -> Result<String, ScheduleError> {
    let invalid = |reason: String| ScheduleError::DayOfWeek {
        value: field.to_string(),
        reason,
    };

    let ordinal = match day.parse::<u32>() {
        Ok(n) if n <= MAX_DAY => n,
        Ok(n) => return Err(invalid(format!("{n} above maximum ({MAX_DAY})"))),
        Err(_) => DAY_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(day))
            .ok_or_else(|| invalid(format!("unknown day {day:?}")))? as u32,
    };
    Ok((ordinal + 1).to_string())
}

/// Parse a duration such as `90s`, `1h30m` or `1.5h`
fn parse_interval(input: &str) -> Result<Duration, ScheduleError> {
    let invalid = |reason: &str| ScheduleError::InvalidInterval {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    if input.is_empty() {
        return Err(invalid("missing duration"));
    }

    let (negative, unsigned) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    let mut seconds = 0f64;
    let mut rest = unsigned;
    if rest != "0" {
        if rest.is_empty() {
            return Err(invalid("expected a number"));
        }
        while !rest.is_empty() {
            let number_end = rest
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(rest.len());
            if number_end == 0 {
                return Err(invalid("expected a number"));
            }
            let value: f64 = rest[..number_end]
                .parse()
                .map_err(|_| invalid("invalid number"))?;
            rest = &rest[number_end..];

            let unit_end = rest
                .find(|c: char| c.is_ascii_digit() || c == '.')
                .unwrap_or(rest.len());
            let scale = match &rest[..unit_end] {
                "ns" => 1e-9,
                "us" | "µs" | "μs" => 1e-6,
                "ms" => 1e-3,
                "s" => 1.0,
                "m" => 60.0,
                "h" => 3600.0,
                "" => return Err(invalid("missing unit")),
                _ => return Err(invalid("unknown unit")),
            };
            seconds += value * scale;
            rest = &rest[unit_end..];
        }
    }

    if negative {
        return Ok(MIN_INTERVAL);
    }
    let duration = Duration::try_from_secs_f64(seconds).map_err(|_| invalid("out of range"))?;
    Ok(Duration::from_secs(duration.as_secs()).max(MIN_INTERVAL))
}

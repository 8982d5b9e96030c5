//! Axis label formatting.
//!
//! Value axes carry a short numeric format code such as `F5`. Time axes carry
//! a `chrono` strftime pattern. Plot X coordinates are seconds since the UNIX
//! epoch.

use chrono::{DateTime, TimeZone, Utc};

// ─────────────────────────────────────────────────────────────────────────────
// Time <-> plot coordinates
// ─────────────────────────────────────────────────────────────────────────────

/// Plot X coordinate of a timestamp.
pub fn to_plot_x(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / 1_000.0
}

/// Timestamp of a plot X coordinate, if it is representable.
pub fn from_plot_x(x: f64) -> Option<DateTime<Utc>> {
    if !x.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt((x * 1_000.0).round() as i64).single()
}

/// Format a plot X coordinate with a strftime pattern (`%H:%M` if empty).
pub fn format_time(x: f64, pattern: &str) -> String {
    let pattern = if pattern.is_empty() { "%H:%M" } else { pattern };
    match from_plot_x(x) {
        Some(t) => t.format(pattern).to_string(),
        None => String::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Numeric format codes
// ─────────────────────────────────────────────────────────────────────────────

/// A parsed numeric format code.
///
/// | Code | Meaning | `1234.5678` with precision 2 |
/// | ---- | ------- | ---------------------------- |
/// | `F`  | fixed point | `1234.57` |
/// | `N`  | fixed point with thousands separators | `1,234.57` |
/// | `P`  | percent (value × 100) | `123456.78 %` |
/// | `E`  | scientific | `1.23e3` |
/// | `G`  | shortest round-trip | `1234.5678` |
///
/// Unknown codes fall back to `G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Fixed(usize),
    Number(usize),
    Percent(usize),
    Exponent(usize),
    General,
}

impl NumberFormat {
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        let mut chars = code.chars();
        let Some(head) = chars.next() else {
            return NumberFormat::General;
        };
        let digits = chars.as_str();
        let precision = if digits.is_empty() {
            None
        } else {
            match digits.parse::<usize>() {
                Ok(p) => Some(p.min(15)),
                Err(_) => return NumberFormat::General,
            }
        };
        match head.to_ascii_uppercase() {
            'F' => NumberFormat::Fixed(precision.unwrap_or(2)),
            'N' => NumberFormat::Number(precision.unwrap_or(2)),
            'P' => NumberFormat::Percent(precision.unwrap_or(2)),
            'E' => NumberFormat::Exponent(precision.unwrap_or(6)),
            _ => NumberFormat::General,
        }
    }

    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        match *self {
            NumberFormat::Fixed(p) => format!("{value:.p$}"),
            NumberFormat::Number(p) => group_thousands(&format!("{value:.p$}")),
            NumberFormat::Percent(p) => format!("{:.p$} %", value * 100.0),
            NumberFormat::Exponent(p) => format!("{value:.p$e}"),
            NumberFormat::General => format!("{value}"),
        }
    }
}

/// Format `value` with a format code such as `F5`.
pub fn format_value(value: f64, code: &str) -> String {
    NumberFormat::parse(code).format(value)
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", s),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_point_codes() {
        assert_eq!(format_value(1.234567, "F5"), "1.23457");
        assert_eq!(format_value(2.0, "F0"), "2");
        assert_eq!(format_value(2.0, "f"), "2.00");
    }

    #[test]
    fn number_code_groups_thousands() {
        assert_eq!(format_value(1234567.891, "N2"), "1,234,567.89");
        assert_eq!(format_value(-1234.5, "N1"), "-1,234.5");
        assert_eq!(format_value(999.0, "N0"), "999");
    }

    #[test]
    fn percent_and_fallback() {
        assert_eq!(format_value(0.125, "P1"), "12.5 %");
        assert_eq!(NumberFormat::parse("Fx"), NumberFormat::General);
        assert_eq!(NumberFormat::parse(""), NumberFormat::General);
    }

    #[test]
    fn plot_x_round_trip_keeps_millis() {
        let t = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(from_plot_x(to_plot_x(t)), Some(t));
        assert_eq!(format_time(0.0, "%Y-%m-%d"), "1970-01-01");
    }
}

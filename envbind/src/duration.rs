//! Duration literals such as `300ms`, `1.5h` or `1h2m3s`.
//!
//! A literal is a sequence of decimal numbers, each with an optional fraction
//! and a mandatory unit: `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m`, `h`.
//! The bare literal `0` needs no unit. Negative durations are rejected since
//! `std::time::Duration` is unsigned.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3600 * NANOS_PER_SEC),
        _ => None,
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    s.split_at(len)
}

pub(crate) fn parse(raw: &str) -> Result<Duration, String> {
    let overflow = || format!("duration {raw:?} is out of range");

    let mut rest = raw.strip_prefix('+').unwrap_or(raw);
    if rest.starts_with('-') {
        return Err("negative durations are not supported".to_string());
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(format!("invalid duration {raw:?}"));
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(format!("invalid duration {raw:?}"));
        }

        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, remaining) = after_number.split_at(unit_len);
        let scale = match unit_nanos(unit) {
            Some(scale) => scale,
            None if unit.is_empty() => return Err(format!("missing unit in duration {raw:?}")),
            None => return Err(format!("unknown unit {unit:?} in duration {raw:?}")),
        };

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(overflow)?;
        if !fraction.is_empty() {
            // Digits past 18 are below nanosecond precision for every unit.
            let fraction = &fraction[..fraction.len().min(18)];
            let numerator: u128 = fraction.parse().map_err(|_| overflow())?;
            let denominator = 10u128.pow(fraction.len() as u32);
            nanos = nanos
                .checked_add(numerator * scale / denominator)
                .ok_or_else(overflow)?;
        }
        total = total.checked_add(nanos).ok_or_else(overflow)?;
        rest = remaining;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| overflow())?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_units() {
        assert_eq!(parse("300ms").unwrap(), Duration::from_millis(300));
        assert_eq!(parse("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse("15us").unwrap(), Duration::from_micros(15));
        assert_eq!(parse("15µs").unwrap(), Duration::from_micros(15));
        assert_eq!(parse("7ns").unwrap(), Duration::from_nanos(7));
    }

    #[test]
    fn test_parse_composite() {
        assert_eq!(parse("1h2m3s").unwrap(), Duration::from_secs(3723));
        assert_eq!(parse("1m30s500ms").unwrap(), Duration::from_millis(90_500));
    }

    #[test]
    fn test_parse_fractions() {
        assert_eq!(parse("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse(".5s").unwrap(), Duration::from_millis(500));
        assert_eq!(parse("1.s").unwrap(), Duration::from_secs(1));
    }

    #[test]
    fn test_parse_zero_and_sign() {
        assert_eq!(parse("0").unwrap(), Duration::ZERO);
        assert_eq!(parse("+3s").unwrap(), Duration::from_secs(3));
        assert!(parse("-3s").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse("").is_err());
        assert!(parse("10").is_err());
        assert!(parse("s").is_err());
        assert!(parse(".s").is_err());
        assert!(parse("3d").unwrap_err().contains("unknown unit"));
        assert!(parse("1h 2m").is_err());
    }

    #[test]
    fn test_parse_overflow() {
        assert!(parse("99999999999999999999999h").is_err());
        // The whole part fits, the fraction pushes it past the limit.
        assert!(parse("94522879700260684295381835.9h")
            .unwrap_err()
            .contains("out of range"));
    }
}

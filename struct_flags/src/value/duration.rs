//! Go-style duration literals: `300ms`, `1.5h`, `2h45m`, `0`.

use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
/// Fraction digits beyond this cannot change a nanosecond count.
const MAX_FRACTION_DIGITS: usize = 18;

pub(super) fn parse(text: &str) -> Result<Duration, String> {
    let (negative, body) = text.strip_prefix('-').map_or_else(
        || (false, text.strip_prefix('+').unwrap_or(text)),
        |rest| (true, rest),
    );
    if body == "0" {
        return Ok(Duration::ZERO);
    }
    if body.is_empty() {
        return Err("empty duration".to_owned());
    }

    let mut rest = body;
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (nanos, remainder) = next_component(rest)?;
        total = total.checked_add(nanos).ok_or_else(overflow)?;
        rest = remainder;
    }

    if negative && total > 0 {
        return Err("negative durations are not supported".to_owned());
    }
    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| overflow())
}

fn next_component(text: &str) -> Result<(u128, &str), String> {
    let (whole, after_whole) = take_digits(text);
    let (fraction, after_fraction) = after_whole
        .strip_prefix('.')
        .map_or(("", after_whole), take_digits);
    if whole.is_empty() && fraction.is_empty() {
        return Err(format!("expected a number at {text:?}"));
    }

    let unit_end = after_fraction
        .find(|c: char| c == '.' || c.is_ascii_digit())
        .unwrap_or(after_fraction.len());
    let (unit, remainder) = after_fraction.split_at(unit_end);
    let unit_nanos = unit_nanos(unit)?;

    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().map_err(|_| overflow())?
    };
    let nanos = whole_value
        .checked_mul(unit_nanos)
        .and_then(|n| n.checked_add(fraction_nanos(fraction, unit_nanos)))
        .ok_or_else(overflow)?;
    Ok((nanos, remainder))
}

#[expect(
    clippy::integer_division,
    reason = "sub-nanosecond remainders are truncated as Go does"
)]
fn fraction_nanos(fraction: &str, unit_nanos: u128) -> u128 {
    let digits = fraction.get(..MAX_FRACTION_DIGITS).unwrap_or(fraction);
    if digits.is_empty() {
        return 0;
    }
    let Ok(value) = digits.parse::<u128>() else {
        return 0;
    };
    let exponent = u32::try_from(digits.len()).unwrap_or(u32::MAX);
    let scale = 10u128.saturating_pow(exponent);
    value.saturating_mul(unit_nanos) / scale
}

fn unit_nanos(unit: &str) -> Result<u128, String> {
    match unit {
        "ns" => Ok(1),
        "us" | "µs" | "μs" => Ok(NANOS_PER_MICRO),
        "ms" => Ok(NANOS_PER_MILLI),
        "s" => Ok(NANOS_PER_SEC),
        "m" => Ok(60 * NANOS_PER_SEC),
        "h" => Ok(3_600 * NANOS_PER_SEC),
        "" => Err("missing unit in duration".to_owned()),
        other => Err(format!("unknown unit {other:?} in duration")),
    }
}

fn take_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

fn overflow() -> String {
    "duration out of range".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero("0", Duration::ZERO)]
    #[case::minutes("10m", Duration::from_secs(600))]
    #[case::compound("1h30m", Duration::from_secs(5_400))]
    #[case::fraction("1.5s", Duration::from_millis(1_500))]
    #[case::leading_dot(".5ms", Duration::from_micros(500))]
    #[case::trailing_dot("2.s", Duration::from_secs(2))]
    #[case::micro_sign("7µs", Duration::from_micros(7))]
    #[case::nanos("42ns", Duration::from_nanos(42))]
    #[case::plus("+5m", Duration::from_secs(300))]
    #[case::negative_zero("-0s", Duration::ZERO)]
    fn parses_go_durations(#[case] text: &str, #[case] expected: Duration) {
        assert_eq!(parse(text), Ok(expected));
    }

    #[rstest]
    #[case::empty("")]
    #[case::no_unit("10")]
    #[case::unknown_unit("3d")]
    #[case::no_number("ms")]
    #[case::lone_dot(".s")]
    #[case::negative("-1s")]
    #[case::overflow("99999999999999h")]
    fn rejects_invalid_durations(#[case] text: &str) {
        assert!(parse(text).is_err(), "{text:?} should be rejected");
    }
}

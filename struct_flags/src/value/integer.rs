//! Integer literal parsing shared by every integer flag kind.
//!
//! Literals are decimal unless prefixed with `0x`, `0o` or `0b`. Underscore
//! separators are accepted only after a base prefix. Values are parsed into a
//! 128-bit accumulator and narrowed by the caller.

pub(super) fn parse_signed(text: &str) -> Result<i128, String> {
    let (negative, unsigned) = split_sign(text);
    let magnitude = parse_magnitude(unsigned)?;
    let value = i128::try_from(magnitude).map_err(|e| e.to_string())?;
    Ok(if negative { -value } else { value })
}

pub(super) fn parse_unsigned(text: &str) -> Result<u128, String> {
    let (negative, unsigned) = split_sign(text);
    if negative {
        return Err("unsigned values cannot be negative".to_owned());
    }
    parse_magnitude(unsigned)
}

fn split_sign(text: &str) -> (bool, &str) {
    text.strip_prefix('-').map_or_else(
        || (false, text.strip_prefix('+').unwrap_or(text)),
        |rest| (true, rest),
    )
}

fn parse_magnitude(text: &str) -> Result<u128, String> {
    let (radix, digits) = split_radix(text);
    let cleaned = if radix == 10 {
        digits.to_owned()
    } else {
        digits.replace('_', "")
    };
    if cleaned.is_empty() {
        return Err("missing digits".to_owned());
    }
    // from_str_radix tolerates its own leading sign; a second one is invalid.
    if cleaned.starts_with(['+', '-']) {
        return Err("unexpected sign".to_owned());
    }
    u128::from_str_radix(&cleaned, radix).map_err(|e| e.to_string())
}

fn split_radix(text: &str) -> (u32, &str) {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some('0'), Some('x' | 'X')) => (16, chars.as_str()),
        (Some('0'), Some('o' | 'O')) => (8, chars.as_str()),
        (Some('0'), Some('b' | 'B')) => (2, chars.as_str()),
        _ => (10, text),
    }
}

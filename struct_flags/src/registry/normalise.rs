//! Token normalisation ahead of clap.
//!
//! Long flags may be written with one hyphen (`-name`, `-name=value`). Clap
//! reads a single hyphen as a cluster of short flags, so such tokens are
//! rewritten to the double-hyphen form. `-h` and `--h` both become clap's
//! short help flag; `-help` becomes `--help`. Any inline value on a help
//! spelling is dropped.

use std::collections::HashMap;
use std::ffi::OsString;

/// Tokens ready for clap, plus the original spelling of each rewritten token.
#[derive(Debug, Default)]
pub(super) struct Normalised {
    pub(super) tokens: Vec<OsString>,
    /// Whether a bare `--` appeared where a flag was expected.
    pub(super) terminated: bool,
    rewritten: HashMap<String, String>,
}

impl Normalised {
    /// Maps a token as clap reported it back to what the user typed.
    pub(super) fn original<'a>(&'a self, reported: &'a str) -> &'a str {
        self.rewritten
            .get(reported)
            .map_or(reported, String::as_str)
    }
}

/// Rewrites single-hyphen long flags.
///
/// `lookup` returns `None` for an unregistered name, else whether the flag
/// consumes the following token when no inline `=value` is given. Such a
/// token is passed through untouched, as is everything after a bare `--`.
pub(super) fn normalise<I, T, F>(tokens: I, lookup: F) -> Normalised
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    F: Fn(&str) -> Option<bool>,
{
    let mut out = Normalised::default();
    let mut expecting_value = false;

    for token in tokens {
        let raw: OsString = token.into();
        if out.terminated || expecting_value {
            expecting_value = false;
            out.tokens.push(raw);
            continue;
        }
        let Some(text) = raw.to_str() else {
            out.tokens.push(raw);
            continue;
        };
        if text == "--" {
            out.terminated = true;
            out.tokens.push(raw);
            continue;
        }
        let Some(flag) = FlagToken::parse(text, &lookup) else {
            out.tokens.push(raw);
            continue;
        };

        expecting_value = flag.value.is_none() && lookup(flag.name).unwrap_or(false);
        let rewritten = flag.canonical();
        if rewritten != text {
            out.rewritten.insert(flag.canonical_name(), flag.spelled_name());
            out.rewritten.insert(rewritten.clone(), text.to_owned());
        }
        out.tokens.push(OsString::from(rewritten));
    }
    out
}

/// A token that names a flag.
struct FlagToken<'a> {
    hyphens: &'static str,
    name: &'a str,
    value: Option<&'a str>,
}

impl<'a> FlagToken<'a> {
    fn parse(text: &'a str, lookup: impl Fn(&str) -> Option<bool>) -> Option<Self> {
        let (hyphens, body) = if let Some(body) = text.strip_prefix("--") {
            ("--", body)
        } else {
            ("-", text.strip_prefix('-')?)
        };
        if body.is_empty() {
            return None;
        }
        let (name, value) = body
            .split_once('=')
            .map_or((body, None), |(name, value)| (name, Some(value)));
        // `-5` and `-.5` are numbers unless a flag carries that name.
        let numeric = hyphens == "-"
            && body.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            && lookup(name).is_none();
        if numeric {
            return None;
        }
        Some(Self {
            hyphens,
            name,
            value,
        })
    }

    fn is_short_help(&self) -> bool {
        self.name == "h"
    }

    fn is_long_help(&self) -> bool {
        self.name == "help"
    }

    fn canonical_name(&self) -> String {
        if self.is_short_help() {
            "-h".to_owned()
        } else {
            format!("--{}", self.name)
        }
    }

    fn spelled_name(&self) -> String {
        format!("{}{}", self.hyphens, self.name)
    }

    fn canonical(&self) -> String {
        match self.value {
            _ if self.is_short_help() => "-h".to_owned(),
            _ if self.is_long_help() => "--help".to_owned(),
            Some(value) => format!("--{}={value}", self.name),
            None => format!("--{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn run(tokens: &[&str]) -> Vec<String> {
        let lookup = |name: &str| match name {
            "str" | "num" | "n" | "1st" => Some(true),
            "boo" => Some(false),
            _ => None,
        };
        normalise(tokens.iter().copied(), lookup)
            .tokens
            .into_iter()
            .map(|t| t.to_string_lossy().into_owned())
            .collect()
    }

    #[rstest]
    #[case::single_hyphen(&["-str=x"], &["--str=x"])]
    #[case::double_hyphen(&["--str=x"], &["--str=x"])]
    #[case::separate_value(&["-str", "-boo"], &["--str", "-boo"])]
    #[case::bare_bool(&["-boo"], &["--boo"])]
    #[case::single_char(&["-n", "-1"], &["--n", "-1"])]
    #[case::short_help(&["-h"], &["-h"])]
    #[case::long_short_help(&["--h"], &["-h"])]
    #[case::long_help(&["-help"], &["--help"])]
    #[case::long_help_with_value(&["-help=1"], &["--help"])]
    #[case::short_help_with_value(&["-h=true"], &["-h"])]
    #[case::negative_number(&["-5"], &["-5"])]
    #[case::negative_fraction(&["-.5"], &["-.5"])]
    #[case::digit_led_flag(&["-1st=a"], &["--1st=a"])]
    #[case::digit_led_flag_value(&["-1st", "-2"], &["--1st", "-2"])]
    #[case::positional(&["random"], &["random"])]
    #[case::terminator(&["--", "-str"], &["--", "-str"])]
    #[case::inline_value_does_not_consume(&["-num=1", "-boo"], &["--num=1", "--boo"])]
    fn rewrites_tokens(#[case] input: &[&str], #[case] expected: &[&str]) {
        assert_eq!(run(input), expected);
    }

    #[rstest]
    fn remembers_original_spelling() {
        let out = normalise(["-bogus=1"], |_| None);
        assert_eq!(out.original("--bogus=1"), "-bogus=1");
        assert_eq!(out.original("--bogus"), "-bogus");
        assert_eq!(out.original("--untouched"), "--untouched");
    }

    #[rstest]
    #[case::bare(&["--"], true)]
    #[case::as_value(&["-str", "--"], false)]
    #[case::absent(&["-boo"], false)]
    fn flags_a_bare_terminator(#[case] input: &[&str], #[case] expected: bool) {
        let lookup = |name: &str| (name == "str").then_some(true);
        assert_eq!(normalise(input.iter().copied(), lookup).terminated, expected);
    }
}

//! Parsing of the pipe-delimited flag annotation.
//!
//! An annotation has up to four segments, `name|usage|default|required`, and
//! only the name is mandatory. An empty annotation marks a field that is not a
//! flag.

use crate::error::{FlagsError, FlagsResult};

/// Separator between annotation segments.
pub const SEGMENT_DELIMITER: char = '|';
/// Token accepted in the fourth segment.
pub const REQUIRED_MARKER: &str = "required";
/// Flag names owned by the help output.
pub const RESERVED_NAMES: [&str; 2] = ["h", "help"];

/// Structured form of a flag annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDescriptor {
    /// Flag name without leading hyphens.
    pub name: String,
    /// Help text shown in usage output.
    pub usage: String,
    /// Literal default; empty means the type's zero value.
    pub default_text: String,
    /// Whether the field must be non-zero after loading.
    pub required: bool,
}

impl FlagDescriptor {
    /// Parses a raw annotation.
    ///
    /// Returns `Ok(None)` for an empty annotation. A `required` marker clears
    /// any default supplied in the third segment.
    ///
    /// # Errors
    ///
    /// - [`FlagsError::MalformedMetadata`] when the fourth segment is neither
    ///   empty nor `required`.
    /// - [`FlagsError::InvalidName`] when the name is empty, starts with `-`,
    ///   or contains `=` or whitespace.
    /// - [`FlagsError::ReservedName`] when the name is `h` or `help`.
    ///
    /// # Examples
    ///
    /// ```
    /// use struct_flags::FlagDescriptor;
    ///
    /// let descriptor = FlagDescriptor::parse("num|Testing number|123|")
    ///     .expect("valid annotation")
    ///     .expect("annotation is not empty");
    /// assert_eq!(descriptor.name, "num");
    /// assert_eq!(descriptor.default_text, "123");
    /// assert!(!descriptor.required);
    /// ```
    pub fn parse(annotation: &str) -> FlagsResult<Option<Self>> {
        if annotation.is_empty() {
            return Ok(None);
        }
        let mut segments = annotation.split(SEGMENT_DELIMITER);
        let name = segments.next().unwrap_or_default().trim();
        let usage = segments.next().unwrap_or_default().trim();
        let default_text = segments.next().unwrap_or_default().trim();
        let marker = segments.next().unwrap_or_default();

        let required = match marker {
            "" => false,
            REQUIRED_MARKER => true,
            other => {
                return Err(FlagsError::MalformedMetadata {
                    annotation: annotation.to_owned(),
                    value: other.to_owned(),
                });
            }
        };

        validate_name(annotation, name)?;

        Ok(Some(Self {
            name: name.to_owned(),
            usage: usage.to_owned(),
            default_text: if required {
                String::new()
            } else {
                default_text.to_owned()
            },
            required,
        }))
    }
}

fn validate_name(annotation: &str, name: &str) -> FlagsResult<()> {
    if name.is_empty()
        || name.starts_with('-')
        || name.contains(|c: char| c == '=' || c.is_whitespace())
    {
        return Err(FlagsError::InvalidName {
            annotation: annotation.to_owned(),
            name: name.to_owned(),
        });
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(FlagsError::ReservedName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow, ensure};
    use rstest::rstest;

    fn parsed(annotation: &str) -> Result<FlagDescriptor> {
        FlagDescriptor::parse(annotation)
            .map_err(|err| anyhow!("{annotation:?} failed: {err}"))?
            .ok_or_else(|| anyhow!("{annotation:?} produced no descriptor"))
    }

    #[rstest]
    fn empty_annotation_is_not_a_flag() -> Result<()> {
        ensure!(FlagDescriptor::parse("")?.is_none(), "expected no descriptor");
        Ok(())
    }

    #[rstest]
    #[case::name_only("boo", "boo", "", "", false)]
    #[case::full("str2|Testing string2|Str2 default|", "str2", "Testing string2", "Str2 default", false)]
    #[case::trimmed("  num | Testing number | 123 ", "num", "Testing number", "123", false)]
    #[case::required("str|Testing string||required", "str", "Testing string", "", true)]
    #[case::required_drops_default("unum|Testing number|12345|required", "unum", "Testing number", "", true)]
    #[case::extra_segments("x|u|d||ignored", "x", "u", "d", false)]
    fn parses_segments(
        #[case] annotation: &str,
        #[case] name: &str,
        #[case] usage: &str,
        #[case] default_text: &str,
        #[case] required: bool,
    ) -> Result<()> {
        let descriptor = parsed(annotation)?;
        ensure!(
            descriptor
                == FlagDescriptor {
                    name: name.to_owned(),
                    usage: usage.to_owned(),
                    default_text: default_text.to_owned(),
                    required,
                },
            "unexpected descriptor {descriptor:?}"
        );
        Ok(())
    }

    #[rstest]
    #[case::typo("str|usage||requird", "requird")]
    #[case::legacy("str|usage||mandatory", "mandatory")]
    #[case::padded("str|usage|| required", " required")]
    fn rejects_unknown_fourth_segment(#[case] annotation: &str, #[case] value: &str) {
        let err = FlagDescriptor::parse(annotation);
        assert!(
            matches!(&err, Err(FlagsError::MalformedMetadata { value: v, .. }) if v == value),
            "unexpected result {err:?}"
        );
    }

    #[rstest]
    #[case::short("h|usage")]
    #[case::long("help")]
    #[case::padded(" help |usage|")]
    fn rejects_reserved_names(#[case] annotation: &str) {
        let err = FlagDescriptor::parse(annotation);
        assert!(
            matches!(err, Err(FlagsError::ReservedName { .. })),
            "unexpected result {err:?}"
        );
    }

    #[rstest]
    #[case::empty_name("|usage|default")]
    #[case::blank_name("   |usage")]
    #[case::hyphen("-str|usage")]
    #[case::equals("str=|usage")]
    #[case::inner_space("my flag|usage")]
    fn rejects_invalid_names(#[case] annotation: &str) {
        let err = FlagDescriptor::parse(annotation);
        assert!(
            matches!(err, Err(FlagsError::InvalidName { .. })),
            "unexpected result {err:?}"
        );
    }

    #[rstest]
    fn marker_check_precedes_name_check() {
        let err = FlagDescriptor::parse("help|usage||bogus");
        assert!(matches!(err, Err(FlagsError::MalformedMetadata { .. })));
    }
}

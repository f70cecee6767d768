//! Positional-argument interpolation for localized templates.
//!
//! Templates use the `{0}`/`{1}` convention common in localization data;
//! `{{` and `}}` escape literal braces. A malformed template is a
//! data-authoring bug, so unlike the fail-soft lookup path this surfaces a
//! hard error to the caller.

use std::fmt::Display;

use thiserror::Error;

/// Errors raised while interpolating a localized template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A `{` or `}` with no matching partner.
    #[error("unbalanced brace at byte {position} in template {template:?}")]
    UnbalancedBrace {
        /// Byte offset of the offending brace.
        position: usize,
        /// The template as authored.
        template: String,
    },
    /// A placeholder that is not a plain positional index.
    #[error("invalid placeholder at byte {position} in template {template:?}")]
    InvalidPlaceholder {
        /// Byte offset of the opening brace.
        position: usize,
        /// The template as authored.
        template: String,
    },
    /// A placeholder index with no corresponding argument.
    #[error("template references argument {index} but only {supplied} were supplied")]
    MissingArgument {
        /// Zero-based index the template asked for.
        index: usize,
        /// Number of arguments the caller passed.
        supplied: usize,
    },
}

/// Substitutes positional arguments into `template`.
///
/// # Examples
/// ```
/// use game_l10n::format::format_positional;
///
/// let text = format_positional("{0} owns {1} coins", &[&"Mina", &42]).unwrap();
/// assert_eq!(text, "Mina owns 42 coins");
/// ```
///
/// # Errors
/// See [`FormatError`]; templates with fewer placeholders than arguments are
/// fine, the reverse is not.
pub fn format_positional(template: &str, args: &[&dyn Display]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let index = parse_placeholder(template, position, &mut chars)?;
                let Some(arg) = args.get(index) else {
                    return Err(FormatError::MissingArgument { index, supplied: args.len() });
                };
                out.push_str(&arg.to_string());
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(FormatError::UnbalancedBrace {
                        position,
                        template: template.to_string(),
                    });
                }
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}

/// Reads the digits of a `{N}` placeholder whose `{` sits at `open`.
fn parse_placeholder(
    template: &str,
    open: usize,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<usize, FormatError> {
    let mut digits = String::new();
    for (_, ch) in chars.by_ref() {
        match ch {
            '}' => {
                return digits.parse().map_err(|_| FormatError::InvalidPlaceholder {
                    position: open,
                    template: template.to_string(),
                });
            }
            '0'..='9' => digits.push(ch),
            _ => {
                return Err(FormatError::InvalidPlaceholder {
                    position: open,
                    template: template.to_string(),
                });
            }
        }
    }
    Err(FormatError::UnbalancedBrace { position: open, template: template.to_string() })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::no_placeholders("plain text", "plain text")]
    #[case::single("hello {0}", "hello first")]
    #[case::repeated("{0} and {0}", "first and first")]
    #[case::out_of_order("{1} then {0}", "second then first")]
    #[case::escaped_braces("{{0}} is literal, {0} is not", "{0} is literal, first is not")]
    fn test_format_positional(#[case] template: &str, #[case] expected: &str) {
        let result = format_positional(template, &[&"first", &"second"]).unwrap();
        assert_that!(result, eq(expected));
    }

    #[rstest]
    fn test_formats_non_string_arguments() {
        let result = format_positional("score: {0}", &[&1500]).unwrap();
        assert_that!(result, eq("score: 1500"));
    }

    #[rstest]
    fn test_index_beyond_supplied_arguments_is_an_error() {
        let err = format_positional("{2}", &[&"only", &"two"]).unwrap_err();
        assert_that!(err, eq(&FormatError::MissingArgument { index: 2, supplied: 2 }));
    }

    #[rstest]
    #[case::dangling_open("broken {0")]
    #[case::lone_open("broken {")]
    fn test_unterminated_placeholder_is_unbalanced(#[case] template: &str) {
        let err = format_positional(template, &[&"x"]).unwrap_err();
        assert_that!(err, pat!(FormatError::UnbalancedBrace { .. }));
    }

    #[rstest]
    fn test_lone_closing_brace_is_unbalanced() {
        let err = format_positional("broken }", &[]).unwrap_err();
        assert_that!(
            err,
            eq(&FormatError::UnbalancedBrace { position: 7, template: "broken }".to_string() })
        );
    }

    #[rstest]
    #[case::named("{name}")]
    #[case::empty("{}")]
    #[case::spaced("{ 0}")]
    fn test_non_positional_placeholder_is_invalid(#[case] template: &str) {
        let err = format_positional(template, &[&"x"]).unwrap_err();
        assert_that!(err, pat!(FormatError::InvalidPlaceholder { .. }));
    }
}

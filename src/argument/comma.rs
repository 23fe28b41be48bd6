//! Lexer for the comma syntax: `-flag value, -switch, first argument, second argument`
//!
//! Arguments are separated by commas and may contain spaces. Flags come before all arguments. A
//! literal comma is written `\,`, a literal backslash `\\`, and an argument that starts with a
//! minus but isn't a flag can be written `\-like this`.

use crate::{ArgumentError, RawFlag, RawInput};

/// Splits the input at unescaped commas.
///
/// Each character is paired with whether it was escaped, so that trimming and flag detection
/// can tell `\-` apart from `-`.
fn split_segments(input: &str) -> Vec<Vec<(char, bool)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                // `\-` is only an escape at the start of a segment
                let at_start = current.iter().all(|&(c, _): &(char, bool)| c.is_whitespace());
                match chars.peek() {
                    Some(&escaped @ (',' | '\\')) => {
                        current.push((escaped, true));
                        chars.next();
                    }
                    Some('-') if at_start => {
                        current.push(('-', true));
                        chars.next();
                    }
                    _ => current.push(('\\', false)),
                }
            }
            ',' => segments.push(std::mem::take(&mut current)),
            c => current.push((c, false)),
        }
    }
    segments.push(current);

    segments
}

/// Trims unescaped whitespace from both ends of a segment
fn trim(segment: &[(char, bool)]) -> &[(char, bool)] {
    let is_space = |&(c, escaped): &(char, bool)| !escaped && c.is_whitespace();
    let start = segment
        .iter()
        .position(|x| !is_space(x))
        .unwrap_or(segment.len());
    let end = segment
        .iter()
        .rposition(|x| !is_space(x))
        .map_or(start, |i| i + 1);
    &segment[start..end]
}

/// If the segment is a flag, returns its name and value
fn as_flag(segment: &[(char, bool)]) -> Option<RawFlag> {
    match segment {
        [('-', false), (first, _), ..] if first.is_alphabetic() => {}
        _ => return None,
    }

    let body = &segment[1..];
    let name_end = body
        .iter()
        .position(|&(c, escaped)| !escaped && c.is_whitespace())
        .unwrap_or(body.len());
    let name = body[..name_end].iter().map(|&(c, _)| c).collect();
    let value = trim(&body[name_end..])
        .iter()
        .map(|&(c, _)| c)
        .collect::<String>();

    Some(RawFlag {
        name,
        value: if value.is_empty() { None } else { Some(value) },
    })
}

/// Splits raw comma syntax input into flags and positional arguments
pub fn lex(input: &str) -> Result<RawInput, ArgumentError> {
    let mut raw = RawInput::default();
    if input.trim().is_empty() {
        return Ok(raw);
    }

    let mut in_flag_section = true;
    for (i, segment) in split_segments(input).iter().enumerate() {
        let segment = trim(segment);
        if segment.is_empty() {
            return Err(ArgumentError::EmptyArgument { position: i + 1 });
        }

        if in_flag_section {
            if let Some(flag) = as_flag(segment) {
                raw.flags.push(flag);
                continue;
            }
            in_flag_section = false;
        }
        raw.args.push(segment.iter().map(|&(c, _)| c).collect());
    }

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(name: &str, value: Option<&str>) -> RawFlag {
        RawFlag {
            name: name.into(),
            value: value.map(Into::into),
        }
    }

    #[test]
    fn test_arguments() {
        for &(input, args) in &[
            ("", &[][..]),
            ("   ", &[]),
            ("single", &["single"]),
            ("a, b ,c", &["a", "b", "c"]),
            ("  spaces inside  ,kept", &["spaces inside", "kept"]),
            (r"hello\, world, x", &["hello, world", "x"]),
            (r"a\\, b", &[r"a\", "b"]),
            (r"C:\path\to", &[r"C:\path\to"]),
            (r"\-verbose", &["-verbose"]),
            (r"  \-verbose", &["-verbose"]),
            (r"a\-b", &[r"a\-b"]),
            ("-5, x", &["-5", "x"]),
            ("- x", &["- x"]),
        ] {
            let raw = lex(input).unwrap();
            assert!(raw.flags.is_empty(), "{:?}", input);
            assert_eq!(raw.args, args, "{:?}", input);
        }
    }

    #[test]
    fn test_flags() {
        let raw = lex("-count 3, -verbose, text, more text").unwrap();
        assert_eq!(raw.flags, [flag("count", Some("3")), flag("verbose", None)]);
        assert_eq!(raw.args, ["text", "more text"]);

        let raw = lex(r"-msg  hello\, there ").unwrap();
        assert_eq!(raw.flags, [flag("msg", Some("hello, there"))]);
        assert!(raw.args.is_empty());

        // The first argument ends the flag section
        let raw = lex("a, -flag x").unwrap();
        assert!(raw.flags.is_empty());
        assert_eq!(raw.args, ["a", "-flag x"]);
    }

    #[test]
    fn test_empty_argument() {
        for &(input, position) in &[("a,,b", 2), ("a,", 2), (",a", 1), ("a, ,b", 2)] {
            match lex(input) {
                Err(ArgumentError::EmptyArgument { position: p }) => assert_eq!(p, position),
                other => panic!("{:?} lexed to {:?}", input, other),
            }
        }
    }
}

//! Lexer for the shellword syntax: `-flag value "first argument" second -switch`
//!
//! Words are separated by whitespace and grouped with quotes, like in a POSIX shell:
//! - `"double quotes"` group and support the escapes `\"` and `\\`
//! - `'single quotes'` group literally
//! - outside of quotes, a backslash escapes any character
//!
//! A word that starts with an unquoted minus followed by a letter is a flag. Flags can appear
//! anywhere before a standalone `--`, after which every word is an argument.

use crate::{ArgConfig, ArgumentError, RawFlag, RawInput};

/// A single whitespace-separated word after quote and escape removal
#[derive(Debug, PartialEq)]
struct Word {
    /// The unquoted, unescaped text
    text: String,
    /// Whether the first character was neither quoted nor escaped
    first_char_plain: bool,
}

impl Word {
    /// Whether this word should be treated as a `-flag`
    fn is_flag(&self) -> bool {
        let mut chars = self.text.chars();
        self.first_char_plain
            && chars.next() == Some('-')
            && chars.next().map_or(false, char::is_alphabetic)
    }

    /// Whether this word is the `--` end-of-flags marker
    fn is_flag_terminator(&self) -> bool {
        self.first_char_plain && self.text == "--"
    }
}

/// Appends a character to the word, starting a new word if needed
fn push(current: &mut Option<Word>, c: char, plain: bool) {
    let word = current.get_or_insert_with(|| Word {
        text: String::new(),
        first_char_plain: plain,
    });
    // An empty quoted string like `""-x` must not make the `-` count as first character
    if word.text.is_empty() && !plain {
        word.first_char_plain = false;
    }
    word.text.push(c);
}

/// Splits the input into words, resolving quotes and escapes
fn split_words(input: &str) -> Result<Vec<Word>, ArgumentError> {
    let mut words = Vec::new();
    let mut current: Option<Word> = None;

    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if let Some(word) = current.take() {
                    words.push(word);
                }
            }
            '"' => {
                // Opening a quote starts a word, even if it stays empty
                current.get_or_insert_with(|| Word {
                    text: String::new(),
                    first_char_plain: false,
                });
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.clone().next() {
                            Some(escaped @ ('"' | '\\')) => {
                                push(&mut current, escaped, false);
                                chars.next();
                            }
                            _ => push(&mut current, '\\', false),
                        },
                        Some(c) => push(&mut current, c, false),
                        None => return Err(ArgumentError::UnclosedQuote { quote: '"' }),
                    }
                }
            }
            '\'' => {
                current.get_or_insert_with(|| Word {
                    text: String::new(),
                    first_char_plain: false,
                });
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => push(&mut current, c, false),
                        None => return Err(ArgumentError::UnclosedQuote { quote: '\'' }),
                    }
                }
            }
            // A trailing backslash escapes nothing and stays literal
            '\\' => push(&mut current, chars.next().unwrap_or('\\'), false),
            c => push(&mut current, c, true),
        }
    }
    words.extend(current);

    Ok(words)
}

/// Splits raw shellword syntax input into flags and positional arguments.
///
/// The config is needed to know which flags are switches and therefore don't consume the
/// following word as their value.
pub fn lex(input: &str, config: &ArgConfig) -> Result<RawInput, ArgumentError> {
    let mut raw = RawInput::default();
    let mut flags_allowed = true;

    let mut words = split_words(input)?.into_iter();
    while let Some(word) = words.next() {
        if flags_allowed && word.is_flag_terminator() {
            flags_allowed = false;
            continue;
        }
        if !flags_allowed || !word.is_flag() {
            raw.args.push(word.text);
            continue;
        }

        let name = word.text[1..].to_owned();
        let flag = match config.find_flag(&name) {
            Some(flag) => flag,
            None => return Err(ArgumentError::UnknownFlag { name }),
        };
        let value = if flag.kind.is_switch() {
            None
        } else {
            match words.next() {
                Some(value) => Some(value.text),
                None => {
                    return Err(ArgumentError::MissingFlagValue {
                        name: flag.name.clone(),
                    })
                }
            }
        };
        raw.flags.push(RawFlag { name, value });
    }

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{types, Flag};

    fn config() -> ArgConfig {
        ArgConfig::default()
            .flag(Flag::new("verbose", types::Switch).alias("v"))
            .flag(Flag::new("count", types::Integer::default()))
    }

    #[test]
    fn test_split_words() {
        for &(input, words) in &[
            ("", &[][..]),
            ("a b  c", &["a", "b", "c"]),
            ("  padded\t", &["padded"]),
            (r#""hello world" x"#, &["hello world", "x"]),
            (r#"'a b'"c d""#, &["a bc d"]),
            (r#"a"b c"d"#, &["ab cd"]),
            (r#""""#, &[""]),
            (r#"say \"hi\""#, &["say", r#""hi""#]),
            (r#""a \" b \\ c \d""#, &[r#"a " b \ c \d"#]),
            (r#"'\n'"#, &[r"\n"]),
            (r"escaped\ space", &["escaped space"]),
            (r"trailing\", &[r"trailing\"]),
        ] {
            let split = split_words(input).unwrap();
            let texts = split.iter().map(|w| w.text.as_str()).collect::<Vec<_>>();
            assert_eq!(texts, words, "{:?}", input);
        }
    }

    #[test]
    fn test_unclosed_quote() {
        for &(input, quote) in &[(r#""unclosed"#, '"'), ("it's", '\''), (r#""\""#, '"')] {
            match split_words(input) {
                Err(ArgumentError::UnclosedQuote { quote: q }) => assert_eq!(q, quote),
                other => panic!("{:?} split to {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_flags() {
        let raw = lex("-v file -count 3 other", &config()).unwrap();
        assert_eq!(
            raw.flags,
            [
                RawFlag {
                    name: "v".into(),
                    value: None
                },
                RawFlag {
                    name: "count".into(),
                    value: Some("3".into())
                },
            ]
        );
        assert_eq!(raw.args, ["file", "other"]);

        // Values are taken verbatim, even if they look like flags
        let raw = lex("-count -5", &config()).unwrap();
        assert_eq!(raw.flags[0].value.as_deref(), Some("-5"));
    }

    #[test]
    fn test_flag_like_arguments() {
        for input in &[r#""-v""#, r"\-v", "-- -v", "'-v'"] {
            let raw = lex(input, &config()).unwrap();
            assert!(raw.flags.is_empty(), "{:?}", input);
            assert_eq!(raw.args, ["-v"], "{:?}", input);
        }

        let raw = lex("-5 -- --", &config()).unwrap();
        assert_eq!(raw.args, ["-5", "--"]);
    }

    #[test]
    fn test_flag_errors() {
        match lex("-count", &config()) {
            Err(ArgumentError::MissingFlagValue { name }) => assert_eq!(name, "count"),
            other => panic!("{:?}", other),
        }
        match lex("a -nope", &config()) {
            Err(ArgumentError::UnknownFlag { name }) => assert_eq!(name, "nope"),
            other => panic!("{:?}", other),
        }
    }
}

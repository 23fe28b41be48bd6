//! Parsing code for [`CodeBlock`], as produced by the [`Code`] argument type

use crate::{ArgContext, ArgType, TypeError, Value};

/// Error thrown when the input is not a single well-formed code block
#[derive(Default, Debug, Clone)]
pub struct CodeBlockError {
    #[doc(hidden)]
    pub __non_exhaustive: (),
}
impl std::fmt::Display for CodeBlockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("couldn't find a valid code block")
    }
}
impl std::error::Error for CodeBlockError {}

/// A Discord code block
///
/// ```text
/// `code here`
/// ```
///
/// or
///
/// ```text
/// ``​`language
/// code here
/// ``​`
/// ```
#[derive(Default, Debug, PartialEq, Eq, Clone, Hash)]
pub struct CodeBlock {
    /// The text inside the code block
    pub code: String,
    /// In multiline code blocks, the language code, if present
    pub language: Option<String>,
}

impl std::fmt::Display for CodeBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "```{}\n{}\n```",
            self.language.as_deref().unwrap_or(""),
            &self.code
        )
    }
}

impl CodeBlock {
    /// Parses input that consists of exactly one code block, apart from surrounding whitespace.
    ///
    /// The output of [`Self::code`] mirrors what the official Discord client renders, and
    /// [`Self::language`] mirrors the client's syntax highlighting, if existent.
    pub fn parse(input: &str) -> Result<Self, CodeBlockError> {
        let (rest, code_block) = pop_from(input)?;
        if rest.trim().is_empty() {
            Ok(code_block)
        } else {
            Err(CodeBlockError::default())
        }
    }
}

/// Reads a [`CodeBlock`] from the front of the string and returns the remaining string.
fn pop_from(args: &str) -> Result<(&str, CodeBlock), CodeBlockError> {
    let args = args.trim_start();

    let rest;
    let mut code_block = if let Some(code_block) = args.strip_prefix("```") {
        let code_block_end = code_block.find("```").ok_or_else(CodeBlockError::default)?;
        rest = &code_block[(code_block_end + 3)..];
        let mut code_block = &code_block[..code_block_end];

        // A string directly after the opening backticks and directly before a newline is the
        // language
        let mut language = None;
        if let Some(first_newline) = code_block.find('\n') {
            // Language idents may only consist of [A-Za-z0-9+-._]
            let is_valid = code_block[..first_newline]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "+-._".contains(c));
            if is_valid {
                language = Some(&code_block[..first_newline]);
                code_block = &code_block[(first_newline + 1)..];
            }
        }

        // Discord strips empty lines from start and end, but only if they're really empty (even
        // whitespace on the line cancels the stripping)
        let code_block = code_block.trim_start_matches('\n').trim_end_matches('\n');

        CodeBlock {
            code: code_block.to_owned(),
            language: language.map(|x| x.to_owned()),
        }
    } else if let Some(code_line) = args.strip_prefix('`') {
        let code_line_end = code_line.find('`').ok_or_else(CodeBlockError::default)?;
        rest = &code_line[(code_line_end + 1)..];

        CodeBlock {
            code: code_line[..code_line_end].to_owned(),
            language: None,
        }
    } else {
        return Err(CodeBlockError::default());
    };

    // Empty code blocks like `` are not rendered as code blocks by Discord
    if code_block.code.is_empty() {
        Err(CodeBlockError::default())
    } else {
        // Discord sometimes inserts hair spaces at the end of code blocks
        code_block.code = code_block.code.trim_end_matches('\u{200a}').to_owned();

        Ok((rest, code_block))
    }
}

/// A single-line or multi-line code block, produces [`Value::Code`].
///
/// Code blocks usually contain spaces and commas. Users have to quote them in the shellword syntax
/// and escape commas in the comma syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct Code;

#[async_trait::async_trait]
impl ArgType for Code {
    fn name(&self) -> &str {
        "Code block"
    }

    async fn parse(&self, ctx: &ArgContext<'_>) -> Result<Value, TypeError> {
        Ok(Value::Code(CodeBlock::parse(ctx.raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_code_block() {
        for &(string, code, language) in &[
            ("`hello world`", "hello world", None),
            ("` `", " ", None),
            ("``` hi ```", " hi ", None),
            ("```rust```", "rust", None),
            ("```rust\nhi```", "hi", Some("rust")),
            ("```rust  hi```", "rust  hi", None),
            ("```rust\n\n\n\n\nhi\n\n\n\n```", "hi", Some("rust")),
            ("```+__....-.+.++\nhi\n```", "hi", Some("+__....-.+.++")),
            ("```+__.:...-.+.++\nhi\n```", "+__.:...-.+.++\nhi", None),
            (
                "```#![feature(never_type)]\nfn uwu(_: &!) {}\n```",
                "#![feature(never_type)]\nfn uwu(_: &!) {}",
                None,
            ),
        ] {
            assert_eq!(
                pop_from(string).unwrap().1,
                CodeBlock {
                    code: code.into(),
                    language: language.map(|x| x.into()),
                }
            );
        }

        assert!(pop_from("").is_err());
        assert!(pop_from("''").is_err());
        assert!(pop_from("``").is_err());
        assert!(pop_from("``````").is_err());
    }

    #[test]
    fn test_whole_input() {
        assert!(CodeBlock::parse("  `x`  ").is_ok());
        assert!(CodeBlock::parse("`x` trailing").is_err());
        assert_eq!(
            CodeBlock {
                code: "fn main() {}".into(),
                language: Some("rs".into()),
            }
            .to_string(),
            "```rs\nfn main() {}\n```"
        );
    }

    #[tokio::test]
    async fn test_code_type() {
        let value = Code
            .parse(&ArgContext::detached("```py\nprint(1)\n```", "code", false))
            .await
            .unwrap();
        assert_eq!(
            value,
            Value::Code(CodeBlock {
                code: "print(1)".into(),
                language: Some("py".into()),
            })
        );
    }
}

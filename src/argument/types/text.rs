use crate::{ArgContext, ArgType, TypeError, Value};

/// Error thrown when a text argument doesn't match the configured pattern
#[derive(Debug, Clone)]
pub struct PatternMismatch {
    /// The pattern the input was matched against
    pub pattern: String,
}
impl std::fmt::Display for PatternMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "doesn't match the expected format `{}`", self.pattern)
    }
}
impl std::error::Error for PatternMismatch {}

/// A regex that only accepts inputs it matches as a whole
#[derive(Debug, Clone)]
pub struct TextPattern {
    /// The pattern as written by the user
    source: String,
    /// `source` wrapped in anchors
    regex: regex::Regex,
}

impl TextPattern {
    /// Compiles the pattern, anchored at both ends of the input
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: pattern.to_owned(),
            regex: regex::Regex::new(&format!("^(?:{})$", pattern))?,
        })
    }

    /// The pattern as it was passed to [`Self::new`]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern matches the entire input
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

/// Free text, optionally restricted in length or format
#[derive(Debug, Clone, Default)]
pub struct Text {
    /// Minimum length in characters
    pub min_length: Option<usize>,
    /// Maximum length in characters
    pub max_length: Option<usize>,
    /// Pattern that must match the whole input
    pub pattern: Option<TextPattern>,
}

impl Text {
    /// Text whose length in characters lies within the given inclusive bounds
    pub fn length(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length: Some(min_length),
            max_length: Some(max_length),
            pattern: None,
        }
    }

    /// Restricts the text to inputs that match the pattern as a whole
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(TextPattern::new(pattern)?);
        Ok(self)
    }
}

#[async_trait::async_trait]
impl ArgType for Text {
    fn name(&self) -> &str {
        "Text"
    }

    async fn parse(&self, ctx: &ArgContext<'_>) -> Result<Value, TypeError> {
        let length = ctx.raw.chars().count();
        super::check_range(length, self.min_length, self.max_length).map_err(|e| {
            super::OutOfRange {
                min: e.min.map(|x| format!("{} characters", x)),
                max: e.max.map(|x| format!("{} characters", x)),
            }
        })?;

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(ctx.raw) {
                return Err(PatternMismatch {
                    pattern: pattern.as_str().to_owned(),
                }
                .into());
            }
        }

        Ok(Value::Text(ctx.raw.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn parse(text: &Text, raw: &str) -> Result<Value, TypeError> {
        text.parse(&ArgContext::detached(raw, "text", false)).await
    }

    #[tokio::test]
    async fn test_text() {
        let text = Text::default();
        assert_eq!(parse(&text, "").await.unwrap(), Value::from(""));
        assert_eq!(
            parse(&text, "any thing").await.unwrap(),
            Value::from("any thing")
        );
    }

    #[tokio::test]
    async fn test_length() {
        let text = Text::length(2, 3);
        // Counted in characters, not bytes
        assert!(parse(&text, "äöü").await.is_ok());
        assert_eq!(
            parse(&text, "a").await.unwrap_err().to_string(),
            "must be between 2 characters and 3 characters"
        );
        assert!(parse(&text, "abcd").await.is_err());
    }

    #[tokio::test]
    async fn test_pattern() {
        let text = Text::default().with_pattern("[a-z]+|[0-9]+").unwrap();
        assert!(parse(&text, "abc").await.is_ok());
        assert!(parse(&text, "123").await.is_ok());
        assert!(parse(&text, "abc123").await.is_err());
        assert!(parse(&text, " abc").await.is_err());

        let text = Text {
            pattern: Some(TextPattern::new("[0-9]+").unwrap()),
            ..Default::default()
        };
        assert!(parse(&text, "123").await.is_ok());
        assert_eq!(
            parse(&text, "abc123xyz").await.unwrap_err().to_string(),
            "doesn't match the expected format `[0-9]+`"
        );
    }
}

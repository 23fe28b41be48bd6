use crate::{ArgContext, ArgType, TypeError, Value};
use once_cell::sync::Lazy;

/// Error thrown when the input is not an http(s) link
#[derive(Default, Debug, Clone)]
pub struct InvalidLink {
    #[doc(hidden)]
    pub __non_exhaustive: (),
}
impl std::fmt::Display for InvalidLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Expected a link starting with `http://` or `https://`")
    }
}
impl std::error::Error for InvalidLink {}

static LINK: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"(?i)^https?://[^\s/?#<>]+(?:[/?#][^\s<>]*)?$")
        .expect("hardcoded regex is valid")
});

/// An http or https link, produces [`Value::Text`].
///
/// Discord users suppress embeds by wrapping links in `<...>`; the brackets are stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Link;

#[async_trait::async_trait]
impl ArgType for Link {
    fn name(&self) -> &str {
        "Link"
    }

    async fn parse(&self, ctx: &ArgContext<'_>) -> Result<Value, TypeError> {
        let raw = ctx.raw.trim();
        let link = raw
            .strip_prefix('<')
            .and_then(|x| x.strip_suffix('>'))
            .unwrap_or(raw);
        if LINK.is_match(link) {
            Ok(Value::Text(link.to_owned()))
        } else {
            Err(InvalidLink::default().into())
        }
    }
}

#[cfg(test)]
#[tokio::test]
async fn test_link() {
    async fn parse(raw: &str) -> Result<Value, TypeError> {
        Link.parse(&ArgContext::detached(raw, "link", false)).await
    }

    for &(input, expected) in &[
        ("https://example.com", "https://example.com"),
        ("http://example.com/a?b=c#d", "http://example.com/a?b=c#d"),
        ("<https://example.com/x>", "https://example.com/x"),
        ("HTTPS://localhost:8080", "HTTPS://localhost:8080"),
    ] {
        assert_eq!(parse(input).await.unwrap(), Value::from(expected), "{:?}", input);
    }

    for input in &["example.com", "ftp://example.com", "https://", "https://a b", "<https://x"] {
        assert!(parse(input).await.is_err(), "{:?}", input);
    }
}

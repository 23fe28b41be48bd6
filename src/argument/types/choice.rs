use crate::{ArgContext, ArgType, TypeError, Value};

/// Error thrown when the user enters a string that is not one of the choices
#[derive(Debug, Clone)]
pub struct InvalidChoice {
    /// Canonical names of all choices
    pub choices: Vec<String>,
}
impl std::fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("You entered a non-existent choice, pick one of ")?;
        for (i, choice) in self.choices.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "`{}`", choice)?;
        }
        Ok(())
    }
}
impl std::error::Error for InvalidChoice {}

/// One of a fixed set of strings. Produces the canonical name as [`Value::Text`], even if an alias
/// was entered.
///
/// ```rust
/// let color = argot::types::Choice::new(["red", "green"]).alias("green", "lime");
/// assert_eq!(argot::ArgType::name(&color), "red|green");
/// ```
#[derive(Debug, Clone)]
pub struct Choice {
    /// Canonical name and aliases of every choice
    choices: Vec<(String, Vec<String>)>,
    /// Whether `Red` is rejected if the choice is `red`
    case_sensitive: bool,
    /// Shown in usage texts
    display_name: String,
}

impl Choice {
    /// Creates a case insensitive choice between the given names
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let choices = names
            .into_iter()
            .map(|name| (name.into(), Vec::new()))
            .collect::<Vec<_>>();
        let display_name = choices
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join("|");
        Self {
            choices,
            case_sensitive: false,
            display_name,
        }
    }

    /// Adds an alias to the choice with the given canonical name. No-op if there's no such choice
    pub fn alias(mut self, name: &str, alias: impl Into<String>) -> Self {
        if let Some((_, aliases)) = self.choices.iter_mut().find(|(n, _)| n == name) {
            aliases.push(alias.into());
        }
        self
    }

    /// Makes matching case sensitive
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Resolves the input to a canonical name
    fn find(&self, input: &str) -> Option<&str> {
        let equal = |a: &str| {
            if self.case_sensitive {
                a == input
            } else {
                a.eq_ignore_ascii_case(input)
            }
        };
        self.choices
            .iter()
            .find(|(name, aliases)| {
                equal(name.as_str()) || aliases.iter().any(|alias| equal(alias.as_str()))
            })
            .map(|(name, _)| name.as_str())
    }
}

#[async_trait::async_trait]
impl ArgType for Choice {
    fn name(&self) -> &str {
        &self.display_name
    }

    async fn parse(&self, ctx: &ArgContext<'_>) -> Result<Value, TypeError> {
        match self.find(ctx.raw) {
            Some(name) => Ok(Value::Text(name.to_owned())),
            None => Err(InvalidChoice {
                choices: self.choices.iter().map(|(name, _)| name.clone()).collect(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
#[test]
fn test_choice() {
    let choice = Choice::new(["red", "green"]).alias("green", "lime");
    assert_eq!(choice.find("red"), Some("red"));
    assert_eq!(choice.find("RED"), Some("red"));
    assert_eq!(choice.find("Lime"), Some("green"));
    assert_eq!(choice.find("blue"), None);

    let choice = choice.case_sensitive();
    assert_eq!(choice.find("RED"), None);
    assert_eq!(choice.find("lime"), Some("green"));

    let error = InvalidChoice {
        choices: vec!["a".into(), "b".into()],
    };
    assert_eq!(
        error.to_string(),
        "You entered a non-existent choice, pick one of `a`, `b`"
    );
}

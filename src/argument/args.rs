//! [`Args`], the typed result of parsing a command invocation

use std::collections::HashMap;

/// Typed positional arguments and flags of one command invocation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    /// Positional arguments in declaration order: name and value, if given or defaulted
    pub(crate) positional: Vec<(String, Option<crate::Value>)>,
    /// Flag values keyed by canonical flag name
    pub(crate) flags: HashMap<String, crate::Value>,
}

impl Args {
    /// Number of declared positional arguments, including absent ones
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// Whether no positional arguments are declared
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    /// Raw value of the positional argument at the given index
    pub fn value(&self, index: usize) -> Option<&crate::Value> {
        self.positional.get(index)?.1.as_ref()
    }

    /// Raw value of the positional argument with the given name
    pub fn value_by_name(&self, name: &str) -> Option<&crate::Value> {
        self.positional
            .iter()
            .find(|(arg_name, _)| arg_name == name)?
            .1
            .as_ref()
    }

    /// Raw value of the flag with the given canonical name
    pub fn flag_value(&self, name: &str) -> Option<&crate::Value> {
        self.flags.get(name)
    }

    /// Typed value of the positional argument at the given index
    ///
    /// Returns `None` if the argument is absent or of another type
    pub fn get<T: crate::FromValue>(&self, index: usize) -> Option<T> {
        self.value(index)?.get()
    }

    /// Typed value of the positional argument with the given name
    pub fn get_by_name<T: crate::FromValue>(&self, name: &str) -> Option<T> {
        self.value_by_name(name)?.get()
    }

    /// Typed value of the flag with the given canonical name
    pub fn flag<T: crate::FromValue>(&self, name: &str) -> Option<T> {
        self.flag_value(name)?.get()
    }

    /// Iterates over the positional arguments with their names
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&crate::Value>)> {
        self.positional
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_ref()))
    }

    /// Iterates over all flags that have a value
    pub fn flags(&self) -> impl Iterator<Item = (&str, &crate::Value)> {
        self.flags.iter().map(|(name, value)| (name.as_str(), value))
    }
}

//! The dynamically typed [`Value`] produced by argument types, and typed extraction via
//! [`FromValue`]

use std::any::Any;
use std::sync::Arc;

/// A parsed argument or flag value.
///
/// Built-in argument types produce the variant matching their output; custom [`crate::ArgType`]
/// implementations can store anything in [`Value::Custom`].
#[derive(Clone)]
pub enum Value {
    /// Produced by [`crate::types::Text`], [`crate::types::Choice`] and [`crate::types::Link`]
    Text(String),
    /// Produced by [`crate::types::Integer`]
    Integer(i64),
    /// Produced by [`crate::types::Decimal`]
    Decimal(f64),
    /// Produced by [`crate::types::Boolean`] and [`crate::types::Switch`]
    Boolean(bool),
    /// Produced by [`crate::types::Duration`]
    Duration(std::time::Duration),
    /// Produced by [`crate::types::Code`]
    Code(crate::CodeBlock),
    /// Values of a variadic argument or a multi flag
    List(Vec<Value>),
    /// Output of a user-defined argument type
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wraps an arbitrary value into [`Value::Custom`]
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Self::Custom(Arc::new(value))
    }

    /// Downcasts a [`Value::Custom`] to a concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(x) => x.downcast_ref(),
            _ => None,
        }
    }

    /// Extracts a typed value, see [`FromValue`]
    pub fn get<T: FromValue>(&self) -> Option<T> {
        T::from_value(self)
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(x) => f.debug_tuple("Text").field(x).finish(),
            Self::Integer(x) => f.debug_tuple("Integer").field(x).finish(),
            Self::Decimal(x) => f.debug_tuple("Decimal").field(x).finish(),
            Self::Boolean(x) => f.debug_tuple("Boolean").field(x).finish(),
            Self::Duration(x) => f.debug_tuple("Duration").field(x).finish(),
            Self::Code(x) => f.debug_tuple("Code").field(x).finish(),
            Self::List(x) => f.debug_tuple("List").field(x).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Duration(a), Self::Duration(b)) => a == b,
            (Self::Code(a), Self::Code(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Custom(a), Self::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Conversion from a borrowed [`Value`] into a concrete Rust type.
///
/// Returns `None` if the value holds a different variant.
pub trait FromValue: Sized {
    /// Attempts the conversion
    fn from_value(value: &Value) -> Option<Self>;
}

/// Generates [`FromValue`] impls for variants that map one-to-one onto a Rust type
macro_rules! impl_from_value {
    ($($t:ty => $variant:ident),* $(,)?) => { $(
        impl FromValue for $t {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(x) => Some(x.clone()),
                    _ => None,
                }
            }
        }

        impl From<$t> for Value {
            fn from(x: $t) -> Self {
                Value::$variant(x)
            }
        }
    )* };
}

impl_from_value! {
    String => Text,
    i64 => Integer,
    f64 => Decimal,
    bool => Boolean,
    std::time::Duration => Duration,
    crate::CodeBlock => Code,
}

impl From<&str> for Value {
    fn from(x: &str) -> Self {
        Value::Text(x.to_owned())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(values) => values.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(x: Vec<T>) -> Self {
        Value::List(x.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value() {
        assert_eq!(Value::from("abc").get::<String>(), Some("abc".into()));
        assert_eq!(Value::Integer(-4).get::<i64>(), Some(-4));
        assert_eq!(Value::Integer(4).get::<String>(), None);
        assert_eq!(
            Value::from(vec![1_i64, 2, 3]).get::<Vec<i64>>(),
            Some(vec![1, 2, 3])
        );
        // Mixed lists don't convert
        let mixed = Value::List(vec![Value::Integer(1), Value::Boolean(true)]);
        assert_eq!(mixed.get::<Vec<i64>>(), None);
    }

    #[test]
    fn test_custom() {
        #[derive(Debug, PartialEq)]
        struct Color(u8, u8, u8);

        let value = Value::custom(Color(1, 2, 3));
        assert_eq!(value.downcast_ref::<Color>(), Some(&Color(1, 2, 3)));
        assert_eq!(value.downcast_ref::<String>(), None);
        assert_eq!(value, value.clone());
        assert_ne!(value, Value::custom(Color(1, 2, 3)));
    }
}

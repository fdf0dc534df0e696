//! Named argument lists.
//!
//! The same ordered `(name, value)` list is used for call arguments and for
//! default tables. Order matters only for defaults, where it fixes the
//! parameter order; call arguments are always bound by name.

use crate::value::Value;
use std::any::Any;

/// A single named, type-erased value.
#[derive(Debug, Clone)]
pub struct Argument {
    /// The parameter name this value is meant for.
    pub name: String,
    /// The value itself.
    pub value: Value,
}

impl Argument {
    /// Create an argument from any erasable value.
    pub fn new<T: Any + Clone + Send + Sync>(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value: Value::new(value),
        }
    }

    /// Create an argument from an already erased value.
    pub fn from_value(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// An ordered list of [`Argument`]s.
///
/// # Example
///
/// ```rust
/// use commandeer_core::{Arguments, args};
///
/// let built = Arguments::new().with("arg1", 4).with("arg2", 5);
/// let literal = args! { "arg1" => 4, "arg2" => 5 };
///
/// assert_eq!(built.names().collect::<Vec<_>>(), ["arg1", "arg2"]);
/// assert_eq!(literal.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    items: Vec<Argument>,
}

impl Arguments {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named value.
    pub fn with<T: Any + Clone + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.items.push(Argument::new(name, value));
        self
    }

    /// Append a named, already erased value.
    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.items.push(Argument::from_value(name, value));
        self
    }

    /// Append an argument in place.
    pub fn push(&mut self, argument: Argument) {
        self.items.push(argument);
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entry names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|arg| arg.name.as_str())
    }

    /// The first value registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.items
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }

    /// Remove and return the first value registered under `name`.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let index = self.items.iter().position(|arg| arg.name == name)?;
        Some(self.items.remove(index).value)
    }

    /// The first name that occurs more than once, if any.
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::with_capacity(self.items.len());
        self.names().find(|name| !seen.insert(*name))
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, Argument> {
        self.items.iter()
    }
}

impl FromIterator<Argument> for Arguments {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Argument> for Arguments {
    fn extend<I: IntoIterator<Item = Argument>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Arguments {
    type Item = Argument;
    type IntoIter = std::vec::IntoIter<Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a Argument;
    type IntoIter = std::slice::Iter<'a, Argument>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Vec<Argument>> for Arguments {
    fn from(items: Vec<Argument>) -> Self {
        Self { items }
    }
}

/// Build an [`Arguments`] list from `name => value` pairs.
///
/// ```rust
/// use commandeer_core::args;
///
/// let empty = args! {};
/// let pair = args! { "a" => String::from("Hello"), "b" => String::from("World") };
/// assert!(empty.is_empty());
/// assert_eq!(pair.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => { $crate::Arguments::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::Arguments::new()$(.with($name, $value))+
    };
}

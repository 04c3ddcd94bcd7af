use crate::error::{Error, Result};
use std::collections::HashSet;

/// A selectable entry: what the user sees and what the caller gets back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Ordered options with unique values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    options: Vec<SelectOption>,
}

impl OptionList {
    /// Fails on the first repeated value.
    pub fn new(options: Vec<SelectOption>) -> Result<Self> {
        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.value.as_str()) {
                return Err(Error::DuplicateOption(option.value.clone()));
            }
        }
        Ok(Self { options })
    }

    /// `(label, value)` pairs.
    pub fn from_pairs<L, V>(pairs: impl IntoIterator<Item = (L, V)>) -> Result<Self>
    where
        L: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(label, value)| SelectOption::new(label, value))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
        self.options.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SelectOption> {
        self.options.get(index)
    }

    pub fn position(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|o| o.value == value)
    }

    pub fn find(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn labels(&self) -> Vec<String> {
        self.options.iter().map(|o| o.label.clone()).collect()
    }

    /// The label for `value`, or `placeholder` when nothing matches.
    pub fn display<'a>(&'a self, value: Option<&str>, placeholder: &'a str) -> &'a str {
        value
            .and_then(|v| self.find(v))
            .map_or(placeholder, |o| o.label.as_str())
    }
}

impl<'a> IntoIterator for &'a OptionList {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> OptionList {
        OptionList::from_pairs([("Apple", "apple"), ("Pear", "pear")]).unwrap()
    }

    #[test]
    fn display_uses_label() {
        let list = fruit();
        assert_eq!(list.display(Some("pear"), "Pick one"), "Pear");
        assert_eq!(list.position("pear"), Some(1));
    }

    #[test]
    fn unknown_or_missing_value_shows_placeholder() {
        let list = fruit();
        assert_eq!(list.display(Some("banana"), "Pick one"), "Pick one");
        assert_eq!(list.display(None, "Pick one"), "Pick one");
    }

    #[test]
    fn duplicate_values_rejected() {
        let err = OptionList::from_pairs([("A", "x"), ("B", "x")]).unwrap_err();
        assert_eq!(err, Error::DuplicateOption("x".into()));
    }
}

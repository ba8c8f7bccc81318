//! Product option groups and a customer's selection of option values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::ProductOption;

/// The option values a customer picked for one cart line, e.g. `Size = M`.
///
/// Backed by an ordered map, so two selections are equal exactly when they
/// hold the same name/value pairs regardless of the order they were chosen in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedOptions(BTreeMap<String, String>);

impl SelectedOptions {
    /// An empty selection (product without option groups).
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Select `value` for option `name`, replacing any earlier choice.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// The value selected for option `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate name/value pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Human readable summary, e.g. `Color: Red, Size: M`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check this selection against a product's option groups.
    ///
    /// Every group must have a value, every value must be one the group
    /// allows, and no option outside the product's groups may be present.
    ///
    /// # Errors
    ///
    /// Returns the first [`OptionSelectionError`] found.
    pub fn validate_against(&self, options: &[ProductOption]) -> Result<(), OptionSelectionError> {
        for option in options {
            let Some(value) = self.get(&option.name) else {
                return Err(OptionSelectionError::Missing(option.name.clone()));
            };
            if !option.values.iter().any(|v| v == value) {
                return Err(OptionSelectionError::InvalidValue {
                    option: option.name.clone(),
                    value: value.to_owned(),
                });
            }
        }

        if let Some((name, _)) = self
            .iter()
            .find(|(name, _)| !options.iter().any(|o| o.name == *name))
        {
            return Err(OptionSelectionError::Unknown(name.to_owned()));
        }

        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SelectedOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Why a customer's option selection does not fit a product.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionSelectionError {
    #[error("Please select {0}")]
    Missing(String),
    #[error("{value} is not available for {option}")]
    InvalidValue { option: String, value: String },
    #[error("This product has no option named {0}")]
    Unknown(String),
}

/// Why an option group submitted by an admin is invalid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductOptionError {
    #[error("option name cannot be empty")]
    EmptyName,
    #[error("option {0} must have at least one value")]
    NoValues(String),
    #[error("option {0} has an empty value")]
    EmptyValue(String),
    #[error("option {option} lists {value} more than once")]
    DuplicateValue { option: String, value: String },
    #[error("option {0} is defined more than once")]
    DuplicateName(String),
}

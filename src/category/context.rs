// Copyright 2025 Cowboy AI, LLC.

//! Evaluation context handed to every predicate
//!
//! Composites pass the context through unchanged, so a leaf deep inside an
//! expression sees exactly what the caller supplied at the root.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{CategoryError, CategoryResult};

/// Keyword parameters for a categorization call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryContext {
    /// Named parameters, in insertion order
    pub parameters: IndexMap<String, serde_json::Value>,
}

impl CategoryContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter to the context
    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Add any serializable value as a parameter
    pub fn with_value<T: Serialize>(
        self,
        key: impl Into<String>,
        value: &T,
    ) -> CategoryResult<Self> {
        let value = serde_json::to_value(value)?;
        Ok(self.with_parameter(key, value))
    }

    /// True when no parameters were supplied
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Look up a parameter and decode it as `T`
    ///
    /// Absent keys yield `Ok(None)`; a present value of the wrong shape is a
    /// [`CategoryError::SerializationError`].
    pub fn parameter<T: DeserializeOwned>(&self, key: &str) -> CategoryResult<Option<T>> {
        match self.parameters.get(key) {
            Some(value) => Ok(Some(T::deserialize(value)?)),
            None => Ok(None),
        }
    }

    /// Look up a parameter that must be present
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> CategoryResult<T> {
        self.parameter(key)?
            .ok_or_else(|| CategoryError::MissingParameter(key.to_string()))
    }
}

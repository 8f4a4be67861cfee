use std::collections::HashMap;

use serde_json::Value;

use super::{JsonObject, number};
use crate::error::ConfigIssue;
use crate::keys::KeyFormat;

/// Which config key the weight table was read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeightSource {
    #[default]
    Weights,
    /// Legacy spelling with the same shape as `weights`.
    Mapping,
}

/// Per-option contributions: option key -> ordered (dimension, weight) pairs.
pub type OptionWeights = HashMap<String, Vec<(String, f64)>>;

/// `weights[question-key][option_key][dimension] -> weight`, with the question-key format
/// detected once from the first key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightTable {
    pub source: WeightSource,
    pub format: KeyFormat,
    questions: HashMap<String, OptionWeights>,
}

impl WeightTable {
    pub(crate) fn from_object(object: &JsonObject, source: WeightSource) -> Self {
        let format = object
            .keys()
            .next()
            .map(|key| KeyFormat::detect(key))
            .unwrap_or_default();

        let questions = object
            .iter()
            .filter_map(|(key, options)| {
                let key = format.canonical(key)?;
                let options = options.as_object()?;
                Some((key, option_weights(options)))
            })
            .collect();

        Self {
            source,
            format,
            questions,
        }
    }

    /// Weights for `option_key` under the canonical question key, if configured.
    pub fn lookup(&self, question_key: &str, option_key: &str) -> Option<&[(String, f64)]> {
        self.questions
            .get(question_key)?
            .get(option_key)
            .map(Vec::as_slice)
    }

    /// Canonical question keys of the table.
    pub fn question_keys(&self) -> Vec<&str> {
        self.questions.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

fn option_weights(options: &JsonObject) -> OptionWeights {
    options
        .iter()
        .filter_map(|(option_key, dimensions)| {
            let dimensions = dimensions.as_object()?;
            let weights = dimensions
                .iter()
                .filter_map(|(dimension, weight)| Some((dimension.clone(), number(weight)?)))
                .collect();
            Some((option_key.clone(), weights))
        })
        .collect()
}

/// Configuration for `dimensions` mode, also the base of most custom strategies.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionsConfig {
    /// Declared dimensions, in declaration order, without duplicates.
    pub dimensions: Vec<String>,
    pub weights: WeightTable,
}

impl DimensionsConfig {
    pub fn from_object(object: &JsonObject) -> Result<Self, ConfigIssue> {
        let dimensions = declared_dimensions(object.get("dimensions"));
        if dimensions.is_empty() {
            return Err(ConfigIssue::IncompleteDimensions);
        }

        let weights = non_empty_object(object.get("weights"))
            .map(|table| WeightTable::from_object(table, WeightSource::Weights))
            .or_else(|| {
                non_empty_object(object.get("mapping"))
                    .map(|table| WeightTable::from_object(table, WeightSource::Mapping))
            })
            .unwrap_or_default();

        Ok(Self {
            dimensions,
            weights,
        })
    }

    pub fn position(&self, dimension: &str) -> Option<usize> {
        self.dimensions.iter().position(|declared| declared == dimension)
    }
}

fn non_empty_object(value: Option<&Value>) -> Option<&JsonObject> {
    value.and_then(Value::as_object).filter(|object| !object.is_empty())
}

fn declared_dimensions(value: Option<&Value>) -> Vec<String> {
    let names: Vec<String> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(super::text).collect(),
        // `{"E": "Extraversion", ...}` declares the keys.
        Some(Value::Object(object)) => object.keys().cloned().collect(),
        _ => Vec::new(),
    };

    let mut declared: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !name.is_empty() && !declared.contains(&name) {
            declared.push(name);
        }
    }
    declared
}

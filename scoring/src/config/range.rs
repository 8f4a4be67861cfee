use serde::Serialize;
use serde_json::Value;

use super::{Bounds, JsonObject, text};

/// One `ranges` entry: an inclusive `[min, max]` score band, optionally naming a result code.
/// Entries missing either bound are dropped when the table is parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeBand {
    #[serde(flatten)]
    pub bounds: Bounds,
    pub code: Option<String>,
}

impl RangeBand {
    pub fn contains(&self, score: f64) -> bool {
        self.bounds.contains(score)
    }
}

/// Configuration for `range` mode. An empty table means "use the result score ranges".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeConfig {
    /// Bands in declared order. Evaluation stops at the first band containing the score.
    pub ranges: Vec<RangeBand>,
}

impl RangeConfig {
    pub fn from_object(object: &JsonObject) -> Self {
        let ranges = object
            .get("ranges")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(|entry| {
                        let bounds = Bounds::from_object(entry);
                        (bounds.min.is_some() && bounds.max.is_some()).then(|| RangeBand {
                            bounds,
                            code: entry.get("code").and_then(text),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { ranges }
    }

    /// First band, in declared order, containing `score`.
    pub fn matching(&self, score: f64) -> Option<&RangeBand> {
        self.ranges.iter().find(|band| band.contains(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overlapping_bands_match_in_declared_order() {
        let object = json!({
            "ranges": [
                { "min": 0, "max": 10, "code": "low" },
                { "min": 5, "max": 20, "code": "mid" },
                "junk",
                { "min": "21", "max": "30", "code": "" }
            ]
        });
        let config = RangeConfig::from_object(object.as_object().unwrap());

        assert_eq!(config.ranges.len(), 3);
        assert_eq!(config.matching(7.0).and_then(|b| b.code.as_deref()), Some("low"));
        assert_eq!(config.matching(15.0).and_then(|b| b.code.as_deref()), Some("mid"));
        let quoted = config.matching(25.0).unwrap();
        assert_eq!(quoted.code, None);
        assert!(config.matching(-1.0).is_none());
        assert!(config.matching(500.0).is_none());
    }

    #[test]
    fn bands_missing_a_bound_are_dropped() {
        let object = json!({
            "ranges": [
                { "min": 0, "code": "promo" },
                { "max": 10, "code": "capped" },
                { "code": "any" },
                { "min": 40, "max": 60, "code": "mid" }
            ]
        });
        let config = RangeConfig::from_object(object.as_object().unwrap());

        assert_eq!(config.ranges.len(), 1);
        assert!(config.matching(5.0).is_none());
        assert_eq!(config.matching(50.0).and_then(|b| b.code.as_deref()), Some("mid"));
    }

    #[test]
    fn missing_ranges_key_is_empty() {
        let config = RangeConfig::from_object(json!({ "other": 1 }).as_object().unwrap());
        assert!(config.ranges.is_empty());
    }
}

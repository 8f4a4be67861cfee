//! # Result Resolver
//!
//! Maps a numeric score or a dimension code onto one of the test's results, walking an ordered
//! chain of lookups until one succeeds:
//!
//! - **By score**: exact `min_score <= score <= max_score` match, then the result with the
//!   greatest `min_score` not above the score, then the test's first result.
//! - **By code**: exact `code` match, then the test's first result.
//!
//! A collaborator failure at any tier is logged as a warning and treated as "no match" at that
//! tier, so the remaining tiers still run. When every tier comes up empty the result is `None`.

use crate::error::LookupError;
use crate::report::{LookupTier, ScoringWarning, WarningSink};
use crate::traits::provider::ResultLookupProvider;
use crate::types::{ResultRecord, TestId};

pub struct ResultResolver<'a> {
    catalog: &'a dyn ResultLookupProvider,
    test_id: TestId,
}

impl<'a> ResultResolver<'a> {
    pub fn new(catalog: &'a dyn ResultLookupProvider, test_id: TestId) -> Self {
        Self { catalog, test_id }
    }

    pub(crate) fn by_score(&self, score: f64, warnings: &mut WarningSink) -> Option<ResultRecord> {
        if let Some(found) = self.attempt(LookupTier::ExactScore, warnings, |c, id| {
            c.find_by_score(id, score)
        }) {
            return Some(found);
        }
        if let Some(found) = self.attempt(LookupTier::FloorScore, warnings, |c, id| {
            c.find_floor_by_score(id, score)
        }) {
            return Some(found);
        }
        self.first(warnings)
    }

    pub(crate) fn by_code(&self, code: &str, warnings: &mut WarningSink) -> Option<ResultRecord> {
        self.by_code_exact(code, warnings)
            .or_else(|| self.first(warnings))
    }

    /// Exact code match only, without the first-result fallback.
    pub(crate) fn by_code_exact(
        &self,
        code: &str,
        warnings: &mut WarningSink,
    ) -> Option<ResultRecord> {
        self.attempt(LookupTier::Code, warnings, |c, id| c.find_by_code(id, code))
    }

    fn first(&self, warnings: &mut WarningSink) -> Option<ResultRecord> {
        self.attempt(LookupTier::FirstForTest, warnings, |c, id| c.first_for_test(id))
    }

    fn attempt<F>(
        &self,
        tier: LookupTier,
        warnings: &mut WarningSink,
        lookup: F,
    ) -> Option<ResultRecord>
    where
        F: FnOnce(&dyn ResultLookupProvider, TestId) -> Result<Option<ResultRecord>, LookupError>,
    {
        match lookup(self.catalog, self.test_id) {
            Ok(found) => found,
            Err(err) => {
                warnings.push(ScoringWarning::LookupFailed {
                    tier,
                    message: err.to_string(),
                });
                None
            }
        }
    }
}

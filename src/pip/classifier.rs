//! Named-catalog and custom-region classification.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ray::{contains, contains_with, BoundaryRule};
use crate::config::ClassifierConfig;
use crate::error::{ClassifyError, Result};
use crate::models::{Classification, CoordOrder, CoordValue, Point, Region, RegionRecord};

/// Which region wins when several contain the point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Earliest region in input order; stops at the first hit
    #[default]
    FirstMatch,
    /// Latest region in input order; every region is tested
    LastMatch,
}

/// Classify against a catalog of named regions using the default
/// [`Classifier`] (first match wins, boundary counts as inside).
///
/// `None` stands for a request that carried no coordinates.
pub fn classify_against_named(
    point: Option<&Point>,
    regions: &[Region],
) -> Result<Classification> {
    Classifier::default().classify_named(point, regions)
}

/// Test a single custom region. Same as [`contains`].
pub fn classify_against_custom(point: &Point, region: &Region) -> bool {
    contains(region, point)
}

/// Classification settings applied to every lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classifier {
    pub policy: MatchPolicy,
    pub boundary: BoundaryRule,
    /// Order of raw coordinate pairs handed to [`Classifier::classify_raw`]
    pub order: CoordOrder,
}

impl Classifier {
    pub fn new(policy: MatchPolicy, boundary: BoundaryRule, order: CoordOrder) -> Self {
        Self {
            policy,
            boundary,
            order,
        }
    }

    /// Find the region containing `point`
    pub fn classify_named(
        &self,
        point: Option<&Point>,
        regions: &[Region],
    ) -> Result<Classification> {
        let point = point
            .ok_or_else(|| ClassifyError::InvalidInput("no coordinates supplied".to_string()))?;

        let result = self.select(point, regions.iter());

        debug!(
            "Classified ({}, {}) against {} regions: {}",
            point.lat,
            point.lon,
            regions.len(),
            result
        );

        Ok(result)
    }

    /// Test a single custom region under this classifier's boundary rule
    pub fn classify_custom(&self, point: &Point, region: &Region) -> bool {
        contains_with(region, point, self.boundary)
    }

    /// Parse a raw coordinate pair and stored region records, then classify.
    ///
    /// Point errors are reported before any region is parsed.
    pub fn classify_raw(
        &self,
        pair: &[CoordValue],
        records: &[RegionRecord],
    ) -> Result<Classification> {
        let point = Point::from_pair(pair, self.order)?;
        let regions = records
            .iter()
            .map(|r| Region::from_record(r, self.order))
            .collect::<Result<Vec<_>>>()?;
        self.classify_named(Some(&point), &regions)
    }

    /// Classify many points in parallel; results keep input order
    pub fn classify_batch(
        &self,
        points: &[Option<Point>],
        regions: &[Region],
    ) -> Vec<Result<Classification>> {
        points
            .par_iter()
            .map(|p| self.classify_named(p.as_ref(), regions))
            .collect()
    }

    /// Apply the match policy over candidates in their iteration order
    pub(crate) fn select<'a, I>(&self, point: &Point, candidates: I) -> Classification
    where
        I: Iterator<Item = &'a Region>,
    {
        let mut hits = candidates.filter(|r| contains_with(r, point, self.boundary));
        let winner = match self.policy {
            MatchPolicy::FirstMatch => hits.next(),
            MatchPolicy::LastMatch => hits.last(),
        };

        match winner {
            Some(region) => Classification::Matched(region.name().to_string()),
            None => Classification::NoMatch,
        }
    }
}

impl From<&ClassifierConfig> for Classifier {
    fn from(config: &ClassifierConfig) -> Self {
        Classifier::new(
            config.match_policy,
            config.boundary_rule,
            config.coordinate_order,
        )
    }
}

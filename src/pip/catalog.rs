//! Spatially indexed region catalog and its version-keyed cache.

use std::sync::{Arc, PoisonError, RwLock};

use rstar::{RTree, RTreeObject, AABB};
use tracing::{debug, info};

use super::Classifier;
use crate::error::{ClassifyError, Result};
use crate::models::{Classification, CoordOrder, Point, Region, RegionRecord};

/// R-tree entry pointing back into the catalog's ordered region list
#[derive(Debug, Clone)]
struct IndexedRegion {
    position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedRegion {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Immutable snapshot of a region set, tagged with the version it was built from.
///
/// Lookups pre-filter by bounding box and then resolve overlaps in catalog
/// order, so the outcome is identical to [`Classifier::classify_named`] over
/// [`RegionCatalog::regions`].
pub struct RegionCatalog {
    version: u64,
    regions: Vec<Region>,
    tree: RTree<IndexedRegion>,
}

impl RegionCatalog {
    pub fn build(version: u64, regions: Vec<Region>) -> Self {
        info!(
            "Building region catalog v{} for {} regions...",
            version,
            regions.len()
        );

        let indexed: Vec<IndexedRegion> = regions
            .iter()
            .enumerate()
            .map(|(position, region)| {
                let bbox = region.bbox();
                IndexedRegion {
                    position,
                    envelope: AABB::from_corners(
                        [bbox.min().x, bbox.min().y],
                        [bbox.max().x, bbox.max().y],
                    ),
                }
            })
            .collect();

        let tree = RTree::bulk_load(indexed);
        info!("Region catalog built with {} entries", tree.size());

        Self {
            version,
            regions,
            tree,
        }
    }

    /// Build from stored records; any bad record fails the whole catalog
    pub fn from_records(
        version: u64,
        records: &[RegionRecord],
        order: CoordOrder,
    ) -> Result<Self> {
        let regions = records
            .iter()
            .map(|r| Region::from_record(r, order))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::build(version, regions))
    }

    /// Classify a point against the catalog
    pub fn lookup(
        &self,
        classifier: &Classifier,
        point: Option<&Point>,
    ) -> Result<Classification> {
        let point = point
            .ok_or_else(|| ClassifyError::InvalidInput("no coordinates supplied".to_string()))?;

        let query = AABB::from_point([point.lon, point.lat]);
        let mut positions: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .map(|ir| ir.position)
            .collect();
        positions.sort_unstable();

        debug!(
            "Catalog v{} lookup at ({}, {}): {} candidates",
            self.version,
            point.lat,
            point.lon,
            positions.len()
        );

        Ok(classifier.select(point, positions.iter().map(|&i| &self.regions[i])))
    }

    /// Find a region by name, first occurrence in catalog order
    pub fn find(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name() == name)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Holds at most one catalog, keyed by region-set version.
///
/// Writers to the underlying region storage bump the version or call
/// [`CatalogCache::invalidate`]; nothing is rebuilt implicitly.
#[derive(Default)]
pub struct CatalogCache {
    slot: RwLock<Option<Arc<RegionCatalog>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached catalog for `version`, or build it from `load`
    pub fn get_or_build<F, E>(
        &self,
        version: u64,
        load: F,
    ) -> std::result::Result<Arc<RegionCatalog>, E>
    where
        F: FnOnce() -> std::result::Result<Vec<Region>, E>,
    {
        if let Some(catalog) = self.cached(version) {
            debug!("Region catalog v{} served from cache", version);
            return Ok(catalog);
        }

        let catalog = Arc::new(RegionCatalog::build(version, load()?));

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have finished the same version first
        if let Some(existing) = slot.as_ref().filter(|c| c.version() == version) {
            return Ok(Arc::clone(existing));
        }
        *slot = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Drop the cached catalog
    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = slot.take() {
            info!("Invalidated region catalog v{}", old.version());
        }
    }

    /// Version of the cached catalog, if any
    pub fn current_version(&self) -> Option<u64> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|c| c.version())
    }

    fn cached(&self, version: u64) -> Option<Arc<RegionCatalog>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|c| c.version() == version)
            .map(Arc::clone)
    }
}

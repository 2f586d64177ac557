use std::collections::HashMap;

use foundation::ids::PoiId;

use crate::error::CatalogError;
use crate::media::{ManifestSource, MediaCatalog};
use crate::poi::PointOfInterest;

/// Validated, immutable, ordered set of points of interest.
///
/// Ordering contract:
/// - Iteration yields records in load order; ties in distance ranking fall
///   back to this order.
/// - Identities are unique; construction rejects duplicates.
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    points: Vec<PointOfInterest>,
    index: HashMap<PoiId, usize>,
}

impl PointSet {
    pub fn new(points: Vec<PointOfInterest>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(points.len());
        for (i, poi) in points.iter().enumerate() {
            if !poi.coordinate.is_finite() {
                return Err(CatalogError::InvalidCoordinate {
                    name: poi.id.to_string(),
                });
            }
            if index.insert(poi.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(poi.id.to_string()));
            }
        }
        Ok(Self { points, index })
    }

    /// Builds a point set, filling in media for records that arrive without
    /// any, keyed by `(location, name)`.
    pub fn with_media<S: ManifestSource>(
        mut points: Vec<PointOfInterest>,
        media: &mut MediaCatalog<S>,
    ) -> Result<Self, CatalogError> {
        for poi in &mut points {
            if poi.has_media() {
                continue;
            }
            let Some(location) = poi.location.as_deref() else {
                continue;
            };
            let resolved = media.resolve(location, poi.id.as_str());
            poi.media = resolved.images;
            if poi.categories.is_empty() {
                poi.categories = resolved.categories;
            }
        }
        Self::new(points)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: &PoiId) -> Option<&PointOfInterest> {
        self.index.get(id).map(|&i| &self.points[i])
    }

    pub fn contains(&self, id: &PoiId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointOfInterest> + '_ {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[PointOfInterest] {
        &self.points
    }
}

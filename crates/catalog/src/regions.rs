use foundation::math::{LonLat, ring_contains};
use serde::{Deserialize, Serialize};

/// A named administrative area bounded by a single outer ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub ring: Vec<LonLat>,
}

impl Region {
    pub fn new(name: impl Into<String>, ring: Vec<LonLat>) -> Self {
        Self {
            name: name.into(),
            ring,
        }
    }

    pub fn contains(&self, point: LonLat) -> bool {
        ring_contains(&self.ring, point)
    }
}

/// Linear lookup over a handful of region polygons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionIndex {
    regions: Vec<Region>,
}

impl RegionIndex {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// First region (in insertion order) containing `point`.
    pub fn region_at(&self, point: LonLat) -> Option<&str> {
        self.regions
            .iter()
            .find(|r| r.contains(point))
            .map(|r| r.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{Region, RegionIndex};
    use foundation::math::LonLat;

    fn rect(name: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Region {
        Region::new(
            name,
            vec![
                LonLat::new(x0, y0),
                LonLat::new(x1, y0),
                LonLat::new(x1, y1),
                LonLat::new(x0, y1),
            ],
        )
    }

    #[test]
    fn finds_containing_region() {
        let index = RegionIndex::new(vec![
            rect("VIRAC", 124.1, 13.5, 124.3, 13.7),
            rect("BARAS", 124.3, 13.5, 124.5, 13.7),
        ]);
        assert_eq!(index.region_at(LonLat::new(124.4, 13.6)), Some("BARAS"));
        assert_eq!(index.region_at(LonLat::new(124.2, 13.6)), Some("VIRAC"));
        assert_eq!(index.region_at(LonLat::new(120.0, 10.0)), None);
    }

    #[test]
    fn deserializes_from_list() {
        let index: RegionIndex = serde_json::from_str(
            r#"[{ "name": "X", "ring": [[0,0],[1,0],[1,1],[0,1]] }]"#,
        )
        .unwrap();
        assert_eq!(index.region_at(LonLat::new(0.5, 0.5)), Some("X"));
    }
}

use catalog::PointOfInterest;
use foundation::math::{LonLat, haversine_km, stable_total_cmp_f64};

/// A point paired with its great-circle distance to the viewport center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ranked<'a> {
    pub poi: &'a PointOfInterest,
    pub distance_km: f64,
}

/// Orders points by distance to `center`, nearest first.
///
/// Ordering contract:
/// - Ascending by distance under a total float order.
/// - Equal distances keep their input order (stable sort).
pub fn rank_by_distance<'a, I>(points: I, center: LonLat) -> Vec<Ranked<'a>>
where
    I: IntoIterator<Item = &'a PointOfInterest>,
{
    let mut ranked: Vec<Ranked<'a>> = points
        .into_iter()
        .map(|poi| Ranked {
            poi,
            distance_km: haversine_km(center, poi.coordinate),
        })
        .collect();
    ranked.sort_by(|a, b| stable_total_cmp_f64(a.distance_km, b.distance_km));
    ranked
}

#[cfg(test)]
mod tests {
    use super::rank_by_distance;
    use catalog::PointOfInterest;
    use foundation::math::LonLat;

    #[test]
    fn nearest_first() {
        let points = vec![
            PointOfInterest::new("far", LonLat::new(10.0, 10.0)),
            PointOfInterest::new("near", LonLat::new(0.0, 0.01)),
            PointOfInterest::new("mid", LonLat::new(1.0, 1.0)),
        ];
        let ranked = rank_by_distance(&points, LonLat::new(0.0, 0.0));
        let names: Vec<_> = ranked.iter().map(|r| r.poi.id.as_str()).collect();
        assert_eq!(names, vec!["near", "mid", "far"]);
        assert!(ranked[0].distance_km < ranked[1].distance_km);
    }

    #[test]
    fn ties_keep_input_order() {
        let points = vec![
            PointOfInterest::new("east", LonLat::new(1.0, 0.0)),
            PointOfInterest::new("west", LonLat::new(-1.0, 0.0)),
            PointOfInterest::new("north", LonLat::new(0.0, 1.0)),
        ];
        let ranked = rank_by_distance(&points, LonLat::new(0.0, 0.0));
        let names: Vec<_> = ranked.iter().map(|r| r.poi.id.as_str()).collect();
        // One degree along the equator or the meridian: identical haversine terms.
        assert_eq!(names, vec!["east", "west", "north"]);
    }
}

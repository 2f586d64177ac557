use serde::{Deserialize, Serialize};

/// Mean Earth radius (kilometers) used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinate in degrees.
///
/// Serialized as a `[lon, lat]` pair, the GeoJSON position order.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    pub fn distance_km(&self, other: LonLat) -> f64 {
        haversine_km(*self, other)
    }
}

impl From<[f64; 2]> for LonLat {
    fn from(pair: [f64; 2]) -> Self {
        LonLat::new(pair[0], pair[1])
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(c: LonLat) -> Self {
        [c.lon, c.lat]
    }
}

/// Great-circle distance in kilometers (haversine).
///
/// `d = 2·R·asin(√(sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)))`
pub fn haversine_km(a: LonLat, b: LonLat) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let half_dlat = (b.lat - a.lat).to_radians() * 0.5;
    let half_dlon = (b.lon - a.lon).to_radians() * 0.5;

    let h = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal pairs.
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::{EARTH_RADIUS_KM, LonLat, haversine_km};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn zero_distance_for_same_point() {
        let p = LonLat::new(124.2, 13.8);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn one_hundredth_degree_of_latitude_is_about_1_1_km() {
        let d = haversine_km(LonLat::new(0.0, 0.0), LonLat::new(0.0, 0.01));
        assert_close(d, 1.111_95, 1e-4);
    }

    #[test]
    fn quarter_meridian() {
        let d = haversine_km(LonLat::new(0.0, 0.0), LonLat::new(0.0, 90.0));
        assert_close(d, EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2, 1e-9);
    }

    #[test]
    fn antipodes_do_not_produce_nan() {
        let d = haversine_km(LonLat::new(0.0, 0.0), LonLat::new(180.0, 0.0));
        assert_close(d, EARTH_RADIUS_KM * std::f64::consts::PI, 1e-6);
    }

    #[test]
    fn serializes_as_lon_lat_pair() {
        let json = serde_json::to_string(&LonLat::new(124.2, 13.8)).unwrap();
        assert_eq!(json, "[124.2,13.8]");
        let back: LonLat = serde_json::from_str("[1.5,-2.0]").unwrap();
        assert_eq!(back, LonLat::new(1.5, -2.0));
    }
}

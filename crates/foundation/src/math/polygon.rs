use super::LonLat;

/// Even-odd ray casting test against a closed ring of `[lon, lat]` vertices.
///
/// The ring may or may not repeat its first vertex at the end. Points exactly
/// on an edge may land on either side.
pub fn ring_contains(ring: &[LonLat], point: LonLat) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let (x, y) = (point.lon, point.lat);
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = (ring[i].lon, ring[i].lat);
        let (xj, yj) = (ring[j].lon, ring[j].lat);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

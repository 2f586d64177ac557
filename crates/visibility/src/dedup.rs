use crate::rank::Ranked;

/// Greedy proximity suppression over a rank-ordered list.
///
/// Walks the list in rank order; each candidate is kept unless an earlier
/// *kept* point lies within `radius_km` of it. Suppressed points never
/// suppress anything themselves, so there is no chaining: this is a rank
/// priority cover, not a spatial partition.
///
/// `radius_km <= 0` (or NaN) disables suppression and returns the input.
pub fn suppress_nearby<'a>(ranked: &[Ranked<'a>], radius_km: f64) -> Vec<Ranked<'a>> {
    suppress_nearby_until(ranked, radius_km, usize::MAX)
}

/// Same as [`suppress_nearby`] but stops once `limit` points are kept.
///
/// The kept prefix is identical to the first `limit` entries of the full
/// result, since later candidates can never displace earlier kept ones.
pub fn suppress_nearby_until<'a>(
    ranked: &[Ranked<'a>],
    radius_km: f64,
    limit: usize,
) -> Vec<Ranked<'a>> {
    if radius_km.is_nan() || radius_km <= 0.0 {
        return ranked.iter().take(limit).copied().collect();
    }

    let mut kept: Vec<Ranked<'a>> = Vec::new();
    for candidate in ranked {
        if kept.len() >= limit {
            break;
        }
        let suppressed = kept
            .iter()
            .any(|k| k.poi.coordinate.distance_km(candidate.poi.coordinate) <= radius_km);
        if !suppressed {
            kept.push(*candidate);
        }
    }
    kept
}

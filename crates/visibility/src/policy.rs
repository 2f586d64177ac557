use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const TIER_COUNT: usize = 4;

/// Visual style applied uniformly to a decision.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTier {
    /// Image thumbnails, used for the coarsest view.
    Iconographic,
    /// Small category-icon markers.
    Simple,
}

/// Zoom thresholds and per-tier limits.
///
/// Tiers:
/// - 0: `zoom < t1`
/// - 1: `t1 <= zoom < t2`
/// - 2: `t2 <= zoom < t3`
/// - 3: `zoom >= t3` (no suppression)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomTiers {
    pub t1: f64,
    pub t2: f64,
    pub t3: f64,
    pub r0_km: f64,
    pub r1_km: f64,
    pub r2_km: f64,
    pub max_markers_by_tier: [usize; TIER_COUNT],
}

impl Default for ZoomTiers {
    fn default() -> Self {
        Self {
            t1: 8.5,
            t2: 10.0,
            t3: 11.0,
            r0_km: 5.0,
            r1_km: 3.0,
            r2_km: 2.0,
            max_markers_by_tier: [1, 2, 3, 3],
        }
    }
}

impl ZoomTiers {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.t1.is_finite() && self.t2.is_finite() && self.t3.is_finite();
        if !finite || !(self.t1 < self.t2 && self.t2 < self.t3) {
            return Err(ConfigError::Thresholds {
                t1: self.t1,
                t2: self.t2,
                t3: self.t3,
            });
        }
        for (tier, radius_km) in [self.r0_km, self.r1_km, self.r2_km].into_iter().enumerate() {
            if !radius_km.is_finite() || radius_km < 0.0 {
                return Err(ConfigError::Radius { tier, radius_km });
            }
        }
        if let Some(tier) = self.max_markers_by_tier.iter().position(|&m| m == 0) {
            return Err(ConfigError::ZeroMarkers { tier });
        }
        Ok(())
    }
}

/// What a zoom level allows.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct TierPolicy {
    pub tier: usize,
    pub max_markers: usize,
    /// `0.0` disables proximity suppression.
    pub suppression_radius_km: f64,
    pub style: StyleTier,
}

/// Maps a continuous zoom level to a [`TierPolicy`].
///
/// Total for every `f64`: NaN and negative zooms clamp to 0, `+inf` lands in
/// the last tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomPolicy {
    tiers: ZoomTiers,
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self {
            tiers: ZoomTiers::default(),
        }
    }
}

impl ZoomPolicy {
    pub fn new(tiers: ZoomTiers) -> Result<Self, ConfigError> {
        tiers.validate()?;
        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &ZoomTiers {
        &self.tiers
    }

    pub fn tier_index(&self, zoom: f64) -> usize {
        let zoom = clamp_zoom(zoom);
        if zoom < self.tiers.t1 {
            0
        } else if zoom < self.tiers.t2 {
            1
        } else if zoom < self.tiers.t3 {
            2
        } else {
            3
        }
    }

    pub fn max_markers(&self, zoom: f64) -> usize {
        self.tiers.max_markers_by_tier[self.tier_index(zoom)]
    }

    pub fn suppression_radius_km(&self, zoom: f64) -> f64 {
        match self.tier_index(zoom) {
            0 => self.tiers.r0_km,
            1 => self.tiers.r1_km,
            2 => self.tiers.r2_km,
            _ => 0.0,
        }
    }

    pub fn use_iconographic_style(&self, zoom: f64) -> bool {
        self.tier_index(zoom) == 0
    }

    pub fn evaluate(&self, zoom: f64) -> TierPolicy {
        let tier = self.tier_index(zoom);
        TierPolicy {
            tier,
            max_markers: self.tiers.max_markers_by_tier[tier],
            suppression_radius_km: self.suppression_radius_km(zoom),
            style: if tier == 0 {
                StyleTier::Iconographic
            } else {
                StyleTier::Simple
            },
        }
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() { 0.0 } else { zoom.max(0.0) }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StyleTier, ZoomPolicy, ZoomTiers};

    #[test]
    fn default_tiers() {
        let policy = ZoomPolicy::default();

        let far = policy.evaluate(7.0);
        assert_eq!(far.max_markers, 1);
        assert_eq!(far.suppression_radius_km, 5.0);
        assert_eq!(far.style, StyleTier::Iconographic);

        let mid = policy.evaluate(9.0);
        assert_eq!((mid.max_markers, mid.suppression_radius_km), (2, 3.0));
        assert_eq!(mid.style, StyleTier::Simple);

        let near = policy.evaluate(10.5);
        assert_eq!((near.max_markers, near.suppression_radius_km), (3, 2.0));

        let street = policy.evaluate(12.0);
        assert_eq!((street.max_markers, street.suppression_radius_km), (3, 0.0));
    }

    #[test]
    fn boundaries_belong_to_the_upper_tier() {
        let policy = ZoomPolicy::default();
        assert_eq!(policy.tier_index(8.5), 1);
        assert_eq!(policy.tier_index(10.0), 2);
        assert_eq!(policy.tier_index(11.0), 3);
        assert!(policy.use_iconographic_style(8.499));
        assert!(!policy.use_iconographic_style(8.5));
    }

    #[test]
    fn total_for_extreme_zooms() {
        let policy = ZoomPolicy::default();
        assert_eq!(policy.tier_index(f64::NAN), 0);
        assert_eq!(policy.tier_index(-3.0), 0);
        assert_eq!(policy.tier_index(f64::INFINITY), 3);
        assert_eq!(policy.tier_index(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn rejects_invalid_tiers() {
        let unordered = ZoomTiers {
            t2: 8.0,
            ..ZoomTiers::default()
        };
        assert!(matches!(
            ZoomPolicy::new(unordered),
            Err(ConfigError::Thresholds { .. })
        ));

        let negative = ZoomTiers {
            r1_km: -1.0,
            ..ZoomTiers::default()
        };
        assert_eq!(
            ZoomPolicy::new(negative),
            Err(ConfigError::Radius {
                tier: 1,
                radius_km: -1.0
            })
        );

        let empty = ZoomTiers {
            max_markers_by_tier: [1, 0, 3, 3],
            ..ZoomTiers::default()
        };
        assert_eq!(
            ZoomPolicy::new(empty),
            Err(ConfigError::ZeroMarkers { tier: 1 })
        );
    }

    #[test]
    fn partial_override_from_json_keeps_defaults() {
        let tiers: ZoomTiers = serde_json::from_str(r#"{ "t1": 7.0, "r0_km": 8.0 }"#).unwrap();
        assert_eq!(tiers.t1, 7.0);
        assert_eq!(tiers.r0_km, 8.0);
        assert_eq!(tiers.t2, 10.0);
        assert_eq!(tiers.max_markers_by_tier, [1, 2, 3, 3]);
    }
}

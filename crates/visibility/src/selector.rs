use catalog::{PointOfInterest, PointSet};
use foundation::ids::PoiId;
use foundation::math::LonLat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dedup::suppress_nearby_until;
use crate::pinned::{PinOutcome, ensure_pinned};
use crate::policy::{StyleTier, TierPolicy, ZoomPolicy};
use crate::rank::rank_by_distance;

/// Camera snapshot read once per recompute.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub center: LonLat,
}

impl Viewport {
    pub fn new(zoom: f64, center: LonLat) -> Self {
        Self { zoom, center }
    }
}

/// Points to show for one viewport, highest priority first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibilityDecision {
    pub ids: Vec<PoiId>,
    pub style: StyleTier,
    pub policy: TierPolicy,
    pub pin: PinOutcome,
}

impl VisibilityDecision {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &PoiId) -> bool {
        self.ids.iter().any(|i| i == id)
    }
}

/// Rank, suppress, cap, pin.
///
/// Stateless: the same inputs always yield the same decision.
#[derive(Debug, Clone, Default)]
pub struct VisibilitySelector {
    policy: ZoomPolicy,
}

impl VisibilitySelector {
    pub fn new(policy: ZoomPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ZoomPolicy {
        &self.policy
    }

    pub fn select(
        &self,
        points: &PointSet,
        viewport: Viewport,
        pinned: Option<&PoiId>,
    ) -> VisibilityDecision {
        let policy = self.policy.evaluate(viewport.zoom);

        let ranked = rank_by_distance(points.iter(), viewport.center);
        let kept = suppress_nearby_until(&ranked, policy.suppression_radius_km, policy.max_markers);

        let mut selection: Vec<&PointOfInterest> = kept.iter().map(|r| r.poi).collect();
        let pin = ensure_pinned(&mut selection, pinned, points);

        let ids: Vec<PoiId> = selection.iter().map(|p| p.id.clone()).collect();
        debug!(
            shown = ids.len(),
            max = policy.max_markers,
            zoom = viewport.zoom,
            tier = policy.tier,
            style = ?policy.style,
            radius_km = policy.suppression_radius_km,
            candidates = points.len(),
            "visibility decision"
        );

        VisibilityDecision {
            ids,
            style: policy.style,
            policy,
            pin,
        }
    }
}

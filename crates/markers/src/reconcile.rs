use std::collections::{BTreeMap, HashMap, HashSet};

use catalog::PointSet;
use foundation::handles::Handle;
use foundation::ids::PoiId;
use foundation::math::LonLat;
use serde::Serialize;
use tracing::{trace, warn};
use visibility::{StyleTier, VisibilityDecision};

use crate::surface::RenderSurface;
use crate::symbology::{MarkerVisual, resolve_visual};

/// A marker currently attached to the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializedMarker {
    pub handle: Handle,
    pub coordinate: LonLat,
    pub visual: MarkerVisual,
    /// Tier the visual was resolved under.
    pub style: StyleTier,
    /// Opacity is zero while its detail is open.
    pub hidden: bool,
}

/// Outcome of one [`Reconciler::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// In decision order.
    pub added: Vec<PoiId>,
    /// In identity order.
    pub removed: Vec<PoiId>,
    /// Kept identities re-created because their record changed.
    pub refreshed: Vec<PoiId>,
    pub kept: usize,
}

impl ReconcileSummary {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.refreshed.is_empty()
    }
}

/// Inputs that shape newly created markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterializeHints<'a> {
    pub always_iconographic: Option<&'a PoiId>,
    /// Created with zero opacity (its detail is open).
    pub hidden: Option<&'a PoiId>,
}

/// Owns the identity → marker mapping and diffs it against decisions.
///
/// At most one marker per identity; unchanged identities are never touched.
/// After [`mark_stale`](Self::mark_stale) the next pass also re-creates kept
/// markers whose coordinate or visual no longer matches the point set.
#[derive(Debug, Default)]
pub struct Reconciler {
    markers: BTreeMap<PoiId, MaterializedMarker>,
    by_handle: HashMap<Handle, PoiId>,
    stale: bool,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn contains(&self, id: &PoiId) -> bool {
        self.markers.contains_key(id)
    }

    pub fn get(&self, id: &PoiId) -> Option<&MaterializedMarker> {
        self.markers.get(id)
    }

    /// Identities in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &PoiId> + '_ {
        self.markers.keys()
    }

    /// Resolves a click on `handle` to the marker's identity.
    pub fn id_for(&self, handle: Handle) -> Option<&PoiId> {
        self.by_handle.get(&handle)
    }

    /// Records that the point set was swapped under the live markers.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn apply(
        &mut self,
        decision: &VisibilityDecision,
        points: &PointSet,
        hints: MaterializeHints<'_>,
        surface: &mut dyn RenderSurface,
    ) -> ReconcileSummary {
        let wanted: HashSet<&PoiId> = decision.ids.iter().collect();

        let removed: Vec<PoiId> = self
            .markers
            .keys()
            .filter(|id| !wanted.contains(id))
            .cloned()
            .collect();
        for id in &removed {
            self.detach(id, surface);
        }

        let refreshed = if std::mem::take(&mut self.stale) {
            self.refresh_changed(points, hints, surface)
        } else {
            Vec::new()
        };

        let mut added = Vec::new();
        for id in &decision.ids {
            if self.markers.contains_key(id) {
                continue;
            }
            let Some(poi) = points.get(id) else {
                warn!(id = %id, "decision names a point outside the point set");
                continue;
            };
            let visual = resolve_visual(poi, decision.style, hints.always_iconographic);
            self.attach(id, poi.coordinate, visual, decision.style, hints, surface);
            added.push(id.clone());
        }

        let kept = self.markers.len() - added.len();
        ReconcileSummary {
            added,
            removed,
            refreshed,
            kept,
        }
    }

    /// Re-creates markers whose record no longer matches what is on screen.
    /// The original style tier is kept so a swap never restyles by zoom.
    fn refresh_changed(
        &mut self,
        points: &PointSet,
        hints: MaterializeHints<'_>,
        surface: &mut dyn RenderSurface,
    ) -> Vec<PoiId> {
        let mut refreshed = Vec::new();
        let ids: Vec<PoiId> = self.markers.keys().cloned().collect();
        for id in ids {
            let (Some(poi), Some(marker)) = (points.get(&id), self.markers.get(&id)) else {
                continue;
            };
            let style = marker.style;
            let visual = resolve_visual(poi, style, hints.always_iconographic);
            if marker.coordinate == poi.coordinate && marker.visual == visual {
                continue;
            }
            self.detach(&id, surface);
            self.attach(&id, poi.coordinate, visual, style, hints, surface);
            refreshed.push(id);
        }
        refreshed
    }

    fn attach(
        &mut self,
        id: &PoiId,
        coordinate: LonLat,
        visual: MarkerVisual,
        style: StyleTier,
        hints: MaterializeHints<'_>,
        surface: &mut dyn RenderSurface,
    ) {
        let handle = surface.add_marker(coordinate, &visual, id);
        let hidden = hints.hidden == Some(id);
        if hidden {
            surface.set_marker_opacity(handle, 0.0);
        }
        trace!(id = %id, iconographic = visual.is_iconographic(), "marker attached");
        self.by_handle.insert(handle, id.clone());
        self.markers.insert(
            id.clone(),
            MaterializedMarker {
                handle,
                coordinate,
                visual,
                style,
                hidden,
            },
        );
    }

    /// Hides or restores a marker. Returns `false` if it is not materialized.
    pub fn set_hidden(&mut self, id: &PoiId, hidden: bool, surface: &mut dyn RenderSurface) -> bool {
        let Some(marker) = self.markers.get_mut(id) else {
            return false;
        };
        if marker.hidden != hidden {
            marker.hidden = hidden;
            surface.set_marker_opacity(marker.handle, if hidden { 0.0 } else { 1.0 });
        }
        true
    }

    /// Detaches every marker.
    pub fn clear(&mut self, surface: &mut dyn RenderSurface) -> Vec<PoiId> {
        let ids: Vec<PoiId> = self.markers.keys().cloned().collect();
        for id in &ids {
            self.detach(id, surface);
        }
        ids
    }

    fn detach(&mut self, id: &PoiId, surface: &mut dyn RenderSurface) {
        if let Some(marker) = self.markers.remove(id) {
            self.by_handle.remove(&marker.handle);
            surface.remove_marker(marker.handle);
            trace!(id = %id, "marker detached");
        }
    }
}

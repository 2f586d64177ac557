use std::collections::BTreeMap;

use foundation::handles::{Handle, HandleAllocator};
use foundation::ids::PoiId;
use foundation::math::LonLat;
use serde::{Deserialize, Serialize};

use crate::detail::DetailCard;
use crate::symbology::MarkerVisual;

/// Camera transition used when a marker is selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyToOptions {
    /// The camera never zooms out when flying to a selection.
    pub min_zoom: f64,
    pub padding_top_px: u32,
    pub padding_bottom_px: u32,
    pub duration_ms: u64,
}

impl Default for FlyToOptions {
    fn default() -> Self {
        Self {
            min_zoom: 12.0,
            padding_top_px: 300,
            padding_bottom_px: 50,
            duration_ms: 800,
        }
    }
}

impl FlyToOptions {
    pub fn command(&self, center: LonLat, current_zoom: f64) -> FlyTo {
        let zoom = if current_zoom.is_nan() {
            self.min_zoom
        } else {
            current_zoom.max(self.min_zoom)
        };
        FlyTo {
            center,
            zoom,
            padding_top_px: self.padding_top_px,
            padding_bottom_px: self.padding_bottom_px,
            duration_ms: self.duration_ms,
        }
    }
}

/// A resolved camera command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlyTo {
    pub center: LonLat,
    pub zoom: f64,
    pub padding_top_px: u32,
    pub padding_bottom_px: u32,
    pub duration_ms: u64,
}

/// The map/camera library the engine drives.
///
/// Marker clicks come back to the engine through the returned [`Handle`].
pub trait RenderSurface {
    /// `false` until the camera and style are usable.
    fn is_ready(&self) -> bool;
    fn zoom(&self) -> f64;
    fn center(&self) -> LonLat;

    fn add_marker(&mut self, at: LonLat, visual: &MarkerVisual, id: &PoiId) -> Handle;
    fn remove_marker(&mut self, handle: Handle);
    fn set_marker_opacity(&mut self, handle: Handle, opacity: f32);

    fn fly_to(&mut self, camera: FlyTo);

    fn open_detail(&mut self, card: &DetailCard);
    fn close_detail(&mut self);
    /// Switches the add-to-plan button on the open detail to "done".
    fn set_plan_affordance(&mut self, id: &PoiId, done: bool);
}

/// One side effect observed by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceEvent {
    MarkerAdded { id: PoiId, at: LonLat, visual: MarkerVisual },
    MarkerRemoved { id: PoiId },
    MarkerOpacity { id: PoiId, opacity: f32 },
    FlyTo { camera: FlyTo },
    DetailOpened { id: PoiId, in_plan: bool },
    DetailClosed,
    PlanAffordance { id: PoiId, done: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveMarker {
    pub id: PoiId,
    pub at: LonLat,
    pub visual: MarkerVisual,
    pub opacity: f32,
}

/// In-memory surface that records everything done to it.
///
/// `fly_to` moves its camera immediately.
#[derive(Debug)]
pub struct RecordingSurface {
    ready: bool,
    zoom: f64,
    center: LonLat,
    handles: HandleAllocator,
    live: BTreeMap<Handle, LiveMarker>,
    detail: Option<PoiId>,
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new(zoom: f64, center: LonLat) -> Self {
        Self {
            ready: true,
            zoom,
            center,
            handles: HandleAllocator::new(),
            live: BTreeMap::new(),
            detail: None,
            events: Vec::new(),
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn set_camera(&mut self, zoom: f64, center: LonLat) {
        self.zoom = zoom;
        self.center = center;
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Live markers in handle order.
    pub fn live_markers(&self) -> impl Iterator<Item = (Handle, &LiveMarker)> + '_ {
        self.live.iter().map(|(h, m)| (*h, m))
    }

    pub fn handle_of(&self, id: &PoiId) -> Option<Handle> {
        self.live
            .iter()
            .find(|(_, m)| &m.id == id)
            .map(|(h, _)| *h)
    }

    pub fn marker(&self, handle: Handle) -> Option<&LiveMarker> {
        self.live.get(&handle)
    }

    pub fn open_detail_id(&self) -> Option<&PoiId> {
        self.detail.as_ref()
    }
}

impl RenderSurface for RecordingSurface {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn center(&self) -> LonLat {
        self.center
    }

    fn add_marker(&mut self, at: LonLat, visual: &MarkerVisual, id: &PoiId) -> Handle {
        let handle = self.handles.alloc();
        self.live.insert(
            handle,
            LiveMarker {
                id: id.clone(),
                at,
                visual: visual.clone(),
                opacity: 1.0,
            },
        );
        self.events.push(SurfaceEvent::MarkerAdded {
            id: id.clone(),
            at,
            visual: visual.clone(),
        });
        handle
    }

    fn remove_marker(&mut self, handle: Handle) {
        self.handles.release(handle);
        if let Some(marker) = self.live.remove(&handle) {
            self.events.push(SurfaceEvent::MarkerRemoved { id: marker.id });
        }
    }

    fn set_marker_opacity(&mut self, handle: Handle, opacity: f32) {
        if let Some(marker) = self.live.get_mut(&handle) {
            marker.opacity = opacity;
            self.events.push(SurfaceEvent::MarkerOpacity {
                id: marker.id.clone(),
                opacity,
            });
        }
    }

    fn fly_to(&mut self, camera: FlyTo) {
        self.zoom = camera.zoom;
        self.center = camera.center;
        self.events.push(SurfaceEvent::FlyTo { camera });
    }

    fn open_detail(&mut self, card: &DetailCard) {
        self.detail = Some(card.id.clone());
        self.events.push(SurfaceEvent::DetailOpened {
            id: card.id.clone(),
            in_plan: card.in_plan,
        });
    }

    fn close_detail(&mut self) {
        if self.detail.take().is_some() {
            self.events.push(SurfaceEvent::DetailClosed);
        }
    }

    fn set_plan_affordance(&mut self, id: &PoiId, done: bool) {
        self.events.push(SurfaceEvent::PlanAffordance {
            id: id.clone(),
            done,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{FlyToOptions, RecordingSurface, RenderSurface, SurfaceEvent};
    use crate::symbology::MarkerVisual;
    use foundation::ids::PoiId;
    use foundation::math::LonLat;

    #[test]
    fn fly_to_never_zooms_out() {
        let options = FlyToOptions::default();
        let target = LonLat::new(124.3, 13.6);
        assert_eq!(options.command(target, 9.0).zoom, 12.0);
        assert_eq!(options.command(target, 14.5).zoom, 14.5);
        assert_eq!(options.command(target, f64::NAN).zoom, 12.0);
        assert_eq!(options.command(target, 9.0).padding_top_px, 300);
    }

    #[test]
    fn recording_tracks_live_markers() {
        let mut surface = RecordingSurface::new(9.0, LonLat::new(0.0, 0.0));
        let visual = MarkerVisual::Simple {
            icon: "flag",
            label: "A".into(),
        };
        let a = PoiId::new("A");
        let handle = surface.add_marker(LonLat::new(1.0, 1.0), &visual, &a);
        assert_eq!(surface.handle_of(&a), Some(handle));
        surface.set_marker_opacity(handle, 0.0);
        assert_eq!(surface.marker(handle).map(|m| m.opacity), Some(0.0));

        surface.remove_marker(handle);
        surface.remove_marker(handle);
        assert_eq!(surface.live_count(), 0);
        let removals = surface
            .events()
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::MarkerRemoved { .. }))
            .count();
        assert_eq!(removals, 1);
    }
}

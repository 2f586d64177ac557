use catalog::{PointOfInterest, PointSet, RegionIndex};
use foundation::handles::Handle;
use foundation::ids::PoiId;
use foundation::time::Millis;
use runtime::{Generation, RecomputeScheduler, SchedulerStats};
use serde::Serialize;
use tracing::{debug, warn};
use visibility::{Viewport, VisibilityDecision, VisibilitySelector, ZoomPolicy};

use crate::config::EngineConfig;
use crate::detail::DetailCard;
use crate::error::EngineError;
use crate::interaction::{Effect, Interaction, InteractionState};
use crate::reconcile::{MaterializeHints, ReconcileSummary, Reconciler};
use crate::surface::RenderSurface;

type Listener = Box<dyn FnMut(&PoiId)>;

/// One completed visibility pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecomputeReport {
    /// Scheduler generation; `None` for a manual recompute.
    pub generation: Option<u64>,
    pub viewport: Viewport,
    pub decision: VisibilityDecision,
    pub reconcile: ReconcileSummary,
    /// Region containing the viewport center.
    pub region: Option<String>,
}

/// Cumulative counters.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub recomputes: u64,
    /// Passes dropped because the surface was not ready.
    pub skipped: u64,
    pub markers_added: u64,
    pub markers_removed: u64,
    /// Kept markers re-created after a point set swap.
    pub markers_refreshed: u64,
    pub selections: u64,
}

/// Viewport-adaptive marker engine.
///
/// Single-threaded: the host feeds camera events and the clock through
/// [`viewport_changed`](Self::viewport_changed) and [`tick`](Self::tick), and
/// forwards marker clicks by handle.
pub struct MapEngine {
    config: EngineConfig,
    points: PointSet,
    regions: RegionIndex,
    selector: VisibilitySelector,
    scheduler: RecomputeScheduler<Viewport>,
    reconciler: Reconciler,
    interaction: Interaction,
    stats: EngineStats,
    on_selected: Option<Listener>,
    on_plan_added: Option<Listener>,
}

impl MapEngine {
    pub fn new(points: Vec<PointOfInterest>, config: EngineConfig) -> Result<Self, EngineError> {
        let points = PointSet::new(points)?;
        Self::with_point_set(points, config)
    }

    pub fn with_point_set(points: PointSet, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let policy = ZoomPolicy::new(config.tiers.clone())?;
        if let Some(pinned) = &config.pinned
            && !points.contains(pinned)
        {
            warn!(pinned = %pinned, "pinned point not in point set");
        }
        Ok(Self {
            selector: VisibilitySelector::new(policy),
            scheduler: RecomputeScheduler::new(config.debounce_ms),
            config,
            points,
            regions: RegionIndex::default(),
            reconciler: Reconciler::new(),
            interaction: Interaction::new(),
            stats: EngineStats::default(),
            on_selected: None,
            on_plan_added: None,
        })
    }

    pub fn with_regions(mut self, regions: RegionIndex) -> Self {
        self.regions = regions;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    /// Read-only view of the materialized markers.
    pub fn markers(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn interaction_state(&self) -> &InteractionState {
        self.interaction.state()
    }

    /// The decision a pass would produce for `viewport`, without side effects.
    pub fn preview(&self, viewport: Viewport) -> VisibilityDecision {
        self.selector
            .select(&self.points, viewport, self.config.pinned.as_ref())
    }

    /// Earliest time a pending recompute becomes due.
    pub fn next_due(&self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    /// Swaps the point set; takes effect on the next recompute.
    ///
    /// Live markers whose record moved or changed visual are re-created on
    /// that pass.
    pub fn replace_points(&mut self, points: Vec<PointOfInterest>) -> Result<(), EngineError> {
        self.points = PointSet::new(points)?;
        self.reconciler.mark_stale();
        debug!(points = self.points.len(), "point set replaced");
        Ok(())
    }

    pub fn on_marker_selected(&mut self, listener: impl FnMut(&PoiId) + 'static) {
        self.on_selected = Some(Box::new(listener));
    }

    pub fn on_plan_added(&mut self, listener: impl FnMut(&PoiId) + 'static) {
        self.on_plan_added = Some(Box::new(listener));
    }

    /// Camera `moveend`/`zoomend`. Coalesced until [`tick`](Self::tick).
    pub fn viewport_changed(&mut self, now: Millis, viewport: Viewport) -> Generation {
        self.scheduler.notify(now, viewport)
    }

    /// Runs the coalesced recompute if it is due.
    pub fn tick(&mut self, now: Millis, surface: &mut dyn RenderSurface) -> Option<RecomputeReport> {
        let ticket = self.scheduler.poll(now)?;
        let report = if surface.is_ready() {
            Some(self.run_pass(ticket.params, Some(ticket.generation), surface))
        } else {
            self.skip(ticket.generation.0);
            None
        };
        self.scheduler.finish(ticket.generation);
        report
    }

    /// Recomputes immediately from the surface's camera.
    ///
    /// Supersedes any pending coalesced request.
    pub fn recompute_visibility(&mut self, surface: &mut dyn RenderSurface) -> Option<RecomputeReport> {
        if !surface.is_ready() {
            self.skip(self.scheduler.current_generation().0);
            return None;
        }
        self.scheduler.clear_pending();
        let viewport = Viewport::new(surface.zoom(), surface.center());
        Some(self.run_pass(viewport, None, surface))
    }

    fn skip(&mut self, generation: u64) {
        self.stats.skipped += 1;
        debug!(generation, "surface not ready; recompute skipped");
    }

    fn run_pass(
        &mut self,
        viewport: Viewport,
        generation: Option<Generation>,
        surface: &mut dyn RenderSurface,
    ) -> RecomputeReport {
        let decision = self
            .selector
            .select(&self.points, viewport, self.config.pinned.as_ref());
        let hints = MaterializeHints {
            always_iconographic: self.config.always_iconographic.as_ref(),
            hidden: self.interaction.open_id(),
        };
        let reconcile = self.reconciler.apply(&decision, &self.points, hints, surface);
        let region = self.regions.region_at(viewport.center).map(str::to_owned);

        self.stats.recomputes += 1;
        self.stats.markers_added += reconcile.added.len() as u64;
        self.stats.markers_removed += reconcile.removed.len() as u64;
        self.stats.markers_refreshed += reconcile.refreshed.len() as u64;
        debug!(
            shown = decision.len(),
            max = decision.policy.max_markers,
            zoom = viewport.zoom,
            style = ?decision.style,
            radius_km = decision.policy.suppression_radius_km,
            region = region.as_deref().unwrap_or("-"),
            added = reconcile.added.len(),
            removed = reconcile.removed.len(),
            refreshed = reconcile.refreshed.len(),
            "markers reconciled"
        );

        RecomputeReport {
            generation: generation.map(|g| g.0),
            viewport,
            decision,
            reconcile,
            region,
        }
    }

    /// Resolves a marker click. Returns `false` for stale or unknown handles.
    pub fn marker_clicked(&mut self, handle: Handle, surface: &mut dyn RenderSurface) -> bool {
        let Some(id) = self.reconciler.id_for(handle).cloned() else {
            warn!(handle = ?handle, "click on unknown marker");
            return false;
        };
        self.select(&id, surface)
    }

    /// Opens the detail for `id` as if its marker had been clicked.
    pub fn select(&mut self, id: &PoiId, surface: &mut dyn RenderSurface) -> bool {
        if !self.points.contains(id) {
            warn!(id = %id, "select for unknown point");
            return false;
        }
        self.stats.selections += 1;
        let effects = self.interaction.select(id.clone());
        self.perform(effects, surface);
        true
    }

    /// Returns `false` if no detail was open.
    pub fn close_detail(&mut self, surface: &mut dyn RenderSurface) -> bool {
        let effects = self.interaction.close();
        let closed = !effects.is_empty();
        self.perform(effects, surface);
        closed
    }

    /// Returns `true` if `id` became a member; repeats are no-ops.
    pub fn add_to_plan(&mut self, id: &PoiId, surface: &mut dyn RenderSurface) -> bool {
        if !self.points.contains(id) {
            warn!(id = %id, "add to plan for unknown point");
            return false;
        }
        let effects = self.interaction.add_to_plan(id.clone());
        let added = !effects.is_empty();
        self.perform(effects, surface);
        added
    }

    pub fn remove_from_plan(&mut self, id: &PoiId, surface: &mut dyn RenderSurface) -> bool {
        let was_member = self.interaction.is_member(id);
        let effects = self.interaction.remove_from_plan(id);
        self.perform(effects, surface);
        was_member
    }

    pub fn is_member(&self, id: &PoiId) -> bool {
        self.interaction.is_member(id)
    }

    /// Plan members in insertion order.
    pub fn plan(&self) -> &[PoiId] {
        self.interaction.plan().members()
    }

    pub fn open_detail(&self) -> Option<&PoiId> {
        self.interaction.open_id()
    }

    fn perform(&mut self, effects: Vec<Effect>, surface: &mut dyn RenderSurface) {
        for effect in effects {
            match effect {
                Effect::RestoreMarker(id) => {
                    self.reconciler.set_hidden(&id, false, surface);
                }
                Effect::HideMarker(id) => {
                    self.reconciler.set_hidden(&id, true, surface);
                }
                Effect::CloseDetail => surface.close_detail(),
                Effect::OpenDetail(id) => {
                    if let Some(poi) = self.points.get(&id) {
                        let card = DetailCard::for_point(poi, self.interaction.is_member(&id));
                        surface.open_detail(&card);
                    }
                }
                Effect::FlyTo(id) => {
                    if let Some(poi) = self.points.get(&id) {
                        let camera = self.config.fly_to.command(poi.coordinate, surface.zoom());
                        surface.fly_to(camera);
                    }
                }
                Effect::NotifySelected(id) => {
                    if let Some(listener) = self.on_selected.as_mut() {
                        listener(&id);
                    }
                }
                Effect::SetPlanAffordance { id, done } => surface.set_plan_affordance(&id, done),
                Effect::NotifyPlanAdded(id) => {
                    if let Some(listener) = self.on_plan_added.as_mut() {
                        listener(&id);
                    }
                }
            }
        }
    }
}

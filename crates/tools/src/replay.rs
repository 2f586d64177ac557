use foundation::ids::PoiId;
use foundation::math::LonLat;
use foundation::time::Millis;
use markers::{EngineStats, MapEngine, RecomputeReport, RecordingSurface, RenderSurface, SurfaceEvent};
use serde::{Deserialize, Serialize};
use tracing::warn;
use visibility::Viewport;

/// One scripted host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Camera settled at a new viewport.
    Camera { at: Millis, zoom: f64, center: LonLat },
    /// Click on the marker for `name`; ignored if it is not on screen.
    Click { at: Millis, name: PoiId },
    Close { at: Millis },
    AddToPlan { at: Millis, name: PoiId },
    RemoveFromPlan { at: Millis, name: PoiId },
}

impl ScriptStep {
    pub fn at(&self) -> Millis {
        match self {
            ScriptStep::Camera { at, .. }
            | ScriptStep::Click { at, .. }
            | ScriptStep::Close { at }
            | ScriptStep::AddToPlan { at, .. }
            | ScriptStep::RemoveFromPlan { at, .. } => *at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Starting camera; defaults to the first camera step.
    #[serde(default)]
    pub start: Option<Viewport>,
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutput {
    pub reports: Vec<RecomputeReport>,
    pub events: Vec<SurfaceEvent>,
    pub plan: Vec<PoiId>,
    pub open_detail: Option<PoiId>,
    pub stats: EngineStats,
}

/// Drives `engine` through `script` against an in-memory surface.
///
/// Steps run in timestamp order (stable for equal times). Due recomputes are
/// flushed before each step and once more after the last. A click that moves
/// the camera feeds the new viewport back as a camera event.
pub fn replay(engine: &mut MapEngine, script: &Script) -> ReplayOutput {
    let mut steps = script.steps.clone();
    steps.sort_by_key(ScriptStep::at);

    let start = script.start.or_else(|| {
        steps.iter().find_map(|s| match s {
            ScriptStep::Camera { zoom, center, .. } => Some(Viewport::new(*zoom, *center)),
            _ => None,
        })
    });
    let start = start.unwrap_or(Viewport::new(0.0, LonLat::default()));
    let mut surface = RecordingSurface::new(start.zoom, start.center);
    let mut reports = Vec::new();

    for step in &steps {
        let now = step.at();
        reports.extend(engine.tick(now, &mut surface));
        match step {
            ScriptStep::Camera { zoom, center, .. } => {
                surface.set_camera(*zoom, *center);
                engine.viewport_changed(now, Viewport::new(*zoom, *center));
            }
            ScriptStep::Click { name, .. } => {
                let Some(handle) = surface.handle_of(name) else {
                    warn!(name = %name, "no marker on screen; click ignored");
                    continue;
                };
                let before = (surface.zoom(), surface.center());
                engine.marker_clicked(handle, &mut surface);
                if before != (surface.zoom(), surface.center()) {
                    engine.viewport_changed(now, Viewport::new(surface.zoom(), surface.center()));
                }
            }
            ScriptStep::Close { .. } => {
                engine.close_detail(&mut surface);
            }
            ScriptStep::AddToPlan { name, .. } => {
                engine.add_to_plan(name, &mut surface);
            }
            ScriptStep::RemoveFromPlan { name, .. } => {
                engine.remove_from_plan(name, &mut surface);
            }
        }
    }

    while let Some(due) = engine.next_due() {
        match engine.tick(due, &mut surface) {
            Some(report) => reports.push(report),
            None => break,
        }
    }

    ReplayOutput {
        reports,
        events: surface.take_events(),
        plan: engine.plan().to_vec(),
        open_detail: engine.open_detail().cloned(),
        stats: engine.stats(),
    }
}

use catalog::{PointOfInterest, PointSet};
use foundation::ids::PoiId;
use serde::Serialize;
use tracing::warn;

/// What [`ensure_pinned`] did to a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinOutcome {
    /// No pinned point configured.
    Unpinned,
    AlreadyPresent,
    /// The pinned point was prepended, displacing the last selected point.
    Inserted { displaced: Option<PoiId> },
    /// The pinned identity is not in the point set; selection unchanged.
    Missing,
}

/// Guarantees the pinned point is part of `selection`.
///
/// If absent, the last (lowest priority) entry is dropped and the pinned
/// record is prepended; the interior order is preserved.
pub fn ensure_pinned<'a>(
    selection: &mut Vec<&'a PointOfInterest>,
    pinned: Option<&PoiId>,
    points: &'a PointSet,
) -> PinOutcome {
    let Some(pinned) = pinned else {
        return PinOutcome::Unpinned;
    };
    if selection.iter().any(|p| &p.id == pinned) {
        return PinOutcome::AlreadyPresent;
    }
    let Some(record) = points.get(pinned) else {
        warn!(pinned = %pinned, "pinned point missing from point set; skipping guarantee");
        return PinOutcome::Missing;
    };

    let displaced = selection.pop().map(|p| p.id.clone());
    selection.insert(0, record);
    PinOutcome::Inserted { displaced }
}

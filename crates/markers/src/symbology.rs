use catalog::{PointOfInterest, category_icon};
use foundation::ids::PoiId;
use serde::Serialize;
use visibility::StyleTier;

/// What a marker looks like, fixed when it is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerVisual {
    /// Image thumbnail with the point's name underneath.
    Iconographic { image: String, label: String },
    /// Category icon badge with the point's name beside it.
    Simple { icon: &'static str, label: String },
}

impl MarkerVisual {
    pub fn label(&self) -> &str {
        match self {
            MarkerVisual::Iconographic { label, .. } | MarkerVisual::Simple { label, .. } => label,
        }
    }

    pub fn is_iconographic(&self) -> bool {
        matches!(self, MarkerVisual::Iconographic { .. })
    }
}

/// Picks the visual for `poi` under the decision's style tier.
///
/// The `always_iconographic` point ignores the tier. Any point without
/// media falls back to the simple badge.
pub fn resolve_visual(
    poi: &PointOfInterest,
    style: StyleTier,
    always_iconographic: Option<&PoiId>,
) -> MarkerVisual {
    let wants_image =
        style == StyleTier::Iconographic || always_iconographic.is_some_and(|id| *id == poi.id);
    match poi.primary_image() {
        Some(image) if wants_image => MarkerVisual::Iconographic {
            image: image.to_owned(),
            label: poi.id.to_string(),
        },
        _ => MarkerVisual::Simple {
            icon: category_icon(&poi.categories),
            label: poi.id.to_string(),
        },
    }
}

/// Icon scale factor for continuous zoom: shrinks past zoom 9, floor 0.5.
pub fn marker_scale(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return 1.0;
    }
    (1.0 - (zoom - 9.0) * 0.1).max(0.5)
}

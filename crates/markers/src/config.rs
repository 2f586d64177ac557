use foundation::ids::PoiId;
use runtime::DEFAULT_DEBOUNCE_MS;
use serde::{Deserialize, Serialize};
use visibility::{ConfigError, ZoomTiers};

use crate::surface::FlyToOptions;

/// Engine configuration; every field may be omitted in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tiers: ZoomTiers,
    /// Point that is always part of the decision.
    pub pinned: Option<PoiId>,
    /// Point drawn with its image at every zoom, when it has one.
    pub always_iconographic: Option<PoiId>,
    pub debounce_ms: u64,
    pub fly_to: FlyToOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tiers: ZoomTiers::default(),
            pinned: None,
            always_iconographic: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            fly_to: FlyToOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Pins `id` and draws it iconographically, the usual landmark setup.
    pub fn with_landmark(mut self, id: impl Into<PoiId>) -> Self {
        let id = id.into();
        self.pinned = Some(id.clone());
        self.always_iconographic = Some(id);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tiers.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;
    use foundation::ids::PoiId;

    #[test]
    fn json_overrides_merge_with_defaults() {
        let config: EngineConfig = serde_json::from_str(
            r#"{ "pinned": "Binurong Point", "tiers": { "t3": 13.0 }, "fly_to": { "duration_ms": 400 } }"#,
        )
        .unwrap();
        assert_eq!(config.pinned, Some(PoiId::new("Binurong Point")));
        assert_eq!(config.always_iconographic, None);
        assert_eq!(config.tiers.t3, 13.0);
        assert_eq!(config.tiers.t1, 8.5);
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.fly_to.duration_ms, 400);
        assert_eq!(config.fly_to.min_zoom, 12.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn landmark_sets_both_roles() {
        let config = EngineConfig::default().with_landmark("Binurong Point");
        assert_eq!(config.pinned, config.always_iconographic);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Zoom thresholds must be finite and strictly ascending.
    Thresholds { t1: f64, t2: f64, t3: f64 },
    /// Suppression radii must be finite and non-negative.
    Radius { tier: usize, radius_km: f64 },
    /// Every tier must show at least one marker.
    ZeroMarkers { tier: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Thresholds { t1, t2, t3 } => write!(
                f,
                "zoom thresholds must be finite and ascending: t1={t1} t2={t2} t3={t3}"
            ),
            ConfigError::Radius { tier, radius_km } => write!(
                f,
                "suppression radius for tier {tier} must be finite and >= 0: {radius_km}"
            ),
            ConfigError::ZeroMarkers { tier } => {
                write!(f, "tier {tier} must allow at least one marker")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

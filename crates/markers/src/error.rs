use catalog::CatalogError;
use visibility::ConfigError;

/// Construction-time failures of a [`MapEngine`](crate::MapEngine).
///
/// Recomputation itself never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Catalog(CatalogError),
    Config(ConfigError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Catalog(e) => write!(f, "invalid point set: {e}"),
            EngineError::Config(e) => write!(f, "invalid engine config: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Catalog(e) => Some(e),
            EngineError::Config(e) => Some(e),
        }
    }
}

impl From<CatalogError> for EngineError {
    fn from(e: CatalogError) -> Self {
        EngineError::Catalog(e)
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        EngineError::Config(e)
    }
}

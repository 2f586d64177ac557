#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two records share the same identity.
    DuplicateId(String),
    /// A record has a non-finite longitude or latitude.
    InvalidCoordinate { name: String },
    /// The media manifest could not be read or parsed.
    Manifest(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateId(name) => {
                write!(f, "duplicate point of interest identity: {name}")
            }
            CatalogError::InvalidCoordinate { name } => {
                write!(f, "point of interest {name} has a non-finite coordinate")
            }
            CatalogError::Manifest(msg) => write!(f, "media manifest unavailable: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

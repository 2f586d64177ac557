use serde::{Deserialize, Serialize};

/// Identity of a point of interest: its name, unique within a point set.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoiId(String);

impl PoiId {
    pub fn new(name: impl Into<String>) -> Self {
        PoiId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PoiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoiId {
    fn from(name: &str) -> Self {
        PoiId::new(name)
    }
}

impl From<String> for PoiId {
    fn from(name: String) -> Self {
        PoiId(name)
    }
}

impl std::borrow::Borrow<str> for PoiId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

use foundation::ids::PoiId;
use foundation::math::LonLat;
use serde::{Deserialize, Serialize};

/// A point of interest as loaded by the data layer.
///
/// Records are immutable once they are part of a [`PointSet`](crate::PointSet);
/// the engine only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    #[serde(rename = "name")]
    pub id: PoiId,
    #[serde(rename = "coordinates")]
    pub coordinate: LonLat,
    /// Category tags; the first one is the primary category.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Ordered image references, possibly empty until media is attached.
    #[serde(default, rename = "images")]
    pub media: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Administrative area the point belongs to (e.g. a municipality key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl PointOfInterest {
    pub fn new(id: impl Into<PoiId>, coordinate: LonLat) -> Self {
        Self {
            id: id.into(),
            coordinate,
            categories: Vec::new(),
            media: Vec::new(),
            description: String::new(),
            location: None,
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_media<I, S>(mut self, media: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media = media.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.media.first().map(String::as_str)
    }

    pub fn has_media(&self) -> bool {
        !self.media.is_empty()
    }
}

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::CatalogError;

const DEFAULT_IMAGE_PATH: &str = "/assets/images";
const DEFAULT_VIDEO_PATH: &str = "/assets/videos";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestConfig {
    #[serde(default, rename = "imagePath", skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, rename = "videoPath", skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotMediaFiles {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotEntry {
    #[serde(default)]
    pub media: SpotMediaFiles,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, rename = "hasVideo")]
    pub has_video: bool,
}

/// Media manifest: `spots[MUNICIPALITY][spot name]` → media files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaManifest {
    #[serde(default)]
    pub config: ManifestConfig,
    #[serde(default)]
    pub spots: BTreeMap<String, BTreeMap<String, SpotEntry>>,
}

/// Media resolved for a single spot, with directory prefixes applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotMedia {
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub thumbnail: Option<String>,
    pub featured: Option<String>,
    pub categories: Vec<String>,
    pub has_video: bool,
}

impl MediaManifest {
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(raw).map_err(|e| CatalogError::Manifest(e.to_string()))
    }

    /// Looks up a spot. The municipality key is matched upper-cased.
    pub fn spot_media(&self, municipality: &str, spot: &str) -> SpotMedia {
        let Some(entry) = self
            .spots
            .get(&municipality.to_uppercase())
            .and_then(|by_name| by_name.get(spot))
        else {
            return SpotMedia::default();
        };

        let image_path = self
            .config
            .image_path
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_PATH);
        let video_path = self
            .config
            .video_path
            .as_deref()
            .unwrap_or(DEFAULT_VIDEO_PATH);
        let join = |dir: &str, file: &String| format!("{dir}/{file}");

        SpotMedia {
            images: entry.media.images.iter().map(|f| join(image_path, f)).collect(),
            videos: entry.media.videos.iter().map(|f| join(video_path, f)).collect(),
            thumbnail: entry.media.thumbnail.as_ref().map(|f| join(image_path, f)),
            featured: entry.media.featured.as_ref().map(|f| join(image_path, f)),
            categories: entry.categories.clone(),
            has_video: entry.has_video,
        }
    }
}

/// Where a [`MediaCatalog`] loads its manifest from.
pub trait ManifestSource {
    fn load(&mut self) -> Result<MediaManifest, CatalogError>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryManifest {
    manifest: MediaManifest,
}

impl InMemoryManifest {
    pub fn new(manifest: MediaManifest) -> Self {
        Self { manifest }
    }
}

impl ManifestSource for InMemoryManifest {
    fn load(&mut self) -> Result<MediaManifest, CatalogError> {
        Ok(self.manifest.clone())
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileManifest {
    path: PathBuf,
}

impl JsonFileManifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ManifestSource for JsonFileManifest {
    fn load(&mut self) -> Result<MediaManifest, CatalogError> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| CatalogError::Manifest(format!("read {:?}: {e}", self.path)))?;
        MediaManifest::from_json(&raw)
    }
}

/// Owned, lazily populated manifest cache.
///
/// The first lookup loads through the source; later lookups reuse the cached
/// manifest. A failed load is logged and cached as an empty manifest so every
/// spot resolves to empty media instead of retrying on each call.
#[derive(Debug)]
pub struct MediaCatalog<S> {
    source: S,
    cached: Option<MediaManifest>,
    loads: u32,
}

impl<S: ManifestSource> MediaCatalog<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cached: None,
            loads: 0,
        }
    }

    /// Number of times the source has been consulted.
    pub fn load_count(&self) -> u32 {
        self.loads
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.is_some()
    }

    pub fn manifest(&mut self) -> &MediaManifest {
        if self.cached.is_none() {
            self.loads += 1;
            let manifest = match self.source.load() {
                Ok(m) => {
                    debug!(municipalities = m.spots.len(), "media manifest loaded");
                    m
                }
                Err(err) => {
                    error!("failed to load media manifest: {err}");
                    MediaManifest::default()
                }
            };
            self.cached = Some(manifest);
        }
        self.cached.get_or_insert_with(MediaManifest::default)
    }

    pub fn resolve(&mut self, municipality: &str, spot: &str) -> SpotMedia {
        self.manifest().spot_media(municipality, spot)
    }

    /// Drops the cached manifest; the next lookup reloads it.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogError, ManifestSource, MediaCatalog, MediaManifest, SpotMedia};
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = r#"{
        "config": { "imagePath": "/media/img", "videoPath": "/media/vid" },
        "spots": {
            "VIRAC": {
                "Twin Rock": {
                    "media": {
                        "images": ["a.jpg", "b.jpg"],
                        "videos": ["tour.mp4"],
                        "thumbnail": "thumb.jpg"
                    },
                    "categories": ["BEACH"],
                    "hasVideo": true
                }
            }
        }
    }"#;

    struct CountingSource {
        raw: &'static str,
        calls: u32,
    }

    impl ManifestSource for CountingSource {
        fn load(&mut self) -> Result<MediaManifest, CatalogError> {
            self.calls += 1;
            MediaManifest::from_json(self.raw)
        }
    }

    #[test]
    fn resolves_prefixed_paths() {
        let manifest = MediaManifest::from_json(MANIFEST).unwrap();
        let media = manifest.spot_media("virac", "Twin Rock");
        assert_eq!(
            media,
            SpotMedia {
                images: vec!["/media/img/a.jpg".into(), "/media/img/b.jpg".into()],
                videos: vec!["/media/vid/tour.mp4".into()],
                thumbnail: Some("/media/img/thumb.jpg".into()),
                featured: None,
                categories: vec!["BEACH".into()],
                has_video: true,
            }
        );
    }

    #[test]
    fn unknown_spot_is_empty() {
        let manifest = MediaManifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.spot_media("VIRAC", "Nowhere"), SpotMedia::default());
        assert_eq!(manifest.spot_media("BATO", "Twin Rock"), SpotMedia::default());
    }

    #[test]
    fn default_directories_apply_without_config() {
        let manifest = MediaManifest::from_json(
            r#"{ "spots": { "BATO": { "X": { "media": { "images": ["x.jpg"] } } } } }"#,
        )
        .unwrap();
        assert_eq!(
            manifest.spot_media("Bato", "X").images,
            vec!["/assets/images/x.jpg".to_string()]
        );
    }

    #[test]
    fn catalog_loads_once() {
        let mut catalog = MediaCatalog::new(CountingSource {
            raw: MANIFEST,
            calls: 0,
        });
        assert!(!catalog.is_loaded());
        catalog.resolve("VIRAC", "Twin Rock");
        catalog.resolve("VIRAC", "Other");
        assert_eq!(catalog.load_count(), 1);
        assert_eq!(catalog.source.calls, 1);

        catalog.invalidate();
        catalog.resolve("VIRAC", "Twin Rock");
        assert_eq!(catalog.load_count(), 2);
    }

    #[test]
    fn failed_load_falls_back_to_empty_and_is_cached() {
        let mut catalog = MediaCatalog::new(CountingSource {
            raw: "not json",
            calls: 0,
        });
        assert_eq!(catalog.resolve("VIRAC", "Twin Rock"), SpotMedia::default());
        assert_eq!(catalog.resolve("VIRAC", "Twin Rock"), SpotMedia::default());
        assert_eq!(catalog.source.calls, 1);
    }
}

use std::fs;
use std::path::Path;

use catalog::{JsonFileManifest, MediaCatalog, PointOfInterest, PointSet, RegionIndex};
use markers::EngineConfig;
use serde::de::DeserializeOwned;
use tracing::info;

pub type ToolResult<T> = Result<T, Box<dyn std::error::Error>>;

fn read_json<T: DeserializeOwned>(path: &Path) -> ToolResult<T> {
    let raw = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    let value = serde_json::from_str(&raw).map_err(|e| format!("parse {path:?}: {e}"))?;
    Ok(value)
}

/// Loads point records, attaching manifest media to records that have none.
pub fn load_points(path: &Path, manifest: Option<&Path>) -> ToolResult<PointSet> {
    let points: Vec<PointOfInterest> = read_json(path)?;
    let set = match manifest {
        Some(manifest) => {
            let mut media = MediaCatalog::new(JsonFileManifest::new(manifest));
            PointSet::with_media(points, &mut media)?
        }
        None => PointSet::new(points)?,
    };
    info!(points = set.len(), "point set loaded");
    Ok(set)
}

pub fn load_config(path: Option<&Path>) -> ToolResult<EngineConfig> {
    let config: EngineConfig = match path {
        Some(path) => read_json(path)?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

pub fn load_regions(path: Option<&Path>) -> ToolResult<RegionIndex> {
    match path {
        Some(path) => read_json(path),
        None => Ok(RegionIndex::default()),
    }
}

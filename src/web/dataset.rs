use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::track::{TimeWindow, TrackPoint};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),
}

/// One row of the position table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselRecord {
    pub mmsi: String,
    #[serde(flatten)]
    pub point: TrackPoint,
}

/// Position reports grouped by vessel, each group in ascending time order.
#[derive(Debug, Default)]
pub struct Dataset {
    vessels: BTreeMap<String, Vec<TrackPoint>>,
}

impl Dataset {
    pub fn from_records(records: Vec<VesselRecord>) -> Self {
        let mut vessels: BTreeMap<String, Vec<TrackPoint>> = BTreeMap::new();
        for record in records {
            vessels.entry(record.mmsi).or_default().push(record.point);
        }
        for points in vessels.values_mut() {
            points.sort_by_key(|p| p.timestamp);
        }
        Self { vessels }
    }

    /// Load a `.json`, `.yaml` or `.yml` array of records.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content = std::fs::read_to_string(path)?;

        let records: Vec<VesselRecord> = match extension.as_str() {
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => return Err(DatasetError::UnsupportedFormat(path.display().to_string())),
        };

        let dataset = Self::from_records(records);
        log::info!(
            "loaded {} vessels ({} points) from {}",
            dataset.vessels.len(),
            dataset.point_count(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn vessel_ids(&self) -> Vec<String> {
        self.vessels.keys().cloned().collect()
    }

    pub fn point_count(&self) -> usize {
        self.vessels.values().map(Vec::len).sum()
    }

    /// Points of one vessel inside the closed window, or all of them when
    /// the window is open. Unknown vessels have no points.
    pub fn points(&self, vessel_id: &str, window: &TimeWindow) -> Vec<TrackPoint> {
        let Some(points) = self.vessels.get(vessel_id) else {
            return Vec::new();
        };
        match window.bounds() {
            Some((start, end)) => points
                .iter()
                .filter(|p| p.timestamp >= start && p.timestamp <= end)
                .cloned()
                .collect(),
            None => points.clone(),
        }
    }
}

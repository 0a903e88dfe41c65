use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::TrackError;
use super::time::deserialize_instant;

/// Fewer points than this cannot define a path, a velocity or an orientation.
pub const MIN_TRACK_POINTS: usize = 2;

/// One recorded observation of a vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrackPoint {
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(deserialize_with = "deserialize_instant")]
    pub timestamp: DateTime<Utc>,
    pub speed: f64,
    pub course: f64,
}

/// Optional time bounds of a track request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    pub fn full_history() -> Self {
        Self::default()
    }

    /// The closed interval to restrict to. A window with a missing bound
    /// means the whole history.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// Temporal range and spatial anchor used to frame a track in the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerExtent {
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
    pub anchor_longitude: f64,
    pub anchor_latitude: f64,
}

/// Time-ordered samples of one vessel. Always holds at least
/// [`MIN_TRACK_POINTS`] points.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    vessel_id: String,
    points: Vec<TrackPoint>,
}

impl Track {
    pub fn new(vessel_id: impl Into<String>, points: Vec<TrackPoint>) -> Result<Self, TrackError> {
        let vessel_id = vessel_id.into();
        if points.len() < MIN_TRACK_POINTS {
            return Err(TrackError::InsufficientData {
                vessel_id,
                count: points.len(),
            });
        }
        Ok(Self { vessel_id, points })
    }

    pub fn vessel_id(&self) -> &str {
        &self.vessel_id
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first(&self) -> &TrackPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &TrackPoint {
        &self.points[self.points.len() - 1]
    }

    pub fn extent(&self) -> ViewerExtent {
        let first = self.first();
        ViewerExtent {
            start: first.timestamp,
            stop: self.last().timestamp,
            anchor_longitude: first.longitude,
            anchor_latitude: first.latitude,
        }
    }
}

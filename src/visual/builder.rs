use crate::track::{Track, ViewerExtent};

use super::marker::{build_point_markers, PointMarker};
use super::moving::{build_moving_path, MovingPath};
use super::path::{build_static_path, StaticPath};

/// Everything the host draws for one track. Rebuilt from scratch for every
/// fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackVisualization {
    pub vessel_id: String,
    pub markers: Vec<PointMarker>,
    pub polyline: StaticPath,
    pub path: MovingPath,
    pub extent: ViewerExtent,
}

pub fn build_visualization(track: &Track, model_altitude_m: f64) -> TrackVisualization {
    TrackVisualization {
        vessel_id: track.vessel_id().to_string(),
        markers: build_point_markers(track),
        polyline: build_static_path(track),
        path: build_moving_path(track, model_altitude_m),
        extent: track.extent(),
    }
}

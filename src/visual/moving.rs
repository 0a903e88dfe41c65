use chrono::{DateTime, Utc};

use crate::geo::Cartographic;
use crate::track::Track;

use super::orientation::{Orientation, VelocityOrientation};
use super::sampled::SampledPosition;
use super::style::ModelStyle;

/// Height of the moving model above the surface so it clears terrain.
pub const MODEL_ALTITUDE_M: f64 = 100.0;

/// Time-indexed position of the vessel model, plus the orientation implied
/// by its motion.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingPath {
    pub name: String,
    pub altitude_m: f64,
    pub position: SampledPosition,
    pub model: ModelStyle,
}

impl MovingPath {
    pub fn orientation(&self) -> VelocityOrientation<'_> {
        VelocityOrientation::new(&self.position)
    }

    pub fn cartographic_at(&self, time: DateTime<Utc>) -> Option<Cartographic> {
        self.position.cartographic_at(time)
    }

    pub fn orientation_at(&self, time: DateTime<Utc>) -> Option<Orientation> {
        self.orientation().at(time)
    }
}

pub fn build_moving_path(track: &Track, altitude_m: f64) -> MovingPath {
    let mut position = SampledPosition::new();
    for point in track.points() {
        let location = Cartographic::from_degrees(point.longitude, point.latitude, altitude_m);
        position.add_sample(point.timestamp, location.to_cartesian());
    }

    MovingPath {
        name: "path".to_string(),
        altitude_m,
        position,
        model: ModelStyle::default(),
    }
}
